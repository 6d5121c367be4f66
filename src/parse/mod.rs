//! HTML parsing and data extraction.
//!
//! This module extracts the raw on-page facts the signal extractor needs:
//! - Title and meta description
//! - Level-1 headings, images, links
//! - CMS fingerprint (generator meta tag, body markers)
//! - Copyright year from the footer
//!
//! All parsing is done using CSS selectors via the `scraper` crate. Every
//! function fails open: a missing element yields `None` or zero counts.

mod cms;
mod copyright;
mod html;

// Re-export public API
pub use cms::{compare_versions, detect_cms, CmsFingerprint, CmsKind};
pub use copyright::{extract_copyright_year, is_copyright_outdated};
pub use html::{
    count_images, count_links, extract_h1, extract_meta_description, extract_title, ImageCounts,
    LinkCounts,
};
