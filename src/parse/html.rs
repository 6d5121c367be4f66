//! Basic HTML extraction utilities.
//!
//! This module provides functions to extract basic HTML elements:
//! - Page title
//! - Meta description
//! - Level-1 headings
//! - Images and their alt text
//! - Anchor links, split internal/external

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::utils::parse_selector_with_fallback;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("title", "title extraction"));
static META_DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_with_fallback("meta[name='description']", "meta description extraction")
});
static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("h1", "heading extraction"));
static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("img", "image extraction"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("a[href]", "link extraction"));

/// Image totals for a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageCounts {
    pub total: usize,
    pub without_alt: usize,
}

/// Anchor totals for a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkCounts {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
}

/// Extracts the page title.
///
/// Returns the text of the first `<title>` element, trimmed, or `None` when
/// the element is missing or blank.
pub fn extract_title(document: &Html) -> Option<String> {
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string());
    log::debug!("Extracted title: {:?}", title);
    title.filter(|t| !t.is_empty())
}

/// Extracts the `<meta name="description">` content, trimmed.
///
/// An empty content attribute counts as missing.
pub fn extract_meta_description(document: &Html) -> Option<String> {
    document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

/// Text of every `<h1>`, trimmed, in document order.
pub fn extract_h1(document: &Html) -> Vec<String> {
    document
        .select(&H1_SELECTOR)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect()
}

/// Counts images and those with a missing or empty `alt` attribute.
pub fn count_images(document: &Html) -> ImageCounts {
    document
        .select(&IMG_SELECTOR)
        .fold(ImageCounts::default(), |mut counts, img| {
            counts.total += 1;
            if matches!(img.value().attr("alt"), None | Some("")) {
                counts.without_alt += 1;
            }
            counts
        })
}

/// Counts anchors with an `href`, splitting them by destination.
///
/// Absolute hrefs (`http…` or protocol-relative `//…`) are internal when they
/// contain `page_host`; anything else (relative paths, fragments, `mailto:`)
/// stays on the page's own site and counts as internal.
pub fn count_links(document: &Html, page_host: &str) -> LinkCounts {
    let host = page_host.to_ascii_lowercase();
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .fold(LinkCounts::default(), |mut counts, href| {
            counts.total += 1;
            let href = href.trim();
            let absolute = href.starts_with("http") || href.starts_with("//");
            if !absolute || (!host.is_empty() && href.to_ascii_lowercase().contains(&host)) {
                counts.internal += 1;
            } else {
                counts.external += 1;
            }
            counts
        })
}
