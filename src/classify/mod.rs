//! Country and sector classification.
//!
//! Both classifiers are pure functions over a URL and, optionally, the fetched
//! page. They hold no state beyond the static lookup tables in `country` and
//! `sector`, so any number of tasks can call them concurrently.
//!
//! Failure is a named outcome rather than a panic: a URL that cannot be parsed
//! yields `Country::Unknown` / `Sector::Unknown`, which is distinct from the
//! legitimate "no local signal" answers `Country::International` and
//! `Sector::General`.

mod country;
mod sector;

use scraper::Html;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

pub use country::{detect_country, detect_country_in, COUNTRY_INDICATORS, TLD_COUNTRIES};
pub use sector::{detect_sector, detect_sector_in, SECTOR_KEYWORDS};

use crate::parse::extract_meta_description;

/// Country label assigned to a site.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Country {
    France,
    Germany,
    #[strum(serialize = "United Kingdom")]
    #[serde(rename = "United Kingdom")]
    UnitedKingdom,
    Italy,
    Spain,
    Belgium,
    Switzerland,
    Canada,
    #[strum(serialize = "United States")]
    #[serde(rename = "United States")]
    UnitedStates,
    Australia,
    Japan,
    China,
    Russia,
    Brazil,
    Netherlands,
    Sweden,
    Norway,
    Denmark,
    /// Generic TLD or no local indicator in the page
    International,
    /// The detector itself failed (e.g. unparseable URL)
    Unknown,
}

/// Business sector assigned to a site.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Technologie,
    Sante,
    Finance,
    Education,
    Commerce,
    Restauration,
    Immobilier,
    Tourisme,
    /// No keyword matched anywhere
    General,
    /// The detector itself failed (e.g. unparseable URL)
    Unknown,
}

/// Lower-cased text views of a page used by the keyword heuristics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// All text nodes of the document, lower-cased
    pub text: String,
    /// `<meta name="description">` content, lower-cased
    pub meta_description: Option<String>,
}

impl PageContent {
    /// Builds the text views from raw HTML.
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        Self::from_document(&document)
    }

    /// Builds the text views from an already parsed document.
    pub fn from_document(document: &Html) -> Self {
        let text = document
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let meta_description = extract_meta_description(document).map(|d| d.to_lowercase());
        Self {
            text,
            meta_description,
        }
    }
}

/// Both labels for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub country: Country,
    pub sector: Sector,
}

/// Classifies a fetched page, parsing its HTML once for both detectors.
///
/// An empty body is treated as "no page text", like an absent one.
pub fn classify_page(url: &str, html: Option<&str>) -> Classification {
    let content = html
        .filter(|h| !h.trim().is_empty())
        .map(PageContent::from_html);
    Classification {
        country: detect_country_in(url, content.as_ref()),
        sector: detect_sector_in(url, content.as_ref()),
    }
}
