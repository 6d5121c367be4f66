//! Typed signal records, one per on-page concern.

use serde::{Deserialize, Serialize};

use crate::classify::{Country, Sector};
use crate::parse::CmsKind;

/// Title or meta description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSignal {
    pub exists: bool,
    pub content: Option<String>,
    /// Length in characters
    pub length: usize,
    pub optimal: bool,
}

impl TextSignal {
    /// Builds the signal; `optimal` means present with a length in `[min, max]`.
    pub fn measure(content: Option<String>, min: usize, max: usize) -> Self {
        let length = content.as_deref().map_or(0, |c| c.chars().count());
        let exists = content.is_some();
        Self {
            exists,
            content,
            length,
            optimal: exists && (min..=max).contains(&length),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct H1Signal {
    pub count: usize,
    pub contents: Vec<String>,
    /// Exactly one `<h1>`
    pub optimal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSignal {
    pub total: usize,
    pub without_alt: usize,
    pub optimal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSignal {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsSignal {
    /// `None` when no known CMS was fingerprinted
    pub name: Option<CmsKind>,
    pub version: Option<String>,
    pub outdated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSignal {
    /// Wall time of the timed re-fetch, rounded to 2 decimals; `None` if it failed
    pub load_time_seconds: Option<f64>,
    pub slow: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyrightSignal {
    pub year: Option<i32>,
    pub outdated: bool,
}

/// Which branch produced the mobile verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MobileSource {
    /// The external checker answered
    Checked,
    /// No checker configured; friendliness assumed
    AssumedUnconfigured,
    /// The checker failed; friendliness assumed
    AssumedAfterFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileSignal {
    pub mobile_friendly: bool,
    pub source: MobileSource,
}

impl MobileSignal {
    pub fn assumed(source: MobileSource) -> Self {
        Self {
            mobile_friendly: true,
            source,
        }
    }
}

/// Everything known about one successfully fetched page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSignals {
    pub country: Country,
    pub sector: Sector,
    pub https: bool,
    pub title: TextSignal,
    pub meta_description: TextSignal,
    pub h1: H1Signal,
    pub images: ImageSignal,
    pub links: LinkSignal,
    /// UTF-8 byte length of the raw HTML
    pub page_size_bytes: usize,
    pub cms: CmsSignal,
    pub performance: PerformanceSignal,
    pub copyright: CopyrightSignal,
    pub mobile: MobileSignal,
}
