//! Signal fixtures shared by unit tests across modules.

use super::types::{
    CmsSignal, CopyrightSignal, H1Signal, ImageSignal, LinkSignal, MobileSignal, MobileSource,
    PerformanceSignal, SiteSignals, TextSignal,
};
use crate::classify::{Country, Sector};
use crate::config::{
    META_DESCRIPTION_MAX_LENGTH, META_DESCRIPTION_MIN_LENGTH, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH,
};

/// A bundle that triggers no deduction, as a baseline for toggling one
/// condition at a time.
pub fn perfect_signals() -> SiteSignals {
    SiteSignals {
        country: Country::International,
        sector: Sector::General,
        https: true,
        title: TextSignal::measure(Some("t".repeat(45)), TITLE_MIN_LENGTH, TITLE_MAX_LENGTH),
        meta_description: TextSignal::measure(
            Some("m".repeat(155)),
            META_DESCRIPTION_MIN_LENGTH,
            META_DESCRIPTION_MAX_LENGTH,
        ),
        h1: H1Signal {
            count: 1,
            contents: vec!["Heading".to_string()],
            optimal: true,
        },
        images: ImageSignal {
            total: 2,
            without_alt: 0,
            optimal: true,
        },
        links: LinkSignal::default(),
        page_size_bytes: 10_000,
        cms: CmsSignal::default(),
        performance: PerformanceSignal {
            load_time_seconds: Some(0.4),
            slow: false,
        },
        copyright: CopyrightSignal::default(),
        mobile: MobileSignal {
            mobile_friendly: true,
            source: MobileSource::Checked,
        },
    }
}
