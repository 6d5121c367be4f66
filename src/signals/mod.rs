//! Page signal extraction.
//!
//! Turns one successful [`FetchResult`] into a [`SiteSignals`] bundle. The
//! HTML-derived signals are computed synchronously (the parsed document is
//! not `Send` and never lives across an await); the timed re-fetch and the
//! mobile check follow.
//!
//! Every signal fails open: a missing element, a failed re-fetch or a failed
//! mobile check yields a default value for that signal only.

mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::time::Instant;

use chrono::Datelike;
use scraper::Html;
use url::Url;

use crate::classify::Classification;
use crate::config::{
    COPYRIGHT_MAX_AGE_YEARS, META_DESCRIPTION_MAX_LENGTH, META_DESCRIPTION_MIN_LENGTH,
    SLOW_LOAD_THRESHOLD_SECS, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH,
};
use crate::error_handling::{InfoType, ProcessingStats, WarningType};
use crate::fetch::{FetchResult, HttpFetcher, MobileChecker};
use crate::parse::{
    count_images, count_links, detect_cms, extract_copyright_year, extract_h1,
    extract_meta_description, extract_title, is_copyright_outdated,
};
use crate::utils::round2;

pub use types::{
    CmsSignal, CopyrightSignal, H1Signal, ImageSignal, LinkSignal, MobileSignal, MobileSource,
    PerformanceSignal, SiteSignals, TextSignal,
};

/// Signals that come from the URL and HTML alone.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSignals {
    pub https: bool,
    pub title: TextSignal,
    pub meta_description: TextSignal,
    pub h1: H1Signal,
    pub images: ImageSignal,
    pub links: LinkSignal,
    pub page_size_bytes: usize,
    pub cms: CmsSignal,
    pub copyright: CopyrightSignal,
}

impl PageSignals {
    pub fn into_site_signals(
        self,
        labels: Classification,
        performance: PerformanceSignal,
        mobile: MobileSignal,
    ) -> SiteSignals {
        SiteSignals {
            country: labels.country,
            sector: labels.sector,
            https: self.https,
            title: self.title,
            meta_description: self.meta_description,
            h1: self.h1,
            images: self.images,
            links: self.links,
            page_size_bytes: self.page_size_bytes,
            cms: self.cms,
            performance,
            copyright: self.copyright,
            mobile,
        }
    }
}

/// Extracts the full signal bundle for a successful fetch.
///
/// `labels` are the classifier's answers for this same fetch.
pub async fn extract_signals(
    fetched: &FetchResult,
    labels: Classification,
    fetcher: &dyn HttpFetcher,
    mobile_checker: Option<&dyn MobileChecker>,
    stats: &ProcessingStats,
) -> SiteSignals {
    let page = parse_page_signals(&fetched.url, &fetched.html, chrono::Local::now().year());
    if !page.title.exists {
        stats.increment_warning(WarningType::MissingTitle);
    }
    if !page.meta_description.exists {
        stats.increment_warning(WarningType::MissingMetaDescription);
    }
    if page.cms.outdated {
        stats.increment_info(InfoType::OutdatedCms);
    }
    if page.copyright.outdated {
        stats.increment_info(InfoType::OutdatedCopyright);
    }

    let performance = measure_performance(fetcher, &fetched.url, stats).await;
    let mobile = check_mobile(mobile_checker, &fetched.url, stats).await;
    page.into_site_signals(labels, performance, mobile)
}

/// Parses the HTML-only signals.
///
/// `current_year` anchors the copyright staleness check.
pub fn parse_page_signals(url: &str, html: &str, current_year: i32) -> PageSignals {
    let parsed_url = Url::parse(url).ok();
    let https = parsed_url.as_ref().is_some_and(|u| u.scheme() == "https");
    let host = parsed_url
        .as_ref()
        .and_then(|u| u.host_str())
        .unwrap_or_default()
        .to_string();

    let document = Html::parse_document(html);

    let h1_contents = extract_h1(&document);
    let image_counts = count_images(&document);
    let link_counts = count_links(&document, &host);

    let cms = match detect_cms(&document) {
        Some(fingerprint) => CmsSignal {
            outdated: fingerprint.is_outdated(),
            name: Some(fingerprint.kind),
            version: fingerprint.version,
        },
        None => CmsSignal::default(),
    };

    let copyright = match extract_copyright_year(&document) {
        Some(year) => CopyrightSignal {
            year: Some(year),
            outdated: is_copyright_outdated(year, current_year, COPYRIGHT_MAX_AGE_YEARS),
        },
        None => CopyrightSignal::default(),
    };

    PageSignals {
        https,
        title: TextSignal::measure(extract_title(&document), TITLE_MIN_LENGTH, TITLE_MAX_LENGTH),
        meta_description: TextSignal::measure(
            extract_meta_description(&document),
            META_DESCRIPTION_MIN_LENGTH,
            META_DESCRIPTION_MAX_LENGTH,
        ),
        h1: H1Signal {
            count: h1_contents.len(),
            optimal: h1_contents.len() == 1,
            contents: h1_contents,
        },
        images: ImageSignal {
            total: image_counts.total,
            without_alt: image_counts.without_alt,
            optimal: image_counts.without_alt == 0,
        },
        links: LinkSignal {
            total: link_counts.total,
            internal: link_counts.internal,
            external: link_counts.external,
        },
        page_size_bytes: html.len(),
        cms,
        copyright,
    }
}

/// Times one extra GET of `url`.
///
/// A failed re-fetch leaves the load time absent and the page not slow.
pub async fn measure_performance(
    fetcher: &dyn HttpFetcher,
    url: &str,
    stats: &ProcessingStats,
) -> PerformanceSignal {
    let started = Instant::now();
    match fetcher.get(url).await {
        Ok(_) => {
            let elapsed = started.elapsed().as_secs_f64();
            PerformanceSignal {
                load_time_seconds: Some(round2(elapsed)),
                slow: elapsed > SLOW_LOAD_THRESHOLD_SECS,
            }
        }
        Err(e) => {
            log::debug!("Timed re-fetch of {url} failed: {e}");
            stats.increment_warning(WarningType::PerformanceProbeFailed);
            PerformanceSignal::default()
        }
    }
}

/// Asks the mobile checker, assuming friendly when it is absent or fails.
pub async fn check_mobile(
    checker: Option<&dyn MobileChecker>,
    url: &str,
    stats: &ProcessingStats,
) -> MobileSignal {
    let Some(checker) = checker else {
        return MobileSignal::assumed(MobileSource::AssumedUnconfigured);
    };
    match checker.check(url).await {
        Ok(mobile_friendly) => MobileSignal {
            mobile_friendly,
            source: MobileSource::Checked,
        },
        Err(e) => {
            log::warn!("Mobile check for {url} failed, assuming mobile friendly: {e}");
            stats.increment_warning(WarningType::MobileCheckFailed);
            MobileSignal::assumed(MobileSource::AssumedAfterFailure)
        }
    }
}
