//! CMS fingerprinting from the generator meta tag and body markers.

use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::LazyLock;
use strum_macros::{Display, EnumIter};

use crate::utils::{compile_regex_unsafe, parse_selector_with_fallback};

static GENERATOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("meta[name='generator']", "CMS detection"));
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("body[class]", "CMS detection"));
static WP_ADMIN_BAR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("div#wpadminbar", "CMS detection"));

static WORDPRESS_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"wordpress\s*(\d+\.\d+(\.\d+)?)", "WORDPRESS_VERSION_RE")
});
static JOOMLA_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"joomla\s*(\d+\.\d+(\.\d+)?)", "JOOMLA_VERSION_RE"));
static DRUPAL_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"drupal\s*(\d+\.\d+(\.\d+)?)", "DRUPAL_VERSION_RE"));

/// Content management systems we can fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum CmsKind {
    WordPress,
    Joomla,
    Drupal,
}

impl CmsKind {
    /// Oldest version still considered maintained.
    pub fn minimum_version(self) -> &'static str {
        match self {
            CmsKind::WordPress => "5.0",
            CmsKind::Joomla => "3.9",
            CmsKind::Drupal => "8.0",
        }
    }

    fn marker(self) -> &'static str {
        match self {
            CmsKind::WordPress => "wordpress",
            CmsKind::Joomla => "joomla",
            CmsKind::Drupal => "drupal",
        }
    }

    fn version_pattern(self) -> &'static Regex {
        match self {
            CmsKind::WordPress => &WORDPRESS_VERSION_RE,
            CmsKind::Joomla => &JOOMLA_VERSION_RE,
            CmsKind::Drupal => &DRUPAL_VERSION_RE,
        }
    }
}

/// What the page reveals about its CMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsFingerprint {
    pub kind: CmsKind,
    pub version: Option<String>,
}

impl CmsFingerprint {
    /// Unknown version never counts as outdated.
    pub fn is_outdated(&self) -> bool {
        self.version
            .as_deref()
            .is_some_and(|v| compare_versions(v, self.kind.minimum_version()) == Ordering::Less)
    }
}

/// Fingerprints the CMS behind a page.
///
/// The generator meta tag is authoritative; body markers are only consulted
/// when it names none of the known systems, and never yield a version.
pub fn detect_cms(document: &Html) -> Option<CmsFingerprint> {
    from_generator(document).or_else(|| from_body_markers(document))
}

fn from_generator(document: &Html) -> Option<CmsFingerprint> {
    let content = document
        .select(&GENERATOR_SELECTOR)
        .next()
        .and_then(|meta| meta.value().attr("content"))?
        .to_lowercase();

    [CmsKind::WordPress, CmsKind::Joomla, CmsKind::Drupal]
        .into_iter()
        .find(|kind| content.contains(kind.marker()))
        .map(|kind| CmsFingerprint {
            kind,
            version: kind
                .version_pattern()
                .captures(&content)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
        })
}

fn from_body_markers(document: &Html) -> Option<CmsFingerprint> {
    let body_classes = document
        .select(&BODY_SELECTOR)
        .next()
        .and_then(|body| body.value().attr("class"))
        .unwrap_or_default()
        .to_lowercase();

    let kind = if body_classes.contains("wp-admin")
        || document.select(&WP_ADMIN_BAR_SELECTOR).next().is_some()
    {
        CmsKind::WordPress
    } else if body_classes.contains("joomla") {
        CmsKind::Joomla
    } else if body_classes.contains("drupal") {
        CmsKind::Drupal
    } else {
        return None;
    };
    log::debug!("CMS {} detected from body markers", kind);
    Some(CmsFingerprint {
        kind,
        version: None,
    })
}

/// Compares dotted numeric versions component-wise; missing components are 0.
///
/// Non-numeric components compare as 0, so "5.x" equals "5.0".
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| part.trim().parse::<u64>().unwrap_or(0))
            .collect()
    };
    let (left, right) = (parse(a), parse(b));
    let len = left.len().max(right.len());
    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
