//! Copyright year detection in the page footer.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::utils::{compile_regex_unsafe, parse_selector_with_fallback};

static FOOTER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("footer", "footer lookup"));
static CLASS_OR_ID_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("[class], [id]", "footer lookup"));

/// Tried in priority order against the lower-cased footer text.
static COPYRIGHT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"copyright\s*©?\s*(\d{4})",
        r"©\s*(\d{4})",
        r"&copy;\s*(\d{4})",
        r"(\d{4})\s*©",
        r"copyright.*?(\d{4})",
    ]
    .iter()
    .map(|p| compile_regex_unsafe(p, "COPYRIGHT_PATTERNS"))
    .collect()
});

/// Locates the footer region: a `<footer>` element, else the first element
/// whose class or id contains "footer" (any case).
fn find_footer(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&FOOTER_SELECTOR).next().or_else(|| {
        document.select(&CLASS_OR_ID_SELECTOR).find(|el| {
            let value = el.value();
            [value.attr("class"), value.attr("id")]
                .into_iter()
                .flatten()
                .any(|v| v.to_lowercase().contains("footer"))
        })
    })
}

/// Year from the first matching copyright pattern in the footer.
///
/// No footer, or no pattern match, yields `None`.
pub fn extract_copyright_year(document: &Html) -> Option<i32> {
    let footer = find_footer(document)?;
    let text = footer.text().collect::<String>().to_lowercase();
    COPYRIGHT_PATTERNS
        .iter()
        .filter_map(|re| re.captures(&text))
        .find_map(|caps| caps.get(1)?.as_str().parse::<i32>().ok())
}

/// A year is outdated when older than `current_year - max_age_years`.
pub fn is_copyright_outdated(year: i32, current_year: i32, max_age_years: i32) -> bool {
    year < current_year - max_age_years
}
