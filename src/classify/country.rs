//! Country detection from the top-level domain, then from page content.

use url::Url;

use super::{Country, PageContent};

/// Top-level domain to country table.
///
/// Generic TLDs map to `International` explicitly, so they never fall through
/// to content scanning.
pub const TLD_COUNTRIES: &[(&str, Country)] = &[
    ("fr", Country::France),
    ("de", Country::Germany),
    ("uk", Country::UnitedKingdom),
    ("com", Country::International),
    ("org", Country::International),
    ("net", Country::International),
    ("it", Country::Italy),
    ("es", Country::Spain),
    ("be", Country::Belgium),
    ("ch", Country::Switzerland),
    ("ca", Country::Canada),
    ("us", Country::UnitedStates),
    ("au", Country::Australia),
    ("jp", Country::Japan),
    ("cn", Country::China),
    ("ru", Country::Russia),
    ("br", Country::Brazil),
    ("nl", Country::Netherlands),
    ("se", Country::Sweden),
    ("no", Country::Norway),
    ("dk", Country::Denmark),
];

/// Content indicator phrases, checked in this order; the first country with
/// any phrase present in the page text wins.
pub const COUNTRY_INDICATORS: &[(Country, &[&str])] = &[
    (
        Country::France,
        &["france", "français", "paris", "euro", "€"],
    ),
    (
        Country::Germany,
        &["germany", "deutschland", "berlin", "euro", "€"],
    ),
    (
        Country::UnitedKingdom,
        &["uk", "united kingdom", "london", "pound", "£"],
    ),
    (
        Country::UnitedStates,
        &["usa", "united states", "new york", "dollar", "$"],
    ),
    (
        Country::Canada,
        &["canada", "toronto", "cad", "dollar", "$"],
    ),
];

/// Detects the country of `url`, optionally looking at the page's HTML.
///
/// Returns `Country::Unknown` only when the URL cannot be parsed or has no
/// host.
pub fn detect_country(url: &str, html: Option<&str>) -> Country {
    let content = html
        .filter(|h| !h.trim().is_empty())
        .map(PageContent::from_html);
    detect_country_in(url, content.as_ref())
}

/// Same as [`detect_country`] but over pre-extracted page text.
pub fn detect_country_in(url: &str, content: Option<&PageContent>) -> Country {
    let host = match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_ascii_lowercase(),
            _ => {
                log::debug!("No host in {url}, country unknown");
                return Country::Unknown;
            }
        },
        Err(e) => {
            log::debug!("Cannot parse {url} for country detection: {e}");
            return Country::Unknown;
        }
    };

    if let Some(tld) = top_level_label(&host) {
        if let Some((_, country)) = TLD_COUNTRIES.iter().find(|(t, _)| *t == tld) {
            return *country;
        }
    }

    match content {
        Some(page) => country_from_text(&page.text),
        None => Country::International,
    }
}

/// Last label of the host's public suffix (`co.uk` -> `uk`).
///
/// Falls back to the host's own last label when the suffix list has no answer.
fn top_level_label(host: &str) -> Option<&str> {
    let host = host.trim_end_matches('.');
    let suffix = psl::suffix_str(host).unwrap_or(host);
    suffix.rsplit('.').next().filter(|label| !label.is_empty())
}

fn country_from_text(text: &str) -> Country {
    COUNTRY_INDICATORS
        .iter()
        .find(|(_, phrases)| phrases.iter().any(|p| text.contains(p)))
        .map(|(country, _)| *country)
        .unwrap_or(Country::International)
}
