//! Sector detection by keyword matching.
//!
//! Order of evidence: URL substrings, then keyword counts in the page text,
//! then the meta description, then `General`.

use url::Url;

use super::{PageContent, Sector};

/// Sector keyword table. Declaration order breaks ties.
pub const SECTOR_KEYWORDS: &[(Sector, &[&str])] = &[
    (
        Sector::Technologie,
        &[
            "tech", "software", "it", "computer", "digital", "web", "app", "cloud",
        ],
    ),
    (
        Sector::Sante,
        &[
            "health", "medical", "hospital", "pharma", "care", "clinique", "médecin",
        ],
    ),
    (
        Sector::Finance,
        &[
            "bank",
            "finance",
            "insurance",
            "investment",
            "credit",
            "loan",
            "money",
        ],
    ),
    (
        Sector::Education,
        &["education", "school", "university", "college", "learn", "course"],
    ),
    (
        Sector::Commerce,
        &["shop", "store", "ecommerce", "buy", "sell", "market", "retail"],
    ),
    (
        Sector::Restauration,
        &["restaurant", "food", "cafe", "bistro", "meal", "cuisine"],
    ),
    (
        Sector::Immobilier,
        &[
            "real estate",
            "realestate",
            "immobilier",
            "property",
            "house",
            "apartment",
            "rent",
            "buy",
        ],
    ),
    (
        Sector::Tourisme,
        &["travel", "tour", "hotel", "vacation", "trip", "destination"],
    ),
];

/// Detects the sector of `url`, optionally looking at the page's HTML.
///
/// Returns `Sector::Unknown` only when the URL cannot be parsed.
pub fn detect_sector(url: &str, html: Option<&str>) -> Sector {
    let content = html
        .filter(|h| !h.trim().is_empty())
        .map(PageContent::from_html);
    detect_sector_in(url, content.as_ref())
}

/// Same as [`detect_sector`] but over pre-extracted page text.
pub fn detect_sector_in(url: &str, content: Option<&PageContent>) -> Sector {
    if let Err(e) = Url::parse(url) {
        log::debug!("Cannot parse {url} for sector detection: {e}");
        return Sector::Unknown;
    }

    let url_lower = url.to_lowercase();
    if let Some(sector) = first_sector_mentioned(&url_lower) {
        return sector;
    }

    let Some(page) = content else {
        return Sector::General;
    };

    if let Some(sector) = most_mentioned_sector(&page.text) {
        return sector;
    }

    page.meta_description
        .as_deref()
        .and_then(first_sector_mentioned)
        .unwrap_or(Sector::General)
}

fn first_sector_mentioned(haystack: &str) -> Option<Sector> {
    SECTOR_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(sector, _)| *sector)
}

/// Sector with the highest total keyword occurrence count.
///
/// Ties go to the sector declared first; zero counts never win.
fn most_mentioned_sector(text: &str) -> Option<Sector> {
    let mut best: Option<(Sector, usize)> = None;
    for (sector, keywords) in SECTOR_KEYWORDS {
        let count: usize = keywords.iter().map(|k| text.matches(k).count()).sum();
        if count == 0 {
            continue;
        }
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((*sector, count)),
        }
    }
    best.map(|(sector, _)| sector)
}
