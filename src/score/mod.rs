//! Scoring: fixed deductions from a base of 100, plus the matching issues.
//!
//! Each check is independent. Checks run in a fixed order and each one that
//! fires contributes both its penalty and one human-readable issue, so the
//! issue list is derived from the signals and nothing else.

use crate::config::{
    BASE_SCORE, MAX_PAGE_SIZE_BYTES, META_DESCRIPTION_MAX_LENGTH, META_DESCRIPTION_MIN_LENGTH,
    PENALTY_H1, PENALTY_HEAVY_PAGE, PENALTY_IMAGES_ALT, PENALTY_META_DESCRIPTION,
    PENALTY_NOT_MOBILE_FRIENDLY, PENALTY_NO_HTTPS, PENALTY_OUTDATED_CMS,
    PENALTY_OUTDATED_COPYRIGHT, PENALTY_SLOW, PENALTY_TITLE, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH,
};
use crate::signals::SiteSignals;

/// One fired check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction {
    pub penalty: i32,
    pub issue: String,
}

/// Scores a signal bundle.
///
/// Returns the score clamped to `[0, 100]` and the issues in check order.
pub fn score(signals: &SiteSignals) -> (u8, Vec<String>) {
    let deductions = deductions(signals);
    let total: i32 = deductions.iter().map(|d| d.penalty).sum();
    let score = (BASE_SCORE - total).clamp(0, 100) as u8;
    (score, deductions.into_iter().map(|d| d.issue).collect())
}

/// Every check that fires, in order: HTTPS, title, meta description, H1,
/// images, mobile, performance, CMS, copyright, page size.
pub fn deductions(signals: &SiteSignals) -> Vec<Deduction> {
    let mut fired = Vec::new();
    let mut push = |penalty: i32, issue: String| fired.push(Deduction { penalty, issue });

    if !signals.https {
        push(PENALTY_NO_HTTPS, "No HTTPS".to_string());
    }

    let title = &signals.title;
    if !title.exists {
        push(PENALTY_TITLE, "Missing <title> tag".to_string());
    } else if !title.optimal {
        push(
            PENALTY_TITLE,
            format!(
                "Title not optimal ({} characters, expected {}-{})",
                title.length, TITLE_MIN_LENGTH, TITLE_MAX_LENGTH
            ),
        );
    }

    let meta = &signals.meta_description;
    if !meta.exists {
        push(PENALTY_META_DESCRIPTION, "Missing meta description".to_string());
    } else if !meta.optimal {
        push(
            PENALTY_META_DESCRIPTION,
            format!(
                "Meta description not optimal ({} characters, expected {}-{})",
                meta.length, META_DESCRIPTION_MIN_LENGTH, META_DESCRIPTION_MAX_LENGTH
            ),
        );
    }

    if !signals.h1.optimal {
        push(
            PENALTY_H1,
            format!("H1 count: {} (expected exactly 1)", signals.h1.count),
        );
    }

    if !signals.images.optimal {
        push(
            PENALTY_IMAGES_ALT,
            format!("Images without alt text: {}", signals.images.without_alt),
        );
    }

    if !signals.mobile.mobile_friendly {
        push(PENALTY_NOT_MOBILE_FRIENDLY, "Not mobile friendly".to_string());
    }

    if signals.performance.slow {
        let issue = match signals.performance.load_time_seconds {
            Some(secs) => format!("Slow load time: {secs}s"),
            None => "Slow load time".to_string(),
        };
        push(PENALTY_SLOW, issue);
    }

    if signals.cms.outdated {
        let name = signals
            .cms
            .name
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "CMS".to_string());
        let issue = match &signals.cms.version {
            Some(version) => format!("Outdated CMS: {name} {version}"),
            None => format!("Outdated CMS: {name}"),
        };
        push(PENALTY_OUTDATED_CMS, issue);
    }

    if signals.copyright.outdated {
        let issue = match signals.copyright.year {
            Some(year) => format!("Outdated copyright: {year}"),
            None => "Outdated copyright".to_string(),
        };
        push(PENALTY_OUTDATED_COPYRIGHT, issue);
    }

    if signals.page_size_bytes > MAX_PAGE_SIZE_BYTES {
        push(
            PENALTY_HEAVY_PAGE,
            format!(
                "Page too heavy: {:.1} KB",
                signals.page_size_bytes as f64 / 1024.0
            ),
        );
    }

    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::CmsKind;
    use crate::signals::test_helpers::perfect_signals;
    use crate::signals::{CmsSignal, CopyrightSignal, PerformanceSignal, TextSignal};

    #[test]
    fn test_perfect_bundle_scores_100_without_issues() {
        let (score, issues) = score(&perfect_signals());
        assert_eq!(score, 100);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_no_https_alone_yields_85() {
        let mut signals = perfect_signals();
        signals.https = false;
        let (score, issues) = score(&signals);
        assert_eq!(score, 85);
        assert_eq!(issues, vec!["No HTTPS"]);
    }

    #[test]
    fn test_each_condition_costs_exactly_its_penalty() {
        type Toggle = fn(&mut SiteSignals);
        let cases: Vec<(Toggle, i32)> = vec![
            (|s: &mut SiteSignals| s.https = false, PENALTY_NO_HTTPS),
            (|s: &mut SiteSignals| s.title = TextSignal::measure(None, 30, 60), PENALTY_TITLE),
            (
                |s: &mut SiteSignals| s.title = TextSignal::measure(Some("short".into()), 30, 60),
                PENALTY_TITLE,
            ),
            (
                |s: &mut SiteSignals| s.meta_description = TextSignal::measure(None, 150, 160),
                PENALTY_META_DESCRIPTION,
            ),
            (
                |s: &mut SiteSignals| {
                    s.h1.count = 2;
                    s.h1.optimal = false;
                },
                PENALTY_H1,
            ),
            (
                |s: &mut SiteSignals| {
                    s.images.without_alt = 1;
                    s.images.optimal = false;
                },
                PENALTY_IMAGES_ALT,
            ),
            (|s: &mut SiteSignals| s.mobile.mobile_friendly = false, PENALTY_NOT_MOBILE_FRIENDLY),
            (
                |s: &mut SiteSignals| {
                    s.performance = PerformanceSignal {
                        load_time_seconds: Some(4.2),
                        slow: true,
                    }
                },
                PENALTY_SLOW,
            ),
            (
                |s: &mut SiteSignals| {
                    s.cms = CmsSignal {
                        name: Some(CmsKind::Joomla),
                        version: Some("3.4".into()),
                        outdated: true,
                    }
                },
                PENALTY_OUTDATED_CMS,
            ),
            (
                |s: &mut SiteSignals| {
                    s.copyright = CopyrightSignal {
                        year: Some(2015),
                        outdated: true,
                    }
                },
                PENALTY_OUTDATED_COPYRIGHT,
            ),
            (|s: &mut SiteSignals| s.page_size_bytes = 2_000_001, PENALTY_HEAVY_PAGE),
        ];

        for (toggle, penalty) in cases {
            let mut signals = perfect_signals();
            toggle(&mut signals);
            let (score, issues) = score(&signals);
            assert_eq!(score as i32, 100 - penalty);
            assert_eq!(issues.len(), 1, "issues: {issues:?}");
        }
    }

    #[test]
    fn test_page_size_threshold_is_exclusive() {
        let mut signals = perfect_signals();
        signals.page_size_bytes = 2_000_000;
        assert_eq!(score(&signals).0, 100);
    }

    #[test]
    fn test_everything_wrong_keeps_check_order() {
        let mut signals = perfect_signals();
        signals.https = false;
        signals.title = TextSignal::measure(None, 30, 60);
        signals.meta_description = TextSignal::measure(Some("too short".into()), 150, 160);
        signals.h1.count = 0;
        signals.h1.optimal = false;
        signals.images.without_alt = 3;
        signals.images.optimal = false;
        signals.mobile.mobile_friendly = false;
        signals.performance = PerformanceSignal {
            load_time_seconds: Some(5.5),
            slow: true,
        };
        signals.cms = CmsSignal {
            name: Some(CmsKind::WordPress),
            version: Some("4.9".into()),
            outdated: true,
        };
        signals.copyright = CopyrightSignal {
            year: Some(2012),
            outdated: true,
        };
        signals.page_size_bytes = 3 * 1024 * 1024;

        let (score, issues) = score(&signals);
        // 100 - 85
        assert_eq!(score, 15);
        assert_eq!(
            issues,
            vec![
                "No HTTPS",
                "Missing <title> tag",
                "Meta description not optimal (9 characters, expected 150-160)",
                "H1 count: 0 (expected exactly 1)",
                "Images without alt text: 3",
                "Not mobile friendly",
                "Slow load time: 5.5s",
                "Outdated CMS: WordPress 4.9",
                "Outdated copyright: 2012",
                "Page too heavy: 3072.0 KB",
            ]
        );
    }

    #[test]
    fn test_score_always_within_bounds() {
        let mut signals = perfect_signals();
        for _ in 0..3 {
            signals.https = !signals.https;
            signals.mobile.mobile_friendly = !signals.mobile.mobile_friendly;
            let (score, _) = score(&signals);
            assert!(score <= 100);
        }
    }
}
