// Parse module tests.

use super::*;
use scraper::Html;
use std::cmp::Ordering;

#[test]
fn test_extract_title_basic() {
    let html = r#"<html><head><title>Test Page</title></head><body></body></html>"#;
    let document = Html::parse_document(html);
    assert_eq!(extract_title(&document).as_deref(), Some("Test Page"));
}

#[test]
fn test_extract_title_with_whitespace() {
    let html = r#"<html><head><title>
        Test Page
    </title></head></html>"#;
    let document = Html::parse_document(html);
    assert_eq!(extract_title(&document).as_deref(), Some("Test Page"));
}

#[test]
fn test_extract_title_with_html_entities() {
    let html = r#"<html><head><title>Fish &amp; Chips</title></head></html>"#;
    let document = Html::parse_document(html);
    assert_eq!(extract_title(&document).as_deref(), Some("Fish & Chips"));
}

#[test]
fn test_extract_title_missing_or_blank() {
    let document = Html::parse_document("<html><head></head><body></body></html>");
    assert_eq!(extract_title(&document), None);
    let document = Html::parse_document("<html><head><title>   </title></head></html>");
    assert_eq!(extract_title(&document), None);
}

#[test]
fn test_extract_meta_description() {
    let html = r#"<html><head><meta name="description" content="  A page about things. "></head></html>"#;
    let document = Html::parse_document(html);
    assert_eq!(
        extract_meta_description(&document).as_deref(),
        Some("A page about things.")
    );
}

#[test]
fn test_extract_meta_description_empty_content_is_missing() {
    let html = r#"<html><head><meta name="description" content=""></head></html>"#;
    let document = Html::parse_document(html);
    assert_eq!(extract_meta_description(&document), None);
}

#[test]
fn test_extract_h1() {
    let html = "<body><h1> First </h1><div><h1>Second</h1></div><h2>Not me</h2></body>";
    let document = Html::parse_document(html);
    assert_eq!(extract_h1(&document), vec!["First", "Second"]);
}

#[test]
fn test_count_images_missing_and_empty_alt() {
    let html = r#"<body>
        <img src="a.png" alt="Logo">
        <img src="b.png">
        <img src="c.png" alt="">
    </body>"#;
    let document = Html::parse_document(html);
    assert_eq!(
        count_images(&document),
        ImageCounts {
            total: 3,
            without_alt: 2
        }
    );
}

#[test]
fn test_count_links_internal_external() {
    let html = r##"<body>
        <a href="/about">About</a>
        <a href="#top">Top</a>
        <a href="https://example.com/contact">Contact</a>
        <a href="//cdn.other.net/x">CDN</a>
        <a href="https://partner.org">Partner</a>
        <a>No href</a>
    </body>"##;
    let document = Html::parse_document(html);
    assert_eq!(
        count_links(&document, "example.com"),
        LinkCounts {
            total: 5,
            internal: 3,
            external: 2
        }
    );
}

#[test]
fn test_detect_cms_from_generator_with_version() {
    let html = r#"<head><meta name="generator" content="WordPress 4.9.8"></head>"#;
    let document = Html::parse_document(html);
    let cms = detect_cms(&document).expect("WordPress should be detected");
    assert_eq!(cms.kind, CmsKind::WordPress);
    assert_eq!(cms.version.as_deref(), Some("4.9.8"));
    assert!(cms.is_outdated());
}

#[test]
fn test_detect_cms_current_version_not_outdated() {
    let html = r#"<head><meta name="generator" content="Drupal 10.1 (https://www.drupal.org)"></head>"#;
    let document = Html::parse_document(html);
    let cms = detect_cms(&document).expect("Drupal should be detected");
    assert_eq!(cms.kind, CmsKind::Drupal);
    assert_eq!(cms.version.as_deref(), Some("10.1"));
    assert!(!cms.is_outdated());
}

#[test]
fn test_detect_cms_generator_without_version_never_outdated() {
    let html = r#"<head><meta name="generator" content="Joomla! - Open Source Content Management"></head>"#;
    let document = Html::parse_document(html);
    let cms = detect_cms(&document).expect("Joomla should be detected");
    assert_eq!(cms.kind, CmsKind::Joomla);
    assert_eq!(cms.version, None);
    assert!(!cms.is_outdated());
}

#[test]
fn test_detect_cms_body_markers() {
    let document = Html::parse_document(r#"<body class="home wp-admin"></body>"#);
    assert_eq!(detect_cms(&document).map(|c| c.kind), Some(CmsKind::WordPress));

    let document = Html::parse_document(r#"<body><div id="wpadminbar"></div></body>"#);
    assert_eq!(detect_cms(&document).map(|c| c.kind), Some(CmsKind::WordPress));

    let document = Html::parse_document(r#"<body class="page drupal-front"></body>"#);
    assert_eq!(detect_cms(&document).map(|c| c.kind), Some(CmsKind::Drupal));
}

#[test]
fn test_detect_cms_unknown() {
    let html = r#"<head><meta name="generator" content="Hugo 0.120"></head><body class="home"></body>"#;
    let document = Html::parse_document(html);
    assert_eq!(detect_cms(&document), None);
}

#[test]
fn test_compare_versions() {
    assert_eq!(compare_versions("4.9.8", "5.0"), Ordering::Less);
    assert_eq!(compare_versions("5.0", "5.0.0"), Ordering::Equal);
    assert_eq!(compare_versions("10.1", "8.0"), Ordering::Greater);
    assert_eq!(compare_versions("3.10", "3.9"), Ordering::Greater);
}

#[test]
fn test_copyright_year_in_footer_element() {
    let html = "<body><p>© 1999 not the footer</p><footer>Copyright © 2019 Acme</footer></body>";
    let document = Html::parse_document(html);
    assert_eq!(extract_copyright_year(&document), Some(2019));
}

#[test]
fn test_copyright_year_in_footer_class_or_id() {
    let html = r#"<body><div class="Site-Footer">All rights reserved 2021 ©</div></body>"#;
    let document = Html::parse_document(html);
    assert_eq!(extract_copyright_year(&document), Some(2021));

    let html = r#"<body><section id="pageFooter">copyright 2015-2023 Acme</section></body>"#;
    let document = Html::parse_document(html);
    assert_eq!(extract_copyright_year(&document), Some(2015));
}

#[test]
fn test_copyright_year_absent() {
    let document = Html::parse_document("<body><p>© 2010</p></body>");
    assert_eq!(extract_copyright_year(&document), None);

    let document = Html::parse_document("<body><footer>Contact us</footer></body>");
    assert_eq!(extract_copyright_year(&document), None);
}

#[test]
fn test_is_copyright_outdated() {
    assert!(is_copyright_outdated(2020, 2026, 2));
    assert!(!is_copyright_outdated(2024, 2026, 2));
    assert!(!is_copyright_outdated(2026, 2026, 2));
}
