//! Full page rendering tests against static HTML

mod helpers;

use std::sync::Arc;

use folio_i18n::{
    render::{SectionKind, SkipReason},
    Dictionary, Document, MemoryPreferenceStore, Site, SiteOptions,
};

use helpers::*;

fn start(language: &str) -> (Site<MemoryPreferenceStore>, folio_i18n::HtmlDocument, folio_i18n::RenderReport) {
    init_test_env();
    let dictionary = Arc::new(Dictionary::from_json(SITE_DICTIONARY).unwrap());
    let mut doc = site_page();
    let (site, report) = Site::start(
        dictionary,
        MemoryPreferenceStore::with_language(language),
        SiteOptions::default(),
        &mut doc,
    )
    .unwrap();
    (site, doc, report)
}

#[test]
fn test_english_page() {
    let (_, doc, report) = start("en");

    assert_eq!(report.language, "en");
    assert_eq!(report.substituted, 2);
    assert!(report.missed_keys.contains("untranslated"));
    assert_eq!(report.rendered_sections, SectionKind::ALL.to_vec());

    let html = doc.as_str();
    assert!(html.contains(r##"<a href="#home" data-i18n="nav_home">Home</a>"##));
    assert!(html.contains(r#"<h1 data-i18n="hero_title">Software engineer</h1>"#));
    assert!(html.contains(r#"<p data-i18n="untranslated">Keep me</p>"#));
    assert!(html.contains(r#"<option value="en" selected>English</option>"#));

    assert_eq!(
        doc.element_content("technical-skills-list"),
        Some("<li>Rust</li><li>TypeScript</li><li>PostgreSQL</li>")
    );

    let certs = doc.element_content("certifications-list").unwrap();
    assert!(!certs.contains("Loading"));
    assert_eq!(certs.matches(r#"<p class="cert-period">"#).count(), 1);
    assert!(certs.find("BSc Computer Science").unwrap() < certs.find("Cloud Practitioner").unwrap());

    assert!(doc
        .element_content("experiences-list")
        .unwrap()
        .contains(r#"<p>APIs &amp; pipelines</p>"#));
    assert!(doc
        .element_content("projects-grid")
        .unwrap()
        .contains(r#"<p class="project-tech"><span>Technologies:</span> Rust</p>"#));

    let blog = doc.element_content("blog-posts").unwrap();
    assert!(blog.contains("<h3>Hello &lt;world&gt;</h3>"));
    assert!(blog.contains(r#"<p class="blog-date"><span>Published:</span> 2024-03-01</p>"#));
}

#[test]
fn test_french_page_keeps_sections_it_lacks() {
    let (mut site, mut doc, _) = start("en");
    let english_certs = doc.element_content("certifications-list").unwrap().to_string();
    let english_blog = doc.element_content("blog-posts").unwrap().to_string();

    let report = site.switch_language("fr", &mut doc).unwrap();

    assert!(doc.as_str().contains(r#"<h1 data-i18n="hero_title">Ingénieur logiciel</h1>"#));
    assert!(doc.as_str().contains(r#"<option value="fr" selected>Français</option>"#));
    assert!(doc.as_str().contains(r#"<option value="en">English</option>"#));
    assert!(doc
        .element_content("experiences-list")
        .unwrap()
        .contains("<p class=\"exp-period\">2020 - aujourd&#39;hui</p>"));

    // fr has no certifications or blog posts: previous content stands
    assert_eq!(doc.element_content("certifications-list"), Some(english_certs.as_str()));
    assert_eq!(doc.element_content("blog-posts"), Some(english_blog.as_str()));
    assert!(report.skipped_sections.contains(&(SectionKind::Certifications, SkipReason::MissingSequence)));
    assert!(report.skipped_sections.contains(&(SectionKind::BlogPosts, SkipReason::MissingSequence)));
}

#[test]
fn test_rendering_twice_is_stable() {
    let (site, mut doc, _) = start("fr");
    let once = doc.as_str().to_string();

    site.render(&mut doc).unwrap();
    assert_eq!(doc.as_str(), once);
}

#[test]
fn test_page_without_sections() {
    init_test_env();
    let dictionary = Arc::new(Dictionary::from_json(SITE_DICTIONARY).unwrap());
    let mut doc = folio_i18n::HtmlDocument::new(
        r#"<h1 data-i18n="hero_title">x</h1>"#,
        &folio_i18n::Settings::default().page,
    );

    let (_, report) = Site::start(dictionary, MemoryPreferenceStore::new(), SiteOptions::default(), &mut doc).unwrap();

    assert_eq!(doc.as_str(), r#"<h1 data-i18n="hero_title">Software engineer</h1>"#);
    assert!(report.rendered_sections.is_empty());
    assert!(report.is_complete());
    assert!(!doc.has_container("projects-grid"));
}
