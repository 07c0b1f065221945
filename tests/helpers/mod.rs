//! Test helpers module
//!
//! Fixtures and a temporary site context shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Once;

use folio_i18n::{DictionaryLoader, DictionarySource, FilePreferenceStore, HtmlDocument, MemoryDocument, Settings};

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// The end-to-end dictionary: two languages, one scalar key, one shared list
pub const GREETING_DICTIONARY: &str = r#"{
    "en": {"greeting": "Hi", "technical_skills": ["Go", "Rust"]},
    "fr": {"greeting": "Salut", "technical_skills": ["Go", "Rust"]}
}"#;

/// A fuller dictionary covering every section
pub const SITE_DICTIONARY: &str = r#"{
    "en": {
        "nav_home": "Home",
        "hero_title": "Software engineer",
        "project_tech_label": "Technologies:",
        "blog_published": "Published:",
        "technical_skills": ["Rust", "TypeScript", "PostgreSQL"],
        "certifications": [
            {"title": "BSc Computer Science", "school": "Open University", "period": "2016 - 2019", "description": "Systems track"},
            {"title": "Cloud Practitioner", "school": "AWS", "description": "Foundations"}
        ],
        "experiences": [
            {"position": "Backend Engineer", "company": "Acme", "period": "2020 - now", "description": "APIs & pipelines"}
        ],
        "projects": [
            {"title": "Folio", "tech": "Rust", "description": "This site"}
        ],
        "blog_posts": [
            {"title": "Hello <world>", "date": "2024-03-01", "excerpt": "First post"}
        ]
    },
    "fr": {
        "nav_home": "Accueil",
        "hero_title": "Ingénieur logiciel",
        "project_tech_label": "Technologies :",
        "blog_published": "Publié :",
        "technical_skills": ["Rust", "TypeScript", "PostgreSQL"],
        "experiences": [
            {"position": "Ingénieur backend", "company": "Acme", "period": "2020 - aujourd'hui", "description": "API et pipelines"}
        ],
        "projects": [
            {"title": "Folio", "tech": "Rust", "description": "Ce site"}
        ]
    }
}"#;

/// Page shaped like the personal site
pub const SITE_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Portfolio</title></head>
<body>
  <nav>
    <a href="#home" data-i18n="nav_home">Home</a>
    <select id="languageSelect">
      <option value="en">English</option>
      <option value="fr">Français</option>
    </select>
  </nav>
  <h1 data-i18n="hero_title">Engineer</h1>
  <p data-i18n="untranslated">Keep me</p>
  <ul id="technical-skills-list"></ul>
  <ul id="certifications-list"><li>Loading…</li></ul>
  <div id="experiences-list"></div>
  <div id="projects-grid"></div>
  <section id="blog-posts"></section>
</body>
</html>
"##;

/// Memory page for the end-to-end greeting scenario
pub fn greeting_document() -> MemoryDocument {
    MemoryDocument::new()
        .with_target("greeting", "Hello")
        .with_container("technical-skills-list", "")
        .with_language_control("")
}

pub fn site_page() -> HtmlDocument {
    HtmlDocument::new(SITE_PAGE, &Settings::default().page)
}

/// Temporary directory with a dictionary file and a preference path
pub struct TestContext {
    pub temp_dir: tempfile::TempDir,
    pub dictionary_path: PathBuf,
}

impl TestContext {
    /// Create a context with the given dictionary contents
    pub fn new(dictionary: &str) -> Self {
        init_test_env();

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let dictionary_path = temp_dir.path().join("translations.json");
        std::fs::write(&dictionary_path, dictionary).expect("Failed to write dictionary");

        Self { temp_dir, dictionary_path }
    }

    pub fn loader(&self) -> DictionaryLoader {
        DictionaryLoader::new(DictionarySource::File(self.dictionary_path.clone()))
    }

    pub fn preference_path(&self) -> PathBuf {
        self.temp_dir.path().join("state").join("preference.json")
    }

    pub fn preference_store(&self) -> FilePreferenceStore {
        FilePreferenceStore::new(self.preference_path())
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}
