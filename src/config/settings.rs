//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub dictionary: DictionaryConfig,
    pub page: PageConfig,
    pub sections: SectionsConfig,
    pub render: RenderConfig,
    pub preference: PreferenceConfig,
    pub logging: LoggingConfig,
}

/// Dictionary resource configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DictionaryConfig {
    /// Path or http(s) URL of the translation dictionary
    pub source: String,
    pub default_language: String,
}

/// Markup conventions of the page being localized
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageConfig {
    pub translation_attribute: String,
    pub language_control_id: String,
}

/// Container element ids, one per structured section
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectionsConfig {
    pub skills: String,
    pub certifications: String,
    pub experiences: String,
    pub projects: String,
    pub blog_posts: String,
}

/// What to do when a lookup misses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissPolicy {
    /// Leave original content in place and move on
    #[default]
    Lenient,
    /// Finish the pass, then fail with the collected misses
    Strict,
}

/// What a switch to a language absent from the dictionary does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownLanguagePolicy {
    /// Accept the code; every lookup misses
    #[default]
    Cascade,
    /// Use the default language instead
    Fallback,
    /// Refuse the switch and keep the current language
    Reject,
}

/// Render pass configuration
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct RenderConfig {
    pub miss_policy: MissPolicy,
    pub unknown_language: UnknownLanguagePolicy,
}

/// Persisted language preference configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PreferenceConfig {
    pub path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from `folio.toml` and `FOLIO__*` environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("folio", false)
    }

    /// Load settings from a specific configuration file
    pub fn from_file(name: &str, required: bool) -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();

        let settings = config::Config::builder()
            .set_default("dictionary.source", defaults.dictionary.source)?
            .set_default("dictionary.default_language", defaults.dictionary.default_language)?
            .set_default("page.translation_attribute", defaults.page.translation_attribute)?
            .set_default("page.language_control_id", defaults.page.language_control_id)?
            .set_default("sections.skills", defaults.sections.skills)?
            .set_default("sections.certifications", defaults.sections.certifications)?
            .set_default("sections.experiences", defaults.sections.experiences)?
            .set_default("sections.projects", defaults.sections.projects)?
            .set_default("sections.blog_posts", defaults.sections.blog_posts)?
            .set_default("render.miss_policy", "lenient")?
            .set_default("render.unknown_language", "cascade")?
            .set_default("preference.path", defaults.preference.path)?
            .set_default("logging.level", defaults.logging.level)?
            .add_source(config::File::with_name(name).required(required))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::FolioError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dictionary: DictionaryConfig {
                source: "./translations.json".to_string(),
                default_language: "en".to_string(),
            },
            page: PageConfig {
                translation_attribute: "data-i18n".to_string(),
                language_control_id: "languageSelect".to_string(),
            },
            sections: SectionsConfig {
                skills: "technical-skills-list".to_string(),
                certifications: "certifications-list".to_string(),
                experiences: "experiences-list".to_string(),
                projects: "projects-grid".to_string(),
                blog_posts: "blog-posts".to_string(),
            },
            render: RenderConfig::default(),
            preference: PreferenceConfig {
                path: ".folio/preference.json".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}
