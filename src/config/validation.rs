//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use std::collections::HashSet;

use tracing_subscriber::EnvFilter;

use crate::utils::errors::{FolioError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_dictionary_config(&settings.dictionary)?;
    validate_page_config(&settings.page)?;
    validate_sections_config(&settings.sections)?;
    validate_preference_config(&settings.preference)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate dictionary configuration
fn validate_dictionary_config(config: &super::DictionaryConfig) -> Result<()> {
    if config.source.trim().is_empty() {
        return Err(FolioError::Config(
            "Dictionary source is required".to_string()
        ));
    }

    if config.default_language.trim().is_empty() {
        return Err(FolioError::Config(
            "Default language is required".to_string()
        ));
    }

    Ok(())
}

/// Validate page markup configuration
fn validate_page_config(config: &super::PageConfig) -> Result<()> {
    if config.translation_attribute.is_empty() {
        return Err(FolioError::Config(
            "Translation attribute is required".to_string()
        ));
    }

    if config.translation_attribute.chars().any(|c| c.is_whitespace() || c == '=' || c == '"') {
        return Err(FolioError::Config(
            format!("Invalid translation attribute: {}", config.translation_attribute)
        ));
    }

    Ok(())
}

/// Validate section container ids
fn validate_sections_config(config: &super::SectionsConfig) -> Result<()> {
    let ids = [
        &config.skills,
        &config.certifications,
        &config.experiences,
        &config.projects,
        &config.blog_posts,
    ];

    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(FolioError::Config(
                "Section container ids must not be empty".to_string()
            ));
        }
        if !seen.insert(id.as_str()) {
            return Err(FolioError::Config(
                format!("Duplicate section container id: {}", id)
            ));
        }
    }

    Ok(())
}

/// Validate preference configuration
fn validate_preference_config(config: &super::PreferenceConfig) -> Result<()> {
    if config.path.is_empty() {
        return Err(FolioError::Config(
            "Preference path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(FolioError::Config(
            "Log level is required".to_string()
        ));
    }

    // parsed exactly as `init_logging` parses it
    if let Err(e) = EnvFilter::try_new(&config.level) {
        return Err(FolioError::Config(
            format!("Invalid log filter {}: {}", config.level, e)
        ));
    }

    Ok(())
}
