//! Internationalization module
//!
//! This module handles the translation dictionary for the site: its data
//! model, loading it from a file or URL, and picking the starting language.

pub mod dictionary;
pub mod loader;

// Re-export commonly used i18n components
pub use dictionary::{
    BlogPost, Certification, Dictionary, Experience, LanguageBundle, LanguageStats, Project,
    TranslationStats,
};
pub use loader::{resolve_initial_language, DictionaryLoader, DictionarySource};
