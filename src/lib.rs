//! folio-i18n
//!
//! Translation dictionary loader and content renderer for a static personal
//! site. A dictionary of per-language bundles drives text substitution into
//! marked elements and the generation of five structured sections: skills,
//! certifications, experiences, projects and blog posts.

pub mod config;
pub mod document;
pub mod i18n;
pub mod render;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{FolioError, LoadError, Result};

// Re-export main components for easy access
pub use document::{Document, HtmlDocument, MemoryDocument};
pub use i18n::{Dictionary, DictionaryLoader, DictionarySource, LanguageBundle};
pub use render::{RenderReport, Renderer};
pub use state::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Site, SiteOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
