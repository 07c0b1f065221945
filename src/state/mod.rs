//! State management module
//!
//! This module handles the active language and its persisted preference

pub mod preference;
pub mod site;

// Re-export commonly used state components
pub use preference::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use site::{Site, SiteOptions};
