//! Document surface consumed by the renderer
//!
//! The renderer never touches markup directly. It talks to a [`Document`],
//! which owns the translation targets, the section containers and the
//! language-selection control of a page.

pub mod html;
pub mod memory;

pub use html::HtmlDocument;
pub use memory::{MemoryDocument, TextTarget};

/// A page whose text and section containers can be rewritten
pub trait Document {
    /// Visit every translation target with its key
    ///
    /// When `resolve` returns `Some(text)` the target's visible text becomes
    /// `text` (plain text, escaped by the document). Otherwise the target is
    /// left as is. Returns how many targets were resolved.
    fn for_each_target(&mut self, resolve: &mut dyn FnMut(&str) -> Option<String>) -> usize;

    /// Whether a section container with this id exists
    fn has_container(&self, id: &str) -> bool;

    /// Replace every child of a container with already-escaped markup
    ///
    /// Returns `false` when the container does not exist.
    fn replace_container(&mut self, id: &str, markup: &str) -> bool;

    /// Show `language` as the selected value of the language control, if any
    fn set_language_control(&mut self, language: &str);
}
