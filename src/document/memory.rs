//! In-memory document model

use std::collections::BTreeMap;

use super::Document;

/// An element bound to a translation key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTarget {
    pub key: String,
    pub text: String,
}

/// Document held entirely in memory
///
/// Targets keep their insertion order; containers hold raw markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    targets: Vec<TextTarget>,
    containers: BTreeMap<String, String>,
    language_control: Option<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation target with its original text
    pub fn with_target(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.targets.push(TextTarget { key: key.into(), text: text.into() });
        self
    }

    /// Add a section container with its original content
    pub fn with_container(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.containers.insert(id.into(), content.into());
        self
    }

    /// Give the page a language-selection control
    pub fn with_language_control(mut self, value: impl Into<String>) -> Self {
        self.language_control = Some(value.into());
        self
    }

    pub fn targets(&self) -> &[TextTarget] {
        &self.targets
    }

    /// Text of every target bound to `key`, in document order
    pub fn texts_for(&self, key: &str) -> Vec<&str> {
        self.targets
            .iter()
            .filter(|t| t.key == key)
            .map(|t| t.text.as_str())
            .collect()
    }

    pub fn container(&self, id: &str) -> Option<&str> {
        self.containers.get(id).map(String::as_str)
    }

    pub fn language_control(&self) -> Option<&str> {
        self.language_control.as_deref()
    }
}

impl Document for MemoryDocument {
    fn for_each_target(&mut self, resolve: &mut dyn FnMut(&str) -> Option<String>) -> usize {
        let mut resolved = 0;
        for target in &mut self.targets {
            if let Some(text) = resolve(&target.key) {
                target.text = text;
                resolved += 1;
            }
        }
        resolved
    }

    fn has_container(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    fn replace_container(&mut self, id: &str, markup: &str) -> bool {
        match self.containers.get_mut(id) {
            Some(content) => {
                content.clear();
                content.push_str(markup);
                true
            }
            None => false,
        }
    }

    fn set_language_control(&mut self, language: &str) {
        if let Some(value) = &mut self.language_control {
            value.clear();
            value.push_str(language);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_resolved_targets_change() {
        let mut doc = MemoryDocument::new()
            .with_target("greeting", "Hello")
            .with_target("farewell", "Bye");

        let resolved = doc.for_each_target(&mut |key| (key == "greeting").then(|| "Salut".to_string()));

        assert_eq!(resolved, 1);
        assert_eq!(doc.texts_for("greeting"), vec!["Salut"]);
        assert_eq!(doc.texts_for("farewell"), vec!["Bye"]);
    }

    #[test]
    fn test_missing_container_and_control() {
        let mut doc = MemoryDocument::new().with_container("blog-posts", "<p>old</p>");

        assert!(!doc.replace_container("projects-grid", "<div></div>"));
        assert!(doc.replace_container("blog-posts", "<article></article>"));
        assert_eq!(doc.container("blog-posts"), Some("<article></article>"));

        doc.set_language_control("fr");
        assert_eq!(doc.language_control(), None);
    }
}
