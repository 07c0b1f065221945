//! Dictionary data model
//!
//! A dictionary maps language codes to language bundles. Each bundle carries
//! scalar translations plus the ordered sequences behind the structured
//! sections of the site.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::utils::errors::LoadResult;

/// Full set of per-language bundles, immutable once loaded
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Dictionary {
    languages: BTreeMap<String, LanguageBundle>,
}

/// One language's scalar translations and structured content
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LanguageBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<Certification>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiences: Option<Vec<Experience>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_posts: Option<Vec<BlogPost>>,
    /// Every other key: scalar translations and section labels
    #[serde(flatten)]
    pub entries: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Certification {
    pub title: String,
    pub school: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Experience {
    pub position: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Project {
    pub title: String,
    pub tech: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlogPost {
    pub title: String,
    pub date: String,
    pub excerpt: String,
}

impl Dictionary {
    /// Parse a dictionary from its JSON text
    pub fn from_json(content: &str) -> LoadResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build a dictionary from already parsed bundles
    pub fn from_bundles<I, S>(bundles: I) -> Self
    where
        I: IntoIterator<Item = (S, LanguageBundle)>,
        S: Into<String>,
    {
        Self {
            languages: bundles.into_iter().map(|(code, bundle)| (code.into(), bundle)).collect(),
        }
    }

    /// Get the bundle for a language code
    pub fn bundle(&self, lang: &str) -> Option<&LanguageBundle> {
        self.languages.get(lang)
    }

    /// Check whether a language code has a bundle
    pub fn contains(&self, lang: &str) -> bool {
        self.languages.contains_key(lang)
    }

    /// Language codes in sorted order
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Get translation statistics
    pub fn stats(&self) -> TranslationStats {
        let languages = self
            .languages
            .iter()
            .map(|(code, bundle)| LanguageStats {
                code: code.clone(),
                key_count: bundle.entries.len(),
                skills: bundle.technical_skills.as_ref().map(Vec::len),
                certifications: bundle.certifications.as_ref().map(Vec::len),
                experiences: bundle.experiences.as_ref().map(Vec::len),
                projects: bundle.projects.as_ref().map(Vec::len),
                blog_posts: bundle.blog_posts.as_ref().map(Vec::len),
            })
            .collect();

        TranslationStats { languages }
    }
}

impl LanguageBundle {
    /// Look up display text for a scalar key
    ///
    /// Follows the page script's truthiness rule: empty strings, `0`, `false`,
    /// `null` and nested values are all misses.
    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.entries.get(key)? {
            Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(Cow::Owned(display_number(n))),
            Value::Bool(true) => Some(Cow::Borrowed("true")),
            _ => None,
        }
    }

    pub fn technical_skills(&self) -> Option<&[String]> {
        self.technical_skills.as_deref()
    }

    pub fn certifications(&self) -> Option<&[Certification]> {
        self.certifications.as_deref()
    }

    pub fn experiences(&self) -> Option<&[Experience]> {
        self.experiences.as_deref()
    }

    pub fn projects(&self) -> Option<&[Project]> {
        self.projects.as_deref()
    }

    pub fn blog_posts(&self) -> Option<&[BlogPost]> {
        self.blog_posts.as_deref()
    }
}

/// Numbers as the page shows them: `1.0` is `1`, `1e3` is `1000`
fn display_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
    }
}

/// Translation statistics
#[derive(Debug, Clone, Serialize)]
pub struct TranslationStats {
    pub languages: Vec<LanguageStats>,
}

/// Language-specific statistics; `None` marks an absent sequence
#[derive(Debug, Clone, Serialize)]
pub struct LanguageStats {
    pub code: String,
    pub key_count: usize,
    pub skills: Option<usize>,
    pub certifications: Option<usize>,
    pub experiences: Option<usize>,
    pub projects: Option<usize>,
    pub blog_posts: Option<usize>,
}
