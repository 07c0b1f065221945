//! Dictionary loader
//!
//! Fetches the translation dictionary from a file or an http(s) URL, parses
//! it, and resolves which language a session starts in.

use std::fmt;
use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, info};
use url::Url;

use crate::config::{DictionaryConfig, UnknownLanguagePolicy};
use crate::utils::errors::{LoadError, LoadResult};
use crate::utils::logging;
use super::dictionary::Dictionary;

/// Where the dictionary comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    File(PathBuf),
    Remote(Url),
}

impl DictionarySource {
    /// Classify a configured source string
    ///
    /// Anything that does not parse as an absolute URL is a filesystem path.
    /// Single-letter schemes are Windows drive letters.
    pub fn parse(source: &str) -> LoadResult<Self> {
        let source = source.trim();
        if source.is_empty() {
            return Err(LoadError::InvalidSource("empty source".to_string()));
        }

        match Url::parse(source) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(DictionarySource::Remote(url)),
                "file" => url
                    .to_file_path()
                    .map(DictionarySource::File)
                    .map_err(|_| LoadError::InvalidSource(source.to_string())),
                scheme if scheme.len() == 1 => Ok(DictionarySource::File(PathBuf::from(source))),
                _ => Err(LoadError::InvalidSource(source.to_string())),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(DictionarySource::File(PathBuf::from(source)))
            }
            Err(e) => Err(LoadError::InvalidSource(format!("{}: {}", source, e))),
        }
    }
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionarySource::File(path) => write!(f, "{}", path.display()),
            DictionarySource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Fetches and parses the dictionary resource
#[derive(Debug, Clone)]
pub struct DictionaryLoader {
    source: DictionarySource,
    client: reqwest::Client,
}

impl DictionaryLoader {
    /// Create a loader for a source
    pub fn new(source: DictionarySource) -> Self {
        Self {
            source,
            client: reqwest::Client::new(),
        }
    }

    /// Create a loader from configuration
    pub fn from_config(config: &DictionaryConfig) -> LoadResult<Self> {
        Ok(Self::new(DictionarySource::parse(&config.source)?))
    }

    pub fn source(&self) -> &DictionarySource {
        &self.source
    }

    /// Retrieve the raw dictionary text
    ///
    /// No retries and no timeout: a failure here is terminal for the session.
    pub async fn fetch(&self) -> LoadResult<String> {
        match &self.source {
            DictionarySource::File(path) => {
                fs::read_to_string(path).await.map_err(|source| LoadError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
            DictionarySource::Remote(url) => {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.text().await?)
            }
        }
    }

    /// Fetch and parse the dictionary
    ///
    /// A failure is logged here, once; callers only propagate it.
    pub async fn load(&self) -> LoadResult<Dictionary> {
        let result = self.fetch_and_parse().await;
        if let Err(e) = &result {
            logging::log_load_failure(&self.source.to_string(), e);
        }
        result
    }

    async fn fetch_and_parse(&self) -> LoadResult<Dictionary> {
        let content = self.fetch().await?;
        debug!(source = %self.source, bytes = content.len(), "Dictionary fetched");

        let dictionary = Dictionary::from_json(&content)?;
        info!(source = %self.source, languages = dictionary.len(), "Parsed translation dictionary");
        Ok(dictionary)
    }
}

/// Pick the language a session starts in
///
/// A stored, non-blank preference wins; otherwise the default is used. A
/// stored code missing from the dictionary is kept only under
/// [`UnknownLanguagePolicy::Cascade`].
pub fn resolve_initial_language(
    stored: Option<&str>,
    dictionary: &Dictionary,
    default_language: &str,
    policy: UnknownLanguagePolicy,
) -> String {
    match stored.map(str::trim).filter(|code| !code.is_empty()) {
        Some(code) if dictionary.contains(code) => code.to_string(),
        Some(code) => match policy {
            UnknownLanguagePolicy::Cascade => code.to_string(),
            UnknownLanguagePolicy::Fallback | UnknownLanguagePolicy::Reject => {
                debug!(stored = code, default = default_language, "Stored language unknown, using default");
                default_language.to_string()
            }
        },
        None => default_language.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sample_dictionary() -> Dictionary {
        Dictionary::from_json(r#"{"en": {"greeting": "Hi"}, "fr": {"greeting": "Salut"}}"#).unwrap()
    }

    #[test]
    fn test_source_classification() {
        assert_eq!(
            DictionarySource::parse("./translations.json").unwrap(),
            DictionarySource::File(PathBuf::from("./translations.json"))
        );
        assert_matches!(
            DictionarySource::parse("https://example.org/translations.json"),
            Ok(DictionarySource::Remote(url)) if url.host_str() == Some("example.org")
        );
        assert_matches!(DictionarySource::parse("ftp://example.org/t.json"), Err(LoadError::InvalidSource(_)));
        assert_matches!(DictionarySource::parse("  "), Err(LoadError::InvalidSource(_)));
    }

    #[test]
    fn test_initial_language_resolution() {
        let dict = sample_dictionary();
        let cascade = UnknownLanguagePolicy::Cascade;

        assert_eq!(resolve_initial_language(None, &dict, "en", cascade), "en");
        assert_eq!(resolve_initial_language(Some(""), &dict, "en", cascade), "en");
        assert_eq!(resolve_initial_language(Some("fr"), &dict, "en", cascade), "fr");
        assert_eq!(resolve_initial_language(Some("de"), &dict, "en", cascade), "de");
        assert_eq!(resolve_initial_language(Some("de"), &dict, "en", UnknownLanguagePolicy::Fallback), "en");
        assert_eq!(resolve_initial_language(Some("de"), &dict, "en", UnknownLanguagePolicy::Reject), "en");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let loader = DictionaryLoader::new(DictionarySource::File(PathBuf::from("/nonexistent/translations.json")));
        assert_matches!(loader.load().await, Err(LoadError::Read { .. }));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.json");
        std::fs::write(&path, r#"{"en": {"greeting": "Hi"}}"#).unwrap();

        let loader = DictionaryLoader::new(DictionarySource::File(path));
        let dict = loader.load().await.unwrap();
        assert!(dict.contains("en"));
    }
}
