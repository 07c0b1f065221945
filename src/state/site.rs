//! Site context
//!
//! Owns the loaded dictionary, the active language and the preference
//! store. The page itself is passed to each operation.

use std::sync::Arc;

use tracing::warn;

use crate::config::{MissPolicy, SectionsConfig, Settings, UnknownLanguagePolicy};
use crate::document::Document;
use crate::i18n::{resolve_initial_language, Dictionary, DictionaryLoader};
use crate::render::{RenderReport, Renderer};
use crate::utils::errors::{FolioError, Result};
use crate::utils::helpers::non_blank;
use crate::utils::logging;
use super::preference::PreferenceStore;

/// Behavior knobs for a site session
#[derive(Debug, Clone)]
pub struct SiteOptions {
    pub default_language: String,
    pub miss_policy: MissPolicy,
    pub unknown_language: UnknownLanguagePolicy,
    pub sections: SectionsConfig,
}

impl SiteOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            default_language: settings.dictionary.default_language.clone(),
            miss_policy: settings.render.miss_policy,
            unknown_language: settings.render.unknown_language,
            sections: settings.sections.clone(),
        }
    }
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// A loaded site session
///
/// All mutation goes through `&mut self`; share across threads behind a lock.
#[derive(Debug)]
pub struct Site<P: PreferenceStore> {
    dictionary: Arc<Dictionary>,
    language: String,
    preferences: P,
    renderer: Renderer,
    options: SiteOptions,
}

impl<P: PreferenceStore> Site<P> {
    /// Fetch the dictionary and start a session on `document`
    ///
    /// A failed load leaves the document untouched.
    pub async fn load<D: Document + ?Sized>(
        loader: &DictionaryLoader,
        preferences: P,
        options: SiteOptions,
        document: &mut D,
    ) -> Result<(Self, RenderReport)> {
        let dictionary = loader.load().await?;

        let (site, report) = Self::start(Arc::new(dictionary), preferences, options, document)?;
        logging::log_dictionary_loaded(&loader.source().to_string(), site.dictionary.len(), &site.language);
        Ok((site, report))
    }

    /// Start a session from an already loaded dictionary
    ///
    /// Resolves the initial language, reflects it in the language control
    /// and runs the full render.
    pub fn start<D: Document + ?Sized>(
        dictionary: Arc<Dictionary>,
        preferences: P,
        options: SiteOptions,
        document: &mut D,
    ) -> Result<(Self, RenderReport)> {
        let stored = match preferences.load() {
            Ok(stored) => non_blank(stored),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable language preference");
                None
            }
        };

        let language = resolve_initial_language(
            stored.as_deref(),
            &dictionary,
            &options.default_language,
            options.unknown_language,
        );
        document.set_language_control(&language);

        let site = Self {
            dictionary,
            language,
            preferences,
            renderer: Renderer::new(&options.sections, options.miss_policy),
            options,
        };
        let report = site.render(document)?;
        Ok((site, report))
    }

    /// Run both render passes for the active language
    pub fn render<D: Document + ?Sized>(&self, document: &mut D) -> Result<RenderReport> {
        self.renderer.render_all(document, &self.dictionary, &self.language)
    }

    /// Text substitution pass only
    pub fn apply_substitutions<D: Document + ?Sized>(&self, document: &mut D) -> RenderReport {
        self.renderer.apply_substitutions(document, &self.dictionary, &self.language)
    }

    /// Structured section pass only
    pub fn render_sections<D: Document + ?Sized>(&self, document: &mut D) -> RenderReport {
        self.renderer.render_sections(document, &self.dictionary, &self.language)
    }

    /// Handle a language picked in the language control
    ///
    /// Sets, persists and re-renders without re-fetching the dictionary. A
    /// code absent from the dictionary is handled per the unknown-language
    /// policy. A failure to persist is returned after the page is rendered.
    pub fn switch_language<D: Document + ?Sized>(
        &mut self,
        code: &str,
        document: &mut D,
    ) -> Result<RenderReport> {
        let code = code.trim();
        if code.is_empty() {
            return Err(FolioError::InvalidInput("empty language code".to_string()));
        }

        let known = self.dictionary.contains(code);
        let target = if known {
            code.to_string()
        } else {
            match self.options.unknown_language {
                UnknownLanguagePolicy::Cascade => code.to_string(),
                UnknownLanguagePolicy::Fallback => self.options.default_language.clone(),
                UnknownLanguagePolicy::Reject => {
                    warn!(code = code, current = %self.language, "Rejected switch to unknown language");
                    return Err(FolioError::UnknownLanguage { code: code.to_string() });
                }
            }
        };

        logging::log_language_switch(&self.language, code, known);
        self.language = target;
        document.set_language_control(&self.language);

        let persisted = self.preferences.save(&self.language);
        if let Err(e) = &persisted {
            warn!(language = %self.language, error = %e, "Failed to persist language preference");
        }

        let report = self.render(document);
        persisted?;
        report
    }

    /// The active language
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    pub fn options(&self) -> &SiteOptions {
        &self.options
    }
}
