//! Content rendering
//!
//! Two passes over a [`Document`]: text substitution into translation
//! targets, and expansion of the structured sections. Both are idempotent
//! and only read the dictionary.

pub mod markup;
pub mod report;
pub mod sections;

pub use markup::Markup;
pub use report::{RenderReport, SkipReason};
pub use sections::{standard_sections, ListSection, RenderedSection, SectionKind, SectionRenderer};

use crate::config::{MissPolicy, SectionsConfig};
use crate::document::Document;
use crate::i18n::Dictionary;
use crate::utils::errors::Result;
use crate::utils::logging;

/// Runs the render passes for one page layout
pub struct Renderer {
    sections: Vec<(Box<dyn SectionRenderer>, String)>,
    miss_policy: MissPolicy,
}

impl Renderer {
    /// Renderer for the standard sections bound to configured containers
    pub fn new(config: &SectionsConfig, miss_policy: MissPolicy) -> Self {
        let sections = standard_sections()
            .into_iter()
            .map(|section| {
                let id = section.kind().container_id(config).to_string();
                (section, id)
            })
            .collect();

        Self { sections, miss_policy }
    }

    pub fn miss_policy(&self) -> MissPolicy {
        self.miss_policy
    }

    /// Replace the text of every target whose key the active bundle has
    pub fn apply_substitutions<D: Document + ?Sized>(
        &self,
        document: &mut D,
        dictionary: &Dictionary,
        language: &str,
    ) -> RenderReport {
        let mut report = RenderReport::new(language);
        let bundle = dictionary.bundle(language);
        report.bundle_missing = bundle.is_none();

        let missed = &mut report.missed_keys;
        report.substituted = document.for_each_target(&mut |key| {
            let text = bundle.and_then(|b| b.text(key)).map(|text| text.into_owned());
            if text.is_none() {
                missed.insert(key.to_string());
            }
            text
        });

        report
    }

    /// Regenerate every section whose sequence and container both exist
    pub fn render_sections<D: Document + ?Sized>(
        &self,
        document: &mut D,
        dictionary: &Dictionary,
        language: &str,
    ) -> RenderReport {
        let mut report = RenderReport::new(language);
        let bundle = dictionary.bundle(language);
        report.bundle_missing = bundle.is_none();

        for (section, container_id) in &self.sections {
            let kind = section.kind();
            if !document.has_container(container_id) {
                report.skipped_sections.push((kind, SkipReason::MissingContainer));
                continue;
            }

            let Some(rendered) = bundle.and_then(|b| section.render(b)) else {
                report.skipped_sections.push((kind, SkipReason::MissingSequence));
                continue;
            };

            document.replace_container(container_id, &rendered.markup);
            report.missed_keys.extend(rendered.missing_labels.iter().map(|l| l.to_string()));
            report.rendered_sections.push(kind);
        }

        report
    }

    /// Both passes, logged, with the miss policy applied
    pub fn render_all<D: Document + ?Sized>(
        &self,
        document: &mut D,
        dictionary: &Dictionary,
        language: &str,
    ) -> Result<RenderReport> {
        let mut report = self.apply_substitutions(document, dictionary, language);
        report.merge(self.render_sections(document, dictionary, language));

        logging::log_render_pass(&report);
        report.enforce(self.miss_policy)?;
        Ok(report)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("sections", &self.sections.iter().map(|(s, id)| (s.kind(), id)).collect::<Vec<_>>())
            .field("miss_policy", &self.miss_policy)
            .finish()
    }
}
