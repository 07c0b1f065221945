//! Render pass outcome

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::MissPolicy;
use crate::utils::errors::{FolioError, Result};
use super::sections::SectionKind;

/// Why a section was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The page has no container for the section; never a miss
    MissingContainer,
    /// The active bundle has no sequence for the section
    MissingSequence,
}

/// What a render pass did and what it could not find
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    pub language: String,
    /// The active language has no bundle at all
    pub bundle_missing: bool,
    /// Targets whose text was replaced
    pub substituted: usize,
    /// Target keys and section labels absent from the bundle
    pub missed_keys: BTreeSet<String>,
    pub rendered_sections: Vec<SectionKind>,
    pub skipped_sections: Vec<(SectionKind, SkipReason)>,
}

impl RenderReport {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// Fold another pass over the same language into this report
    pub fn merge(&mut self, other: RenderReport) {
        self.bundle_missing |= other.bundle_missing;
        self.substituted += other.substituted;
        self.missed_keys.extend(other.missed_keys);
        self.rendered_sections.extend(other.rendered_sections);
        self.skipped_sections.extend(other.skipped_sections);
    }

    /// Every miss, one line each
    ///
    /// Sections whose container is absent from the page are not misses.
    pub fn misses(&self) -> Vec<String> {
        let mut misses = Vec::new();
        if self.bundle_missing {
            misses.push(format!("bundle:{}", self.language));
        }
        misses.extend(self.missed_keys.iter().map(|key| format!("key:{}", key)));
        misses.extend(
            self.skipped_sections
                .iter()
                .filter(|(_, reason)| *reason == SkipReason::MissingSequence)
                .map(|(kind, _)| format!("section:{}", kind)),
        );
        misses
    }

    pub fn is_complete(&self) -> bool {
        self.misses().is_empty()
    }

    /// Apply the miss policy: strict turns any miss into an error
    pub fn enforce(&self, policy: MissPolicy) -> Result<()> {
        match policy {
            MissPolicy::Lenient => Ok(()),
            MissPolicy::Strict => {
                let misses = self.misses();
                if misses.is_empty() {
                    Ok(())
                } else {
                    Err(FolioError::MissingTranslations {
                        language: self.language.clone(),
                        misses,
                    })
                }
            }
        }
    }
}
