//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for folio-i18n.

use std::path::Path;

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::render::RenderReport;
use crate::utils::errors::{FolioError, LoadError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer when dropped; keep it alive for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| FolioError::Config(format!("Invalid log filter {}: {}", config.level, e)))?;

    let (file_layer, guard) = match &config.file_path {
        Some(path) => {
            let path = Path::new(path);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "folio-i18n.log".into());
            let file_appender = tracing_appender::rolling::daily(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| FolioError::Config(format!("Failed to install logger: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a successful dictionary load
pub fn log_dictionary_loaded(source: &str, languages: usize, language: &str) {
    info!(
        source = source,
        languages = languages,
        active_language = language,
        "Dictionary loaded"
    );
}

/// Log a dictionary load failure; this is the single diagnostic for a failed load
pub fn log_load_failure(source: &str, err: &LoadError) {
    error!(
        source = source,
        error = %err,
        "Error loading translations, page left unrendered"
    );
}

/// Log the outcome of a render pass
pub fn log_render_pass(report: &RenderReport) {
    if report.bundle_missing {
        warn!(language = %report.language, "No bundle for active language");
    }

    for key in &report.missed_keys {
        debug!(language = %report.language, key = %key, "Translation key missing");
    }

    debug!(
        language = %report.language,
        substituted = report.substituted,
        missed = report.missed_keys.len(),
        sections_rendered = report.rendered_sections.len(),
        sections_skipped = report.skipped_sections.len(),
        "Render pass completed"
    );
}

/// Log a language switch request
pub fn log_language_switch(from: &str, requested: &str, known: bool) {
    if known {
        info!(from = from, to = requested, "Language switched");
    } else {
        warn!(from = from, requested = requested, "Requested language is missing from the dictionary");
    }
}
