//! folio-i18n
//!
//! Command-line entry point: localizes a static page offline with the same
//! passes the site runs in the browser.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use folio_i18n::{
    config::{MissPolicy, Settings},
    document::{HtmlDocument, MemoryDocument},
    i18n::{resolve_initial_language, Dictionary, DictionaryLoader},
    render::{Renderer, SectionKind},
    state::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Site, SiteOptions},
    utils::{helpers::non_blank, logging},
    FolioError, LoadError,
};

#[derive(Parser)]
#[command(name = "folio-i18n")]
#[command(version)]
#[command(about = "Render a static site page from a translation dictionary")]
struct Cli {
    /// Configuration file (defaults to ./folio.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page in the stored (or given) language
    Render {
        /// Page to localize
        #[arg(short, long)]
        page: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Render in this language without touching the stored preference
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Switch language: store the preference and re-render the page
    Switch {
        /// Language code to switch to
        #[arg(value_name = "CODE")]
        code: String,

        #[arg(short, long)]
        page: PathBuf,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Report missing translations for every language
    Check {
        /// Check against this page instead of every key in the dictionary
        #[arg(short, long)]
        page: Option<PathBuf>,

        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print dictionary statistics
    Stats,

    /// List dictionary languages
    Languages,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let _guard = match logging::init_logging(&settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Starting {}", folio_i18n::info());

    match run(cli.command, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let settings = match path {
        Some(path) => Settings::from_file(&path.to_string_lossy(), true),
        None => Settings::new(),
    }
    .context("failed to load configuration")?;
    settings.validate()?;
    Ok(settings)
}

async fn run(command: Commands, settings: &Settings) -> anyhow::Result<()> {
    let loader = DictionaryLoader::from_config(&settings.dictionary)
        .map_err(|e| FolioError::Config(e.to_string()))?;

    match command {
        Commands::Render { page, out, lang } => match lang {
            Some(lang) => {
                let store = MemoryPreferenceStore::with_language(lang);
                render_page(&loader, store, settings, &page, out.as_deref()).await
            }
            None => {
                let store = FilePreferenceStore::new(&settings.preference.path);
                render_page(&loader, store, settings, &page, out.as_deref()).await
            }
        },
        Commands::Switch { code, page, out } => switch_page(&loader, settings, &code, &page, out.as_deref()).await,
        Commands::Check { page, json } => check(&loader, settings, page.as_deref(), json).await,
        Commands::Stats => stats(&loader).await,
        Commands::Languages => languages(&loader, settings).await,
    }
}

/// Log a command failure, unless the loader already reported it
fn report_failure(e: &anyhow::Error) {
    match e.downcast_ref::<FolioError>() {
        Some(FolioError::Load(_)) => {}
        Some(err) => error!(severity = %err.severity(), recoverable = err.is_recoverable(), "{}", err),
        None if e.is::<LoadError>() => {}
        None => error!("{:#}", e),
    }
}

async fn read_page(path: &Path, settings: &Settings) -> anyhow::Result<HtmlDocument> {
    let source = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read page {}", path.display()))?;
    Ok(HtmlDocument::new(source, &settings.page))
}

async fn write_page(document: HtmlDocument, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            tokio::fs::write(path, document.into_html())
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "Page written");
        }
        None => print!("{}", document.into_html()),
    }
    Ok(())
}

async fn render_page<P: PreferenceStore>(
    loader: &DictionaryLoader,
    store: P,
    settings: &Settings,
    page: &Path,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let mut document = read_page(page, settings).await?;
    let (site, report) = Site::load(loader, store, SiteOptions::from_settings(settings), &mut document).await?;

    info!(language = site.language(), substituted = report.substituted,
          sections = report.rendered_sections.len(), "Page rendered");
    write_page(document, out).await
}

async fn switch_page(
    loader: &DictionaryLoader,
    settings: &Settings,
    code: &str,
    page: &Path,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let mut document = read_page(page, settings).await?;
    let store = FilePreferenceStore::new(&settings.preference.path);
    let (mut site, _) = Site::load(loader, store, SiteOptions::from_settings(settings), &mut document).await?;

    let report = site.switch_language(code, &mut document)?;
    info!(language = site.language(), substituted = report.substituted, "Language switched");
    write_page(document, out).await
}

/// Document holding every scalar key and every section container
fn full_coverage_document(dictionary: &Dictionary, settings: &Settings) -> MemoryDocument {
    let keys: BTreeSet<&str> = dictionary
        .languages()
        .filter_map(|lang| dictionary.bundle(lang))
        .flat_map(|bundle| bundle.entries.keys().map(String::as_str))
        .collect();

    let mut document = MemoryDocument::new();
    for key in keys {
        document = document.with_target(key, "");
    }
    for kind in SectionKind::ALL {
        document = document.with_container(kind.container_id(&settings.sections), "");
    }
    document
}

async fn check(
    loader: &DictionaryLoader,
    settings: &Settings,
    page: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let dictionary = loader.load().await?;
    let page = match page {
        Some(path) => Some(read_page(path, settings).await?),
        None => None,
    };
    let renderer = Renderer::new(&settings.sections, MissPolicy::Lenient);

    let mut reports = Vec::new();
    for language in dictionary.languages() {
        let report = match &page {
            Some(page) => renderer.render_all(&mut page.clone(), &dictionary, language)?,
            None => renderer.render_all(&mut full_coverage_document(&dictionary, settings), &dictionary, language)?,
        };
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            let misses = report.misses();
            if misses.is_empty() {
                println!("{}: complete", report.language);
            } else {
                println!("{}: {} missing", report.language, misses.len());
                for miss in misses {
                    println!("  {}", miss);
                }
            }
        }
    }

    let incomplete: Vec<&str> = reports
        .iter()
        .filter(|r| !r.is_complete())
        .map(|r| r.language.as_str())
        .collect();
    if !incomplete.is_empty() {
        bail!("missing translations in: {}", incomplete.join(", "));
    }
    Ok(())
}

async fn stats(loader: &DictionaryLoader) -> anyhow::Result<()> {
    let dictionary = loader.load().await?;
    let count = |n: Option<usize>| n.map_or_else(|| "-".to_string(), |n| n.to_string());

    println!("{:<8} {:>6} {:>7} {:>7} {:>7} {:>8} {:>6}", "lang", "keys", "skills", "certs", "jobs", "projects", "posts");
    for lang in dictionary.stats().languages {
        println!(
            "{:<8} {:>6} {:>7} {:>7} {:>7} {:>8} {:>6}",
            lang.code,
            lang.key_count,
            count(lang.skills),
            count(lang.certifications),
            count(lang.experiences),
            count(lang.projects),
            count(lang.blog_posts),
        );
    }
    Ok(())
}

async fn languages(loader: &DictionaryLoader, settings: &Settings) -> anyhow::Result<()> {
    let dictionary = loader.load().await?;
    let store = FilePreferenceStore::new(&settings.preference.path);
    let stored = non_blank(store.load().unwrap_or_default());
    let active = resolve_initial_language(
        stored.as_deref(),
        &dictionary,
        &settings.dictionary.default_language,
        settings.render.unknown_language,
    );

    for code in dictionary.languages() {
        let marker = if code == active { "*" } else { " " };
        println!("{} {}", marker, code);
    }
    if !dictionary.contains(&active) {
        println!("* {} (not in dictionary)", active);
    }
    Ok(())
}
