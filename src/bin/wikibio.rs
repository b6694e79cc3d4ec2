//! CLI binary for wikibio.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ExportConfig` and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wikibio::{
    export_to_file, lookup_summary, messages, pdf_filename, suggest, ExportConfig,
    ExportProgressCallback, ProgressCallback, SummaryOutcome, WikiBioError,
};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal spinner that follows the export stages.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Exporting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ExportProgressCallback for CliProgressCallback {
    fn on_export_start(&self, title: &str) {
        self.bar.set_message(format!("fetching {title}…"));
    }

    fn on_article_fetched(&self, html_bytes: usize) {
        self.bar.println(format!(
            "  {} Article fetched  {}",
            green("✓"),
            dim(&format!("{} KiB", html_bytes / 1024))
        ));
        self.bar.set_message("extracting…");
    }

    fn on_extracted(&self, sections: usize, table_rows: usize) {
        self.bar.println(format!(
            "  {} {} sections, {} infobox rows",
            green("✓"),
            sections,
            table_rows
        ));
        self.bar.set_message("laying out…");
    }

    fn on_layout_complete(&self, pages: usize, filler_pages: usize) {
        let filler = if filler_pages > 0 {
            dim(&format!("  ({filler_pages} filler)"))
        } else {
            String::new()
        };
        self.bar
            .println(format!("  {} {} pages{}", green("✓"), pages, filler));
        self.bar.set_message("writing PDF…");
    }

    fn on_export_complete(&self, _pages: usize, _pdf_bytes: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Suggest article titles for a partial name
  wikibio suggest "Ada Lov"

  # Show the summary card
  wikibio summary "Ada Lovelace"

  # Export the full biography to "Ada Lovelace.pdf"
  wikibio export "Ada Lovelace"

  # Export into a directory, or to an explicit file
  wikibio export "Grace Hopper" -o out/
  wikibio export "Grace Hopper" -o hopper.pdf

  # Another wiki, stricter page minimum, no citation markers
  wikibio --api-base https://de.wikipedia.org export "Emmy Noether" --min-pages 6 --strip-citations

  # Machine-readable output
  wikibio --json summary "Alan Turing"

ENVIRONMENT VARIABLES:
  WIKIBIO_API_BASE         MediaWiki host (default https://en.wikipedia.org)
  WIKIBIO_TIMEOUT          Per-request timeout in seconds
  WIKIBIO_OUTPUT           Output file or directory for `export`
  WIKIBIO_MIN_PAGES        Minimum page count for `export`
  RUST_LOG                 Override log filter (e.g. wikibio=debug)
"#;

/// Look up Wikipedia biographies and export them as PDF.
#[derive(Parser, Debug)]
#[command(
    name = "wikibio",
    version,
    about = "Look up Wikipedia biographies and export them as PDF",
    long_about = "Search Wikipedia for a person, show the article summary, and export the full \
article (infobox table plus every section) as a paginated A4 PDF.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// MediaWiki host to query.
    #[arg(long, global = true, env = "WIKIBIO_API_BASE", default_value = wikibio::config::DEFAULT_API_BASE)]
    api_base: String,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, env = "WIKIBIO_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Output structured JSON instead of text.
    #[arg(long, global = true, env = "WIKIBIO_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, global = true, env = "WIKIBIO_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "WIKIBIO_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "WIKIBIO_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List article titles matching a partial name.
    Suggest {
        query: String,

        /// Maximum number of suggestions.
        #[arg(long, env = "WIKIBIO_SUGGESTIONS", default_value_t = 10)]
        limit: usize,
    },

    /// Show the summary card for an article.
    Summary { title: String },

    /// Export the full article as a PDF.
    Export {
        title: String,

        /// Output file, or a directory to place `<title>.pdf` in.
        #[arg(short, long, env = "WIKIBIO_OUTPUT")]
        output: Option<PathBuf>,

        /// Pad the document with filler pages up to this count.
        #[arg(long, env = "WIKIBIO_MIN_PAGES", default_value_t = 4)]
        min_pages: usize,

        /// CSS class of the fact box rendered as the table.
        #[arg(long, env = "WIKIBIO_INFOBOX_CLASS", default_value = "infobox")]
        infobox_class: String,

        /// Remove citation markers such as [1] and [citation needed].
        #[arg(long, env = "WIKIBIO_STRIP_CITATIONS")]
        strip_citations: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the spinner is active.
    let show_progress = matches!(cli.command, Command::Export { .. })
        && !cli.quiet
        && !cli.no_progress
        && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ExportProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    let result = match &cli.command {
        Command::Suggest { query, .. } => run_suggest(&cli, query, &config).await,
        Command::Summary { title } => run_summary(&cli, title, &config).await,
        Command::Export { title, output, .. } => {
            run_export(&cli, title, output.as_deref(), &config).await
        }
    };

    match result {
        Ok(code) => Ok(code),
        Err(Failure::Lookup { query, error }) => {
            tracing::debug!("{error}");
            eprintln!("{}", red(&messages::for_error(&error, &query)));
            if cli.verbose {
                eprintln!("{}", dim(&error.to_string()));
            }
            Ok(ExitCode::FAILURE)
        }
        Err(Failure::Other(e)) => Err(e),
    }
}

/// A lookup error to show as a one-line message, or anything else.
enum Failure {
    Lookup { query: String, error: WikiBioError },
    Other(anyhow::Error),
}

impl From<anyhow::Error> for Failure {
    fn from(e: anyhow::Error) -> Self {
        Failure::Other(e)
    }
}

fn lookup_failure(query: &str) -> impl FnOnce(WikiBioError) -> Failure + '_ {
    move |error| Failure::Lookup {
        query: query.to_string(),
        error,
    }
}

async fn run_suggest(cli: &Cli, query: &str, config: &ExportConfig) -> Result<ExitCode, Failure> {
    let titles = suggest(query, config).await.map_err(lookup_failure(query))?;
    if cli.json {
        let json = serde_json::to_string_pretty(&titles).context("Failed to serialise output")?;
        println!("{json}");
    } else if titles.is_empty() {
        if !cli.quiet {
            eprintln!("{}", dim("No suggestions."));
        }
    } else {
        for title in &titles {
            println!("{title}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_summary(cli: &Cli, title: &str, config: &ExportConfig) -> Result<ExitCode, Failure> {
    let outcome = lookup_summary(title, config)
        .await
        .map_err(lookup_failure(title))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&outcome).context("Failed to serialise output")?;
        println!("{json}");
        return Ok(ExitCode::SUCCESS);
    }

    match &outcome {
        SummaryOutcome::Found(card) => {
            println!("{}", bold(&card.title));
            if let Some(ref d) = card.description {
                println!("{}", dim(d));
            }
            println!();
            println!("{}", card.extract);
            if let Some(ref t) = card.thumbnail {
                println!();
                println!("Image:  {t}");
            }
            if let Some(ref u) = card.page_url {
                println!("Page:   {u}");
            }
            if !cli.quiet {
                eprintln!();
                eprintln!(
                    "{}",
                    dim(&format!("Download the full biography: wikibio export \"{}\"", card.title))
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        other => {
            let msg = messages::for_outcome(other, title.trim()).unwrap_or_default();
            eprintln!("{}", yellow(&msg));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_export(
    cli: &Cli,
    title: &str,
    output: Option<&Path>,
    config: &ExportConfig,
) -> Result<ExitCode, Failure> {
    let path = output_path(title, output);
    let stats = export_to_file(title, &path, config)
        .await
        .map_err(lookup_failure(title))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&stats).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet {
        eprintln!(
            "{}  {} pages  {}ms  →  {}",
            green("✔"),
            stats.total_pages,
            stats.total_duration_ms,
            bold(&path.display().to_string()),
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// `<title>.pdf` in the working directory, inside `output` when it is a
/// directory, or `output` itself.
fn output_path(title: &str, output: Option<&Path>) -> PathBuf {
    let filename = pdf_filename(title);
    match output {
        None => PathBuf::from(filename),
        Some(p) if p.is_dir() || p.as_os_str().to_string_lossy().ends_with('/') => p.join(filename),
        Some(p) => p.to_path_buf(),
    }
}

/// Map CLI args to `ExportConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExportConfig> {
    let mut builder = ExportConfig::builder()
        .api_base(&cli.api_base)
        .request_timeout_secs(cli.timeout);

    match &cli.command {
        Command::Suggest { limit, .. } => {
            builder = builder.suggestion_limit(*limit);
        }
        Command::Export {
            min_pages,
            infobox_class,
            strip_citations,
            ..
        } => {
            builder = builder
                .min_pages(*min_pages)
                .infobox_class(infobox_class)
                .strip_citations(*strip_citations);
        }
        Command::Summary { .. } => {}
    }

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
