//! # wikibio
//!
//! Look up Wikipedia biographies and export them as paginated PDF documents.
//!
//! ## What it does
//!
//! Given a person's name, `wikibio` can list matching article titles, show
//! the article's summary card, and export the full article as an A4 PDF:
//! the subject's name, the infobox as a table, then every section heading
//! with its paragraphs, padded to a minimum of four pages.
//!
//! ## Pipeline Overview
//!
//! ```text
//! title
//!  │
//!  ├─ 1. Fetch     article HTML from the MediaWiki parse API
//!  ├─ 2. Segment   h2/h3/h4 + p  → titled sections
//!  ├─ 3. Extract   first .infobox → rows of cell text
//!  ├─ 4. Paginate  title, table, wrapped text → page commands
//!  ├─ 5. Pad       filler pages up to the minimum
//!  └─ 6. Render    PDF bytes (Helvetica, WinAnsi)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wikibio::{export_to_file, lookup_summary, suggest, ExportConfig, SummaryOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExportConfig::default();
//!
//!     for title in suggest("Ada Lov", &config).await? {
//!         println!("{title}");
//!     }
//!
//!     if let SummaryOutcome::Found(card) = lookup_summary("Ada Lovelace", &config).await? {
//!         println!("{}: {}", card.title, card.extract);
//!     }
//!
//!     let stats = export_to_file("Ada Lovelace", "Ada Lovelace.pdf", &config).await?;
//!     eprintln!("{} pages", stats.total_pages);
//!     Ok(())
//! }
//! ```
//!
//! Already have the HTML? [`export_from_html`] runs steps 2–6 offline.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `wikibio` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! wikibio = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod export;
pub mod messages;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExportConfig, ExportConfigBuilder, PageMetrics, TableStyle};
pub use error::WikiBioError;
pub use export::{export, export_from_html, export_sync, export_to_file, lookup_summary, suggest, suggest_sync};
pub use output::{pdf_filename, ExportOutput, ExportStats, Summary, SummaryOutcome};
pub use pipeline::paginate::{PageCommand, PageLayout};
pub use pipeline::render::{PdfSink, RenderSink};
pub use pipeline::segment::Section;
pub use pipeline::infobox::TableGrid;
pub use progress::{ExportProgressCallback, NoopProgressCallback, ProgressCallback};
