//! Lookup and export entry points.
//!
//! The three user flows: list suggestions for a partial name
//! ([`suggest`]), show the summary card for a title ([`lookup_summary`]),
//! and export the full article as a PDF ([`export`]). The network calls
//! live in [`crate::pipeline::fetch`]; everything after the article HTML
//! arrives is synchronous and available offline as [`export_from_html`].

use crate::config::ExportConfig;
use crate::error::WikiBioError;
use crate::output::{pdf_filename, ExportOutput, ExportStats, SummaryOutcome};
use crate::pipeline::fetch::WikiClient;
use crate::pipeline::infobox::extract_infobox;
use crate::pipeline::markup::ArticleTree;
use crate::pipeline::pad::pad_to_minimum;
use crate::pipeline::paginate::paginate;
use crate::pipeline::render::{execute, PdfSink};
use crate::pipeline::segment::segment;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Titles matching a partial name, most relevant first.
///
/// Queries shorter than `config.min_query_chars` return an empty list
/// without contacting the API.
pub async fn suggest(query: &str, config: &ExportConfig) -> Result<Vec<String>, WikiBioError> {
    WikiClient::new(config)?.suggest(query).await
}

/// Summary card for `title`.
///
/// Disambiguation pages and missing articles are outcomes, not errors.
pub async fn lookup_summary(title: &str, config: &ExportConfig) -> Result<SummaryOutcome, WikiBioError> {
    let outcome = WikiClient::new(config)?.summary(title).await?;
    match &outcome {
        SummaryOutcome::Found(s) => info!("Summary found: {}", s.title),
        SummaryOutcome::Disambiguation => info!("'{}' is a disambiguation page", title.trim()),
        SummaryOutcome::NotFound => info!("No summary for '{}'", title.trim()),
    }
    Ok(outcome)
}

/// Fetch the article for `title` and export it as a PDF.
///
/// # Errors
/// - [`WikiBioError::EmptyTitle`] for a blank title
/// - [`WikiBioError::ArticleMissing`] when the API has no such page
/// - a network error when the article cannot be fetched
///
/// # Example
/// ```rust,no_run
/// use wikibio::{export, ExportConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let output = export("Ada Lovelace", &ExportConfig::default()).await?;
/// std::fs::write(&output.filename, &output.pdf)?;
/// eprintln!("{} pages", output.stats.total_pages);
/// # Ok(())
/// # }
/// ```
pub async fn export(title: &str, config: &ExportConfig) -> Result<ExportOutput, WikiBioError> {
    let total_start = Instant::now();
    let title = title.trim();
    if title.is_empty() {
        return Err(WikiBioError::EmptyTitle);
    }
    info!("Starting export: {}", title);
    if let Some(ref cb) = config.progress_callback {
        cb.on_export_start(title);
    }

    // ── Step 1: Fetch article ────────────────────────────────────────────
    let fetch_start = Instant::now();
    let html = WikiClient::new(config)?.article_html(title).await?;
    let fetch_duration_ms = fetch_start.elapsed().as_millis() as u64;
    if let Some(ref cb) = config.progress_callback {
        cb.on_article_fetched(html.len());
    }

    // ── Step 2: Extract, lay out, render ─────────────────────────────────
    let mut output = build_document(title, &html, config);
    output.stats.fetch_duration_ms = fetch_duration_ms;
    output.stats.total_duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "Export complete: {} pages ({} filler), {} bytes, {}ms total",
        output.stats.total_pages,
        output.stats.filler_pages,
        output.stats.pdf_bytes,
        output.stats.total_duration_ms
    );
    Ok(output)
}

/// Export already-fetched article HTML. No network access.
///
/// `html` is the rendered article body as the parse API returns it.
pub fn export_from_html(
    title: &str,
    html: &str,
    config: &ExportConfig,
) -> Result<ExportOutput, WikiBioError> {
    let total_start = Instant::now();
    let title = title.trim();
    if title.is_empty() {
        return Err(WikiBioError::EmptyTitle);
    }
    let mut output = build_document(title, html, config);
    output.stats.total_duration_ms = total_start.elapsed().as_millis() as u64;
    Ok(output)
}

/// Export `title` and write the PDF to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn export_to_file(
    title: &str,
    output_path: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<ExportStats, WikiBioError> {
    let output = export(title, config).await?;
    write_atomic(output_path.as_ref(), &output.pdf).await?;
    Ok(output.stats)
}

/// Synchronous wrapper around [`export`].
///
/// Creates a temporary tokio runtime internally.
pub fn export_sync(title: &str, config: &ExportConfig) -> Result<ExportOutput, WikiBioError> {
    runtime()?.block_on(export(title, config))
}

/// Synchronous wrapper around [`suggest`].
pub fn suggest_sync(query: &str, config: &ExportConfig) -> Result<Vec<String>, WikiBioError> {
    runtime()?.block_on(suggest(query, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn runtime() -> Result<tokio::runtime::Runtime, WikiBioError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| WikiBioError::Internal(format!("Failed to create tokio runtime: {}", e)))
}

/// Segment, extract, paginate, pad and render one article.
fn build_document(title: &str, html: &str, config: &ExportConfig) -> ExportOutput {
    let layout_start = Instant::now();

    let tree = ArticleTree::parse(html);
    let sections = segment(&tree, config.strip_citations);
    let table = extract_infobox(&tree, &config.infobox_class, config.strip_citations);
    debug!("Extracted {} sections, {} table rows", sections.len(), table.len());
    if sections.is_empty() {
        warn!("'{}' has no h2/h3/h4 headings; the PDF will hold only the title and table", title);
    }
    if let Some(ref cb) = config.progress_callback {
        cb.on_extracted(sections.len(), table.len());
    }

    let mut layout = paginate(title, &sections, &table, &config.layout, &config.table);
    let content_pages = layout.pages;
    let filler_pages = pad_to_minimum(&mut layout, config.min_pages, &config.filler_line(), &config.layout);
    if let Some(ref cb) = config.progress_callback {
        cb.on_layout_complete(layout.pages, filler_pages);
    }

    let mut sink = PdfSink::new(config.layout, config.table);
    execute(&layout.commands, &mut sink);
    if sink.page_count() != layout.pages {
        warn!(
            "Layout counted {} pages but the PDF has {}",
            layout.pages,
            sink.page_count()
        );
    }
    let total_pages = sink.page_count();
    let pdf = sink.finish(title);
    let layout_duration_ms = layout_start.elapsed().as_millis() as u64;

    if let Some(ref cb) = config.progress_callback {
        cb.on_export_complete(total_pages, pdf.len());
    }

    let stats = ExportStats {
        sections: sections.len(),
        table_rows: table.len(),
        content_pages,
        filler_pages,
        total_pages,
        article_bytes: html.len(),
        pdf_bytes: pdf.len(),
        fetch_duration_ms: 0,
        layout_duration_ms,
        total_duration_ms: 0,
    };

    ExportOutput {
        title: title.to_string(),
        filename: pdf_filename(title),
        pdf,
        sections,
        table,
        layout,
        page_metrics: config.layout,
        stats,
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), WikiBioError> {
    let fail = |e: std::io::Error| WikiBioError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(fail)?;
    }

    let tmp_path = path.with_extension("pdf.tmp");
    tokio::fs::write(&tmp_path, bytes).await.map_err(fail)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(fail)?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
