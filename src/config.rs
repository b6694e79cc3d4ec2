//! Configuration types for lookups and PDF export.
//!
//! Everything an export depends on lives in [`ExportConfig`], built via
//! [`ExportConfigBuilder`]. The page geometry ([`PageMetrics`]) and the
//! infobox table style ([`TableStyle`]) are plain serialisable values so a
//! caller can log them, diff two runs, or load them from a file.
//!
//! All lengths are millimetres on an A4 page with y measured downward from
//! the top edge. Font sizes are points.

use crate::error::WikiBioError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default API host. Every endpoint path is appended to this.
pub const DEFAULT_API_BASE: &str = "https://en.wikipedia.org";

/// Configuration for suggestion lookups, summary lookups and PDF export.
///
/// Built via [`ExportConfig::builder()`] or using [`ExportConfig::default()`].
///
/// # Example
/// ```rust
/// use wikibio::ExportConfig;
///
/// let config = ExportConfig::builder()
///     .min_pages(2)
///     .request_timeout_secs(10)
///     .strip_citations(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.min_pages, 2);
/// ```
#[derive(Clone)]
pub struct ExportConfig {
    /// Scheme and host of the MediaWiki instance. Default: `https://en.wikipedia.org`.
    pub api_base: String,

    /// Per-request timeout in seconds. Default: 30.
    pub request_timeout_secs: u64,

    /// Maximum number of suggestions requested from opensearch. Default: 10.
    pub suggestion_limit: usize,

    /// Queries shorter than this many characters are not sent. Default: 2.
    pub min_query_chars: usize,

    /// Documents shorter than this are padded with filler pages. Default: 4.
    ///
    /// A presentation rule, not a property of the content. Set to 0 or 1 to
    /// disable padding.
    pub min_pages: usize,

    /// CSS class marking the fact box whose rows become the table. Default: `infobox`.
    pub infobox_class: String,

    /// Remove bracketed citation markers (`[1]`, `[a]`, `[citation needed]`)
    /// from extracted text. Default: false.
    pub strip_citations: bool,

    /// Text placed on each filler page. `{min}` is replaced by `min_pages`.
    pub filler_text: String,

    /// Page geometry used by the paginator.
    pub layout: PageMetrics,

    /// Geometry and typography of the infobox table.
    pub table: TableStyle,

    /// Optional progress callback for export events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 30,
            suggestion_limit: 10,
            min_query_chars: 2,
            min_pages: 4,
            infobox_class: "infobox".to_string(),
            strip_citations: false,
            filler_text: "Additional content to ensure a minimum of {min} pages".to_string(),
            layout: PageMetrics::default(),
            table: TableStyle::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportConfig")
            .field("api_base", &self.api_base)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("suggestion_limit", &self.suggestion_limit)
            .field("min_query_chars", &self.min_query_chars)
            .field("min_pages", &self.min_pages)
            .field("infobox_class", &self.infobox_class)
            .field("strip_citations", &self.strip_citations)
            .field("filler_text", &self.filler_text)
            .field("layout", &self.layout)
            .field("table", &self.table)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ExportProgressCallback>"),
            )
            .finish()
    }
}

impl ExportConfig {
    /// Create a new builder for `ExportConfig`.
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder {
            config: Self::default(),
        }
    }

    /// The filler text with the configured minimum substituted.
    pub fn filler_line(&self) -> String {
        self.filler_text.replace("{min}", &self.min_pages.to_string())
    }
}

/// Builder for [`ExportConfig`].
#[derive(Debug)]
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        let base: String = base.into();
        self.config.api_base = base.trim_end_matches('/').to_string();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.max(1);
        self
    }

    pub fn suggestion_limit(mut self, n: usize) -> Self {
        self.config.suggestion_limit = n.clamp(1, 500);
        self
    }

    pub fn min_query_chars(mut self, n: usize) -> Self {
        self.config.min_query_chars = n;
        self
    }

    pub fn min_pages(mut self, n: usize) -> Self {
        self.config.min_pages = n;
        self
    }

    pub fn infobox_class(mut self, class: impl Into<String>) -> Self {
        self.config.infobox_class = class.into();
        self
    }

    pub fn strip_citations(mut self, v: bool) -> Self {
        self.config.strip_citations = v;
        self
    }

    pub fn filler_text(mut self, text: impl Into<String>) -> Self {
        self.config.filler_text = text.into();
        self
    }

    pub fn layout(mut self, layout: PageMetrics) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn table(mut self, table: TableStyle) -> Self {
        self.config.table = table;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExportConfig, WikiBioError> {
        let c = &self.config;
        if !(c.api_base.starts_with("http://") || c.api_base.starts_with("https://")) {
            return Err(WikiBioError::InvalidConfig(format!(
                "API base must be an http(s) URL, got '{}'",
                c.api_base
            )));
        }
        if c.infobox_class.trim().is_empty() || c.infobox_class.contains(char::is_whitespace) {
            return Err(WikiBioError::InvalidConfig(format!(
                "Infobox class must be a single CSS class name, got '{}'",
                c.infobox_class
            )));
        }
        c.layout.validate()?;
        c.table.validate(&c.layout)?;
        Ok(self.config)
    }
}

// ── Geometry ─────────────────────────────────────────────────────────────

/// Page geometry for the paginator, in millimetres (fonts in points).
///
/// The defaults reproduce the classic layout: A4, a 10 mm left margin, a
/// 180 mm text column, one 10 mm line per row and a bottom threshold at
/// 280 mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    pub page_width: f32,
    pub page_height: f32,
    /// x of every text command.
    pub left_margin: f32,
    /// Cursor position after a page break.
    pub top_margin: f32,
    /// A line whose y is strictly greater than this goes to the next page.
    pub page_bottom: f32,
    /// Cursor advance per emitted line.
    pub line_height: f32,
    /// Width of the wrapped body text column.
    pub line_width: f32,
    /// y of the document title on page 1.
    pub title_y: f32,
    /// y where the infobox table starts.
    pub table_start_y: f32,
    /// Space between the table bottom and the first section.
    pub table_gap: f32,
    /// First section y when there is no table.
    pub no_table_start_y: f32,
    pub title_font_size: f32,
    pub heading_font_size: f32,
    pub body_font_size: f32,
    pub filler_font_size: f32,
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            left_margin: 10.0,
            top_margin: 10.0,
            page_bottom: 280.0,
            line_height: 10.0,
            line_width: 180.0,
            title_y: 10.0,
            table_start_y: 20.0,
            table_gap: 20.0,
            no_table_start_y: 30.0,
            title_font_size: 16.0,
            heading_font_size: 14.0,
            body_font_size: 12.0,
            filler_font_size: 12.0,
        }
    }
}

impl PageMetrics {
    fn validate(&self) -> Result<(), WikiBioError> {
        let fail = |msg: String| Err(WikiBioError::InvalidConfig(msg));
        if self.line_height <= 0.0 {
            return fail(format!("Line height must be > 0, got {}", self.line_height));
        }
        if self.line_width <= 0.0 || self.left_margin + self.line_width > self.page_width {
            return fail(format!(
                "Text column {}..{} mm does not fit a {} mm page",
                self.left_margin,
                self.left_margin + self.line_width,
                self.page_width
            ));
        }
        if self.page_bottom > self.page_height || self.top_margin >= self.page_bottom {
            return fail(format!(
                "Content area {}..{} mm is empty or exceeds the {} mm page",
                self.top_margin, self.page_bottom, self.page_height
            ));
        }
        if [
            self.title_font_size,
            self.heading_font_size,
            self.body_font_size,
            self.filler_font_size,
        ]
        .iter()
        .any(|s| *s <= 0.0)
        {
            return fail("Font sizes must be > 0".into());
        }
        Ok(())
    }
}

/// Infobox table style. Values follow the usual PDF table defaults:
/// 10 pt text, 1.76 mm padding (5 pt), 14 mm margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableStyle {
    pub font_size: f32,
    pub cell_padding: f32,
    pub line_height_factor: f32,
    /// Left and right margin; the table spans the width between them.
    pub margin_x: f32,
    /// y where a table continued on a new page resumes.
    pub margin_top: f32,
    /// Distance from the page bottom edge a row may not cross.
    pub margin_bottom: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            cell_padding: 1.76,
            line_height_factor: 1.15,
            margin_x: 14.0,
            margin_top: 14.0,
            margin_bottom: 14.0,
        }
    }
}

impl TableStyle {
    fn validate(&self, page: &PageMetrics) -> Result<(), WikiBioError> {
        if self.font_size <= 0.0 || self.line_height_factor <= 0.0 || self.cell_padding < 0.0 {
            return Err(WikiBioError::InvalidConfig(
                "Table font size and line height factor must be > 0, padding ≥ 0".into(),
            ));
        }
        if 2.0 * self.margin_x >= page.page_width {
            return Err(WikiBioError::InvalidConfig(format!(
                "Table margins ({} mm each) leave no width on a {} mm page",
                self.margin_x, page.page_width
            )));
        }
        if self.margin_top + self.margin_bottom >= page.page_height {
            return Err(WikiBioError::InvalidConfig(
                "Table top and bottom margins leave no height".into(),
            ));
        }
        Ok(())
    }

    /// Width available to the whole table.
    pub fn table_width(&self, page: &PageMetrics) -> f32 {
        page.page_width - 2.0 * self.margin_x
    }

    /// Height of one line of cell text.
    pub fn text_line_height(&self) -> f32 {
        self.font_size * self.line_height_factor * crate::pipeline::wrap::MM_PER_PT
    }

    /// Lowest y a row may reach on any page.
    pub fn bottom_limit(&self, page: &PageMetrics) -> f32 {
        page.page_height - self.margin_bottom
    }
}
