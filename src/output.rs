//! Result types returned by lookups and exports.

use crate::config::PageMetrics;
use crate::pipeline::infobox::TableGrid;
use crate::pipeline::paginate::PageLayout;
use crate::pipeline::segment::Section;
use serde::{Deserialize, Serialize};

/// Short description card for an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Canonical article title, as the API returns it.
    pub title: String,
    /// URL of the lead image, if the article has one.
    pub thumbnail: Option<String>,
    /// Plain-text lead extract.
    pub extract: String,
    /// One-line description ("English mathematician (1815–1852)").
    pub description: Option<String>,
    /// Desktop URL of the article.
    pub page_url: Option<String>,
}

/// What a summary lookup found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SummaryOutcome {
    /// A regular article.
    Found(Summary),
    /// The title names a disambiguation page.
    Disambiguation,
    /// No article, or one that isn't a regular page.
    NotFound,
}

impl SummaryOutcome {
    pub fn summary(&self) -> Option<&Summary> {
        match self {
            SummaryOutcome::Found(s) => Some(s),
            _ => None,
        }
    }
}

/// Counters and timings for one export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStats {
    pub sections: usize,
    /// Infobox rows, header included.
    pub table_rows: usize,
    /// Pages holding article content (title, table, sections).
    pub content_pages: usize,
    pub filler_pages: usize,
    pub total_pages: usize,
    pub article_bytes: usize,
    pub pdf_bytes: usize,
    pub fetch_duration_ms: u64,
    pub layout_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// A finished export: the PDF plus everything that went into it.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutput {
    pub title: String,
    /// Suggested file name, `<title>.pdf`.
    pub filename: String,
    #[serde(skip)]
    pub pdf: Vec<u8>,
    pub sections: Vec<Section>,
    pub table: TableGrid,
    pub layout: PageLayout,
    pub page_metrics: PageMetrics,
    pub stats: ExportStats,
}

/// File name for an exported article: the title with path separators and
/// control characters replaced by `_`, plus `.pdf`.
pub fn pdf_filename(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = if stem.is_empty() || stem == "." || stem == ".." {
        "article".to_string()
    } else {
        stem
    };
    format!("{stem}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_keeps_title() {
        assert_eq!(pdf_filename("Ada Lovelace"), "Ada Lovelace.pdf");
        assert_eq!(pdf_filename("Gödel"), "Gödel.pdf");
    }

    #[test]
    fn filename_replaces_separators() {
        assert_eq!(pdf_filename("AC/DC"), "AC_DC.pdf");
        assert_eq!(pdf_filename("a\\b\tc"), "a_b_c.pdf");
        assert_eq!(pdf_filename(".."), "article.pdf");
    }

    #[test]
    fn outcome_serialises_with_tag() {
        let json = serde_json::to_value(SummaryOutcome::Disambiguation).unwrap();
        assert_eq!(json["outcome"], "disambiguation");
        let found = SummaryOutcome::Found(Summary {
            title: "Ada Lovelace".into(),
            thumbnail: None,
            extract: "Mathematician.".into(),
            description: None,
            page_url: None,
        });
        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(json["outcome"], "found");
        assert_eq!(json["title"], "Ada Lovelace");
        assert_eq!(found.summary().unwrap().extract, "Mathematician.");
    }
}
