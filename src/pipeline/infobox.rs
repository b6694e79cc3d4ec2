//! Fact-table extraction: flatten the article's infobox into rows of text.
//!
//! The first element carrying the configured marker class (default
//! `infobox`) is the fact box. Every `tr` below it, in document order,
//! becomes one row; the row's `th`/`td` cells become trimmed strings in
//! column order. Rows may differ in width and a row without cells is kept
//! as an empty row.

use super::markup::{visible_text, ArticleTree};
use once_cell::sync::Lazy;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

static ROWS: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELLS: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").unwrap());

/// Rows of text cells. The first row, if any, is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableGrid {
    rows: Vec<Vec<String>>,
}

impl TableGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows, header included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// All rows after the header.
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Widest row, in cells.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Extract the first fact box marked with `marker_class`.
///
/// Returns an empty grid when no element carries the class.
pub fn extract_infobox(tree: &ArticleTree, marker_class: &str, strip_citations: bool) -> TableGrid {
    let selector = match Selector::parse(&format!(".{marker_class}")) {
        Ok(s) => s,
        Err(e) => {
            warn!("Ignoring infobox class '{}': {:?}", marker_class, e);
            return TableGrid::default();
        }
    };

    let Some(infobox) = tree.html().select(&selector).next() else {
        debug!("No element with class '{}'", marker_class);
        return TableGrid::default();
    };

    let rows: Vec<Vec<String>> = infobox
        .select(&ROWS)
        .map(|row| {
            row.select(&CELLS)
                .map(|cell| visible_text(cell, strip_citations).trim().to_string())
                .collect()
        })
        .collect();

    debug!("Infobox: {} rows", rows.len());
    TableGrid::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFOBOX: &str = r#"
        <p>Lead</p>
        <table class="infobox biography vcard">
          <tbody>
            <tr><th colspan="2" class="infobox-above">Ada Lovelace</th></tr>
            <tr><th scope="row">Born</th><td>  Augusta Ada Byron <br>10 December 1815 </td></tr>
            <tr><th scope="row">Died</th><td>27 November 1852<style>.x{}</style></td></tr>
            <tr><td colspan="2"></td></tr>
          </tbody>
        </table>
        <table class="infobox"><tr><td>second box</td></tr></table>
    "#;

    fn grid(html: &str) -> TableGrid {
        extract_infobox(&ArticleTree::parse(html), "infobox", false)
    }

    #[test]
    fn no_infobox_gives_empty_grid() {
        let g = grid("<h2>A</h2><p>text</p><table class='wikitable'><tr><td>x</td></tr></table>");
        assert!(g.is_empty());
        assert!(g.header().is_none());
        assert!(g.body().is_empty());
    }

    #[test]
    fn rows_and_cells_in_document_order() {
        let g = grid(INFOBOX);
        assert_eq!(g.len(), 4);
        assert_eq!(g.header().unwrap(), &["Ada Lovelace".to_string()]);
        assert_eq!(
            g.body()[0],
            vec!["Born".to_string(), "Augusta Ada Byron\n10 December 1815".to_string()]
        );
        assert_eq!(g.body()[1][1], "27 November 1852");
    }

    #[test]
    fn only_first_infobox_used() {
        let g = grid(INFOBOX);
        assert!(!g.rows().iter().flatten().any(|c| c == "second box"));
    }

    #[test]
    fn ragged_rows_allowed() {
        let g = grid(INFOBOX);
        assert_eq!(g.column_count(), 2);
        assert_eq!(g.header().unwrap().len(), 1);
        assert_eq!(g.body()[2], vec![String::new()]);
    }

    #[test]
    fn empty_infobox_table() {
        let g = grid("<table class='infobox'></table>");
        assert!(g.is_empty());
    }

    #[test]
    fn row_without_cells_kept() {
        let g = grid("<table class='infobox'><tr></tr><tr><td>x</td></tr></table>");
        assert_eq!(g.len(), 2);
        assert!(g.rows()[0].is_empty());
    }

    #[test]
    fn custom_marker_class() {
        let tree = ArticleTree::parse("<table class='factbox'><tr><td>y</td></tr></table>");
        assert_eq!(extract_infobox(&tree, "factbox", false).len(), 1);
        assert!(extract_infobox(&tree, "infobox", false).is_empty());
    }

    #[test]
    fn invalid_marker_class_is_zero_results() {
        let tree = ArticleTree::parse("<table class='infobox'><tr><td>y</td></tr></table>");
        assert!(extract_infobox(&tree, "[[", false).is_empty());
    }
}
