//! Pagination: turn sections and the infobox grid into page commands.
//!
//! The paginator owns a single vertical cursor. Every text line is checked
//! against the bottom threshold *before* it is emitted; if the cursor is
//! strictly below the threshold a [`PageCommand::PageBreak`] is emitted
//! first and the cursor returns to the top margin. A line landing exactly
//! on the threshold stays on the current page.
//!
//! ```text
//! y=10   Name: Ada Lovelace                (16 pt)
//! y=20   ┌ infobox table ─────────┐
//!        └────────────────────────┘ final_y
//! +20    Early life                        (14 pt)
//! +10    Born in X.                        (12 pt)
//! ...
//! y>280  ── PageBreak ──  y=10
//! ```

use super::infobox::TableGrid;
use super::segment::Section;
use super::table::TableLayout;
use super::wrap::wrap_text;
use crate::config::{PageMetrics, TableStyle};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One atomic instruction for a render sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PageCommand {
    /// Draw one line of text with its baseline at `y`.
    SetText {
        content: String,
        x: f32,
        y: f32,
        font_size: f32,
    },
    /// Draw a table starting at `start_y`. A long table may continue onto
    /// following pages; the sink adds those pages itself.
    DrawTable {
        header: Vec<String>,
        body: Vec<Vec<String>>,
        start_y: f32,
    },
    /// Start a new page.
    PageBreak,
}

/// Paginator output: the commands plus the number of pages they fill.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageLayout {
    pub commands: Vec<PageCommand>,
    pub pages: usize,
}

impl PageLayout {
    /// All text commands as `(content, y)` pairs, in emission order.
    pub fn text_lines(&self) -> impl Iterator<Item = (&str, f32)> {
        self.commands.iter().filter_map(|c| match c {
            PageCommand::SetText { content, y, .. } => Some((content.as_str(), *y)),
            _ => None,
        })
    }

    pub fn page_breaks(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PageCommand::PageBreak))
            .count()
    }
}

struct Paginator<'a> {
    metrics: &'a PageMetrics,
    commands: Vec<PageCommand>,
    pages: usize,
    cursor: f32,
}

impl<'a> Paginator<'a> {
    fn new(metrics: &'a PageMetrics) -> Self {
        Self {
            metrics,
            commands: Vec::new(),
            pages: 1,
            cursor: metrics.top_margin,
        }
    }

    fn text(&mut self, content: impl Into<String>, y: f32, font_size: f32) {
        self.commands.push(PageCommand::SetText {
            content: content.into(),
            x: self.metrics.left_margin,
            y,
            font_size,
        });
    }

    /// Break the page if the cursor is past the threshold.
    fn ensure_room(&mut self) {
        if self.cursor > self.metrics.page_bottom {
            self.commands.push(PageCommand::PageBreak);
            self.pages += 1;
            self.cursor = self.metrics.top_margin;
        }
    }

    /// Emit a line at the cursor and advance one line height.
    fn line(&mut self, content: impl Into<String>, font_size: f32) {
        self.ensure_room();
        let y = self.cursor;
        self.text(content, y, font_size);
        self.cursor += self.metrics.line_height;
    }

    fn finish(self) -> PageLayout {
        PageLayout {
            commands: self.commands,
            pages: self.pages,
        }
    }
}

/// Lay out the document for `subject`.
pub fn paginate(
    subject: &str,
    sections: &[Section],
    grid: &TableGrid,
    metrics: &PageMetrics,
    table_style: &TableStyle,
) -> PageLayout {
    let mut p = Paginator::new(metrics);

    p.text(format!("Name: {subject}"), metrics.title_y, metrics.title_font_size);

    match grid.header() {
        Some(header) => {
            let body = grid.body();
            let table = TableLayout::measure(header, body, metrics.table_start_y, metrics, table_style);
            p.commands.push(PageCommand::DrawTable {
                header: header.to_vec(),
                body: body.to_vec(),
                start_y: metrics.table_start_y,
            });
            p.pages += table.pages_spanned;
            p.cursor = table.final_y + metrics.table_gap;
            debug!(
                "Table: {} rows, ends at y={:.1} after {} extra page(s)",
                grid.len(),
                table.final_y,
                table.pages_spanned
            );
        }
        None => p.cursor = metrics.no_table_start_y,
    }

    for section in sections {
        p.line(section.title.as_str(), metrics.heading_font_size);
        for line in wrap_text(&section.body, metrics.line_width, metrics.body_font_size) {
            p.line(line, metrics.body_font_size);
        }
    }

    let layout = p.finish();
    debug!(
        "Paginated {} sections into {} page(s), {} commands",
        sections.len(),
        layout.pages,
        layout.commands.len()
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, body: &str) -> Section {
        Section {
            title: title.into(),
            body: body.into(),
        }
    }

    fn layout(sections: &[Section], grid: &TableGrid) -> PageLayout {
        paginate(
            "Test Subject",
            sections,
            grid,
            &PageMetrics::default(),
            &TableStyle::default(),
        )
    }

    fn text(content: &str, y: f32, font_size: f32) -> PageCommand {
        PageCommand::SetText {
            content: content.into(),
            x: 10.0,
            y,
            font_size,
        }
    }

    #[test]
    fn single_short_section_without_table() {
        let l = layout(&[section("Early life", "Born in X.\n\n")], &TableGrid::default());
        assert_eq!(
            l.commands,
            vec![
                text("Name: Test Subject", 10.0, 16.0),
                text("Early life", 30.0, 14.0),
                text("Born in X.", 40.0, 12.0),
            ]
        );
        assert_eq!(l.pages, 1);
    }

    #[test]
    fn no_sections_is_title_only() {
        let l = layout(&[], &TableGrid::default());
        assert_eq!(l.commands.len(), 1);
        assert_eq!(l.pages, 1);
    }

    #[test]
    fn table_emitted_and_cursor_follows_it() {
        let grid = TableGrid::new(vec![
            vec!["Ada Lovelace".into()],
            vec!["Born".into(), "1815".into()],
        ]);
        let l = layout(&[section("Life", "")], &grid);
        match &l.commands[1] {
            PageCommand::DrawTable { header, body, start_y } => {
                assert_eq!(header, &vec!["Ada Lovelace".to_string()]);
                assert_eq!(body.len(), 1);
                assert_eq!(*start_y, 20.0);
            }
            other => panic!("expected table, got {other:?}"),
        }
        let table = TableLayout::measure(
            grid.header().unwrap(),
            grid.body(),
            20.0,
            &PageMetrics::default(),
            &TableStyle::default(),
        );
        let (title, y) = l.text_lines().nth(1).unwrap();
        assert_eq!(title, "Life");
        assert!((y - (table.final_y + 20.0)).abs() < 1e-4);
    }

    #[test]
    fn no_text_below_threshold() {
        let body = "A sentence of moderate length that repeats. ".repeat(400);
        let sections: Vec<_> = (0..5).map(|i| section(&format!("S{i}"), &body)).collect();
        let l = layout(&sections, &TableGrid::default());
        assert!(l.pages > 1);
        for (_, y) in l.text_lines() {
            assert!(y <= 280.0, "text at y={y}");
        }
        assert_eq!(l.pages, l.page_breaks() + 1);
    }

    #[test]
    fn every_break_resets_to_top_margin() {
        let body = "word ".repeat(3000);
        let l = layout(&[section("Long", &body)], &TableGrid::default());
        for pair in l.commands.windows(2) {
            if let [PageCommand::PageBreak, PageCommand::SetText { y, .. }] = pair {
                assert_eq!(*y, 10.0);
            }
        }
    }

    #[test]
    fn line_exactly_at_threshold_stays_on_page() {
        // Title at 30, then lines at 40..=280 fit: 25 lines on page one.
        let body: String = (0..25).map(|i| format!("l{i}\n")).collect();
        let l = layout(&[section("T", &body)], &TableGrid::default());
        assert_eq!(l.pages, 1);
        let last = l.text_lines().last().unwrap();
        assert_eq!(last, ("l24", 280.0));

        let body: String = (0..26).map(|i| format!("l{i}\n")).collect();
        let l = layout(&[section("T", &body)], &TableGrid::default());
        assert_eq!(l.pages, 2);
        assert_eq!(l.text_lines().last().unwrap(), ("l25", 10.0));
    }

    #[test]
    fn heading_checked_before_draw() {
        // Fill page one exactly to 280, so the next heading must break first.
        let body: String = (0..25).map(|i| format!("l{i}\n")).collect();
        let l = layout(
            &[section("T", &body), section("Next", "x\n\n")],
            &TableGrid::default(),
        );
        let pos = l
            .commands
            .iter()
            .position(|c| matches!(c, PageCommand::SetText { content, .. } if content == "Next"))
            .unwrap();
        assert_eq!(l.commands[pos - 1], PageCommand::PageBreak);
    }

    #[test]
    fn long_table_pages_counted() {
        let mut rows = vec![vec!["Header".to_string()]];
        rows.extend((0..60).map(|i| vec![format!("k{i}"), format!("v{i}")]));
        let l = layout(&[section("After", "text\n\n")], &TableGrid::new(rows));
        assert_eq!(l.page_breaks(), 0);
        assert_eq!(l.pages, 2);
    }
}
