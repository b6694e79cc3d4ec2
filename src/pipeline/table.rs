//! Deterministic infobox table layout.
//!
//! The paginator needs to know where the table ends before anything is
//! drawn, and the sink needs exact cell positions to draw it. Both call
//! [`TableLayout::measure`], so the offset the paginator continues from is
//! the offset the sink actually reaches.
//!
//! Columns share the table width equally. Cells fill columns left to
//! right; when a row has fewer cells than the widest row, its last cell
//! spans the remaining columns. Cell text wraps to the cell width. A row
//! that would cross the bottom limit moves to the next page, where the
//! header row is repeated first.

use super::wrap::wrap_text;
use crate::config::{PageMetrics, TableStyle};

/// A laid-out cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell {
    pub x: f32,
    pub width: f32,
    pub lines: Vec<String>,
}

/// A laid-out row.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    /// Pages after the one the table starts on.
    pub page_offset: usize,
    /// Top edge.
    pub y: f32,
    pub height: f32,
    pub is_header: bool,
    pub cells: Vec<PlacedCell>,
}

/// The full table geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub rows: Vec<PlacedRow>,
    /// Bottom edge of the last row, on the last page.
    pub final_y: f32,
    /// Extra pages the table continues onto.
    pub pages_spanned: usize,
}

impl TableLayout {
    /// Lay out `header` and `body` starting at `start_y`.
    pub fn measure(
        header: &[String],
        body: &[Vec<String>],
        start_y: f32,
        page: &PageMetrics,
        style: &TableStyle,
    ) -> Self {
        let columns = body
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0)
            .max(1);
        let column_width = style.table_width(page) / columns as f32;
        let bottom = style.bottom_limit(page);

        let header_row = shape_row(header, columns, column_width, style);
        let mut rows = Vec::with_capacity(body.len() + 1);
        let mut y = start_y;
        let mut page_offset = 0;

        // The header moves to a fresh page only if it doesn't fit below
        // the start offset.
        if y + header_row.height > bottom && y > style.margin_top {
            page_offset += 1;
            y = style.margin_top;
        }
        rows.push(header_row.placed(y, page_offset, true));
        y += header_row.height;

        for cells in body {
            let shape = shape_row(cells, columns, column_width, style);
            if y + shape.height > bottom {
                page_offset += 1;
                y = style.margin_top;
                rows.push(header_row.placed(y, page_offset, true));
                y += header_row.height;
            }
            rows.push(shape.placed(y, page_offset, false));
            y += shape.height;
        }

        Self {
            rows,
            final_y: y,
            pages_spanned: page_offset,
        }
    }
}

struct RowShape {
    height: f32,
    cells: Vec<PlacedCell>,
}

impl RowShape {
    fn placed(&self, y: f32, page_offset: usize, is_header: bool) -> PlacedRow {
        PlacedRow {
            page_offset,
            y,
            height: self.height,
            is_header,
            cells: self.cells.clone(),
        }
    }
}

fn shape_row(cells: &[String], columns: usize, column_width: f32, style: &TableStyle) -> RowShape {
    let line_height = style.text_line_height();
    let pad = style.cell_padding;
    let count = cells.len();

    let placed: Vec<PlacedCell> = cells
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let span = if i + 1 == count { columns - i } else { 1 };
            let width = span as f32 * column_width;
            let lines = wrap_text(text, (width - 2.0 * pad).max(1.0), style.font_size);
            PlacedCell {
                x: style.margin_x + i as f32 * column_width,
                width,
                lines,
            }
        })
        .collect();

    let max_lines = placed.iter().map(|c| c.lines.len()).max().unwrap_or(0).max(1);
    RowShape {
        height: max_lines as f32 * line_height + 2.0 * pad,
        cells: placed,
    }
}
