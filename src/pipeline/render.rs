//! Rendering sink: execute page commands and write the PDF.
//!
//! [`RenderSink`] is the narrow interface the layout is written against:
//! draw text, draw a table, start a page. [`execute`] replays a
//! [`PageCommand`] sequence against any sink, so tests can record commands
//! instead of producing bytes.
//!
//! [`PdfSink`] writes a plain PDF 1.7 file with `pdf-writer`. Text uses the
//! built-in Helvetica face with WinAnsi encoding, so nothing is embedded;
//! characters outside that code page are written as `?`. Layout positions
//! arrive in millimetres from the top-left corner and are converted to
//! points from the bottom-left here.

use super::paginate::PageCommand;
use super::table::{PlacedRow, TableLayout};
use super::wrap::MM_PER_PT;
use crate::config::{PageMetrics, TableStyle};
use crate::error::WikiBioError;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};
use std::path::Path;
use tracing::debug;

const FONT_NAME: Name<'static> = Name(b"F1");

/// Grey level of table borders.
const BORDER_GREY: f32 = 0.5;
/// Grey level of the header row background.
const HEADER_FILL_GREY: f32 = 0.92;
/// Table border width in millimetres.
const BORDER_WIDTH: f32 = 0.1;

/// Anything that can draw the layout.
pub trait RenderSink {
    fn emit_text(&mut self, content: &str, x: f32, y: f32, font_size: f32);

    /// Draw a table starting at `start_y` and return the y where it ends.
    /// A table that runs past the page bottom continues on new pages it
    /// adds itself; the returned y is on the last of them.
    fn emit_table(&mut self, header: &[String], rows: &[Vec<String>], start_y: f32) -> f32;

    fn add_page(&mut self);
}

/// Replay `commands` against `sink` in order.
pub fn execute<S: RenderSink + ?Sized>(commands: &[PageCommand], sink: &mut S) {
    for command in commands {
        match command {
            PageCommand::SetText {
                content,
                x,
                y,
                font_size,
            } => sink.emit_text(content, *x, *y, *font_size),
            PageCommand::DrawTable {
                header,
                body,
                start_y,
            } => {
                let end = sink.emit_table(header, body, *start_y);
                debug!("Table drawn from y={:.1} to y={:.1}", start_y, end);
            }
            PageCommand::PageBreak => sink.add_page(),
        }
    }
}

// ── PDF sink ─────────────────────────────────────────────────────────────

/// A [`RenderSink`] producing PDF bytes.
///
/// Starts with one empty page. Call [`PdfSink::finish`] for the bytes or
/// [`PdfSink::save`] to write them to disk.
pub struct PdfSink {
    metrics: PageMetrics,
    table_style: TableStyle,
    done: Vec<Content>,
    current: Content,
}

impl std::fmt::Debug for PdfSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfSink")
            .field("pages", &self.page_count())
            .finish_non_exhaustive()
    }
}

impl PdfSink {
    pub fn new(metrics: PageMetrics, table_style: TableStyle) -> Self {
        Self {
            metrics,
            table_style,
            done: Vec::new(),
            current: Content::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.done.len() + 1
    }

    fn pt(mm: f32) -> f32 {
        mm / MM_PER_PT
    }

    /// Top-down millimetres to bottom-up points.
    fn flip_y(&self, y: f32) -> f32 {
        Self::pt(self.metrics.page_height - y)
    }

    fn text_at(&mut self, content: &str, x: f32, y: f32, font_size: f32) {
        let bytes = to_win_ansi(content);
        let baseline = self.flip_y(y);
        self.current
            .begin_text()
            .set_font(FONT_NAME, font_size)
            .next_line(Self::pt(x), baseline)
            .show(Str(&bytes))
            .end_text();
    }

    fn draw_row(&mut self, row: &PlacedRow) {
        let style = self.table_style;
        let top = self.flip_y(row.y);
        let height = Self::pt(row.height);

        self.current.save_state();
        if row.is_header {
            self.current.set_fill_gray(HEADER_FILL_GREY);
            for cell in &row.cells {
                self.current
                    .rect(Self::pt(cell.x), top - height, Self::pt(cell.width), height);
            }
            self.current.fill_nonzero();
        }
        self.current
            .set_line_width(Self::pt(BORDER_WIDTH))
            .set_stroke_gray(BORDER_GREY);
        for cell in &row.cells {
            self.current
                .rect(Self::pt(cell.x), top - height, Self::pt(cell.width), height);
        }
        self.current.stroke();
        self.current.restore_state();

        let line_height = style.text_line_height();
        let ascent = style.font_size * MM_PER_PT;
        for cell in &row.cells {
            for (i, line) in cell.lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let baseline = row.y + style.cell_padding + i as f32 * line_height + ascent;
                self.text_at(line, cell.x + style.cell_padding, baseline, style.font_size);
            }
        }
    }

    /// Serialise all pages into a PDF document titled `title`.
    pub fn finish(self, title: &str) -> Vec<u8> {
        let mut contents = self.done;
        contents.push(self.current);

        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let font_id = alloc();
        let info_id = alloc();
        let page_ids: Vec<Ref> = (0..contents.len()).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..contents.len()).map(|_| alloc()).collect();

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);
        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.document_info(info_id)
            .title(TextStr(title))
            .producer(TextStr(concat!("wikibio ", env!("CARGO_PKG_VERSION"))));

        let media_box = Rect::new(
            0.0,
            0.0,
            Self::pt(self.metrics.page_width),
            Self::pt(self.metrics.page_height),
        );

        for (i, content) in contents.into_iter().enumerate() {
            let raw = content.finish();
            pdf.stream(content_ids[i], &raw);

            let mut page = pdf.page(page_ids[i]);
            page.media_box(media_box)
                .parent(pages_id)
                .contents(content_ids[i]);
            page.resources().fonts().pair(FONT_NAME, font_id);
        }

        let bytes = pdf.finish();
        debug!("PDF written: {} pages, {} bytes", page_ids.len(), bytes.len());
        bytes
    }

    /// Serialise and write to `path`.
    pub fn save(self, title: &str, path: &Path) -> Result<usize, WikiBioError> {
        let bytes = self.finish(title);
        std::fs::write(path, &bytes).map_err(|e| WikiBioError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(bytes.len())
    }
}

impl RenderSink for PdfSink {
    fn emit_text(&mut self, content: &str, x: f32, y: f32, font_size: f32) {
        if content.is_empty() {
            return;
        }
        self.text_at(content, x, y, font_size);
    }

    fn emit_table(&mut self, header: &[String], rows: &[Vec<String>], start_y: f32) -> f32 {
        let layout = TableLayout::measure(header, rows, start_y, &self.metrics, &self.table_style);
        let mut offset = 0;
        for row in &layout.rows {
            while offset < row.page_offset {
                self.add_page();
                offset += 1;
            }
            self.draw_row(row);
        }
        layout.final_y
    }

    fn add_page(&mut self) {
        let finished = std::mem::replace(&mut self.current, Content::new());
        self.done.push(finished);
    }
}

/// Encode text in the WinAnsi (Windows-1252) code page used by the
/// standard fonts. Unmappable characters become `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => b'?',
        })
        .collect()
}
