//! Minimum-length enforcement.
//!
//! Short articles are padded with filler pages so every export reaches a
//! fixed page count. Each filler page is a [`PageCommand::PageBreak`]
//! followed by one line of filler text at the top-left margin.

use super::paginate::{PageCommand, PageLayout};
use crate::config::PageMetrics;
use tracing::debug;

/// Pad `layout` up to `min_pages` pages. Returns the number of filler
/// pages added; a layout already long enough is left untouched.
pub fn pad_to_minimum(
    layout: &mut PageLayout,
    min_pages: usize,
    filler_text: &str,
    metrics: &PageMetrics,
) -> usize {
    let missing = min_pages.saturating_sub(layout.pages);
    for _ in 0..missing {
        layout.commands.push(PageCommand::PageBreak);
        layout.commands.push(PageCommand::SetText {
            content: filler_text.to_string(),
            x: metrics.left_margin,
            y: metrics.top_margin,
            font_size: metrics.filler_font_size,
        });
    }
    layout.pages += missing;
    if missing > 0 {
        debug!("Added {} filler page(s) to reach {}", missing, min_pages);
    }
    missing
}
