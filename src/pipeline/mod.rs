//! Pipeline stages for article lookup and PDF export.
//!
//! Each submodule implements exactly one transformation step, so each can
//! be tested on its own with fixture markup and no network.
//!
//! ## Data Flow
//!
//! ```text
//!                     ┌──▶ segment ──┐
//! fetch ──▶ markup ───┤              ├──▶ paginate ──▶ pad ──▶ render
//! (HTML)    (tree)    └──▶ infobox ──┘    (commands)  (filler)  (PDF)
//! ```
//!
//! 1. [`fetch`]    — suggestion, summary and article requests; the only
//!    stage with network I/O
//! 2. [`markup`]   — parse the article fragment once into an immutable tree
//!    and define what counts as visible text
//! 3. [`segment`]  — fold `h2`/`h3`/`h4`/`p` elements into titled sections
//! 4. [`infobox`]  — flatten the first fact box into rows of cell text
//! 5. [`paginate`] — place title, table and wrapped section text on pages
//!    with a single vertical cursor
//! 6. [`pad`]      — append filler pages up to the minimum page count
//! 7. [`render`]   — replay the commands into a sink and write the PDF
//!
//! Helpers: [`postprocess`] (text cleanup), [`wrap`] (glyph metrics and
//! line breaking) and [`table`] (table geometry shared by the paginator
//! and the sink).

pub mod fetch;
pub mod infobox;
pub mod markup;
pub mod pad;
pub mod paginate;
pub mod postprocess;
pub mod render;
pub mod segment;
pub mod table;
pub mod wrap;
