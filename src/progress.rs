//! Progress-callback trait for export events.
//!
//! Inject an [`Arc<dyn ExportProgressCallback>`] via
//! [`crate::config::ExportConfigBuilder::progress_callback`] to be told
//! when each stage of an export finishes: article fetched, sections
//! extracted, pages laid out, document written.
//!
//! # Example
//!
//! ```rust
//! use wikibio::{ExportConfig, ExportProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct PageCounter {
//!     pages: Arc<AtomicUsize>,
//! }
//!
//! impl ExportProgressCallback for PageCounter {
//!     fn on_layout_complete(&self, pages: usize, _filler_pages: usize) {
//!         self.pages.store(pages, Ordering::SeqCst);
//!     }
//! }
//!
//! let counter = Arc::new(PageCounter {
//!     pages: Arc::new(AtomicUsize::new(0)),
//! });
//!
//! let config = ExportConfig::builder()
//!     .progress_callback(counter as Arc<dyn ExportProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the export pipeline as it moves through its stages.
///
/// Implementations must be `Send + Sync` so a config carrying one can cross
/// task boundaries. Every method has a default no-op implementation.
pub trait ExportProgressCallback: Send + Sync {
    /// Called once before the article is requested.
    fn on_export_start(&self, title: &str) {
        let _ = title;
    }

    /// Called when the article HTML has arrived.
    ///
    /// # Arguments
    /// * `html_bytes` — byte length of the article markup
    fn on_article_fetched(&self, html_bytes: usize) {
        let _ = html_bytes;
    }

    /// Called after segmentation and infobox extraction.
    fn on_extracted(&self, sections: usize, table_rows: usize) {
        let _ = (sections, table_rows);
    }

    /// Called once the page commands are final.
    ///
    /// # Arguments
    /// * `pages`        — total pages including filler
    /// * `filler_pages` — pages added to reach the minimum length
    fn on_layout_complete(&self, pages: usize, filler_pages: usize) {
        let _ = (pages, filler_pages);
    }

    /// Called after the PDF bytes are produced.
    fn on_export_complete(&self, pages: usize, pdf_bytes: usize) {
        let _ = (pages, pdf_bytes);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExportProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExportConfig`].
pub type ProgressCallback = Arc<dyn ExportProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct TrackingCallback {
        started: Mutex<Option<String>>,
        html_bytes: AtomicUsize,
        sections: AtomicUsize,
        rows: AtomicUsize,
        pages: AtomicUsize,
        filler: AtomicUsize,
    }

    impl ExportProgressCallback for TrackingCallback {
        fn on_export_start(&self, title: &str) {
            *self.started.lock().unwrap() = Some(title.to_string());
        }

        fn on_article_fetched(&self, html_bytes: usize) {
            self.html_bytes.store(html_bytes, Ordering::SeqCst);
        }

        fn on_extracted(&self, sections: usize, table_rows: usize) {
            self.sections.store(sections, Ordering::SeqCst);
            self.rows.store(table_rows, Ordering::SeqCst);
        }

        fn on_layout_complete(&self, pages: usize, filler_pages: usize) {
            self.pages.store(pages, Ordering::SeqCst);
            self.filler.store(filler_pages, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_export_start("Ada Lovelace");
        cb.on_article_fetched(1024);
        cb.on_extracted(3, 12);
        cb.on_layout_complete(4, 3);
        cb.on_export_complete(4, 2048);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_export_start("Grace Hopper");
        tracker.on_article_fetched(5000);
        tracker.on_extracted(7, 15);
        tracker.on_layout_complete(5, 0);

        assert_eq!(
            tracker.started.lock().unwrap().as_deref(),
            Some("Grace Hopper")
        );
        assert_eq!(tracker.html_bytes.load(Ordering::SeqCst), 5000);
        assert_eq!(tracker.sections.load(Ordering::SeqCst), 7);
        assert_eq!(tracker.rows.load(Ordering::SeqCst), 15);
        assert_eq!(tracker.pages.load(Ordering::SeqCst), 5);
        assert_eq!(tracker.filler.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ExportProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_export_start("x");
        cb.on_layout_complete(4, 3);
    }
}
