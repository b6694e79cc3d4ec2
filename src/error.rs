//! Error types for the wikibio library.
//!
//! A single fatal error type, [`WikiBioError`], covers every way an
//! export or lookup can fail to produce a result: an empty title, an
//! unreachable API, an unexpected response shape, a missing article, or an
//! unwritable output file.
//!
//! Two outcomes that look like failures are deliberately *not* errors:
//!
//! * A disambiguation page or a missing summary is an ordinary
//!   [`crate::output::SummaryOutcome`] variant the caller renders as an
//!   informational message.
//! * Markup without headings or without an infobox simply yields zero
//!   sections or an empty table. Extraction never fails.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the wikibio library.
#[derive(Debug, Error)]
pub enum WikiBioError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// A summary lookup or export was requested with an empty title.
    #[error("No title given.\nPass the name of a Wikipedia article, e.g. \"Ada Lovelace\".")]
    EmptyTitle,

    // ── Network errors ────────────────────────────────────────────────────
    /// The request could not be sent or the connection failed.
    #[error("Request to '{url}' failed: {reason}\nCheck your internet connection.")]
    NetworkFailure { url: String, reason: String },

    /// The request exceeded the configured timeout.
    #[error("Request to '{url}' timed out after {secs}s\nIncrease --timeout.")]
    Timeout { url: String, secs: u64 },

    /// The server answered with a non-success status.
    #[error("Request to '{url}' returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The response body did not have the expected JSON shape.
    #[error("Unexpected response from '{url}': {detail}")]
    MalformedResponse { url: String, detail: String },

    /// The parse API reported that no article exists under this title.
    #[error("Article '{title}' could not be loaded: {detail}")]
    ArticleMissing { title: String, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WikiBioError {
    /// Whether the failure came from talking to the API rather than from
    /// the caller's input or the local file system.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            WikiBioError::NetworkFailure { .. }
                | WikiBioError::Timeout { .. }
                | WikiBioError::HttpStatus { .. }
                | WikiBioError::MalformedResponse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_display() {
        let e = WikiBioError::Timeout {
            url: "https://en.wikipedia.org/w/api.php".into(),
            secs: 30,
        };
        let msg = e.to_string();
        assert!(msg.contains("30s"), "got: {msg}");
        assert!(msg.contains("api.php"));
    }

    #[test]
    fn http_status_display() {
        let e = WikiBioError::HttpStatus {
            url: "https://example.org".into(),
            status: 503,
        };
        assert!(e.to_string().contains("HTTP 503"));
    }

    #[test]
    fn article_missing_display() {
        let e = WikiBioError::ArticleMissing {
            title: "Nobody Atall".into(),
            detail: "The page you specified doesn't exist.".into(),
        };
        assert!(e.to_string().contains("Nobody Atall"));
        assert!(e.to_string().contains("doesn't exist"));
    }

    #[test]
    fn network_classification() {
        assert!(WikiBioError::NetworkFailure {
            url: "u".into(),
            reason: "dns".into()
        }
        .is_network());
        assert!(!WikiBioError::EmptyTitle.is_network());
        assert!(!WikiBioError::ArticleMissing {
            title: "t".into(),
            detail: "d".into()
        }
        .is_network());
    }
}
