//! User-visible messages.
//!
//! Every line shown to a person for a lookup outcome or a failure lives
//! here, so the library and the CLI say the same thing in the same words.
//! Detailed diagnostics go to the log; these are the short versions.

use crate::error::WikiBioError;
use crate::output::SummaryOutcome;

/// Shown when a lookup or export is attempted with an empty name.
pub const EMPTY_QUERY: &str = "Please enter a name to search.";

/// Shown when the title names a disambiguation page.
pub const DISAMBIGUATION: &str = "Multiple results found. Please be more specific.";

/// Shown for any network or response failure.
pub const FETCH_FAILED: &str = "Error fetching data. Please try again.";

/// Shown when no regular article exists for `query`.
pub fn not_found(query: &str) -> String {
    format!("No biography found for \"{query}\".")
}

/// The informational line for a summary outcome, or `None` when the
/// outcome is a summary to display.
pub fn for_outcome(outcome: &SummaryOutcome, query: &str) -> Option<String> {
    match outcome {
        SummaryOutcome::Found(_) => None,
        SummaryOutcome::Disambiguation => Some(DISAMBIGUATION.to_string()),
        SummaryOutcome::NotFound => Some(not_found(query)),
    }
}

/// The one-line message for an error.
pub fn for_error(err: &WikiBioError, query: &str) -> String {
    match err {
        WikiBioError::EmptyTitle => EMPTY_QUERY.to_string(),
        WikiBioError::ArticleMissing { .. } => not_found(query),
        e if e.is_network() => FETCH_FAILED.to_string(),
        e => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_messages() {
        assert_eq!(
            for_outcome(&SummaryOutcome::Disambiguation, "Mercury").as_deref(),
            Some("Multiple results found. Please be more specific.")
        );
        assert_eq!(
            for_outcome(&SummaryOutcome::NotFound, "Zzyzx").as_deref(),
            Some("No biography found for \"Zzyzx\".")
        );
    }

    #[test]
    fn network_errors_share_one_message() {
        let errors = [
            WikiBioError::Timeout {
                url: "u".into(),
                secs: 30,
            },
            WikiBioError::HttpStatus {
                url: "u".into(),
                status: 503,
            },
            WikiBioError::MalformedResponse {
                url: "u".into(),
                detail: "d".into(),
            },
        ];
        for e in &errors {
            assert_eq!(for_error(e, "Ada"), FETCH_FAILED);
        }
    }

    #[test]
    fn empty_and_missing() {
        assert_eq!(for_error(&WikiBioError::EmptyTitle, ""), EMPTY_QUERY);
        let missing = WikiBioError::ArticleMissing {
            title: "Zzyzx".into(),
            detail: "missingtitle".into(),
        };
        assert_eq!(for_error(&missing, "Zzyzx"), not_found("Zzyzx"));
    }
}
