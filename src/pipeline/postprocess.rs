//! Post-processing: deterministic cleanup of text pulled out of article HTML.
//!
//! Text nodes from MediaWiki markup carry artefacts that a browser hides
//! when it lays out the page but that a PDF would print verbatim:
//!
//! - runs of indentation whitespace and source newlines between inline tags
//! - non-breaking spaces and zero-width joiners from templates
//! - `\r\n` line endings from copy-pasted content
//! - (optionally) bracketed citation markers such as `[12]`
//!
//! Each rule is a pure `&str → String` pass, applied in a fixed order by
//! [`clean_text`]. Explicit line breaks (`<br>`, which the extractor turns
//! into `\n`) survive; everything else collapses to single spaces.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all cleanup rules to one block of extracted text.
///
/// Rules (applied in order):
/// 1. Normalise line endings (CRLF / CR → LF)
/// 2. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens, etc.)
/// 3. Replace non-breaking and other exotic spaces with plain spaces
/// 4. Strip citation markers (only when `strip_citations` is set)
/// 5. Collapse horizontal whitespace and trim each line
/// 6. Drop empty lines and trim the whole block
pub fn clean_text(input: &str, strip_citations: bool) -> String {
    let s = normalise_line_endings(input);
    let s = remove_invisible_chars(&s);
    let s = normalise_spaces(&s);
    let s = if strip_citations {
        remove_citation_markers(&s)
    } else {
        s
    };
    let s = collapse_horizontal_whitespace(&s);
    drop_empty_lines(&s)
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 2: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{200E}',
            '\u{200F}',
        ],
        "",
    )
}

// ── Rule 3: Exotic spaces ────────────────────────────────────────────────────

fn normalise_spaces(input: &str) -> String {
    input.replace(
        [
            '\u{00A0}', '\u{2002}', '\u{2003}', '\u{2009}', '\u{202F}', '\u{205F}', '\t',
        ],
        " ",
    )
}

// ── Rule 4: Citation markers ─────────────────────────────────────────────────
//
// MediaWiki renders footnote references as superscript `[1]`, `[a]`,
// `[note 3]` and maintenance tags as `[citation needed]`. Only bracketed
// tokens of those shapes are removed; ordinary bracketed prose such as
// `[sic]` or `[in French]` is left alone.

static RE_CITATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(?:\d{1,4}|[a-z]{1,2}|(?:note|nb|n) \d{1,3}|[A-Za-z ]{0,40}needed)\]").unwrap()
});

fn remove_citation_markers(input: &str) -> String {
    RE_CITATION.replace_all(input, "").to_string()
}

// ── Rule 5: Collapse horizontal whitespace ───────────────────────────────────

static RE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

fn collapse_horizontal_whitespace(input: &str) -> String {
    input
        .lines()
        .map(|line| RE_SPACES.replace_all(line.trim(), " ").to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 6: Drop empty lines ─────────────────────────────────────────────────

fn drop_empty_lines(input: &str) -> String {
    input
        .lines()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_remove_invisible() {
        let input = "hello\u{200B}world\u{FEFF}foo\u{00AD}bar";
        assert_eq!(remove_invisible_chars(input), "helloworldfoobar");
    }

    #[test]
    fn test_nbsp_becomes_space() {
        assert_eq!(normalise_spaces("10\u{00A0}December\t1815"), "10 December 1815");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_horizontal_whitespace("   Born    in   London  \n  died "),
            "Born in London\ndied"
        );
    }

    #[test]
    fn test_citation_markers_removed() {
        let input = "She was born in 1815.[1][2] Her father[a] left.[citation needed] See[note 3].";
        assert_eq!(
            remove_citation_markers(input),
            "She was born in 1815. Her father left. See."
        );
    }

    #[test]
    fn test_editorial_brackets_kept() {
        let input = "He wrote \"teh\" [sic] and [in French] notes.";
        assert_eq!(remove_citation_markers(input), input);
    }

    #[test]
    fn test_clean_text_keeps_citations_by_default() {
        let input = "  Ada\u{00A0}Lovelace[1]\r\n\r\n  mathematician ";
        assert_eq!(clean_text(input, false), "Ada Lovelace[1]\nmathematician");
    }

    #[test]
    fn test_clean_text_full_pipeline() {
        let input = "\n   Ada   Lovelace[1]\u{200B}\n\n\n  mathematician[citation needed]\t ";
        assert_eq!(clean_text(input, true), "Ada Lovelace\nmathematician");
    }

    #[test]
    fn test_clean_text_whitespace_only() {
        assert_eq!(clean_text(" \n\t\u{00A0} ", false), "");
    }
}
