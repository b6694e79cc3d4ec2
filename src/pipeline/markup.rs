//! The parsed article tree and its visible-text rules.
//!
//! [`ArticleTree`] owns the parsed HTML fragment returned by the parse API.
//! The segmenter and the infobox extractor both borrow it immutably, so
//! they can run in either order over the same tree.
//!
//! Visible text approximates what a reader sees: descendant text nodes in
//! document order, with `<style>`, `<script>` and `<noscript>` subtrees
//! skipped and `<br>` / list items turned into line breaks. Whitespace is
//! normalised by [`super::postprocess::clean_text`].

use super::postprocess::clean_text;
use scraper::{ElementRef, Html, Node};

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: &[&str] = &["style", "script", "noscript", "template"];

/// Elements that start a new line inside running text.
const LINE_ELEMENTS: &[&str] = &["li", "div", "p", "tr", "dd", "dt"];

/// An immutable, parsed article fragment.
pub struct ArticleTree {
    html: Html,
}

impl ArticleTree {
    /// Parse an HTML fragment. Parsing never fails; malformed markup is
    /// repaired by the HTML5 tree builder.
    pub fn parse(fragment: &str) -> Self {
        Self {
            html: Html::parse_fragment(fragment),
        }
    }

    pub fn html(&self) -> &Html {
        &self.html
    }
}

impl std::fmt::Debug for ArticleTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleTree").finish_non_exhaustive()
    }
}

/// Cleaned visible text of `element`.
pub fn visible_text(element: ElementRef<'_>, strip_citations: bool) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    clean_text(&raw, strip_citations)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if HIDDEN_ELEMENTS.contains(&name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    let breaks = LINE_ELEMENTS.contains(&name);
                    if breaks {
                        out.push('\n');
                    }
                    collect_text(child_el, out);
                    if breaks {
                        out.push('\n');
                    }
                }
            }
            _ => {}
        }
    }
}
