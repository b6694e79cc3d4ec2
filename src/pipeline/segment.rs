//! Section segmentation: regroup article headings and paragraphs into
//! titled sections.
//!
//! The traversal visits `h2`, `h3`, `h4` and `p` elements in document
//! order. Each element is classified once into a [`Block`], and the
//! sequence of blocks is folded into sections:
//!
//! ```text
//! h2 "Early life"   ──▶ open  Section("Early life")
//! p  "Born in X."   ──▶ body += "Born in X.\n\n"
//! h3 "Education"    ──▶ close Section("Early life"), open Section("Education")
//! (end)             ──▶ close Section("Education")
//! ```
//!
//! Paragraphs that appear before the first heading (the article lead) are
//! dropped; no preamble section is created.

use super::markup::{visible_text, ArticleTree};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};

/// Separator appended after every paragraph in a section body.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Title used when a heading has no visible text.
pub const UNTITLED: &str = "(untitled)";

static BLOCKS: Lazy<Selector> = Lazy::new(|| Selector::parse("h2, h3, h4, p").unwrap());

/// A titled span of body text, from one heading to the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Visible text of the heading. Never empty.
    pub title: String,
    /// Paragraph texts in document order, each followed by `"\n\n"`.
    pub body: String,
}

impl Section {
    fn open(title: String) -> Self {
        let title = if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title
        };
        Self {
            title,
            body: String::new(),
        }
    }

    fn append_paragraph(&mut self, text: &str) {
        self.body.push_str(text);
        self.body.push_str(PARAGRAPH_SEPARATOR);
    }
}

/// One classified element of the traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
}

impl Block {
    /// Classify an element by tag name. Anything other than `h2`–`h4` and
    /// `p` is not a block.
    pub fn classify(element: ElementRef<'_>, strip_citations: bool) -> Option<Self> {
        match element.value().name() {
            "h2" | "h3" | "h4" => Some(Block::Heading(visible_text(element, strip_citations))),
            "p" => Some(Block::Paragraph(visible_text(element, strip_citations))),
            _ => None,
        }
    }
}

/// Fold state: closed sections plus the one still accepting paragraphs.
#[derive(Debug, Default)]
struct Segments {
    done: Vec<Section>,
    open: Option<Section>,
}

impl Segments {
    fn push(mut self, block: Block) -> Self {
        match block {
            Block::Heading(title) => {
                if let Some(section) = self.open.take() {
                    self.done.push(section);
                }
                self.open = Some(Section::open(title));
            }
            Block::Paragraph(text) => {
                if let Some(section) = self.open.as_mut() {
                    section.append_paragraph(&text);
                }
            }
        }
        self
    }

    fn finish(mut self) -> Vec<Section> {
        if let Some(section) = self.open.take() {
            self.done.push(section);
        }
        self.done
    }
}

/// Fold an already-classified block sequence into sections.
pub fn fold_blocks(blocks: impl IntoIterator<Item = Block>) -> Vec<Section> {
    blocks
        .into_iter()
        .fold(Segments::default(), Segments::push)
        .finish()
}

/// Segment an article into sections, in document order.
pub fn segment(tree: &ArticleTree, strip_citations: bool) -> Vec<Section> {
    fold_blocks(
        tree.html()
            .select(&BLOCKS)
            .filter_map(|el| Block::classify(el, strip_citations)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(html: &str) -> Vec<Section> {
        segment(&ArticleTree::parse(html), false)
    }

    #[test]
    fn no_headings_means_no_sections() {
        assert!(sections("<p>One.</p><p>Two.</p><p>Three.</p>").is_empty());
        assert!(sections("").is_empty());
    }

    #[test]
    fn lead_paragraphs_are_dropped() {
        let s = sections("<p>Lead.</p><h2>Early life</h2><p>Born in X.</p>");
        assert_eq!(
            s,
            vec![Section {
                title: "Early life".into(),
                body: "Born in X.\n\n".into()
            }]
        );
    }

    #[test]
    fn one_section_per_heading() {
        let html = "<h2>A</h2><h3>B</h3><p>b1</p><h4>C</h4><h5>ignored</h5><p>c1</p><h2>D</h2>";
        let s = sections(html);
        let titles: Vec<_> = s.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn consecutive_headings_give_empty_body() {
        let s = sections("<h2>Career</h2><h3>Early career</h3><p>Worked.</p>");
        assert_eq!(s[0].body, "");
        assert_eq!(s[1].body, "Worked.\n\n");
    }

    #[test]
    fn body_holds_only_paragraphs_until_next_heading() {
        let html = "<h2>A</h2><p>a1</p><p>a2</p><h2>B</h2><p>b1</p>";
        let s = sections(html);
        assert_eq!(s[0].body, "a1\n\na2\n\n");
        assert_eq!(s[1].body, "b1\n\n");
    }

    #[test]
    fn h1_and_lists_are_not_blocks() {
        let html = "<h1>Title</h1><h2>A</h2><ul><li>item</li></ul><p>a1</p>";
        let s = sections(html);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].body, "a1\n\n");
    }

    #[test]
    fn nested_markup_in_wrappers_is_found() {
        let html = r#"<div class="mw-parser-output">
            <div class="mw-heading mw-heading2"><h2 id="Life">Life</h2></div>
            <section><p>Nested <i>para</i>.</p></section>
        </div>"#;
        let s = sections(html);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].title, "Life");
        assert_eq!(s[0].body, "Nested para.\n\n");
    }

    #[test]
    fn empty_heading_gets_fallback_title() {
        let s = sections("<h2>  </h2><p>text</p>");
        assert_eq!(s[0].title, UNTITLED);
    }

    #[test]
    fn fold_is_independent_of_markup() {
        let s = fold_blocks(vec![
            Block::Paragraph("lead".into()),
            Block::Heading("H".into()),
            Block::Paragraph("p".into()),
        ]);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].body, "p\n\n");
    }
}
