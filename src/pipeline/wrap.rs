//! Text measurement and word wrapping.
//!
//! The PDF uses the built-in Helvetica font, so widths come from its
//! standard glyph metrics (units of 1/1000 em). Wrapping is greedy: words
//! are added to a line while it still fits, and a single word wider than
//! the column is broken between characters.

/// Millimetres per PDF point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Helvetica advance widths for `' '..='~'`.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015,                                              // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                 // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                 // 'N'..'Z'
    278, 278, 278, 469, 556, 333,                                                    // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                 // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                 // 'n'..'z'
    334, 260, 334, 584,                                                              // '{'..'~'
];

/// Advance width of one glyph in 1/1000 em.
fn glyph_width(c: char) -> u16 {
    match c {
        ' '..='~' => HELVETICA_ASCII[c as usize - 0x20],
        '\u{2014}' | '\u{2026}' => 1000,
        '\u{2018}' | '\u{2019}' | '\u{201A}' => 222,
        '\u{201C}' | '\u{201D}' | '\u{201E}' => 333,
        '\u{2022}' => 350,
        '\u{00B7}' => 278,
        _ => 556,
    }
}

/// Rendered width of `text` in millimetres at `font_size` points.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c) as u32).sum();
    units as f32 / 1000.0 * font_size * MM_PER_PT
}

/// Wrap multi-paragraph text to `width` millimetres.
///
/// The text is split on newlines; each piece is wrapped on its own, and an
/// empty piece becomes an empty line so paragraph gaps keep their height.
/// Trailing empty lines are dropped, so `"Born in X.\n\n"` wraps to the
/// single line `"Born in X."`.
pub fn wrap_text(text: &str, width: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrap_paragraph(paragraph, width, font_size));
        }
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Greedy wrap of a single paragraph (no newlines).
pub fn wrap_paragraph(paragraph: &str, width: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        if text_width(word, font_size) > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = break_word(word, width, font_size);
            // The last piece may still share its line with the next word.
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate_width = text_width(&current, font_size)
            + text_width(" ", font_size)
            + text_width(word, font_size);
        if candidate_width <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split an over-long word into pieces that each fit `width`.
/// Every piece holds at least one character.
fn break_word(word: &str, width: f32, font_size: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0.0;
    for c in word.chars() {
        let w = glyph_width(c) as f32 / 1000.0 * font_size * MM_PER_PT;
        if !piece.is_empty() && piece_width + w > width {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0.0;
        }
        piece.push(c);
        piece_width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
