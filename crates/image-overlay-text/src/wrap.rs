//! Fixed-heuristic word wrap for overlay text.
//!
//! Glyph size and line breaks both derive from the canvas width alone:
//! text renders at one tenth of the width and the wrap estimate charges
//! each character half a glyph. Tuned for short annotation strings, not
//! general typesetting.

/// A wrapped block of text with its canvas geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLayout {
    /// Glyph size in pixels: one tenth of the canvas width.
    pub font_px: u32,
    /// Lines top to bottom. Wrapped lines keep a trailing space after
    /// every word; a block that never needed wrapping is the input
    /// verbatim.
    pub lines: Vec<String>,
    /// Canvas width in pixels, as requested.
    pub width: u32,
    /// Canvas height in pixels: `(lines + 0.5) * font_px`, truncated.
    pub height: u32,
}

/// Lay out `text` for a canvas `width` pixels wide.
///
/// Wrapping only kicks in when the whole string at one character per
/// `font_px` would overflow the width. The packer then walks words,
/// charging `chars + 1` per word, and opens a new line once the running
/// total at half a glyph per character exceeds the width. A first word
/// that overflows on its own opens the block with an empty line.
pub fn layout_text(text: &str, width: u32) -> TextLayout {
    let font_px = width / 10;
    let total_chars = text.chars().count() as u64;

    let lines = if total_chars * u64::from(font_px) >= u64::from(width) {
        wrap_words(text, width, font_px)
    } else {
        vec![text.to_owned()]
    };

    let height = ((lines.len() as f64 + 0.5) * f64::from(font_px)) as u32;
    TextLayout {
        font_px,
        lines,
        width,
        height,
    }
}

fn wrap_words(text: &str, width: u32, font_px: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut count: u64 = 0;
    for word in text.split_whitespace() {
        let charge = word.chars().count() as u64 + 1;
        count += charge;
        if (count * u64::from(font_px)) as f64 * 0.5 - 1.0 > f64::from(width) {
            lines.push(std::mem::take(&mut line));
            count = charge;
        }
        line.push_str(word);
        line.push(' ');
    }
    lines.push(line);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_stays_on_one_line_verbatim() {
        let layout = layout_text("short", 100);
        assert_eq!(layout.font_px, 10);
        assert_eq!(layout.lines, vec!["short".to_owned()]);
        assert_eq!(layout.width, 100);
        assert_eq!(layout.height, 15);
    }

    #[test]
    fn long_text_wraps_greedily_with_trailing_spaces() {
        let layout = layout_text("sample text for overlay", 240);
        assert_eq!(layout.font_px, 24);
        assert_eq!(
            layout.lines,
            vec!["sample text for ".to_owned(), "overlay ".to_owned()]
        );
        assert_eq!(layout.height, 60);
    }

    #[test]
    fn first_word_overflow_opens_with_an_empty_line() {
        let layout = layout_text("supercalifragilistic word", 30);
        assert_eq!(layout.font_px, 3);
        assert_eq!(
            layout.lines,
            vec![
                String::new(),
                "supercalifragilistic ".to_owned(),
                "word ".to_owned()
            ]
        );
        // 3.5 lines at 3 px truncate to 10
        assert_eq!(layout.height, 10);
    }

    #[test]
    fn wrap_estimate_counts_characters_not_bytes() {
        // each word is 6 characters but 12 bytes; charging bytes would
        // split the block in two
        let layout = layout_text("ääääää ääääää ääääää", 20);
        assert_eq!(layout.lines, vec!["ääääää ääääää ääääää ".to_owned()]);
    }

    #[test]
    fn whitespace_only_input_collapses_to_one_empty_line() {
        let layout = layout_text("                    ", 10);
        assert_eq!(layout.lines, vec![String::new()]);
        assert_eq!(layout.height, 1);
    }

    #[test]
    fn fractional_height_truncates() {
        // one line at 9 px: 1.5 * 9 = 13.5
        let layout = layout_text("hey", 90);
        assert_eq!(layout.height, 13);
    }
}
