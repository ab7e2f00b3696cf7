use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Get the display width of a string (handling wide chars like CJK)
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string so it fits in `max_width` display columns
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, g) in s.grapheme_indices(true) {
        let w = display_width(g);
        if width + w > max_width {
            return &s[..idx];
        }
        width += w;
    }
    s
}

/// Char index in `line` drawn at display column `col`. A column past the
/// end of the line maps to the line's length.
pub fn char_at_width(line: &str, col: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in line.chars().enumerate() {
        width += display_width(ch.encode_utf8(&mut [0; 4]));
        if col < width {
            return idx;
        }
    }
    line.chars().count()
}

/// Convert a byte offset to a char index
pub fn byte_to_char_offset(s: &str, byte_idx: usize) -> usize {
    let byte_idx = byte_idx.min(s.len());
    s.char_indices().take_while(|(b, _)| *b < byte_idx).count()
}

/// Char index of the grapheme boundary preceding `char_idx`
pub fn prev_grapheme_boundary(s: &str, char_idx: usize) -> usize {
    let mut chars = 0;
    let mut prev = 0;
    for g in s.graphemes(true) {
        if chars >= char_idx {
            break;
        }
        prev = chars;
        chars += g.chars().count();
    }
    prev
}

/// Char index of the grapheme boundary following `char_idx`
pub fn next_grapheme_boundary(s: &str, char_idx: usize) -> usize {
    let mut chars = 0;
    for g in s.graphemes(true) {
        chars += g.chars().count();
        if chars > char_idx {
            return chars;
        }
    }
    chars
}
