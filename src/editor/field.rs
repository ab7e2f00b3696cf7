//! Plain text-field behaviour
//!
//! When the engine answers `Outcome::PassThrough`, the host performs the
//! ordinary edit itself. These helpers are that ordinary edit for hosts that
//! have no native text widget (the terminal host uses them). Each returns
//! the new caret.

use crate::buffer::Buffer;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

pub fn insert(buffer: &mut Buffer, caret: usize, text: &str) -> usize {
    let caret = caret.min(buffer.len_chars());
    buffer.insert(caret, text);
    caret + text.chars().count()
}

/// Delete the grapheme before the caret
pub fn backspace(buffer: &mut Buffer, caret: usize) -> usize {
    let caret = caret.min(buffer.len_chars());
    if caret == 0 {
        return 0;
    }
    let start = prev_grapheme_boundary(&buffer.to_string(), caret);
    buffer.delete(start, caret);
    start
}

/// Delete the grapheme after the caret
pub fn delete_forward(buffer: &mut Buffer, caret: usize) -> usize {
    let caret = caret.min(buffer.len_chars());
    let end = next_grapheme_boundary(&buffer.to_string(), caret);
    buffer.delete(caret, end);
    caret
}

pub fn move_left(buffer: &Buffer, caret: usize) -> usize {
    prev_grapheme_boundary(&buffer.to_string(), caret.min(buffer.len_chars()))
}

pub fn move_right(buffer: &Buffer, caret: usize) -> usize {
    next_grapheme_boundary(&buffer.to_string(), caret.min(buffer.len_chars()))
}

pub fn move_home(buffer: &Buffer, caret: usize) -> usize {
    let (line, _) = buffer.char_to_line_col(caret);
    buffer.line_col_to_char(line, 0)
}

pub fn move_end(buffer: &Buffer, caret: usize) -> usize {
    let (line, _) = buffer.char_to_line_col(caret);
    buffer.line_col_to_char(line, buffer.line_len(line))
}

pub fn move_up(buffer: &Buffer, caret: usize) -> usize {
    let (line, col) = buffer.char_to_line_col(caret);
    if line == 0 {
        return 0;
    }
    buffer.line_col_to_char(line - 1, col)
}

pub fn move_down(buffer: &Buffer, caret: usize) -> usize {
    let (line, col) = buffer.char_to_line_col(caret);
    if line + 1 >= buffer.line_count() {
        return buffer.len_chars();
    }
    buffer.line_col_to_char(line + 1, col)
}
