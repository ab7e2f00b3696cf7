//! Trigger Detector and mention-shaped run matching

use std::sync::OnceLock;

use regex::Regex;

use crate::buffer::Buffer;
use crate::util::unicode::byte_to_char_offset;

use super::locator::{token_containing, MentionToken};

/// An open `@query` the caret is currently composing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerContext {
    /// Char index of the `@`
    pub anchor: usize,
    /// Lower-cased word run between the `@` and the caret
    pub query: String,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Decide whether the caret is composing a mention.
///
/// Walks back from the caret over `[A-Za-z0-9_]`; the run must be
/// preceded by `@`. Whatever precedes the `@` does not matter. A caret
/// strictly inside a committed token never triggers.
pub fn detect(buffer: &Buffer, caret: usize, tokens: &[MentionToken]) -> Option<TriggerContext> {
    let caret = caret.min(buffer.len_chars());
    if token_containing(tokens, caret).is_some() {
        return None;
    }

    let mut run_start = caret;
    while run_start > 0 {
        match buffer.char_at(run_start - 1) {
            Some(c) if is_word_char(c) => run_start -= 1,
            _ => break,
        }
    }

    if run_start == 0 || buffer.char_at(run_start - 1) != Some('@') {
        return None;
    }

    let query = buffer.slice(run_start, caret).trim().to_lowercase();
    Some(TriggerContext {
        anchor: run_start - 1,
        query,
    })
}

// `@` followed by word groups separated by single horizontal whitespace,
// optionally ending in one trailing space, anchored at the caret.
fn mention_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"@[A-Za-z0-9_]+(?:[ \t][A-Za-z0-9_]+)*[ \t]?$").expect("valid mention run pattern")
    })
}

// Partial query left behind before an unconditional insert
fn mention_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@[A-Za-z0-9_ ]*$").expect("valid mention prefix pattern"))
}

fn match_start_before(buffer: &Buffer, caret: usize, re: &Regex) -> Option<usize> {
    let caret = caret.min(buffer.len_chars());
    let before = buffer.slice(0, caret);
    re.find(&before).map(|m| byte_to_char_offset(&before, m.start()))
}

/// Start of a mention-shaped run (`@Some Name `) ending at the caret.
///
/// This matches text that merely looks like a mention, committed or not,
/// so backspace can remove a typed-out name as one unit.
pub fn mention_run_before(buffer: &Buffer, caret: usize) -> Option<usize> {
    match_start_before(buffer, caret, mention_run_re())
}

/// Start of a best-effort `@partial query` ending at the caret
pub fn mention_prefix_before(buffer: &Buffer, caret: usize) -> Option<usize> {
    match_start_before(buffer, caret, mention_prefix_re())
}
