use crate::buffer::Buffer;
use crate::mention::{detect, token_containing, token_ending_at, MentionToken, TriggerContext};

/// Where the caret sits relative to committed tokens and open triggers.
///
/// Recomputed for every event; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaretContext {
    /// Not in or at any token, no trigger
    Free,
    /// Composing an `@query`
    Triggering(TriggerContext),
    /// Exactly at a token's end
    AtTokenBoundary(MentionToken),
    /// Strictly between a token's start and end
    InsideToken(MentionToken),
}

impl CaretContext {
    pub fn classify(buffer: &Buffer, caret: usize, tokens: &[MentionToken]) -> Self {
        let caret = clamp(caret, buffer);
        if let Some(token) = token_containing(tokens, caret) {
            return CaretContext::InsideToken(token.clone());
        }
        if let Some(token) = token_ending_at(tokens, caret) {
            return CaretContext::AtTokenBoundary(token.clone());
        }
        match detect(buffer, caret, tokens) {
            Some(trigger) => CaretContext::Triggering(trigger),
            None => CaretContext::Free,
        }
    }
}

/// Clamp an offset into `[0, buffer.len_chars()]`
pub fn clamp(offset: usize, buffer: &Buffer) -> usize {
    offset.min(buffer.len_chars())
}
