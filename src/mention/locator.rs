//! Token Locator
//!
//! Token ranges are never stored. They are recomputed from the buffer and
//! the mention set whenever a caller needs them, so free-form edits can
//! never leave a stale offset behind.

use crate::buffer::Buffer;

use super::{Candidate, MentionSet};

/// A committed mention's span `[start, end)` in the current buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionToken {
    pub candidate_id: String,
    pub start: usize,
    pub end: usize,
}

impl MentionToken {
    /// Caret strictly between `start` and `end`
    pub fn contains_strictly(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end
    }

    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }
}

/// Every token occurrence for `mentions` in `buffer`, sorted by start.
///
/// Candidates are scanned in insertion order. When two candidates' token
/// texts would overlap, the span belongs to whichever was inserted first.
pub fn locate(buffer: &Buffer, mentions: &MentionSet) -> Vec<MentionToken> {
    let mut tokens: Vec<MentionToken> = Vec::new();

    for candidate in mentions.iter() {
        let token_len = candidate.token_text().chars().count();
        for start in buffer.find_all(&candidate.token_text()) {
            let end = start + token_len;
            if tokens.iter().any(|t| t.overlaps(start, end)) {
                continue;
            }
            tokens.push(MentionToken {
                candidate_id: candidate.id.clone(),
                start,
                end,
            });
        }
    }

    tokens.sort_by_key(|t| t.start);
    tokens
}

/// Drop every mention that no longer owns a token range in the buffer,
/// either because its text is gone or because an earlier mention's token
/// covers every occurrence. Returns the removed candidates.
pub fn prune_stale(buffer: &Buffer, mentions: &mut MentionSet) -> Vec<Candidate> {
    let tokens = locate(buffer, mentions);
    let mut removed = Vec::new();
    mentions.retain(|c| {
        let present = tokens.iter().any(|t| t.candidate_id == c.id);
        if !present {
            removed.push(c.clone());
        }
        present
    });
    removed
}

/// Token with `start < offset < end`, if any
pub fn token_containing(tokens: &[MentionToken], offset: usize) -> Option<&MentionToken> {
    tokens.iter().find(|t| t.contains_strictly(offset))
}

/// Token whose `end` is exactly `offset`, if any
pub fn token_ending_at(tokens: &[MentionToken], offset: usize) -> Option<&MentionToken> {
    tokens.iter().find(|t| t.end == offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(candidates: &[(&str, &str)]) -> MentionSet {
        let mut set = MentionSet::new();
        for (id, name) in candidates {
            set.insert(Candidate::new(*id, *name));
        }
        set
    }

    #[test]
    fn test_locate_sorted_by_start() {
        let buf = Buffer::from_str("@Carole Kim and @Carole Mutemi");
        let mentions = set(&[("2", "Carole Mutemi"), ("4", "Carole Kim")]);
        let tokens = locate(&buf, &mentions);
        assert_eq!(
            tokens,
            vec![
                MentionToken { candidate_id: "4".into(), start: 0, end: 11 },
                MentionToken { candidate_id: "2".into(), start: 16, end: 30 },
            ]
        );
    }

    #[test]
    fn test_locate_finds_repeated_tokens() {
        let buf = Buffer::from_str("@Ann then @Ann again");
        let tokens = locate(&buf, &set(&[("9", "Ann")]));
        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[1].start, tokens[1].end), (10, 14));
    }

    #[test]
    fn test_overlap_goes_to_earlier_insertion() {
        let buf = Buffer::from_str("hi @Carole Kim ");
        let mentions = set(&[("6", "Carole"), ("4", "Carole Kim")]);
        let tokens = locate(&buf, &mentions);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].candidate_id, "6");
        assert_eq!((tokens[0].start, tokens[0].end), (3, 10));
    }

    #[test]
    fn test_prune_stale_removes_missing_tokens() {
        let buf = Buffer::from_str("ping @Carole Kim");
        let mut mentions = set(&[("2", "Carole Mutemi"), ("4", "Carole Kim")]);
        let removed = prune_stale(&buf, &mut mentions);
        assert_eq!(removed, vec![Candidate::new("2", "Carole Mutemi")]);
        assert!(mentions.contains("4"));
    }

    #[test]
    fn test_prune_drops_mention_shadowed_by_earlier_token() {
        let buf = Buffer::from_str("hi @Carole Kim ");
        let mut mentions = set(&[("6", "Carole"), ("4", "Carole Kim")]);
        let removed = prune_stale(&buf, &mut mentions);
        assert_eq!(removed, vec![Candidate::new("4", "Carole Kim")]);
        assert!(mentions.contains("6"));
    }

    #[test]
    fn test_caret_classification_helpers() {
        let buf = Buffer::from_str("a @Ann b");
        let tokens = locate(&buf, &set(&[("9", "Ann")]));
        assert!(token_containing(&tokens, 2).is_none());
        assert!(token_containing(&tokens, 3).is_some());
        assert!(token_containing(&tokens, 6).is_none());
        assert!(token_ending_at(&tokens, 6).is_some());
    }
}
