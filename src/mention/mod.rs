//! Mention primitives
//!
//! A mention is committed as the literal text `@` + display name. Nothing
//! else marks it in the buffer: token ranges are derived from the text and
//! the set of mentioned candidates each time they are needed.

mod candidate;
mod filter;
mod locator;
mod trigger;

pub use candidate::{fallback_candidates, Candidate, MentionRef, MentionSet, Submission};
pub use filter::filter;
pub use locator::{locate, prune_stale, token_containing, token_ending_at, MentionToken};
pub use trigger::{detect, mention_prefix_before, mention_run_before, TriggerContext};
