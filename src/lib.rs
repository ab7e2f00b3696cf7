//! mentionpad - a mention-aware note editor
//!
//! The engine takes a plain-text buffer, a caret and a set of mentioned
//! candidates. Typing `@` followed by a partial name opens a filtered
//! candidate list; picking one commits `@Name ` as an atomic token. Tokens
//! cannot be edited partially: the caret snaps out of them and deletions
//! remove them whole, and the mention set always matches what the text
//! actually contains.
//!
//! Rendering, raw input and the directory fetch belong to the host. The
//! host reports every edit to a [`MentionEditor`] and applies the caret it
//! gets back.

pub mod buffer;
pub mod config;
pub mod directory;
pub mod editor;
pub mod mention;
pub mod session;
pub mod sink;
pub mod util;

pub use buffer::Buffer;
pub use editor::{CaretContext, DeleteDirection, EnterOutcome, MentionEditor, Outcome};
pub use mention::{Candidate, MentionRef, MentionSet, Submission};
pub use session::{FetchTicket, NoteSession};
