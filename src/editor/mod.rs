//! The mention editor state machine and the pieces it is built from

mod caret;
mod dropdown;
pub mod field;
mod state;

pub use caret::{clamp, CaretContext};
pub use dropdown::Dropdown;
pub use state::{DeleteDirection, EditorState, EnterOutcome, MentionEditor, Outcome};
