//! One "Add Note" session: the editor plus the fetch-once directory guard

use tracing::{debug, warn};

use crate::directory::{Directory, DirectoryError};
use crate::editor::MentionEditor;
use crate::mention::Candidate;

/// Handle for an outstanding directory fetch.
///
/// Results are only accepted for the ticket the session is waiting on, so a
/// fetch started before `reset()` cannot land in the next session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchState {
    Idle,
    Pending(u64),
    Done,
}

#[derive(Debug)]
pub struct NoteSession {
    editor: MentionEditor,
    fallback: Vec<Candidate>,
    fetch: FetchState,
    generation: u64,
}

impl NoteSession {
    pub fn new(fallback: Vec<Candidate>) -> Self {
        Self {
            editor: MentionEditor::new(),
            fallback,
            fetch: FetchState::Idle,
            generation: 0,
        }
    }

    pub fn editor(&self) -> &MentionEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut MentionEditor {
        &mut self.editor
    }

    pub fn is_fetch_pending(&self) -> bool {
        matches!(self.fetch, FetchState::Pending(_))
    }

    /// Start the directory fetch. Returns `None` if this session already
    /// fetched or is fetching.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.fetch != FetchState::Idle {
            return None;
        }
        self.fetch = FetchState::Pending(self.generation);
        Some(FetchTicket {
            generation: self.generation,
        })
    }

    /// Deliver a fetch result. Failures and empty lists fall back to the
    /// static list. Returns false if the ticket is stale.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Candidate>, DirectoryError>,
    ) -> bool {
        if self.fetch != FetchState::Pending(ticket.generation) {
            debug!(generation = ticket.generation, "discarding stale directory result");
            return false;
        }

        let candidates = match result {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => {
                warn!("directory returned no candidates, using fallback list");
                self.fallback.clone()
            }
            Err(e) => {
                warn!(error = %e, "directory fetch failed, using fallback list");
                self.fallback.clone()
            }
        };

        debug!(count = candidates.len(), "candidates loaded");
        self.fetch = FetchState::Done;
        self.editor.set_candidates(candidates);
        true
    }

    /// Fetch synchronously from `directory`, at most once per session
    pub fn fetch_with(&mut self, directory: &dyn Directory) -> bool {
        match self.begin_fetch() {
            Some(ticket) => {
                let result = directory.fetch_candidates();
                self.finish_fetch(ticket, result)
            }
            None => false,
        }
    }

    /// End the session (modal closed or cancelled). Editor state is cleared,
    /// the directory will be fetched again, and any fetch in flight is
    /// invalidated.
    pub fn reset(&mut self) {
        self.editor = MentionEditor::new();
        self.fetch = FetchState::Idle;
        self.generation += 1;
    }
}
