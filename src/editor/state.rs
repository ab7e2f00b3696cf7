use tracing::{debug, trace};

use crate::buffer::Buffer;
use crate::mention::{
    self, locate, mention_prefix_before, mention_run_before, prune_stale, token_containing, Candidate,
    MentionSet, MentionToken, Submission, TriggerContext,
};

use super::caret::{clamp, CaretContext};
use super::Dropdown;

/// Direction of a delete key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDirection {
    /// Backspace
    Backward,
    /// Delete
    Forward,
}

/// What the host must do after handing an input to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The engine rewrote the buffer; re-render and put the caret here
    Handled { caret: usize },
    /// The keystroke was swallowed and the caret snapped here
    Blocked { caret: usize },
    /// Not the engine's concern: apply the native edit, then report it
    /// through `on_text_change`
    PassThrough,
}

/// Result of the Enter key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterOutcome {
    /// The highlighted candidate was inserted
    Inserted(Outcome),
    /// The note was submitted and the editor reset
    Submitted(Submission),
    /// Nothing to insert and nothing to submit
    Ignored,
}

/// Buffer, caret, open trigger and mentioned candidates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub buffer: Buffer,
    pub caret: usize,
    pub trigger: Option<TriggerContext>,
    pub mentions: MentionSet,
}

/// Mention-aware editing engine.
///
/// Keeps the buffer, caret and mention set mutually consistent: committed
/// tokens are atomic, and a mention whose token text no longer appears in
/// the buffer is dropped after every edit routed through here.
#[derive(Debug, Clone, Default)]
pub struct MentionEditor {
    state: EditorState,
    /// Full directory, in directory order
    candidates: Vec<Candidate>,
    dropdown: Dropdown,
}

impl MentionEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn buffer(&self) -> &Buffer {
        &self.state.buffer
    }

    pub fn text(&self) -> String {
        self.state.buffer.to_string()
    }

    pub fn caret(&self) -> usize {
        self.state.caret
    }

    pub fn trigger(&self) -> Option<&TriggerContext> {
        self.state.trigger.as_ref()
    }

    pub fn mentions(&self) -> &MentionSet {
        &self.state.mentions
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Committed token ranges in the current buffer
    pub fn tokens(&self) -> Vec<MentionToken> {
        locate(&self.state.buffer, &self.state.mentions)
    }

    pub fn context(&self) -> CaretContext {
        CaretContext::classify(&self.state.buffer, self.state.caret, &self.tokens())
    }

    /// Replace the directory. If the dropdown is open its list is filtered
    /// again and the highlight returns to the first row.
    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) -> bool {
        self.candidates = candidates;
        if !self.dropdown.is_visible() {
            return false;
        }
        let query = self.state.trigger.as_ref().map(|t| t.query.as_str()).unwrap_or("");
        let items = mention::filter(&self.candidates, query, &self.state.mentions);
        self.dropdown.open(items);
        true
    }

    /// Report a buffer/caret change made outside the engine (typing, paste,
    /// native deletion, programmatic edits).
    pub fn on_text_change(&mut self, buffer: Buffer, caret: usize) {
        self.state.buffer = buffer;
        self.state.caret = clamp(caret, &self.state.buffer);
        self.prune();
        // A native edit can complete a token around the caret
        let tokens = self.tokens();
        if let Some(token) = token_containing(&tokens, self.state.caret) {
            self.state.caret = token.end;
        }
        self.refresh_trigger();
    }

    /// Move the caret (click, arrows, selection). A caret landing inside a
    /// token is snapped to the token's end. Returns the final caret.
    pub fn on_caret_move(&mut self, caret: usize) -> usize {
        let caret = clamp(caret, &self.state.buffer);
        let tokens = self.tokens();
        let caret = token_containing(&tokens, caret).map_or(caret, |t| t.end);
        self.state.caret = caret;

        let trigger = mention::detect(&self.state.buffer, caret, &tokens);
        if trigger != self.state.trigger {
            self.apply_trigger(trigger);
        }
        caret
    }

    /// A printable keystroke. Typing inside a token is refused.
    pub fn on_typing_key(&mut self, ch: char) -> Outcome {
        match self.context() {
            CaretContext::InsideToken(token) => {
                trace!(?ch, token = %token.candidate_id, "keystroke inside mention refused");
                let caret = self.on_caret_move(token.end);
                Outcome::Blocked { caret }
            }
            _ => Outcome::PassThrough,
        }
    }

    pub fn on_delete_key(&mut self, direction: DeleteDirection) -> Outcome {
        let caret = self.state.caret;
        match (self.context(), direction) {
            (CaretContext::InsideToken(token), _) => self.remove_token(&token),
            (CaretContext::AtTokenBoundary(token), DeleteDirection::Backward) => self.remove_token(&token),
            (_, DeleteDirection::Backward) => match self.uncommitted_run_before(caret) {
                Some(start) => self.remove_run(start, caret),
                None => Outcome::PassThrough,
            },
            (_, DeleteDirection::Forward) => Outcome::PassThrough,
        }
    }

    /// Commit `candidate` as a token at the caret.
    ///
    /// With an open trigger, the `@query` is replaced. Without one (the
    /// toolbar flow), any `@partial` immediately before the caret is
    /// replaced, or the token is inserted at the caret.
    pub fn insert_mention(&mut self, candidate: &Candidate) -> Outcome {
        let caret = self.state.caret;
        let start = match &self.state.trigger {
            Some(trigger) => trigger.anchor.min(caret),
            None => {
                // The prefix may not reach back into a committed token
                let tokens = self.tokens();
                mention_prefix_before(&self.state.buffer, caret)
                    .filter(|&s| !tokens.iter().any(|t| t.start < caret && s < t.end))
                    .unwrap_or(caret)
            }
        };

        let text = format!("{} ", candidate.token_text());
        self.state.buffer.delete(start, caret);
        self.state.buffer.insert(start, &text);
        self.state.caret = start + text.chars().count();

        if self.state.mentions.insert(candidate.clone()) {
            debug!(id = %candidate.id, name = %candidate.display_name, "mention added");
        }
        self.prune();
        self.state.trigger = None;
        self.dropdown.close();

        Outcome::Handled {
            caret: self.state.caret,
        }
    }

    /// Insert the highlighted dropdown row
    pub fn insert_highlighted(&mut self) -> Option<Outcome> {
        let candidate = self.dropdown.highlighted()?.clone();
        Some(self.insert_mention(&candidate))
    }

    /// Insert a dropdown row by index (pointer click)
    pub fn insert_at(&mut self, index: usize) -> Option<Outcome> {
        let candidate = self.dropdown.item(index)?.clone();
        Some(self.insert_mention(&candidate))
    }

    pub fn move_highlight(&mut self, delta: isize) {
        self.dropdown.move_highlight(delta);
    }

    pub fn set_highlight(&mut self, index: usize) -> bool {
        self.dropdown.set_highlight(index)
    }

    /// Open the dropdown with every candidate not yet mentioned, without
    /// any trigger in the text
    pub fn open_picker(&mut self) {
        let items = mention::filter(&self.candidates, "", &self.state.mentions);
        self.dropdown.open(items);
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown.close();
    }

    /// Enter: pick the highlighted candidate if the dropdown offers one,
    /// otherwise submit.
    pub fn on_enter(&mut self) -> EnterOutcome {
        if let Some(outcome) = self.insert_highlighted() {
            return EnterOutcome::Inserted(outcome);
        }
        match self.submit() {
            Some(submission) => EnterOutcome::Submitted(submission),
            None => EnterOutcome::Ignored,
        }
    }

    /// Produce the payload and reset. Refused while the trimmed text is empty.
    pub fn submit(&mut self) -> Option<Submission> {
        let text = self.state.buffer.to_string().trim().to_string();
        if text.is_empty() {
            return None;
        }
        let submission = Submission {
            text,
            mentions: self.state.mentions.to_refs(),
        };
        debug!(mentions = submission.mentions.len(), "note submitted");
        self.reset();
        Some(submission)
    }

    /// Clear buffer, caret, trigger, mentions and dropdown. The directory is kept.
    pub fn reset(&mut self) {
        self.state = EditorState::default();
        self.dropdown.close();
    }

    fn remove_token(&mut self, token: &MentionToken) -> Outcome {
        let start = token.start;
        self.state.buffer.delete(start, token.end);

        // Collapse the double space left between the neighbours
        if start > 0
            && self.state.buffer.char_at(start - 1) == Some(' ')
            && self.state.buffer.char_at(start) == Some(' ')
        {
            self.state.buffer.delete(start, start + 1);
        }

        debug!(id = %token.candidate_id, start, end = token.end, "mention token deleted");
        self.finish_removal(start)
    }

    /// Start of a mention-shaped run ending at `caret` that leaves committed
    /// text alone. A token followed only by its trailing space still counts.
    fn uncommitted_run_before(&self, caret: usize) -> Option<usize> {
        let start = mention_run_before(&self.state.buffer, caret)?;
        let clear = self
            .tokens()
            .iter()
            .filter(|t| t.start < caret && start < t.end)
            .all(|t| t.start == start && caret <= t.end + 1);
        clear.then_some(start)
    }

    fn remove_run(&mut self, start: usize, end: usize) -> Outcome {
        debug!(start, end, "mention-shaped run deleted");
        self.state.buffer.delete(start, end);
        self.finish_removal(start)
    }

    fn finish_removal(&mut self, caret: usize) -> Outcome {
        self.state.caret = clamp(caret, &self.state.buffer);
        self.prune();
        self.refresh_trigger();
        Outcome::Handled {
            caret: self.state.caret,
        }
    }

    fn prune(&mut self) {
        for removed in prune_stale(&self.state.buffer, &mut self.state.mentions) {
            debug!(id = %removed.id, name = %removed.display_name, "mention dropped");
        }
    }

    fn refresh_trigger(&mut self) {
        let trigger = mention::detect(&self.state.buffer, self.state.caret, &self.tokens());
        self.apply_trigger(trigger);
    }

    fn apply_trigger(&mut self, trigger: Option<TriggerContext>) {
        match &trigger {
            Some(t) => {
                trace!(anchor = t.anchor, query = %t.query, "trigger active");
                let items = mention::filter(&self.candidates, &t.query, &self.state.mentions);
                self.dropdown.open(items);
            }
            None => self.dropdown.close(),
        }
        self.state.trigger = trigger;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::field;
    use crate::mention::{fallback_candidates, MentionRef};

    fn editor() -> MentionEditor {
        MentionEditor::with_candidates(fallback_candidates())
    }

    /// Type characters one at a time the way a host would
    fn type_str(ed: &mut MentionEditor, s: &str) {
        for ch in s.chars() {
            if ed.on_typing_key(ch) == Outcome::PassThrough {
                let mut buf = ed.buffer().clone();
                let caret = field::insert(&mut buf, ed.caret(), &ch.to_string());
                ed.on_text_change(buf, caret);
            }
        }
    }

    fn set_text(ed: &mut MentionEditor, text: &str, caret: usize) {
        ed.on_text_change(Buffer::from_str(text), caret);
    }

    /// Put the caret somewhere without the snap applied by edits and moves
    fn place_caret(ed: &mut MentionEditor, offset: usize) {
        ed.state.caret = offset;
    }

    fn mention(ed: &mut MentionEditor, id: &str) {
        let candidate = ed.candidates().iter().find(|c| c.id == id).unwrap().clone();
        ed.insert_mention(&candidate);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut ed = editor();
        type_str(&mut ed, "Ping @car");
        assert!(ed.dropdown().is_visible());
        assert_eq!(ed.trigger().unwrap().query, "car");
        assert_eq!(ed.dropdown().items().len(), 4);
        assert_eq!(ed.dropdown().highlighted().unwrap().display_name, "Carole Mutemi");

        let outcome = ed.on_enter();
        assert_eq!(outcome, EnterOutcome::Inserted(Outcome::Handled { caret: 20 }));
        assert_eq!(ed.text(), "Ping @Carole Mutemi ");
        assert_eq!(ed.caret(), 20);
        assert!(!ed.dropdown().is_visible());
        assert_eq!(
            ed.mentions().to_refs(),
            vec![MentionRef { id: "2".into(), name: "Carole Mutemi".into() }]
        );

        match ed.on_enter() {
            EnterOutcome::Submitted(submission) => {
                assert_eq!(submission.text, "Ping @Carole Mutemi");
                assert_eq!(submission.mentions.len(), 1);
                assert_eq!(submission.mentions[0].id, "2");
            }
            other => panic!("expected submission, got {:?}", other),
        }
        assert_eq!(ed.state(), &EditorState::default());
        assert!(!ed.dropdown().is_visible());
    }

    #[test]
    fn test_idempotent_re_mention() {
        let mut ed = editor();
        mention(&mut ed, "3");
        mention(&mut ed, "3");
        assert_eq!(ed.text(), "@Carole Wanjiku @Carole Wanjiku ");
        assert_eq!(ed.mentions().len(), 1);
    }

    #[test]
    fn test_typing_inside_token_is_refused() {
        let mut ed = editor();
        type_str(&mut ed, "hi @carole");
        ed.on_enter();
        assert_eq!(ed.text(), "hi @Carole Mutemi ");

        for offset in 4..17 {
            place_caret(&mut ed, offset);
            assert_eq!(ed.on_typing_key('x'), Outcome::Blocked { caret: 17 });
            assert_eq!(ed.text(), "hi @Carole Mutemi ");
            assert_eq!(ed.caret(), 17);
        }
    }

    #[test]
    fn test_typing_at_token_edges_passes_through() {
        let mut ed = editor();
        mention(&mut ed, "4");
        ed.on_caret_move(0);
        assert_eq!(ed.on_typing_key('x'), Outcome::PassThrough);
        ed.on_caret_move(11);
        assert_eq!(ed.on_typing_key('x'), Outcome::PassThrough);
    }

    #[test]
    fn test_caret_move_snaps_to_token_end() {
        let mut ed = editor();
        set_text(&mut ed, "a ", 2);
        mention(&mut ed, "4");
        assert_eq!(ed.text(), "a @Carole Kim ");
        assert_eq!(ed.on_caret_move(5), 13);
        assert_eq!(ed.on_caret_move(2), 2);
        assert_eq!(ed.on_caret_move(999), 14);
    }

    #[test]
    fn test_backspace_at_token_end_removes_whole_token() {
        let mut ed = editor();
        set_text(&mut ed, "Ping ", 5);
        mention(&mut ed, "2");
        type_str(&mut ed, "now");
        // "Ping @Carole Mutemi now", caret at token end
        ed.on_caret_move(19);
        assert_eq!(ed.on_delete_key(DeleteDirection::Backward), Outcome::Handled { caret: 5 });
        assert_eq!(ed.text(), "Ping now");
        assert!(ed.mentions().is_empty());
    }

    #[test]
    fn test_backspace_keeps_mention_when_another_occurrence_remains() {
        let mut ed = editor();
        mention(&mut ed, "2");
        let text = format!("{}and @Carole Mutemi", ed.text());
        set_text(&mut ed, &text, 14);
        assert_eq!(ed.on_delete_key(DeleteDirection::Backward), Outcome::Handled { caret: 0 });
        assert_eq!(ed.text(), " and @Carole Mutemi");
        assert!(ed.mentions().contains("2"));

        ed.on_caret_move(19);
        ed.on_delete_key(DeleteDirection::Backward);
        assert_eq!(ed.text(), " and ");
        assert!(ed.mentions().is_empty());
    }

    #[test]
    fn test_delete_inside_token_either_direction() {
        for direction in [DeleteDirection::Backward, DeleteDirection::Forward] {
            let mut ed = editor();
            set_text(&mut ed, "x ", 2);
            mention(&mut ed, "4");
            type_str(&mut ed, "y");
            // "x @Carole Kim y"
            place_caret(&mut ed, 6);
            assert_eq!(ed.on_delete_key(direction), Outcome::Handled { caret: 2 });
            assert_eq!(ed.text(), "x y");
            assert!(ed.mentions().is_empty());
        }
    }

    #[test]
    fn test_forward_delete_at_token_end_passes_through() {
        let mut ed = editor();
        mention(&mut ed, "4");
        ed.on_caret_move(11);
        assert_eq!(ed.on_delete_key(DeleteDirection::Forward), Outcome::PassThrough);
    }

    #[test]
    fn test_backspace_after_trailing_space_removes_token_and_space() {
        let mut ed = editor();
        set_text(&mut ed, "Ping ", 5);
        mention(&mut ed, "2");
        assert_eq!(ed.on_delete_key(DeleteDirection::Backward), Outcome::Handled { caret: 5 });
        assert_eq!(ed.text(), "Ping ");
        assert!(ed.mentions().is_empty());
    }

    #[test]
    fn test_backspace_removes_typed_mention_shaped_run() {
        let mut ed = editor();
        set_text(&mut ed, "cc @Some Name", 13);
        assert_eq!(ed.on_delete_key(DeleteDirection::Backward), Outcome::Handled { caret: 3 });
        assert_eq!(ed.text(), "cc ");

        // The run absorbs every following word group up to the caret
        set_text(&mut ed, "@carol said hi", 14);
        ed.on_delete_key(DeleteDirection::Backward);
        assert_eq!(ed.text(), "");

        set_text(&mut ed, "plain words", 11);
        assert_eq!(ed.on_delete_key(DeleteDirection::Backward), Outcome::PassThrough);
    }

    #[test]
    fn test_backspace_after_words_following_a_mention_deletes_one_char() {
        let mut ed = editor();
        set_text(&mut ed, "Ping ", 5);
        mention(&mut ed, "2");
        type_str(&mut ed, "thanks");
        assert_eq!(ed.text(), "Ping @Carole Mutemi thanks");
        assert_eq!(ed.on_delete_key(DeleteDirection::Backward), Outcome::PassThrough);

        let mut buf = ed.buffer().clone();
        let caret = field::backspace(&mut buf, ed.caret());
        ed.on_text_change(buf, caret);
        assert_eq!(ed.text(), "Ping @Carole Mutemi thank");
        assert!(ed.mentions().contains("2"));
    }

    #[test]
    fn test_backspace_on_open_trigger_closes_dropdown() {
        let mut ed = editor();
        type_str(&mut ed, "hey @ca");
        assert!(ed.dropdown().is_visible());
        ed.on_delete_key(DeleteDirection::Backward);
        assert_eq!(ed.text(), "hey ");
        assert!(!ed.dropdown().is_visible());
        assert!(ed.trigger().is_none());
    }

    #[test]
    fn test_native_edit_breaking_token_prunes_mention() {
        let mut ed = editor();
        mention(&mut ed, "4");
        let mut buf = ed.buffer().clone();
        let caret = field::delete_forward(&mut buf, 0);
        ed.on_text_change(buf, caret);
        assert_eq!(ed.text(), "Carole Kim ");
        assert!(ed.mentions().is_empty());
    }

    #[test]
    fn test_mentioned_candidates_are_filtered_out() {
        let mut ed = editor();
        mention(&mut ed, "2");
        type_str(&mut ed, "@carole");
        let names: Vec<&str> = ed.dropdown().items().iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, vec!["Carole Wanjiku", "Carole Kim"]);
    }

    #[test]
    fn test_highlight_navigation_and_insert() {
        let mut ed = editor();
        type_str(&mut ed, "@carole ");
        assert!(!ed.dropdown().is_visible());

        set_text(&mut ed, "@car", 4);
        assert_eq!(ed.dropdown().items().len(), 4);
        ed.move_highlight(-1);
        assert_eq!(ed.dropdown().highlight_index(), 3);
        ed.move_highlight(1);
        ed.move_highlight(1);
        assert_eq!(ed.dropdown().highlight_index(), 1);
        ed.insert_highlighted();
        assert_eq!(ed.text(), "@Carole Wanjiku ");
    }

    #[test]
    fn test_empty_dropdown_enter_falls_through_to_submit() {
        let mut ed = editor();
        type_str(&mut ed, "hi @zz");
        assert!(ed.dropdown().is_visible());
        assert!(ed.dropdown().items().is_empty());
        match ed.on_enter() {
            EnterOutcome::Submitted(s) => assert_eq!(s.text, "hi @zz"),
            other => panic!("expected submission, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_refused_when_blank() {
        let mut ed = editor();
        set_text(&mut ed, "  \n ", 2);
        assert_eq!(ed.submit(), None);
        assert_eq!(ed.on_enter(), EnterOutcome::Ignored);
        assert_eq!(ed.text(), "  \n ");
    }

    #[test]
    fn test_submit_lists_mentions_in_insertion_order() {
        let mut ed = editor();
        mention(&mut ed, "5");
        mention(&mut ed, "1");
        let submission = ed.submit().unwrap();
        let ids: Vec<&str> = submission.mentions.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "1"]);
        assert_eq!(submission.text, "@Caroline Njeri @Abdulraheem Fareed");
    }

    #[test]
    fn test_picker_inserts_without_trigger() {
        let mut ed = editor();
        set_text(&mut ed, "cc ", 3);
        ed.open_picker();
        assert_eq!(ed.dropdown().items().len(), 5);
        assert!(ed.trigger().is_none());
        ed.move_highlight(3);
        assert_eq!(ed.insert_at(0), Some(Outcome::Handled { caret: 23 }));
        assert_eq!(ed.text(), "cc @Abdulraheem Fareed ");
        assert!(!ed.dropdown().is_visible());
    }

    #[test]
    fn test_unconditional_insert_replaces_partial_prefix() {
        let mut ed = editor();
        set_text(&mut ed, "note @carole m", 14);
        // The trigger is gone once a space was typed; the prefix still goes
        assert!(ed.trigger().is_none());
        mention(&mut ed, "2");
        assert_eq!(ed.text(), "note @Carole Mutemi ");
    }

    #[test]
    fn test_insert_keeps_text_after_caret() {
        let mut ed = editor();
        set_text(&mut ed, "hi @kim, thanks", 7);
        assert_eq!(ed.trigger().unwrap().query, "kim");
        ed.insert_highlighted();
        assert_eq!(ed.text(), "hi @Carole Kim , thanks");
        assert_eq!(ed.caret(), 15);
    }

    #[test]
    fn test_late_candidates_refresh_open_dropdown() {
        let mut ed = MentionEditor::new();
        type_str(&mut ed, "@wan");
        assert!(ed.dropdown().is_visible());
        assert!(ed.dropdown().items().is_empty());

        assert!(ed.set_candidates(fallback_candidates()));
        assert_eq!(ed.dropdown().items().len(), 1);
        assert_eq!(ed.dropdown().highlight_index(), 0);

        ed.close_dropdown();
        assert!(!ed.set_candidates(Vec::new()));
    }

    #[test]
    fn test_native_delete_forming_token_moves_caret_to_end() {
        let mut ed = editor();
        mention(&mut ed, "4");
        set_text(&mut ed, "@Carole Kim @Carole Kxim ", 21);
        assert!(ed.mentions().contains("4"));
        assert_eq!(ed.caret(), 21);

        // Forward delete of the 'x' completes a second token around the caret
        let mut buf = ed.buffer().clone();
        let caret = field::delete_forward(&mut buf, 21);
        ed.on_text_change(buf, caret);
        assert_eq!(ed.text(), "@Carole Kim @Carole Kim ");
        assert_eq!(ed.caret(), 23);
        assert!(matches!(ed.context(), CaretContext::AtTokenBoundary(ref t) if t.start == 12));
    }

    #[test]
    fn test_caret_clamped_on_text_change() {
        let mut ed = editor();
        set_text(&mut ed, "abc", 42);
        assert_eq!(ed.caret(), 3);
    }

    #[test]
    fn test_replacing_single_word_token_through_trigger() {
        let mut ed = MentionEditor::with_candidates(vec![
            Candidate::new("a", "Bob"),
            Candidate::new("b", "Alice Bobson"),
        ]);
        type_str(&mut ed, "@bo");
        ed.insert_highlighted();
        assert_eq!(ed.text(), "@Bob ");

        // At the end of "@Bob" the word run re-opens a trigger
        ed.on_caret_move(4);
        assert_eq!(ed.trigger().unwrap().query, "bob");
        let names: Vec<&str> = ed.dropdown().items().iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, vec!["Alice Bobson"]);
        ed.insert_highlighted();
        assert_eq!(ed.text(), "@Alice Bobson  ");
        assert!(!ed.mentions().contains("a"));
        assert!(ed.mentions().contains("b"));
    }
}
