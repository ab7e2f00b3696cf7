use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use std::fs::File;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use mentionpad::config::Config;
use mentionpad::directory::{Directory, DirectoryError};
use mentionpad::editor::{field, DeleteDirection, EnterOutcome, MentionEditor, Outcome};
use mentionpad::mention::{token_containing, Candidate, Submission};
use mentionpad::sink::{JsonLinesSink, SubmissionSink};
use mentionpad::{Buffer, FetchTicket, NoteSession};

use crate::input::{Key, Modifiers, Mouse};
use crate::render::Screen;

type FetchResult = (FetchTicket, Result<Vec<Candidate>, DirectoryError>);

/// The terminal "Add Note" modal: raw input in, engine calls, frames out
pub struct App {
    screen: Screen,
    session: NoteSession,
    directory: Arc<dyn Directory>,
    /// Where submissions go (None if the notes file could not be opened)
    sink: Option<JsonLinesSink<File>>,
    /// Pending directory fetch, answered by a worker thread
    fetch_rx: Option<Receiver<FetchResult>>,
    /// Message to display in the hint row
    message: Option<String>,
    running: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let sink = match JsonLinesSink::open(config.notes_path()) {
            Ok(sink) => Some(sink),
            Err(e) => {
                tracing::warn!(error = %e, "notes file unavailable, submissions will only be logged");
                None
            }
        };

        Ok(Self {
            screen: Screen::new()?,
            session: NoteSession::new(config.fallback_candidates()),
            directory: config.directory(),
            sink,
            fetch_rx: None,
            message: None,
            running: true,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.screen.enter_raw_mode()?;
        self.start_fetch();

        // Initial render
        self.screen.refresh_size()?;
        self.render()?;

        while self.running {
            let mut needs_render = false;

            // Poll with a short timeout so late directory results are picked up
            if event::poll(Duration::from_millis(50))? {
                self.process_event(event::read()?)?;
                needs_render = true;

                // Process any additional queued events before rendering
                while event::poll(Duration::from_millis(0))? {
                    self.process_event(event::read()?)?;
                }
            }

            if self.process_fetch() {
                needs_render = true;
            }

            if needs_render && self.running {
                self.screen.refresh_size()?;
                self.render()?;
            }
        }

        self.session.reset();
        self.screen.leave_raw_mode()?;
        Ok(())
    }

    fn editor(&self) -> &MentionEditor {
        self.session.editor()
    }

    fn editor_mut(&mut self) -> &mut MentionEditor {
        self.session.editor_mut()
    }

    fn render(&mut self) -> Result<()> {
        let message = self.message.clone();
        self.screen.render(self.session.editor(), message.as_deref())
    }

    /// Ask the directory for candidates on a worker thread, once per session
    fn start_fetch(&mut self) {
        let Some(ticket) = self.session.begin_fetch() else {
            return;
        };
        let directory = Arc::clone(&self.directory);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send((ticket, directory.fetch_candidates()));
        });
        self.fetch_rx = Some(rx);
    }

    /// Hand a finished fetch to the session. Returns true if it changed anything.
    fn process_fetch(&mut self) -> bool {
        let Some(rx) = &self.fetch_rx else {
            return false;
        };
        match rx.try_recv() {
            Ok((ticket, result)) => {
                self.fetch_rx = None;
                self.session.finish_fetch(ticket, result)
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.fetch_rx = None;
                false
            }
        }
    }

    fn process_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key_event) => self.process_key(key_event),
            Event::Mouse(mouse_event) => self.process_mouse(mouse_event),
            Event::Paste(text) => {
                self.paste(&text);
                Ok(())
            }
            Event::Resize(cols, rows) => {
                self.screen.cols = cols;
                self.screen.rows = rows;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn process_key(&mut self, key_event: KeyEvent) -> Result<()> {
        if key_event.kind == KeyEventKind::Release {
            return Ok(());
        }
        let Some((key, mods)) = Key::from_crossterm(key_event) else {
            return Ok(());
        };
        self.message = None;
        self.handle_key(key, mods)
    }

    fn handle_key(&mut self, key: Key, mods: Modifiers) -> Result<()> {
        let dropdown_open = self.editor().dropdown().is_visible();
        let has_items = !self.editor().dropdown().items().is_empty();

        match (&key, mods) {
            (Key::Char('q'), Modifiers { ctrl: true, .. }) => self.running = false,
            (Key::Char('c'), Modifiers { ctrl: true, .. }) => self.running = false,
            // Toolbar-style "add mention" without typing '@'
            (Key::Char(' '), Modifiers { ctrl: true, .. }) => self.editor_mut().open_picker(),
            (Key::Char('s'), Modifiers { ctrl: true, .. }) => {
                if let Some(submission) = self.editor_mut().submit() {
                    self.deliver(submission);
                }
            }
            (Key::Escape, _) => {
                if dropdown_open {
                    self.editor_mut().close_dropdown();
                } else {
                    self.running = false;
                }
            }
            (Key::Enter, Modifiers { shift: true, .. }) | (Key::Enter, Modifiers { alt: true, .. }) => {
                self.type_char('\n');
            }
            (Key::Enter, _) => match self.editor_mut().on_enter() {
                EnterOutcome::Submitted(submission) => self.deliver(submission),
                EnterOutcome::Inserted(_) | EnterOutcome::Ignored => {}
            },
            (Key::Tab, _) => {
                self.editor_mut().insert_highlighted();
            }
            (Key::Up, _) if dropdown_open && has_items => self.editor_mut().move_highlight(-1),
            (Key::Down, _) if dropdown_open && has_items => self.editor_mut().move_highlight(1),
            (Key::Up, _) => self.move_caret(field::move_up),
            (Key::Down, _) => self.move_caret(field::move_down),
            (Key::Left, _) => self.move_caret_left(),
            (Key::Right, _) => self.move_caret(field::move_right),
            (Key::Home, _) => self.move_caret(field::move_home),
            (Key::End, _) => self.move_caret(field::move_end),
            (Key::Backspace, _) => self.delete(DeleteDirection::Backward),
            (Key::Delete, _) => self.delete(DeleteDirection::Forward),
            (Key::Char(c), Modifiers { ctrl: false, .. }) => self.type_char(*c),
            _ => {}
        }

        Ok(())
    }

    fn type_char(&mut self, c: char) {
        if self.editor_mut().on_typing_key(c) != Outcome::PassThrough {
            return;
        }
        let mut buffer = self.editor().buffer().clone();
        let caret = field::insert(&mut buffer, self.editor().caret(), &c.to_string());
        self.editor_mut().on_text_change(buffer, caret);
    }

    fn paste(&mut self, text: &str) {
        let Some(first) = text.chars().next() else {
            return;
        };
        if self.editor_mut().on_typing_key(first) != Outcome::PassThrough {
            return;
        }
        let text = text.replace("\r\n", "\n");
        let mut buffer = self.editor().buffer().clone();
        let caret = field::insert(&mut buffer, self.editor().caret(), &text);
        self.editor_mut().on_text_change(buffer, caret);
    }

    fn delete(&mut self, direction: DeleteDirection) {
        if self.editor_mut().on_delete_key(direction) != Outcome::PassThrough {
            return;
        }
        let mut buffer = self.editor().buffer().clone();
        let caret = self.editor().caret();
        let caret = match direction {
            DeleteDirection::Backward => field::backspace(&mut buffer, caret),
            DeleteDirection::Forward => field::delete_forward(&mut buffer, caret),
        };
        self.editor_mut().on_text_change(buffer, caret);
    }

    fn move_caret(&mut self, motion: fn(&Buffer, usize) -> usize) {
        let target = motion(self.editor().buffer(), self.editor().caret());
        self.editor_mut().on_caret_move(target);
    }

    /// Stepping left into a token lands on its start; the engine would
    /// otherwise snap the caret straight back to the end.
    fn move_caret_left(&mut self) {
        let target = field::move_left(self.editor().buffer(), self.editor().caret());
        let tokens = self.editor().tokens();
        let target = token_containing(&tokens, target).map_or(target, |t| t.start);
        self.editor_mut().on_caret_move(target);
    }

    fn process_mouse(&mut self, mouse_event: MouseEvent) -> Result<()> {
        if let Some(mouse) = Mouse::from_crossterm(mouse_event) {
            self.handle_mouse(mouse);
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: Mouse) {
        let layout = self.screen.layout(self.editor());

        match mouse {
            Mouse::Hover { col, row } => {
                if let Some(index) = layout.dropdown_item_at(self.editor(), col, row) {
                    self.editor_mut().set_highlight(index);
                }
            }
            Mouse::Click { col, row } => {
                if let Some(index) = layout.dropdown_item_at(self.editor(), col, row) {
                    self.editor_mut().insert_at(index);
                } else if let Some(offset) = layout.caret_at(self.editor(), col, row) {
                    self.editor_mut().on_caret_move(offset);
                } else if layout.button.contains(col, row) {
                    if let Some(submission) = self.editor_mut().submit() {
                        self.deliver(submission);
                    }
                } else if col == layout.frame.x + layout.frame.width - 3 && row == layout.frame.y {
                    self.running = false;
                }
            }
        }
    }

    fn deliver(&mut self, submission: Submission) {
        tracing::info!(
            text = %submission.text,
            mentions = submission.mentions.len(),
            "note submitted"
        );
        let result = match self.sink.as_mut() {
            Some(sink) => sink.deliver(&submission),
            None => Ok(()),
        };
        self.message = Some(match result {
            Ok(()) => format!("Note added ({} mentioned)", submission.mentions.len()),
            Err(e) => {
                tracing::error!(error = %e, "failed to store note");
                format!("Could not store note: {}", e)
            }
        });
    }
}
