use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{stdout, Stdout, Write};

use mentionpad::editor::MentionEditor;
use mentionpad::mention::MentionToken;
use mentionpad::util::unicode::{char_at_width, display_width, truncate_to_width};

// Modal color scheme (256-color palette)
const MODAL_BG: Color = Color::AnsiValue(255);           // Near-white card
const MODAL_FG: Color = Color::AnsiValue(235);           // Dark text
const TEXTAREA_BG: Color = Color::AnsiValue(231);        // White input field
const PLACEHOLDER_FG: Color = Color::AnsiValue(246);     // Gray placeholder
const MENTION_FG: Color = Color::AnsiValue(26);          // Blue committed mentions
const HIGHLIGHT_BG: Color = Color::AnsiValue(33);        // Highlighted dropdown row
const DROPDOWN_BG: Color = Color::AnsiValue(254);        // Dropdown rows

const PLACEHOLDER: &str = "Add a note to this request. Mention team members with @ to notify them.";
const DEFAULT_HINT: &str = "Enter add · Shift+Enter newline · Ctrl+Space mention · Esc close";
const BUTTON: &str = "[ Add Note ]";
const MODAL_WIDTH: u16 = 60;
const MAX_TEXT_ROWS: usize = 6;
const MAX_DROPDOWN_ROWS: usize = 6;

/// A screen rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.width && row >= self.y && row < self.y + self.height
    }
}

/// Where each part of the modal sits, for drawing and pointer hit-testing
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout {
    pub frame: Rect,
    pub textarea: Rect,
    /// First buffer line shown in the textarea
    pub text_top_line: usize,
    pub dropdown: Option<Rect>,
    /// First dropdown item shown
    pub dropdown_offset: usize,
    pub button: Rect,
    pub hint_row: u16,
}

impl Layout {
    /// Buffer char index under a textarea cell
    pub fn caret_at(&self, editor: &MentionEditor, col: u16, row: u16) -> Option<usize> {
        if !self.textarea.contains(col, row) {
            return None;
        }
        let buffer = editor.buffer();
        let line = self.text_top_line + (row - self.textarea.y) as usize;
        if line >= buffer.line_count() {
            return Some(buffer.len_chars());
        }
        let text = buffer.line_str(line).unwrap_or_default();
        let char_col = char_at_width(&text, (col - self.textarea.x) as usize);
        Some(buffer.line_col_to_char(line, char_col))
    }

    /// Dropdown item index under a cell
    pub fn dropdown_item_at(&self, editor: &MentionEditor, col: u16, row: u16) -> Option<usize> {
        let rect = self.dropdown?;
        if !rect.contains(col, row) {
            return None;
        }
        let index = self.dropdown_offset + (row - rect.y) as usize;
        (index < editor.dropdown().items().len()).then_some(index)
    }
}

/// Terminal screen renderer
pub struct Screen {
    stdout: Stdout,
    pub rows: u16,
    pub cols: u16,
    keyboard_enhanced: bool,
}

impl Screen {
    pub fn new() -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            stdout: stdout(),
            rows,
            cols,
            keyboard_enhanced: false,
        })
    }

    pub fn enter_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.stdout, EnterAlternateScreen, Hide, EnableMouseCapture, EnableBracketedPaste)?;

        // Keyboard enhancement lets Shift+Enter be told apart from Enter
        if execute!(
            self.stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )
        .is_ok()
        {
            self.keyboard_enhanced = true;
        }

        Ok(())
    }

    pub fn leave_raw_mode(&mut self) -> Result<()> {
        if self.keyboard_enhanced {
            let _ = execute!(self.stdout, PopKeyboardEnhancementFlags);
        }
        execute!(
            self.stdout,
            DisableBracketedPaste,
            DisableMouseCapture,
            Show,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn refresh_size(&mut self) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        self.cols = cols;
        self.rows = rows;
        Ok(())
    }

    pub fn layout(&self, editor: &MentionEditor) -> Layout {
        let width = MODAL_WIDTH.min(self.cols.saturating_sub(2)).max(20);
        let x = self.cols.saturating_sub(width) / 2;
        let y = 1;

        let buffer = editor.buffer();
        let text_rows = buffer.line_count().clamp(1, MAX_TEXT_ROWS);
        let (caret_line, _) = buffer.char_to_line_col(editor.caret());
        let text_top_line = caret_line.saturating_sub(text_rows - 1);

        // title, blank, label
        let textarea = Rect {
            x: x + 2,
            y: y + 3,
            width: width.saturating_sub(4),
            height: text_rows as u16,
        };

        let dropdown_state = editor.dropdown();
        let (dropdown, dropdown_offset) = if dropdown_state.is_visible() {
            let items = dropdown_state.items().len();
            let rows = items.clamp(1, MAX_DROPDOWN_ROWS);
            let offset = dropdown_state.highlight_index().saturating_sub(rows - 1);
            let rect = Rect {
                x: textarea.x,
                y: textarea.y + textarea.height,
                width: textarea.width,
                height: rows as u16,
            };
            (Some(rect), offset)
        } else {
            (None, 0)
        };

        let below = dropdown.map_or(textarea.y + textarea.height, |r| r.y + r.height);
        let button_width = BUTTON.len() as u16;
        let button = Rect {
            x: (x + width).saturating_sub(button_width + 2),
            y: below + 1,
            width: button_width,
            height: 1,
        };
        let hint_row = button.y + 2;

        Layout {
            frame: Rect {
                x,
                y,
                width,
                height: hint_row - y + 1,
            },
            textarea,
            text_top_line,
            dropdown,
            dropdown_offset,
            button,
            hint_row,
        }
    }

    /// Render the modal
    pub fn render(&mut self, editor: &MentionEditor, message: Option<&str>) -> Result<()> {
        // Hide cursor during render to prevent flicker
        execute!(self.stdout, Hide, ResetColor, Clear(ClearType::All))?;

        let layout = self.layout(editor);
        let frame = layout.frame;

        for row in frame.y..frame.y + frame.height {
            execute!(
                self.stdout,
                MoveTo(frame.x, row),
                SetBackgroundColor(MODAL_BG),
                Print(" ".repeat(frame.width as usize)),
            )?;
        }

        // Title bar
        execute!(
            self.stdout,
            MoveTo(frame.x + 2, frame.y),
            SetForegroundColor(MODAL_FG),
            SetAttribute(Attribute::Bold),
            Print("Add Note"),
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(MODAL_BG),
            SetForegroundColor(PLACEHOLDER_FG),
            MoveTo(frame.x + frame.width - 3, frame.y),
            Print("x"),
            SetForegroundColor(MODAL_FG),
            MoveTo(frame.x + 2, frame.y + 2),
            Print("Note"),
        )?;

        self.render_textarea(editor, &layout)?;
        if let Some(rect) = layout.dropdown {
            self.render_dropdown(editor, rect, layout.dropdown_offset)?;
        }

        // Add button, dimmed while there is nothing to submit
        let enabled = !editor.text().trim().is_empty();
        execute!(
            self.stdout,
            MoveTo(layout.button.x, layout.button.y),
            SetBackgroundColor(MODAL_BG),
            SetForegroundColor(if enabled { MENTION_FG } else { PLACEHOLDER_FG }),
            Print(BUTTON),
        )?;

        let hint = message.unwrap_or(DEFAULT_HINT);
        execute!(
            self.stdout,
            MoveTo(frame.x + 2, layout.hint_row),
            SetForegroundColor(PLACEHOLDER_FG),
            Print(truncate_to_width(hint, frame.width.saturating_sub(4) as usize)),
            ResetColor,
        )?;

        // Position cursor
        let buffer = editor.buffer();
        let (caret_line, caret_col) = buffer.char_to_line_col(editor.caret());
        let line = buffer.line_str(caret_line).unwrap_or_default();
        let prefix: String = line.chars().take(caret_col).collect();
        let cursor_col = (layout.textarea.x as usize + display_width(&prefix))
            .min((layout.textarea.x + layout.textarea.width) as usize);
        let cursor_row = layout.textarea.y as usize + caret_line.saturating_sub(layout.text_top_line);
        execute!(self.stdout, MoveTo(cursor_col as u16, cursor_row as u16), Show)?;

        self.stdout.flush()?;
        Ok(())
    }

    fn render_textarea(&mut self, editor: &MentionEditor, layout: &Layout) -> Result<()> {
        let area = layout.textarea;
        let buffer = editor.buffer();

        for row in 0..area.height {
            execute!(
                self.stdout,
                MoveTo(area.x, area.y + row),
                SetBackgroundColor(TEXTAREA_BG),
                Print(" ".repeat(area.width as usize)),
                MoveTo(area.x, area.y + row),
            )?;
        }

        if buffer.is_empty() {
            execute!(
                self.stdout,
                SetForegroundColor(PLACEHOLDER_FG),
                Print(truncate_to_width(PLACEHOLDER, area.width as usize)),
            )?;
            return Ok(());
        }

        let tokens = editor.tokens();
        for row in 0..area.height as usize {
            let line_idx = layout.text_top_line + row;
            let Some(line) = buffer.line_str(line_idx) else {
                break;
            };
            let line_start = buffer.line_col_to_char(line_idx, 0);
            execute!(self.stdout, MoveTo(area.x, area.y + row as u16))?;
            self.render_line_with_mentions(&line, line_start, area.width as usize, &tokens)?;
        }

        Ok(())
    }

    fn render_line_with_mentions(
        &mut self,
        line: &str,
        line_start: usize,
        max_cols: usize,
        tokens: &[MentionToken],
    ) -> Result<()> {
        let mut width = 0;
        for (col, ch) in line.chars().enumerate() {
            let w = display_width(ch.encode_utf8(&mut [0; 4]));
            if width + w > max_cols {
                break;
            }
            width += w;

            let offset = line_start + col;
            let in_token = tokens.iter().any(|t| offset >= t.start && offset < t.end);
            let fg = if in_token { MENTION_FG } else { MODAL_FG };
            execute!(self.stdout, SetBackgroundColor(TEXTAREA_BG), SetForegroundColor(fg))?;
            if in_token {
                execute!(self.stdout, SetAttribute(Attribute::Bold), Print(ch), SetAttribute(Attribute::Reset))?;
            } else {
                execute!(self.stdout, Print(ch))?;
            }
        }
        Ok(())
    }

    fn render_dropdown(&mut self, editor: &MentionEditor, rect: Rect, offset: usize) -> Result<()> {
        let dropdown = editor.dropdown();
        let width = rect.width as usize;

        if dropdown.items().is_empty() {
            execute!(
                self.stdout,
                MoveTo(rect.x, rect.y),
                SetBackgroundColor(DROPDOWN_BG),
                SetForegroundColor(PLACEHOLDER_FG),
                Print(format!("{:<width$}", " No users found", width = width)),
            )?;
            return Ok(());
        }

        for (row, (idx, candidate)) in dropdown
            .items()
            .iter()
            .enumerate()
            .skip(offset)
            .take(rect.height as usize)
            .enumerate()
        {
            let (bg, fg) = if idx == dropdown.highlight_index() {
                (HIGHLIGHT_BG, Color::White)
            } else {
                (DROPDOWN_BG, MODAL_FG)
            };
            let name = truncate_to_width(&candidate.display_name, width.saturating_sub(1));
            let padding = width.saturating_sub(display_width(name) + 1);
            execute!(
                self.stdout,
                MoveTo(rect.x, rect.y + row as u16),
                SetBackgroundColor(bg),
                SetForegroundColor(fg),
                Print(" "),
                Print(name),
                Print(" ".repeat(padding)),
            )?;
        }

        Ok(())
    }
}
