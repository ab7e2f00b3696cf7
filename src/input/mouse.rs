//! Mouse event handling

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Pointer input the modal understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mouse {
    /// Left click at (column, row) - 0-indexed
    Click { col: u16, row: u16 },
    /// Pointer moved to (column, row)
    Hover { col: u16, row: u16 },
}

impl Mouse {
    pub fn from_crossterm(event: MouseEvent) -> Option<Self> {
        let col = event.column;
        let row = event.row;

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Mouse::Click { col, row }),
            MouseEventKind::Moved => Some(Mouse::Hover { col, row }),
            _ => None,
        }
    }
}
