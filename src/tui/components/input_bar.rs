//! # Input Bar Component
//!
//! Single-line text entry used for new tasks and edits.
//!
//! ## State Management
//!
//! The buffer, cursor, and placeholder are internal state; the event loop
//! activates the bar via [`InputBar::begin`] and reads high-level
//! [`InputEvent`]s back. Empty submissions are swallowed here so the
//! reducer never sees them.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputBar.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted non-empty text (Enter pressed).
    Submitted(String),
    /// User dismissed the bar (Esc pressed).
    Cancelled,
}

pub struct InputBar {
    /// Text buffer (internal state).
    pub buffer: String,
    /// Shown dimmed while the buffer is empty.
    pub placeholder: String,
    /// Whether the bar currently has keyboard focus (prop).
    pub active: bool,
    /// Cursor position as a byte offset into `buffer`.
    cursor: usize,
}

const DEFAULT_PLACEHOLDER: &str = "New task…";

impl InputBar {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            active: false,
            cursor: 0,
        }
    }

    /// Activate the bar for a new entry or an edit.
    pub fn begin(&mut self, placeholder: &str, prefill: Option<String>) {
        self.buffer = prefill.unwrap_or_default();
        self.cursor = self.buffer.len();
        self.placeholder = placeholder.to_string();
        self.active = true;
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.placeholder = DEFAULT_PLACEHOLDER.to_string();
        self.active = false;
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }
}

impl Default for InputBar {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for InputBar {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                None
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.buffer.remove(prev);
                    self.cursor = prev;
                }
                None
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::Submit => {
                let text = self.buffer.trim().to_string();
                if text.is_empty() {
                    return None;
                }
                self.reset();
                Some(InputEvent::Submitted(text))
            }
            TuiEvent::Escape => {
                self.reset();
                Some(InputEvent::Cancelled)
            }
            _ => None,
        }
    }
}

impl Component for InputBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.active {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default().borders(Borders::ALL).border_style(border_style);

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
        } else {
            Paragraph::new(self.buffer.as_str()).block(block)
        };
        frame.render_widget(paragraph, area);

        if self.active {
            let column = self.buffer[..self.cursor].width() as u16;
            frame.set_cursor_position(Position::new(
                area.x + 1 + column.min(area.width.saturating_sub(3)),
                area.y + 1,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(bar: &mut InputBar, text: &str) {
        for c in text.chars() {
            bar.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut bar = InputBar::new();
        bar.begin("New task…", None);
        type_text(&mut bar, "water plants");
        let event = bar.handle_event(&TuiEvent::Submit);
        assert_eq!(event, Some(InputEvent::Submitted("water plants".into())));
        assert!(bar.buffer.is_empty());
        assert!(!bar.active);
    }

    #[test]
    fn test_empty_submit_is_swallowed() {
        let mut bar = InputBar::new();
        bar.begin("New task…", None);
        type_text(&mut bar, "   ");
        assert_eq!(bar.handle_event(&TuiEvent::Submit), None);
        assert!(bar.active);
    }

    #[test]
    fn test_submitted_text_is_trimmed() {
        let mut bar = InputBar::new();
        bar.begin("New task…", None);
        type_text(&mut bar, "  padded  ");
        let event = bar.handle_event(&TuiEvent::Submit);
        assert_eq!(event, Some(InputEvent::Submitted("padded".into())));
    }

    #[test]
    fn test_escape_cancels_and_clears() {
        let mut bar = InputBar::new();
        bar.begin("Edit task…", Some("old text".into()));
        assert_eq!(bar.buffer, "old text");
        let event = bar.handle_event(&TuiEvent::Escape);
        assert_eq!(event, Some(InputEvent::Cancelled));
        assert!(bar.buffer.is_empty());
        assert_eq!(bar.placeholder, "New task…");
    }

    #[test]
    fn test_backspace_and_cursor_movement() {
        let mut bar = InputBar::new();
        bar.begin("New task…", None);
        type_text(&mut bar, "abc");
        bar.handle_event(&TuiEvent::CursorLeft);
        bar.handle_event(&TuiEvent::Backspace);
        assert_eq!(bar.buffer, "ac");
        bar.handle_event(&TuiEvent::CursorRight);
        bar.handle_event(&TuiEvent::InputChar('d'));
        assert_eq!(bar.buffer, "acd");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut bar = InputBar::new();
        bar.begin("New task…", None);
        type_text(&mut bar, "café");
        bar.handle_event(&TuiEvent::Backspace);
        assert_eq!(bar.buffer, "caf");
        type_text(&mut bar, "é");
        bar.handle_event(&TuiEvent::CursorLeft);
        bar.handle_event(&TuiEvent::CursorLeft);
        bar.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(bar.buffer, "caxfé");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut bar = InputBar::new();
        bar.begin("New task…", None);
        bar.handle_event(&TuiEvent::Backspace);
        assert!(bar.buffer.is_empty());
    }
}
