//! # Todo Pane Component
//!
//! One bordered list pane (Todo or Done). The app renders two of these
//! side by side.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TodoPaneState` lives in `TuiState` (one per pane)
//! - `TodoPane` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::core::order::DisplayItem;

/// Persistent selection state for one list pane.
pub struct TodoPaneState {
    pub list_state: ListState,
}

impl TodoPaneState {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Keep the selection valid after the item list changed underneath it.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let selected = self.selected().unwrap_or(0).min(len - 1);
        self.list_state.select(Some(selected));
    }

    pub fn move_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = self.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(next));
    }

    pub fn move_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = self.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.list_state.select(Some(next));
    }
}

impl Default for TodoPaneState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient render wrapper for a list pane.
pub struct TodoPane<'a> {
    items: &'a [DisplayItem],
    title: &'a str,
    focused: bool,
    /// Item staged by a pending move, highlighted green.
    moving_id: Option<i64>,
    state: &'a mut TodoPaneState,
}

impl<'a> TodoPane<'a> {
    pub fn new(
        items: &'a [DisplayItem],
        title: &'a str,
        focused: bool,
        moving_id: Option<i64>,
        state: &'a mut TodoPaneState,
    ) -> Self {
        Self {
            items,
            title,
            focused,
            moving_id,
            state,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.title));

        let rows: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| {
                let style = if self.moving_id == Some(item.record.id) {
                    Style::default().fg(Color::Black).bg(Color::Green)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::styled(format_row(item), style))
            })
            .collect();

        let list = List::new(rows).block(block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// `{indent}{priority:>2} {text}` — two spaces per depth level, blank
/// priority column for unprioritized items.
fn format_row(item: &DisplayItem) -> String {
    let indent = "  ".repeat(usize::from(item.depth));
    let priority = match item.record.priority {
        Some(p) => format!("{p:>2}"),
        None => String::from("  "),
    };
    format!("{indent}{priority} {}", item.record.text)
}
