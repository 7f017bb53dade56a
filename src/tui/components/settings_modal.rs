//! # Settings Modal Component
//!
//! Centered overlay for the persisted display toggles. Opened with `a`,
//! dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SettingsModalState` lives in `TuiState` (None = hidden)
//! - `SettingsModal` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use super::centered_rect;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// One toggleable setting row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingToggle {
    ShowDoneItems,
    ShowDoneTodayOnly,
    PrioritizedOnly,
}

const ROWS: [(SettingToggle, &str); 3] = [
    (SettingToggle::ShowDoneItems, "Show done items"),
    (
        SettingToggle::ShowDoneTodayOnly,
        "Show items completed today only",
    ),
    (
        SettingToggle::PrioritizedOnly,
        "Ordered view: only show prioritized items",
    ),
];

/// Events emitted by the settings overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    Toggle(SettingToggle),
    Dismiss,
}

/// Persistent state for the settings overlay.
pub struct SettingsModalState {
    pub selected: usize,
    pub list_state: ListState,
}

impl SettingsModalState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected: 0,
            list_state,
        }
    }
}

impl Default for SettingsModalState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for SettingsModalState {
    type Event = SettingsEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SettingsEvent> {
        match event {
            TuiEvent::Escape => Some(SettingsEvent::Dismiss),
            TuiEvent::CursorUp | TuiEvent::InputChar('k') => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown | TuiEvent::InputChar('j') => {
                self.selected = (self.selected + 1).min(ROWS.len() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => {
                Some(SettingsEvent::Toggle(ROWS[self.selected].0))
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the settings overlay.
pub struct SettingsModal<'a> {
    state: &'a mut SettingsModalState,
    /// Current values, in row order.
    values: [bool; 3],
}

impl<'a> SettingsModal<'a> {
    pub fn new(
        state: &'a mut SettingsModalState,
        show_done_items: bool,
        show_done_today_only: bool,
        prioritized_only: bool,
    ) -> Self {
        Self {
            state,
            values: [show_done_items, show_done_today_only, prioritized_only],
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 40, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Settings ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" j/k Select  Space Toggle  Esc Close ").centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = ROWS
            .iter()
            .zip(self.values)
            .enumerate()
            .map(|(i, ((_, label), value))| {
                let marker = if value { "[x]" } else { "[ ]" };
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::styled(format!("{marker} {label}"), style))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_clamps_to_rows() {
        let mut state = SettingsModalState::new();
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
        for _ in 0..10 {
            state.handle_event(&TuiEvent::InputChar('j'));
        }
        assert_eq!(state.selected, ROWS.len() - 1);
    }

    #[test]
    fn test_space_toggles_selected_row() {
        let mut state = SettingsModalState::new();
        state.handle_event(&TuiEvent::InputChar('j'));
        let event = state.handle_event(&TuiEvent::InputChar(' '));
        assert_eq!(
            event,
            Some(SettingsEvent::Toggle(SettingToggle::ShowDoneTodayOnly))
        );
    }

    #[test]
    fn test_escape_dismisses() {
        let mut state = SettingsModalState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(SettingsEvent::Dismiss)
        );
    }
}
