//! # Focus Modal Component
//!
//! Centered overlay with a live timer for a single todo. Opened with `t`;
//! `t` or Esc stops the session, and the elapsed seconds are recorded
//! against the item.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use super::centered_rect;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Emitted when the session ends.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusStopped {
    pub todo_id: i64,
    pub seconds: u64,
}

/// Persistent state for a running focus session.
pub struct FocusModalState {
    pub todo_id: i64,
    pub text: String,
    started: Instant,
}

impl FocusModalState {
    pub fn new(todo_id: i64, text: String) -> Self {
        Self {
            todo_id,
            text,
            started: Instant::now(),
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    pub fn stop(&self) -> FocusStopped {
        FocusStopped {
            todo_id: self.todo_id,
            seconds: self.elapsed_seconds(),
        }
    }
}

impl EventHandler for FocusModalState {
    type Event = FocusStopped;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FocusStopped> {
        match event {
            TuiEvent::Escape | TuiEvent::InputChar('t') => Some(self.stop()),
            _ => None,
        }
    }
}

/// Transient render wrapper for the focus overlay.
pub struct FocusModal<'a> {
    state: &'a FocusModalState,
}

impl<'a> FocusModal<'a> {
    pub fn new(state: &'a FocusModalState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 40, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Focus ")
            .title_bottom(" t Stop ")
            .padding(Padding::uniform(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [text_area, timer_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let text = Paragraph::new(self.state.text.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(text, text_area);

        let timer = Paragraph::new(format_elapsed(self.state.elapsed_seconds()))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(timer, timer_area);
    }
}

/// `h:mm:ss` clock text.
fn format_elapsed(seconds: u64) -> String {
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
