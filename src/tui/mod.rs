//! # TUI
//!
//! Terminal presentation layer. Owns the terminal, the event loop, and
//! all per-frame presentation state (`TuiState`); business state stays in
//! `core::state::App` and is only mutated through `update()`.
//!
//! The loop redraws on demand: a frame is drawn when an event changed
//! something, or on a timer while the focus clock is running.

pub mod component;
pub mod components;
pub mod event;
pub mod ui;

use std::io;
use std::time::Duration;

use crate::core::action::{Action, Effect, Relationship, update};
use crate::core::state::{App, Pane};
use crate::store::Status;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    FocusModalState, InputBar, InputEvent, SettingToggle, SettingsEvent, SettingsModalState,
    TodoPaneState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Poll timeout when nothing on screen is time-dependent.
const IDLE_TIMEOUT: Duration = Duration::from_millis(500);
/// Poll timeout while the focus timer is visible.
const TIMER_TIMEOUT: Duration = Duration::from_millis(250);

/// Whether keystrokes go to the lists or to the input bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    List,
    Input,
}

/// Presentation state that persists between frames.
pub struct TuiState {
    pub todo_pane: TodoPaneState,
    pub done_pane: TodoPaneState,
    pub input: InputBar,
    pub input_mode: InputMode,
    pub active_pane: Pane,
    pub settings: Option<SettingsModalState>,
    pub focus: Option<FocusModalState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            todo_pane: TodoPaneState::new(),
            done_pane: TodoPaneState::new(),
            input: InputBar::new(),
            input_mode: InputMode::List,
            active_pane: Pane::Todo,
            settings: None,
            focus: None,
        }
    }

    fn pane_state(&mut self, pane: Pane) -> &mut TodoPaneState {
        match pane {
            Pane::Todo => &mut self.todo_pane,
            Pane::Done => &mut self.done_pane,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the TUI until the user quits. Restores the terminal on the way out.
pub fn run(mut app: App) -> io::Result<()> {
    let mut tui = TuiState::new();
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, &mut tui);
    ratatui::restore();

    // A focus session left running when the terminal goes down still counts.
    if let Some(focus) = tui.focus.take() {
        let stopped = focus.stop();
        update(
            &mut app,
            Action::RecordFocus {
                id: stopped.todo_id,
                seconds: stopped.seconds,
            },
        );
    }
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> io::Result<()> {
    let mut needs_redraw = true;

    loop {
        tui.todo_pane.clamp(app.todo_items.len());
        tui.done_pane.clamp(app.done_items.len());
        if !app.show_done_items && tui.active_pane == Pane::Done {
            tui.active_pane = Pane::Todo;
        }

        let animating = tui.focus.is_some();
        if needs_redraw || animating {
            terminal.draw(|frame| ui::draw_ui(frame, app, tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            TIMER_TIMEOUT
        } else {
            IDLE_TIMEOUT
        };

        // Drain everything that is already queued before redrawing.
        let first = poll_event_timeout(timeout);
        let mut should_quit = false;
        for event in first.into_iter().chain(std::iter::from_fn(poll_event_immediate)) {
            needs_redraw = true;
            match event {
                TuiEvent::ForceQuit => should_quit = true,
                TuiEvent::Resize => {}
                event => handle_event(app, tui, &event, &mut should_quit),
            }
        }
        if should_quit {
            return Ok(());
        }
    }
}

/// Route one event to the active layer: overlay, input bar, or list keys.
fn handle_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent, should_quit: &mut bool) {
    if let Some(ref mut settings) = tui.settings {
        match settings.handle_event(event) {
            Some(SettingsEvent::Dismiss) => tui.settings = None,
            Some(SettingsEvent::Toggle(toggle)) => {
                let action = match toggle {
                    SettingToggle::ShowDoneItems => {
                        Action::SetShowDoneItems(!app.show_done_items)
                    }
                    SettingToggle::ShowDoneTodayOnly => {
                        Action::SetShowDoneTodayOnly(!app.show_done_today_only)
                    }
                    SettingToggle::PrioritizedOnly => {
                        Action::SetShowPrioritizedOnly(!app.show_prioritized_only)
                    }
                };
                update(app, action);
            }
            None => {}
        }
        return;
    }

    if let Some(ref mut focus) = tui.focus {
        if let Some(stopped) = focus.handle_event(event) {
            update(
                app,
                Action::RecordFocus {
                    id: stopped.todo_id,
                    seconds: stopped.seconds,
                },
            );
            tui.focus = None;
        }
        return;
    }

    match tui.input_mode {
        InputMode::Input => handle_input_event(app, tui, event),
        InputMode::List => handle_list_event(app, tui, event, should_quit),
    }
}

fn handle_input_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) {
    let Some(input_event) = tui.input.handle_event(event) else {
        return;
    };
    match input_event {
        InputEvent::Submitted(text) => {
            // A staged add into the Done pane should land focus there.
            let target_done = app
                .pending_add
                .as_ref()
                .is_some_and(|p| p.status == Status::Done);
            update(app, Action::Submit(text));
            tui.input_mode = InputMode::List;
            if target_done && app.show_done_items {
                tui.active_pane = Pane::Done;
            }
        }
        InputEvent::Cancelled => {
            update(app, Action::CancelInput);
            tui.input_mode = InputMode::List;
        }
    }
}

fn handle_list_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent, should_quit: &mut bool) {
    let pane = tui.active_pane;
    let len = app.items(pane).len();
    let selected = tui.pane_state(pane).selected();

    let action = match event {
        TuiEvent::CursorUp | TuiEvent::InputChar('k') => {
            tui.pane_state(pane).move_up(len);
            return;
        }
        TuiEvent::CursorDown | TuiEvent::InputChar('j') => {
            tui.pane_state(pane).move_down(len);
            return;
        }
        TuiEvent::InputChar('h') | TuiEvent::CursorLeft => {
            tui.active_pane = Pane::Todo;
            return;
        }
        TuiEvent::InputChar('l') | TuiEvent::CursorRight => {
            if app.show_done_items {
                tui.active_pane = Pane::Done;
            }
            return;
        }
        TuiEvent::InputChar('q') => Action::Quit,
        TuiEvent::Escape => Action::CancelMove,
        TuiEvent::InputChar('n') => Action::BeginAdd,
        TuiEvent::InputChar('e') => match selected {
            Some(index) => Action::BeginEdit { pane, index },
            None => return,
        },
        TuiEvent::InputChar('f') => match selected {
            Some(index) => Action::Flip { pane, index },
            None => return,
        },
        TuiEvent::InputChar('d') => match selected {
            Some(index) => Action::Delete { pane, index },
            None => return,
        },
        TuiEvent::InputChar('m') => match selected {
            Some(index) => Action::StartMove { pane, index },
            None => return,
        },
        TuiEvent::InputChar('o') => Action::TogglePriorityView,
        TuiEvent::InputChar('c') => match selected {
            Some(index) => Action::BeginRelated {
                pane,
                index,
                relationship: Relationship::Child,
            },
            None => return,
        },
        TuiEvent::InputChar('s') => match selected {
            Some(index) => Action::BeginRelated {
                pane,
                index,
                relationship: Relationship::Sibling,
            },
            None => return,
        },
        TuiEvent::InputChar('p') => match selected {
            Some(index) => Action::BeginRelated {
                pane,
                index,
                relationship: Relationship::Parent,
            },
            None => return,
        },
        TuiEvent::InputChar('a') => {
            tui.settings = Some(SettingsModalState::new());
            return;
        }
        TuiEvent::InputChar('t') => {
            // Focus sessions only make sense on open todos.
            if let Some(index) = selected
                && let Some(item) = app.item(pane, index)
                && item.record.status == Status::Todo
            {
                tui.focus = Some(FocusModalState::new(
                    item.record.id,
                    item.record.text.clone(),
                ));
            }
            return;
        }
        TuiEvent::InputChar(c @ '0'..='9') => {
            if pane != Pane::Todo {
                return;
            }
            let Some(index) = selected else {
                return;
            };
            let digit = *c as u8 - b'0';
            Action::SetPriority {
                index,
                priority: (digit != 0).then_some(digit),
            }
        }
        _ => return,
    };

    match update(app, action) {
        Effect::None => {}
        Effect::OpenInput {
            placeholder,
            prefill,
        } => {
            tui.input.begin(placeholder, prefill);
            tui.input_mode = InputMode::Input;
        }
        Effect::Quit => *should_quit = true,
    }
}
