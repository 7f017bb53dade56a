//! # TUI Components
//!
//! Components follow two patterns, mirrored across the files here:
//!
//! - **Stateless (props-based)**: `TitleBar`, `HelpBar`, `DashboardPanel` —
//!   receive everything they render as data and hold no state between
//!   frames.
//! - **Stateful (event-driven)**: `TodoPane`, `InputBar`, and the two
//!   modals — a persistent `*State` struct lives in `TuiState`, and a
//!   transient wrapper borrows it each frame to render.
//!
//! Each component file is self-contained: state types, event types,
//! rendering, event handling, and tests all live together.

pub mod dashboard;
pub mod focus_modal;
pub mod help_bar;
pub mod input_bar;
pub mod settings_modal;
pub mod title_bar;
pub mod todo_pane;

pub use dashboard::DashboardPanel;
pub use focus_modal::{FocusModal, FocusModalState, FocusStopped};
pub use help_bar::HelpBar;
pub use input_bar::{InputBar, InputEvent};
pub use settings_modal::{SettingsEvent, SettingsModal, SettingsModalState, SettingToggle};
pub use title_bar::TitleBar;
pub use todo_pane::{TodoPane, TodoPaneState};

use ratatui::layout::{Constraint, Layout, Rect};

/// Compute a centered rect using percentages of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
