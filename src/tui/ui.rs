//! Frame composition: lays the components out and renders any overlay on
//! top. All data flows in as props from `App` and `TuiState`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::{App, Pane};
use crate::tui::component::Component;
use crate::tui::components::{
    DashboardPanel, FocusModal, HelpBar, SettingsModal, TitleBar, TodoPane,
};
use crate::tui::{InputMode, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let [title_area, lists_area, dashboard_area, input_area, help_area] =
        Layout::vertical([Length(1), Min(3), Length(9), Length(3), Length(1)])
            .areas(frame.area());

    TitleBar::new(app.status_message.clone()).render(frame, title_area);

    // Pane focus highlighting only applies while list keys are live.
    let list_focus =
        tui.input_mode == InputMode::List && tui.settings.is_none() && tui.focus.is_none();
    let moving_id = app.pending_move.map(|m| m.id);

    if app.show_done_items {
        let [todo_area, done_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(lists_area);
        TodoPane::new(
            &app.todo_items,
            "Todo",
            list_focus && tui.active_pane == Pane::Todo,
            moving_id,
            &mut tui.todo_pane,
        )
        .render(frame, todo_area);
        TodoPane::new(
            &app.done_items,
            "Done",
            list_focus && tui.active_pane == Pane::Done,
            moving_id,
            &mut tui.done_pane,
        )
        .render(frame, done_area);
    } else {
        TodoPane::new(
            &app.todo_items,
            "Todo",
            list_focus,
            moving_id,
            &mut tui.todo_pane,
        )
        .render(frame, lists_area);
    }

    DashboardPanel::new(&app.dashboard).render(frame, dashboard_area);
    tui.input.render(frame, input_area);
    HelpBar.render(frame, help_area);

    // Overlays draw last, over everything else.
    if let Some(ref mut settings) = tui.settings {
        SettingsModal::new(
            settings,
            app.show_done_items,
            app.show_done_today_only,
            app.show_prioritized_only,
        )
        .render(frame, frame.area());
    }
    if let Some(ref focus) = tui.focus {
        FocusModal::new(focus).render(frame, frame.area());
    }
}
