//! # Application State
//!
//! Core business state. This module contains domain logic only —
//! no ratatui or crossterm types. Presentation state lives in `tui`.
//!
//! ```text
//! App
//! ├── store: Store                  // the SQLite file (authoritative)
//! ├── todo_items / done_items       // refreshable display caches
//! ├── dashboard: Dashboard          // per-day activity series
//! ├── status_message: String        // status line text
//! ├── show_* flags                  // settings persisted in the store
//! ├── priority_view: bool           // flat priority ordering active
//! ├── pending_add / pending_move    // in-flight add and move workflows
//! └── editing_id                    // todo currently being edited
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.
//! The display caches are reloaded from the store after every mutation;
//! they are never the source of truth.

use log::warn;

use crate::core::order::{self, DisplayItem};
use crate::store::{Status, Store, StoreError};

/// Setting key: whether the Done pane is shown at all.
pub const SETTING_SHOW_DONE_ITEMS: &str = "dashboard.show_done_items";
/// Setting key: whether the Done pane only shows items completed today.
pub const SETTING_DONE_TODAY_ONLY: &str = "donelist.show_completed_today_only";
/// Setting key: whether the priority view hides unprioritized items.
pub const SETTING_PRIORITIZED_ONLY: &str = "ordered.show_prioritized_only";

/// Which list pane an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Todo,
    Done,
}

/// Per-day activity series for the dashboard sparklines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub created: Vec<u64>,
    pub completed: Vec<u64>,
    pub focus_minutes: Vec<u64>,
}

/// An add staged by the child/sibling/parent keybindings: the row is only
/// inserted once the input bar is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAdd {
    pub parent_id: Option<i64>,
    pub status: Status,
    pub sort_order: f64,
    /// Existing todo to re-home under the new item (parent insertion).
    pub reparent_id: Option<i64>,
}

/// A move staged by `m`: the next child/sibling/parent keypress re-homes
/// this item relative to the highlighted target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingMove {
    pub id: i64,
    pub status: Status,
    pub pane: Pane,
}

pub struct App {
    pub store: Store,
    pub todo_items: Vec<DisplayItem>,
    pub done_items: Vec<DisplayItem>,
    pub dashboard: Dashboard,
    pub status_message: String,
    pub show_done_items: bool,
    pub show_done_today_only: bool,
    pub show_prioritized_only: bool,
    pub priority_view: bool,
    pub pending_add: Option<PendingAdd>,
    pub pending_move: Option<PendingMove>,
    pub editing_id: Option<i64>,
    /// Length of the dashboard day window.
    pub history_days: u32,
}

impl App {
    pub fn new(store: Store, history_days: u32) -> Result<Self, StoreError> {
        let show_done_items = store.get_bool_setting(SETTING_SHOW_DONE_ITEMS, true)?;
        let show_done_today_only = store.get_bool_setting(SETTING_DONE_TODAY_ONLY, false)?;
        let show_prioritized_only = store.get_bool_setting(SETTING_PRIORITIZED_ONLY, true)?;

        let mut app = Self {
            store,
            todo_items: Vec::new(),
            done_items: Vec::new(),
            dashboard: Dashboard::default(),
            status_message: String::new(),
            show_done_items,
            show_done_today_only,
            show_prioritized_only,
            priority_view: false,
            pending_add: None,
            pending_move: None,
            editing_id: None,
            history_days,
        };
        app.refresh()?;
        Ok(app)
    }

    /// Reload both display caches and the dashboard series from the store.
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        let todo_records = self.store.list(Status::Todo)?;
        self.todo_items = if self.priority_view {
            order::priority_items(&todo_records, self.show_prioritized_only)
        } else {
            order::tree_items(&todo_records)
        };

        let done_records = if self.show_done_today_only {
            self.store.list_done_today()?
        } else {
            self.store.list(Status::Done)?
        };
        self.done_items = order::tree_items(&done_records);

        self.dashboard = Dashboard {
            created: self.store.created_counts_by_day(self.history_days)?,
            completed: self.store.completed_counts_by_day(self.history_days)?,
            focus_minutes: self.store.focus_minutes_by_day(self.history_days)?,
        };
        Ok(())
    }

    /// Refresh, demoting store errors to a status-line report.
    pub fn refresh_lossy(&mut self) {
        if let Err(e) = self.refresh() {
            warn!("refresh failed: {e}");
            self.status_message = format!("Database error: {e}");
        }
    }

    pub fn items(&self, pane: Pane) -> &[DisplayItem] {
        match pane {
            Pane::Todo => &self.todo_items,
            Pane::Done => &self.done_items,
        }
    }

    pub fn item(&self, pane: Pane, index: usize) -> Option<&DisplayItem> {
        self.items(pane).get(index)
    }
}
