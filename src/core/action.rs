//! # Actions
//!
//! Everything that can happen in 5am becomes an `Action`.
//! User presses `f`? That's `Action::Flip`. Input bar submitted?
//! That's `Action::Submit(text)`.
//!
//! The `update()` function applies an action to the current state and
//! returns an `Effect` telling the caller what to do next (open the input
//! bar, quit). The TUI layer translates keys into actions; nothing in here
//! knows about terminals.
//!
//! Store failures never escape: they are logged and reported on the
//! status line, and the UI stays up.

use log::warn;

use crate::core::order::{self, DisplayItem};
use crate::core::state::{
    App, Pane, PendingAdd, PendingMove, SETTING_DONE_TODAY_ONLY, SETTING_PRIORITIZED_ONLY,
    SETTING_SHOW_DONE_ITEMS,
};
use crate::store::{Status, StoreError};

const PLACEHOLDER_NEW: &str = "New task…";
const PLACEHOLDER_CHILD: &str = "New child task…";
const PLACEHOLDER_SIBLING: &str = "New sibling task…";
const PLACEHOLDER_PARENT: &str = "New parent task…";
const PLACEHOLDER_EDIT: &str = "Edit task…";

/// Where a moved or inserted item lands relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    Child,
    Sibling,
    Parent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Refresh,
    /// Input bar submitted with non-empty text. Resolves to an edit, a
    /// staged add, or a plain add depending on in-flight state.
    Submit(String),
    /// Input bar dismissed; clears any staged add or edit.
    CancelInput,
    /// `n` — stage a new root task.
    BeginAdd,
    /// `e` — edit the highlighted item's text.
    BeginEdit { pane: Pane, index: usize },
    /// `c`/`s`/`p` — stage a new related task, or complete a pending move.
    BeginRelated {
        pane: Pane,
        index: usize,
        relationship: Relationship,
    },
    /// `f` — flip completion state.
    Flip { pane: Pane, index: usize },
    /// `d` — delete the highlighted item.
    Delete { pane: Pane, index: usize },
    /// Digit keys; `None` clears the priority.
    SetPriority { index: usize, priority: Option<u8> },
    /// `m` — stage a move of the highlighted item.
    StartMove { pane: Pane, index: usize },
    /// Esc in list mode — abandon a staged move.
    CancelMove,
    /// `o` — flat priority ordering on the Todo pane.
    TogglePriorityView,
    SetShowDoneItems(bool),
    SetShowDoneTodayOnly(bool),
    SetShowPrioritizedOnly(bool),
    /// Focus timer closed after `seconds` of work on a todo.
    RecordFocus { id: i64, seconds: u64 },
    Quit,
}

/// What the caller should do after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Focus the input bar.
    OpenInput {
        placeholder: &'static str,
        prefill: Option<String>,
    },
    Quit,
}

/// Apply `action` to `app`. Store errors are reported, never propagated.
pub fn update(app: &mut App, action: Action) -> Effect {
    match apply(app, action) {
        Ok(effect) => effect,
        Err(e) => {
            warn!("action failed: {e}");
            app.status_message = format!("Database error: {e}");
            Effect::None
        }
    }
}

fn apply(app: &mut App, action: Action) -> Result<Effect, StoreError> {
    match action {
        Action::Refresh => {
            app.refresh()?;
            Ok(Effect::None)
        }

        Action::Submit(text) => submit(app, &text),

        Action::CancelInput => {
            app.pending_add = None;
            app.editing_id = None;
            Ok(Effect::None)
        }

        Action::BeginAdd => {
            app.pending_add = None;
            app.editing_id = None;
            Ok(Effect::OpenInput {
                placeholder: PLACEHOLDER_NEW,
                prefill: None,
            })
        }

        Action::BeginEdit { pane, index } => {
            let Some(item) = app.item(pane, index) else {
                return Ok(Effect::None);
            };
            let id = item.record.id;
            let text = item.record.text.clone();
            app.pending_add = None;
            app.editing_id = Some(id);
            Ok(Effect::OpenInput {
                placeholder: PLACEHOLDER_EDIT,
                prefill: Some(text),
            })
        }

        Action::BeginRelated {
            pane,
            index,
            relationship,
        } => {
            if app.pending_move.is_some() {
                perform_move(app, pane, index, relationship)?;
                return Ok(Effect::None);
            }
            begin_related_add(app, pane, index, relationship)
        }

        Action::Flip { pane, index } => {
            let Some(item) = app.item(pane, index) else {
                return Ok(Effect::None);
            };
            let id = item.record.id;
            let next = item.record.status.flipped();
            app.store.update_status(id, next)?;
            app.refresh()?;
            Ok(Effect::None)
        }

        Action::Delete { pane, index } => {
            let Some(item) = app.item(pane, index) else {
                return Ok(Effect::None);
            };
            let id = item.record.id;
            app.store.delete(id)?;
            if app.pending_move.map(|m| m.id) == Some(id) {
                app.pending_move = None;
            }
            app.refresh()?;
            Ok(Effect::None)
        }

        Action::SetPriority { index, priority } => {
            let Some(item) = app.item(Pane::Todo, index) else {
                return Ok(Effect::None);
            };
            app.store.update_priority(item.record.id, priority)?;
            app.refresh()?;
            Ok(Effect::None)
        }

        Action::StartMove { pane, index } => {
            // Manual ordering has no meaning while the priority view is up.
            if app.priority_view {
                return Ok(Effect::None);
            }
            let Some(item) = app.item(pane, index) else {
                return Ok(Effect::None);
            };
            let (id, status) = (item.record.id, item.record.status);
            app.pending_move = Some(PendingMove { id, status, pane });
            app.status_message = String::from("Move: c child, s sibling, p parent, Esc cancel");
            Ok(Effect::None)
        }

        Action::CancelMove => {
            app.pending_move = None;
            app.status_message.clear();
            Ok(Effect::None)
        }

        Action::TogglePriorityView => {
            app.priority_view = !app.priority_view;
            app.pending_move = None;
            app.refresh()?;
            Ok(Effect::None)
        }

        Action::SetShowDoneItems(value) => {
            app.show_done_items = value;
            app.store.set_bool_setting(SETTING_SHOW_DONE_ITEMS, value)?;
            app.refresh()?;
            Ok(Effect::None)
        }

        Action::SetShowDoneTodayOnly(value) => {
            app.show_done_today_only = value;
            app.store.set_bool_setting(SETTING_DONE_TODAY_ONLY, value)?;
            app.refresh()?;
            Ok(Effect::None)
        }

        Action::SetShowPrioritizedOnly(value) => {
            app.show_prioritized_only = value;
            app.store.set_bool_setting(SETTING_PRIORITIZED_ONLY, value)?;
            app.refresh()?;
            Ok(Effect::None)
        }

        Action::RecordFocus { id, seconds } => {
            if seconds > 0 {
                app.store.add_focus_seconds(id, seconds)?;
                app.refresh()?;
            }
            Ok(Effect::None)
        }

        Action::Quit => Ok(Effect::Quit),
    }
}

fn submit(app: &mut App, text: &str) -> Result<Effect, StoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Effect::None);
    }

    if let Some(id) = app.editing_id.take() {
        app.store.update_text(id, text)?;
        app.refresh()?;
        return Ok(Effect::None);
    }

    if let Some(pending) = app.pending_add.take() {
        let added = app.store.add(
            text,
            pending.status,
            pending.parent_id,
            Some(pending.sort_order),
        )?;
        if let Some(reparent_id) = pending.reparent_id {
            app.store.update_parent(reparent_id, Some(added.id))?;
        }
        app.refresh()?;
        return Ok(Effect::None);
    }

    app.store.add(text, Status::Todo, None, None)?;
    app.refresh()?;
    Ok(Effect::None)
}

fn begin_related_add(
    app: &mut App,
    pane: Pane,
    index: usize,
    relationship: Relationship,
) -> Result<Effect, StoreError> {
    let items = app.items(pane);
    let Some(item) = items.get(index) else {
        return Ok(Effect::None);
    };

    let (parent_id, sort_order, reparent_id, placeholder) = match relationship {
        Relationship::Child => (
            Some(item.record.id),
            order::sort_key_after_subtree(items, index),
            None,
            PLACEHOLDER_CHILD,
        ),
        Relationship::Sibling => (
            item.record.parent_id,
            order::sort_key_after_subtree(items, index),
            None,
            PLACEHOLDER_SIBLING,
        ),
        // The new item takes the target's place and adopts it.
        Relationship::Parent => (
            item.record.parent_id,
            order::sort_key_before(items, index),
            Some(item.record.id),
            PLACEHOLDER_PARENT,
        ),
    };
    let status = item.record.status;

    app.editing_id = None;
    app.pending_add = Some(PendingAdd {
        parent_id,
        status,
        sort_order,
        reparent_id,
    });
    Ok(Effect::OpenInput {
        placeholder,
        prefill: None,
    })
}

fn perform_move(
    app: &mut App,
    pane: Pane,
    target_index: usize,
    relationship: Relationship,
) -> Result<(), StoreError> {
    let Some(mv) = app.pending_move.take() else {
        return Ok(());
    };
    app.status_message.clear();
    if mv.pane != pane {
        return Ok(());
    }

    let items = app.items(pane);
    let Some(source_index) = items.iter().position(|i| i.record.id == mv.id) else {
        return Ok(());
    };
    let Some(target) = items.get(target_index) else {
        return Ok(());
    };
    let source = &items[source_index];
    if source.record.id == target.record.id {
        return Ok(());
    }

    let parent_by_id: std::collections::HashMap<i64, Option<i64>> = items
        .iter()
        .map(|i| (i.record.id, i.record.parent_id))
        .collect();

    if order::is_descendant(target.record.id, source.record.id, &parent_by_id) {
        // Pulling a descendant up beside its ancestor is the one legal
        // move into the subtree; everything else would create a cycle.
        if relationship == Relationship::Sibling {
            let sort_order = order::sort_key_after_subtree(items, source_index);
            let target_id = target.record.id;
            let new_parent = source.record.parent_id;
            app.store.update_parent(target_id, new_parent)?;
            app.store.update_sort_order(target_id, sort_order)?;
            app.refresh()?;
        }
        return Ok(());
    }

    let source_id = source.record.id;
    let target_id = target.record.id;
    let target_parent = target.record.parent_id;
    match relationship {
        Relationship::Child => {
            let sort_order = order::sort_key_after_subtree(items, target_index);
            app.store.update_parent(source_id, Some(target_id))?;
            app.store.update_sort_order(source_id, sort_order)?;
        }
        Relationship::Sibling => {
            let sort_order = order::sort_key_after_subtree(items, target_index);
            app.store.update_parent(source_id, target_parent)?;
            app.store.update_sort_order(source_id, sort_order)?;
        }
        Relationship::Parent => {
            let sort_order = order::sort_key_before(items, target_index);
            app.store.update_parent(source_id, target_parent)?;
            app.store.update_sort_order(source_id, sort_order)?;
            app.store.update_parent(target_id, Some(source_id))?;
        }
    }
    app.refresh()?;
    Ok(())
}
