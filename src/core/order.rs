//! Display ordering for todo lists.
//!
//! Two projections of the same rows:
//!
//! - **Tree view**: items grouped under their parents, siblings ordered by
//!   `(sort_order, id)`, one indent level per depth.
//! - **Priority view**: a flat list ordered by `(priority, timestamp, id)`,
//!   unprioritized items last.
//!
//! Plus the fractional sort-key math used when inserting or moving items:
//! a new key is the midpoint between its neighbors, falling back to ±1 at
//! the edges or when the neighbors have collapsed.

use std::collections::HashMap;

use crate::store::TodoRecord;

/// A todo row paired with its indentation depth in the tree view.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub record: TodoRecord,
    pub depth: u8,
}

/// Sort key for unprioritized items in the priority view.
const UNPRIORITIZED_RANK: u8 = u8::MAX;

/// Build the tree projection. Items whose parent is absent from `records`
/// (deleted, or filtered out) are treated as roots.
pub fn tree_items(records: &[TodoRecord]) -> Vec<DisplayItem> {
    let known: HashMap<i64, &TodoRecord> = records.iter().map(|r| (r.id, r)).collect();
    let mut children: HashMap<i64, Vec<&TodoRecord>> =
        records.iter().map(|r| (r.id, Vec::new())).collect();
    let mut roots: Vec<&TodoRecord> = Vec::new();

    for record in records {
        match record.parent_id {
            Some(parent) if known.contains_key(&parent) => {
                children.entry(parent).or_default().push(record);
            }
            _ => roots.push(record),
        }
    }

    let sibling_order = |a: &&TodoRecord, b: &&TodoRecord| {
        a.sort_order.total_cmp(&b.sort_order).then(a.id.cmp(&b.id))
    };
    roots.sort_by(sibling_order);
    for siblings in children.values_mut() {
        siblings.sort_by(sibling_order);
    }

    let mut ordered = Vec::with_capacity(records.len());
    let mut stack: Vec<(&TodoRecord, u8)> = roots.iter().rev().map(|r| (*r, 0)).collect();
    while let Some((record, depth)) = stack.pop() {
        ordered.push(DisplayItem {
            record: record.clone(),
            depth,
        });
        if let Some(kids) = children.get(&record.id) {
            for kid in kids.iter().rev() {
                stack.push((kid, depth.saturating_add(1)));
            }
        }
    }
    ordered
}

/// Build the flat priority projection. With `prioritized_only`, items
/// without a priority are dropped instead of sorted last.
pub fn priority_items(records: &[TodoRecord], prioritized_only: bool) -> Vec<DisplayItem> {
    let mut filtered: Vec<&TodoRecord> = records
        .iter()
        .filter(|r| !prioritized_only || r.priority.is_some())
        .collect();
    filtered.sort_by(|a, b| {
        let rank_a = a.priority.unwrap_or(UNPRIORITIZED_RANK);
        let rank_b = b.priority.unwrap_or(UNPRIORITIZED_RANK);
        rank_a
            .cmp(&rank_b)
            .then_with(|| a.timestamp.cmp(&b.timestamp))
            .then(a.id.cmp(&b.id))
    });
    filtered
        .into_iter()
        .map(|record| DisplayItem {
            record: record.clone(),
            depth: 0,
        })
        .collect()
}

/// Index of the last item in the subtree rooted at `index`.
pub fn last_descendant(items: &[DisplayItem], index: usize) -> usize {
    let depth = items[index].depth;
    let mut last = index;
    for (next, item) in items.iter().enumerate().skip(index + 1) {
        if item.depth <= depth {
            break;
        }
        last = next;
    }
    last
}

/// Sort key for a slot immediately after `index` in display order.
pub fn sort_key_after(items: &[DisplayItem], index: usize) -> f64 {
    let prev = items[index].record.sort_order;
    match items.get(index + 1) {
        Some(next) if next.record.sort_order > prev => {
            (prev + next.record.sort_order) / 2.0
        }
        Some(_) => prev + 1.0,
        None => prev + 1.0,
    }
}

/// Sort key for a slot immediately before `index` in display order.
pub fn sort_key_before(items: &[DisplayItem], index: usize) -> f64 {
    let next = items[index].record.sort_order;
    if index == 0 {
        return next - 1.0;
    }
    let prev = items[index - 1].record.sort_order;
    if next <= prev { next - 1.0 } else { (prev + next) / 2.0 }
}

/// Sort key for a slot after the whole subtree rooted at `index`.
pub fn sort_key_after_subtree(items: &[DisplayItem], index: usize) -> f64 {
    sort_key_after(items, last_descendant(items, index))
}

/// Whether `candidate` sits anywhere below `ancestor` in the hierarchy.
pub fn is_descendant(
    candidate: i64,
    ancestor: i64,
    parent_by_id: &HashMap<i64, Option<i64>>,
) -> bool {
    let mut current = parent_by_id.get(&candidate).copied().flatten();
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = parent_by_id.get(&id).copied().flatten();
    }
    false
}
