//! # Persistence Layer
//!
//! A thin data-access layer over a single SQLite file. The store owns the
//! only connection for the process; every operation is one parameterized
//! statement (or a short transaction-free sequence) against it.
//!
//! The in-memory lists held by the UI are refreshable caches of these
//! queries, never authoritative — the database file owns all durable state.

pub mod paths;

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

use chrono::{Duration, NaiveDate, SecondsFormat, Utc};
use log::debug;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};

/// Completion state of a todo. Stored as text in the `status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Todo,
    Done,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Status::Todo),
            "done" => Some(Status::Done),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Status::Todo => Status::Done,
            Status::Done => Status::Todo,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `todos` table.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoRecord {
    pub id: i64,
    pub text: String,
    /// RFC 3339 UTC creation time.
    pub timestamp: String,
    pub status: Status,
    /// RFC 3339 UTC completion time; `None` while the item is open.
    pub completed_timestamp: Option<String>,
    /// Parent todo for subtask hierarchies.
    pub parent_id: Option<i64>,
    /// Manual ordering key. Fractional values come from midpoint insertion.
    pub sort_order: f64,
    /// 1–9, `None` = unprioritized.
    pub priority: Option<u8>,
}

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Sqlite(rusqlite::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "database I/O error: {e}"),
            StoreError::Sqlite(e) => write!(f, "database error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Sqlite(e)
    }
}

const SELECT_COLUMNS: &str =
    "id, text, timestamp, status, completed_timestamp, parent_id, sort_order, priority";

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if absent) the database at `path` and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        initialize(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        initialize(&conn)?;
        Ok(Self { conn })
    }

    /// All todos with the given status, ordered by `(sort_order, id)`.
    pub fn list(&self, status: Status) -> Result<Vec<TodoRecord>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM todos WHERE status = ?1 ORDER BY sort_order, id"
        ))?;
        let rows = stmt.query_map(params![status.as_str()], map_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Done todos completed on the given UTC day.
    pub fn list_done_on(&self, day: NaiveDate) -> Result<Vec<TodoRecord>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM todos
             WHERE status = 'done'
               AND completed_timestamp IS NOT NULL
               AND date(completed_timestamp) = ?1
             ORDER BY sort_order, id"
        ))?;
        let day = day.format("%Y-%m-%d").to_string();
        let rows = stmt.query_map(params![day], map_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Done todos completed today (UTC).
    pub fn list_done_today(&self) -> Result<Vec<TodoRecord>, StoreError> {
        self.list_done_on(Utc::now().date_naive())
    }

    /// Fetch a single todo by id.
    pub fn get(&self, id: i64) -> Result<Option<TodoRecord>, StoreError> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM todos WHERE id = ?1"),
                params![id],
                map_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Insert a new todo. `sort_order = None` appends after everything.
    pub fn add(
        &self,
        text: &str,
        status: Status,
        parent_id: Option<i64>,
        sort_order: Option<f64>,
    ) -> Result<TodoRecord, StoreError> {
        let timestamp = now_timestamp();
        let sort_order = match sort_order {
            Some(value) => value,
            None => self.next_sort_order()?,
        };
        let completed_timestamp = match status {
            Status::Done => Some(now_timestamp()),
            Status::Todo => None,
        };
        self.conn.execute(
            "INSERT INTO todos (text, timestamp, status, completed_timestamp, parent_id, sort_order, priority)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL)",
            params![text, timestamp, status.as_str(), completed_timestamp, parent_id, sort_order],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("added todo {id}: {text:?}");
        Ok(TodoRecord {
            id,
            text: text.to_string(),
            timestamp,
            status,
            completed_timestamp,
            parent_id,
            sort_order,
            priority: None,
        })
    }

    pub fn update_text(&self, id: i64, text: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE todos SET text = ?1 WHERE id = ?2",
            params![text, id],
        )?;
        Ok(())
    }

    /// Change the status, stamping or clearing the completion time.
    pub fn update_status(&self, id: i64, status: Status) -> Result<(), StoreError> {
        let completed_timestamp = match status {
            Status::Done => Some(now_timestamp()),
            Status::Todo => None,
        };
        self.conn.execute(
            "UPDATE todos SET status = ?1, completed_timestamp = ?2 WHERE id = ?3",
            params![status.as_str(), completed_timestamp, id],
        )?;
        Ok(())
    }

    pub fn update_priority(&self, id: i64, priority: Option<u8>) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE todos SET priority = ?1 WHERE id = ?2",
            params![priority, id],
        )?;
        Ok(())
    }

    pub fn update_parent(&self, id: i64, parent_id: Option<i64>) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE todos SET parent_id = ?1 WHERE id = ?2",
            params![parent_id, id],
        )?;
        Ok(())
    }

    pub fn update_sort_order(&self, id: i64, sort_order: f64) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE todos SET sort_order = ?1 WHERE id = ?2",
            params![sort_order, id],
        )?;
        Ok(())
    }

    /// Delete a todo. Children are not cascaded; they surface as roots.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Record a completed focus session against a todo.
    pub fn add_focus_seconds(&self, todo_id: i64, seconds: u64) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO focus_sessions (todo_id, seconds, recorded_at) VALUES (?1, ?2, ?3)",
            params![todo_id, seconds as i64, now_timestamp()],
        )?;
        Ok(())
    }

    /// Todos created per day over the trailing window ending today.
    pub fn created_counts_by_day(&self, days: u32) -> Result<Vec<u64>, StoreError> {
        self.day_counts(
            "SELECT date(timestamp) AS day, COUNT(*) AS total
             FROM todos WHERE timestamp >= ?1
             GROUP BY day ORDER BY day",
            days,
            Utc::now().date_naive(),
        )
    }

    /// Todos completed per day over the trailing window ending today.
    pub fn completed_counts_by_day(&self, days: u32) -> Result<Vec<u64>, StoreError> {
        self.completed_counts_window(days, Utc::now().date_naive())
    }

    pub(crate) fn completed_counts_window(
        &self,
        days: u32,
        today: NaiveDate,
    ) -> Result<Vec<u64>, StoreError> {
        self.day_counts(
            "SELECT date(completed_timestamp) AS day, COUNT(*) AS total
             FROM todos WHERE completed_timestamp IS NOT NULL AND completed_timestamp >= ?1
             GROUP BY day ORDER BY day",
            days,
            today,
        )
    }

    /// Whole focus minutes per day over the trailing window ending today.
    pub fn focus_minutes_by_day(&self, days: u32) -> Result<Vec<u64>, StoreError> {
        self.focus_minutes_window(days, Utc::now().date_naive())
    }

    pub(crate) fn focus_minutes_window(
        &self,
        days: u32,
        today: NaiveDate,
    ) -> Result<Vec<u64>, StoreError> {
        let seconds = self.day_counts(
            "SELECT date(recorded_at) AS day, SUM(seconds) AS total
             FROM focus_sessions WHERE recorded_at >= ?1
             GROUP BY day ORDER BY day",
            days,
            today,
        )?;
        Ok(seconds.into_iter().map(|s| s / 60).collect())
    }

    /// Run a `(day, total)` aggregate and zero-fill it into a fixed-length
    /// window of `days` entries, oldest first.
    fn day_counts(&self, sql: &str, days: u32, today: NaiveDate) -> Result<Vec<u64>, StoreError> {
        let days = days.max(1);
        let start_day = today - Duration::days(i64::from(days) - 1);
        let start_timestamp = format!("{}T00:00:00Z", start_day.format("%Y-%m-%d"));

        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params![start_timestamp], |row| {
            let day: String = row.get(0)?;
            let total: i64 = row.get(1)?;
            Ok((day, total.max(0) as u64))
        })?;
        let totals: HashMap<String, u64> = rows.collect::<Result<HashMap<_, _>, _>>()?;

        Ok((0..days)
            .map(|offset| {
                let day = start_day + Duration::days(i64::from(offset));
                totals
                    .get(&day.format("%Y-%m-%d").to_string())
                    .copied()
                    .unwrap_or(0)
            })
            .collect())
    }

    /// Read a persisted boolean setting, falling back to `default` when the
    /// key is missing or unparsable.
    pub fn get_bool_setting(&self, key: &str, default: bool) -> Result<bool, StoreError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(match value.as_deref() {
            Some("true") => true,
            Some("false") => false,
            _ => default,
        })
    }

    pub fn set_bool_setting(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, if value { "true" } else { "false" }],
        )?;
        Ok(())
    }

    fn next_sort_order(&self) -> Result<f64, StoreError> {
        let max: f64 = self.conn.query_row(
            "SELECT COALESCE(MAX(sort_order), 0) FROM todos",
            [],
            |row| row.get(0),
        )?;
        Ok(max + 1.0)
    }
}

/// Current time as an RFC 3339 UTC string with second precision. Uniform
/// formatting keeps lexicographic comparison consistent with time order.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TodoRecord> {
    let status_text: String = row.get(3)?;
    let status = Status::parse(&status_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            Box::new(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unknown status {status_text:?}"),
            )),
        )
    })?;
    Ok(TodoRecord {
        id: row.get(0)?,
        text: row.get(1)?,
        timestamp: row.get(2)?,
        status,
        completed_timestamp: row.get(4)?,
        parent_id: row.get(5)?,
        sort_order: row.get(6)?,
        priority: row.get(7)?,
    })
}

fn initialize(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            status TEXT NOT NULL CHECK(status IN ('todo', 'done')),
            completed_timestamp TEXT,
            parent_id INTEGER,
            sort_order REAL NOT NULL DEFAULT 0,
            priority INTEGER
        );
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS focus_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            todo_id INTEGER NOT NULL,
            seconds INTEGER NOT NULL,
            recorded_at TEXT NOT NULL
        );",
    )?;
    // Databases created by earlier releases predate some columns.
    ensure_column(conn, "todos", "completed_timestamp", "TEXT")?;
    ensure_column(conn, "todos", "parent_id", "INTEGER")?;
    ensure_column(conn, "todos", "sort_order", "REAL NOT NULL DEFAULT 0")?;
    ensure_column(conn, "todos", "priority", "INTEGER")?;
    Ok(())
}

/// Add `column` to `table` if it is missing.
fn ensure_column(
    conn: &Connection,
    table: &str,
    column: &str,
    definition: &str,
) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let existing = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    if existing.iter().any(|name| name == column) {
        return Ok(());
    }
    conn.execute_batch(&format!("ALTER TABLE {table} ADD COLUMN {column} {definition}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store::open_in_memory().unwrap()
    }

    #[test]
    fn test_add_then_list_contains_item_once() {
        let store = store();
        let added = store.add("write tests", Status::Todo, None, None).unwrap();
        let listed = store.list(Status::Todo).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], added);
    }

    #[test]
    fn test_delete_removes_item() {
        let store = store();
        let a = store.add("keep", Status::Todo, None, None).unwrap();
        let b = store.add("drop", Status::Todo, None, None).unwrap();
        store.delete(b.id).unwrap();
        let ids: Vec<i64> = store
            .list(Status::Todo)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![a.id]);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let store = store();
        let added = store.add("flip me", Status::Todo, None, None).unwrap();

        store.update_status(added.id, Status::Done).unwrap();
        let done = store.get(added.id).unwrap().unwrap();
        assert_eq!(done.status, Status::Done);
        assert!(done.completed_timestamp.is_some());

        store.update_status(added.id, Status::Todo).unwrap();
        let back = store.get(added.id).unwrap().unwrap();
        assert_eq!(back.status, Status::Todo);
        assert_eq!(back.completed_timestamp, None);
    }

    #[test]
    fn test_edit_preserves_id_and_status() {
        let store = store();
        let added = store.add("tpyo", Status::Todo, None, None).unwrap();
        store.update_status(added.id, Status::Done).unwrap();
        store.update_text(added.id, "typo").unwrap();

        let record = store.get(added.id).unwrap().unwrap();
        assert_eq!(record.id, added.id);
        assert_eq!(record.text, "typo");
        assert_eq!(record.status, Status::Done);
    }

    #[test]
    fn test_plain_adds_list_in_insertion_order() {
        let store = store();
        let first = store.add("first", Status::Todo, None, None).unwrap();
        let second = store.add("second", Status::Todo, None, None).unwrap();
        let third = store.add("third", Status::Todo, None, None).unwrap();
        let ids: Vec<i64> = store
            .list(Status::Todo)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
    }

    #[test]
    fn test_fractional_sort_order_reorders_listing() {
        let store = store();
        let first = store.add("first", Status::Todo, None, None).unwrap();
        let second = store.add("second", Status::Todo, None, None).unwrap();
        // Move `second` before `first` with a midpoint-style key.
        store.update_sort_order(second.id, first.sort_order - 0.5).unwrap();
        let ids: Vec<i64> = store
            .list(Status::Todo)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_priority_round_trip() {
        let store = store();
        let added = store.add("rank me", Status::Todo, None, None).unwrap();
        store.update_priority(added.id, Some(3)).unwrap();
        assert_eq!(store.get(added.id).unwrap().unwrap().priority, Some(3));
        store.update_priority(added.id, None).unwrap();
        assert_eq!(store.get(added.id).unwrap().unwrap().priority, None);
    }

    #[test]
    fn test_reparent_round_trip() {
        let store = store();
        let parent = store.add("parent", Status::Todo, None, None).unwrap();
        let child = store.add("child", Status::Todo, None, None).unwrap();
        store.update_parent(child.id, Some(parent.id)).unwrap();
        assert_eq!(
            store.get(child.id).unwrap().unwrap().parent_id,
            Some(parent.id)
        );
        store.update_parent(child.id, None).unwrap();
        assert_eq!(store.get(child.id).unwrap().unwrap().parent_id, None);
    }

    #[test]
    fn test_delete_leaves_children_as_roots() {
        let store = store();
        let parent = store.add("parent", Status::Todo, None, None).unwrap();
        let child = store
            .add("child", Status::Todo, Some(parent.id), None)
            .unwrap();
        store.delete(parent.id).unwrap();
        let listed = store.list(Status::Todo).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, child.id);
        // The stale parent reference stays; display treats it as a root.
        assert_eq!(listed[0].parent_id, Some(parent.id));
    }

    #[test]
    fn test_completed_counts_window_zero_fills() {
        let store = store();
        let today = Utc::now().date_naive();
        let a = store.add("a", Status::Todo, None, None).unwrap();
        let b = store.add("b", Status::Todo, None, None).unwrap();
        store.update_status(a.id, Status::Done).unwrap();
        store.update_status(b.id, Status::Done).unwrap();

        let counts = store.completed_counts_window(14, today).unwrap();
        assert_eq!(counts.len(), 14);
        assert_eq!(counts[13], 2);
        assert!(counts[..13].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_completed_counts_ignore_open_items() {
        let store = store();
        store.add("open", Status::Todo, None, None).unwrap();
        let counts = store
            .completed_counts_window(7, Utc::now().date_naive())
            .unwrap();
        assert_eq!(counts, vec![0; 7]);
    }

    #[test]
    fn test_focus_minutes_aggregate() {
        let store = store();
        let added = store.add("deep work", Status::Todo, None, None).unwrap();
        store.add_focus_seconds(added.id, 90).unwrap();
        store.add_focus_seconds(added.id, 45).unwrap();

        let minutes = store
            .focus_minutes_window(7, Utc::now().date_naive())
            .unwrap();
        assert_eq!(minutes.len(), 7);
        // 135 seconds rounds down to 2 whole minutes.
        assert_eq!(minutes[6], 2);
    }

    #[test]
    fn test_list_done_today_filters_by_day() {
        let store = store();
        let done = store.add("done now", Status::Todo, None, None).unwrap();
        store.update_status(done.id, Status::Done).unwrap();

        let today = Utc::now().date_naive();
        assert_eq!(store.list_done_on(today).unwrap().len(), 1);
        assert_eq!(
            store.list_done_on(today - Duration::days(1)).unwrap().len(),
            0
        );
    }

    #[test]
    fn test_bool_setting_round_trip() {
        let store = store();
        assert!(store.get_bool_setting("dashboard.show_done_items", true).unwrap());
        store
            .set_bool_setting("dashboard.show_done_items", false)
            .unwrap();
        assert!(!store.get_bool_setting("dashboard.show_done_items", true).unwrap());
        store
            .set_bool_setting("dashboard.show_done_items", true)
            .unwrap();
        assert!(store.get_bool_setting("dashboard.show_done_items", false).unwrap());
    }

    #[test]
    fn test_done_items_list_separately() {
        let store = store();
        let open = store.add("open", Status::Todo, None, None).unwrap();
        let done = store.add("done", Status::Todo, None, None).unwrap();
        store.update_status(done.id, Status::Done).unwrap();

        let todo_ids: Vec<i64> = store.list(Status::Todo).unwrap().iter().map(|r| r.id).collect();
        let done_ids: Vec<i64> = store.list(Status::Done).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(todo_ids, vec![open.id]);
        assert_eq!(done_ids, vec![done.id]);
    }
}
