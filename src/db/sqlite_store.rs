use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{EventStore, StoreError};
use crate::models::tracking_event::{EventKind, TrackingEvent};

/// SQLite-backed store with one table per event kind.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) the database file and its tables.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init(conn, Some(path.to_path_buf()))
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self, StoreError> {
        for kind in EventKind::all() {
            conn.execute_batch(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    lead_id TEXT NOT NULL,
                    campaign TEXT NOT NULL DEFAULT '',
                    industry TEXT NOT NULL DEFAULT '',
                    timestamp TEXT NOT NULL,
                    user_agent TEXT NOT NULL DEFAULT '',
                    ip_hash TEXT NOT NULL DEFAULT ''
                );
                CREATE INDEX IF NOT EXISTS idx_{table}_campaign ON {table}(campaign);
                "#,
                table = kind.table_name()
            ))?;
        }

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(f(&conn)?)
    }
}

type EventRow = (String, String, String, String, String, String);

impl EventStore for SqliteStore {
    fn append(&self, event: &TrackingEvent) -> Result<(), StoreError> {
        // Table names come from EventKind, never from request input
        let sql = format!(
            "INSERT INTO {} (lead_id, campaign, industry, timestamp, user_agent, ip_hash)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            event.kind.table_name()
        );
        self.with_conn(|conn| {
            conn.execute(
                &sql,
                params![
                    event.lead_id,
                    event.campaign,
                    event.industry,
                    event.timestamp.to_rfc3339(),
                    event.user_agent,
                    event.ip_hash,
                ],
            )
        })?;
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<TrackingEvent>, StoreError> {
        let mut events = Vec::new();
        for kind in EventKind::all() {
            let sql = format!(
                "SELECT lead_id, campaign, industry, timestamp, user_agent, ip_hash
                 FROM {} ORDER BY id",
                kind.table_name()
            );
            let rows: Vec<EventRow> = self.with_conn(|conn| {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map([], |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                })?;
                let collected = rows.collect::<Result<Vec<_>, _>>();
                collected
            })?;

            for (lead_id, campaign, industry, ts, user_agent, ip_hash) in rows {
                let timestamp = match DateTime::parse_from_rfc3339(&ts) {
                    Ok(t) => t.with_timezone(&Utc),
                    Err(e) => {
                        log::debug!("Skipping {} row with bad timestamp {:?}: {}", kind, ts, e);
                        continue;
                    }
                };
                events.push(TrackingEvent {
                    kind,
                    lead_id,
                    campaign,
                    industry,
                    timestamp,
                    user_agent,
                    ip_hash,
                });
            }
        }
        Ok(events)
    }

    fn ping(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))?;
        Ok(())
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(p) => format!("sqlite:{}", p.display()),
            None => String::from("sqlite::memory:"),
        }
    }
}
