// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite activity store.
//!
//! A single connection guarded by a mutex; every query runs on the blocking
//! thread pool so async handlers never block the runtime.

use crate::error::AppError;
use crate::models::{Activity, NewActivity, RawActivity, RawSplit};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Result of storing an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Row ID of the stored activity
    pub id: i64,
    /// Whether an activity with the same GPX was replaced
    pub replaced: bool,
}

/// SQLite-backed activity storage.
#[derive(Clone)]
pub struct ActivityStore {
    conn: Arc<Mutex<Connection>>,
}

impl ActivityStore {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;
        tracing::info!(path = %path.as_ref().display(), "Opened activity database");
        Self::from_connection(conn)
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, AppError> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || -> Result<T, AppError> {
            let mut conn = conn
                .lock()
                .map_err(|_| AppError::Database("Connection mutex poisoned".to_string()))?;
            Ok(f(&mut conn)?)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Database task failed: {}", e)))?
    }

    /// Store an activity, replacing any earlier import of the same GPX.
    pub async fn insert_activity(&self, activity: &NewActivity) -> Result<InsertOutcome, AppError> {
        let splits = serde_json::to_string(&activity.details.splits)
            .map_err(|e| AppError::Internal(e.into()))?;
        let activity = activity.clone();

        let outcome = self
            .with_conn(move |conn| {
                let tx = conn.transaction()?;
                let removed = tx.execute(
                    "DELETE FROM activities WHERE gpx_hash = ?1",
                    params![activity.gpx_hash],
                )?;

                let details = &activity.details;
                let inserted = tx.execute(
                    "INSERT INTO activities
                     (name, date, distance, duration, elevation_gain, elevation_loss,
                      average_pace, elevation, splits, gpx, gpx_hash)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                    params![
                        details.name,
                        details.completed_date,
                        details.distance,
                        details.time,
                        details.uphill,
                        details.downhill,
                        details.average_pace,
                        details.elevation,
                        splits,
                        activity.gpx,
                        activity.gpx_hash,
                    ],
                )?;
                if inserted != 1 {
                    return Err(rusqlite::Error::StatementChangedRows(inserted));
                }

                let id = tx.last_insert_rowid();
                tx.commit()?;
                Ok(InsertOutcome {
                    id,
                    replaced: removed > 0,
                })
            })
            .await?;

        if outcome.replaced {
            tracing::info!(id = outcome.id, "Replaced existing activity with same GPX");
        }
        Ok(outcome)
    }

    /// Get an activity by row ID.
    pub async fn get_activity(&self, id: i64) -> Result<Option<Activity>, AppError> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT id, name, date, distance, duration, elevation_gain, elevation_loss,
                        average_pace, elevation, splits, gpx, gpx_hash, created_at
                 FROM activities WHERE id = ?1",
                params![id],
                activity_from_row,
            )
            .optional()
        })
        .await
    }

    /// Number of stored activities.
    pub async fn count_activities(&self) -> Result<u64, AppError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM activities", [], |row| {
                row.get::<_, i64>(0)
            })
        })
        .await
        .map(|n| n.max(0) as u64)
    }
}

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS activities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            date TEXT NOT NULL,
            distance REAL NOT NULL,
            duration REAL NOT NULL,
            elevation_gain REAL NOT NULL,
            elevation_loss REAL NOT NULL,
            average_pace REAL NOT NULL,
            elevation REAL NOT NULL,
            splits TEXT NOT NULL,
            gpx BLOB NOT NULL,
            gpx_hash TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        );
        "#,
    )
}

fn activity_from_row(row: &Row<'_>) -> rusqlite::Result<Activity> {
    const SPLITS_COLUMN: usize = 9;
    let splits_json: String = row.get(SPLITS_COLUMN)?;
    let splits: Vec<RawSplit> = serde_json::from_str(&splits_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(SPLITS_COLUMN, Type::Text, Box::new(e))
    })?;

    Ok(Activity {
        id: row.get(0)?,
        details: RawActivity {
            name: row.get(1)?,
            completed_date: row.get(2)?,
            distance: row.get(3)?,
            time: row.get(4)?,
            uphill: row.get(5)?,
            downhill: row.get(6)?,
            average_pace: row.get(7)?,
            elevation: row.get(8)?,
            splits,
        },
        gpx: row.get(10)?,
        gpx_hash: row.get(11)?,
        created_at: row.get(12)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_activity(hash: &str, name: &str) -> NewActivity {
        NewActivity {
            gpx: b"<gpx/>".to_vec(),
            gpx_hash: hash.to_string(),
            details: RawActivity {
                name: name.to_string(),
                completed_date: "2024-10-19T07:05:00Z".to_string(),
                distance: 1870.0,
                uphill: 12.0,
                downhill: 8.0,
                time: 600.0,
                average_pace: 5.35,
                elevation: 42.0,
                splits: vec![
                    RawSplit {
                        distance: 1000.0,
                        split_time: 320.0,
                        elevation: 50.0,
                    },
                    RawSplit {
                        distance: 870.0,
                        split_time: 280.0,
                        elevation: 46.0,
                    },
                ],
            },
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_activity() {
        let store = ActivityStore::in_memory().unwrap();
        let new = make_activity("abc", "Morning Run");

        let outcome = store.insert_activity(&new).await.unwrap();
        assert_eq!(outcome.id, 1);
        assert!(!outcome.replaced);

        let stored = store.get_activity(outcome.id).await.unwrap().unwrap();
        assert_eq!(stored.id, 1);
        assert_eq!(stored.details, new.details);
        assert_eq!(stored.gpx, new.gpx);
        assert_eq!(stored.gpx_hash, "abc");
        assert!(!stored.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_activity() {
        let store = ActivityStore::in_memory().unwrap();
        assert!(store.get_activity(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_same_gpx_replaces_existing() {
        let store = ActivityStore::in_memory().unwrap();
        store
            .insert_activity(&make_activity("abc", "First"))
            .await
            .unwrap();
        store
            .insert_activity(&make_activity("def", "Other"))
            .await
            .unwrap();

        let outcome = store
            .insert_activity(&make_activity("abc", "Second"))
            .await
            .unwrap();

        assert!(outcome.replaced);
        assert_eq!(store.count_activities().await.unwrap(), 2);
        assert!(store.get_activity(1).await.unwrap().is_none());
        let replaced = store.get_activity(outcome.id).await.unwrap().unwrap();
        assert_eq!(replaced.details.name, "Second");
    }

    #[tokio::test]
    async fn test_open_persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ran.db");

        {
            let store = ActivityStore::open(&path).unwrap();
            store
                .insert_activity(&make_activity("abc", "Saved"))
                .await
                .unwrap();
        }

        let reopened = ActivityStore::open(&path).unwrap();
        let stored = reopened.get_activity(1).await.unwrap().unwrap();
        assert_eq!(stored.details.name, "Saved");
    }
}
