//! User store — accounts plus one JSON aggregate blob per user.
//!
//! SQLite stands in for the browser local storage the original client used:
//! a `users` table keyed by email and a `user_data` table holding the full
//! per-user aggregate as one JSON document. Saves overwrite the blob
//! unconditionally; there is no partial update and no cross-writer
//! coordination beyond last-write-wins.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use tracing::info;

use crate::models::user::{UserData, UserRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("corrupt user data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub struct UserStore {
    conn: Arc<Mutex<Connection>>,
}

impl UserStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        info!("Opening user store at {:?}", path.as_ref());
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory store for tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                email TEXT PRIMARY KEY,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS user_data (
                email TEXT PRIMARY KEY,
                data TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Inserts a new account. Fails with [`StoreError::UserExists`] when the
    /// email is already registered.
    pub fn create_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let existing: Option<String> = conn
            .query_row(
                "SELECT email FROM users WHERE email = ?1",
                [&user.email],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(StoreError::UserExists);
        }

        conn.execute(
            "INSERT INTO users (email, password_hash, name, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user.email,
                user.password_hash,
                user.name,
                user.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let record = conn
            .query_row(
                "SELECT email, password_hash, name, created_at FROM users WHERE email = ?1",
                [email],
                |row| {
                    let created_at: String = row.get(3)?;
                    Ok(UserRecord {
                        email: row.get(0)?,
                        password_hash: row.get(1)?,
                        name: row.get(2)?,
                        created_at: DateTime::parse_from_rfc3339(&created_at)
                            .map(|dt| dt.with_timezone(&Utc))
                            .unwrap_or_else(|_| Utc::now()),
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    /// Overwrites the user's aggregate wholesale. No optimistic concurrency
    /// check — the last write wins.
    pub fn save_user_data(&self, email: &str, data: &UserData) -> Result<(), StoreError> {
        let blob = serde_json::to_string(data)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO user_data (email, data) VALUES (?1, ?2)",
            params![email, blob],
        )?;
        Ok(())
    }

    /// Returns the aggregate, or `None` if never written.
    pub fn get_user_data(&self, email: &str) -> Result<Option<UserData>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let blob: Option<String> = conn
            .query_row(
                "SELECT data FROM user_data WHERE email = ?1",
                [email],
                |row| row.get(0),
            )
            .optional()?;
        match blob {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::market::{DemandLevel, MarketTrend};
    use crate::models::plan::{LearningTask, TaskType, WeeklyPlan};

    fn record(email: &str) -> UserRecord {
        UserRecord {
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            name: email.split('@').next().unwrap_or("user").to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_then_get_user() {
        let store = UserStore::in_memory().unwrap();
        store.create_user(&record("jo@example.com")).unwrap();

        let user = store.get_user("jo@example.com").unwrap().unwrap();
        assert_eq!(user.name, "jo");
        assert_eq!(user.password_hash, "$argon2id$stub");
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let store = UserStore::in_memory().unwrap();
        store.create_user(&record("jo@example.com")).unwrap();
        let err = store.create_user(&record("jo@example.com")).unwrap_err();
        assert!(matches!(err, StoreError::UserExists));
    }

    #[test]
    fn test_unknown_user_is_none() {
        let store = UserStore::in_memory().unwrap();
        assert!(store.get_user("ghost@example.com").unwrap().is_none());
        assert!(store.get_user_data("ghost@example.com").unwrap().is_none());
    }

    #[test]
    fn test_aggregate_round_trip_is_deep_equal() {
        let store = UserStore::in_memory().unwrap();
        let mut data = UserData::empty("jo");
        data.user_profile.target_role = "Data Analyst".to_string();
        data.plan = Some(vec![WeeklyPlan {
            week_number: 1,
            theme: "Foundations".to_string(),
            tasks: vec![LearningTask {
                id: "t1".to_string(),
                title: "SQL deep dive".to_string(),
                description: "Window functions and CTEs".to_string(),
                task_type: TaskType::Course,
                estimated_hours: 6.0,
                completed: false,
                video_query: Some("SQL deep dive tutorial".to_string()),
                udemy_query: Some("SQL deep dive course".to_string()),
                coursera_query: Some("SQL deep dive specialization".to_string()),
            }],
        }]);
        data.trends = Some(MarketTrend {
            role: "Data Analyst".to_string(),
            salary_range: "$90k - $130k".to_string(),
            demand_level: DemandLevel::High,
            hot_technologies: vec![],
            industry_news: vec![],
        });

        store.save_user_data("jo@example.com", &data).unwrap();
        let loaded = store.get_user_data("jo@example.com").unwrap().unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let store = UserStore::in_memory().unwrap();
        let mut data = UserData::empty("jo");
        data.user_profile.target_role = "Data Analyst".to_string();
        store.save_user_data("jo@example.com", &data).unwrap();

        let replacement = UserData::empty("jo");
        store.save_user_data("jo@example.com", &replacement).unwrap();

        let loaded = store.get_user_data("jo@example.com").unwrap().unwrap();
        assert!(loaded.user_profile.target_role.is_empty());
    }

    #[test]
    fn test_on_disk_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("careerforge.db");

        {
            let store = UserStore::open(&path).unwrap();
            store.create_user(&record("jo@example.com")).unwrap();
            store
                .save_user_data("jo@example.com", &UserData::empty("jo"))
                .unwrap();
        }

        let store = UserStore::open(&path).unwrap();
        assert!(store.get_user("jo@example.com").unwrap().is_some());
        assert!(store.get_user_data("jo@example.com").unwrap().is_some());
    }
}
