/// SQLite implementation of the health store interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving daily statistics and activity records. It handles all
/// SQL queries and data conversion.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};

use crate::domain::{ActivityId, ActivityKind, ActivityRecord, DailyStat};
use crate::storage::{migrations, HealthStore, StorageError};

/// SQLite-based store implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the operations defined in the HealthStore trait. The connection
/// sits behind a mutex so the store stays Send + Sync for the async trait;
/// every operation locks, does its synchronous SQLite work, and releases
/// before returning.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SQLite store instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        // Initialize/migrate the database schema
        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite store initialized at: {:?}", db_path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Lock the connection for one operation
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Connection("Database connection mutex poisoned".to_string()))
    }

    /// Helper method to convert ActivityKind enum to string for database storage
    fn kind_to_string(kind: &ActivityKind) -> String {
        match kind {
            ActivityKind::Walk => "walk".to_string(),
            ActivityKind::Run => "run".to_string(),
            ActivityKind::Cycle => "cycle".to_string(),
            ActivityKind::Swim => "swim".to_string(),
            ActivityKind::Strength => "strength".to_string(),
            ActivityKind::Yoga => "yoga".to_string(),
            ActivityKind::Other(name) => format!("other:{}", name),
        }
    }

    /// Helper method to convert string from database to ActivityKind enum
    fn string_to_kind(s: &str) -> Result<ActivityKind, StorageError> {
        match s {
            "walk" => Ok(ActivityKind::Walk),
            "run" => Ok(ActivityKind::Run),
            "cycle" => Ok(ActivityKind::Cycle),
            "swim" => Ok(ActivityKind::Swim),
            "strength" => Ok(ActivityKind::Strength),
            "yoga" => Ok(ActivityKind::Yoga),
            s if s.starts_with("other:") => {
                let name = s.strip_prefix("other:").unwrap_or("").to_string();
                Ok(ActivityKind::Other(name))
            }
            _ => Err(StorageError::Query(rusqlite::Error::InvalidColumnType(
                0,
                "Invalid activity kind".to_string(),
                rusqlite::types::Type::Text,
            ))),
        }
    }
}

#[async_trait]
impl HealthStore for SqliteStore {
    /// Insert or replace one day's aggregated statistics
    async fn upsert_daily_stat(
        &self,
        day: NaiveDate,
        stat: &DailyStat,
    ) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO daily_stats (
                day, steps, calories, active_minutes, sleep_hours
            ) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                day,
                stat.steps,
                stat.calories,
                stat.active_minutes,
                stat.sleep_hours
            ],
        )?;

        tracing::debug!("Upserted daily stats for {}", day);
        Ok(())
    }

    /// Read the daily statistics for the week ending at `today`
    ///
    /// Returns the contiguous span from the oldest recorded day in the
    /// 7-day window through `today`, oldest first, zero-filling days inside
    /// the span that have no row. An untouched window yields an empty vec.
    async fn weekly_stats(&self, today: NaiveDate) -> Result<Vec<DailyStat>, StorageError> {
        let start = today - chrono::Duration::days(6);

        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT day, steps, calories, active_minutes, sleep_hours
             FROM daily_stats
             WHERE day BETWEEN ?1 AND ?2
             ORDER BY day ASC",
        )?;

        let row_iter = stmt.query_map(params![start, today], |row| {
            let day: NaiveDate = row.get(0)?;
            let stat = DailyStat {
                steps: row.get(1)?,
                calories: row.get(2)?,
                active_minutes: row.get(3)?,
                sleep_hours: row.get(4)?,
            };
            Ok((day, stat))
        })?;

        let mut recorded = Vec::new();
        for row in row_iter {
            recorded.push(row?);
        }

        let Some(&(oldest, _)) = recorded.first() else {
            return Ok(Vec::new());
        };

        // Walk the span day by day, substituting zero for gaps
        let mut stats = Vec::new();
        let mut day = oldest;
        while day <= today {
            let stat = recorded
                .iter()
                .find(|(d, _)| *d == day)
                .map(|&(_, s)| s)
                .unwrap_or_else(DailyStat::zero);
            stats.push(stat);
            day += chrono::Duration::days(1);
        }

        Ok(stats)
    }

    /// Append one activity record
    async fn insert_activity(&self, activity: &ActivityRecord) -> Result<(), StorageError> {
        let kind_str = Self::kind_to_string(&activity.kind);

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO activities (
                id, kind, started_at, duration_minutes, calories, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                activity.id.to_string(),
                kind_str,
                activity.started_at,
                activity.duration_minutes,
                activity.calories,
                activity.notes
            ],
        )?;

        tracing::debug!(
            "Inserted activity: {} ({})",
            activity.kind.display_name(),
            activity.id.to_string()
        );
        Ok(())
    }

    /// List the most recent activities, newest first
    async fn recent_activities(&self, limit: u32) -> Result<Vec<ActivityRecord>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, kind, started_at, duration_minutes, calories, notes
             FROM activities
             ORDER BY started_at DESC
             LIMIT ?1",
        )?;

        let activity_iter = stmt.query_map(params![limit], |row| {
            let id_str: String = row.get(0)?;
            let id = ActivityId::from_string(&id_str).map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    0,
                    "Invalid UUID".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?;

            let kind_str: String = row.get(1)?;
            let kind = Self::string_to_kind(&kind_str).map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    1,
                    "Invalid activity kind".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?;

            let started_at: DateTime<Utc> = row.get(2)?;

            Ok(ActivityRecord::from_existing(
                id,
                kind,
                started_at,
                row.get(3)?, // duration_minutes
                row.get(4)?, // calories
                row.get(5)?, // notes
            ))
        })?;

        let mut activities = Vec::new();
        for activity in activity_iter {
            activities.push(activity?);
        }

        Ok(activities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn open_store() -> (NamedTempFile, SqliteStore) {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = SqliteStore::new(temp_file.path().to_path_buf()).expect("Failed to open store");
        (temp_file, store)
    }

    fn stat(steps: u32) -> DailyStat {
        DailyStat::new(steps, 1_800.0, 35.0, 7.2).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_day() {
        let (_file, store) = open_store();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        store.upsert_daily_stat(today, &stat(4_000)).await.unwrap();
        store.upsert_daily_stat(today, &stat(9_500)).await.unwrap();

        let week = store.weekly_stats(today).await.unwrap();
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].steps, 9_500);
    }

    #[tokio::test]
    async fn test_weekly_stats_zero_fills_interior_gaps() {
        let (_file, store) = open_store();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        store
            .upsert_daily_stat(today - chrono::Duration::days(3), &stat(3_000))
            .await
            .unwrap();
        store.upsert_daily_stat(today, &stat(6_000)).await.unwrap();

        let week = store.weekly_stats(today).await.unwrap();
        assert_eq!(week.len(), 4);
        assert_eq!(week[0].steps, 3_000);
        assert_eq!(week[1], DailyStat::zero());
        assert_eq!(week[2], DailyStat::zero());
        assert_eq!(week[3].steps, 6_000);
    }

    #[tokio::test]
    async fn test_weekly_stats_ignores_days_outside_window() {
        let (_file, store) = open_store();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        store
            .upsert_daily_stat(today - chrono::Duration::days(10), &stat(8_000))
            .await
            .unwrap();
        store.upsert_daily_stat(today, &stat(5_000)).await.unwrap();

        let week = store.weekly_stats(today).await.unwrap();
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].steps, 5_000);
    }

    #[tokio::test]
    async fn test_weekly_stats_empty_window() {
        let (_file, store) = open_store();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let week = store.weekly_stats(today).await.unwrap();
        assert!(week.is_empty());
    }

    #[tokio::test]
    async fn test_recent_activities_newest_first_with_limit() {
        let (_file, store) = open_store();
        let base = Utc::now() - chrono::Duration::hours(10);

        for i in 0..5 {
            let record = ActivityRecord::new(
                ActivityKind::Walk,
                base + chrono::Duration::hours(i),
                20.0 + i as f64,
                None,
                None,
            )
            .unwrap();
            store.insert_activity(&record).await.unwrap();
        }

        let recent = store.recent_activities(3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].duration_minutes, 24.0);
        assert_eq!(recent[2].duration_minutes, 22.0);
    }

    #[tokio::test]
    async fn test_activity_round_trip_preserves_fields() {
        let (_file, store) = open_store();

        let record = ActivityRecord::new(
            ActivityKind::Other("climbing".to_string()),
            Utc::now() - chrono::Duration::hours(2),
            55.0,
            Some(420.0),
            Some("Indoor wall".to_string()),
        )
        .unwrap();
        store.insert_activity(&record).await.unwrap();

        let recent = store.recent_activities(10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, record.id);
        assert_eq!(recent[0].kind, record.kind);
        assert_eq!(recent[0].calories, Some(420.0));
        assert_eq!(recent[0].notes.as_deref(), Some("Indoor wall"));
    }
}
