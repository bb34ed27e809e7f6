/// Storage layer for persisting health data
///
/// This module handles all database operations using SQLite. It provides
/// the in-process data service the dashboard reads from: daily statistics
/// keyed by calendar day, and individual activity records.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{ActivityRecord, DailyStat};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for health data
///
/// This trait is the collaborator contract the dashboard consumes. It also
/// allows swapping SQLite for another backend (or a test double) while
/// keeping the same interface.
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Insert or replace one day's aggregated statistics
    async fn upsert_daily_stat(
        &self,
        day: NaiveDate,
        stat: &DailyStat,
    ) -> Result<(), StorageError>;

    /// Read the daily statistics for the week ending at `today`
    ///
    /// Returns 0 to 7 records, oldest first, covering the contiguous span
    /// from the oldest recorded day in the window through `today`. Days
    /// inside that span without a row come back zero-valued; no rows at all
    /// yields an empty vec. Left-padding beyond the span is the insight
    /// engine's job.
    async fn weekly_stats(&self, today: NaiveDate) -> Result<Vec<DailyStat>, StorageError>;

    /// Append one activity record
    async fn insert_activity(&self, activity: &ActivityRecord) -> Result<(), StorageError>;

    /// List the most recent activities, newest first, at most `limit`
    async fn recent_activities(&self, limit: u32) -> Result<Vec<ActivityRecord>, StorageError>;
}
