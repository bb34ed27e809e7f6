//! Dashboard state and refresh flow
//!
//! The dashboard is the retained screen state: the latest weekly summary and
//! the recent activities list. Refreshing issues the two store reads
//! concurrently and applies each result on its own; a failed read is logged
//! and leaves its slice of state untouched.

use std::sync::Arc;

use chrono::NaiveDate;
use futures::join;

use crate::domain::ActivityRecord;
use crate::insights::{InsightEngine, WeeklySummary};
use crate::storage::HealthStore;

/// How many recent activities the dashboard shows by default
pub const DEFAULT_RECENT_LIMIT: u32 = 10;

/// Retained dashboard state backed by a health store
///
/// Generic over the store so tests can substitute a double for SQLite.
pub struct Dashboard<S: HealthStore> {
    store: Arc<S>,
    engine: InsightEngine,
    summary: Option<WeeklySummary>,
    activities: Vec<ActivityRecord>,
}

impl<S: HealthStore> Dashboard<S> {
    /// Create an empty dashboard over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            engine: InsightEngine::new(),
            summary: None,
            activities: Vec::new(),
        }
    }

    /// Refresh both halves of the dashboard for the week ending at `today`
    ///
    /// The weekly-stats and recent-activities reads run concurrently with no
    /// ordering dependency, timeout, or retry. Each result is applied
    /// independently: success replaces that slice of state (the weekly path
    /// runs the insight computation as a synchronous follow-on), failure is
    /// logged and the previous value kept. Never fails.
    pub async fn refresh(&mut self, today: NaiveDate) {
        let (weekly, recent) = join!(
            self.store.weekly_stats(today),
            self.store.recent_activities(DEFAULT_RECENT_LIMIT),
        );

        match weekly {
            Ok(stats) => {
                self.summary = Some(self.engine.summarize(today, &stats));
            }
            Err(e) => {
                tracing::warn!("Weekly stats fetch failed, keeping previous summary: {}", e);
            }
        }

        match recent {
            Ok(activities) => {
                self.activities = activities;
            }
            Err(e) => {
                tracing::warn!(
                    "Recent activities fetch failed, keeping previous list: {}",
                    e
                );
            }
        }
    }

    /// The latest weekly summary, if any refresh has succeeded
    pub fn summary(&self) -> Option<&WeeklySummary> {
        self.summary.as_ref()
    }

    /// The latest recent-activities list
    pub fn activities(&self) -> &[ActivityRecord] {
        &self.activities
    }
}
