/// Tool for logging individual activities
///
/// This module implements the log_activity MCP tool.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{ActivityKind, ActivityRecord, DomainError};
use crate::storage::HealthStore;
use crate::ServerError;

/// Parameters for logging an activity
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogActivityParams {
    /// Kind of activity: walk, run, cycle, swim, strength, yoga, or other:name
    pub kind: String,
    /// How long the activity lasted, in minutes
    pub duration_minutes: f64,
    /// When the activity started (RFC 3339, optional - defaults to now)
    pub started_at: Option<String>,
    /// Calories burned (optional)
    pub calories: Option<f64>,
    /// Optional notes about this activity
    pub notes: Option<String>,
}

/// Response from logging an activity
#[derive(Debug, Serialize)]
pub struct LogActivityResponse {
    pub success: bool,
    pub activity_id: String,
    pub message: String,
}

/// Record one activity using the provided store
pub async fn log_activity<S: HealthStore>(
    store: &S,
    params: LogActivityParams,
) -> Result<LogActivityResponse, ServerError> {
    let kind = ActivityKind::parse(&params.kind)?;

    let started_at: DateTime<Utc> = match params.started_at {
        Some(ref s) => DateTime::parse_from_rfc3339(s.trim())
            .map_err(|_| {
                DomainError::InvalidDate(format!(
                    "Invalid start timestamp '{}', expected RFC 3339",
                    s
                ))
            })?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let record = ActivityRecord::new(
        kind,
        started_at,
        params.duration_minutes,
        params.calories,
        params.notes,
    )?;

    let activity_id = record.id.to_string();
    store.insert_activity(&record).await?;

    Ok(LogActivityResponse {
        success: true,
        activity_id,
        message: format!(
            "🏃 Logged {} for {:.0} minutes",
            record.kind.display_name(),
            record.duration_minutes
        ),
    })
}
