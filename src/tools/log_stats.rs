/// Tool for logging one day's aggregated statistics
///
/// This module implements the log_daily_stats MCP tool.

use chrono::Local;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DailyStat, DomainError};
use crate::storage::HealthStore;
use crate::ServerError;

/// Parameters for logging daily statistics
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogStatsParams {
    /// Date the stats are for (YYYY-MM-DD, optional - defaults to today)
    pub date: Option<String>,
    /// Total steps taken this day
    pub steps: u32,
    /// Total calories burned (kcal)
    pub calories: f64,
    /// Minutes of moderate-or-higher activity
    pub active_minutes: f64,
    /// Hours slept the night ending this day
    pub sleep_hours: f64,
}

/// Response from logging daily statistics
#[derive(Debug, Serialize)]
pub struct LogStatsResponse {
    pub success: bool,
    pub date: String,
    pub message: String,
}

/// Log (or overwrite) one day's aggregates using the provided store
pub async fn log_daily_stats<S: HealthStore>(
    store: &S,
    params: LogStatsParams,
) -> Result<LogStatsResponse, ServerError> {
    let day = super::parse_date_or_today(params.date.as_deref())?;

    if day > Local::now().date_naive() {
        return Err(DomainError::InvalidDate(
            "Cannot log stats for future dates".to_string(),
        )
        .into());
    }

    let stat = DailyStat::new(
        params.steps,
        params.calories,
        params.active_minutes,
        params.sleep_hours,
    )?;

    store.upsert_daily_stat(day, &stat).await?;

    Ok(LogStatsResponse {
        success: true,
        date: day.to_string(),
        message: format!(
            "✅ Logged stats for {}: {} steps, {:.0} kcal, {:.0} active minutes, {:.1} h sleep",
            day, stat.steps, stat.calories, stat.active_minutes, stat.sleep_hours
        ),
    })
}
