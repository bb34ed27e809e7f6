/// Tool for refreshing and reading the stateful dashboard
///
/// This module implements the dashboard_view MCP tool. Unlike the stateless
/// tools it works against the retained Dashboard: both fetches are joined,
/// and a failed fetch leaves the previous state in place rather than
/// surfacing an error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dashboard::Dashboard;
use crate::domain::ActivityRecord;
use crate::insights::WeeklySummary;
use crate::storage::HealthStore;
use crate::ServerError;

/// Parameters for the dashboard view
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DashboardParams {
    /// Day the dashboard is anchored to (YYYY-MM-DD, optional - defaults to today)
    pub date: Option<String>,
}

/// Response carrying the dashboard state after a refresh
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub summary: Option<WeeklySummary>,
    pub activities: Vec<ActivityRecord>,
    pub message: String,
}

/// Refresh the dashboard and return its current state
pub async fn dashboard_view<S: HealthStore>(
    dashboard: &mut Dashboard<S>,
    params: DashboardParams,
) -> Result<DashboardResponse, ServerError> {
    let today = super::parse_date_or_today(params.date.as_deref())?;

    dashboard.refresh(today).await;

    let summary = dashboard.summary().cloned();
    let activities = dashboard.activities().to_vec();
    let message = format_dashboard(summary.as_ref(), &activities);

    Ok(DashboardResponse {
        summary,
        activities,
        message,
    })
}

/// Render the whole dashboard as a human-readable block
fn format_dashboard(summary: Option<&WeeklySummary>, activities: &[ActivityRecord]) -> String {
    let weekly = match summary {
        Some(s) => s
            .insights
            .iter()
            .map(|i| format!("- {}", i.message))
            .collect::<Vec<_>>()
            .join("\n"),
        None => "Weekly data is not available yet.".to_string(),
    };

    format!(
        "🏠 **Dashboard**\n\n{}\n\n{}",
        weekly,
        super::recent::format_activities(activities)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::storage::SqliteStore;
    use crate::tools::{log_daily_stats, LogStatsParams};
    use chrono::Local;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_dashboard_view_reflects_logged_data() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = Arc::new(SqliteStore::new(temp_file.path().to_path_buf()).unwrap());
        let today = Local::now().date_naive();

        log_daily_stats(
            store.as_ref(),
            LogStatsParams {
                date: Some(today.to_string()),
                steps: 9_000,
                calories: 2_200.0,
                active_minutes: 40.0,
                sleep_hours: 7.5,
            },
        )
        .await
        .unwrap();

        let mut dashboard = Dashboard::new(Arc::clone(&store));
        let response = dashboard_view(
            &mut dashboard,
            DashboardParams {
                date: Some(today.to_string()),
            },
        )
        .await
        .unwrap();

        let summary = response.summary.expect("summary should be present");
        assert_eq!(summary.series.steps[6], 9_000);
        assert!(!summary.insights.is_empty());
        assert!(response.message.contains("Dashboard"));
    }

    #[tokio::test]
    async fn test_dashboard_view_rejects_malformed_date() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = Arc::new(SqliteStore::new(temp_file.path().to_path_buf()).unwrap());
        let mut dashboard = Dashboard::new(store);

        let result = dashboard_view(
            &mut dashboard,
            DashboardParams {
                date: Some("soon".to_string()),
            },
        )
        .await;

        assert!(result.is_err());
    }
}
