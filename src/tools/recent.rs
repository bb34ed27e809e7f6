/// Tool for listing recent activities
///
/// This module implements the recent_activities MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dashboard::DEFAULT_RECENT_LIMIT;
use crate::domain::ActivityRecord;
use crate::storage::HealthStore;
use crate::ServerError;

/// Upper bound on a single listing request
const MAX_RECENT_LIMIT: u32 = 100;

/// Parameters for listing recent activities
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RecentActivitiesParams {
    /// Maximum number of activities to return (optional, defaults to 10, capped at 100)
    pub limit: Option<u32>,
}

/// Response from listing recent activities
#[derive(Debug, Serialize)]
pub struct RecentActivitiesResponse {
    pub activities: Vec<ActivityRecord>,
    pub message: String,
}

/// List the most recent activities, newest first
pub async fn recent_activities<S: HealthStore>(
    store: &S,
    params: RecentActivitiesParams,
) -> Result<RecentActivitiesResponse, ServerError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .min(MAX_RECENT_LIMIT);

    let activities = store.recent_activities(limit).await?;
    let message = format_activities(&activities);

    Ok(RecentActivitiesResponse {
        activities,
        message,
    })
}

/// Render the activity list as a human-readable block
pub(crate) fn format_activities(activities: &[ActivityRecord]) -> String {
    if activities.is_empty() {
        return "No activities logged yet. Log your first activity to get started!".to_string();
    }

    let lines = activities
        .iter()
        .map(|a| {
            let calories = a
                .calories
                .map(|kcal| format!(" | 🔥 {:.0} kcal", kcal))
                .unwrap_or_default();
            format!(
                "🏃 **{}** on {} | ⏱️ {:.0} min{}",
                a.kind.display_name(),
                a.started_at.format("%Y-%m-%d %H:%M"),
                a.duration_minutes,
                calories
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "📋 **Recent Activities** ({} shown)\n\n{}",
        activities.len(),
        lines
    )
}
