/// Tool for building the weekly summary
///
/// This module implements the weekly_summary MCP tool: labels, the four
/// chart series, seven-day averages, and the insight messages.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::insights::{InsightEngine, WeeklySummary};
use crate::storage::HealthStore;
use crate::ServerError;

/// Parameters for the weekly summary
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WeeklySummaryParams {
    /// Last day of the week to summarize (YYYY-MM-DD, optional - defaults to today)
    pub date: Option<String>,
}

/// Response carrying the full weekly summary plus a formatted message
#[derive(Debug, Serialize)]
pub struct WeeklySummaryResponse {
    pub summary: WeeklySummary,
    pub message: String,
}

/// Build the weekly summary for the week ending at the requested date
pub async fn weekly_summary<S: HealthStore>(
    store: &S,
    engine: &InsightEngine,
    params: WeeklySummaryParams,
) -> Result<WeeklySummaryResponse, ServerError> {
    let today = super::parse_date_or_today(params.date.as_deref())?;

    let stats = store.weekly_stats(today).await?;
    let summary = engine.summarize(today, &stats);
    let message = format_summary(today, &summary);

    Ok(WeeklySummaryResponse { summary, message })
}

/// Render the summary as a human-readable block
fn format_summary(today: chrono::NaiveDate, summary: &WeeklySummary) -> String {
    let insights = summary
        .insights
        .iter()
        .map(|i| format!("- {}", i.message))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "📊 **Weekly Summary** (week ending {})\n\n\
         Averages: {:.0} steps, {:.1} h sleep, {:.0} active minutes per day\n\n\
         {}",
        today, summary.averages.steps, summary.averages.sleep_hours,
        summary.averages.active_minutes, insights
    )
}
