/// End-to-end tests driving the MCP tools against a real SQLite database
use health_stats_mcp::tools::*;
use health_stats_mcp::*;
use std::sync::Arc;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn stats_params(date: chrono::NaiveDate, steps: u32) -> LogStatsParams {
        LogStatsParams {
            date: Some(date.to_string()),
            steps,
            calories: 2_000.0,
            active_minutes: 35.0,
            sleep_hours: 7.5,
        }
    }

    #[tokio::test]
    async fn test_log_and_summarize_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = SqliteStore::new(temp_file.path().to_path_buf()).expect("Failed to open store");
        let today = chrono::Local::now().date_naive();

        // Log three days of stats through the tool surface
        for (offset, steps) in [(2, 3_000), (1, 4_000), (0, 5_000)] {
            let day = today - chrono::Duration::days(offset);
            let response = log_daily_stats(&store, stats_params(day, steps))
                .await
                .expect("Failed to log stats");
            assert!(response.success);
        }

        let response = weekly_summary(
            &store,
            &InsightEngine::new(),
            WeeklySummaryParams {
                date: Some(today.to_string()),
            },
        )
        .await
        .expect("Failed to build summary");

        let summary = response.summary;
        // Three recorded days at the tail, four zero-padded days in front
        assert_eq!(summary.series.steps, [0, 0, 0, 0, 3_000, 4_000, 5_000]);
        // 12,000 steps over seven days
        assert!((summary.averages.steps - 12_000.0 / 7.0).abs() < 1e-9);
        assert!(!summary.insights.is_empty());
    }

    #[tokio::test]
    async fn test_log_activity_and_list_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = SqliteStore::new(temp_file.path().to_path_buf()).expect("Failed to open store");

        let logged = log_activity(
            &store,
            LogActivityParams {
                kind: "cycle".to_string(),
                duration_minutes: 60.0,
                started_at: None,
                calories: Some(450.0),
                notes: Some("Evening ride".to_string()),
            },
        )
        .await
        .expect("Failed to log activity");
        assert!(logged.success);

        let listing = recent_activities(&store, RecentActivitiesParams { limit: None })
            .await
            .expect("Failed to list activities");

        assert_eq!(listing.activities.len(), 1);
        assert_eq!(listing.activities[0].kind, ActivityKind::Cycle);
        assert_eq!(listing.activities[0].id.to_string(), logged.activity_id);
    }

    #[tokio::test]
    async fn test_validation_errors_surface_through_tools() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = SqliteStore::new(temp_file.path().to_path_buf()).expect("Failed to open store");
        let tomorrow = chrono::Local::now().date_naive() + chrono::Duration::days(1);

        // Future date
        assert!(log_daily_stats(&store, stats_params(tomorrow, 1_000))
            .await
            .is_err());

        // Unknown activity kind
        assert!(log_activity(
            &store,
            LogActivityParams {
                kind: "teleport".to_string(),
                duration_minutes: 10.0,
                started_at: None,
                calories: None,
                notes: None,
            },
        )
        .await
        .is_err());
    }

    #[tokio::test]
    async fn test_dashboard_view_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store =
            Arc::new(SqliteStore::new(temp_file.path().to_path_buf()).expect("Failed to open store"));
        let today = chrono::Local::now().date_naive();

        log_daily_stats(store.as_ref(), stats_params(today, 11_000))
            .await
            .expect("Failed to log stats");
        log_activity(
            store.as_ref(),
            LogActivityParams {
                kind: "run".to_string(),
                duration_minutes: 25.0,
                started_at: None,
                calories: None,
                notes: None,
            },
        )
        .await
        .expect("Failed to log activity");

        let mut dashboard = Dashboard::new(Arc::clone(&store));
        let view = dashboard_view(
            &mut dashboard,
            DashboardParams {
                date: Some(today.to_string()),
            },
        )
        .await
        .expect("Failed to refresh dashboard");

        let summary = view.summary.expect("summary should be present");
        assert_eq!(summary.series.steps[6], 11_000);
        assert_eq!(view.activities.len(), 1);
    }

    #[tokio::test]
    async fn test_database_persistence_across_reopen() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let today = chrono::Local::now().date_naive();

        {
            let store = SqliteStore::new(db_path.clone()).expect("Failed to open store");
            log_daily_stats(&store, stats_params(today, 6_500))
                .await
                .expect("Failed to log stats");
        }

        // Reopen the same database file and read the data back
        let reopened = SqliteStore::new(db_path).expect("Failed to reopen store");
        let week = reopened
            .weekly_stats(today)
            .await
            .expect("Failed to read weekly stats");

        assert_eq!(week.len(), 1);
        assert_eq!(week[0].steps, 6_500);
    }

    #[tokio::test]
    async fn test_server_creation_and_accessors() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = HealthStatsServer::new(temp_file.path().to_path_buf())
            .await
            .expect("Failed to create server");

        let recent = server
            .store()
            .recent_activities(5)
            .await
            .expect("Failed to query store");
        assert!(recent.is_empty());
        assert!(server.dashboard().summary().is_none());
    }
}
