/// Basic unit tests to verify core functionality
use health_stats_mcp::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_daily_stat_creation() {
        let stat = DailyStat::new(8_500, 2_150.0, 42.0, 7.5);

        assert!(stat.is_ok());
        let stat = stat.unwrap();
        assert_eq!(stat.steps, 8_500);
        assert_eq!(stat.sleep_hours, 7.5);
    }

    #[test]
    fn test_daily_stat_rejects_out_of_range_values() {
        assert!(DailyStat::new(1_000, 500.0, 10.0, 25.0).is_err());
        assert!(DailyStat::new(1_000, -10.0, 10.0, 7.0).is_err());
    }

    #[test]
    fn test_activity_record_creation() {
        let started = chrono::Utc::now() - chrono::Duration::hours(2);
        let record = ActivityRecord::new(
            ActivityKind::Strength,
            started,
            45.0,
            Some(200.0),
            Some("Leg day".to_string()),
        );

        assert!(record.is_ok());
        let record = record.unwrap();
        assert_eq!(record.kind, ActivityKind::Strength);
        assert_eq!(record.started_at, started);
    }

    #[test]
    fn test_activity_kind_parsing() {
        assert_eq!(ActivityKind::parse("run").unwrap(), ActivityKind::Run);
        assert!(ActivityKind::parse("levitate").is_err());
    }

    #[test]
    fn test_week_labels_for_known_date() {
        // 2024-03-10 is a Sunday
        let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let labels = week_labels(today);
        assert_eq!(labels, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }

    #[test]
    fn test_insight_engine_never_returns_empty_list() {
        let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let summary = InsightEngine::new().summarize(today, &[]);
        assert!(!summary.insights.is_empty());
    }

    #[tokio::test]
    async fn test_server_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = HealthStatsServer::new(temp_file.path().to_path_buf()).await;
        assert!(server.is_ok());
    }

    #[test]
    fn test_store_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = SqliteStore::new(temp_file.path().to_path_buf());
        assert!(store.is_ok());
    }
}
