/// MCP tools for health tracking
///
/// This module contains all the MCP tools that external clients (like Claude)
/// can call to log health data and read the weekly dashboard.

// Tool implementations live in separate files
pub mod log_stats;
pub mod log_activity;
pub mod summary;
pub mod recent;
pub mod dashboard;

// Re-export tool functions for easy access
pub use log_stats::*;
pub use log_activity::*;
pub use summary::*;
pub use recent::*;
pub use dashboard::*;

use chrono::{Local, NaiveDate};

use crate::domain::DomainError;

/// Parse an optional YYYY-MM-DD date, defaulting to the local calendar day
///
/// Tools take dates as strings so callers can pin a day explicitly; when
/// omitted, "today" means the caller's local day boundary.
pub(crate) fn parse_date_or_today(date: Option<&str>) -> Result<NaiveDate, DomainError> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            DomainError::InvalidDate(format!("Invalid date '{}', expected YYYY-MM-DD", s))
        }),
        None => Ok(Local::now().date_naive()),
    }
}
