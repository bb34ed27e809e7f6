//! Activity record entities
//!
//! This module defines the ActivityRecord struct that represents a single
//! logged activity (a run, a ride, a yoga session), plus its identifier and
//! kind types. Activity records are opaque to the insight engine; they are
//! stored and passed through to the dashboard for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for an activity record
///
/// This is a wrapper around UUID to provide type safety - an activity id
/// cannot be confused with any other string-shaped value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(pub Uuid);

impl ActivityId {
    /// Generate a new random activity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an activity ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Convert to string representation
    pub fn to_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

/// What kind of activity was performed
///
/// A small fixed set of common activities plus an escape hatch for anything
/// else the user wants to log under its own name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    /// Walking, including hiking
    Walk,
    /// Running or jogging
    Run,
    /// Cycling, indoor or outdoor
    Cycle,
    /// Swimming
    Swim,
    /// Weight or resistance training
    Strength,
    /// Yoga or stretching
    Yoga,
    /// User-defined activity with a custom name
    Other(String),
}

impl ActivityKind {
    /// Get the display name for this activity kind
    pub fn display_name(&self) -> &str {
        match self {
            ActivityKind::Walk => "Walk",
            ActivityKind::Run => "Run",
            ActivityKind::Cycle => "Cycle",
            ActivityKind::Swim => "Swim",
            ActivityKind::Strength => "Strength",
            ActivityKind::Yoga => "Yoga",
            ActivityKind::Other(name) => name,
        }
    }

    /// Parse an activity kind from user input
    ///
    /// Accepts the built-in kind names (case-insensitive) or `other:<name>`
    /// for a custom activity.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "walk" => Ok(ActivityKind::Walk),
            "run" => Ok(ActivityKind::Run),
            "cycle" => Ok(ActivityKind::Cycle),
            "swim" => Ok(ActivityKind::Swim),
            "strength" => Ok(ActivityKind::Strength),
            "yoga" => Ok(ActivityKind::Yoga),
            other if other.starts_with("other:") => {
                let name = other.strip_prefix("other:").unwrap_or("").trim();
                if name.is_empty() {
                    return Err(DomainError::InvalidActivityKind(
                        "Custom activity name cannot be empty".to_string(),
                    ));
                }
                Ok(ActivityKind::Other(name.to_string()))
            }
            _ => Err(DomainError::InvalidActivityKind(format!(
                "Invalid activity kind '{}'. Valid options: walk, run, cycle, swim, strength, yoga, or other:name",
                s
            ))),
        }
    }
}

/// A record of one logged activity
///
/// Each time the user logs an activity, we create an ActivityRecord. The
/// insight engine never looks inside these; they only show up in the recent
/// activities list on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Unique identifier for this record
    pub id: ActivityId,
    /// What kind of activity this was
    pub kind: ActivityKind,
    /// When the activity started
    pub started_at: DateTime<Utc>,
    /// How long the activity lasted, in minutes
    pub duration_minutes: f64,
    /// Calories burned, if known
    pub calories: Option<f64>,
    /// User's notes about this activity
    pub notes: Option<String>,
}

impl ActivityRecord {
    /// Create a new activity record with validation
    pub fn new(
        kind: ActivityKind,
        started_at: DateTime<Utc>,
        duration_minutes: f64,
        calories: Option<f64>,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        Self::validate_started_at(&started_at)?;
        Self::validate_duration(duration_minutes)?;
        Self::validate_calories(&calories)?;
        Self::validate_notes(&notes)?;

        Ok(Self {
            id: ActivityId::new(),
            kind,
            started_at,
            duration_minutes,
            calories,
            notes,
        })
    }

    /// Create a record from existing data (used when loading from database)
    ///
    /// This constructor assumes data is already validated and is mainly used
    /// by the storage layer when loading records from the database.
    pub fn from_existing(
        id: ActivityId,
        kind: ActivityKind,
        started_at: DateTime<Utc>,
        duration_minutes: f64,
        calories: Option<f64>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            kind,
            started_at,
            duration_minutes,
            calories,
            notes,
        }
    }

    // Validation helper methods

    /// Validate that the activity did not start in the future
    fn validate_started_at(started_at: &DateTime<Utc>) -> Result<(), DomainError> {
        if *started_at > Utc::now() {
            return Err(DomainError::InvalidDate(
                "Cannot log activities that start in the future".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate the duration (positive, at most a full day)
    fn validate_duration(duration_minutes: f64) -> Result<(), DomainError> {
        if !duration_minutes.is_finite() || duration_minutes <= 0.0 {
            return Err(DomainError::InvalidValue {
                message: "Duration must be a positive number of minutes".to_string(),
            });
        }
        if duration_minutes > 1_440.0 {
            return Err(DomainError::InvalidValue {
                message: "Duration cannot exceed 1,440 minutes (a full day)".to_string(),
            });
        }
        Ok(())
    }

    /// Validate the optional calorie total
    fn validate_calories(calories: &Option<f64>) -> Result<(), DomainError> {
        if let Some(kcal) = calories {
            if !kcal.is_finite() || *kcal < 0.0 {
                return Err(DomainError::InvalidValue {
                    message: "Calories must be a non-negative number".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Validate the optional notes field
    fn validate_notes(notes: &Option<String>) -> Result<(), DomainError> {
        if let Some(note_text) = notes {
            if note_text.len() > 500 {
                return Err(DomainError::InvalidValue {
                    message: "Notes cannot be longer than 500 characters".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid_activity() {
        let record = ActivityRecord::new(
            ActivityKind::Run,
            Utc::now() - chrono::Duration::hours(1),
            32.5,
            Some(310.0),
            Some("Easy pace around the park".to_string()),
        );

        assert!(record.is_ok());
        let record = record.unwrap();
        assert_eq!(record.kind, ActivityKind::Run);
        assert_eq!(record.duration_minutes, 32.5);
    }

    #[test]
    fn test_future_start_invalid() {
        let result = ActivityRecord::new(
            ActivityKind::Walk,
            Utc::now() + chrono::Duration::days(1),
            30.0,
            None,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_duration_invalid() {
        let result = ActivityRecord::new(ActivityKind::Yoga, Utc::now(), 0.0, None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_calories_invalid() {
        let result =
            ActivityRecord::new(ActivityKind::Cycle, Utc::now(), 45.0, Some(-5.0), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!(ActivityKind::parse("run").unwrap(), ActivityKind::Run);
        assert_eq!(ActivityKind::parse("  Swim ").unwrap(), ActivityKind::Swim);
        assert_eq!(
            ActivityKind::parse("other:climbing").unwrap(),
            ActivityKind::Other("climbing".to_string())
        );
    }

    #[test]
    fn test_parse_unknown_kind_invalid() {
        assert!(ActivityKind::parse("teleport").is_err());
        assert!(ActivityKind::parse("other:").is_err());
    }
}
