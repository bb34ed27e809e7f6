//! Daily statistics entities used by the weekly summary
//!
//! This module defines the DailyStat struct that holds one day's aggregated
//! activity numbers, plus the DataPoint slot type the normalization step uses
//! to distinguish recorded days from missing ones.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// One day's aggregated activity statistics
///
/// Each calendar day has at most one DailyStat. The numbers are whole-day
/// aggregates, typically synced from a phone or wearable, and are validated
/// once at logging time. Everything downstream treats them as well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    /// Total steps taken this day
    pub steps: u32,
    /// Total calories burned (kcal)
    pub calories: f64,
    /// Minutes of moderate-or-higher activity
    pub active_minutes: f64,
    /// Hours slept the night ending this day
    pub sleep_hours: f64,
}

impl DailyStat {
    /// Create a new daily stat with validation
    ///
    /// This is the constructor used when logging data. It checks that every
    /// number is in a plausible range and returns an error otherwise.
    pub fn new(
        steps: u32,
        calories: f64,
        active_minutes: f64,
        sleep_hours: f64,
    ) -> Result<Self, DomainError> {
        Self::validate_steps(steps)?;
        Self::validate_calories(calories)?;
        Self::validate_active_minutes(active_minutes)?;
        Self::validate_sleep_hours(sleep_hours)?;

        Ok(Self {
            steps,
            calories,
            active_minutes,
            sleep_hours,
        })
    }

    /// The all-zero stat used to stand in for days without data
    pub fn zero() -> Self {
        Self {
            steps: 0,
            calories: 0.0,
            active_minutes: 0.0,
            sleep_hours: 0.0,
        }
    }

    // Validation helper methods

    /// Validate the step count
    fn validate_steps(steps: u32) -> Result<(), DomainError> {
        if steps > 200_000 {
            return Err(DomainError::InvalidValue {
                message: "Steps cannot exceed 200,000 per day".to_string(),
            });
        }
        Ok(())
    }

    /// Validate the calorie total
    fn validate_calories(calories: f64) -> Result<(), DomainError> {
        if !calories.is_finite() || calories < 0.0 {
            return Err(DomainError::InvalidValue {
                message: "Calories must be a non-negative number".to_string(),
            });
        }
        if calories > 20_000.0 {
            return Err(DomainError::InvalidValue {
                message: "Calories cannot exceed 20,000 per day".to_string(),
            });
        }
        Ok(())
    }

    /// Validate the active minutes total
    fn validate_active_minutes(active_minutes: f64) -> Result<(), DomainError> {
        if !active_minutes.is_finite() || active_minutes < 0.0 {
            return Err(DomainError::InvalidValue {
                message: "Active minutes must be a non-negative number".to_string(),
            });
        }
        if active_minutes > 1_440.0 {
            return Err(DomainError::InvalidValue {
                message: "Active minutes cannot exceed 1,440 (a full day)".to_string(),
            });
        }
        Ok(())
    }

    /// Validate the sleep hours total
    fn validate_sleep_hours(sleep_hours: f64) -> Result<(), DomainError> {
        if !sleep_hours.is_finite() || sleep_hours < 0.0 {
            return Err(DomainError::InvalidValue {
                message: "Sleep hours must be a non-negative number".to_string(),
            });
        }
        if sleep_hours > 24.0 {
            return Err(DomainError::InvalidValue {
                message: "Sleep hours cannot exceed 24".to_string(),
            });
        }
        Ok(())
    }
}

/// One slot in the seven-day window: a recorded day or a gap
///
/// The weekly normalization works over these slots so that "no data" stays
/// distinguishable from "recorded zero" right up until the gap policy is
/// applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataPoint {
    /// A day with recorded statistics
    Present(DailyStat),
    /// A day with no recorded data
    Missing,
}

impl DataPoint {
    /// Check whether this slot holds recorded data
    pub fn is_present(&self) -> bool {
        matches!(self, DataPoint::Present(_))
    }
}

/// How days without recorded data are filled before averaging
///
/// Today there is a single policy: missing days count as zero activity,
/// which biases averages downward for short histories. Keeping the choice
/// here makes it swappable without touching the insight rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Treat a missing day as all-zero statistics
    #[default]
    ZeroFill,
}

impl GapPolicy {
    /// Resolve one slot to a concrete stat
    pub fn fill(&self, day: DataPoint) -> DailyStat {
        match (self, day) {
            (_, DataPoint::Present(stat)) => stat,
            (GapPolicy::ZeroFill, DataPoint::Missing) => DailyStat::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid_stat() {
        let stat = DailyStat::new(8_500, 2_150.0, 42.0, 7.5);

        assert!(stat.is_ok());
        let stat = stat.unwrap();
        assert_eq!(stat.steps, 8_500);
        assert_eq!(stat.sleep_hours, 7.5);
    }

    #[test]
    fn test_sleep_over_24_hours_invalid() {
        let result = DailyStat::new(1_000, 500.0, 10.0, 25.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_calories_invalid() {
        let result = DailyStat::new(1_000, -10.0, 10.0, 7.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_values_invalid() {
        assert!(DailyStat::new(0, f64::NAN, 0.0, 0.0).is_err());
        assert!(DailyStat::new(0, 0.0, f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_zero_stat() {
        let zero = DailyStat::zero();
        assert_eq!(zero.steps, 0);
        assert_eq!(zero.calories, 0.0);
        assert_eq!(zero.active_minutes, 0.0);
        assert_eq!(zero.sleep_hours, 0.0);
    }

    #[test]
    fn test_gap_policy_keeps_present_days() {
        let stat = DailyStat::new(4_000, 1_800.0, 30.0, 8.0).unwrap();
        let filled = GapPolicy::ZeroFill.fill(DataPoint::Present(stat));
        assert_eq!(filled, stat);
    }

    #[test]
    fn test_gap_policy_zero_fills_missing_days() {
        let filled = GapPolicy::ZeroFill.fill(DataPoint::Missing);
        assert_eq!(filled, DailyStat::zero());
    }
}
