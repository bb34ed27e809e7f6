//! Insight engine for the weekly dashboard
//!
//! This module turns up to seven days of daily statistics into the weekly
//! half of the dashboard: chart-ready series, seven-day averages, and a
//! short ordered list of human-readable insight messages. The computation is
//! pure and never fails; missing days are handled by an explicit gap policy.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{week_labels, DailyStat, DataPoint, GapPolicy, WeeklySeries, DAYS_PER_WEEK};

// Threshold bands for the average-based rules. Values strictly below the low
// bound or strictly above the high bound fire an insight; values inside the
// closed band fire nothing.
const STEPS_LOW: f64 = 5_000.0;
const STEPS_HIGH: f64 = 10_000.0;
const SLEEP_LOW: f64 = 7.0;
const SLEEP_HIGH: f64 = 8.0;
const ACTIVE_LOW: f64 = 20.0;
const ACTIVE_HIGH: f64 = 60.0;

/// Step trend fires when the recent 3-day average moves more than 10%
/// relative to the earlier 3-day average.
const TREND_UP_RATIO: f64 = 1.1;
const TREND_DOWN_RATIO: f64 = 0.9;
const TREND_WINDOW: usize = 3;

/// Which rule produced an insight
///
/// Display surfaces use the message text; tests and downstream logic key off
/// the kind so wording can change freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    StepsLow,
    StepsHigh,
    SleepLow,
    SleepHigh,
    ActivityLow,
    ActivityHigh,
    TrendUp,
    TrendDown,
    KeepTracking,
}

/// One advisory message derived from the weekly data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

/// Seven-day arithmetic means for the metrics the rules look at
///
/// Always divided by 7, never by the count of recorded days, so short
/// histories bias the averages downward. That is the documented gap policy,
/// not an accident.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeeklyAverages {
    pub steps: f64,
    pub sleep_hours: f64,
    pub active_minutes: f64,
}

impl WeeklyAverages {
    fn from_days(days: &[DailyStat; DAYS_PER_WEEK]) -> Self {
        let len = DAYS_PER_WEEK as f64;
        Self {
            steps: days.iter().map(|d| d.steps as f64).sum::<f64>() / len,
            sleep_hours: days.iter().map(|d| d.sleep_hours).sum::<f64>() / len,
            active_minutes: days.iter().map(|d| d.active_minutes).sum::<f64>() / len,
        }
    }
}

/// The complete weekly half of the dashboard
///
/// Recomputed from scratch on every load; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub series: WeeklySeries,
    pub averages: WeeklyAverages,
    pub insights: Vec<Insight>,
}

/// Normalize up to seven days of stats into exactly seven day slots
///
/// Inputs shorter than a week are left-padded with `Missing`, keeping the
/// recorded days in their relative order at the tail. Inputs longer than a
/// week (which the storage contract never produces) keep the most recent
/// seven rather than panicking.
pub fn normalize_week(stats: &[DailyStat]) -> [DataPoint; DAYS_PER_WEEK] {
    let tail = if stats.len() > DAYS_PER_WEEK {
        &stats[stats.len() - DAYS_PER_WEEK..]
    } else {
        stats
    };
    let pad = DAYS_PER_WEEK - tail.len();

    std::array::from_fn(|i| {
        if i < pad {
            DataPoint::Missing
        } else {
            DataPoint::Present(tail[i - pad])
        }
    })
}

/// One row of the threshold rule table
///
/// Rules are evaluated in a fixed order; each reads one average and fires at
/// most one of its two insights. Low and high are mutually exclusive by
/// construction since low < high.
struct ThresholdRule {
    value: fn(&WeeklyAverages) -> f64,
    low: f64,
    high: f64,
    low_insight: fn(f64) -> Insight,
    high_insight: fn(f64) -> Insight,
}

/// The ordered rule table: steps, then sleep, then activity
fn threshold_rules() -> [ThresholdRule; 3] {
    [
        ThresholdRule {
            value: |a| a.steps,
            low: STEPS_LOW,
            high: STEPS_HIGH,
            low_insight: |v| Insight {
                kind: InsightKind::StepsLow,
                message: format!(
                    "🚶 You're averaging {:.0} steps a day this week. A short daily walk would help you reach 5,000.",
                    v
                ),
            },
            high_insight: |v| Insight {
                kind: InsightKind::StepsHigh,
                message: format!(
                    "🎉 Great work! You're averaging {:.0} steps a day, well past the 10,000 mark.",
                    v
                ),
            },
        },
        ThresholdRule {
            value: |a| a.sleep_hours,
            low: SLEEP_LOW,
            high: SLEEP_HIGH,
            low_insight: |v| Insight {
                kind: InsightKind::SleepLow,
                message: format!(
                    "😴 You're averaging {:.1} hours of sleep. Try to get at least 7 hours a night.",
                    v
                ),
            },
            high_insight: |v| Insight {
                kind: InsightKind::SleepHigh,
                message: format!(
                    "🛌 You're averaging {:.1} hours of sleep. Regularly sleeping more than 8 hours can leave you groggy.",
                    v
                ),
            },
        },
        ThresholdRule {
            value: |a| a.active_minutes,
            low: ACTIVE_LOW,
            high: ACTIVE_HIGH,
            low_insight: |v| Insight {
                kind: InsightKind::ActivityLow,
                message: format!(
                    "⏱️ Only {:.0} active minutes a day on average. Aim for at least 20.",
                    v
                ),
            },
            high_insight: |v| Insight {
                kind: InsightKind::ActivityHigh,
                message: format!(
                    "💪 You're averaging {:.0} active minutes a day. That's a seriously active week!",
                    v
                ),
            },
        },
    ]
}

/// Engine that derives the weekly summary from daily statistics
///
/// Holds the gap policy used to resolve missing days before averaging; the
/// computation itself is stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightEngine {
    gap_policy: GapPolicy,
}

impl InsightEngine {
    /// Create an engine with the default zero-fill gap policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with an explicit gap policy
    pub fn with_gap_policy(gap_policy: GapPolicy) -> Self {
        Self { gap_policy }
    }

    /// Build the weekly summary for the week ending at `today`
    ///
    /// `stats` holds the most recent days, oldest first, 0 to 7 entries.
    /// Always produces a well-formed summary with at least one insight.
    pub fn summarize(&self, today: NaiveDate, stats: &[DailyStat]) -> WeeklySummary {
        let week = normalize_week(stats);
        let days = week.map(|slot| self.gap_policy.fill(slot));

        let series = WeeklySeries {
            labels: week_labels(today),
            steps: days.map(|d| d.steps),
            calories: days.map(|d| d.calories),
            active_minutes: days.map(|d| d.active_minutes),
            sleep_hours: days.map(|d| d.sleep_hours),
        };

        let averages = WeeklyAverages::from_days(&days);
        let insights = self.derive_insights(&averages, &series.steps);

        WeeklySummary {
            series,
            averages,
            insights,
        }
    }

    /// Evaluate the rule table, the trend rule, and the fallback, in order
    fn derive_insights(
        &self,
        averages: &WeeklyAverages,
        steps: &[u32; DAYS_PER_WEEK],
    ) -> Vec<Insight> {
        let mut insights = Vec::new();

        for rule in threshold_rules() {
            let value = (rule.value)(averages);
            if value < rule.low {
                insights.push((rule.low_insight)(value));
            } else if value > rule.high {
                insights.push((rule.high_insight)(value));
            }
        }

        if let Some(trend) = step_trend(steps) {
            insights.push(trend);
        }

        if insights.is_empty() {
            insights.push(Insight {
                kind: InsightKind::KeepTracking,
                message: "✅ Everything looks steady this week. Keep logging to see richer insights!"
                    .to_string(),
            });
        }

        insights
    }
}

/// Compare the last three days of steps against the first three
///
/// The middle day (index 3) belongs to neither window. When both windows
/// average zero, the strict comparisons fire nothing.
fn step_trend(steps: &[u32; DAYS_PER_WEEK]) -> Option<Insight> {
    let window_len = TREND_WINDOW as f64;
    let earlier: f64 =
        steps[..TREND_WINDOW].iter().map(|&s| s as f64).sum::<f64>() / window_len;
    let recent: f64 = steps[DAYS_PER_WEEK - TREND_WINDOW..]
        .iter()
        .map(|&s| s as f64)
        .sum::<f64>()
        / window_len;

    if recent > earlier * TREND_UP_RATIO {
        Some(Insight {
            kind: InsightKind::TrendUp,
            message: format!(
                "📈 Your steps are trending up: the last 3 days averaged {:.0} vs {:.0} earlier in the week.",
                recent, earlier
            ),
        })
    } else if recent < earlier * TREND_DOWN_RATIO {
        Some(Insight {
            kind: InsightKind::TrendDown,
            message: format!(
                "📉 Your steps are trending down: the last 3 days averaged {:.0} vs {:.0} earlier in the week.",
                recent, earlier
            ),
        })
    } else {
        None
    }
}
