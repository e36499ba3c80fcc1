//! Error taxonomy for the quit-plan engine.
//!
//! Every variant is a local validation failure. Callers reject the request
//! upstream; nothing here is worth retrying.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced by the schedule and progress engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Stage generation was asked for a non-positive duration.
    #[error("invalid duration: {0} days (must be at least 1)")]
    InvalidDuration(i64),

    /// Statistics were requested for a plan with a non-positive duration.
    #[error("invalid plan: duration of {0} days (must be at least 1)")]
    InvalidPlan(i64),

    /// Strict generation refused to invent a cigarette baseline.
    #[error("initial cigarettes per day is missing or non-positive")]
    MissingBaseline,

    /// An externally supplied stage ends before it starts.
    #[error("stage {stage_id} ends ({end}) before it starts ({start})")]
    InvalidStageRange {
        stage_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Two consecutive stages leave uncovered days between them.
    #[error("gap between stage ending {previous_end} and stage starting {next_start}")]
    StageGap {
        previous_end: NaiveDate,
        next_start: NaiveDate,
    },

    /// Two consecutive stages share at least one day.
    #[error("stage starting {next_start} overlaps stage ending {previous_end}")]
    StageOverlap {
        previous_end: NaiveDate,
        next_start: NaiveDate,
    },

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            PlanError::InvalidDuration(0).to_string(),
            "invalid duration: 0 days (must be at least 1)"
        );
        assert!(PlanError::InvalidPlan(-3).to_string().contains("-3"));
    }

    #[test]
    fn gap_message_includes_both_dates() {
        let err = PlanError::StageGap {
            previous_end: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
            next_start: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-01-07"));
        assert!(msg.contains("2024-01-09"));
    }
}
