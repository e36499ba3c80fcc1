//! Progress aggregator: derives plan statistics from daily self-reports.
//!
//! Nothing here is stored. Statistics are recomputed from the entries the
//! backend hands us, so the same inputs always give the same numbers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{PlanError, Result};
use crate::stage::Stage;
use crate::time::inclusive_days;

/// One day's self-reported progress, keyed by date within a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgressEntry {
    pub date: NaiveDate,
    pub cigarettes_smoked: u32,
    pub money_spent: f64,
    /// Opaque snapshot from the client; passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_status: Option<serde_json::Value>,
}

impl DailyProgressEntry {
    pub fn new(date: NaiveDate, cigarettes_smoked: u32, money_spent: f64) -> Self {
        Self {
            date,
            cigarettes_smoked,
            money_spent,
            health_status: None,
        }
    }

    pub fn with_health_status(mut self, status: serde_json::Value) -> Self {
        self.health_status = Some(status);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStatistics {
    /// Day-in-plan, clamped to `[0, duration]`.
    pub days_passed: u32,
    pub total_days_tracked: u32,
    /// One decimal place.
    pub avg_cigarettes: f64,
    pub money_saved: f64,
    /// 0-100.
    pub progress_percent: u8,
}

/// Per-stage compliance against the stage's daily target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageAdherence {
    pub stage_id: u32,
    pub target_cigarettes_per_day: u32,
    pub days_tracked: u32,
    /// Tracked days at or under the target.
    pub days_on_target: u32,
    pub avg_cigarettes: f64,
}

impl StageAdherence {
    /// Fraction of tracked days on target; `None` with nothing tracked.
    pub fn rate(&self) -> Option<f64> {
        if self.days_tracked == 0 {
            None
        } else {
            Some(self.days_on_target as f64 / self.days_tracked as f64)
        }
    }
}

/// Compute plan statistics as of `today`.
///
/// Entries sharing a date collapse to the last one, matching the backend's
/// upsert-by-date behaviour.
pub fn compute_statistics(
    plan_start: NaiveDate,
    duration_in_days: i64,
    entries: &[DailyProgressEntry],
    baseline_daily_spend: Option<f64>,
    today: NaiveDate,
) -> Result<PlanStatistics> {
    if duration_in_days <= 0 {
        return Err(PlanError::InvalidPlan(duration_in_days));
    }

    let days_passed = inclusive_days(plan_start, today).clamp(0, duration_in_days);

    let by_date = latest_by_date(entries);
    let tracked = by_date.len();
    let total_cigarettes: u64 = by_date.values().map(|e| e.cigarettes_smoked as u64).sum();
    let total_spent: f64 = by_date.values().map(|e| e.money_spent).sum();

    let avg_cigarettes = if tracked == 0 {
        0.0
    } else {
        round_one_decimal(total_cigarettes as f64 / tracked as f64)
    };

    let money_saved = baseline_daily_spend
        .map(|baseline| (baseline * days_passed as f64 - total_spent).max(0.0))
        .unwrap_or(0.0);

    let progress_percent =
        (days_passed as f64 / duration_in_days as f64 * 100.0).round().clamp(0.0, 100.0) as u8;

    Ok(PlanStatistics {
        days_passed: u32::try_from(days_passed).unwrap_or(u32::MAX),
        total_days_tracked: tracked as u32,
        avg_cigarettes,
        money_saved,
        progress_percent,
    })
}

/// The stage whose range contains `today`, locked placeholders included.
pub fn current_stage(stages: &[Stage], today: NaiveDate) -> Option<&Stage> {
    stages.iter().find(|s| s.contains(today))
}

/// Adherence for every unlocked stage, in stage order.
pub fn stage_adherence(stages: &[Stage], entries: &[DailyProgressEntry]) -> Vec<StageAdherence> {
    let by_date = latest_by_date(entries);

    stages
        .iter()
        .filter(|s| !s.is_locked)
        .map(|stage| {
            let mut days_tracked = 0u32;
            let mut days_on_target = 0u32;
            let mut cigarettes = 0u64;

            for entry in by_date
                .range(stage.stage_start_date..=stage.stage_end_date)
                .map(|(_, e)| e)
            {
                days_tracked += 1;
                cigarettes += entry.cigarettes_smoked as u64;
                if entry.cigarettes_smoked <= stage.target_cigarettes_per_day {
                    days_on_target += 1;
                }
            }

            let avg_cigarettes = if days_tracked == 0 {
                0.0
            } else {
                round_one_decimal(cigarettes as f64 / days_tracked as f64)
            };

            StageAdherence {
                stage_id: stage.stage_id,
                target_cigarettes_per_day: stage.target_cigarettes_per_day,
                days_tracked,
                days_on_target,
                avg_cigarettes,
            }
        })
        .collect()
}

fn latest_by_date(entries: &[DailyProgressEntry]) -> BTreeMap<NaiveDate, &DailyProgressEntry> {
    let mut map = BTreeMap::new();
    for e in entries {
        map.insert(e.date, e);
    }
    map
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
