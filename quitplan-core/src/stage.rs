//! Stage partitioner: splits a plan's date range into weekly stages with a
//! step-down cigarette target that reaches zero on the final "quit week".

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PlanError, Result};
use crate::notes::sample_notes;

/// Nominal stage length.
pub const DAYS_PER_STAGE: i64 = 7;

/// Baseline substituted when the caller has no positive cigarette count.
pub const DEFAULT_INITIAL_CIGARETTES: u32 = 8;

/// One contiguous span of the plan, nominally a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    /// 1-based, sequential within a plan.
    pub stage_id: u32,
    pub stage_name: String,
    /// Inclusive.
    pub stage_start_date: NaiveDate,
    /// Inclusive.
    pub stage_end_date: NaiveDate,
    pub target_cigarettes_per_day: u32,
    pub notes: String,
    /// Set only on upsell placeholders appended by the free-tier gate.
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub duration_in_days: u32,
}

impl Stage {
    /// True if `day` falls inside this stage's inclusive range.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.stage_start_date <= day && day <= self.stage_end_date
    }
}

/// Display label for stage `index` out of `total`.
pub fn stage_name(index: u32, total: u32) -> String {
    if index == total {
        format!("Quit Week (Week {index})")
    } else {
        format!("Week {index}")
    }
}

/// Shape of the target curve and how to treat a missing baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepDownCurve {
    /// Power applied to the remaining fraction `(1 - p)`. 1.0 is linear.
    pub exponent: f64,
    /// Reject a missing/non-positive baseline instead of substituting the default.
    pub strict: bool,
}

impl Default for StepDownCurve {
    fn default() -> Self {
        Self {
            exponent: 1.0,
            strict: false,
        }
    }
}

impl StepDownCurve {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Resolve the starting cigarette count.
    ///
    /// Non-strict curves fall back to [`DEFAULT_INITIAL_CIGARETTES`] with a
    /// warning; strict ones return [`PlanError::MissingBaseline`].
    pub fn resolve_initial(&self, initial: Option<i64>) -> Result<u32> {
        match initial {
            Some(n) if n > 0 => Ok(u32::try_from(n).unwrap_or(u32::MAX)),
            other => {
                if self.strict {
                    return Err(PlanError::MissingBaseline);
                }
                warn!(
                    supplied = ?other,
                    default = DEFAULT_INITIAL_CIGARETTES,
                    "initial cigarettes per day missing or non-positive; using default"
                );
                Ok(DEFAULT_INITIAL_CIGARETTES)
            }
        }
    }

    /// Daily target for stage `index` (1-based) out of `total`.
    ///
    /// `ceil(initial * (1 - p)^exponent)` with `p = (index - 1) / (total - 1)`,
    /// at least 1 before the final stage and exactly 0 on it.
    pub fn target_for(&self, initial: u32, index: u32, total: u32) -> u32 {
        if index >= total {
            return 0;
        }

        let exponent = if self.exponent.is_finite() && self.exponent > 0.0 {
            self.exponent
        } else {
            1.0
        };

        let p = (index - 1) as f64 / (total - 1) as f64;
        let raw = initial as f64 * (1.0 - p).powf(exponent);

        // 6 * (2/3) lands a hair above 4.0 in binary; don't let that become 5.
        let nearest = raw.round();
        let value = if (raw - nearest).abs() < 1e-9 {
            nearest
        } else {
            raw.ceil()
        };

        (value as u32).max(1)
    }
}

/// Generate stages with the default curve and a thread-local RNG for notes.
pub fn generate_stages(
    start_date: NaiveDate,
    duration_in_days: i64,
    initial_cigarettes_per_day: Option<i64>,
) -> Result<Vec<Stage>> {
    generate_stages_with(
        start_date,
        duration_in_days,
        initial_cigarettes_per_day,
        StepDownCurve::default(),
        &mut rand::thread_rng(),
    )
}

/// Partition `[start_date, start_date + duration_in_days - 1]` into weekly stages.
///
/// Every stage spans 7 days except the last, which takes the remainder.
pub fn generate_stages_with<R: Rng + ?Sized>(
    start_date: NaiveDate,
    duration_in_days: i64,
    initial_cigarettes_per_day: Option<i64>,
    curve: StepDownCurve,
    rng: &mut R,
) -> Result<Vec<Stage>> {
    if duration_in_days <= 0 {
        return Err(PlanError::InvalidDuration(duration_in_days));
    }

    // Reject ranges that run off the end of the calendar before doing any work.
    start_date
        .checked_add_days(Days::new((duration_in_days - 1) as u64))
        .ok_or(PlanError::InvalidDuration(duration_in_days))?;

    let initial = curve.resolve_initial(initial_cigarettes_per_day)?;
    let total_stages = u32::try_from((duration_in_days + DAYS_PER_STAGE - 1) / DAYS_PER_STAGE)
        .map_err(|_| PlanError::InvalidDuration(duration_in_days))?;

    debug!(
        %start_date,
        duration_in_days,
        initial,
        total_stages,
        "generating quit plan stages"
    );

    let mut stages = Vec::with_capacity(total_stages as usize);
    let mut stage_start = start_date;

    for index in 1..=total_stages {
        let len = if index == total_stages {
            duration_in_days - DAYS_PER_STAGE * (total_stages as i64 - 1)
        } else {
            DAYS_PER_STAGE
        };
        let stage_end = stage_start + Days::new((len - 1) as u64);

        stages.push(Stage {
            stage_id: index,
            stage_name: stage_name(index, total_stages),
            stage_start_date: stage_start,
            stage_end_date: stage_end,
            target_cigarettes_per_day: curve.target_for(initial, index, total_stages),
            notes: sample_notes(rng),
            is_locked: false,
            duration_in_days: len as u32,
        });

        if index < total_stages {
            stage_start = stage_end + Days::new(1);
        }
    }

    Ok(stages)
}
