//! Quit plan metadata as delivered by the backend, plus the convenience
//! wiring from plan to visible stages and statistics.

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::progress::{DailyProgressEntry, PlanStatistics, compute_statistics};
use crate::stage::{Stage, StepDownCurve, generate_stages_with};
use crate::tier::{MembershipTier, apply_tier_visibility};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuitPlan {
    /// Backend plan id, absent for plans built locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<i64>,
    pub user_id: i64,
    pub start_date: NaiveDate,
    pub duration_in_days: i64,
    #[serde(default)]
    pub initial_cigarettes_per_day: Option<i64>,
    pub membership_tier: MembershipTier,
    /// What the user spent on cigarettes per day before the plan.
    #[serde(default)]
    pub baseline_daily_spend: Option<f64>,
}

impl QuitPlan {
    pub fn new(user_id: i64, start_date: NaiveDate, duration_in_days: i64) -> Self {
        Self {
            plan_id: None,
            user_id,
            start_date,
            duration_in_days,
            initial_cigarettes_per_day: None,
            membership_tier: MembershipTier::Free,
            baseline_daily_spend: None,
        }
    }

    pub fn with_initial_cigarettes(mut self, per_day: i64) -> Self {
        self.initial_cigarettes_per_day = Some(per_day);
        self
    }

    pub fn with_tier(mut self, tier: MembershipTier) -> Self {
        self.membership_tier = tier;
        self
    }

    pub fn with_baseline_spend(mut self, per_day: f64) -> Self {
        self.baseline_daily_spend = Some(per_day);
        self
    }

    /// Last day of the plan (inclusive).
    pub fn end_date(&self) -> Result<NaiveDate> {
        if self.duration_in_days <= 0 {
            return Err(PlanError::InvalidDuration(self.duration_in_days));
        }
        self.start_date
            .checked_add_days(Days::new((self.duration_in_days - 1) as u64))
            .ok_or(PlanError::InvalidDuration(self.duration_in_days))
    }

    /// Generated stages after the membership gate.
    pub fn schedule<R: Rng + ?Sized>(
        &self,
        curve: StepDownCurve,
        rng: &mut R,
    ) -> Result<Vec<Stage>> {
        let stages = generate_stages_with(
            self.start_date,
            self.duration_in_days,
            self.initial_cigarettes_per_day,
            curve,
            rng,
        )?;
        Ok(apply_tier_visibility(stages, self.membership_tier))
    }

    pub fn statistics(
        &self,
        entries: &[DailyProgressEntry],
        today: NaiveDate,
    ) -> Result<PlanStatistics> {
        compute_statistics(
            self.start_date,
            self.duration_in_days,
            entries,
            self.baseline_daily_spend,
            today,
        )
    }
}
