//! Free-tier gate: free accounts see their real stages plus locked upsell weeks.

use chrono::Days;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::stage::{DAYS_PER_STAGE, Stage};

/// Number of locked placeholder stages shown to free accounts.
pub const LOCKED_STAGE_COUNT: u32 = 2;

/// Notes carried by every locked placeholder.
pub const LOCKED_NOTES: &str = "Locked content — upgrade to unlock.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipTier {
    Free,
    #[serde(alias = "PREMIUM", alias = "VIP")]
    Paid,
}

impl MembershipTier {
    pub fn is_paid(&self) -> bool {
        matches!(self, MembershipTier::Paid)
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipTier::Free => write!(f, "FREE"),
            MembershipTier::Paid => write!(f, "PAID"),
        }
    }
}

impl FromStr for MembershipTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(MembershipTier::Free),
            "paid" | "premium" | "vip" => Ok(MembershipTier::Paid),
            other => Err(format!("unknown membership tier: {other}")),
        }
    }
}

/// Return the stages a member of `tier` gets to see.
///
/// Paid: unchanged. Free: the real stages followed by [`LOCKED_STAGE_COUNT`]
/// seven-day placeholders with a zero target. An empty plan has no end date
/// to anchor placeholders on and comes back empty. Placeholders that would run
/// past the last representable date are left off.
pub fn apply_tier_visibility(stages: Vec<Stage>, tier: MembershipTier) -> Vec<Stage> {
    if tier.is_paid() {
        return stages;
    }

    let Some(last) = stages.last() else {
        debug!("free-tier gate skipped: no stages to extend");
        return stages;
    };

    let mut next_id = last.stage_id + 1;
    let mut next_start = last.stage_end_date.checked_add_days(Days::new(1));
    let mut out = stages;

    for _ in 0..LOCKED_STAGE_COUNT {
        let Some((start, end)) = next_start.and_then(|start| {
            start
                .checked_add_days(Days::new((DAYS_PER_STAGE - 1) as u64))
                .map(|end| (start, end))
        }) else {
            debug!(stage_id = next_id, "locked stage would pass the calendar end; stopping");
            break;
        };

        out.push(Stage {
            stage_id: next_id,
            stage_name: format!("Week {next_id}"),
            stage_start_date: start,
            stage_end_date: end,
            target_cigarettes_per_day: 0,
            notes: LOCKED_NOTES.to_string(),
            is_locked: true,
            duration_in_days: DAYS_PER_STAGE as u32,
        });
        next_id += 1;
        next_start = end.checked_add_days(Days::new(1));
    }

    out
}

/// Stages the member can open.
pub fn unlocked_count(stages: &[Stage]) -> usize {
    stages.iter().filter(|s| !s.is_locked).count()
}

pub fn locked_count(stages: &[Stage]) -> usize {
    stages.iter().filter(|s| s.is_locked).count()
}
