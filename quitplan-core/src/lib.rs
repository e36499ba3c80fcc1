//! quitplan-core: schedule and progress engine for quit-smoking plans.
//!
//! Pure computation only. Fetching and persisting plans and progress entries
//! is the caller's job.

pub mod error;
pub mod normalize;
pub mod notes;
pub mod plan;
pub mod progress;
pub mod stage;
pub mod tier;
pub mod time;

pub use error::{PlanError, Result};
pub use normalize::normalize_stages;
pub use plan::QuitPlan;
pub use progress::{
    DailyProgressEntry, PlanStatistics, StageAdherence, compute_statistics, current_stage,
    stage_adherence,
};
pub use stage::{
    DEFAULT_INITIAL_CIGARETTES, Stage, StepDownCurve, generate_stages, generate_stages_with,
};
pub use tier::{MembershipTier, apply_tier_visibility, locked_count, unlocked_count};
pub use time::{parse_plan_date, today_in_timezone};
