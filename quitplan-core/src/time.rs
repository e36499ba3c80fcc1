//! Time utilities: plan days follow the user's local calendar.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{PlanError, Result};

/// Resolve the local calendar date for `now` in an IANA tz like "Asia/Ho_Chi_Minh".
pub fn today_in_timezone(tz: &str, now: DateTime<Utc>) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| PlanError::InvalidTimezone(tz.to_string()))?;

    Ok(now.with_timezone(&tz).date_naive())
}

/// Parse a plan date like "2024-01-01".
pub fn parse_plan_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| PlanError::InvalidDate(s.to_string()))
}

/// Inclusive day count between two dates; zero or negative when `end` precedes `start`.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
