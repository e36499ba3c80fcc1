//! Normalization for stage lists supplied by the backend instead of generated here.

use tracing::debug;

use crate::error::{PlanError, Result};
use crate::stage::{Stage, stage_name};
use crate::time::inclusive_days;

/// Validate and tidy an externally supplied list of real stages.
///
/// Stages are sorted by start date and must tile their overall range with no
/// gap or overlap. Ids are renumbered 1..n and names rewritten to match,
/// durations are recomputed from the dates, and targets are clamped so the
/// curve never rises and ends at zero.
pub fn normalize_stages(mut stages: Vec<Stage>) -> Result<Vec<Stage>> {
    stages.sort_by_key(|s| s.stage_start_date);

    for s in &stages {
        if s.stage_end_date < s.stage_start_date {
            return Err(PlanError::InvalidStageRange {
                stage_id: s.stage_id,
                start: s.stage_start_date,
                end: s.stage_end_date,
            });
        }
    }

    for pair in stages.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        match inclusive_days(prev.stage_end_date, next.stage_start_date) {
            2 => {}
            n if n > 2 => {
                return Err(PlanError::StageGap {
                    previous_end: prev.stage_end_date,
                    next_start: next.stage_start_date,
                });
            }
            _ => {
                return Err(PlanError::StageOverlap {
                    previous_end: prev.stage_end_date,
                    next_start: next.stage_start_date,
                });
            }
        }
    }

    let count = stages.len();
    let mut ceiling = u32::MAX;
    for (i, s) in stages.iter_mut().enumerate() {
        s.stage_id = i as u32 + 1;
        s.stage_name = stage_name(s.stage_id, count as u32);
        s.duration_in_days = inclusive_days(s.stage_start_date, s.stage_end_date) as u32;
        s.is_locked = false;

        ceiling = ceiling.min(s.target_cigarettes_per_day);
        s.target_cigarettes_per_day = if i + 1 == count { 0 } else { ceiling };
    }

    debug!(stages = count, "normalized external stage list");
    Ok(stages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stage(id: u32, start: NaiveDate, end: NaiveDate, target: u32) -> Stage {
        Stage {
            stage_id: id,
            stage_name: format!("Week {id}"),
            stage_start_date: start,
            stage_end_date: end,
            target_cigarettes_per_day: target,
            notes: "Stay busy.".to_string(),
            is_locked: false,
            duration_in_days: 0,
        }
    }

    #[test]
    fn test_sorts_renumbers_and_recomputes() {
        let input = vec![
            stage(9, date(2024, 1, 8), date(2024, 1, 10), 3),
            stage(4, date(2024, 1, 1), date(2024, 1, 7), 6),
        ];
        let out = normalize_stages(input).unwrap();
        assert_eq!(out[0].stage_id, 1);
        assert_eq!(out[0].stage_name, "Week 1");
        assert_eq!(out[0].stage_start_date, date(2024, 1, 1));
        assert_eq!(out[0].duration_in_days, 7);
        assert_eq!(out[0].target_cigarettes_per_day, 6);
        assert_eq!(out[1].stage_id, 2);
        assert_eq!(out[1].stage_name, "Quit Week (Week 2)");
        assert_eq!(out[1].duration_in_days, 3);
        assert_eq!(out[1].target_cigarettes_per_day, 0);
    }

    #[test]
    fn test_rising_targets_are_clamped() {
        let input = vec![
            stage(1, date(2024, 1, 1), date(2024, 1, 7), 5),
            stage(2, date(2024, 1, 8), date(2024, 1, 14), 9),
            stage(3, date(2024, 1, 15), date(2024, 1, 21), 2),
        ];
        let targets: Vec<u32> = normalize_stages(input)
            .unwrap()
            .iter()
            .map(|s| s.target_cigarettes_per_day)
            .collect();
        assert_eq!(targets, vec![5, 5, 0]);
    }

    #[test]
    fn test_detects_gap() {
        let input = vec![
            stage(1, date(2024, 1, 1), date(2024, 1, 7), 5),
            stage(2, date(2024, 1, 9), date(2024, 1, 15), 2),
        ];
        assert!(matches!(normalize_stages(input), Err(PlanError::StageGap { .. })));
    }

    #[test]
    fn test_detects_overlap() {
        let input = vec![
            stage(1, date(2024, 1, 1), date(2024, 1, 7), 5),
            stage(2, date(2024, 1, 7), date(2024, 1, 13), 2),
        ];
        assert!(matches!(normalize_stages(input), Err(PlanError::StageOverlap { .. })));
    }

    #[test]
    fn test_detects_inverted_range() {
        let input = vec![stage(3, date(2024, 1, 7), date(2024, 1, 1), 5)];
        assert_eq!(
            normalize_stages(input).unwrap_err(),
            PlanError::InvalidStageRange {
                stage_id: 3,
                start: date(2024, 1, 7),
                end: date(2024, 1, 1),
            }
        );
    }

    #[test]
    fn test_empty_list_is_fine() {
        assert!(normalize_stages(Vec::new()).unwrap().is_empty());
    }
}
