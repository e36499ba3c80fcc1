//! Property tests over the whole engine: stage coverage, step-down shape,
//! tier gating and statistics determinism.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use quitplan_core::{
    DailyProgressEntry, MembershipTier, StepDownCurve, apply_tier_visibility, compute_statistics,
    generate_stages_with, locked_count, unlocked_count,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn arb_start() -> impl Strategy<Value = NaiveDate> {
    // 2020-01-01 plus up to ~10 years
    (0u64..3650).prop_map(|offset| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(offset))
}

fn arb_entries(start: NaiveDate) -> impl Strategy<Value = Vec<DailyProgressEntry>> {
    prop::collection::vec((0u64..120, 0u32..40, 0u32..200_000), 0..40).prop_map(move |rows| {
        rows.into_iter()
            .map(|(offset, cigs, spent)| {
                DailyProgressEntry::new(start + Days::new(offset), cigs, spent as f64)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn stages_tile_the_plan(
        start in arb_start(),
        days in 1i64..400,
        initial in 1i64..60,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let curve = StepDownCurve::default();
        let stages = generate_stages_with(start, days, Some(initial), curve, &mut rng).unwrap();

        prop_assert_eq!(stages.len() as i64, (days + 6) / 7);
        prop_assert_eq!(stages[0].stage_start_date, start);
        prop_assert_eq!(
            stages.last().unwrap().stage_end_date,
            start + Days::new((days - 1) as u64)
        );

        let mut covered = 0i64;
        for (i, s) in stages.iter().enumerate() {
            prop_assert_eq!(s.stage_id as usize, i + 1);
            prop_assert!(s.duration_in_days >= 1 && s.duration_in_days <= 7);
            prop_assert_eq!(
                (s.stage_end_date - s.stage_start_date).num_days() + 1,
                s.duration_in_days as i64
            );
            covered += s.duration_in_days as i64;
        }
        prop_assert_eq!(covered, days);

        for pair in stages.windows(2) {
            prop_assert_eq!(pair[0].stage_end_date + Days::new(1), pair[1].stage_start_date);
        }
    }

    #[test]
    fn targets_step_down_to_zero(days in 1i64..400, initial in 1i64..60, exponent in 0.25f64..3.0) {
        let mut rng = StdRng::seed_from_u64(0);
        let curve = StepDownCurve { exponent, ..StepDownCurve::default() };
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let stages = generate_stages_with(start, days, Some(initial), curve, &mut rng).unwrap();

        for pair in stages.windows(2) {
            prop_assert!(pair[0].target_cigarettes_per_day >= pair[1].target_cigarettes_per_day);
        }
        prop_assert_eq!(stages.last().unwrap().target_cigarettes_per_day, 0);
        if stages.len() > 1 {
            prop_assert_eq!(stages[0].target_cigarettes_per_day as i64, initial);
        }
    }

    #[test]
    fn tier_gate_invariants(days in 1i64..200, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let stages =
            generate_stages_with(start, days, Some(10), StepDownCurve::default(), &mut rng)
                .unwrap();
        let real = stages.len();

        let paid = apply_tier_visibility(stages.clone(), MembershipTier::Paid);
        prop_assert_eq!(&paid, &stages);

        let free = apply_tier_visibility(stages.clone(), MembershipTier::Free);
        prop_assert_eq!(unlocked_count(&free), real);
        prop_assert_eq!(locked_count(&free), 2);
        prop_assert!(free[real..].iter().all(|s| s.is_locked && s.target_cigarettes_per_day == 0));
        prop_assert_eq!(free[real - 1].stage_end_date + Days::new(1), free[real].stage_start_date);
    }

    #[test]
    fn statistics_are_deterministic_and_bounded(
        (start, entries) in arb_start().prop_flat_map(|s| (Just(s), arb_entries(s))),
        days in 1i64..120,
        today_offset in -30i64..200,
        baseline in prop::option::of(0u32..100_000),
    ) {
        let today = start + chrono::Duration::days(today_offset);
        let baseline = baseline.map(|b| b as f64);

        let a = compute_statistics(start, days, &entries, baseline, today).unwrap();
        let b = compute_statistics(start, days, &entries, baseline, today).unwrap();
        prop_assert_eq!(&a, &b);

        prop_assert!(a.days_passed as i64 <= days);
        prop_assert!(a.progress_percent <= 100);
        prop_assert!(a.money_saved >= 0.0);
        if entries.is_empty() {
            prop_assert_eq!(a.avg_cigarettes, 0.0);
        }
        if baseline.is_none() {
            prop_assert_eq!(a.money_saved, 0.0);
        }
    }
}
