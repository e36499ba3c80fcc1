//! Plain-text rendering for terminal output. `--json` bypasses this.

use chrono::NaiveDate;
use quitplan_core::{PlanStatistics, Stage, StageAdherence, current_stage};
use std::fmt::Write;

pub fn render_stages(stages: &[Stage], today: Option<NaiveDate>) -> String {
    let current = today.and_then(|d| current_stage(stages, d)).map(|s| s.stage_id);
    let mut out = String::new();

    for s in stages {
        let marker = if Some(s.stage_id) == current { ">" } else { " " };
        if s.is_locked {
            let _ = writeln!(
                out,
                "{marker} [locked] {} | {} .. {} | {}",
                s.stage_name, s.stage_start_date, s.stage_end_date, s.notes
            );
            continue;
        }

        let _ = writeln!(
            out,
            "{marker} {} | {} .. {} ({}d) | target {}/day",
            s.stage_name,
            s.stage_start_date,
            s.stage_end_date,
            s.duration_in_days,
            s.target_cigarettes_per_day
        );
        for tip in s.notes.lines() {
            let _ = writeln!(out, "      - {tip}");
        }
    }

    out
}

pub fn render_statistics(stats: &PlanStatistics, duration_in_days: i64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Day {} of {} ({}%)",
        stats.days_passed, duration_in_days, stats.progress_percent
    );
    let _ = writeln!(out, "Days tracked:   {}", stats.total_days_tracked);
    let _ = writeln!(out, "Avg cigarettes: {:.1}/day", stats.avg_cigarettes);
    let _ = writeln!(out, "Money saved:    {:.2}", stats.money_saved);
    out
}

pub fn render_adherence(rows: &[StageAdherence]) -> String {
    let mut out = String::new();
    for r in rows {
        let rate = r
            .rate()
            .map(|x| format!("{:.0}%", x * 100.0))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "Stage {}: target {} | on target {}/{} ({rate}) | avg {:.1}",
            r.stage_id,
            r.target_cigarettes_per_day,
            r.days_on_target,
            r.days_tracked,
            r.avg_cigarettes
        );
    }
    out
}
