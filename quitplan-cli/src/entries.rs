//! Import daily progress entries from a CSV export.
//!
//! Expected header: `date,cigarettes_smoked,money_spent[,health_status]`
//! where `health_status` is an optional JSON snapshot.

use anyhow::{Context, Result};
use quitplan_core::{DailyProgressEntry, parse_plan_date};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct EntryRow {
    date: String,
    cigarettes_smoked: String,
    money_spent: String,
    #[serde(default)]
    health_status: Option<String>,
}

pub fn parse_entries_csv(path: impl AsRef<Path>) -> Result<Vec<DailyProgressEntry>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_entries(file)
}

/// Parse entries, skipping rows that don't describe a valid day.
pub fn parse_entries<R: Read>(input: R) -> Result<Vec<DailyProgressEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut out = Vec::new();
    for (i, result) in rdr.deserialize::<EntryRow>().enumerate() {
        let line = i + 2; // header is line 1
        let row = result.with_context(|| format!("reading row on line {line}"))?;

        let Ok(date) = parse_plan_date(&row.date) else {
            warn!(line, date = %row.date, "skipping row with unparseable date");
            continue;
        };
        let Ok(cigarettes) = row.cigarettes_smoked.parse::<u32>() else {
            warn!(
                line,
                value = %row.cigarettes_smoked,
                "skipping row with invalid cigarette count"
            );
            continue;
        };
        let money = match row.money_spent.parse::<f64>() {
            Ok(m) if m.is_finite() && m >= 0.0 => m,
            _ => {
                warn!(line, value = %row.money_spent, "skipping row with invalid money spent");
                continue;
            }
        };

        let mut entry = DailyProgressEntry::new(date, cigarettes, money);
        if let Some(raw) = row.health_status.filter(|s| !s.is_empty()) {
            let status = serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw));
            entry = entry.with_health_status(status);
        }
        out.push(entry);
    }

    Ok(out)
}
