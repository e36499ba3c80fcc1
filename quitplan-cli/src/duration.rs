use regex::Regex;

/// Parse a plan length: `28`, `28d` or `4w`. Used as a clap value parser.
pub fn parse_duration_days(s: &str) -> Result<i64, String> {
    let re = Regex::new(r"(?i)^\s*(\d+)\s*(d|days?|w|weeks?)?\s*$").map_err(|e| e.to_string())?;
    let caps = re
        .captures(s)
        .ok_or_else(|| format!("invalid duration '{s}' (examples: 28, 28d, 4w)"))?;

    let n: i64 = caps[1]
        .parse()
        .map_err(|_| format!("duration '{s}' is too large"))?;

    let unit = caps.get(2).map(|m| m.as_str().to_lowercase());
    match unit.as_deref() {
        Some(u) if u.starts_with('w') => n
            .checked_mul(7)
            .ok_or_else(|| format!("duration '{s}' is too large")),
        _ => Ok(n),
    }
}
