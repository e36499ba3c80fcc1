use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;

/// `$QUITPLAN_HOME` if set, else `~/.quitplan`.
pub fn quitplan_home() -> Result<PathBuf> {
    resolve_home(
        std::env::var("QUITPLAN_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn resolve_home(override_dir: Option<String>, home: Option<String>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    match home {
        Some(h) if !h.trim().is_empty() => Ok(PathBuf::from(h).join(".quitplan")),
        _ => bail!("HOME is not set (or set QUITPLAN_HOME)"),
    }
}

pub fn ensure_quitplan_home() -> Result<PathBuf> {
    let dir = quitplan_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
