use anyhow::{Context, Result};
use quitplan_core::{MembershipTier, StepDownCurve};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_quitplan_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendSection,
    pub plan: PlanSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSection {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Bearer token for the REST backend (optional).
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSection {
    /// IANA zone used to decide which plan day "today" is.
    pub timezone: String,
    pub default_tier: MembershipTier,
    pub baseline_daily_spend: Option<f64>,
    pub initial_cigarettes_per_day: Option<i64>,
    /// Refuse to generate stages without a cigarette baseline.
    pub strict_baseline: bool,
    pub curve_exponent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// tracing EnvFilter directive, overridden by RUST_LOG.
    pub filter: String,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 15,
            token: None,
        }
    }
}

impl Default for PlanSection {
    fn default() -> Self {
        Self {
            timezone: "Asia/Ho_Chi_Minh".to_string(),
            default_tier: MembershipTier::Free,
            baseline_daily_spend: None,
            initial_cigarettes_per_day: None,
            strict_baseline: false,
            curve_exponent: 1.0,
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl PlanSection {
    pub fn curve(&self) -> StepDownCurve {
        StepDownCurve {
            exponent: self.curve_exponent,
            strict: self.strict_baseline,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_quitplan_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
