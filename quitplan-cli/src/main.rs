use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use quitplan_core::{
    DailyProgressEntry, MembershipTier, QuitPlan, apply_tier_visibility, compute_statistics,
    generate_stages_with, parse_plan_date, stage_adherence, today_in_timezone,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod duration;
mod entries;
mod remote;
mod render;
mod state;

use config::Config;
use duration::parse_duration_days;

#[derive(Parser, Debug)]
#[command(
    name = "quitplan",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("QUITPLAN_BUILD_SHA"), ")"),
    about = "Quit-plan stages and progress statistics"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the weekly stages for a plan
    Stages {
        /// First day of the plan (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        start: NaiveDate,

        /// Plan length: 28, 28d or 4w
        #[arg(long, value_parser = parse_duration_days)]
        duration: i64,

        /// Cigarettes per day before the plan (falls back to config)
        #[arg(long, allow_negative_numbers = true)]
        cigarettes: Option<i64>,

        /// Membership tier: free or paid (falls back to config)
        #[arg(long)]
        tier: Option<MembershipTier>,

        /// Seed for coaching-note sampling (reproducible output)
        #[arg(long)]
        seed: Option<u64>,

        /// Highlight the stage containing this day (defaults to today)
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },

    /// Compute progress statistics from a CSV of daily entries
    Stats {
        #[arg(long, value_parser = parse_date_arg)]
        start: NaiveDate,

        #[arg(long, value_parser = parse_duration_days)]
        duration: i64,

        /// CSV with header date,cigarettes_smoked,money_spent[,health_status]
        #[arg(long)]
        entries: PathBuf,

        /// Money spent per day before quitting (falls back to config)
        #[arg(long)]
        baseline: Option<f64>,

        /// Cigarettes per day before the plan, for per-stage adherence
        #[arg(long, allow_negative_numbers = true)]
        cigarettes: Option<i64>,

        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },

    /// Fetch a user's plan and progress from the backend and summarise it
    Fetch {
        #[arg(long)]
        user: i64,

        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.quitplan/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_tracing(&cfg.log.filter);

    match cli.command {
        Command::Stages {
            start,
            duration,
            cigarettes,
            tier,
            seed,
            today,
            json,
        } => {
            let tier = tier.unwrap_or(cfg.plan.default_tier);
            let initial = cigarettes.or(cfg.plan.initial_cigarettes_per_day);
            let mut rng = seeded_rng(seed);

            let stages =
                generate_stages_with(start, duration, initial, cfg.plan.curve(), &mut rng)?;
            let stages = apply_tier_visibility(stages, tier);
            info!(stages = stages.len(), %tier, "generated plan");

            if json {
                println!("{}", serde_json::to_string_pretty(&stages)?);
            } else {
                let today = resolve_today(today, &cfg)?;
                print!("{}", render::render_stages(&stages, Some(today)));
            }
        }

        Command::Stats {
            start,
            duration,
            entries,
            baseline,
            cigarettes,
            today,
            json,
        } => {
            let rows = entries::parse_entries_csv(&entries)
                .with_context(|| format!("parsing {}", entries.display()))?;
            let today = resolve_today(today, &cfg)?;
            let baseline = baseline.or(cfg.plan.baseline_daily_spend);

            let stats = compute_statistics(start, duration, &rows, baseline, today)?;
            let initial = cigarettes.or(cfg.plan.initial_cigarettes_per_day);
            let stages = generate_stages_with(
                start,
                duration,
                initial,
                cfg.plan.curve(),
                &mut seeded_rng(Some(0)),
            )?;
            let adherence = stage_adherence(&stages, &rows);

            if json {
                let out = serde_json::json!({ "statistics": stats, "adherence": adherence });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Parsed {} entries from {}\n", rows.len(), entries.display());
                print!("{}", render::render_statistics(&stats, duration));
                println!();
                print!("{}", render::render_adherence(&adherence));
            }
        }

        Command::Fetch { user, today, json } => {
            let client = remote::BackendClient::from_config(&cfg.backend)?;
            let plan = client.fetch_plan(user).await?;
            let rows = match plan.plan_id {
                Some(id) => client.fetch_progress(id).await?,
                None => Vec::new(),
            };
            summarise_plan(&plan, &rows, resolve_today(today, &cfg)?, &cfg, json)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
        },
    }

    Ok(())
}

fn summarise_plan(
    plan: &QuitPlan,
    rows: &[DailyProgressEntry],
    today: NaiveDate,
    cfg: &Config,
    json: bool,
) -> Result<()> {
    let mut rng = seeded_rng(None);
    let stages = plan.schedule(cfg.plan.curve(), &mut rng)?;
    let stats = plan.statistics(rows, today)?;

    if json {
        let out = serde_json::json!({ "plan": plan, "stages": stages, "statistics": stats });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "Plan for user {} ({}) starting {}\n",
        plan.user_id, plan.membership_tier, plan.start_date
    );
    print!("{}", render::render_stages(&stages, Some(today)));
    println!();
    print!("{}", render::render_statistics(&stats, plan.duration_in_days));
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn resolve_today(explicit: Option<NaiveDate>, cfg: &Config) -> Result<NaiveDate> {
    match explicit {
        Some(d) => Ok(d),
        None => Ok(today_in_timezone(&cfg.plan.timezone, Utc::now())?),
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_plan_date(s).map_err(|e| e.to_string())
}
