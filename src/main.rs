use anyhow::{bail, Result};
use athlete::AthleteProfile;
use clap::{Parser, Subcommand};
use fuelplan::sources::{JsonPlanSink, JsonProfileSource, JsonWorkoutSource};
use planning::{daily_targets, parse_date, plan_and_store};
use recipe::RecipePool;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use workout::DayType;

/// fuelplan - Deterministic nutrition planning for endurance athletes
#[derive(Parser)]
#[command(name = "fuelplan")]
#[command(about = "Deterministic nutrition and fueling plan generation", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate day plans for a date range
    Generate {
        /// Path to the athlete profile JSON file
        #[arg(long)]
        profile: PathBuf,

        /// Path to the workout records JSON file
        #[arg(long)]
        workouts: PathBuf,

        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Last day of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Write the plan to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the daily macro targets for a profile and day type
    Targets {
        /// Path to the athlete profile JSON file
        #[arg(long)]
        profile: PathBuf,

        /// Day type: rest, training or high
        #[arg(long)]
        day_type: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = fuelplan::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize observability (tracing + logging)
    fuelplan::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Generate {
            profile,
            workouts,
            start,
            end,
            out,
        } => generate_command(config, profile, workouts, &start, &end, out),
        Commands::Targets { profile, day_type } => targets_command(profile, &day_type),
    }
}

#[tracing::instrument(skip(config, out))]
fn generate_command(
    config: fuelplan::config::Config,
    profile: PathBuf,
    workouts: PathBuf,
    start: &str,
    end: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    let span_days = (end - start).num_days() + 1;
    if span_days > i64::from(config.planning.max_range_days) {
        bail!(
            "range of {} days exceeds the configured maximum of {}",
            span_days,
            config.planning.max_range_days
        );
    }

    let profiles = JsonProfileSource { path: profile };
    let workouts = JsonWorkoutSource { path: workouts };
    let mut sink = JsonPlanSink { out };
    let pool = RecipePool::builtin();

    let plans = plan_and_store("local", start, end, &profiles, &workouts, &mut sink, &pool)?;
    tracing::info!(days = plans.len(), "plan generated");

    Ok(())
}

#[tracing::instrument]
fn targets_command(profile: PathBuf, day_type: &str) -> Result<()> {
    let day_type = DayType::from_str(day_type)
        .map_err(|_| anyhow::anyhow!("unknown day type: {day_type}"))?;

    let raw = fs::read_to_string(&profile)?;
    let profile: AthleteProfile = serde_json::from_str(&raw)?;
    if !profile.has_valid_weight() {
        bail!("profile weight {} kg is out of range", profile.weight_kg);
    }

    let targets = daily_targets(
        profile.weight_kg,
        day_type,
        profile.goal_class(),
        profile.diet,
    );
    println!("{}", serde_json::to_string_pretty(&targets)?);

    Ok(())
}
