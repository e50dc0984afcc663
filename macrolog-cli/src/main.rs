use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use macrolog_catalog::{default_catalog, load_catalog_csv};
use macrolog_core::{
    Catalog, DayLog, compute_targets_with, current_streak, longest_streak, progress, suggest,
};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod day;
mod report;
mod setup;
mod state;

use config::Config;
use day::DayFile;

#[derive(Parser, Debug)]
#[command(name = "macrolog", version, about = "Food log macro totals and goal targets")]
struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save weight, goal and date of birth to ~/.macrolog/profile.json
    Setup {
        /// Body weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// fat loss | muscle | recomp | general fitness
        #[arg(long)]
        goal: Option<String>,

        /// Date of birth, YYYY-MM-DD
        #[arg(long)]
        dob: Option<NaiveDate>,

        /// IANA timezone used to decide what "today" is
        #[arg(long)]
        timezone: Option<String>,
    },

    /// Compute per-meal and daily macro totals
    Calc {
        #[arg(long, value_name = "ENTRY")]
        morning: Vec<String>,

        #[arg(long, value_name = "ENTRY")]
        evening: Vec<String>,

        #[arg(long, value_name = "ENTRY")]
        post_evening: Vec<String>,

        #[arg(long, value_name = "ENTRY")]
        night: Vec<String>,

        /// TOML file with morning/evening/post_evening/night entry lists
        #[arg(long, value_name = "FILE")]
        day: Option<PathBuf>,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Count today towards the logging streak
        #[arg(long)]
        record: bool,
    },

    /// Autocomplete a food name
    Suggest {
        partial: String,

        /// Maximum suggestions (default from config, 8)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show protein, calorie, water and fiber targets
    Targets {
        /// Override profile weight (kg)
        #[arg(long)]
        weight: Option<f64>,

        /// Override profile goal
        #[arg(long)]
        goal: Option<String>,

        /// Override age derived from the profile date of birth
        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        json: bool,
    },

    /// Current and longest logging streak
    Streak,

    /// Nutrition table commands
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Validate a nutrition CSV
    Check { file: PathBuf },

    /// List the active catalog
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.macrolog/config.toml with defaults
    Init,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Setup {
            weight,
            goal,
            dob,
            timezone,
        } => {
            setup::run_setup(setup::SetupArgs {
                weight,
                goal,
                dob,
                timezone,
            })?;
        }

        Command::Calc {
            morning,
            evening,
            post_evening,
            night,
            day,
            json,
            record,
        } => {
            let mut entries = match day {
                Some(path) => DayFile::load(&path)?,
                None => DayFile::default(),
            };
            entries.extend(DayFile {
                morning,
                evening,
                post_evening,
                night,
            });
            calc(entries, json, record)?;
        }

        Command::Suggest { partial, limit } => {
            let cfg = config::load_config()?;
            let catalog = active_catalog(&cfg)?;
            let limit = limit.unwrap_or(cfg.suggest.limit);
            for name in suggest(&partial, &catalog, limit) {
                println!("{name}");
            }
        }

        Command::Targets {
            weight,
            goal,
            age,
            json,
        } => {
            targets(weight, goal, age, json)?;
        }

        Command::Streak => {
            let stored = state::read_profile()?;
            let today = stored.today()?;
            let streaks = state::read_streaks()?;
            println!("Current streak: {} day(s)", current_streak(&streaks.days, today));
            println!("Longest streak: {} day(s)", longest_streak(&streaks.days));
            println!("Days logged:    {}", streaks.days.len());
        }

        Command::Catalog { command } => match command {
            CatalogCommand::Check { file } => check_catalog(&file)?,
            CatalogCommand::List { json } => {
                let cfg = config::load_config()?;
                let catalog = active_catalog(&cfg)?;
                list_catalog(&catalog, json)?;
            }
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
        },
    }

    Ok(())
}

/// The configured CSV, or the bundled table.
fn active_catalog(cfg: &Config) -> Result<Cow<'static, Catalog>> {
    match &cfg.catalog.path {
        Some(path) => {
            let catalog = load_catalog_csv(path)?;
            info!(path = %path.display(), "using configured catalog");
            Ok(Cow::Owned(catalog))
        }
        None => Ok(Cow::Borrowed(default_catalog())),
    }
}

fn calc(entries: DayFile, json: bool, record: bool) -> Result<()> {
    if entries.is_empty() {
        bail!("No entries. Pass --morning/--evening/--post-evening/--night or --day <file.toml>");
    }

    let cfg = config::load_config()?;
    let catalog = active_catalog(&cfg)?;
    let stored = state::read_profile()?;
    let today = stored.today()?;

    let mut day = DayLog::from_entries(entries.into_meals());
    let summary = day.calculate_all(&catalog);
    let targets = stored.profile.targets_on(today, &cfg.targets.params());
    let progress = progress(&summary.totals, &targets);
    let report = report::CalcReport::new(&summary, progress, &day, &catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for slot in day.slots() {
            let Some(meal) = slot.cached() else { continue };
            if meal.rows.is_empty() {
                continue;
            }
            if !slot.has_recognized_entry(&catalog) {
                println!("## {}\n(no recognized foods)\n", meal.label);
                continue;
            }
            println!("{}", report::render_meal(meal));
        }
        print!("{}", report::render_progress(&summary.totals, &progress));
        if targets.is_unset() {
            println!("(no profile targets; percentages use fixed references. Run: macrolog setup)");
        }

        if !report.unresolved.is_empty() {
            println!("\nNot in catalog: {}", report.unresolved.join(", "));
        }
        if !report.unparsable_quantity.is_empty() {
            println!(
                "Quantity not understood, counted as 1: {}",
                report.unparsable_quantity.join(", ")
            );
        }
    }

    if record {
        let resolved = summary.rows().any(|(_, row)| row.is_resolved());
        if !resolved {
            bail!("Nothing recognized; not recording {today}");
        }
        if state::record_day(today)? {
            eprintln!("Recorded {today}");
        }
    }

    Ok(())
}

fn targets(weight: Option<f64>, goal: Option<String>, age: Option<u32>, json: bool) -> Result<()> {
    let cfg = config::load_config()?;
    let stored = state::read_profile()?;
    let today = stored.today()?;

    let mut profile = stored.profile;
    if let Some(w) = weight {
        profile.weight_kg = w;
    }
    if let Some(g) = goal {
        profile.goal = g;
    }
    let age = age.or_else(|| profile.age_on(today));

    let params = cfg.targets.params();
    let targets = compute_targets_with(&params, profile.weight_kg, &profile.goal, age);
    if targets.is_unset() {
        bail!("No weight set. Pass --weight <kg> or run: macrolog setup");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
    } else {
        print!("{}", report::render_targets(&targets));
    }
    Ok(())
}

fn check_catalog(file: &Path) -> Result<()> {
    if !file.exists() {
        bail!("CSV not found: {}", file.display());
    }
    let catalog = load_catalog_csv(file)?;
    println!(
        "OK: {} foods ({} unit-specific records) in {}",
        catalog.len(),
        catalog.sibling_count(),
        file.display()
    );
    Ok(())
}

fn list_catalog(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        let entries: Vec<_> = catalog.entries().collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).context("serialize catalog")?
        );
        return Ok(());
    }
    for entry in catalog.entries() {
        let r = &entry.record;
        println!(
            "{:<28} per {:<6} protein={} carbs={} fiber={} fat={}",
            entry.name, r.unit.keyword(), r.protein, r.carbs, r.fiber, r.fat
        );
    }
    Ok(())
}
