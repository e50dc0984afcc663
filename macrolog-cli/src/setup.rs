use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use macrolog_core::{Goal, Profile};
use std::io::{self, Write};

use crate::state::{StoredProfile, parse_timezone, profile_path, read_profile, write_profile};

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

#[derive(Debug, Default)]
pub struct SetupArgs {
    pub weight: Option<f64>,
    pub goal: Option<String>,
    pub dob: Option<NaiveDate>,
    pub timezone: Option<String>,
}

fn parse_weight(s: &str) -> Result<f64> {
    let w: f64 = s
        .trim()
        .trim_end_matches("kg")
        .trim()
        .parse()
        .with_context(|| format!("invalid weight '{s}'"))?;
    check_weight(w)
}

fn check_weight(w: f64) -> Result<f64> {
    if !w.is_finite() || w <= 0.0 {
        bail!("weight must be a positive number of kg, got {w}");
    }
    Ok(w)
}

fn parse_dob(s: &str) -> Result<Option<NaiveDate>> {
    if s.is_empty() {
        return Ok(None);
    }
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date of birth '{s}' (expected YYYY-MM-DD)"))?;
    Ok(Some(d))
}

/// Write profile.json, prompting for whatever the flags leave out.
pub fn run_setup(args: SetupArgs) -> Result<()> {
    let existing = read_profile()?;
    let interactive = args.weight.is_none() || args.goal.is_none();
    if interactive {
        println!("macrolog setup\n");
    }

    let weight_kg = match args.weight {
        Some(w) => check_weight(w)?,
        None => parse_weight(&prompt("Weight in kg")?)?,
    };

    let goal = match args.goal {
        Some(g) => g,
        None => prompt("Goal (fat loss / muscle / recomp / general fitness)")?,
    };
    if Goal::parse(&goal).is_none() {
        println!("Note: goal '{goal}' not recognized; targets use general fitness.");
    }

    let dob = match args.dob {
        Some(d) => Some(d),
        None if interactive => parse_dob(&prompt("Date of birth YYYY-MM-DD (optional)")?)?,
        None => existing.profile.dob,
    };

    let timezone = args.timezone.unwrap_or(existing.timezone);
    parse_timezone(&timezone)?;

    let stored = StoredProfile {
        created_at_utc: existing
            .created_at_utc
            .or_else(|| Some(chrono::Utc::now().to_rfc3339())),
        profile: Profile::new(weight_kg, dob, goal),
        timezone,
    };
    write_profile(&stored)?;

    println!("\nWrote:");
    println!("- {}", profile_path()?.display());

    println!("\nNext recommended steps:");
    println!("- macrolog targets");
    println!("- macrolog calc --morning \"egg 3\" --night \"rice 200g\"");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("72.5").unwrap(), 72.5);
        assert_eq!(parse_weight(" 80 kg").unwrap(), 80.0);
        assert!(parse_weight("0").is_err());
        assert!(parse_weight("-3").is_err());
        assert!(parse_weight("heavy").is_err());
    }

    #[test]
    fn test_parse_dob() {
        assert_eq!(parse_dob("").unwrap(), None);
        assert_eq!(
            parse_dob("1995-04-02").unwrap(),
            NaiveDate::from_ymd_opt(1995, 4, 2)
        );
        assert!(parse_dob("02/04/1995").is_err());
    }
}
