use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use macrolog_core::Profile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// `$MACROLOG_HOME`, else `~/.macrolog`.
pub fn macrolog_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("MACROLOG_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".macrolog"))
}

pub fn ensure_macrolog_home() -> Result<PathBuf> {
    let dir = macrolog_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// profile.json: the calculator's profile plus bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProfile {
    pub created_at_utc: Option<String>,
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for StoredProfile {
    fn default() -> Self {
        Self {
            created_at_utc: None,
            profile: Profile::default(),
            timezone: default_timezone(),
        }
    }
}

impl StoredProfile {
    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// The current calendar date in the profile's timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(local_date(self.tz()?, Utc::now()))
    }
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow!("unknown timezone '{name}': {e}"))
}

pub fn local_date(tz: Tz, now_utc: DateTime<Utc>) -> NaiveDate {
    now_utc.with_timezone(&tz).date_naive()
}

pub fn profile_path() -> Result<PathBuf> {
    Ok(ensure_macrolog_home()?.join("profile.json"))
}

pub fn write_profile(profile: &StoredProfile) -> Result<()> {
    let p = profile_path()?;
    let json = serde_json::to_string_pretty(profile)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// The stored profile, or an unset one when setup has not run.
pub fn read_profile() -> Result<StoredProfile> {
    let p = profile_path()?;
    if !p.exists() {
        return Ok(StoredProfile::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Streaks {
    #[serde(default)]
    pub days: BTreeSet<NaiveDate>,
}

pub fn streaks_path() -> Result<PathBuf> {
    Ok(ensure_macrolog_home()?.join("streaks.json"))
}

pub fn read_streaks() -> Result<Streaks> {
    let p = streaks_path()?;
    if !p.exists() {
        return Ok(Streaks::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

/// Add `day` to streaks.json. Returns false if it was already recorded.
pub fn record_day(day: NaiveDate) -> Result<bool> {
    let mut streaks = read_streaks()?;
    if !streaks.days.insert(day) {
        return Ok(false);
    }
    let p = streaks_path()?;
    let json = serde_json::to_string_pretty(&streaks)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(true)
}
