use anyhow::{Context, Result};
use macrolog_core::{DEFAULT_SUGGESTION_LIMIT, TargetParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_macrolog_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub suggest: SuggestSection,
    #[serde(default)]
    pub targets: TargetsSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    /// CSV to use instead of the bundled table.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestSection {
    pub limit: usize,
}

impl Default for SuggestSection {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetsSection {
    pub assumed_height_cm: f64,
    pub activity_factor: f64,
    pub default_age_years: u32,
    pub band_kcal: f64,
}

impl Default for TargetsSection {
    fn default() -> Self {
        let params = TargetParams::default();
        Self {
            assumed_height_cm: params.assumed_height_cm,
            activity_factor: params.activity_factor,
            default_age_years: params.default_age_years,
            band_kcal: params.calorie_band_kcal,
        }
    }
}

impl TargetsSection {
    pub fn params(&self) -> TargetParams {
        TargetParams {
            assumed_height_cm: self.assumed_height_cm,
            activity_factor: self.activity_factor,
            default_age_years: self.default_age_years,
            calorie_band_kcal: self.band_kcal,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_macrolog_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert!(cfg.catalog.path.is_none());
        assert_eq!(cfg.suggest.limit, 8);
        assert_eq!(cfg.targets.params(), TargetParams::default());
    }

    #[test]
    fn test_partial_sections() {
        let cfg: Config = toml::from_str(
            r#"
            [suggest]
            limit = 5

            [targets]
            activity_factor = 1.375
            "#,
        )
        .unwrap();
        assert_eq!(cfg.suggest.limit, 5);
        let params = cfg.targets.params();
        assert_eq!(params.activity_factor, 1.375);
        assert_eq!(params.assumed_height_cm, 170.0);
        assert_eq!(params.calorie_band_kcal, 200.0);
    }

    #[test]
    fn test_default_config_round_trips() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.suggest.limit, DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(back.targets.band_kcal, 200.0);
    }
}
