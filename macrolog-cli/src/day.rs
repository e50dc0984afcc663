//! Day files: one TOML table listing the entries of each meal.
//!
//! ```toml
//! morning = ["egg 3", "oats 40"]
//! evening = ["brown bread 2 slice"]
//! post_evening = ["banana 120"]
//! night = ["rice 200g", "dal 100"]
//! ```

use anyhow::{Context, Result};
use macrolog_core::MealLabel;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DayFile {
    #[serde(default, alias = "breakfast")]
    pub morning: Vec<String>,
    #[serde(default, alias = "lunch")]
    pub evening: Vec<String>,
    #[serde(default, alias = "post-evening", alias = "snack")]
    pub post_evening: Vec<String>,
    #[serde(default, alias = "dinner")]
    pub night: Vec<String>,
}

impl DayFile {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse day file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::parse(&s).with_context(|| format!("in {}", path.display()))
    }

    pub fn into_meals(self) -> [(MealLabel, Vec<String>); 4] {
        [
            (MealLabel::Morning, self.morning),
            (MealLabel::Evening, self.evening),
            (MealLabel::PostEvening, self.post_evening),
            (MealLabel::Night, self.night),
        ]
    }

    /// Append `other`'s entries after this file's, meal by meal.
    pub fn extend(&mut self, other: DayFile) {
        self.morning.extend(other.morning);
        self.evening.extend(other.evening);
        self.post_evening.extend(other.post_evening);
        self.night.extend(other.night);
    }

    pub fn is_empty(&self) -> bool {
        [&self.morning, &self.evening, &self.post_evening, &self.night]
            .iter()
            .all(|entries| entries.iter().all(|e| e.trim().is_empty()))
    }
}
