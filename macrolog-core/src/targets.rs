//! Goal-derived daily targets: protein, calories, macro split, water, fiber.
//!
//! Everything here is a pure function of `(weight, goal, age)` plus the
//! tunables in [`TargetParams`]. An unset weight (zero) yields all-zero
//! targets instead of failing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::nutrition::round1;

/// Kilocalories per gram of protein and carbohydrate.
const KCAL_PER_G_PROTEIN_CARB: f64 = 4.0;
/// Kilocalories per gram of fat.
const KCAL_PER_G_FAT: f64 = 9.0;
/// Baseline fiber: grams per 1000 kcal eaten.
const FIBER_G_PER_1000_KCAL: f64 = 14.0;
/// Baseline water: liters per kg of body weight.
const WATER_L_PER_KG: f64 = 0.035;
const FIBER_BAND_G: f64 = 5.0;
const WATER_BAND_L: f64 = 0.5;

/// Stated fitness goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "fat loss")]
    FatLoss,
    #[serde(rename = "muscle")]
    Muscle,
    #[serde(rename = "recomposition")]
    Recomposition,
    /// Also the fallback for unrecognized goals.
    #[default]
    #[serde(rename = "general fitness")]
    General,
}

impl Goal {
    /// Parse a goal label, case-insensitively. `None` when unrecognized.
    pub fn parse(s: &str) -> Option<Goal> {
        let key = s.trim().to_lowercase().replace(['-', '_'], " ");
        match key.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "fat loss" | "weight loss" | "cut" | "cutting" => Some(Goal::FatLoss),
            "muscle" | "muscle gain" | "bulk" | "bulking" => Some(Goal::Muscle),
            "recomposition" | "recomp" | "body recomposition" => Some(Goal::Recomposition),
            "general fitness" | "general" | "maintenance" => Some(Goal::General),
            _ => None,
        }
    }

    /// `(min, max, recommended)` grams of protein per kg of body weight.
    pub fn protein_multipliers(&self) -> (f64, f64, f64) {
        match self {
            Goal::FatLoss => (1.8, 2.2, 2.0),
            Goal::Muscle => (1.8, 2.4, 2.0),
            Goal::Recomposition => (1.6, 2.2, 1.8),
            Goal::General => (1.2, 1.6, 1.4),
        }
    }

    /// Daily kcal offset from maintenance.
    pub fn calorie_offset(&self) -> f64 {
        match self {
            Goal::FatLoss => -500.0,
            Goal::Muscle => 300.0,
            Goal::Recomposition | Goal::General => 0.0,
        }
    }

    pub fn macro_split(&self) -> MacroSplit {
        match self {
            Goal::FatLoss => MacroSplit::new(40, 30, 30),
            Goal::Muscle => MacroSplit::new(30, 45, 25),
            Goal::Recomposition => MacroSplit::new(35, 40, 25),
            Goal::General => MacroSplit::new(25, 50, 25),
        }
    }

    /// Extra liters of water on top of the weight-based baseline.
    pub fn water_bonus_liters(&self) -> f64 {
        match self {
            Goal::FatLoss => 0.5,
            Goal::Muscle => 0.7,
            Goal::Recomposition => 0.6,
            Goal::General => 0.3,
        }
    }

    /// Extra grams of fiber on top of the calorie-based baseline.
    pub fn fiber_offset_grams(&self) -> f64 {
        match self {
            Goal::FatLoss => 5.0,
            Goal::Recomposition => 3.0,
            Goal::Muscle | Goal::General => 0.0,
        }
    }
}

/// Percent of calories from each macro. Always sums to 100 (or is all zero).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl MacroSplit {
    pub fn new(protein: u32, carbs: u32, fat: u32) -> Self {
        debug_assert_eq!(protein + carbs + fat, 100);
        Self {
            protein,
            carbs,
            fat,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetRange {
    pub min: f64,
    pub max: f64,
    pub recommended: f64,
}

/// Macro targets in grams for a calorie amount and split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroGrams {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalTargets {
    /// Grams per day.
    pub protein: TargetRange,
    /// Kilocalories per day.
    pub calories: TargetRange,
    pub macro_split: MacroSplit,
    /// Liters per day.
    pub water: TargetRange,
    /// Grams per day.
    pub fiber: TargetRange,
}

impl GoalTargets {
    /// Grams of each macro that the recommended calories and split imply.
    pub fn macro_grams(&self) -> MacroGrams {
        let kcal = self.calories.recommended;
        let share = |pct: u32| kcal * f64::from(pct) / 100.0;
        MacroGrams {
            protein: (share(self.macro_split.protein) / KCAL_PER_G_PROTEIN_CARB).round(),
            carbs: (share(self.macro_split.carbs) / KCAL_PER_G_PROTEIN_CARB).round(),
            fat: (share(self.macro_split.fat) / KCAL_PER_G_FAT).round(),
        }
    }

    pub fn is_unset(&self) -> bool {
        *self == GoalTargets::default()
    }
}

/// Tunables of the calorie estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetParams {
    /// Used in the basal-rate estimate; profiles carry no height.
    pub assumed_height_cm: f64,
    /// Multiplier from basal rate to daily expenditure.
    pub activity_factor: f64,
    /// Age assumed when the profile has no date of birth.
    pub default_age_years: u32,
    /// Half-width of the calorie band around the recommendation.
    pub calorie_band_kcal: f64,
}

impl Default for TargetParams {
    fn default() -> Self {
        Self {
            assumed_height_cm: 170.0,
            activity_factor: 1.55,
            default_age_years: 30,
            calorie_band_kcal: 200.0,
        }
    }
}

/// Targets with the default [`TargetParams`].
pub fn compute_targets(weight_kg: f64, goal: &str, age_years: Option<u32>) -> GoalTargets {
    compute_targets_with(&TargetParams::default(), weight_kg, goal, age_years)
}

pub fn compute_targets_with(
    params: &TargetParams,
    weight_kg: f64,
    goal: &str,
    age_years: Option<u32>,
) -> GoalTargets {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return GoalTargets::default();
    }

    let parsed = Goal::parse(goal);
    if parsed.is_none() && !goal.trim().is_empty() {
        debug!(goal, "unrecognized goal, using general fitness");
    }
    let goal = parsed.unwrap_or_default();
    let age = f64::from(age_years.unwrap_or(params.default_age_years));

    let (low, high, mid) = goal.protein_multipliers();
    let protein = TargetRange {
        min: (weight_kg * low).round(),
        max: (weight_kg * high).round(),
        recommended: (weight_kg * mid).round(),
    };

    // Mifflin-St Jeor (male constant) with an assumed height.
    let basal = 10.0 * weight_kg + 6.25 * params.assumed_height_cm - 5.0 * age + 5.0;
    let kcal = (basal * params.activity_factor + goal.calorie_offset()).round().max(0.0);
    let calories = TargetRange {
        min: (kcal - params.calorie_band_kcal).max(0.0),
        max: kcal + params.calorie_band_kcal,
        recommended: kcal,
    };

    let water_rec = round1(weight_kg * WATER_L_PER_KG + goal.water_bonus_liters());
    let water = TargetRange {
        min: round1(water_rec - WATER_BAND_L).max(0.0),
        max: round1(water_rec + WATER_BAND_L),
        recommended: water_rec,
    };

    let fiber_rec = (FIBER_G_PER_1000_KCAL * kcal / 1000.0 + goal.fiber_offset_grams()).round();
    let fiber = TargetRange {
        min: (fiber_rec - FIBER_BAND_G).max(0.0),
        max: fiber_rec + FIBER_BAND_G,
        recommended: fiber_rec,
    };

    GoalTargets {
        protein,
        calories,
        macro_split: goal.macro_split(),
        water,
        fiber,
    }
}
