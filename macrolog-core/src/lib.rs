//! macrolog-core: food entry resolution, macro aggregation and goal targets

pub mod calculator;
pub mod catalog;
pub mod error;
pub mod meals;
pub mod nutrition;
pub mod profile;
pub mod progress;
pub mod resolver;
pub mod streaks;
pub mod suggest;
pub mod targets;

pub use calculator::{MacroContribution, compute_macros};
pub use catalog::{Catalog, CatalogBuilder, CatalogEntry, MAX_NAME_WORDS};
pub use error::{CalcError, CatalogError};
pub use meals::{DailySummary, DayLog, MealLabel, MealSlot, MealTotal, aggregate, calculate_all};
pub use nutrition::{Macros, NutritionRecord, Unit, round1, round2};
pub use profile::Profile;
pub use progress::{DailyProgress, progress};
pub use resolver::{ParsedEntry, QuantitySource, is_recognized, resolve};
pub use streaks::{current_streak, longest_streak};
pub use suggest::{DEFAULT_SUGGESTION_LIMIT, suggest};
pub use targets::{
    Goal, GoalTargets, MacroGrams, MacroSplit, TargetParams, TargetRange, compute_targets,
    compute_targets_with,
};
