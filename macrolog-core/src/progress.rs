//! How much of the day's targets the logged food covers.

use serde::{Deserialize, Serialize};

use crate::nutrition::Macros;
use crate::targets::GoalTargets;

/// Reference amounts used when the profile has no targets.
pub const FALLBACK_PROTEIN_G: f64 = 150.0;
pub const FALLBACK_CARBS_G: f64 = 300.0;
pub const FALLBACK_FIBER_G: f64 = 30.0;
pub const FALLBACK_FAT_G: f64 = 65.0;

/// Percent of each reference met, capped at 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fiber_pct: f64,
    pub fat_pct: f64,
}

/// The gram amounts progress is measured against.
pub fn references(targets: &GoalTargets) -> Macros {
    if targets.is_unset() {
        return Macros {
            protein: FALLBACK_PROTEIN_G,
            carbs: FALLBACK_CARBS_G,
            fiber: FALLBACK_FIBER_G,
            fat: FALLBACK_FAT_G,
        };
    }
    let grams = targets.macro_grams();
    Macros {
        protein: targets.protein.recommended,
        carbs: grams.carbs,
        fiber: targets.fiber.recommended,
        fat: grams.fat,
    }
}

pub fn progress(totals: &Macros, targets: &GoalTargets) -> DailyProgress {
    let reference = references(targets);
    DailyProgress {
        protein_pct: percent(totals.protein, reference.protein),
        carbs_pct: percent(totals.carbs, reference.carbs),
        fiber_pct: percent(totals.fiber, reference.fiber),
        fat_pct: percent(totals.fat, reference.fat),
    }
}

fn percent(amount: f64, reference: f64) -> f64 {
    if reference <= 0.0 {
        return 0.0;
    }
    (amount / reference * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::compute_targets;

    #[test]
    fn test_fallback_references_for_unset_profile() {
        let totals = Macros {
            protein: 75.0,
            carbs: 600.0,
            fiber: 15.0,
            fat: 0.0,
        };
        let p = progress(&totals, &GoalTargets::default());
        assert_eq!(p.protein_pct, 50.0);
        assert_eq!(p.carbs_pct, 100.0, "capped");
        assert_eq!(p.fiber_pct, 50.0);
        assert_eq!(p.fat_pct, 0.0);
    }

    #[test]
    fn test_against_goal_targets() {
        let targets = compute_targets(70.0, "muscle", Some(25));
        let totals = Macros {
            protein: 70.0,
            carbs: 160.0,
            fiber: 20.0,
            fat: 79.0,
        };
        let p = progress(&totals, &targets);
        assert_eq!(p.protein_pct, 50.0);
        assert_eq!(p.carbs_pct, 50.0);
        assert_eq!(p.fiber_pct, 50.0);
        assert_eq!(p.fat_pct, 100.0);
    }
}
