//! Per-entry macro contribution.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CalcError;
use crate::nutrition::{Macros, NutritionRecord};
use crate::resolver::ParsedEntry;

/// One computed output row, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroContribution {
    /// The entry text exactly as the user typed it.
    pub food: String,
    pub matched_name: Option<String>,
    #[serde(flatten)]
    pub macros: Macros,
}

impl MacroContribution {
    pub fn is_resolved(&self) -> bool {
        self.matched_name.is_some()
    }
}

/// Multiply the matched record by the parsed quantity.
///
/// Unmatched entries contribute zero. A matched name that is missing from
/// `catalog` means the entry was resolved against another catalog and is
/// reported as [`CalcError::UnknownFood`].
pub fn compute_macros(
    parsed: &ParsedEntry,
    catalog: &Catalog,
) -> Result<MacroContribution, CalcError> {
    let record = match &parsed.matched_name {
        None => None,
        Some(name) => Some(
            catalog
                .get(name)
                .ok_or_else(|| CalcError::UnknownFood(name.clone()))?,
        ),
    };
    Ok(contribution(parsed, record))
}

/// The row for `parsed` given its already looked-up record.
pub(crate) fn contribution(
    parsed: &ParsedEntry,
    record: Option<&NutritionRecord>,
) -> MacroContribution {
    let macros = record
        .map(|r| r.macros().scale(parsed.quantity).rounded())
        .unwrap_or_default();

    MacroContribution {
        food: parsed.raw_text.clone(),
        matched_name: parsed.matched_name.clone(),
        macros,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::nutrition::{NutritionRecord, Unit};
    use crate::resolver::resolve;

    fn catalog() -> Catalog {
        Catalog::new([
            CatalogEntry::new("egg", NutritionRecord::new(6.0, 0.6, 0.0, 5.0, Unit::Piece)),
            CatalogEntry::new("rice", NutritionRecord::new(0.028, 0.28, 0.004, 0.003, Unit::Gram)),
            CatalogEntry::new(
                "brown bread",
                NutritionRecord::new(0.034, 0.13, 0.015, 0.01, Unit::Gram),
            ),
            CatalogEntry::new(
                "brown bread slice",
                NutritionRecord::new(0.85, 3.25, 0.38, 0.25, Unit::Slice),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_egg_count() {
        let c = catalog();
        let row = compute_macros(&resolve("egg 3", &c), &c).unwrap();
        assert_eq!(row.food, "egg 3");
        assert_eq!(row.macros.protein, 18.0);
        assert_eq!(row.macros.carbs, 1.8);
        assert_eq!(row.macros.fiber, 0.0);
        assert_eq!(row.macros.fat, 15.0);
    }

    #[test]
    fn test_rice_grams() {
        let c = catalog();
        let row = compute_macros(&resolve("rice 200g", &c), &c).unwrap();
        assert_eq!(row.macros.protein, 5.6);
        assert_eq!(row.macros.carbs, 56.0);
        assert_eq!(row.macros.fiber, 0.8);
        assert_eq!(row.macros.fat, 0.6);
    }

    #[test]
    fn test_brown_bread_slices() {
        let c = catalog();
        let row = compute_macros(&resolve("brown bread 2 slice", &c), &c).unwrap();
        assert_eq!(row.macros.protein, 1.7);
        assert_eq!(row.macros.carbs, 6.5);
        assert_eq!(row.macros.fiber, 0.76);
        assert_eq!(row.macros.fat, 0.5);
    }

    #[test]
    fn test_unmatched_is_zero() {
        let c = catalog();
        for text in ["", "   ", "xyzfood 5"] {
            let row = compute_macros(&resolve(text, &c), &c).unwrap();
            assert!(row.macros.is_zero(), "expected zero macros for {text:?}");
            assert_eq!(row.food, text);
            assert!(!row.is_resolved());
        }
    }

    #[test]
    fn test_pure() {
        let c = catalog();
        let parsed = resolve("rice 150g", &c);
        assert_eq!(compute_macros(&parsed, &c), compute_macros(&parsed, &c));
    }

    #[test]
    fn test_foreign_catalog_is_an_error() {
        let c = catalog();
        let parsed = resolve("egg 2", &c);
        let other = Catalog::new([CatalogEntry::new(
            "rice",
            NutritionRecord::new(0.028, 0.28, 0.004, 0.003, Unit::Gram),
        )])
        .unwrap();
        assert_eq!(
            compute_macros(&parsed, &other),
            Err(CalcError::UnknownFood("egg".to_string()))
        );
    }

    #[test]
    fn test_serialized_row_shape() {
        let c = catalog();
        let row = compute_macros(&resolve("egg 1", &c), &c).unwrap();
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["food"], "egg 1");
        assert_eq!(json["protein"], 6.0);
        assert_eq!(json["matched_name"], "egg");
    }
}
