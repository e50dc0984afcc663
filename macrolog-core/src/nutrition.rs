//! Per-unit nutrition records and macro arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// The unit a nutrition record is defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "gram")]
    Gram,
    #[serde(rename = "ml")]
    Ml,
    #[serde(rename = "piece")]
    Piece,
    #[serde(rename = "slice")]
    Slice,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Gram, Unit::Ml, Unit::Piece, Unit::Slice];

    /// Canonical lowercase keyword, also used as a sibling-name suffix.
    pub fn keyword(&self) -> &'static str {
        match self {
            Unit::Gram => "gram",
            Unit::Ml => "ml",
            Unit::Piece => "piece",
            Unit::Slice => "slice",
        }
    }

    /// Parse a unit keyword, accepting common abbreviations and plurals.
    pub fn from_keyword(s: &str) -> Option<Unit> {
        match s.trim().to_lowercase().as_str() {
            "gram" | "grams" | "g" | "gm" => Some(Unit::Gram),
            "ml" | "millilitre" | "milliliter" => Some(Unit::Ml),
            "piece" | "pieces" | "pc" | "pcs" => Some(Unit::Piece),
            "slice" | "slices" => Some(Unit::Slice),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Nutrient content of exactly one unit of a food.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    pub protein: f64,
    pub carbs: f64,
    pub fiber: f64,
    /// Some source tables omit fat; it reads as zero.
    #[serde(default)]
    pub fat: f64,
    pub unit: Unit,
}

impl NutritionRecord {
    pub fn new(protein: f64, carbs: f64, fiber: f64, fat: f64, unit: Unit) -> Self {
        Self {
            protein,
            carbs,
            fiber,
            fat,
            unit,
        }
    }

    /// The four macros for a single unit.
    pub fn macros(&self) -> Macros {
        Macros {
            protein: self.protein,
            carbs: self.carbs,
            fiber: self.fiber,
            fat: self.fat,
        }
    }
}

/// Protein, carbs, fiber and fat in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub fat: f64,
}

impl Macros {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fiber: self.fiber * factor,
            fat: self.fat * factor,
        }
    }

    /// Round every field to 2 decimal places (half away from zero).
    pub fn rounded(&self) -> Self {
        Self {
            protein: round2(self.protein),
            carbs: round2(self.carbs),
            fiber: round2(self.fiber),
            fat: round2(self.fat),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.protein == 0.0 && self.carbs == 0.0 && self.fiber == 0.0 && self.fat == 0.0
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, other: Macros) -> Macros {
        Macros {
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fiber: self.fiber + other.fiber,
            fat: self.fat + other.fat,
        }
    }
}

impl Sum for Macros {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Macros::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Macros> for Macros {
    fn sum<I: Iterator<Item = &'a Macros>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_keywords() {
        assert_eq!(Unit::from_keyword("G"), Some(Unit::Gram));
        assert_eq!(Unit::from_keyword("slices"), Some(Unit::Slice));
        assert_eq!(Unit::from_keyword("pcs"), Some(Unit::Piece));
        assert_eq!(Unit::from_keyword("cup"), None);
        for unit in Unit::ALL {
            assert_eq!(Unit::from_keyword(unit.keyword()), Some(unit));
        }
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(5.6000000000000005), 5.6);
        assert_eq!(round2(1.7999999999999998), 1.8);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
    }

    #[test]
    fn test_macros_scale_and_sum() {
        let egg = NutritionRecord::new(6.0, 0.6, 0.0, 5.0, Unit::Piece);
        let three = egg.macros().scale(3.0).rounded();
        assert_eq!(three.protein, 18.0);
        assert_eq!(three.carbs, 1.8);
        assert_eq!(three.fat, 15.0);

        let total: Macros = [three, three].iter().sum();
        assert_eq!(total.protein, 36.0);
        assert!(!total.is_zero());
        assert!(Macros::zero().is_zero());
    }

    #[test]
    fn test_record_fat_defaults_to_zero() {
        let rec: NutritionRecord =
            serde_json::from_str(r#"{"protein":1.0,"carbs":2.0,"fiber":0.5,"unit":"gram"}"#)
                .unwrap();
        assert_eq!(rec.fat, 0.0);
        assert_eq!(rec.unit, Unit::Gram);
    }
}
