//! User profile fields consumed by the target calculator.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::targets::{GoalTargets, TargetParams, compute_targets_with};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Zero means unset.
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub goal: String,
}

impl Profile {
    pub fn new(weight_kg: f64, dob: Option<NaiveDate>, goal: impl Into<String>) -> Self {
        Self {
            weight_kg,
            dob,
            goal: goal.into(),
        }
    }

    /// Age in whole years on `today`. `None` without a date of birth or
    /// when the date of birth is in the future.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let dob = self.dob?;
        let mut years = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }

    pub fn targets_on(&self, today: NaiveDate, params: &TargetParams) -> GoalTargets {
        compute_targets_with(params, self.weight_kg, &self.goal, self.age_on(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let p = Profile::new(70.0, Some(date(2000, 6, 15)), "muscle");
        assert_eq!(p.age_on(date(2025, 6, 14)), Some(24));
        assert_eq!(p.age_on(date(2025, 6, 15)), Some(25));
        assert_eq!(p.age_on(date(2025, 12, 31)), Some(25));
    }

    #[test]
    fn test_age_missing_or_future_dob() {
        assert_eq!(Profile::new(70.0, None, "").age_on(date(2025, 1, 1)), None);
        let unborn = Profile::new(70.0, Some(date(2030, 1, 1)), "");
        assert_eq!(unborn.age_on(date(2025, 1, 1)), None);
    }

    #[test]
    fn test_targets_use_age() {
        let p = Profile::new(70.0, Some(date(2000, 1, 1)), "muscle");
        let t = p.targets_on(date(2025, 6, 1), &TargetParams::default());
        assert_eq!(t, crate::targets::compute_targets(70.0, "muscle", Some(25)));
    }

    #[test]
    fn test_unset_profile_deserializes() {
        let p: Profile = serde_json::from_str("{}").unwrap();
        assert_eq!(p, Profile::default());
        assert!(p.targets_on(date(2025, 1, 1), &TargetParams::default()).is_unset());
    }
}
