//! Meal aggregation and the per-meal entry lists that feed it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::{MacroContribution, contribution};
use crate::catalog::Catalog;
use crate::nutrition::Macros;
use crate::resolver::resolve;

/// Fixed day-part tags. Grouping only; no time-of-day validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealLabel {
    #[serde(rename = "morning")]
    Morning,
    #[serde(rename = "evening")]
    Evening,
    #[serde(rename = "post-evening")]
    PostEvening,
    #[serde(rename = "night")]
    Night,
}

impl MealLabel {
    /// Display order of a day.
    pub const ALL: [MealLabel; 4] = [
        MealLabel::Morning,
        MealLabel::Evening,
        MealLabel::PostEvening,
        MealLabel::Night,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealLabel::Morning => "Morning",
            MealLabel::Evening => "Evening",
            MealLabel::PostEvening => "Post-Evening",
            MealLabel::Night => "Night",
        }
    }

    fn position(&self) -> usize {
        match self {
            MealLabel::Morning => 0,
            MealLabel::Evening => 1,
            MealLabel::PostEvening => 2,
            MealLabel::Night => 3,
        }
    }
}

impl fmt::Display for MealLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MealLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match key.as_str() {
            "morning" | "breakfast" => Ok(MealLabel::Morning),
            "evening" | "lunch" => Ok(MealLabel::Evening),
            "postevening" | "postlunch" | "snack" => Ok(MealLabel::PostEvening),
            "night" | "dinner" => Ok(MealLabel::Night),
            _ => Err(format!("unknown meal label: {s}")),
        }
    }
}

/// Computed rows and totals for one meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealTotal {
    pub label: String,
    pub rows: Vec<MacroContribution>,
    /// Sum of the already-rounded row values; not re-rounded.
    pub totals: Macros,
}

impl MealTotal {
    /// Totals rounded to 2 decimals for display.
    pub fn display_totals(&self) -> Macros {
        self.totals.rounded()
    }

    /// A single row already equals the total, so presentation only shows a
    /// separate total row for two or more rows.
    pub fn shows_total_row(&self) -> bool {
        self.rows.len() > 1
    }

    /// Rows whose text matched no catalog food.
    pub fn unresolved(&self) -> impl Iterator<Item = &MacroContribution> {
        self.rows.iter().filter(|r| !r.is_resolved())
    }
}

/// Resolve and sum every non-blank entry of one meal, in input order.
///
/// Rows are rounded individually before summing, so totals are the sum of
/// the displayed row values.
pub fn aggregate<S: AsRef<str>>(
    label: impl Into<String>,
    raw_entries: &[S],
    catalog: &Catalog,
) -> MealTotal {
    let rows: Vec<MacroContribution> = raw_entries
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            let parsed = resolve(entry, catalog);
            let record = parsed.matched_name.as_deref().and_then(|n| catalog.get(n));
            contribution(&parsed, record)
        })
        .collect();

    let totals = rows.iter().map(|r| &r.macros).sum();

    MealTotal {
        label: label.into(),
        rows,
        totals,
    }
}

/// All meals of a day in fixed label order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub meals: Vec<MealTotal>,
    pub totals: Macros,
}

impl DailySummary {
    fn from_meals(meals: Vec<MealTotal>) -> Self {
        let totals = meals.iter().map(|m| &m.totals).sum();
        Self { meals, totals }
    }

    /// Every row of the day, grouped by meal in label order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &MacroContribution)> {
        self.meals
            .iter()
            .flat_map(|m| m.rows.iter().map(move |r| (m.label.as_str(), r)))
    }
}

/// Entry list for one meal plus its last computed total.
///
/// Any mutation of the entries discards the cached total; it is only
/// recomputed when [`MealSlot::calculate`] is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSlot {
    label: MealLabel,
    entries: Vec<String>,
    #[serde(skip)]
    cached: Option<MealTotal>,
}

impl MealSlot {
    pub fn new(label: MealLabel) -> Self {
        Self {
            label,
            entries: vec![String::new()],
            cached: None,
        }
    }

    pub fn with_entries(label: MealLabel, entries: Vec<String>) -> Self {
        let mut slot = Self::new(label);
        if !entries.is_empty() {
            slot.entries = entries;
        }
        slot
    }

    pub fn label(&self) -> MealLabel {
        self.label
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.entries.push(text.into());
        self.cached = None;
    }

    /// Replace the entry at `index`; out-of-range indices are ignored.
    pub fn update(&mut self, index: usize, text: impl Into<String>) {
        if let Some(slot) = self.entries.get_mut(index) {
            *slot = text.into();
            self.cached = None;
        }
    }

    /// Remove the entry at `index`. The list never becomes empty: removing
    /// the last entry leaves a single blank one.
    pub fn remove(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
            if self.entries.is_empty() {
                self.entries.push(String::new());
            }
            self.cached = None;
        }
    }

    /// At least one entry names a catalog food.
    pub fn has_recognized_entry(&self, catalog: &Catalog) -> bool {
        self.entries
            .iter()
            .any(|e| crate::resolver::is_recognized(e, catalog))
    }

    /// Last computed total, `None` if the entries changed since.
    pub fn cached(&self) -> Option<&MealTotal> {
        self.cached.as_ref()
    }

    /// Recompute the total from scratch and cache it.
    pub fn calculate(&mut self, catalog: &Catalog) -> &MealTotal {
        let total = aggregate(self.label.label(), &self.entries, catalog);
        debug!(meal = %self.label, rows = total.rows.len(), "meal calculated");
        self.cached.insert(total)
    }
}

/// The four meal slots of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    slots: [MealSlot; 4],
}

impl Default for DayLog {
    fn default() -> Self {
        Self {
            slots: MealLabel::ALL.map(MealSlot::new),
        }
    }
}

impl DayLog {
    /// Build a day from `(label, entries)` pairs; later pairs for the same
    /// label append.
    pub fn from_entries<I, E>(meals: I) -> Self
    where
        I: IntoIterator<Item = (MealLabel, E)>,
        E: IntoIterator<Item = String>,
    {
        let mut lists: [Vec<String>; 4] = Default::default();
        for (label, entries) in meals {
            lists[label.position()].extend(entries);
        }
        let mut lists = lists.into_iter();
        Self {
            slots: MealLabel::ALL
                .map(|label| MealSlot::with_entries(label, lists.next().unwrap_or_default())),
        }
    }

    pub fn slot(&self, label: MealLabel) -> &MealSlot {
        &self.slots[label.position()]
    }

    pub fn slot_mut(&mut self, label: MealLabel) -> &mut MealSlot {
        &mut self.slots[label.position()]
    }

    pub fn slots(&self) -> impl Iterator<Item = &MealSlot> {
        self.slots.iter()
    }

    /// Recompute every meal, refreshing each slot's cache.
    pub fn calculate_all(&mut self, catalog: &Catalog) -> DailySummary {
        let meals = self
            .slots
            .iter_mut()
            .map(|slot| slot.calculate(catalog).clone())
            .collect();
        DailySummary::from_meals(meals)
    }
}

/// Compute a day's summary without touching any cache.
pub fn calculate_all(day: &DayLog, catalog: &Catalog) -> DailySummary {
    let meals = day
        .slots()
        .map(|slot| aggregate(slot.label().label(), slot.entries(), catalog))
        .collect();
    DailySummary::from_meals(meals)
}
