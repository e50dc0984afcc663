use macrolog_core::{
    Catalog, DailyProgress, DailySummary, DayLog, GoalTargets, Macros, MealTotal, QuantitySource,
    TargetRange, resolve,
};
use serde::Serialize;
use std::fmt::Write;

/// Machine-readable result of `macrolog calc --json`.
#[derive(Debug, Serialize)]
pub struct CalcReport<'a> {
    pub summary: &'a DailySummary,
    pub progress: DailyProgress,
    /// Entries naming no catalog food.
    pub unresolved: Vec<String>,
    /// Entries whose quantity could not be read and counted as 1.
    pub unparsable_quantity: Vec<String>,
}

impl<'a> CalcReport<'a> {
    pub fn new(
        summary: &'a DailySummary,
        progress: DailyProgress,
        day: &DayLog,
        catalog: &Catalog,
    ) -> Self {
        Self {
            summary,
            progress,
            unresolved: summary
                .meals
                .iter()
                .flat_map(|meal| meal.unresolved())
                .map(|row| row.food.clone())
                .collect(),
            unparsable_quantity: unparsable_entries(day, catalog),
        }
    }
}

pub fn unparsable_entries(day: &DayLog, catalog: &Catalog) -> Vec<String> {
    day.slots()
        .flat_map(|slot| slot.entries())
        .filter(|entry| {
            let parsed = resolve(entry, catalog);
            parsed.is_matched() && parsed.quantity_source == QuantitySource::Unparsable
        })
        .cloned()
        .collect()
}

const ROW_HEADER: &str = "Food                              Protein    Carbs    Fiber      Fat";

fn macro_row(out: &mut String, name: &str, m: &Macros) {
    let _ = writeln!(
        out,
        "{:<30} {:>9.2} {:>8.2} {:>8.2} {:>8.2}",
        name, m.protein, m.carbs, m.fiber, m.fat
    );
}

pub fn render_meal(meal: &MealTotal) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## {}", meal.label);
    let _ = writeln!(out, "{ROW_HEADER}");
    for row in &meal.rows {
        let name = if row.is_resolved() {
            row.food.clone()
        } else {
            format!("{} (unknown)", row.food)
        };
        macro_row(&mut out, &name, &row.macros);
    }
    if meal.shows_total_row() {
        macro_row(&mut out, "Total", &meal.display_totals());
    }
    out
}

pub fn render_progress(totals: &Macros, progress: &DailyProgress) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## Daily total");
    let _ = writeln!(out, "{ROW_HEADER}");
    macro_row(&mut out, "Total", &totals.rounded());
    let _ = writeln!(
        out,
        "{:<30} {:>8.0}% {:>7.0}% {:>7.0}% {:>7.0}%",
        "Of target", progress.protein_pct, progress.carbs_pct, progress.fiber_pct, progress.fat_pct
    );
    out
}

fn range_line(out: &mut String, label: &str, range: &TargetRange, unit: &str, precision: usize) {
    let _ = writeln!(
        out,
        "{label:<10} {rec:.p$} {unit} (range {min:.p$}-{max:.p$} {unit})",
        rec = range.recommended,
        min = range.min,
        max = range.max,
        p = precision,
    );
}

pub fn render_targets(targets: &GoalTargets) -> String {
    let mut out = String::new();
    range_line(&mut out, "Protein", &targets.protein, "g", 0);
    range_line(&mut out, "Calories", &targets.calories, "kcal", 0);
    range_line(&mut out, "Water", &targets.water, "L", 1);
    range_line(&mut out, "Fiber", &targets.fiber, "g", 0);

    let split = targets.macro_split;
    let grams = targets.macro_grams();
    let _ = writeln!(
        out,
        "{:<10} protein {}% ({:.0} g) / carbs {}% ({:.0} g) / fat {}% ({:.0} g)",
        "Split", split.protein, grams.protein, split.carbs, grams.carbs, split.fat, grams.fat
    );
    out
}
