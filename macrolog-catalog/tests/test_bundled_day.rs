use macrolog_catalog::default_catalog;
use macrolog_core::{
    DEFAULT_SUGGESTION_LIMIT, DayLog, Macros, MealLabel, QuantitySource, Unit, calculate_all,
    compute_macros, compute_targets, is_recognized, progress, resolve, suggest,
};

fn macros_of(entry: &str) -> Macros {
    let catalog = default_catalog();
    compute_macros(&resolve(entry, catalog), catalog)
        .unwrap()
        .macros
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{what}: expected {expected}, got {actual}"
    );
}

fn assert_macros(actual: Macros, expected: (f64, f64, f64, f64), what: &str) {
    assert_close(actual.protein, expected.0, &format!("{what} protein"));
    assert_close(actual.carbs, expected.1, &format!("{what} carbs"));
    assert_close(actual.fiber, expected.2, &format!("{what} fiber"));
    assert_close(actual.fat, expected.3, &format!("{what} fat"));
}

#[test]
fn test_piece_gram_and_ml_entries() {
    assert_macros(macros_of("egg 3"), (18.0, 1.8, 0.0, 15.0), "egg 3");
    assert_macros(macros_of("Egg"), (6.0, 0.6, 0.0, 5.0), "egg");
    assert_macros(macros_of("rice 200g"), (5.6, 56.0, 0.8, 0.6), "rice 200g");
    assert_macros(macros_of("milk 250ml"), (8.25, 12.5, 0.0, 8.25), "milk 250ml");
    assert_macros(
        macros_of("chicken breast 150g"),
        (46.5, 0.0, 0.0, 5.4),
        "chicken breast 150g",
    );
}

#[test]
fn test_every_gram_food_scales_by_weight() {
    let catalog = default_catalog();
    let mut checked = 0;

    for entry in catalog.entries().filter(|e| e.record.unit == Unit::Gram) {
        for grams in [1.0, 37.0, 200.0, 2.5] {
            let text = format!("{} {grams}g", entry.name);
            let parsed = resolve(&text, catalog);
            assert_eq!(parsed.matched_name.as_deref(), Some(entry.name.as_str()), "{text}");
            assert_eq!(parsed.quantity, grams, "{text}");

            let row = compute_macros(&parsed, catalog).unwrap();
            let expected = entry.record.macros().scale(grams).rounded();
            assert_eq!(row.macros, expected, "{text}");
        }
        checked += 1;
    }

    assert!(checked > 100, "only {checked} gram foods in the bundled table");
}

#[test]
fn test_brown_bread_slice_vs_gram() {
    let catalog = default_catalog();

    let sliced = resolve("brown bread 2 slice", catalog);
    assert_eq!(sliced.matched_name.as_deref(), Some("brown bread slice"));
    assert_eq!(sliced.unit, Some(Unit::Slice));
    assert_macros(macros_of("brown bread 2 slice"), (1.7, 6.5, 0.76, 0.5), "2 slice");
    assert_macros(macros_of("brown bread 2slices"), (1.7, 6.5, 0.76, 0.5), "2slices");

    let grams = resolve("brown bread 50", catalog);
    assert_eq!(grams.matched_name.as_deref(), Some("brown bread"));
    assert_eq!(grams.unit, Some(Unit::Gram));
    assert_macros(macros_of("brown bread 50"), (1.7, 6.5, 0.75, 0.5), "50 g");
}

#[test]
fn test_longest_name_wins() {
    let catalog = default_catalog();
    assert_eq!(
        resolve("egg white 2", catalog).matched_name.as_deref(),
        Some("egg white")
    );
    assert_eq!(
        resolve("chicken thigh 100", catalog).matched_name.as_deref(),
        Some("chicken thigh")
    );
}

#[test]
fn test_unknown_and_malformed_entries() {
    let catalog = default_catalog();

    let unknown = resolve("xyzfood 5", catalog);
    assert!(!unknown.is_matched());
    assert!(macros_of("xyzfood 5").is_zero());
    assert!(!is_recognized("200", catalog));

    let lots = resolve("egg lots", catalog);
    assert_eq!(lots.quantity, 1.0);
    assert_eq!(lots.quantity_source, QuantitySource::Unparsable);
}

#[test]
fn test_suggestions_follow_table_order() {
    let catalog = default_catalog();
    assert_eq!(
        suggest("ri", catalog, DEFAULT_SUGGESTION_LIMIT),
        vec![
            "shrimp",
            "rice",
            "brown rice",
            "basmati rice",
            "puri",
            "ridge gourd",
            "brinjal",
            "spring onion",
        ]
    );
    assert_eq!(suggest("RI", catalog, 100).len(), 10);
    assert!(suggest("   ", catalog, 8).is_empty());
}

#[test]
fn test_full_day_summary() {
    let catalog = default_catalog();
    let day = DayLog::from_entries([
        (
            MealLabel::Morning,
            vec!["egg 3".to_string(), "oats 40".to_string(), "milk 250ml".to_string()],
        ),
        (MealLabel::Evening, vec!["brown bread 2 slice".to_string()]),
        (MealLabel::PostEvening, vec!["banana 120".to_string()]),
        (
            MealLabel::Night,
            vec![
                "rice 200g".to_string(),
                "dal 100".to_string(),
                "xyzfood 5".to_string(),
            ],
        ),
    ]);

    let summary = calculate_all(&day, catalog);

    let labels: Vec<&str> = summary.meals.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, ["Morning", "Evening", "Post-Evening", "Night"]);

    let morning = &summary.meals[0];
    assert!(morning.shows_total_row());
    assert_macros(morning.totals, (33.05, 40.7, 4.4, 26.05), "morning");

    let evening = &summary.meals[1];
    assert!(!evening.shows_total_row());

    let night = &summary.meals[3];
    assert_eq!(night.rows.len(), 3);
    assert_eq!(night.unresolved().count(), 1);

    assert_macros(summary.totals, (49.67, 150.8, 16.08, 28.51), "day");
    assert_eq!(summary.rows().count(), 8);

    let targets = compute_targets(70.0, "muscle", Some(25));
    let p = progress(&summary.totals, &targets);
    assert!(p.protein_pct > 35.0 && p.protein_pct < 36.0, "{}", p.protein_pct);
}

#[test]
fn test_summary_serializes_flat_rows() {
    let catalog = default_catalog();
    let day = DayLog::from_entries([(MealLabel::Morning, vec!["egg 2".to_string()])]);
    let summary = calculate_all(&day, catalog);

    let json = serde_json::to_value(&summary).unwrap();
    let row = &json["meals"][0]["rows"][0];
    assert_eq!(row["food"], "egg 2");
    assert_eq!(row["protein"], 12.0);
    assert_eq!(json["totals"]["fat"], 10.0);
}
