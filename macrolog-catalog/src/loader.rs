//! Parse nutrition-table CSV files into an immutable catalog.
//!
//! Expected header:
//! name,protein,carbs,fiber,fat,unit
//!
//! Values are per single unit. `fat` may be blank. Rows with unit `100g` or
//! `100ml` (older seed tables list meats and nuts per 100 g) are divided
//! down to per-gram / per-ml records.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use macrolog_core::{Catalog, CatalogBuilder, CatalogEntry, CatalogError, NutritionRecord, Unit};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading catalog csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: unknown unit '{unit}'")]
    UnknownUnit { line: u64, unit: String },

    #[error("line {line}: {source}")]
    Entry {
        line: u64,
        #[source]
        source: CatalogError,
    },
}

/// One CSV row before normalization.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    name: String,
    protein: f64,
    carbs: f64,
    fiber: f64,
    #[serde(default)]
    fat: Option<f64>,
    unit: String,
}

/// Lowercase and collapse internal whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a unit column to `(unit, per-unit scale)`.
fn parse_unit(raw: &str) -> Option<(Unit, f64)> {
    match raw.trim().to_lowercase().as_str() {
        "100g" => Some((Unit::Gram, 0.01)),
        "100ml" => Some((Unit::Ml, 0.01)),
        other => Unit::from_keyword(other).map(|u| (u, 1.0)),
    }
}

/// Parse catalog CSV from any reader, rejecting the first bad row.
pub fn read_catalog<R: Read>(reader: R) -> Result<Catalog, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut builder = CatalogBuilder::default();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        // Skip blank trailing rows
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let row: CatalogRow = record.deserialize(Some(&headers))?;
        let (unit, scale) = parse_unit(&row.unit).ok_or_else(|| LoadError::UnknownUnit {
            line,
            unit: row.unit.clone(),
        })?;

        let record = NutritionRecord::new(
            row.protein * scale,
            row.carbs * scale,
            row.fiber * scale,
            row.fat.unwrap_or(0.0) * scale,
            unit,
        );

        builder
            .push(CatalogEntry::new(normalize_name(&row.name), record))
            .map_err(|source| LoadError::Entry { line, source })?;
    }

    let catalog = builder.build();
    info!(
        entries = catalog.len(),
        siblings = catalog.sibling_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

pub fn parse_catalog_csv(text: &str) -> Result<Catalog, LoadError> {
    read_catalog(text.as_bytes())
}

/// Load a catalog CSV file from disk.
pub fn load_catalog_csv(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let catalog = read_catalog(file).with_context(|| format!("parsing {}", path.display()))?;
    Ok(catalog)
}
