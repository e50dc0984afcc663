//! The nutrition table shipped with the binary.

use std::sync::LazyLock;

use macrolog_core::Catalog;

use crate::loader::parse_catalog_csv;

pub const BUNDLED_CSV: &str = include_str!("../data/foods.csv");

static DEFAULT_CATALOG: LazyLock<Catalog> =
    LazyLock::new(|| parse_catalog_csv(BUNDLED_CSV).expect("bundled foods.csv is valid"));

/// The bundled catalog, parsed once per process.
pub fn default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}
