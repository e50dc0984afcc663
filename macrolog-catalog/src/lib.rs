//! macrolog-catalog: nutrition table loading and the bundled food table

pub mod bundled;
pub mod loader;

pub use bundled::{BUNDLED_CSV, default_catalog};
pub use loader::{LoadError, load_catalog_csv, normalize_name, parse_catalog_csv, read_catalog};
