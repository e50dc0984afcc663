//! Typed errors for catalog construction and macro calculation.
//!
//! Malformed user input is never an error here; see `resolver`.

use thiserror::Error;

/// Catalog construction invariant violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("duplicate catalog name: '{0}'")]
    Duplicate(String),

    #[error("invalid catalog name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("invalid {field} value {value} for '{name}'")]
    InvalidValue {
        name: String,
        field: &'static str,
        value: f64,
    },
}

/// Calculation precondition violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A parsed entry names a food the supplied catalog does not contain.
    /// This means the entry was resolved against a different catalog.
    #[error("'{0}' is not in the supplied catalog")]
    UnknownFood(String),
}
