//! Immutable nutrition catalog: canonical food name -> per-unit record.
//!
//! Names are lowercase, 1-3 space-separated words, unique. Insertion order is
//! preserved because suggestions are listed in catalog order.
//!
//! A name of the form `"<base> <unit>"` whose base is itself a catalog name
//! (e.g. `"brown bread slice"` next to `"brown bread"`) is a *sibling* of the
//! base: entries that mention that unit resolve to the sibling record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;
use crate::nutrition::{NutritionRecord, Unit};

/// Longest canonical food name, in words.
pub const MAX_NAME_WORDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub record: NutritionRecord,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, record: NutritionRecord) -> Self {
        Self {
            name: name.into(),
            record,
        }
    }
}

/// A unit-scoped alternative record for a base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sibling {
    suffix: Unit,
    index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
    siblings: HashMap<String, Vec<Sibling>>,
}

impl Catalog {
    /// Build a catalog, rejecting the first invalid or duplicate entry.
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Result<Self, CatalogError> {
        let mut builder = CatalogBuilder::default();
        for entry in entries {
            builder.push(entry)?;
        }
        Ok(builder.build())
    }

    pub fn get(&self, name: &str) -> Option<&NutritionRecord> {
        self.index.get(name).map(|&i| &self.entries[i].record)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The sibling of `base` selected by a textual unit token, if any.
    ///
    /// A sibling is selected when the token contains its unit keyword, so
    /// `"slice"`, `"slices"` and `"2slice"` all pick `"<base> slice"`.
    pub fn sibling_for(&self, base: &str, unit_token: &str) -> Option<&CatalogEntry> {
        let token = unit_token.to_lowercase();
        self.siblings
            .get(base)?
            .iter()
            .find(|s| token.contains(s.suffix.keyword()))
            .map(|s| &self.entries[s.index])
    }

    /// Number of base names that have at least one sibling record.
    pub fn sibling_count(&self) -> usize {
        self.siblings.len()
    }
}

/// Incremental catalog construction; lets loaders report the offending row.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl CatalogBuilder {
    pub fn push(&mut self, entry: CatalogEntry) -> Result<(), CatalogError> {
        validate_name(&entry.name)?;
        validate_record(&entry.name, &entry.record)?;
        if self.index.contains_key(&entry.name) {
            return Err(CatalogError::Duplicate(entry.name));
        }
        self.index.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn build(self) -> Catalog {
        let mut siblings: HashMap<String, Vec<Sibling>> = HashMap::new();

        for (i, entry) in self.entries.iter().enumerate() {
            let Some((base, suffix)) = entry.name.rsplit_once(' ') else {
                continue;
            };
            let Some(unit) = Unit::ALL.into_iter().find(|u| u.keyword() == suffix) else {
                continue;
            };
            if self.index.contains_key(base) {
                debug!(base, sibling = %entry.name, %unit, "registered unit sibling");
                siblings.entry(base.to_string()).or_default().push(Sibling {
                    suffix: unit,
                    index: i,
                });
            }
        }

        Catalog {
            entries: self.entries,
            index: self.index,
            siblings,
        }
    }
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    let invalid = |reason| CatalogError::InvalidName {
        name: name.to_string(),
        reason,
    };

    let words = name.split(' ').collect::<Vec<_>>();
    if name.is_empty() {
        return Err(invalid("empty"));
    }
    if words.iter().any(|w| w.is_empty()) || name.chars().any(|c| c.is_whitespace() && c != ' ')
    {
        return Err(invalid("words must be separated by single spaces"));
    }
    if words.len() > MAX_NAME_WORDS {
        return Err(invalid("more than 3 words"));
    }
    if name.chars().any(|c| c.is_uppercase()) {
        return Err(invalid("not lowercase"));
    }
    Ok(())
}

fn validate_record(name: &str, record: &NutritionRecord) -> Result<(), CatalogError> {
    for (field, value) in [
        ("protein", record.protein),
        ("carbs", record.carbs),
        ("fiber", record.fiber),
        ("fat", record.fat),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(CatalogError::InvalidValue {
                name: name.to_string(),
                field,
                value,
            });
        }
    }
    Ok(())
}
