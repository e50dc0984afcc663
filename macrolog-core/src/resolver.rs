//! Free-text food entry resolution.
//!
//! Grammar: `NAME (1-3 words) [NUMBER][UNIT] [UNIT]`, e.g. `egg 3`,
//! `rice 200g`, `brown bread 2 slice`. The name is matched longest-first
//! against the catalog. No regex or LLM guessing of food names: a word
//! sequence either is a catalog key or it is not.
//!
//! Resolution never fails. Unknown foods come back with `matched_name = None`
//! and a malformed quantity reads as 1 (see [`QuantitySource`]).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, MAX_NAME_WORDS};
use crate::nutrition::Unit;

/// Leading unsigned decimal of a quantity token: `200`, `2.5`, `.5`, `1e3`.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid regex")
});

/// Where the quantity of a parsed entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantitySource {
    /// A number was present in the text.
    #[serde(rename = "explicit")]
    Explicit,
    /// Nothing followed the name; quantity defaults to 1.
    #[serde(rename = "omitted")]
    Omitted,
    /// Text followed the name but did not start with a finite number;
    /// quantity defaults to 1 and the caller may flag the entry.
    #[serde(rename = "unparsable")]
    Unparsable,
}

/// One free-text entry after resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub raw_text: String,
    /// Catalog name of the record to use, `None` when nothing matched.
    pub matched_name: Option<String>,
    /// Quantity in units of `unit`. Zero when unmatched.
    pub quantity: f64,
    /// The matched record's declared unit.
    pub unit: Option<Unit>,
    /// Textual unit after the quantity (`"g"`, `"slice"`), unvalidated.
    pub unit_token: Option<String>,
    pub quantity_source: QuantitySource,
}

impl ParsedEntry {
    fn unmatched(raw_text: &str) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            matched_name: None,
            quantity: 0.0,
            unit: None,
            unit_token: None,
            quantity_source: QuantitySource::Omitted,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.matched_name.is_some()
    }
}

/// Quantity and unit text following the food name.
#[derive(Debug, Clone, PartialEq)]
struct QuantitySpec {
    quantity: f64,
    source: QuantitySource,
    unit_token: Option<String>,
}

/// Resolve one free-text entry against the catalog.
pub fn resolve(text: &str, catalog: &Catalog) -> ParsedEntry {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return ParsedEntry::unmatched(text);
    }

    let parts: Vec<&str> = normalized.split_whitespace().collect();

    let Some((width, base)) = match_name(&parts, catalog) else {
        debug!(entry = text, "no catalog match");
        return ParsedEntry::unmatched(text);
    };

    let spec = parse_quantity(&parts[width..]);

    // A unit-scoped sibling record wins over the base record when the entry
    // mentions that unit ("brown bread 2 slice").
    let name = match spec
        .unit_token
        .as_deref()
        .and_then(|token| catalog.sibling_for(&base, token))
    {
        Some(sibling) => {
            debug!(entry = text, base = %base, sibling = %sibling.name, "using unit sibling");
            sibling.name.clone()
        }
        None => base,
    };

    let unit = catalog.get(&name).map(|r| r.unit);
    debug!(
        entry = text,
        name = %name,
        quantity = spec.quantity,
        source = ?spec.source,
        "resolved entry"
    );

    ParsedEntry {
        raw_text: text.to_string(),
        matched_name: Some(name),
        quantity: spec.quantity,
        unit,
        unit_token: spec.unit_token,
        quantity_source: spec.source,
    }
}

/// Whether the entry's leading words (or the whole text) name a catalog food.
pub fn is_recognized(text: &str, catalog: &Catalog) -> bool {
    let normalized = text.trim().to_lowercase();
    let parts: Vec<&str> = normalized.split_whitespace().collect();
    !parts.is_empty() && match_name(&parts, catalog).is_some()
}

/// Find the catalog name at the start of `parts`: the whole text first, then
/// the longest prefix of up to [`MAX_NAME_WORDS`] words. Returns the number
/// of words consumed and the name.
fn match_name(parts: &[&str], catalog: &Catalog) -> Option<(usize, String)> {
    let whole = parts.join(" ");
    if catalog.contains(&whole) {
        return Some((parts.len(), whole));
    }

    (1..=parts.len().min(MAX_NAME_WORDS)).rev().find_map(|width| {
        let candidate = parts[..width].join(" ");
        catalog.contains(&candidate).then_some((width, candidate))
    })
}

fn parse_quantity(rest: &[&str]) -> QuantitySpec {
    let Some((first, tail)) = rest.split_first() else {
        return QuantitySpec {
            quantity: 1.0,
            source: QuantitySource::Omitted,
            unit_token: None,
        };
    };

    let (quantity, source, remainder) = match LEADING_NUMBER.find(first) {
        Some(m) => match m.as_str().parse::<f64>() {
            Ok(q) if q.is_finite() => (q, QuantitySource::Explicit, &first[m.end()..]),
            _ => (1.0, QuantitySource::Unparsable, *first),
        },
        None => (1.0, QuantitySource::Unparsable, *first),
    };

    // "2 slice": the unit is its own token. "200g": it is glued on.
    let unit_token = match tail.first() {
        Some(explicit) => Some(explicit.to_string()),
        None => {
            let letters: String = remainder.chars().filter(|c| c.is_alphabetic()).collect();
            (!letters.is_empty()).then_some(letters)
        }
    };

    QuantitySpec {
        quantity,
        source,
        unit_token,
    }
}
