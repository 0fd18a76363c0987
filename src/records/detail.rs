//! Detail line record - One row of a project's `detalle.csv`.

use serde::{Deserialize, Serialize};

/// Association between a budget item and a catalog entry, with a quantity.
///
/// Invariant: at most one row per (item code, catalog code) pair. Duplicates
/// that slip in through concurrent file edits are consolidated by summing
/// quantities — both on save and defensively again during aggregation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailLine {
    /// Code of the budget item this line belongs to.
    #[serde(rename = "item")]
    pub item_code: String,
    /// Code of the referenced catalog entry.
    #[serde(rename = "Codigo")]
    pub catalog_code: String,
    /// Quantity of the catalog entry used by the item.
    #[serde(rename = "cantidad", deserialize_with = "super::lenient_f64")]
    pub quantity: f64,
}

impl DetailLine {
    #[must_use]
    pub fn new(item_code: &str, catalog_code: &str, quantity: f64) -> Self {
        Self {
            item_code: item_code.to_string(),
            catalog_code: catalog_code.to_string(),
            quantity,
        }
    }
}
