//! Budget item record - One row of a project's `datos.csv`.
//!
//! An item is a budget line identified by a dotted hierarchical code such as
//! `"1"`, `"1.01"` or `"2.01.03"`. Codes are unique within a project and are
//! stored and compared as exact strings.

use serde::{Deserialize, Serialize};

/// One budget line of a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Dotted hierarchical code, kept as the exact stored string.
    #[serde(rename = "Item")]
    pub code: String,
    /// Description of the work ("partida").
    #[serde(rename = "Partida")]
    pub description: String,
    /// Date the line was priced, `DD/MM/YYYY`.
    #[serde(rename = "Fecha")]
    pub date: String,
    /// Unit label for the quantity (e.g. "m2", "GL", "Dia").
    #[serde(rename = "cantidad tipo")]
    pub quantity_unit: String,
    /// Numeric quantity of the item.
    #[serde(
        rename = "cantidad numero",
        deserialize_with = "super::lenient_f64"
    )]
    pub quantity: f64,
    /// Currency code the item is priced in (e.g. "CLP", "UF", "USD").
    #[serde(rename = "moneda")]
    pub currency: String,
}

impl BudgetItem {
    /// Line total of the item given its aggregate unit price.
    #[must_use]
    pub fn line_total(&self, unit_price: f64) -> f64 {
        unit_price * self.quantity
    }
}
