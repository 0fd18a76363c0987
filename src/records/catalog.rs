//! Catalog entry record - One row of the shared `construction_budget_data.csv`.
//!
//! The catalog is the priced reference list of materials, labor and equipment.
//! It is shared across all projects and read-only with respect to report
//! generation; the catalog-management commands are its only writers.

use serde::{Deserialize, Serialize};

/// A priced material/labor/equipment reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Catalog code, e.g. `MAA00575`. Exact string, never reformatted.
    #[serde(rename = "Codigo")]
    pub code: String,
    /// Short description ("resumen").
    #[serde(rename = "Resumen")]
    pub summary: String,
    /// Category, e.g. "Hormigones y morteros".
    #[serde(rename = "Categoria")]
    pub category: String,
    /// Subcategory within the category.
    #[serde(rename = "Subcategoria")]
    pub subcategory: String,
    /// Unit the price refers to, e.g. "m3", "kg".
    #[serde(rename = "Ud")]
    pub unit: String,
    /// Unit price in the base currency (CLP).
    #[serde(rename = "Pres", deserialize_with = "super::lenient_f64")]
    pub unit_price: f64,
    /// Date the price was captured, `DD/MM/YYYY`.
    #[serde(rename = "Fecha")]
    pub date: String,
}
