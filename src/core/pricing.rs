//! Price aggregation - Derives per-item unit prices from detail lines.
//!
//! The unit price of an item is the sum over its detail lines of
//! `quantity × catalog unit price`, joined by catalog code. The join is a
//! left join: a detail row whose catalog code no longer exists contributes 0
//! and is surfaced as a warning rather than failing the aggregation.

use crate::records::{CatalogEntry, DetailLine};
use std::collections::HashMap;

/// Recoverable anomaly found while aggregating prices.
///
/// None of these abort a report; they are returned alongside the result so
/// callers can display them, and logged as they are found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PricingWarning {
    /// A detail row references a catalog code with no catalog entry.
    MissingCatalogReference {
        item_code: String,
        catalog_code: String,
    },
    /// The same (item, catalog code) pair appeared more than once; the
    /// quantities were summed.
    DuplicateDetailLine {
        item_code: String,
        catalog_code: String,
    },
}

impl std::fmt::Display for PricingWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCatalogReference {
                item_code,
                catalog_code,
            } => write!(
                f,
                "item {item_code}: catalog code {catalog_code} not found, priced as 0"
            ),
            Self::DuplicateDetailLine {
                item_code,
                catalog_code,
            } => write!(
                f,
                "item {item_code}: duplicate detail rows for {catalog_code}, quantities summed"
            ),
        }
    }
}

/// Aggregated unit prices for every item that has detail lines.
#[derive(Debug, Default)]
pub struct PricingTable {
    prices: HashMap<String, f64>,
    /// Anomalies encountered during aggregation.
    pub warnings: Vec<PricingWarning>,
}

impl PricingTable {
    /// Unit price of an item, 0 when it has no detail lines.
    #[must_use]
    pub fn unit_price(&self, item_code: &str) -> f64 {
        self.prices.get(item_code).copied().unwrap_or(0.0)
    }
}

/// Builds the pricing table for a whole detail table at once.
///
/// Duplicate (item, catalog code) pairs should not exist given the detail
/// table invariant, but concurrent edits to the underlying files can produce
/// them; aggregation re-consolidates by summing instead of picking one row
/// arbitrarily.
#[must_use]
pub fn unit_prices(details: &[DetailLine], catalog: &[CatalogEntry]) -> PricingTable {
    let price_by_code: HashMap<&str, f64> = catalog
        .iter()
        .map(|entry| (entry.code.as_str(), entry.unit_price))
        .collect();

    let mut table = PricingTable::default();
    let mut seen: HashMap<(String, String), f64> = HashMap::new();

    for line in details {
        let key = (line.item_code.clone(), line.catalog_code.clone());
        if let Some(quantity) = seen.get_mut(&key) {
            *quantity += line.quantity;
            tracing::warn!(
                item = %line.item_code,
                catalog_code = %line.catalog_code,
                "duplicate detail rows consolidated by summing"
            );
            table.warnings.push(PricingWarning::DuplicateDetailLine {
                item_code: line.item_code.clone(),
                catalog_code: line.catalog_code.clone(),
            });
        } else {
            seen.insert(key, line.quantity);
        }
    }

    for ((item_code, catalog_code), quantity) in seen {
        let unit_price = match price_by_code.get(catalog_code.as_str()) {
            Some(price) => *price,
            None => {
                tracing::warn!(
                    item = %item_code,
                    catalog_code = %catalog_code,
                    "detail row references a missing catalog entry, priced as 0"
                );
                table.warnings.push(PricingWarning::MissingCatalogReference {
                    item_code: item_code.clone(),
                    catalog_code,
                });
                0.0
            }
        };
        *table.prices.entry(item_code).or_insert(0.0) += quantity * unit_price;
    }

    table
}

/// Unit price of a single item from its detail rows and the catalog.
///
/// Convenience wrapper over [`unit_prices`] for callers that only care about
/// one item; warnings for other items are filtered out of the computation by
/// restricting the input to the item's own rows.
#[must_use]
pub fn unit_price(item_code: &str, details: &[DetailLine], catalog: &[CatalogEntry]) -> f64 {
    let own_rows: Vec<DetailLine> = details
        .iter()
        .filter(|line| line.item_code == item_code)
        .cloned()
        .collect();
    unit_prices(&own_rows, catalog).unit_price(item_code)
}
