//! Shared constructors for unit tests.

#![allow(clippy::unwrap_used)]

use crate::records::{BudgetItem, CatalogEntry, CategoryRow};

/// A budget item with the given code and currency, quantity 1.
#[must_use]
pub fn budget_item(code: &str, currency: &str) -> BudgetItem {
    BudgetItem {
        code: code.to_string(),
        description: format!("Partida {code}"),
        date: "01/08/2026".to_string(),
        quantity_unit: "GL".to_string(),
        quantity: 1.0,
        currency: currency.to_string(),
    }
}

/// A budget item priced in the base currency with an explicit quantity.
#[must_use]
pub fn budget_item_priced(code: &str, quantity: f64) -> BudgetItem {
    let mut item = budget_item(code, "CLP");
    item.quantity = quantity;
    item
}

/// A catalog entry with the given code and CLP unit price.
#[must_use]
pub fn catalog_entry(code: &str, price: f64) -> CatalogEntry {
    CatalogEntry {
        code: code.to_string(),
        summary: format!("Recurso {code}"),
        category: "Hormigones".to_string(),
        subcategory: "Cementos".to_string(),
        unit: "m3".to_string(),
        unit_price: price,
        date: "01/08/2026".to_string(),
    }
}

/// A category row mapping a prefix to a declared type.
#[must_use]
pub fn category_row(prefix: &str, category: &str, tipo: &str) -> CategoryRow {
    CategoryRow {
        prefix: prefix.to_string(),
        category: category.to_string(),
        subcategory: format!("Sub {category}"),
        max_number: 1,
        count: 1,
        next_code: format!("{prefix}00002"),
        declared_type: tipo.to_string(),
    }
}
