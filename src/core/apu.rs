//! Declared-category rollup: the "análisis de precios unitarios" (APU) axis.
//!
//! Within a single item, detail rows group by their declared type
//! (MATERIALES, MANO DE OBRA, ...) as mapped by `categorias.csv`. Block
//! subtotals are per-unit amounts — they are not multiplied by the item
//! quantity; the item total is `unit price × quantity` at the very end. This
//! axis is independent of the code hierarchy and never mixes with it.

use crate::core::pricing::PricingWarning;
use crate::records::category::{DEFAULT_TYPE, TYPE_ORDER};
use crate::records::{BudgetItem, CatalogEntry, CategoryRow, DetailLine};
use std::collections::HashMap;

/// Maps catalog entries to their declared type.
///
/// Codes are allocated as `prefix + counter`, so the prefix column of
/// `categorias.csv` classifies by code; the category column is the fallback
/// for entries predating their prefix row. Longest matching prefix wins.
#[derive(Debug, Default)]
pub struct TypeMap {
    by_prefix: Vec<(String, String)>,
    by_category: HashMap<String, String>,
}

impl TypeMap {
    #[must_use]
    pub fn from_categories(rows: &[CategoryRow]) -> Self {
        let mut by_prefix: Vec<(String, String)> = rows
            .iter()
            .filter(|row| !row.prefix.trim().is_empty())
            .map(|row| (row.prefix.trim().to_string(), normalized(&row.declared_type)))
            .collect();
        // Longest prefix first so "MAA" beats "MA".
        by_prefix.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let by_category = rows
            .iter()
            .filter(|row| !row.category.trim().is_empty())
            .map(|row| (row.category.trim().to_string(), normalized(&row.declared_type)))
            .collect();

        Self {
            by_prefix,
            by_category,
        }
    }

    /// Declared type for a catalog entry: by code prefix, then by category
    /// name, then the category itself if it already is a known type, then
    /// MATERIALES.
    #[must_use]
    pub fn classify(&self, catalog_code: &str, category: &str) -> String {
        for (prefix, tipo) in &self.by_prefix {
            if catalog_code.starts_with(prefix.as_str()) {
                return tipo.clone();
            }
        }
        if let Some(tipo) = self.by_category.get(category.trim()) {
            return tipo.clone();
        }
        normalized(category)
    }
}

fn normalized(tipo: &str) -> String {
    let upper = tipo.trim().to_uppercase();
    if TYPE_ORDER.contains(&upper.as_str()) {
        upper
    } else {
        DEFAULT_TYPE.to_string()
    }
}

/// One detail row of an APU block, joined with its catalog entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ApuRow {
    pub catalog_code: String,
    pub summary: String,
    pub unit: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// `quantity × unit_price`, per one unit of the item.
    pub total: f64,
}

/// All rows of one declared type, with their per-unit subtotal.
#[derive(Clone, Debug, PartialEq)]
pub struct ApuBlock {
    pub declared_type: String,
    pub rows: Vec<ApuRow>,
    pub subtotal: f64,
}

/// The full APU of one item.
#[derive(Clone, Debug)]
pub struct ApuBreakdown {
    pub item: BudgetItem,
    pub blocks: Vec<ApuBlock>,
    /// Sum of the block subtotals: the item's unit price.
    pub unit_price: f64,
    /// `unit_price × item.quantity`.
    pub item_total: f64,
    pub warnings: Vec<PricingWarning>,
}

/// Computes the declared-type breakdown for a single item.
#[must_use]
pub fn apu_breakdown(
    item: &BudgetItem,
    details: &[DetailLine],
    catalog: &[CatalogEntry],
    type_map: &TypeMap,
) -> ApuBreakdown {
    let entry_by_code: HashMap<&str, &CatalogEntry> = catalog
        .iter()
        .map(|entry| (entry.code.as_str(), entry))
        .collect();

    let mut warnings = Vec::new();

    // Re-consolidate defensively: duplicate (item, code) pairs sum.
    let mut quantities: Vec<(String, f64)> = Vec::new();
    for line in details.iter().filter(|l| l.item_code == item.code) {
        if let Some((_, quantity)) = quantities
            .iter_mut()
            .find(|(code, _)| *code == line.catalog_code)
        {
            *quantity += line.quantity;
            warnings.push(PricingWarning::DuplicateDetailLine {
                item_code: item.code.clone(),
                catalog_code: line.catalog_code.clone(),
            });
        } else {
            quantities.push((line.catalog_code.clone(), line.quantity));
        }
    }

    let mut rows_by_type: HashMap<String, Vec<ApuRow>> = HashMap::new();
    for (catalog_code, quantity) in quantities {
        let (summary, unit, price, category) = match entry_by_code.get(catalog_code.as_str()) {
            Some(entry) => (
                entry.summary.clone(),
                entry.unit.clone(),
                entry.unit_price,
                entry.category.clone(),
            ),
            None => {
                warnings.push(PricingWarning::MissingCatalogReference {
                    item_code: item.code.clone(),
                    catalog_code: catalog_code.clone(),
                });
                (String::new(), String::new(), 0.0, String::new())
            }
        };
        let declared_type = type_map.classify(&catalog_code, &category);
        rows_by_type.entry(declared_type).or_default().push(ApuRow {
            catalog_code,
            summary,
            unit,
            quantity,
            unit_price: price,
            total: quantity * price,
        });
    }

    let mut blocks = Vec::new();
    for tipo in TYPE_ORDER {
        if let Some(mut rows) = rows_by_type.remove(tipo) {
            rows.sort_by(|a, b| a.catalog_code.cmp(&b.catalog_code));
            let subtotal = rows.iter().map(|row| row.total).sum();
            blocks.push(ApuBlock {
                declared_type: tipo.to_string(),
                rows,
                subtotal,
            });
        }
    }

    let unit_price: f64 = blocks.iter().map(|block| block.subtotal).sum();
    ApuBreakdown {
        item: item.clone(),
        blocks,
        unit_price,
        item_total: item.line_total(unit_price),
        warnings,
    }
}

/// APUs for every item of a project, in hierarchical code order.
#[must_use]
pub fn apu_breakdowns(
    items: &[BudgetItem],
    details: &[DetailLine],
    catalog: &[CatalogEntry],
    type_map: &TypeMap,
) -> Vec<ApuBreakdown> {
    let mut sorted: Vec<&BudgetItem> = items.iter().collect();
    sorted.sort_by_key(|item| crate::core::code::SortKey::parse(&item.code));
    sorted
        .into_iter()
        .map(|item| apu_breakdown(item, details, catalog, type_map))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp, clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{budget_item_priced, catalog_entry, category_row};

    fn labor_entry(code: &str, price: f64) -> CatalogEntry {
        let mut entry = catalog_entry(code, price);
        entry.category = "Jornales".to_string();
        entry
    }

    #[test]
    fn test_classify_by_prefix_beats_category() {
        let map = TypeMap::from_categories(&[
            category_row("MO", "Jornales", "MANO DE OBRA"),
            category_row("MAA", "Hormigones", "MATERIALES"),
        ]);
        assert_eq!(map.classify("MO00017", "Hormigones"), "MANO DE OBRA");
        assert_eq!(map.classify("MAA00575", ""), "MATERIALES");
    }

    #[test]
    fn test_classify_falls_back_to_category_then_default() {
        let map = TypeMap::from_categories(&[category_row("MO", "Jornales", "MANO DE OBRA")]);
        assert_eq!(map.classify("ZZZ1", "Jornales"), "MANO DE OBRA");
        assert_eq!(map.classify("ZZZ1", "EQUIPOS"), "EQUIPOS");
        assert_eq!(map.classify("ZZZ1", "Algo raro"), DEFAULT_TYPE);
    }

    #[test]
    fn test_blocks_follow_type_order_and_split_subtotals() {
        let item = budget_item_priced("1.01", 2.0);
        let details = vec![
            DetailLine::new("1.01", "MO00001", 8.0),
            DetailLine::new("1.01", "MAA0001", 3.0),
        ];
        let catalog = vec![labor_entry("MO00001", 25_000.0), catalog_entry("MAA0001", 4_000.0)];
        let map = TypeMap::from_categories(&[
            category_row("MO", "Jornales", "MANO DE OBRA"),
            category_row("MAA", "Hormigones", "MATERIALES"),
        ]);

        let apu = apu_breakdown(&item, &details, &catalog, &map);
        let types: Vec<&str> = apu.blocks.iter().map(|b| b.declared_type.as_str()).collect();
        assert_eq!(types, vec!["MATERIALES", "MANO DE OBRA"]);
        assert_eq!(apu.blocks[0].subtotal, 12_000.0);
        assert_eq!(apu.blocks[1].subtotal, 200_000.0);
        // Unit price sums subtotals; the item total multiplies by quantity.
        assert_eq!(apu.unit_price, 212_000.0);
        assert_eq!(apu.item_total, 424_000.0);
    }

    #[test]
    fn test_block_subtotal_is_per_unit_not_scaled_by_item_quantity() {
        let item = budget_item_priced("1.01", 10.0);
        let details = vec![DetailLine::new("1.01", "MAA0001", 2.0)];
        let catalog = vec![catalog_entry("MAA0001", 100.0)];
        let apu = apu_breakdown(&item, &details, &catalog, &TypeMap::default());
        assert_eq!(apu.blocks[0].subtotal, 200.0);
        assert_eq!(apu.item_total, 2_000.0);
    }

    #[test]
    fn test_missing_catalog_reference_in_apu() {
        let item = budget_item_priced("1.01", 1.0);
        let details = vec![DetailLine::new("1.01", "GONE", 5.0)];
        let apu = apu_breakdown(&item, &details, &[], &TypeMap::default());
        assert_eq!(apu.unit_price, 0.0);
        assert_eq!(apu.warnings.len(), 1);
        // The orphan row still appears so the operator can see and fix it.
        assert_eq!(apu.blocks[0].rows[0].catalog_code, "GONE");
    }

    #[test]
    fn test_duplicate_detail_rows_consolidate() {
        let item = budget_item_priced("1.01", 1.0);
        let details = vec![
            DetailLine::new("1.01", "MAA0001", 3.0),
            DetailLine::new("1.01", "MAA0001", 2.0),
        ];
        let catalog = vec![catalog_entry("MAA0001", 100.0)];
        let apu = apu_breakdown(&item, &details, &catalog, &TypeMap::default());
        assert_eq!(apu.blocks[0].rows.len(), 1);
        assert_eq!(apu.unit_price, 500.0);
        assert_eq!(apu.warnings.len(), 1);
    }

    #[test]
    fn test_breakdowns_sorted_hierarchically() {
        let items = vec![
            budget_item_priced("10.01", 1.0),
            budget_item_priced("2.01", 1.0),
        ];
        let apus = apu_breakdowns(&items, &[], &[], &TypeMap::default());
        let codes: Vec<&str> = apus.iter().map(|a| a.item.code.as_str()).collect();
        assert_eq!(codes, vec!["2.01", "10.01"]);
    }
}
