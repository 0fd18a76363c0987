//! Hierarchy-axis rollup: sections per parent code, line totals per leaf,
//! subtotals and a grand total.
//!
//! This is one of two independent aggregation axes. The other — grouping a
//! single item's detail rows by declared type — lives in [`crate::core::apu`]
//! and must stay a separate operation; the two kinds of subtotal are
//! unrelated and merging them produces nonsense totals.

use crate::core::code::{children_of, collect_ancestors};
use crate::core::pricing::{PricingWarning, unit_prices};
use crate::records::{BudgetItem, CatalogEntry, DetailLine};
use std::collections::{BTreeSet, HashMap};

/// A leaf budget line with its computed totals.
#[derive(Clone, Debug, PartialEq)]
pub struct LineTotal {
    pub code: String,
    pub description: String,
    pub unit: String,
    pub quantity: f64,
    /// Aggregate unit price from the item's detail lines, in CLP.
    pub unit_price: f64,
    /// `unit_price × quantity`, in CLP.
    pub total: f64,
}

/// A node of the rollup tree: either a section (a parent code) or a leaf line.
#[derive(Clone, Debug, PartialEq)]
pub enum RollupNode {
    Section(Section),
    Line(LineTotal),
}

impl RollupNode {
    /// Amount this node contributes to its parent's subtotal: a leaf's line
    /// total or a nested section's subtotal. Never both — a section's own
    /// item row (when it has one) is a header, not a priced line.
    #[must_use]
    pub fn contribution(&self) -> f64 {
        match self {
            Self::Section(section) => section.subtotal,
            Self::Line(line) => line.total,
        }
    }
}

/// A parent code and everything grouped under it.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub code: String,
    pub label: String,
    /// True when no label was found and a placeholder was substituted — the
    /// parent exists only implicitly through its children.
    pub placeholder_label: bool,
    pub children: Vec<RollupNode>,
    /// Sum of the children's contributions, in CLP.
    pub subtotal: f64,
}

/// The assembled rollup for a whole project, in CLP.
#[derive(Clone, Debug, Default)]
pub struct BudgetRollup {
    /// Top-level nodes in hierarchical order: sections and any root-level
    /// leaf items that have no children of their own.
    pub nodes: Vec<RollupNode>,
    /// Sum of every leaf line total, at any nesting depth.
    pub grand_total: f64,
    pub warnings: Vec<PricingWarning>,
}

/// Builds the hierarchy-axis rollup tree.
///
/// Sections are derived from the item codes alone, closed over the whole
/// ancestor chain, so a lone deep item still gets its enclosing sections. A
/// section label comes from `section_labels` first, then from the section's
/// own item row if one exists, then a `SECCIÓN <code>` placeholder.
#[must_use]
pub fn rollup(
    items: &[BudgetItem],
    details: &[DetailLine],
    catalog: &[CatalogEntry],
    section_labels: &HashMap<String, String>,
) -> BudgetRollup {
    let item_by_code: HashMap<&str, &BudgetItem> = items
        .iter()
        .filter(|item| !item.code.is_empty())
        .map(|item| (item.code.as_str(), item))
        .collect();

    let pricing = unit_prices(details, catalog);

    let sections: BTreeSet<String> =
        collect_ancestors(item_by_code.keys().copied()).into_iter().collect();
    let node_codes: BTreeSet<String> = item_by_code
        .keys()
        .map(|code| (*code).to_string())
        .chain(sections.iter().cloned())
        .collect();

    let build = Builder {
        item_by_code: &item_by_code,
        pricing: &pricing,
        sections: &sections,
        node_codes: &node_codes,
        section_labels,
    };

    let roots = children_at_root(&node_codes);
    let nodes: Vec<RollupNode> = roots.iter().map(|code| build.node(code)).collect();
    let grand_total = nodes.iter().map(RollupNode::contribution).sum();

    BudgetRollup {
        nodes,
        grand_total,
        warnings: pricing.warnings,
    }
}

/// Top-level node codes (no dot), in hierarchical order.
fn children_at_root(node_codes: &BTreeSet<String>) -> Vec<String> {
    crate::core::code::sort_codes(
        node_codes
            .iter()
            .filter(|code| !code.contains('.'))
            .map(String::as_str),
    )
}

struct Builder<'a> {
    item_by_code: &'a HashMap<&'a str, &'a BudgetItem>,
    pricing: &'a crate::core::pricing::PricingTable,
    sections: &'a BTreeSet<String>,
    node_codes: &'a BTreeSet<String>,
    section_labels: &'a HashMap<String, String>,
}

impl Builder<'_> {
    fn node(&self, code: &str) -> RollupNode {
        if self.sections.contains(code) {
            RollupNode::Section(self.section(code))
        } else {
            RollupNode::Line(self.line(code))
        }
    }

    fn section(&self, code: &str) -> Section {
        let child_codes = children_of(self.node_codes.iter().map(String::as_str), code, true);
        let children: Vec<RollupNode> = child_codes.iter().map(|c| self.node(c)).collect();
        let subtotal = children.iter().map(RollupNode::contribution).sum();

        let (label, placeholder_label) = self.section_label(code);
        Section {
            code: code.to_string(),
            label,
            placeholder_label,
            children,
            subtotal,
        }
    }

    fn section_label(&self, code: &str) -> (String, bool) {
        if let Some(label) = self.section_labels.get(code) {
            return (label.clone(), false);
        }
        if let Some(item) = self.item_by_code.get(code) {
            let description = item.description.trim();
            if !description.is_empty() {
                return (description.to_string(), false);
            }
        }
        (format!("SECCIÓN {code}"), true)
    }

    fn line(&self, code: &str) -> LineTotal {
        // Leaf codes always come from the item table; sections are the only
        // derived codes.
        let unit_price = self.pricing.unit_price(code);
        match self.item_by_code.get(code) {
            Some(item) => LineTotal {
                code: code.to_string(),
                description: item.description.clone(),
                unit: item.quantity_unit.clone(),
                quantity: item.quantity,
                unit_price,
                total: item.line_total(unit_price),
            },
            None => LineTotal {
                code: code.to_string(),
                description: String::new(),
                unit: String::new(),
                quantity: 0.0,
                unit_price,
                total: 0.0,
            },
        }
    }
}

/// Project-level cost summary layered on top of the rollup's direct cost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostSummary {
    /// Grand total of the rollup (sum of leaf line totals).
    pub direct_cost: f64,
    pub markup_percent: f64,
    /// Contractor markup ("utilidad") on the direct cost.
    pub markup: f64,
    /// Direct cost plus markup.
    pub net_total: f64,
    pub tax_percent: f64,
    /// Tax ("IVA") on the net total.
    pub tax: f64,
    /// Net total plus tax: the budget presented to the client.
    pub budget_total: f64,
}

impl CostSummary {
    #[must_use]
    pub fn compute(direct_cost: f64, markup_percent: f64, tax_percent: f64) -> Self {
        let markup = direct_cost * (markup_percent / 100.0);
        let net_total = direct_cost + markup;
        let tax = net_total * (tax_percent / 100.0);
        Self {
            direct_cost,
            markup_percent,
            markup,
            net_total,
            tax_percent,
            tax,
            budget_total: net_total + tax,
        }
    }
}
