//! The detailed budget report: hierarchy-axis rollup plus the cost summary,
//! expressed in the project's own currency.

use crate::core::currency::{Converted, RateTable};
use crate::core::pricing::PricingWarning;
use crate::core::rollup::{BudgetRollup, CostSummary, RollupNode, Section};
use crate::core::{project_currency, rollup};
use crate::records::{BASE_CURRENCY, BudgetItem, CatalogEntry};
use crate::store::ProjectTables;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Caller-supplied report parameters.
#[derive(Clone, Debug, Default)]
pub struct DetailedOptions {
    /// Project location printed in the header ("ubicación").
    pub location: String,
    /// Client/owner printed in the header ("propietario").
    pub owner: String,
    /// Contractor markup percentage ("utilidad").
    pub markup_percent: f64,
    /// Tax percentage ("IVA").
    pub tax_percent: f64,
    /// Labels for sections whose parent code has no item row of its own.
    pub section_labels: HashMap<String, String>,
}

/// A fully computed detailed budget, ready to render.
#[derive(Clone, Debug)]
pub struct DetailedReport {
    pub project: String,
    /// Report date, taken from the project's lead item.
    pub date: String,
    /// Currency declared by the project.
    pub requested_currency: String,
    /// Currency the amounts are actually expressed in. Differs from the
    /// requested one only when its rate was unavailable.
    pub currency: String,
    /// True when the requested currency had no usable rate and the report
    /// fell back to the base currency.
    pub currency_unavailable: bool,
    pub location: String,
    pub owner: String,
    /// Rollup tree with amounts already converted to [`Self::currency`].
    pub rollup: BudgetRollup,
    pub summary: CostSummary,
}

impl DetailedReport {
    /// Computes the report for a project.
    ///
    /// Amounts start in CLP and are converted to the project's currency. An
    /// unavailable rate is not fatal: the report proceeds in CLP and says so
    /// in its header.
    #[must_use]
    pub fn generate(
        project: &str,
        tables: &ProjectTables,
        catalog: &[CatalogEntry],
        rates: &RateTable,
        options: &DetailedOptions,
    ) -> Self {
        let mut tree = rollup(&tables.items, &tables.details, catalog, &options.section_labels);

        let requested = project_currency(&tables.items);
        let (currency, currency_unavailable) = match rates.convert_from_base(1.0, &requested) {
            Converted::Amount(factor) => {
                scale_rollup(&mut tree, factor);
                (requested.clone(), false)
            }
            Converted::Unavailable => (BASE_CURRENCY.to_string(), true),
        };

        let summary =
            CostSummary::compute(tree.grand_total, options.markup_percent, options.tax_percent);

        Self {
            project: project.to_string(),
            date: project_date(&tables.items),
            requested_currency: requested,
            currency,
            currency_unavailable,
            location: options.location.clone(),
            owner: options.owner.clone(),
            rollup: tree,
            summary,
        }
    }

    pub fn warnings(&self) -> &[PricingWarning] {
        &self.rollup.warnings
    }

    /// Renders the report as a fixed-width text table.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let fmt = amount_formatter(&self.currency);

        let _ = writeln!(out, "PRESUPUESTO DETALLADO");
        let _ = writeln!(out, "PROYECTO    : {}", self.project.to_uppercase());
        if !self.location.is_empty() {
            let _ = writeln!(out, "UBICACIÓN   : {}", self.location);
        }
        if !self.owner.is_empty() {
            let _ = writeln!(out, "PROPIETARIO : {}", self.owner);
        }
        if !self.date.is_empty() {
            let _ = writeln!(out, "FECHA       : {}", self.date);
        }
        let _ = writeln!(out, "MONEDA      : {}", self.currency);
        if self.currency_unavailable {
            let _ = writeln!(
                out,
                "(sin tasa de cambio para {}, montos en {})",
                self.requested_currency, BASE_CURRENCY
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<10} {:<40} {:>4} {:>12} {:>14} {:>14}",
            "ITEM", "DESCRIPCIÓN", "UD", "CANTIDAD", "P.UNITARIO", "TOTAL"
        );
        let _ = writeln!(out, "{}", "-".repeat(100));

        for node in &self.rollup.nodes {
            render_node(&mut out, node, &fmt);
        }

        let _ = writeln!(out, "{}", "-".repeat(100));
        let s = &self.summary;
        let _ = writeln!(out, "{:>85} {:>14}", "COSTO DIRECTO", fmt(s.direct_cost));
        let _ = writeln!(
            out,
            "{:>85} {:>14}",
            format!("UTILIDAD ({}%)", s.markup_percent),
            fmt(s.markup)
        );
        let _ = writeln!(out, "{:>85} {:>14}", "TOTAL NETO", fmt(s.net_total));
        let _ = writeln!(
            out,
            "{:>85} {:>14}",
            format!("IVA ({}%)", s.tax_percent),
            fmt(s.tax)
        );
        let _ = writeln!(out, "{:>85} {:>14}", "PRESUPUESTO TOTAL", fmt(s.budget_total));
        out
    }
}

fn render_node(out: &mut String, node: &RollupNode, fmt: &AmountFmt) {
    match node {
        RollupNode::Section(section) => render_section(out, section, fmt),
        RollupNode::Line(line) => {
            let _ = writeln!(
                out,
                "{:<10} {:<40} {:>4} {:>12} {:>14} {:>14}",
                line.code,
                truncated(&line.description, 40),
                line.unit,
                super::format_qty(line.quantity),
                fmt(line.unit_price),
                fmt(line.total)
            );
        }
    }
}

fn render_section(out: &mut String, section: &Section, fmt: &AmountFmt) {
    let _ = writeln!(
        out,
        "{:<10} {}",
        section.code,
        truncated(&section.label, 40).to_uppercase()
    );
    for child in &section.children {
        render_node(out, child, fmt);
    }
    let _ = writeln!(
        out,
        "{:<10} {:<40} {:>47} {:>14}",
        "",
        format!("TOTAL {}", truncated(&section.label, 34).to_uppercase()),
        "",
        fmt(section.subtotal)
    );
}

type AmountFmt = Box<dyn Fn(f64) -> String>;

/// CLP amounts carry the peso sign; other currencies print plain numbers
/// with two decimals.
fn amount_formatter(currency: &str) -> AmountFmt {
    if currency == BASE_CURRENCY {
        Box::new(super::format_clp)
    } else {
        Box::new(super::format_qty)
    }
}

fn truncated(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max.saturating_sub(1)).collect::<String>() + "…"
    }
}

/// Multiplies every amount in the tree by a conversion factor.
fn scale_rollup(tree: &mut BudgetRollup, factor: f64) {
    if (factor - 1.0).abs() < f64::EPSILON {
        return;
    }
    for node in &mut tree.nodes {
        scale_node(node, factor);
    }
    tree.grand_total *= factor;
}

fn scale_node(node: &mut RollupNode, factor: f64) {
    match node {
        RollupNode::Section(section) => {
            section.subtotal *= factor;
            for child in &mut section.children {
                scale_node(child, factor);
            }
        }
        RollupNode::Line(line) => {
            line.unit_price *= factor;
            line.total *= factor;
        }
    }
}

/// Report date, with the same precedence as the project currency: item
/// `1.01`, then the first `1.*` item, then the first row.
fn project_date(items: &[BudgetItem]) -> String {
    items
        .iter()
        .find(|item| item.code == "1.01")
        .or_else(|| items.iter().find(|item| item.code.starts_with("1.")))
        .or_else(|| items.first())
        .map(|item| item.date.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp, clippy::unwrap_used)]
    use super::*;
    use crate::records::{Currency, DetailLine, default_currencies};
    use crate::test_utils::{budget_item, catalog_entry};

    fn tables(currency: &str) -> ProjectTables {
        let mut item = budget_item("1.01", currency);
        item.quantity = 2.0;
        ProjectTables {
            items: vec![item],
            details: vec![DetailLine::new("1.01", "A", 1.0)],
        }
    }

    fn options() -> DetailedOptions {
        DetailedOptions {
            markup_percent: 10.0,
            tax_percent: 19.0,
            ..DetailedOptions::default()
        }
    }

    #[test]
    fn test_amounts_convert_to_project_currency() {
        let tables = tables("UF");
        let catalog = vec![catalog_entry("A", 39_718.89)];
        let rates = RateTable::from_currencies(&default_currencies());

        let report =
            DetailedReport::generate("casa", &tables, &catalog, &rates, &options());
        assert_eq!(report.currency, "UF");
        assert!(!report.currency_unavailable);
        // 39718.89 CLP × qty 2 = 2 UF direct cost.
        assert_eq!(report.summary.direct_cost, 2.0);
    }

    #[test]
    fn test_unavailable_rate_falls_back_to_base_currency() {
        let tables = tables("EUR");
        let catalog = vec![catalog_entry("A", 1000.0)];
        let rates = RateTable::from_currencies(&default_currencies());

        let report =
            DetailedReport::generate("casa", &tables, &catalog, &rates, &options());
        assert_eq!(report.currency, BASE_CURRENCY);
        assert_eq!(report.requested_currency, "EUR");
        assert!(report.currency_unavailable);
        assert_eq!(report.summary.direct_cost, 2000.0);

        let text = report.render_text();
        assert!(text.contains("sin tasa de cambio para EUR"));
    }

    #[test]
    fn test_zero_rate_also_falls_back() {
        let tables = tables("XXX");
        let catalog = vec![catalog_entry("A", 1000.0)];
        let rates = RateTable::from_currencies(&[Currency::new("XXX", "Broken", 0.0)]);

        let report =
            DetailedReport::generate("casa", &tables, &catalog, &rates, &options());
        assert!(report.currency_unavailable);
        assert_eq!(report.currency, BASE_CURRENCY);
    }

    #[test]
    fn test_render_includes_summary_block() {
        let tables = tables("CLP");
        let catalog = vec![catalog_entry("A", 500_000.0)];
        let rates = RateTable::from_currencies(&default_currencies());

        let report =
            DetailedReport::generate("casa", &tables, &catalog, &rates, &options());
        let text = report.render_text();
        assert!(text.contains("PRESUPUESTO DETALLADO"));
        assert!(text.contains("PROYECTO    : CASA"));
        // direct 1,000,000 → markup 100,000 → net 1,100,000 → IVA 209,000.
        assert!(text.contains("$1.000.000"));
        assert!(text.contains("$1.309.000"));
    }

    #[test]
    fn test_project_date_precedence() {
        let mut lead = budget_item("1.01", "CLP");
        lead.date = "05/03/2026".to_string();
        let mut other = budget_item("2.01", "CLP");
        other.date = "01/01/2020".to_string();
        assert_eq!(project_date(&[other.clone(), lead]), "05/03/2026");
        assert_eq!(project_date(&[other]), "01/01/2020");
        assert_eq!(project_date(&[]), "");
    }
}
