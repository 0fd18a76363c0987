//! The APU report: one "análisis de precios unitarios" sheet per item,
//! detail rows grouped by declared type.

use crate::core::apu::{ApuBreakdown, TypeMap, apu_breakdowns};
use crate::records::{CatalogEntry, CategoryRow};
use crate::store::ProjectTables;
use std::fmt::Write as _;

/// All APU sheets of one project, in hierarchical item order.
#[derive(Clone, Debug)]
pub struct ApuReport {
    pub project: String,
    pub breakdowns: Vec<ApuBreakdown>,
}

impl ApuReport {
    #[must_use]
    pub fn generate(
        project: &str,
        tables: &ProjectTables,
        catalog: &[CatalogEntry],
        categories: &[CategoryRow],
    ) -> Self {
        let type_map = TypeMap::from_categories(categories);
        Self {
            project: project.to_string(),
            breakdowns: apu_breakdowns(&tables.items, &tables.details, catalog, &type_map),
        }
    }

    /// Renders every sheet as fixed-width text, one after another.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "ANÁLISIS DE PRECIOS UNITARIOS");
        let _ = writeln!(out, "PROYECTO : {}", self.project.to_uppercase());
        for breakdown in &self.breakdowns {
            let _ = writeln!(out);
            render_sheet(&mut out, breakdown);
        }
        out
    }
}

fn render_sheet(out: &mut String, breakdown: &ApuBreakdown) {
    let item = &breakdown.item;
    let _ = writeln!(out, "{}", "=".repeat(92));
    let _ = writeln!(out, "ITEM     : {}", item.code);
    let _ = writeln!(out, "PARTIDA  : {}", item.description);
    let _ = writeln!(
        out,
        "CANTIDAD : {} {}",
        super::format_qty(item.quantity),
        item.quantity_unit
    );
    if !item.date.trim().is_empty() {
        let _ = writeln!(out, "FECHA    : {}", item.date);
    }
    let _ = writeln!(
        out,
        "{:<10} {:<36} {:>4} {:>10} {:>13} {:>13}",
        "CÓDIGO", "RESUMEN", "UD", "CANTIDAD", "PRECIO", "TOTAL"
    );
    let _ = writeln!(out, "{}", "-".repeat(92));

    for block in &breakdown.blocks {
        let _ = writeln!(out, "{}", block.declared_type);
        for row in &block.rows {
            let _ = writeln!(
                out,
                "{:<10} {:<36} {:>4} {:>10} {:>13} {:>13}",
                row.catalog_code,
                truncated(&row.summary, 36),
                row.unit,
                super::format_qty(row.quantity),
                super::format_clp(row.unit_price),
                super::format_clp(row.total)
            );
        }
        let _ = writeln!(
            out,
            "{:<10} {:<36} {:>29} {:>13}",
            "",
            format!("Subtotal {}", title_case(&block.declared_type)),
            "",
            super::format_clp(block.subtotal)
        );
    }

    let _ = writeln!(out, "{}", "-".repeat(92));
    let _ = writeln!(
        out,
        "{:>78} {:>13}",
        format!("PRECIO UNITARIO ({})", item.quantity_unit),
        super::format_clp(breakdown.unit_price)
    );
    let _ = writeln!(
        out,
        "{:>78} {:>13}",
        "TOTAL PARTIDA",
        super::format_clp(breakdown.item_total)
    );
}

fn truncated(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max.saturating_sub(1)).collect::<String>() + "…"
    }
}

/// "MANO DE OBRA" → "Mano De Obra", for the subtotal caption.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
