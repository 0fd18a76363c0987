//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Construction budget manager: projects, catalog and report generation over
/// plain CSV files.
#[derive(Debug, Parser)]
#[command(name = "presupuesto", version, about)]
pub struct Cli {
    /// Enable debug logging (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create, list, inspect and delete projects.
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Edit a project's budget items.
    #[command(subcommand)]
    Item(ItemCommand),
    /// Edit the detail lines that price an item.
    #[command(subcommand)]
    Detail(DetailCommand),
    /// Manage the shared catalog of priced resources.
    #[command(subcommand)]
    Catalog(CatalogCommand),
    /// Manage catalog categories and their code prefixes.
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Manage currencies and exchange rates.
    #[command(subcommand)]
    Currency(CurrencyCommand),
    /// Generate reports.
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Create a new project.
    New {
        name: String,
        /// Description for the seeded first item (1.01).
        #[arg(long)]
        description: Option<String>,
        /// Currency the project is priced in.
        #[arg(long, default_value = "CLP")]
        currency: String,
    },
    /// List projects.
    List {
        /// Only projects whose both tables exist.
        #[arg(long)]
        report_ready: bool,
    },
    /// Print a project's items with their computed prices.
    Show { name: String },
    /// Delete a project and all of its data.
    Delete { name: String },
}

#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// Insert or replace a budget item.
    Set {
        project: String,
        /// Dotted hierarchical code, e.g. 2.01.03.
        code: String,
        #[arg(long)]
        description: String,
        /// Quantity unit label, e.g. m2, GL, Dia.
        #[arg(long, default_value = "GL")]
        unit: String,
        #[arg(long, default_value_t = 1.0)]
        quantity: f64,
        #[arg(long, default_value = "CLP")]
        currency: String,
        /// Pricing date, DD/MM/YYYY. Defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Change an item's code, carrying its detail lines along.
    Rename {
        project: String,
        old_code: String,
        new_code: String,
    },
    /// Remove an item and its detail lines.
    Delete { project: String, code: String },
}

#[derive(Debug, Subcommand)]
pub enum DetailCommand {
    /// Set the quantity of a catalog resource inside an item. Zero removes
    /// the line.
    Set {
        project: String,
        item: String,
        catalog_code: String,
        quantity: f64,
    },
    /// List an item's detail lines with catalog prices.
    List { project: String, item: String },
}

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// Add a resource; its code is allocated from the category's prefix.
    Add {
        #[arg(long)]
        category: String,
        #[arg(long)]
        subcategory: String,
        #[arg(long)]
        summary: String,
        #[arg(long)]
        unit: String,
        /// Unit price in CLP.
        #[arg(long)]
        price: f64,
        /// Pricing date, DD/MM/YYYY. Defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Update the price of an existing entry.
    SetPrice {
        code: String,
        price: f64,
        #[arg(long)]
        date: Option<String>,
    },
    /// List entries, optionally filtered.
    List {
        /// Case-insensitive substring over code, summary and category.
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// Register a category/subcategory with its code prefix.
    Add {
        #[arg(long)]
        prefix: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        subcategory: String,
        /// Declared type for the APU rollup.
        #[arg(long, default_value = "MATERIALES")]
        tipo: String,
    },
    /// List category rows with their allocation counters.
    List,
}

#[derive(Debug, Subcommand)]
pub enum CurrencyCommand {
    /// List currencies and their CLP rates.
    List,
    /// Set the CLP rate of an existing currency.
    SetRate { code: String, value: f64 },
    /// Add a currency.
    Add {
        code: String,
        name: String,
        /// CLP per one unit of the currency.
        value: f64,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Detailed budget: hierarchy rollup plus the cost summary.
    Detailed {
        project: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        owner: String,
        /// Markup percentage; defaults to the configured value.
        #[arg(long)]
        markup: Option<f64>,
        /// Tax percentage; defaults to the configured value.
        #[arg(long)]
        tax: Option<f64>,
        /// Label for a section without an item row, as CODE=LABEL. Repeatable.
        #[arg(long = "section", value_parser = parse_section_label)]
        sections: Vec<(String, String)>,
        /// Write the report to a file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Per-item unit price analysis (APU).
    Apu {
        project: String,
        /// Write the report to a file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn parse_section_label(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((code, label)) if !code.trim().is_empty() && !label.trim().is_empty() => {
            Ok((code.trim().to_string(), label.trim().to_string()))
        }
        _ => Err(format!("expected CODE=LABEL, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parses_item_set() {
        let cli = Cli::parse_from([
            "presupuesto",
            "item",
            "set",
            "casa",
            "2.01.03",
            "--description",
            "Radier",
            "--unit",
            "m2",
            "--quantity",
            "12.5",
        ]);
        match cli.command {
            Commands::Item(ItemCommand::Set { code, quantity, .. }) => {
                assert_eq!(code, "2.01.03");
                assert!((quantity - 12.5).abs() < f64::EPSILON);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parses_repeated_section_labels() {
        let cli = Cli::parse_from([
            "presupuesto",
            "report",
            "detailed",
            "casa",
            "--section",
            "1=OBRA GRUESA",
            "--section",
            "2=TERMINACIONES",
        ]);
        match cli.command {
            Commands::Report(ReportCommand::Detailed { sections, .. }) => {
                assert_eq!(sections.len(), 2);
                assert_eq!(sections[0], ("1".to_string(), "OBRA GRUESA".to_string()));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_section_label_requires_equals() {
        assert!(parse_section_label("1OBRA").is_err());
        assert!(parse_section_label("=X").is_err());
    }
}
