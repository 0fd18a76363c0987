//! Unified error types and result handling.
//!
//! Only structurally missing data (a project without its tables, a lookup that
//! cannot proceed) is an error here. Recoverable conditions met during report
//! generation — malformed code segments, missing catalog references, absent
//! parent descriptions, unavailable exchange rates — are handled in-band by
//! the core modules and never abort a report.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Project '{name}' not found")]
    ProjectNotFound { name: String },

    #[error("Project '{project}' is missing datos.csv or detalle.csv")]
    ProjectDataMissing { project: String },

    #[error("Item '{code}' not found in project '{project}'")]
    ItemNotFound { project: String, code: String },

    #[error("Item '{code}' already exists in project '{project}'")]
    ItemAlreadyExists { project: String, code: String },

    #[error("Catalog entry '{code}' not found")]
    CatalogEntryNotFound { code: String },

    #[error("Category '{category}' / '{subcategory}' not found in categorias.csv")]
    CategoryNotFound {
        category: String,
        subcategory: String,
    },

    #[error("Currency '{code}' not found in monedas.csv")]
    CurrencyNotFound { code: String },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
