//! Application configuration.
//!
//! Settings come from an optional `config.toml` in the working directory;
//! every field has a sensible default so the tool runs with no config file at
//! all. The data directory can additionally be overridden through the
//! `PRESUPUESTO_BASE_DIR` environment variable (which `.env` files feed via
//! dotenvy).

use crate::errors::{Error, Result};
use crate::store::{CatalogStore, CategoryStore, CurrencyStore, ProjectStore};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file read from the working directory.
pub const CONFIG_FILE: &str = "config.toml";
/// Environment override for the data directory.
pub const BASE_DIR_ENV: &str = "PRESUPUESTO_BASE_DIR";

/// Top-level application configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding all data files and the per-project subdirectories.
    pub base_dir: PathBuf,
    /// Shared catalog file name, relative to `base_dir`.
    pub catalog_file: String,
    /// Currency table file name, relative to `base_dir`.
    pub currencies_file: String,
    /// Category table file name, relative to `base_dir`.
    pub categories_file: String,
    pub report: ReportDefaults,
}

/// Default report parameters, overridable per run from the command line.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ReportDefaults {
    /// Contractor markup percentage ("utilidad").
    pub markup_percent: f64,
    /// Tax percentage ("IVA").
    pub tax_percent: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            catalog_file: "construction_budget_data.csv".to_string(),
            currencies_file: "monedas.csv".to_string(),
            categories_file: "categorias.csv".to_string(),
            report: ReportDefaults::default(),
        }
    }
}

impl Default for ReportDefaults {
    fn default() -> Self {
        Self {
            markup_percent: 10.0,
            tax_percent: 19.0,
        }
    }
}

impl AppConfig {
    /// Loads the configuration: `config.toml` if present, defaults otherwise,
    /// then the environment override for the data directory.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(Path::new(CONFIG_FILE))?;
        if let Ok(dir) = env::var(BASE_DIR_ENV) {
            config.base_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Parses a configuration file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|err| Error::Config {
            message: format!("invalid {}: {err}", path.display()),
        })
    }

    #[must_use]
    pub fn project_store(&self) -> ProjectStore {
        ProjectStore::new(self.base_dir.join("presupuestos"))
    }

    #[must_use]
    pub fn catalog_store(&self) -> CatalogStore {
        CatalogStore::new(self.base_dir.join(&self.catalog_file))
    }

    #[must_use]
    pub fn currency_store(&self) -> CurrencyStore {
        CurrencyStore::new(self.base_dir.join(&self.currencies_file))
    }

    #[must_use]
    pub fn category_store(&self) -> CategoryStore {
        CategoryStore::new(self.base_dir.join(&self.categories_file))
    }
}
