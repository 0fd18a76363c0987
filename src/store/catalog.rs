//! Shared priced catalog: `construction_budget_data.csv`.

use crate::errors::{Error, Result};
use crate::records::CatalogEntry;
use std::path::PathBuf;

const CATALOG_HEADERS: [&str; 7] = [
    "Codigo",
    "Resumen",
    "Categoria",
    "Subcategoria",
    "Ud",
    "Pres",
    "Fecha",
];

/// Store for the catalog shared across all projects.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<Vec<CatalogEntry>> {
        super::read_rows(&self.path)
    }

    pub fn save(&self, entries: &[CatalogEntry]) -> Result<()> {
        super::write_rows(&self.path, &CATALOG_HEADERS, entries)
    }

    /// Appends a new entry. The code must not already be taken.
    pub fn add(&self, entry: CatalogEntry) -> Result<()> {
        let mut entries = self.load()?;
        if entries.iter().any(|e| e.code == entry.code) {
            return Err(Error::Config {
                message: format!("catalog code {} already exists", entry.code),
            });
        }
        tracing::info!(code = %entry.code, summary = %entry.summary, "catalog entry added");
        entries.push(entry);
        self.save(&entries)
    }

    /// Updates the price (and price date) of an existing entry.
    pub fn set_price(&self, code: &str, unit_price: f64, date: &str) -> Result<()> {
        let mut entries = self.load()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.code == code)
            .ok_or_else(|| Error::CatalogEntryNotFound {
                code: code.to_string(),
            })?;
        entry.unit_price = unit_price;
        entry.date = date.to_string();
        self.save(&entries)
    }

    /// Case-insensitive substring search over code, summary and category.
    pub fn search(&self, query: &str) -> Result<Vec<CatalogEntry>> {
        let needle = query.trim().to_lowercase();
        let mut entries = self.load()?;
        if !needle.is_empty() {
            entries.retain(|e| {
                e.code.to_lowercase().contains(&needle)
                    || e.summary.to_lowercase().contains(&needle)
                    || e.category.to_lowercase().contains(&needle)
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp, clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::catalog_entry;

    fn store() -> (tempfile::TempDir, CatalogStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("construction_budget_data.csv"));
        (dir, store)
    }

    #[test]
    fn test_add_rejects_duplicate_codes() {
        let (_dir, store) = store();
        store.add(catalog_entry("MAA00001", 100.0)).unwrap();
        assert!(store.add(catalog_entry("MAA00001", 200.0)).is_err());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_set_price_updates_price_and_date() {
        let (_dir, store) = store();
        store.add(catalog_entry("MAA00001", 100.0)).unwrap();
        store.set_price("MAA00001", 150.0, "15/08/2026").unwrap();

        let entries = store.load().unwrap();
        assert_eq!(entries[0].unit_price, 150.0);
        assert_eq!(entries[0].date, "15/08/2026");

        assert!(matches!(
            store.set_price("ZZZ", 1.0, ""),
            Err(Error::CatalogEntryNotFound { .. })
        ));
    }

    #[test]
    fn test_search_matches_summary_case_insensitively() {
        let (_dir, store) = store();
        let mut cement = catalog_entry("MAA00001", 100.0);
        cement.summary = "Cemento portland".to_string();
        store.add(cement).unwrap();
        store.add(catalog_entry("MO00001", 25_000.0)).unwrap();

        let found = store.search("PORTLAND").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "MAA00001");
    }
}
