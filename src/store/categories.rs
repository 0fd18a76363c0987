//! Category table: `categorias.csv`.
//!
//! Besides classifying catalog entries, each row carries the allocation state
//! for its code prefix: the highest suffix handed out, how many codes exist
//! and a preview of the next code. [`CategoryStore::allocate_code`] advances
//! that state and persists it in the same call.

use crate::errors::{Error, Result};
use crate::records::CategoryRow;
use std::path::PathBuf;

const CATEGORY_HEADERS: [&str; 7] = [
    "Prefijo",
    "Categoria",
    "Subcategoria",
    "MaxNumero",
    "Count",
    "NextCodigo",
    "Tipo",
];

#[derive(Debug)]
pub struct CategoryStore {
    path: PathBuf,
}

impl CategoryStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads category rows with their declared types normalized.
    pub fn load(&self) -> Result<Vec<CategoryRow>> {
        let mut rows: Vec<CategoryRow> = super::read_rows(&self.path)?;
        for row in &mut rows {
            row.normalize_type();
        }
        Ok(rows)
    }

    pub fn save(&self, rows: &[CategoryRow]) -> Result<()> {
        super::write_rows(&self.path, &CATEGORY_HEADERS, rows)
    }

    /// Adds a classification row. Prefixes are unique across the table.
    pub fn add(&self, mut row: CategoryRow) -> Result<()> {
        let mut rows = self.load()?;
        if rows.iter().any(|r| r.prefix == row.prefix) {
            return Err(Error::Config {
                message: format!("category prefix {} already exists", row.prefix),
            });
        }
        row.normalize_type();
        rows.push(row);
        self.save(&rows)
    }

    /// Allocates the next catalog code for a category/subcategory pair and
    /// persists the advanced counter.
    ///
    /// The code is the row's prefix plus a zero-padded counter. The padding
    /// width comes from the digit run of the stored `NextCodigo` preview;
    /// when there is none, at least four digits are used.
    pub fn allocate_code(&self, category: &str, subcategory: &str) -> Result<String> {
        let mut rows = self.load()?;
        let row = rows
            .iter_mut()
            .find(|r| {
                r.category.trim().eq_ignore_ascii_case(category.trim())
                    && r.subcategory.trim().eq_ignore_ascii_case(subcategory.trim())
            })
            .ok_or_else(|| Error::CategoryNotFound {
                category: category.to_string(),
                subcategory: subcategory.to_string(),
            })?;

        let next = row.max_number + 1;
        let width = padding_width(&row.next_code, next);
        let code = format!("{}{:0width$}", row.prefix, next);

        row.max_number = next;
        row.count += 1;
        row.next_code = format!("{}{:0width$}", row.prefix, next + 1);
        tracing::info!(code = %code, category = %category, "allocated catalog code");

        self.save(&rows)?;
        Ok(code)
    }
}

/// Zero-padding width for allocated codes.
fn padding_width(next_code: &str, next: u32) -> usize {
    let run = next_code.chars().filter(char::is_ascii_digit).count();
    if run > 0 {
        run
    } else {
        next.to_string().len().max(4)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::category_row;

    fn store() -> (tempfile::TempDir, CategoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CategoryStore::new(dir.path().join("categorias.csv"));
        (dir, store)
    }

    #[test]
    fn test_allocate_advances_and_persists_counter() {
        let (_dir, store) = store();
        let mut row = category_row("MAA", "Hormigones", "MATERIALES");
        row.max_number = 575;
        row.count = 575;
        row.next_code = "MAA00576".to_string();
        store.add(row).unwrap();

        assert_eq!(
            store.allocate_code("Hormigones", "Sub Hormigones").unwrap(),
            "MAA00576"
        );
        assert_eq!(
            store.allocate_code("Hormigones", "Sub Hormigones").unwrap(),
            "MAA00577"
        );

        let rows = store.load().unwrap();
        assert_eq!(rows[0].max_number, 577);
        assert_eq!(rows[0].count, 577);
        assert_eq!(rows[0].next_code, "MAA00578");
    }

    #[test]
    fn test_allocate_without_preview_pads_to_four() {
        let (_dir, store) = store();
        let mut row = category_row("EQ", "Equipos", "EQUIPOS");
        row.max_number = 8;
        row.next_code = String::new();
        store.add(row).unwrap();

        assert_eq!(store.allocate_code("Equipos", "Sub Equipos").unwrap(), "EQ0009");
    }

    #[test]
    fn test_allocate_unknown_pair_fails() {
        let (_dir, store) = store();
        assert!(matches!(
            store.allocate_code("Nada", "Nada"),
            Err(Error::CategoryNotFound { .. })
        ));
    }

    #[test]
    fn test_add_rejects_duplicate_prefix_and_normalizes_type() {
        let (_dir, store) = store();
        store.add(category_row("MO", "Jornales", "mano de obra")).unwrap();
        assert!(store.add(category_row("MO", "Otra", "EQUIPOS")).is_err());
        assert_eq!(store.load().unwrap()[0].declared_type, "MANO DE OBRA");
    }
}
