//! Per-project tables: `datos.csv` (items) and `detalle.csv` (detail lines).
//!
//! Each project is a directory under the store root holding exactly those two
//! files. The directory name is the project name.

use crate::errors::{Error, Result};
use crate::records::{BudgetItem, DetailLine};
use std::fs;
use std::path::{Path, PathBuf};

/// Item table file name inside a project directory.
pub const ITEMS_FILE: &str = "datos.csv";
/// Detail table file name inside a project directory.
pub const DETAILS_FILE: &str = "detalle.csv";

const ITEMS_HEADERS: [&str; 6] = [
    "Item",
    "Partida",
    "Fecha",
    "cantidad tipo",
    "cantidad numero",
    "moneda",
];
const DETAILS_HEADERS: [&str; 3] = ["item", "Codigo", "cantidad"];

/// The two tables that make up a project.
#[derive(Clone, Debug, Default)]
pub struct ProjectTables {
    pub items: Vec<BudgetItem>,
    pub details: Vec<DetailLine>,
}

/// Directory-per-project CSV store.
#[derive(Debug)]
pub struct ProjectStore {
    root: PathBuf,
}

impl ProjectStore {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.project_dir(name).is_dir()
    }

    /// All project names, sorted. A missing store root lists as empty.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Projects whose both tables exist, i.e. the ones a report can be
    /// generated for.
    pub fn list_report_ready(&self) -> Result<Vec<String>> {
        let mut ready = self.list()?;
        ready.retain(|name| {
            let dir = self.project_dir(name);
            dir.join(ITEMS_FILE).is_file() && dir.join(DETAILS_FILE).is_file()
        });
        Ok(ready)
    }

    /// Loads a project's tables. The project directory must exist; either
    /// table file may be absent and reads as empty.
    pub fn load(&self, name: &str) -> Result<ProjectTables> {
        let dir = self.project_dir(name);
        if !dir.is_dir() {
            return Err(Error::ProjectNotFound {
                name: name.to_string(),
            });
        }
        Ok(ProjectTables {
            items: super::read_rows(&dir.join(ITEMS_FILE))?,
            details: super::read_rows(&dir.join(DETAILS_FILE))?,
        })
    }

    /// Loads a project for report generation. Both table files must exist;
    /// this is the one unrecoverable precondition of a report run.
    pub fn load_required(&self, name: &str) -> Result<ProjectTables> {
        let dir = self.project_dir(name);
        if !dir.join(ITEMS_FILE).is_file() || !dir.join(DETAILS_FILE).is_file() {
            return Err(Error::ProjectDataMissing {
                project: name.to_string(),
            });
        }
        self.load(name)
    }

    /// Saves both tables, each atomically. Creates the project directory on
    /// first save.
    pub fn save(&self, name: &str, tables: &ProjectTables) -> Result<()> {
        let dir = self.project_dir(name);
        fs::create_dir_all(&dir)?;
        super::write_rows(&dir.join(ITEMS_FILE), &ITEMS_HEADERS, &tables.items)?;
        super::write_rows(&dir.join(DETAILS_FILE), &DETAILS_HEADERS, &tables.details)?;
        tracing::debug!(project = %name, items = tables.items.len(), "project saved");
        Ok(())
    }

    /// Removes a project directory and everything in it.
    pub fn delete(&self, name: &str) -> Result<()> {
        let dir = self.project_dir(name);
        if !dir.is_dir() {
            return Err(Error::ProjectNotFound {
                name: name.to_string(),
            });
        }
        fs::remove_dir_all(&dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::budget_item;

    fn store() -> (tempfile::TempDir, ProjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("presupuestos"));
        (dir, store)
    }

    #[test]
    fn test_save_then_load_round_trips_codes_as_strings() {
        let (_dir, store) = store();
        let tables = ProjectTables {
            items: vec![budget_item("1.01", "UF"), budget_item("2.10", "CLP")],
            details: vec![DetailLine::new("1.01", "MAA00575", 0.5)],
        };
        store.save("casa", &tables).unwrap();

        let loaded = store.load("casa").unwrap();
        assert_eq!(loaded.items[0].code, "1.01");
        // "2.10" must come back verbatim, not as a trimmed numeric "2.1".
        assert_eq!(loaded.items[1].code, "2.10");
        assert_eq!(loaded.details[0].catalog_code, "MAA00575");
    }

    #[test]
    fn test_load_unknown_project_fails() {
        let (_dir, store) = store();
        assert!(matches!(
            store.load("nope"),
            Err(Error::ProjectNotFound { .. })
        ));
    }

    #[test]
    fn test_load_required_needs_both_tables() {
        let (_dir, store) = store();
        fs::create_dir_all(store.project_dir("parcial")).unwrap();
        super::super::write_rows(
            &store.project_dir("parcial").join(ITEMS_FILE),
            &ITEMS_HEADERS,
            &[budget_item("1.01", "CLP")],
        )
        .unwrap();

        assert!(matches!(
            store.load_required("parcial"),
            Err(Error::ProjectDataMissing { .. })
        ));
        // load() tolerates the missing detail table.
        let loaded = store.load("parcial").unwrap();
        assert!(loaded.details.is_empty());
    }

    #[test]
    fn test_list_and_report_ready() {
        let (_dir, store) = store();
        store.save("b", &ProjectTables::default()).unwrap();
        store.save("a", &ProjectTables::default()).unwrap();
        fs::create_dir_all(store.project_dir("vacio")).unwrap();

        assert_eq!(store.list().unwrap(), vec!["a", "b", "vacio"]);
        assert_eq!(store.list_report_ready().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_delete_removes_directory() {
        let (_dir, store) = store();
        store.save("x", &ProjectTables::default()).unwrap();
        store.delete("x").unwrap();
        assert!(!store.exists("x"));
        assert!(matches!(
            store.delete("x"),
            Err(Error::ProjectNotFound { .. })
        ));
    }
}
