//! In-memory editing session for one project.
//!
//! A [`ProjectDraft`] holds both project tables, applies edits that keep them
//! consistent with each other (renaming an item moves its detail lines,
//! deleting an item drops them) and writes everything back in one save. Item
//! order on save is hierarchical code order, so the stored files always read
//! top-down like the report does.

use crate::core::code::{SortKey, is_well_formed};
use crate::errors::{Error, Result};
use crate::records::{BudgetItem, DetailLine};
use crate::store::{ProjectStore, ProjectTables};

/// One project's tables checked out for editing.
#[derive(Debug)]
pub struct ProjectDraft {
    name: String,
    tables: ProjectTables,
}

impl ProjectDraft {
    /// Opens an existing project for editing.
    pub fn open(store: &ProjectStore, name: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            tables: store.load(name)?,
        })
    }

    /// Starts a brand-new, empty project. Fails if the name is taken.
    pub fn create(store: &ProjectStore, name: &str) -> Result<Self> {
        if store.exists(name) {
            return Err(Error::Config {
                message: format!("project {name} already exists"),
            });
        }
        Ok(Self {
            name: name.to_string(),
            tables: ProjectTables::default(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tables(&self) -> &ProjectTables {
        &self.tables
    }

    #[must_use]
    pub fn item(&self, code: &str) -> Option<&BudgetItem> {
        self.tables.items.iter().find(|item| item.code == code)
    }

    /// Inserts or replaces an item. Odd-looking codes are accepted with a
    /// warning; they sort to the front rather than being rejected.
    pub fn upsert_item(&mut self, item: BudgetItem) {
        if !is_well_formed(&item.code) {
            tracing::warn!(code = %item.code, "item code has non-numeric segments");
        }
        match self.tables.items.iter_mut().find(|i| i.code == item.code) {
            Some(existing) => *existing = item,
            None => self.tables.items.push(item),
        }
    }

    /// Renames an item, carrying its detail lines along. Detail lines that
    /// already exist under the new code consolidate by summing quantities.
    pub fn rename_item(&mut self, old_code: &str, new_code: &str) -> Result<()> {
        if old_code == new_code {
            return Ok(());
        }
        if self.item(new_code).is_some() {
            return Err(Error::ItemAlreadyExists {
                project: self.name.clone(),
                code: new_code.to_string(),
            });
        }
        let item = self
            .tables
            .items
            .iter_mut()
            .find(|i| i.code == old_code)
            .ok_or_else(|| Error::ItemNotFound {
                project: self.name.clone(),
                code: old_code.to_string(),
            })?;
        item.code = new_code.to_string();

        let moved: Vec<DetailLine> = self
            .tables
            .details
            .iter()
            .filter(|line| line.item_code == old_code)
            .cloned()
            .collect();
        self.tables.details.retain(|line| line.item_code != old_code);
        for line in moved {
            self.set_detail_quantity_relative(new_code, &line.catalog_code, line.quantity);
        }
        Ok(())
    }

    /// Removes an item and all of its detail lines.
    pub fn delete_item(&mut self, code: &str) -> Result<()> {
        let before = self.tables.items.len();
        self.tables.items.retain(|item| item.code != code);
        if self.tables.items.len() == before {
            return Err(Error::ItemNotFound {
                project: self.name.clone(),
                code: code.to_string(),
            });
        }
        self.tables.details.retain(|line| line.item_code != code);
        Ok(())
    }

    /// Sets the quantity of a detail line. A quantity of zero (or less)
    /// removes the line; a new (item, code) pair is appended. The item must
    /// exist.
    pub fn set_detail_quantity(
        &mut self,
        item_code: &str,
        catalog_code: &str,
        quantity: f64,
    ) -> Result<()> {
        if self.item(item_code).is_none() {
            return Err(Error::ItemNotFound {
                project: self.name.clone(),
                code: item_code.to_string(),
            });
        }
        self.tables.details.retain(|line| {
            !(line.item_code == item_code && line.catalog_code == catalog_code)
        });
        if quantity > 0.0 {
            self.tables
                .details
                .push(DetailLine::new(item_code, catalog_code, quantity));
        }
        Ok(())
    }

    fn set_detail_quantity_relative(&mut self, item_code: &str, catalog_code: &str, delta: f64) {
        match self
            .tables
            .details
            .iter_mut()
            .find(|line| line.item_code == item_code && line.catalog_code == catalog_code)
        {
            Some(line) => line.quantity += delta,
            None => self
                .tables
                .details
                .push(DetailLine::new(item_code, catalog_code, delta)),
        }
    }

    /// Writes both tables back, items in hierarchical order and detail lines
    /// grouped by their item in the same order.
    pub fn save(&mut self, store: &ProjectStore) -> Result<()> {
        self.tables
            .items
            .sort_by_key(|item| SortKey::parse(&item.code));
        self.tables.details.sort_by_key(|line| {
            (SortKey::parse(&line.item_code), line.catalog_code.clone())
        });
        store.save(&self.name, &self.tables)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp, clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::budget_item;

    fn draft() -> ProjectDraft {
        ProjectDraft {
            name: "casa".to_string(),
            tables: ProjectTables::default(),
        }
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut draft = draft();
        draft.upsert_item(budget_item("1.01", "CLP"));
        let mut edited = budget_item("1.01", "UF");
        edited.quantity = 7.0;
        draft.upsert_item(edited);

        assert_eq!(draft.tables().items.len(), 1);
        assert_eq!(draft.item("1.01").unwrap().currency, "UF");
    }

    #[test]
    fn test_rename_moves_and_consolidates_details() {
        let mut draft = draft();
        draft.upsert_item(budget_item("1.01", "CLP"));
        draft.upsert_item(budget_item("1.02", "CLP"));
        draft.set_detail_quantity("1.01", "MAA1", 2.0).unwrap();
        draft.set_detail_quantity("1.02", "MAA1", 3.0).unwrap();
        draft.delete_item("1.02").unwrap();
        // Re-add 1.02's line under 1.03, then rename 1.01 over it.
        draft.upsert_item(budget_item("1.03", "CLP"));
        draft.set_detail_quantity("1.03", "MAA1", 3.0).unwrap();
        draft.rename_item("1.01", "1.03").unwrap_err();

        draft.rename_item("1.01", "1.04").unwrap();
        assert!(draft.item("1.01").is_none());
        let line = draft
            .tables()
            .details
            .iter()
            .find(|l| l.item_code == "1.04")
            .unwrap();
        assert_eq!(line.quantity, 2.0);
    }

    #[test]
    fn test_delete_item_drops_its_details() {
        let mut draft = draft();
        draft.upsert_item(budget_item("1.01", "CLP"));
        draft.set_detail_quantity("1.01", "MAA1", 2.0).unwrap();
        draft.delete_item("1.01").unwrap();
        assert!(draft.tables().items.is_empty());
        assert!(draft.tables().details.is_empty());
    }

    #[test]
    fn test_zero_quantity_removes_detail_line() {
        let mut draft = draft();
        draft.upsert_item(budget_item("1.01", "CLP"));
        draft.set_detail_quantity("1.01", "MAA1", 2.0).unwrap();
        draft.set_detail_quantity("1.01", "MAA1", 0.0).unwrap();
        assert!(draft.tables().details.is_empty());
    }

    #[test]
    fn test_detail_for_unknown_item_fails() {
        let mut draft = draft();
        assert!(matches!(
            draft.set_detail_quantity("9.99", "MAA1", 1.0),
            Err(Error::ItemNotFound { .. })
        ));
    }

    #[test]
    fn test_save_sorts_hierarchically() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("presupuestos"));
        let mut draft = ProjectDraft::create(&store, "casa").unwrap();
        draft.upsert_item(budget_item("10.01", "CLP"));
        draft.upsert_item(budget_item("2.01", "CLP"));
        draft.upsert_item(budget_item("2", "CLP"));
        draft.save(&store).unwrap();

        let loaded = store.load("casa").unwrap();
        let codes: Vec<&str> = loaded.items.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["2", "2.01", "10.01"]);
    }
}
