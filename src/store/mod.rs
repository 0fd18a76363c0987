//! CSV persistence layer.
//!
//! Every table is a flat CSV file, written atomically: the new content goes
//! to a sibling `*.tmp.csv` first and is renamed over the target, so a crash
//! mid-write can never leave a half-written table behind. Readers get typed
//! records via serde; code-bearing columns are `String` fields, which is what
//! keeps `"1.01"` from ever being inferred into the float `1.01` on the way
//! in.

pub mod catalog;
pub mod categories;
pub mod currencies;
pub mod project;

pub use catalog::CatalogStore;
pub use categories::CategoryStore;
pub use currencies::CurrencyStore;
pub use project::{ProjectStore, ProjectTables};

use crate::errors::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Reads all rows of a CSV table. A missing file is an empty table, not an
/// error — per-project files only appear once something is saved.
pub(crate) fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Writes a CSV table atomically: temp file first, then rename over the
/// target. The header row is always written, even for an empty table, so a
/// freshly created project has well-formed files.
pub(crate) fn write_rows<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp.csv");
    {
        // Headers are written by hand (so empty tables still get them); the
        // writer must not auto-emit a second header row from the struct's
        // field names on the first serialize.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)?;
        writer.write_record(headers)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
