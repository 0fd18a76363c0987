//! Category record - One row of `categorias.csv`.
//!
//! Categories classify catalog entries, drive automatic code allocation
//! (prefix + zero-padded counter) and declare the "Tipo" used by the APU
//! report's category-axis rollup.

use serde::{Deserialize, Serialize};

/// Declared types a category can map to, in the order APU blocks are printed.
pub const TYPE_ORDER: [&str; 6] = [
    "MATERIALES",
    "EQUIPOS",
    "MAQUINARIAS",
    "HERRAMIENTAS",
    "MANO DE OBRA",
    "SERVICIOS",
];

/// Fallback declared type for unmapped rows.
pub const DEFAULT_TYPE: &str = "MATERIALES";

/// One category/subcategory classification row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    /// Catalog-code prefix allocated to this subcategory, e.g. `MAA`.
    #[serde(rename = "Prefijo")]
    pub prefix: String,
    #[serde(rename = "Categoria")]
    pub category: String,
    #[serde(rename = "Subcategoria")]
    pub subcategory: String,
    /// Highest numeric suffix allocated under the prefix so far.
    #[serde(rename = "MaxNumero", deserialize_with = "super::lenient_u32")]
    pub max_number: u32,
    /// How many codes have been allocated under the prefix.
    #[serde(rename = "Count", deserialize_with = "super::lenient_u32")]
    pub count: u32,
    /// Preview of the next code to allocate, e.g. `MAA00576`. Its digit run
    /// fixes the zero-padding width.
    #[serde(rename = "NextCodigo")]
    pub next_code: String,
    /// Declared type for the APU rollup ("MATERIALES", "MANO DE OBRA", ...).
    #[serde(rename = "Tipo", default)]
    pub declared_type: String,
}

impl CategoryRow {
    /// Normalizes the declared type: trimmed, uppercased, unknown values fall
    /// back to [`DEFAULT_TYPE`].
    pub fn normalize_type(&mut self) {
        let tipo = self.declared_type.trim().to_uppercase();
        self.declared_type = if TYPE_ORDER.contains(&tipo.as_str()) {
            tipo
        } else {
            DEFAULT_TYPE.to_string()
        };
    }
}
