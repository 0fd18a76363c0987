//! Record module - Plain row types for every CSV table the tool works with.
//!
//! Each record maps one CSV row via serde field renames that preserve the
//! original file headers exactly. Code-bearing columns are typed `String`
//! end-to-end: a dotted item code like `"1.01"` must round-trip as the exact
//! string `"1.01"`, never the number `1.01` (which would collide with
//! `"1.1"` and break every downstream lookup). Numeric columns are parsed
//! leniently — an empty or unparsable cell coerces to zero with a warning
//! instead of failing the whole load.

pub mod catalog;
pub mod category;
pub mod currency;
pub mod detail;
pub mod item;

pub use catalog::CatalogEntry;
pub use category::CategoryRow;
pub use currency::{BASE_CURRENCY, Currency, default_currencies};
pub use detail::DetailLine;
pub use item::BudgetItem;

use serde::{Deserialize, Deserializer};

/// Deserializes a numeric CSV cell, coercing empty or malformed values to 0.
///
/// Mirrors the tolerant loading policy of the original data files: a bad cell
/// must never abort a load, but the coercion is logged so data-entry errors
/// don't vanish silently.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => {
            tracing::warn!(cell = %raw, "non-numeric value coerced to 0");
            Ok(0.0)
        }
    }
}

/// Lenient counterpart of [`lenient_f64`] for integer columns.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    match trimmed.parse::<u32>() {
        Ok(value) => Ok(value),
        Err(_) => {
            tracing::warn!(cell = %raw, "non-integer value coerced to 0");
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        code: String,
        #[serde(deserialize_with = "lenient_f64")]
        value: f64,
    }

    #[test]
    fn test_lenient_f64_parses_numbers() {
        let row: Row = csv::Reader::from_reader("code,value\nx,3.5\n".as_bytes())
            .deserialize()
            .next()
            .unwrap()
            .unwrap();
        assert!((row.value - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lenient_f64_coerces_garbage_to_zero() {
        // A leading column keeps the empty-cell case a trailing empty field;
        // a lone empty cell would make the whole line blank and the reader
        // would skip it instead of exercising the coercion.
        for cell in ["", "abc", "1.2.3", "NaN"] {
            let data = format!("code,value\nx,{cell}\n");
            let row: Row = csv::Reader::from_reader(data.as_bytes())
                .deserialize()
                .next()
                .unwrap()
                .unwrap();
            assert_eq!(row.code, "x");
            assert_eq!(row.value, 0.0, "cell {cell:?} should coerce to 0");
        }
    }
}
