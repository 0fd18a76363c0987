//! Currency record - One row of `monedas.csv`.

use serde::{Deserialize, Serialize};

/// Base currency every catalog price is stored in.
pub const BASE_CURRENCY: &str = "CLP";

/// A currency and its exchange rate against the base currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    /// Currency code, matched case-insensitively (e.g. "CLP", "UF", "USD").
    #[serde(rename = "Codigo")]
    pub code: String,
    /// Human-readable name.
    #[serde(rename = "Nombre")]
    pub name: String,
    /// How many CLP one unit of this currency is worth. A missing or zero
    /// rate makes conversion into this currency unavailable.
    #[serde(rename = "ValorCLP", deserialize_with = "super::lenient_f64")]
    pub clp_value: f64,
}

impl Currency {
    #[must_use]
    pub fn new(code: &str, name: &str, clp_value: f64) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            clp_value,
        }
    }
}

/// Default currency table used to seed a missing `monedas.csv`.
#[must_use]
pub fn default_currencies() -> Vec<Currency> {
    vec![
        Currency::new("CLP", "Peso Chileno", 1.0),
        Currency::new("UF", "Unidad de Fomento", 39718.89),
        Currency::new("USD", "Dólar Estadounidense", 862.07),
    ]
}
