//! Currency table: `monedas.csv`.
//!
//! Rates are CLP per one unit of the currency. The base currency CLP is
//! pinned to 1.0 on every save so a stray edit cannot break the identity
//! conversion.

use crate::core::RateTable;
use crate::errors::{Error, Result};
use crate::records::{BASE_CURRENCY, Currency, default_currencies};
use std::path::PathBuf;

const CURRENCY_HEADERS: [&str; 3] = ["Codigo", "Nombre", "ValorCLP"];

#[derive(Debug)]
pub struct CurrencyStore {
    path: PathBuf,
}

impl CurrencyStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the currency table, seeding the default one on first use.
    pub fn load(&self) -> Result<Vec<Currency>> {
        if !self.path.exists() {
            let seeded = default_currencies();
            self.save(&seeded)?;
            tracing::info!(path = %self.path.display(), "seeded default currency table");
            return Ok(seeded);
        }
        super::read_rows(&self.path)
    }

    pub fn save(&self, currencies: &[Currency]) -> Result<()> {
        let mut rows = currencies.to_vec();
        for row in &mut rows {
            if row.code.trim().eq_ignore_ascii_case(BASE_CURRENCY) {
                row.clp_value = 1.0;
            }
        }
        super::write_rows(&self.path, &CURRENCY_HEADERS, &rows)
    }

    /// Sets the CLP rate of an existing currency.
    pub fn set_rate(&self, code: &str, clp_value: f64) -> Result<()> {
        if clp_value <= 0.0 {
            return Err(Error::InvalidAmount { amount: clp_value });
        }
        let mut currencies = self.load()?;
        let currency = currencies
            .iter_mut()
            .find(|c| c.code.trim().eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| Error::CurrencyNotFound {
                code: code.to_string(),
            })?;
        currency.clp_value = clp_value;
        self.save(&currencies)
    }

    /// Adds a currency that is not in the table yet.
    pub fn add(&self, currency: Currency) -> Result<()> {
        let mut currencies = self.load()?;
        if currencies
            .iter()
            .any(|c| c.code.trim().eq_ignore_ascii_case(currency.code.trim()))
        {
            return Err(Error::Config {
                message: format!("currency {} already exists", currency.code),
            });
        }
        currencies.push(currency);
        self.save(&currencies)
    }

    /// Rate table for conversions, from the stored (or seeded) currencies.
    pub fn rate_table(&self) -> Result<RateTable> {
        Ok(RateTable::from_currencies(&self.load()?))
    }
}
