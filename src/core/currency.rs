//! Currency conversion against the CLP base.
//!
//! Catalog prices are stored in CLP; a project may be priced in another
//! currency. Conversion divides a CLP amount by the target currency's rate.
//! A missing or zero rate never turns into a division fault: the result is
//! the distinguishable [`Converted::Unavailable`] sentinel and report
//! generation carries on in the base currency.

use crate::records::{BASE_CURRENCY, BudgetItem, Currency};
use std::collections::HashMap;

/// Outcome of a currency conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Converted {
    /// Converted amount in the target currency.
    Amount(f64),
    /// The target currency has no usable rate.
    Unavailable,
}

impl Converted {
    /// The converted amount, if available.
    #[must_use]
    pub fn amount(self) -> Option<f64> {
        match self {
            Self::Amount(value) => Some(value),
            Self::Unavailable => None,
        }
    }

    #[must_use]
    pub fn is_unavailable(self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// Exchange-rate lookup built from the currency table.
///
/// Codes are matched case-insensitively, as the stored files mix e.g. "uf"
/// and "UF".
#[derive(Debug, Default)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl RateTable {
    #[must_use]
    pub fn from_currencies(currencies: &[Currency]) -> Self {
        let rates = currencies
            .iter()
            .map(|c| (c.code.trim().to_uppercase(), c.clp_value))
            .collect();
        Self { rates }
    }

    /// Rate to CLP for a currency code; `None` when the code is unknown.
    #[must_use]
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.trim().to_uppercase()).copied()
    }

    /// Converts a CLP amount into the target currency.
    ///
    /// The base currency converts to itself; any other target needs a
    /// strictly positive rate, otherwise the conversion is unavailable.
    #[must_use]
    pub fn convert_from_base(&self, amount_clp: f64, target: &str) -> Converted {
        let target = target.trim().to_uppercase();
        if target.is_empty() || target == BASE_CURRENCY {
            return Converted::Amount(amount_clp);
        }
        match self.rate(&target) {
            Some(rate) if rate > 0.0 => Converted::Amount(amount_clp / rate),
            Some(_) => {
                tracing::warn!(currency = %target, "zero exchange rate, conversion unavailable");
                Converted::Unavailable
            }
            None => {
                tracing::warn!(currency = %target, "unknown currency, conversion unavailable");
                Converted::Unavailable
            }
        }
    }
}

/// Currency a project's report should be expressed in.
///
/// Taken from item `1.01` if present, else the first `1.*` item, else the
/// first row; empty values and an empty table fall back to the base currency.
#[must_use]
pub fn project_currency(items: &[BudgetItem]) -> String {
    let picked = items
        .iter()
        .find(|item| item.code == "1.01")
        .or_else(|| items.iter().find(|item| item.code.starts_with("1.")))
        .or_else(|| items.first());
    match picked {
        Some(item) if !item.currency.trim().is_empty() => item.currency.trim().to_string(),
        _ => BASE_CURRENCY.to_string(),
    }
}
