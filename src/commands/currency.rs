//! Currency commands.

use crate::cli::CurrencyCommand;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::records::Currency;
use crate::report::format_qty;

pub fn run(config: &AppConfig, command: CurrencyCommand) -> Result<()> {
    let store = config.currency_store();
    match command {
        CurrencyCommand::List => {
            for currency in store.load()? {
                println!(
                    "{:<5} {:<25} {:>16} CLP",
                    currency.code,
                    currency.name,
                    format_qty(currency.clp_value),
                );
            }
        }
        CurrencyCommand::SetRate { code, value } => {
            store.set_rate(&code, value)?;
            println!("Tasa de {} fijada en {} CLP", code.to_uppercase(), format_qty(value));
        }
        CurrencyCommand::Add { code, name, value } => {
            let code = code.to_uppercase();
            store.add(Currency::new(&code, &name, value))?;
            println!("Moneda {code} agregada");
        }
    }
    Ok(())
}
