//! Catalog and category commands.

use crate::cli::{CatalogCommand, CategoryCommand};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::records::{CatalogEntry, CategoryRow};
use crate::report::format_clp;

pub fn run_catalog(config: &AppConfig, command: CatalogCommand) -> Result<()> {
    let store = config.catalog_store();
    match command {
        CatalogCommand::Add {
            category,
            subcategory,
            summary,
            unit,
            price,
            date,
        } => {
            let code = config
                .category_store()
                .allocate_code(&category, &subcategory)?;
            store.add(CatalogEntry {
                code: code.clone(),
                summary,
                category,
                subcategory,
                unit,
                unit_price: price,
                date: date.unwrap_or_else(super::today),
            })?;
            println!("Recurso {code} agregado");
        }
        CatalogCommand::SetPrice { code, price, date } => {
            store.set_price(&code, price, &date.unwrap_or_else(super::today))?;
            println!("Precio de {code} actualizado a {}", format_clp(price));
        }
        CatalogCommand::List { search } => {
            let entries = store.search(search.as_deref().unwrap_or(""))?;
            for entry in entries {
                println!(
                    "{:<10} {:<50} {:>4} {:>14}  {}",
                    entry.code,
                    entry.summary,
                    entry.unit,
                    format_clp(entry.unit_price),
                    entry.category,
                );
            }
        }
    }
    Ok(())
}

pub fn run_category(config: &AppConfig, command: CategoryCommand) -> Result<()> {
    let store = config.category_store();
    match command {
        CategoryCommand::Add {
            prefix,
            category,
            subcategory,
            tipo,
        } => {
            store.add(CategoryRow {
                prefix: prefix.clone(),
                category,
                subcategory,
                max_number: 0,
                count: 0,
                next_code: String::new(),
                declared_type: tipo,
            })?;
            println!("Categoría con prefijo {prefix} registrada");
        }
        CategoryCommand::List => {
            for row in store.load()? {
                println!(
                    "{:<6} {:<30} {:<30} {:<14} asignados: {}",
                    row.prefix, row.category, row.subcategory, row.declared_type, row.count,
                );
            }
        }
    }
    Ok(())
}
