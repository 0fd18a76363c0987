//! Project, item and detail-line commands.

use crate::cli::{DetailCommand, ItemCommand, ProjectCommand};
use crate::config::AppConfig;
use crate::core::pricing::unit_prices;
use crate::errors::Result;
use crate::records::BudgetItem;
use crate::report::{format_clp, format_qty};
use crate::session::ProjectDraft;

pub fn run_project(config: &AppConfig, command: ProjectCommand) -> Result<()> {
    let store = config.project_store();
    match command {
        ProjectCommand::New {
            name,
            description,
            currency,
        } => {
            let mut draft = ProjectDraft::create(&store, &name)?;
            if let Some(description) = description {
                draft.upsert_item(BudgetItem {
                    code: "1.01".to_string(),
                    description,
                    date: super::today(),
                    quantity_unit: "GL".to_string(),
                    quantity: 1.0,
                    currency,
                });
            }
            draft.save(&store)?;
            println!("Proyecto {name} creado");
        }
        ProjectCommand::List { report_ready } => {
            let names = if report_ready {
                store.list_report_ready()?
            } else {
                store.list()?
            };
            for name in names {
                println!("{name}");
            }
        }
        ProjectCommand::Show { name } => {
            let tables = store.load(&name)?;
            let catalog = config.catalog_store().load()?;
            let pricing = unit_prices(&tables.details, &catalog);

            let mut items = tables.items.clone();
            items.sort_by_key(|item| crate::core::SortKey::parse(&item.code));
            for item in &items {
                let unit_price = pricing.unit_price(&item.code);
                println!(
                    "{:<10} {:<40} {:>10} {:>4} {:>14} {:>14}",
                    item.code,
                    item.description,
                    format_qty(item.quantity),
                    item.quantity_unit,
                    format_clp(unit_price),
                    format_clp(item.line_total(unit_price)),
                );
            }
            for warning in &pricing.warnings {
                tracing::warn!("{warning}");
            }
        }
        ProjectCommand::Delete { name } => {
            store.delete(&name)?;
            println!("Proyecto {name} eliminado");
        }
    }
    Ok(())
}

pub fn run_item(config: &AppConfig, command: ItemCommand) -> Result<()> {
    let store = config.project_store();
    match command {
        ItemCommand::Set {
            project,
            code,
            description,
            unit,
            quantity,
            currency,
            date,
        } => {
            let mut draft = ProjectDraft::open(&store, &project)?;
            draft.upsert_item(BudgetItem {
                code: code.clone(),
                description,
                date: date.unwrap_or_else(super::today),
                quantity_unit: unit,
                quantity,
                currency,
            });
            draft.save(&store)?;
            println!("Item {code} guardado en {project}");
        }
        ItemCommand::Rename {
            project,
            old_code,
            new_code,
        } => {
            let mut draft = ProjectDraft::open(&store, &project)?;
            draft.rename_item(&old_code, &new_code)?;
            draft.save(&store)?;
            println!("Item {old_code} renombrado a {new_code}");
        }
        ItemCommand::Delete { project, code } => {
            let mut draft = ProjectDraft::open(&store, &project)?;
            draft.delete_item(&code)?;
            draft.save(&store)?;
            println!("Item {code} eliminado de {project}");
        }
    }
    Ok(())
}

pub fn run_detail(config: &AppConfig, command: DetailCommand) -> Result<()> {
    let store = config.project_store();
    match command {
        DetailCommand::Set {
            project,
            item,
            catalog_code,
            quantity,
        } => {
            let catalog = config.catalog_store().load()?;
            if !catalog.iter().any(|entry| entry.code == catalog_code) {
                tracing::warn!(code = %catalog_code, "catalog code not found, line priced at zero");
            }
            let mut draft = ProjectDraft::open(&store, &project)?;
            draft.set_detail_quantity(&item, &catalog_code, quantity)?;
            draft.save(&store)?;
            if quantity > 0.0 {
                println!("Detalle {catalog_code} x{quantity} en item {item}");
            } else {
                println!("Detalle {catalog_code} quitado del item {item}");
            }
        }
        DetailCommand::List { project, item } => {
            let tables = store.load(&project)?;
            let catalog = config.catalog_store().load()?;
            for line in tables.details.iter().filter(|l| l.item_code == item) {
                let entry = catalog.iter().find(|e| e.code == line.catalog_code);
                let (summary, unit, price) = entry
                    .map(|e| (e.summary.as_str(), e.unit.as_str(), e.unit_price))
                    .unwrap_or(("(sin referencia)", "", 0.0));
                println!(
                    "{:<10} {:<40} {:>4} {:>10} {:>14} {:>14}",
                    line.catalog_code,
                    summary,
                    unit,
                    format_qty(line.quantity),
                    format_clp(price),
                    format_clp(price * line.quantity),
                );
            }
        }
    }
    Ok(())
}
