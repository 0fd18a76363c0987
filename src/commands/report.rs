//! Report commands.

use crate::cli::ReportCommand;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::report::{ApuReport, DetailedOptions, DetailedReport};
use std::fs;
use std::path::Path;

pub fn run(config: &AppConfig, command: ReportCommand) -> Result<()> {
    let store = config.project_store();
    match command {
        ReportCommand::Detailed {
            project,
            location,
            owner,
            markup,
            tax,
            sections,
            output,
        } => {
            let tables = store.load_required(&project)?;
            let catalog = config.catalog_store().load()?;
            let rates = config.currency_store().rate_table()?;
            let options = DetailedOptions {
                location,
                owner,
                markup_percent: markup.unwrap_or(config.report.markup_percent),
                tax_percent: tax.unwrap_or(config.report.tax_percent),
                section_labels: sections.into_iter().collect(),
            };

            let report = DetailedReport::generate(&project, &tables, &catalog, &rates, &options);
            for warning in report.warnings() {
                tracing::warn!("{warning}");
            }
            emit(&report.render_text(), output.as_deref())?;
        }
        ReportCommand::Apu { project, output } => {
            let tables = store.load_required(&project)?;
            let catalog = config.catalog_store().load()?;
            let categories = config.category_store().load()?;

            let report = ApuReport::generate(&project, &tables, &catalog, &categories);
            for breakdown in &report.breakdowns {
                for warning in &breakdown.warnings {
                    tracing::warn!("{warning}");
                }
            }
            emit(&report.render_text(), output.as_deref())?;
        }
    }
    Ok(())
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            println!("Reporte escrito en {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
