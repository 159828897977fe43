use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;

use warehouse_locator::cli::{CliArgs, Command};
use warehouse_locator::http::HttpTransport;
use warehouse_locator::logging::init_logging;
use warehouse_locator::{LocatorConfig, PageController, SearchOutcome, StaticPage, WarehouseRecord};

type Controller = PageController<StaticPage>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    init_logging();

    let config = LocatorConfig::from_env()?;
    let transport = HttpTransport::new(&config)?;
    let mut controller = PageController::new(StaticPage::new(), config);

    match args.command {
        Command::States => {
            load_locations(&mut controller, &transport).await?;
            for state in controller.index().states() {
                println!("{state}");
            }
        }
        Command::Districts { state } => {
            load_locations(&mut controller, &transport).await?;
            let districts = controller
                .index()
                .districts(&state)
                .ok_or_else(|| eyre!("Unknown state: {state}"))?;
            for district in districts {
                println!("{district}");
            }
        }
        Command::Search {
            state,
            district,
            json,
            out,
        } => {
            // The selectors are only a convenience; a search works without them
            if let Err(e) = controller.load_location_index(&transport).await {
                log::warn!("Continuing without location data: {e}");
            } else if !state.is_empty() && !controller.index().contains_state(&state) {
                log::warn!("State {state:?} does not appear in the location data");
            }

            controller.page_mut().select(&state, &district);
            let outcome = controller.fetch_warehouses(&transport).await;
            report_alert(&controller);

            match outcome {
                SearchOutcome::Rendered(count) => {
                    print_records(controller.results(), json)?;
                    eprintln!("{count} warehouses found");
                }
                SearchOutcome::NoResults => {
                    if json {
                        println!("[]");
                    }
                    eprintln!("No warehouses found for the selected location.");
                }
                SearchOutcome::Rejected(_) | SearchOutcome::Failed(_) => {}
            }
            write_snapshot(&controller, out.as_deref())?;

            if outcome.alert().is_some() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Popular { json, out } => {
            if controller.load_location_index(&transport).await.is_ok() {
                controller.fetch_popular_warehouses(&transport).await;
            }

            if controller.popular().is_empty() {
                eprintln!("No popular warehouses to show");
            }
            print_records(controller.popular(), json)?;
            write_snapshot(&controller, out.as_deref())?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn load_locations(controller: &mut Controller, transport: &HttpTransport) -> Result<()> {
    let source = controller.config().csv_path.clone();
    controller
        .load_location_index(transport)
        .await
        .wrap_err_with(|| format!("Unable to load location data from {source}"))
}

fn report_alert(controller: &Controller) {
    if let Some(alert) = controller.alert_slot().current() {
        eprintln!("{}: {}", alert.severity.label(), alert.message);
    }
}

fn print_records(records: &[WarehouseRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    for record in records {
        println!(
            "{} | {} | {} MT | {} | {}",
            record.name, record.address, record.capacity, record.status, record.contact
        );
    }
    Ok(())
}

fn write_snapshot(controller: &Controller, out: Option<&Path>) -> Result<()> {
    let Some(path) = out else {
        return Ok(());
    };
    std::fs::write(path, controller.page().to_document())
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    eprintln!("Page written to {}", path.display());
    Ok(())
}
