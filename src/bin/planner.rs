use lib::planner::catalog_getter::CatalogSource;
use lib::planner::helpers::{get_commands, get_config, write_reports};
use lib::planner::models;
use lib::planner::run_tool::run;

use std::{error::Error, io, process::ExitCode};

use clap::Parser;
use log::{error, info};

use models::Args;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    /* Setup logging, stdout carries the reports */
    env_logger::builder()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    /* Get args, config and the user actions to replay */
    let args = Args::parse();
    let config = get_config(&args)?;
    info!(
        "Read config.json from {}",
        std::path::absolute(&args.config_json_path)?.display()
    );
    let commands = get_commands(&args)?;

    /* Load the catalog once and run the commands */
    let catalog_getter = CatalogSource::from_source(&config.catalog_source);
    match run(catalog_getter, &config, commands).await {
        Ok(reports) => {
            write_reports(io::stdout().lock(), &reports)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("Error loading courses from {}: {}", config.catalog_source, e);
            eprintln!("Error loading courses. Please make sure the catalog at {} is reachable and well-formed.", config.catalog_source);
            Ok(ExitCode::FAILURE)
        }
    }
}
