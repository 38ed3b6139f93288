use log::{error, info, warn};

use super::{
    catalog_getter::CatalogGetter,
    error::LoadError,
    helpers::load_catalog,
    models::{Command, Config, Report},
    session::Planner,
};

/// Loads the catalog once and replays the commands against a fresh planner.
/// A failed load leaves no catalog, so no command is applied.
pub async fn run<CG: CatalogGetter>(
    catalog_getter: CG,
    config: &Config,
    commands: Vec<Command>,
) -> Result<Vec<Report>, LoadError> {
    let raw_catalog = catalog_getter.get_catalog().await.inspect_err(|e| {
        error!("No catalog available: {}", e);
    })?;
    let catalog = load_catalog(&raw_catalog, &config.slots).inspect_err(|e| {
        error!("No catalog available: {}", e);
    })?;

    if catalog.is_empty() {
        warn!("Catalog lists no courses, every add will be refused");
    }

    let mut planner = Planner::new(catalog);
    let reports = commands
        .into_iter()
        .map(|command| planner.apply(command))
        .collect::<Vec<_>>();
    info!(
        "Applied {} commands, schedule holds {} courses",
        reports.len(),
        planner.schedule().len()
    );
    Ok(reports)
}
