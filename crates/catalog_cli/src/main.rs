//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `catalog_core` wiring end to end: config, logging, store, workflow.
//! - Print the author list view-model as JSON for quick local checks.

use catalog_core::{
    init_logging_from_config, AuthorForm, AuthorWorkflow, CatalogConfig, SqliteCatalogStore,
};
use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;

/// Command-line interface for the local author catalog.
#[derive(Debug, Parser)]
#[command(name = "catalog_cli")]
#[command(about = "Smoke-test the author catalog workflows")]
#[command(version)]
struct Cli {
    /// Command to run; lists authors when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Print the author list as JSON
    List,
    /// Create a demo author through the create workflow, then list
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    println!("catalog_core ping={}", catalog_core::ping());
    println!("catalog_core version={}", catalog_core::core_version());

    let config = CatalogConfig::load()?;
    init_logging_from_config(&config.logging)?;

    let store = match &config.database.path {
        Some(path) => SqliteCatalogStore::open(path)?,
        None => SqliteCatalogStore::open_in_memory()?,
    };
    let workflow = AuthorWorkflow::new(store.clone(), store.clone());

    if cli.command == Some(Command::Seed) {
        let form = AuthorForm {
            first_name: "Jane".to_string(),
            family_name: "Austen".to_string(),
            date_of_birth: "1775-12-16".to_string(),
            date_of_death: "1817-07-18".to_string(),
        };
        let response = workflow.author_create_post(&form).await?;
        println!("seed status={} location={:?}", response.status(), response.location());
    }

    let response = workflow.author_list().await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    drop(workflow);
    store.close()?;
    info!("event=app_stop module=cli status=ok");
    Ok(())
}
