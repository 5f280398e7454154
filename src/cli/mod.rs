pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

use crate::config::{config, DatabaseConfig};
use crate::database::{PizzeriaService, Store};

#[derive(Parser)]
#[command(name = "pizzeria")]
#[command(about = "Pizzeria CLI - manage restaurants and pizzas behind the Pizzeria API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        conflicts_with = "json",
        help = "Output in human-readable text format (default)"
    )]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Database URL override (defaults to DATABASE_URL)")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create the database schema")]
    Migrate,

    #[command(about = "Replace all data with the sample data set")]
    Seed,

    #[command(about = "Restaurant management")]
    Restaurant {
        #[command(subcommand)]
        cmd: commands::restaurant::RestaurantCommands,
    },

    #[command(about = "Pizza management")]
    Pizza {
        #[command(subcommand)]
        cmd: commands::pizza::PizzaCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json && !cli.text {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Open the store and make sure the schema exists
async fn open_service(database_url: Option<String>) -> anyhow::Result<PizzeriaService> {
    let db_config = match database_url {
        Some(url) => DatabaseConfig::with_url(url),
        None => config().database.clone(),
    };
    let store = Store::connect(&db_config).await?;
    store.migrate().await?;
    Ok(PizzeriaService::new(store))
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let service = open_service(cli.database_url).await?;

    let result = match cli.command {
        Commands::Migrate => commands::database::migrate(&output_format),
        Commands::Seed => commands::database::seed(&service, &output_format).await,
        Commands::Restaurant { cmd } => {
            commands::restaurant::handle(cmd, &service, &output_format).await
        }
        Commands::Pizza { cmd } => commands::pizza::handle(cmd, &service, &output_format).await,
    };

    service.store().close().await;
    result
}
