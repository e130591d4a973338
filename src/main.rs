//! DrugQry CLI - Drug interaction checker

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use drugqry::config::{self, DrugQryConfig};
use drugqry::storage::SqliteStore;
use drugqry::ui;
use drugqry::{Importer, QueryEngine};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "drugqry")]
#[command(version)]
#[command(about = "Drug interaction checker backed by a DrugBank export")]
#[command(long_about = r#"
DrugQry checks a list of medications for documented interactions.

Provided as is with no warranty whatsoever, not even for intended purpose.

If you do not have the database file yet, get the "full database.xml" file
from DrugBank and import it once (this takes a while):
  drugqry import --source "full database.xml"

Then query with a comma separated list of medications:
  drugqry query aspirin,warfarin,ibuprofen
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to drugqry.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a DrugBank XML export into a fresh database
    #[command(short_flag = 's')]
    Import {
        /// Path to the XML export
        #[arg(long)]
        source: Option<PathBuf>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Report documented interactions among a list of drugs
    Query {
        /// Comma separated drug names, e.g. "aspirin,warfarin"
        drugs: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show row counts of the database
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        ui::fatal(&e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_long_help()?;
        return Ok(());
    };

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let settings = match DrugQryConfig::load(&config_path)? {
        Some(loaded) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            loaded
        }
        None => {
            if cli.config.is_some() && !matches!(command, Commands::Init { .. }) {
                ui::config_missing(&config_path);
            }
            DrugQryConfig::default()
        }
    };

    match command {
        Commands::Import { source, database } => {
            let source = settings.resolve_source(source);
            let database = settings.resolve_database(database);
            config::prepare_database_dir(&database)?;

            ui::import_banner(&source, &database);

            let store = SqliteStore::open(&database)?;
            let importer = Importer::new(&store).with_namespace(settings.namespace());
            let progress = ui::ImportProgress::new(settings.is_quiet());

            match importer.import_file(&source, |count| progress.update(count)) {
                Ok(summary) => progress.finish(&summary),
                Err(e) => {
                    progress.abandon();
                    return Err(e.into());
                }
            }
        }

        Commands::Query { drugs, database, format } => {
            let database = settings.resolve_database(database);
            let store = SqliteStore::open_read_only(&database)?;
            let engine = QueryEngine::new(&store);
            let outcome = engine.check_list(&drugs)?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
                OutputFormat::Text => ui::print_outcome(&outcome),
            }
        }

        Commands::Stats { database } => {
            let database = settings.resolve_database(database);
            let store = SqliteStore::open_read_only(&database)?;
            let stats = store.stats()?;

            ui::stats_banner(&database);
            println!("{}", ui::stats_table(&stats));
        }

        Commands::Init { force } => {
            DrugQryConfig::defaults().save(&config_path, force)?;
            ui::config_written(&config_path);
        }
    }

    Ok(())
}
