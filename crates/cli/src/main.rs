use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use recordkit_core::App;
use recordkit_core::constants::DB_PATH_ENV;
use recordkit_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "recordkit")]
#[command(about = "Schema-driven record lists with search, sort and a scientific calculator", long_about = None)]
struct Cli {
    /// SQLite file to use instead of the default location
    #[arg(long, global = true, conflicts_with = "memory")]
    db: Option<PathBuf>,
    /// Keep everything in memory for this run
    #[arg(long, global = true)]
    memory: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in apps
    Apps,
    /// Show an app's records, filtered and sorted
    List {
        app: App,
        /// Case-insensitive text search over the app's search fields
        #[arg(short, long)]
        query: Option<String>,
        /// Only records in this category (`All` shows everything)
        #[arg(short, long)]
        category: Option<String>,
        /// Field to sort by
        #[arg(short, long)]
        sort: Option<String>,
        #[arg(long, requires = "sort")]
        desc: bool,
        #[arg(long)]
        json: bool,
    },
    /// Add a record from field=value pairs
    Add {
        app: App,
        #[arg(value_parser = commands::records::parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Change some fields of a record; the rest are kept
    Edit {
        app: App,
        id: String,
        #[arg(value_parser = commands::records::parse_assignment, required = true)]
        fields: Vec<(String, String)>,
    },
    /// Flip a yes/no field
    Toggle {
        app: App,
        id: String,
        #[arg(default_value = "completed")]
        field: String,
    },
    Delete {
        app: App,
        id: String,
    },
    /// Count and total of a numeric field
    Summary {
        app: App,
        field: String,
    },
    /// Evaluate an expression, or read one per line from stdin
    Calc {
        #[arg(allow_hyphen_values = true)]
        expression: Vec<String>,
    },
    /// Show or change the dark-mode preference
    Theme {
        #[arg(long, conflicts_with_all = ["light", "toggle"])]
        dark: bool,
        #[arg(long, conflicts_with = "toggle")]
        light: bool,
        #[arg(long)]
        toggle: bool,
    },
}

pub(crate) fn get_db_path() -> PathBuf {
    if let Ok(path) = std::env::var(DB_PATH_ENV)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recordkit")
        .join("records.db")
}

fn open_storage(cli: &Cli) -> Result<Arc<StorageBackend>> {
    if cli.memory {
        return Ok(Arc::new(StorageBackend::new_memory()));
    }
    let db_path = cli.db.clone().unwrap_or_else(get_db_path);
    Ok(Arc::new(StorageBackend::new_sqlite(&db_path)?))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apps => commands::records::run_apps(),
        Commands::Calc { ref expression } => commands::calc::run(expression),
        Commands::List { app, ref query, ref category, ref sort, desc, json } => {
            let storage = open_storage(&cli)?;
            let options = commands::records::ListOptions {
                query: query.as_deref(),
                category: category.as_deref(),
                sort: sort.as_deref(),
                desc,
                json,
            };
            commands::records::run_list(storage, app, &options)
        },
        Commands::Add { app, ref fields } => commands::records::run_add(open_storage(&cli)?, app, fields),
        Commands::Edit { app, ref id, ref fields } => {
            commands::records::run_edit(open_storage(&cli)?, app, id, fields)
        },
        Commands::Toggle { app, ref id, ref field } => {
            commands::records::run_toggle(open_storage(&cli)?, app, id, field)
        },
        Commands::Delete { app, ref id } => commands::records::run_delete(open_storage(&cli)?, app, id),
        Commands::Summary { app, ref field } => {
            commands::records::run_summary(open_storage(&cli)?, app, field)
        },
        Commands::Theme { dark, light, toggle } => {
            commands::theme::run(open_storage(&cli)?, dark, light, toggle)
        },
    }
}
