//! CLI entry point for microdb

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use microdb_cli::config::CliConfig;
use microdb_cli::input::build_params;
use microdb::InsertId;

#[derive(Parser)]
#[command(name = "microdb")]
#[command(about = "Run SQL queries and scripts against a SQLite database")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database file, or :memory: (overrides config)
    #[arg(short, long)]
    database: Option<String>,

    /// Open the database read-only
    #[arg(long)]
    read_only: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct QueryArgs {
    /// SQL statement
    sql: String,

    /// Positional parameter value (repeatable, bound in order)
    #[arg(short = 'p', long = "param")]
    params: Vec<String>,

    /// Named parameter as NAME=VALUE (repeatable)
    #[arg(short = 'n', long = "named")]
    named: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a select query and print the rows as JSON lines
    Query(QueryArgs),
    /// Run a statement and print the number of affected rows
    Exec(QueryArgs),
    /// Run an insert and print the identifier of the inserted row
    InsertId {
        #[command(flatten)]
        query: QueryArgs,

        /// Sequence to read the identifier from
        #[arg(long)]
        sequence: Option<String>,
    },
    /// Run every statement of a SQL script
    Import {
        /// Path to the SQL file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = CliConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Apply CLI overrides
    if let Some(database) = cli.database {
        config.database = database;
    }
    if cli.read_only {
        config.read_only = true;
    }

    debug!(?config, "configuration loaded");
    let conn = microdb_cli::connect(&config)?;

    match cli.command {
        Commands::Query(args) => {
            let params = build_params(&args.params, &args.named)?;
            let stdout = std::io::stdout();
            let count = microdb_cli::run_query(&conn, &args.sql, &params, &mut stdout.lock())?;
            info!("{} row(s) returned", count);
        }
        Commands::Exec(args) => {
            let params = build_params(&args.params, &args.named)?;
            let affected = microdb_cli::run_exec(&conn, &args.sql, &params)?;
            println!("{}", affected);
        }
        Commands::InsertId { query, sequence } => {
            let params = build_params(&query.params, &query.named)?;
            let id =
                microdb_cli::run_insert_id(&conn, &query.sql, &params, sequence.as_deref())?;
            match id {
                InsertId::Int(id) => println!("{}", id),
                InsertId::Str(id) => println!("{}", id),
            }
        }
        Commands::Import { file } => {
            microdb_cli::run_import(&conn, &file)?;
            info!("Import completed successfully");
        }
    }

    Ok(())
}
