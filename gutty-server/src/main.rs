use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use gutty_core::database::{PoolSettings, SqliteDatabase};
use gutty_server::{
    AppState, create_app,
    infra::config::{Config, ConfigLoad, ConfigLoader},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "gutty-server")]
#[command(
    about = "Search, statistics and image uploads for the antique golf ball catalog"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a gutty.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Env file to load instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Verify the catalog table exists and is readable, then exit
    Preflight,
    /// Apply the embedded migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Preflight) => {
                run_db_preflight(&cli.serve).await?;
                return Ok(());
            }
            Command::Db(DbCommand::Migrate) => {
                run_db_migrate(&cli.serve).await?;
                return Ok(());
            }
        }
    }

    run_server(cli.serve).await
}

async fn run_db_preflight(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let settings = PoolSettings {
        create_if_missing: false,
        ..config.database.pool_settings()
    };
    let database = SqliteDatabase::connect(&config.database.url, settings)
        .await
        .context("failed to open the catalog database for preflight")?;
    let report = database
        .preflight()
        .await
        .context("database preflight failed")?;
    info!(records = report.record_count, "Database preflight passed");
    Ok(())
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let settings = PoolSettings {
        create_if_missing: true,
        ..config.database.pool_settings()
    };
    let database = SqliteDatabase::connect(&config.database.url, settings)
        .await
        .context("failed to open the catalog database for migration")?;
    database
        .initialize_schema()
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Arc<Config>> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config.clone() {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = args.env_file.clone() {
        loader = loader.with_env_file(path);
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    Ok(Arc::new(config))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(&args)?;

    config
        .ensure_directories()
        .context("failed to create the uploads directory")?;

    let database = SqliteDatabase::connect(
        &config.database.url,
        config.database.pool_settings(),
    )
    .await
    .context("failed to open the catalog database")?;

    if config.database.run_migrations {
        database
            .initialize_schema()
            .await
            .context("database migration failed")?;
    }

    let report = database
        .preflight()
        .await
        .context("database preflight failed")?;
    info!(records = report.record_count, "Catalog ready");

    let addr = config.bind_address();
    let state = AppState::new(Arc::clone(&config), database);
    let router = create_app(state);

    info!("Starting Gutty catalog server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router).await?;

    Ok(())
}
