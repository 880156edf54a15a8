use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use foodgram::routes::AppState;
use foodgram::{config::Config, create_app, db, fixtures, migrate};

/// foodgram - recipe sharing platform API
#[derive(Parser)]
#[command(name = "foodgram")]
#[command(about = "Recipe publishing, favorites and shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Load the ingredient catalog from a JSON fixture
    LoadIngredients {
        /// Path to the fixture file
        path: PathBuf,
    },
    /// Load tags from a JSON fixture
    LoadTags {
        /// Path to the fixture file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    foodgram::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Migrate => migrate::migrate(&config).await,
        Commands::Reset => migrate::reset(&config).await,
        Commands::LoadIngredients { path } => load_ingredients_command(config, path).await,
        Commands::LoadTags { path } => load_tags_command(config, path).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting foodgram server...");

    let host = host_override.unwrap_or(config.server.host);
    let port = port_override.unwrap_or(config.server.port);

    let pool = db::create_pool(&config.database.url, config.database.max_connections).await?;

    let state = AppState {
        pool,
        jwt_secret: config.jwt.secret,
        jwt_lifetime_seconds: (config.jwt.expiration_days * 24 * 60 * 60) as u64,
        base_url: config.server.base_url,
        media_root: PathBuf::from(config.media.root),
        page_size: config.api.page_size,
    };

    let app = create_app(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn load_ingredients_command(config: Config, path: PathBuf) -> Result<()> {
    let pool = db::create_pool(&config.database.url, 1).await?;
    fixtures::load_ingredients(&pool, &path).await?;
    pool.close().await;

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn load_tags_command(config: Config, path: PathBuf) -> Result<()> {
    let pool = db::create_pool(&config.database.url, 1).await?;
    fixtures::load_tags(&pool, &path).await?;
    pool.close().await;

    Ok(())
}
