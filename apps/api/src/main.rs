mod catalog;
mod config;
mod db;
mod errors;
mod extract;
mod models;
mod profile;
mod routes;
mod state;
mod tracking;
mod video;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, migrate_down, migrate_up};
use crate::routes::build_router;
use crate::state::AppState;
use crate::video::token::VideoTokenIssuer;

#[derive(Parser)]
#[command(name = "careertrack", version)]
#[command(about = "Career tracking API: roles, applications, offers, milestones")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run pending migrations and start the HTTP server (default)
    Serve,
    /// Apply or revert the schema migration
    Migrate {
        #[command(subcommand)]
        direction: MigrateDirection,
    },
}

#[derive(Subcommand)]
enum MigrateDirection {
    /// Create all tables
    Up,
    /// Drop all tables, children first
    Down,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // load .env if present; ignore if missing
    let cli = Cli::parse();

    // Initialize structured logging
    let level = config::log_level();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={level},tower_http={level}",
                env!("CARGO_PKG_NAME")
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Migrate { direction } => {
            let db = create_pool(&config::require_env("DATABASE_URL")?).await?;
            match direction {
                MigrateDirection::Up => migrate_up(&db).await,
                MigrateDirection::Down => migrate_down(&db).await,
            }
        }
    }
}

async fn serve() -> Result<()> {
    let config = Config::from_env()?;
    info!("Starting careertrack API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    migrate_up(&db).await?;

    let video_tokens = VideoTokenIssuer::new(&config.video);
    info!("Serving client bundle from {}", config.static_dir.display());

    let state = AppState {
        db,
        config: config.clone(),
        video_tokens,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the client is served from a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
