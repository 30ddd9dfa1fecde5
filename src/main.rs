use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use item_data_api::{app, config, state::AppState};

#[derive(Parser)]
#[command(name = "item-data-api")]
#[command(about = "Item and user management REST API")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Port to listen on (overrides API_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Postgres connection string (overrides DATABASE_URL)")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, API_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = config::config().clone();
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    if let Some(url) = cli.database_url {
        config.database.url = Some(url);
    }
    tracing::info!("Starting item-data-api in {:?} mode", config.environment);

    let state = AppState::from_config(&config.database)
        .await
        .context("failed to initialize the store")?;
    state
        .user_service
        .seed_superadmin()
        .await
        .context("failed to seed superadmin")?;
    tracing::warn!("Passwords are stored and compared as plain text; do not expose this service publicly");

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("started on port {} (http) with context path '/'", config.api.port);

    let database = state.database.clone();
    axum::serve(listener, app(state, &config))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await
        .context("server error")?;

    if let Some(database) = database {
        database.close().await;
    }
    Ok(())
}
