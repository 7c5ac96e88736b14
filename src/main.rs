/// Forkful - Main application entry point.
///
/// Server-rendered recipe sharing application using Axum, Diesel and Askama.
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forkful::config::{Config, LogFormat};
use forkful::db::create_pool;
use forkful::services::auth::AuthService;
use forkful::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from TOML files
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    // Initialize tracing based on configuration
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("forkful={},tower_http=info", config.logging.level).into());

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    tracing::info!(
        environment = %config.environment.as_str(),
        "Starting Forkful"
    );

    // Database pool; connections are established lazily on first use
    let db_pool = create_pool(&config)?;

    // Session token signing and password hashing
    let auth_service = AuthService::new(&config)?;

    let state = AppState {
        config: config.clone(),
        db_pool,
        auth_service,
    };

    let router = app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        eprintln!("Failed to bind to {}: {}", addr, e);
        e
    })?;

    tracing::info!(address = %addr, "HTTP server listening");

    axum::serve(listener, router).await?;

    Ok(())
}
