//! Mock KEDB API server runner.
//!
//! Binds the `api-rest` router and serves it. The service answers with
//! canned data after an artificial delay; it exists so the CLI and any
//! other client can be exercised end to end without a real knowledge
//! base behind them.
//!
//! # Environment Variables
//! - `KEDB_API_ADDR`: server address (default: "0.0.0.0:3001")
//! - `KEDB_MOCK_DELAY_MS`: overrides both artificial response delays

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the mock KEDB API server
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("kedb_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("KEDB_API_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".into());

    tracing::info!("-- Starting KEDB mock API on {}", addr);
    tracing::info!("Available endpoints:");
    tracing::info!("  POST /api/suggested-kedbs");
    tracing::info!("  POST /api/generate-kedb");
    tracing::info!("  GET  /api/kedb/:id");

    let app = api_rest::app(api_rest::AppState::from_env());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
