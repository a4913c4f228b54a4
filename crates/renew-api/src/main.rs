//! # renew-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for renewal quotes.
//! Binds to configurable port (default 8080).

use std::str::FromStr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;
use renew_api::state::{AppConfig, AppState, DEFAULT_LOOKUP_TIMEOUT};
use renew_store::{
    LicenseBackend, MemoryLicenseStore, MemorySettings, PgLicenseStore, ALLOW_UPDATE_RENEWAL,
    UPDATE_RENEWAL_DISCOUNT,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let auth_token = std::env::var("AUTH_TOKEN").ok().filter(|t| !t.is_empty());
    let lookup_timeout = std::env::var("LOOKUP_TIMEOUT_MS")
        .ok()
        .and_then(|ms| ms.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_LOOKUP_TIMEOUT);
    let config = AppConfig {
        port,
        auth_token,
        lookup_timeout,
    };
    if config.auth_token.is_none() {
        tracing::warn!("AUTH_TOKEN not set, accepting bare user ids (development mode)");
    }
    tracing::info!(?config, "configuration loaded");

    // License store: PostgreSQL when DATABASE_URL is set, otherwise in-memory.
    let backend: LicenseBackend = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let store = PgLicenseStore::connect(&url, lookup_timeout).await.map_err(|e| {
                tracing::error!("Database connection failed: {e}");
                e
            })?;
            tracing::info!("license store: postgres");
            store.into()
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using empty in-memory license store");
            MemoryLicenseStore::new().into()
        }
    };

    let settings = settings_from_env()?;

    let handle = PrometheusBuilder::new().install_recorder()?;
    let state = AppState::with_config(config, backend, settings).with_metrics(handle);
    let app = renew_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("renewal API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Seed the settings collaborator from `ALLOW_UPDATE_RENEWAL` and
/// `UPDATE_RENEWAL_DISCOUNT`. Unset variables keep the built-in defaults.
fn settings_from_env() -> Result<MemorySettings, Box<dyn std::error::Error>> {
    let settings = MemorySettings::new();

    if let Ok(raw) = std::env::var("ALLOW_UPDATE_RENEWAL") {
        let allow = matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        settings.set_bool(ALLOW_UPDATE_RENEWAL, allow);
    }

    if let Ok(raw) = std::env::var("UPDATE_RENEWAL_DISCOUNT") {
        let discount = Decimal::from_str(raw.trim())
            .map_err(|e| format!("invalid UPDATE_RENEWAL_DISCOUNT {raw:?}: {e}"))?;
        settings.set_decimal(UPDATE_RENEWAL_DISCOUNT, discount);
    }

    Ok(settings)
}
