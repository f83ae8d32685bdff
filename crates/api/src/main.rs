mod config;
mod error;
mod handlers;
mod middleware;
mod state;
mod stores;
#[cfg(test)]
mod test_utils;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::http;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    state::AppState,
    stores::{KeyValueStore, MemoryKeyValueStore, RedisKeyValueStore, Stores},
};

#[derive(Parser)]
#[command(name = "api")]
#[command(about = "Alarm panel remote-control API server")]
struct Args {
    /// Turn every area off and exit
    #[arg(long)]
    deactivate_all: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider before any TLS operations (rediss://)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let args = Args::parse();
    let config = envy::prefixed("ALARM_").from_env::<Config>()?;

    // Initialize Sentry for error tracking (must be done early, guard must stay alive)
    let _sentry_guard = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: Some(config.env.clone().into()),
                ..Default::default()
            },
        ))
    });

    // Set up tracing: JSON in production, human-readable otherwise
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .init();
    }

    let kv: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisKeyValueStore::new(redis::Client::open(url.as_str())?)),
        None if config.is_production() => {
            anyhow::bail!("ALARM_REDIS_URL must be set in production");
        }
        None => {
            tracing::warn!("ALARM_REDIS_URL not set, keeping state in process memory");
            Arc::new(MemoryKeyValueStore::new())
        }
    };

    let stores = Stores::new(kv, config.branch.as_deref());

    // Operational reset via --deactivate-all
    if args.deactivate_all {
        stores.areas.deactivate_all().await?;
        tracing::info!("All areas deactivated");
        return Ok(());
    }

    if config.local_pin.as_deref().is_none_or(str::is_empty) {
        tracing::error!("ALARM_LOCAL_PIN not set, every PIN-gated request will fail");
    }

    let state = AppState {
        config: config.clone(),
        stores,
    };

    // Request ID header name
    let x_request_id = http::HeaderName::from_static("x-request-id");

    let app = handlers::router()
        .with_state(state)
        // Request ID: generate UUID, include in logs, return in response
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &http::Request<axum::body::Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            },
        ))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB limit

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
