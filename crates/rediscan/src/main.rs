mod app;
mod config;
mod handlers;
mod mock_data;
mod state;
mod store;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rediscan_core::store::ListStore;

use crate::{app::create_app, config::Config, state::AppState, store::RedisListStore};

/// RediScan - Browse Redis lists one element at a time
#[derive(Parser, Debug)]
#[command(name = "rediscan")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "8080", env = "PORT")]
    port: u16,

    /// Serve seeded in-memory demo lists instead of connecting to Redis
    #[arg(long, env = "DEMO_MODE")]
    demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rediscan=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::debug!(
        max_lists = config.max_lists,
        max_preload_size = config.max_preload_size,
        scan_pattern = %config.scan_pattern,
        "Loaded configuration"
    );

    let state = if cli.demo {
        tracing::info!("Demo mode: serving in-memory lists");
        AppState::with_demo_data(&config).await
    } else {
        AppState::new(init_redis_store(&config).await?, &config)
    };

    let app = create_app(state, config.request_timeout());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

const STARTUP_PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Create the Redis store and check connectivity.
///
/// An unreachable Redis is only a warning: the server starts anyway and
/// reports store errors per request until Redis comes up.
async fn init_redis_store(config: &Config) -> Result<Arc<dyn ListStore>> {
    let store = RedisListStore::new(&config.redis_url())?;

    match tokio::time::timeout(STARTUP_PING_TIMEOUT, store.ping()).await {
        Ok(Ok(())) => {
            tracing::info!(addr = %config.redis_addr, db = config.redis_db, "Connected to Redis")
        }
        Ok(Err(err)) => tracing::warn!(
            addr = %config.redis_addr,
            error = %err,
            "Could not connect to Redis"
        ),
        Err(_) => tracing::warn!(
            addr = %config.redis_addr,
            timeout_secs = STARTUP_PING_TIMEOUT.as_secs(),
            "Timed out connecting to Redis"
        ),
    }

    Ok(Arc::new(store))
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
