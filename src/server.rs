//! HTTP server initialization and runtime setup.
//!
//! Handles store connections, worker spawning, and Axum server lifecycle.

use crate::application::services::{
    IdentityProvider, JwtIdentityProvider, LinkService, LinkServiceSettings, StatsService,
};
use crate::config::{Config, StorageBackend};
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::infrastructure::persistence::{
    MemoryLinkRepository, PgLinkRepository, PgStatsRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

type Repositories = (Arc<dyn LinkRepository>, Arc<dyn StatsRepository>);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Record store (PostgreSQL with migrations, or in-memory)
/// - Background click worker
/// - Axum HTTP server
///
/// On Ctrl-C or SIGTERM the server stops accepting connections, finishes
/// in-flight requests, and waits for the click worker to drain its queue.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (link_repository, stats_repository) = build_repositories(&config).await?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let worker = tokio::spawn(run_click_worker(
        click_rx,
        link_repository.clone(),
        config.click_worker_concurrency,
        config.store_timeout(),
    ));
    tracing::info!("Click worker started");

    let settings = LinkServiceSettings {
        slug_length: config.slug_length,
        max_attempts: config.slug_max_attempts,
        store_timeout: config.store_timeout(),
    };

    let identity: Option<Arc<dyn IdentityProvider>> = match &config.auth_jwt_secret {
        Some(secret) if !config.auth_disabled => Some(Arc::new(JwtIdentityProvider::new(secret))),
        _ => None,
    };

    let state = AppState::new(
        Arc::new(LinkService::new(link_repository, click_tx, settings)),
        Arc::new(StatsService::new(stats_repository, config.store_timeout())),
        identity,
        config.public_base_url.as_str(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    // The router owns the last click sender; dropping it on shutdown lets
    // the worker finish.
    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped, draining click queue");
    if let Err(e) = worker.await {
        tracing::error!("Click worker panicked: {}", e);
    }

    Ok(())
}

async fn build_repositories(config: &Config) -> Result<Repositories> {
    match (config.storage_backend, &config.database_url) {
        (StorageBackend::Postgres, Some(database_url)) => {
            let pool = connect_with_retry(config, database_url).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            let pool = Arc::new(pool);
            let link_repository: Arc<dyn LinkRepository> =
                Arc::new(PgLinkRepository::new(pool.clone()));
            let stats_repository: Arc<dyn StatsRepository> =
                Arc::new(PgStatsRepository::new(pool));
            Ok((link_repository, stats_repository))
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL must be set for the postgres backend")
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory store; links are lost on restart");
            let store = Arc::new(MemoryLinkRepository::new());
            let link_repository: Arc<dyn LinkRepository> = store.clone();
            let stats_repository: Arc<dyn StatsRepository> = store;
            Ok((link_repository, stats_repository))
        }
    }
}

/// Connects to PostgreSQL, retrying with exponential backoff.
async fn connect_with_retry(config: &Config, database_url: &str) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout));

    // 200ms, 400ms, 800ms, ... capped at 5s
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(config.db_connect_retries);

    Retry::spawn(strategy, || {
        let options = options.clone();
        async move {
            options.connect(database_url).await.inspect_err(|e| {
                tracing::warn!("Database connection failed: {}", e);
            })
        }
    })
    .await
    .context("Failed to connect to database")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
