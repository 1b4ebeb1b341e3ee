//! Application setup and wiring

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;

use kronium_console::{ConsoleBackends, ConsoleState, create_router};
use kronium_core::Config;
use kronium_core::application::analytics::AnalyticsSessions;
use kronium_core::config::DatabaseConfig;
use kronium_core::infrastructure::{
    CannedChatStore, JwtService, PasswordHasher, SqlxAnalyticsSource, SqlxBookingRepository,
    SqlxProjectRepository, SqlxServiceRepository, SqlxUserRepository, create_object_storage,
};

/// Handle returned from create_app for graceful shutdown coordination
pub struct AppHandle {
    pub router: Router,
    pub shutdown_token: CancellationToken,
}

async fn connect_database(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_idle.unwrap_or(0))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .max_lifetime(config.max_lifetime_seconds.map(Duration::from_secs))
        .idle_timeout(config.idle_timeout_seconds.map(Duration::from_secs))
        .connect(&config.url)
        .await
}

/// Backends over a live Postgres pool and the configured object store
pub async fn production_backends(
    config: &Config,
) -> Result<ConsoleBackends, Box<dyn std::error::Error + Send + Sync>> {
    let db_pool = Arc::new(connect_database(&config.database).await.map_err(|e| {
        tracing::error!("Failed to connect to the database: {}", e);
        e
    })?);

    if config.database.run_migrations {
        tracing::info!("Applying database migrations");
        sqlx::migrate!("./migrations").run(db_pool.as_ref()).await?;
    }

    tracing::info!(backend = ?config.storage.backend, "Initializing object storage");
    let object_storage = create_object_storage(&config.storage).await.map_err(|e| {
        tracing::error!("Failed to initialize object storage: {}", e);
        e
    })?;

    Ok(ConsoleBackends {
        user_repository: Arc::new(SqlxUserRepository::new(db_pool.clone())),
        service_repository: Arc::new(SqlxServiceRepository::new(db_pool.clone())),
        booking_repository: Arc::new(SqlxBookingRepository::new(db_pool.clone())),
        project_repository: Arc::new(SqlxProjectRepository::new(db_pool.clone())),
        analytics_source: Arc::new(SqlxAnalyticsSource::new(db_pool)),
        object_storage,
        chat_store: Arc::new(CannedChatStore::new()),
        password_hasher: Arc::new(PasswordHasher::new()),
        jwt_service: Arc::new(JwtService::new(
            config.auth.jwt_secret.clone(),
            config.auth.token_ttl_hours,
            config.auth.refresh_token_ttl_hours,
        )),
        analytics_sessions: Arc::new(AnalyticsSessions::new()),
    })
}

/// Build the router over the given backends
pub fn build_app(backends: ConsoleBackends, config: Config) -> AppHandle {
    let console_state = ConsoleState::build(backends, &config);
    let router = create_router(console_state, Arc::new(config));

    AppHandle {
        router,
        shutdown_token: CancellationToken::new(),
    }
}

/// Create the application router and return an AppHandle for shutdown coordination
pub async fn create_app(
    config: Config,
) -> Result<AppHandle, Box<dyn std::error::Error + Send + Sync>> {
    let startup_time = Instant::now();

    let backends = production_backends(&config).await?;
    let handle = build_app(backends, config);

    tracing::info!(
        elapsed_ms = startup_time.elapsed().as_millis() as u64,
        "Application initialized"
    );
    Ok(handle)
}
