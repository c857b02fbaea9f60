use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tokio::task::JoinHandle;

use sso_api::app::create_app;
use sso_api::routes::AppState;
use sso_api::telemetry;
use sso_core::services::{AuthService, AuthServiceConfig, BcryptHasher, EventDispatcher, EventPublisher};
use sso_infra::{
    DatabasePool, MySqlAppRepository, MySqlUserRepository, RedisClient, RedisSessionStore,
    RedisStreamPublisher, TracingEventPublisher,
};
use sso_shared::config::{AppConfig, EventSink};

/// How long shutdown waits for queued events to drain
const EVENT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.logging, config.environment);

    tracing::info!(environment = %config.environment, "Starting SSO server");

    // Credential directory
    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to MySQL")?;
    database.migrate().await.context("failed to apply schema")?;
    let user_repository = Arc::new(MySqlUserRepository::new(database.get_pool().clone()));
    let app_repository = Arc::new(MySqlAppRepository::new(database.get_pool().clone()));

    // Session store
    let redis = RedisClient::new(&config.cache)
        .await
        .context("failed to connect to Redis")?;
    report_health("mysql", database.health_check().await.unwrap_or(false));
    report_health("redis", redis.health_check().await.unwrap_or(false));

    let session_store = Arc::new(RedisSessionStore::new(
        redis.clone(),
        config.cache.key_prefix.clone(),
    ));

    let hasher = Arc::new(BcryptHasher::new(config.auth.bcrypt_cost));
    let service_config = AuthServiceConfig::from(&config.auth);

    let (auth_service, events_handle) = if config.events.enabled {
        let publisher: Arc<dyn EventPublisher> = match config.events.sink {
            EventSink::Redis => Arc::new(RedisStreamPublisher::new(
                redis.clone(),
                config.events.stream_key.clone(),
                config.events.max_stream_len,
            )),
            EventSink::Log => Arc::new(TracingEventPublisher::new()),
        };
        let (dispatcher, handle) = EventDispatcher::spawn(publisher, config.events.queue_capacity);
        tracing::info!(sink = ?config.events.sink, "User events enabled");
        (
            AuthService::with_events(
                user_repository,
                app_repository,
                session_store,
                hasher,
                dispatcher,
                service_config,
            ),
            Some(handle),
        )
    } else {
        tracing::info!("User events disabled");
        (
            AuthService::new(
                user_repository,
                app_repository,
                session_store,
                hasher,
                service_config,
            ),
            None,
        )
    };

    let app_state = web::Data::new(AppState::new(Arc::new(auth_service)));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let state = app_state.clone();
    let mut server = HttpServer::new(move || create_app(state.clone()))
        .shutdown_timeout(config.server.shutdown_timeout_secs);
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    tracing::info!("Server stopped, draining events");
    drop(app_state);
    drain_events(events_handle).await;
    database.close().await;

    Ok(())
}

fn report_health(dependency: &str, healthy: bool) {
    if healthy {
        tracing::info!(dependency, "Dependency healthy");
    } else {
        tracing::warn!(dependency, "Dependency health check failed");
    }
}

/// Wait for the event worker to publish what is still queued.
/// The worker exits once every dispatcher handle is dropped.
async fn drain_events(handle: Option<JoinHandle<()>>) {
    let Some(handle) = handle else { return };
    match tokio::time::timeout(EVENT_DRAIN_TIMEOUT, handle).await {
        Ok(Ok(())) => tracing::info!("Event queue drained"),
        Ok(Err(e)) => tracing::warn!(error = %e, "Event worker failed"),
        Err(_) => tracing::warn!("Timed out draining event queue"),
    }
}
