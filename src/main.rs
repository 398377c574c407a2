//! Kimiyomi service entry point.
//!
//! Loads configuration, connects to PostgreSQL, wires every handler over
//! the production adapters, and runs the subscription expiry sweeper until
//! interrupted. Route wiring is left to the embedding HTTP service, which
//! takes `Services` as its state.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kimiyomi::adapters::{
    Argon2PasswordHasher, JwtTokenAuthority, LocalFileStorage, PostgresContentRepository,
    PostgresSubscriptionRepository, PostgresUserRepository, StripeGatewayConfig,
    StripePaymentGateway, SystemClock,
};
use kimiyomi::application::{ExpirySweeper, ExpirySweeperConfig, Ports, Services};
use kimiyomi::ports::Clock;
use kimiyomi::config::{AppConfig, ServerConfig};

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(environment = ?config.server.environment, "Kimiyomi starting");

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!("Database connection established");

    if config.database.run_migrations {
        kimiyomi::adapters::postgres::run_migrations(&pool).await?;
    }

    tokio::fs::create_dir_all(&config.storage.root_dir).await?;

    let stripe = StripeGatewayConfig::new(config.payment.stripe_api_key.clone())
        .with_base_url(config.payment.api_base_url.clone())
        .with_price_ids(
            config.payment.basic_price_id.clone(),
            config.payment.premium_price_id.clone(),
        );
    if config.payment.is_test_mode() {
        tracing::warn!("Stripe is in test mode");
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let services = Services::new(Ports {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        contents: Arc::new(PostgresContentRepository::new(pool.clone())),
        payment: Arc::new(StripePaymentGateway::new(stripe)),
        storage: Arc::new(LocalFileStorage::new(config.storage.root_dir.clone())),
        tokens: Arc::new(JwtTokenAuthority::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl(),
            clock.clone(),
        )),
        hasher: Arc::new(Argon2PasswordHasher::new()),
        clock,
    });
    tracing::info!(
        storage_root = %config.storage.root_dir.display(),
        token_ttl_hours = config.auth.token_ttl().num_hours(),
        "Services wired"
    );

    let sweeper = ExpirySweeper::with_config(
        services.sweep.clone(),
        ExpirySweeperConfig::default().with_interval(config.sweeper.interval()),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper_task = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    let _ = shutdown_tx.send(true);
    sweeper_task.await?;
    pool.close().await;

    tracing::info!("Kimiyomi stopped");
    Ok(())
}
