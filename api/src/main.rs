use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use tg_api::app::create_app;
use tg_api::routes::auth::AppState;
use tg_api::telemetry::init_telemetry;
use tg_core::services::{
    AuthService, AuthServiceConfig, ExpirySweeper, KeyMaterial, PasswordHasher, TokenCodec,
};
use tg_infra::{
    DatabasePool, MySqlAccountRepository, MySqlRefreshTokenRepository, MySqlRevocationRepository,
};
use tg_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_telemetry(&config.logging).context("Failed to initialise logging")?;
    config.validate().context("Invalid configuration")?;

    info!(environment = %config.environment, "Starting TokenGate API server");

    // Storage
    let database = DatabasePool::new(config.database.clone())
        .await
        .context("Failed to connect to database")?;
    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("Failed to run database migrations")?;
    }

    // Signing keys are loaded once and shared read-only
    let auth = &config.auth;
    let keys = if auth.generate_keys_if_missing {
        KeyMaterial::load_or_generate(&auth.private_key_path, &auth.public_key_path, auth.key_bits)
    } else {
        KeyMaterial::load(&auth.private_key_path, &auth.public_key_path)
    }
    .context("Failed to prepare signing keys")?;
    info!(bits = keys.modulus_bits(), "Signing keys ready");

    let codec = Arc::new(TokenCodec::new(Arc::new(keys), auth.issuer.clone()));

    let pool = database.get_pool().clone();
    let accounts = Arc::new(MySqlAccountRepository::new(pool.clone()));
    let refresh_tokens = Arc::new(MySqlRefreshTokenRepository::new(pool.clone()));
    let revocations = Arc::new(MySqlRevocationRepository::new(pool));

    let auth_service = Arc::new(AuthService::new(
        accounts,
        Arc::clone(&refresh_tokens),
        Arc::clone(&revocations),
        codec,
        PasswordHasher::new(auth.bcrypt_cost),
        AuthServiceConfig::from(auth),
    ));

    let sweeper = Arc::new(ExpirySweeper::new(
        refresh_tokens,
        revocations,
        config.sweeper.clone(),
    ));
    let sweeper_handle = sweeper.start();

    let app_state = web::Data::new(AppState::new(auth_service));
    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Binding HTTP server");

    let mut server = HttpServer::new(move || create_app(app_state.clone()))
        .shutdown_timeout(config.server.shutdown_timeout_secs);
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped, shutting down background tasks");
    sweeper_handle.stop().await;
    database.close().await;

    Ok(())
}
