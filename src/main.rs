//! Giasu API server.

use std::error::Error;
use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::signal;

use giasu::adapters::ai::{OpenAIConfig, OpenAIProvider};
use giasu::adapters::auth::{SupabaseJwtConfig, SupabaseJwtValidator};
use giasu::adapters::http::{build_router, AppState, RouterConfig};
use giasu::adapters::postgres::{
    PostgresPaymentRepository, PostgresQuotaRepository, PostgresSubscriptionRepository,
    PostgresUserRepository,
};
use giasu::config::AppConfig;
use giasu::logging::init_logging;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // The subscriber may not be installed yet
        eprintln!("giasu: {e}");
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_logging(&config.server.log_level, config.server.json_logs())?;
    tracing::info!(environment = ?config.server.environment, "starting giasu");

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(config.database.url.expose_secret())
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let ai = OpenAIProvider::new(
        OpenAIConfig::from_secret(config.ai.openai_api_key.clone())
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    )?;

    let mut jwt = SupabaseJwtConfig::new(config.auth.jwt_secret.clone())
        .with_audience(config.auth.audience.clone());
    if let Some(issuer) = &config.auth.issuer {
        jwt = jwt.with_issuer(issuer.clone());
    }

    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        quotas: Arc::new(PostgresQuotaRepository::new(pool.clone())),
        payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        ai: Arc::new(ai),
        sessions: Arc::new(SupabaseJwtValidator::new(jwt)),
        policy: config.quota.policy(),
        calendar: config.quota.calendar()?,
        bank: config.payment.bank_account(),
        ai_max_tokens: config.ai.max_tokens,
    };

    let router = build_router(
        state,
        &RouterConfig {
            cors_origins: config.server.cors_origins_list(),
            request_timeout: config.server.request_timeout(),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

    tracing::info!("shutdown signal received");
}
