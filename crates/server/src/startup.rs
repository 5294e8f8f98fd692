use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use configs::AppConfig;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerAuthConfig, ServerState};
use service::subscription::{
    validator::build_client, HttpReferenceValidator, SeaOrmSubscriptionRepository, SubscriptionService,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Wire the service graph around an open database connection.
pub fn build_state(cfg: &AppConfig, db: DatabaseConnection) -> anyhow::Result<ServerState> {
    let client = build_client(cfg.registries.timeout_secs.map(Duration::from_secs))?;
    let customers = HttpReferenceValidator::customers(client.clone(), &cfg.registries.customer_base_url);
    let vehicles = HttpReferenceValidator::vehicles(client, &cfg.registries.vehicle_base_url);
    let repo = SeaOrmSubscriptionRepository::new(db);
    let subscriptions = SubscriptionService::new(Arc::new(repo), Arc::new(customers), Arc::new(vehicles));
    Ok(ServerState {
        subscriptions: Arc::new(subscriptions),
        auth: ServerAuthConfig { jwt_secret: cfg.auth.jwt_secret.clone() },
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(err = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: open the store, build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_db_dir(&cfg.database.url).await?;

    let db = models::db::connect_and_bootstrap(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    let state = build_state(&cfg, db.clone())?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg).map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    info!(%addr, customer_registry = %cfg.registries.customer_base_url, vehicle_registry = %cfg.registries.vehicle_base_url, "starting abonnement server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    info!(event = "db_closed", "database connection closed");
    Ok(())
}
