use axum::Router;
use configs::{AppConfig, ServiceKind};
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes;
use crate::state::{CompanyState, StockState};

async fn shutdown_signal(kind: ServiceKind) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(service = kind.name(), event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Build the router for `kind` on top of an open connection.
pub fn build_app(kind: ServiceKind, db: sea_orm::DatabaseConnection) -> Router {
    match kind {
        ServiceKind::Company => routes::build_company_router(CompanyState::from_db(db)),
        ServiceKind::Stock => routes::build_stock_router(StockState::from_db(db)),
    }
}

/// Connect, migrate if configured, bind and serve until Ctrl+C.
pub async fn serve(kind: ServiceKind, cfg: AppConfig) -> anyhow::Result<()> {
    let db_cfg = models::db::DatabaseConfig::from_settings(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg).await?;

    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!(service = kind.name(), event = "schema_ready", "migrations applied");
    }

    let app = build_app(kind, db);

    let server = cfg.server(kind);
    let listener = TcpListener::bind((server.host.as_str(), server.port)).await?;
    let addr = listener.local_addr()?;
    info!(service = kind.name(), %addr, "listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal(kind)).await?;
    info!(service = kind.name(), event = "stopped", "server stopped");
    Ok(())
}
