use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use common::env::ensure_env;
use configs::AppConfig;
use migration::MigratorTrait;
use service::{ClinicService, ClinicServiceImpl};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Connect, migrate and optionally seed the database, then assemble the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    ensure_env(&cfg.server.static_dir).await?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    info!(service = "server", event = "db_ready", sqlite = cfg.database.is_sqlite(), "database pool ready");
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!(service = "server", event = "migrated", "database schema up to date");
    }
    if cfg.database.seed_sample_data && models::seed::populate_sample_data(&db).await? {
        info!(service = "server", event = "seeded", "sample data loaded");
    }

    let clinic: Arc<dyn ClinicService> = Arc::new(ClinicServiceImpl::sea_orm(db));
    let state = ServerState::new(clinic);
    Ok(routes::build_router(state, build_cors(), &cfg.server.static_dir))
}

/// Resolves on Ctrl+C. If the handler cannot be installed the server keeps
/// running until killed.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(service = "server", event = "signal_unavailable", error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(service = "server", event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Serve `app` on `listener` until `shutdown` resolves, then let in-flight
/// requests finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(service = "server", event = "listening", %addr, "petclinic listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!(service = "server", event = "stopped", %addr, "petclinic stopped");
    Ok(())
}

/// Build the app from an already validated config and serve it on
/// `server.host:server.port`.
pub async fn run_with<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;
    let listener = TcpListener::bind(bind_addr(&cfg)?).await?;
    serve(listener, app, shutdown).await
}
