use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use configs::AppConfig;
use service::restaurant::{repo::SeaOrmRestaurantRepository, RestaurantRepository, RestaurantService};

use crate::errors::StartupError;
use crate::routes::{self, auth};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Assemble the router over any repository implementation.
pub fn app(repo: Arc<dyn RestaurantRepository>, jwt_secret: &str, page_size: u64) -> Router {
    let state = auth::ServerState {
        restaurants: Arc::new(RestaurantService::new(repo, page_size)),
        auth: auth::ServerAuthConfig::new(jwt_secret),
    };
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c listener failed; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Connect, migrate, and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let repo: Arc<dyn RestaurantRepository> = Arc::new(SeaOrmRestaurantRepository::new(db));
    let app = app(repo, &cfg.auth.jwt_secret, cfg.pagination.page_size);

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, page_size = cfg.pagination.page_size, "data api listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
