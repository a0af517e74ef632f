use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use common::env::{ensure_dataset, ensure_parent_dir};
use common::utils::logging::init_logging;
use configs::AppConfig;
use migration::MigratorTrait;
use service::malaria::SeaOrmMalariaRepository;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`); without a file, fall back to env vars and defaults.
pub fn load_config() -> Result<AppConfig, StartupError> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_config_from(&path)
}

/// The database URL must come from the file or `DATABASE_URL`; there is no built-in default.
fn load_config_from(path: &str) -> Result<AppConfig, StartupError> {
    let mut cfg = if Path::new(path).exists() {
        configs::load_from_file(path).map_err(|e| StartupError::InvalidConfig(format!("{path}: {e}")))?
    } else {
        AppConfig::from_env()
    };
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Connect, migrate and optionally seed; returns the handler state.
pub async fn prepare_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    if let Some(path) = models::db::sqlite_file_path(&cfg.database.url) {
        ensure_parent_dir(path).await?;
    }
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let state = ServerState::new(SeaOrmMalariaRepository::new(db), cfg.dataset.csv_path.clone());
    if cfg.dataset.import_on_start && ensure_dataset(&cfg.dataset.csv_path).await {
        match state.malaria.import_if_empty().await {
            Ok(Some(rows)) => info!(rows, path = %cfg.dataset.csv_path, "initial malaria import done"),
            Ok(None) => info!("malaria table already populated, skip import"),
            // 导入失败不阻止启动，可稍后通过 reset 重试
            Err(e) => warn!(err = %e, "initial malaria import failed"),
        }
    }
    Ok(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(err = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    init_logging(cfg.server.log_json);

    let state = prepare_state(&cfg).await?;
    let app: Router = routes::build_router(build_cors(), state);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting malaria api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
