//! Wires the pieces together: database, migrations, router, listener.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use axum::{routing::get, Extension, Router};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use url::Url;

use auth::TokenKeys;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Reject DSN schemes the server cannot drive.
fn validate_dsn_scheme(dsn: &str) -> Result<()> {
    let url = Url::parse(dsn).map_err(|e| anyhow!("Invalid database DSN '{}': {}", dsn, e))?;
    match url.scheme() {
        "sqlite" | "sqlite3" | "postgres" | "postgresql" => Ok(()),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// Resolve the final DSN: config URL, `--mock` overriding to in-memory,
/// relative sqlite paths anchored under `home_dir`.
fn resolve_dsn(db_config: &DatabaseConfig, base_dir: &Path, mock: bool) -> Result<String> {
    let config_dsn = db_config.url.trim().to_owned();
    if config_dsn.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let mut final_dsn = if mock {
        "sqlite://:memory:".to_string()
    } else {
        config_dsn
    };
    if final_dsn.starts_with("sqlite") {
        final_dsn = absolutize_sqlite_dsn(&final_dsn, base_dir, true)?;
    } else {
        validate_dsn_scheme(&final_dsn)?;
    }
    Ok(final_dsn)
}

async fn connect(dsn: &str, max_conns: Option<u32>) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(dsn.to_owned());
    opts.max_connections(max_conns.unwrap_or(10))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    tracing::info!("Connecting to database: {}", dsn);
    let db = Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {dsn}"))?;
    Ok(db)
}

/// The full application router: auth and parts-map modules under `/api`,
/// plus a health probe.
pub fn build_router(db: DatabaseConnection, keys: Arc<TokenKeys>, timeout_sec: u64) -> Router {
    let auth_service = Arc::new(auth::Service::new(db.clone(), keys.clone()));
    let ifs_service = Arc::new(ifs::Service::new(db));

    let api = Router::new()
        .merge(auth::api::rest::routes::router(auth_service))
        .merge(ifs::api::rest::routes::router(ifs_service));

    let mut router = Router::new()
        .nest("/api", api)
        .route("/healthz", get(|| async { "ok" }))
        // The bearer extractor reads the keys from request extensions.
        .layer(Extension(keys))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    if timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(timeout_sec)));
    }
    router
}

pub async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("No database configuration found"))?;

    let base_dir = PathBuf::from(&config.server.home_dir);
    let dsn = resolve_dsn(&db_config, &base_dir, args.mock)?;
    let db = connect(&dsn, db_config.max_conns).await?;

    tracing::info!("Running migrations");
    auth::infra::storage::migrations::Migrator::up(&db, None).await?;
    ifs::infra::storage::migrations::Migrator::up(&db, None).await?;

    let keys = Arc::new(TokenKeys::from_secret(
        &config.auth.jwt_secret,
        config.auth.token_ttl_secs,
    ));
    let app = build_router(db, keys, config.server.timeout_sec);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
