use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use buildboard_api::config::{DatabaseConfig, ServerConfig};
use buildboard_api::router::build_app_router;
use buildboard_api::state::AppState;
use buildboard_db::DbPool;

const DEFAULT_LOG_FILTER: &str = "buildboard_api=debug,buildboard_db=info,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = config.port, "Loaded server configuration");

    let pool = connect_database(&DatabaseConfig::from_env()).await;
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be an IP address"),
        config.port,
    );
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!(%addr, "BuildBoard API listening");

    serve(listener, app, Duration::from_secs(config.shutdown_timeout_secs)).await;
    tracing::info!("Shutdown complete");
}

/// `RUST_LOG` wins when set; otherwise [`DEFAULT_LOG_FILTER`].
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify reachability, and bring the schema up to date.
async fn connect_database(db: &DatabaseConfig) -> DbPool {
    let pool = buildboard_db::create_pool(&db.url, db.max_connections)
        .await
        .expect("Failed to connect to database");
    buildboard_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    buildboard_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!(max_connections = db.max_connections, "Database ready");
    pool
}

/// Serve until a shutdown signal, then give open connections `drain` to
/// finish before aborting them.
async fn serve(listener: TcpListener, app: axum::Router, drain: Duration) {
    let draining = Arc::new(Notify::new());
    let signal = Arc::clone(&draining);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                signal.notify_one();
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            result.expect("Server task panicked").expect("Server error");
        }
        () = draining.notified() => {
            match tokio::time::timeout(drain, &mut server).await {
                Ok(result) => result.expect("Server task panicked").expect("Server error"),
                Err(_) => {
                    tracing::warn!(
                        drain_secs = drain.as_secs(),
                        "Connections still open after drain window, aborting"
                    );
                    server.abort();
                }
            }
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let source = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal = source, "Shutdown signal received, draining connections");
}
