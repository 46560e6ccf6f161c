pub mod api;
pub mod config;
pub mod db;
pub mod error;

use std::any::Any;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Instant;

use axum::handler::HandlerWithoutStateExt;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Database;
use crate::error::AppError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            started_at: Instant::now(),
        }
    }
}

/// Turn a handler panic into a generic 500 response
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(detail).into_response()
}

/// Build the application router.
///
/// When `static_dir` is given, files under it are served for any path the API
/// does not match; anything else falls through to the JSON 404. A known path
/// hit with an unsupported method gets the same JSON 404.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .merge(api::router())
        .method_not_allowed_fallback(api::not_found);

    let router = match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).not_found_service(api::not_found.into_service()),
        ),
        None => router.fallback(api::not_found),
    };

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        )
        .with_state(state)
}

/// A running server.
///
/// [`Server::stop`] stops accepting connections, lets in-flight requests
/// finish and then closes the database.
pub struct Server {
    local_addr: SocketAddr,
    db: Database,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl Server {
    /// Open storage, bind the listener and start serving in the background
    pub async fn start(config: &Config) -> anyhow::Result<Self> {
        let db = Database::connect(&config.database_path).await?;
        db.init_schema().await?;

        let static_dir = match config.static_dir.as_deref() {
            Some(dir) if dir.is_dir() => Some(dir),
            Some(dir) => {
                tracing::warn!("Static directory {} not found, skipping", dir.display());
                None
            }
            None => None,
        };
        let router = app(AppState::new(db.clone()), static_dir);

        let addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tracing::info!("Server listening on {}", local_addr);

        Ok(Self {
            local_addr,
            db,
            shutdown,
            task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Drain in-flight requests, then close the database
    pub async fn stop(self) -> anyhow::Result<()> {
        let _ = self.shutdown.send(());
        finish(self.task, &self.db).await
    }
}

/// Wait for the serve task, then close storage even if serving failed
async fn finish(task: JoinHandle<std::io::Result<()>>, db: &Database) -> anyhow::Result<()> {
    let served = task.await;
    match &served {
        Ok(Ok(())) => tracing::info!("Server closed"),
        Ok(Err(e)) => tracing::error!("Server stopped with error: {}", e),
        Err(e) => tracing::error!("Server task failed: {}", e),
    }
    db.close().await;
    served??;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
}

/// Run the server with the given configuration until a shutdown signal arrives
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let server = Server::start(&config).await?;
    tracing::info!("Health check: http://{}/health", server.local_addr());

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, shutting down gracefully");

    server.stop().await
}
