//! HTTP surface: one `GET /` route serving the dashboard page.

mod page;
mod routes;

use crate::view::Dashboard;
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

pub use page::render_page;
pub use routes::{dashboard_handler, selection_from_query};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to serve dashboard: {0}")]
    Serve(#[from] std::io::Error),
}

pub fn build_router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(routes::dashboard_handler))
        .with_state(dashboard)
}

/// Serve until SIGTERM or SIGINT (ctrl-c elsewhere).
pub async fn serve(listener: TcpListener, dashboard: Arc<Dashboard>) -> Result<(), ServerError> {
    serve_until(listener, dashboard, shutdown_signal()).await
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve_until<F>(
    listener: TcpListener,
    dashboard: Arc<Dashboard>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(dashboard);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("shutdown requested");
        })
        .await?;
    Ok(())
}

/// Resolves on the first shutdown signal. If the handlers cannot be
/// registered the error is logged and this never resolves.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            (Err(err), _) | (_, Err(err)) => {
                error!(error = %err, "failed to register shutdown signals");
                std::future::pending::<()>().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to register ctrl-c handler");
            std::future::pending::<()>().await;
        }
    }
}
