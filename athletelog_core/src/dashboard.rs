//! Static file server for the browser dashboard.
//!
//! `/` redirects to the dashboard page; every other path is served from the
//! configured root directory. The server runs as a background tokio task and
//! is stopped through the [`DashboardHandle`] returned by
//! [`DashboardServer::start`].

use crate::config::DashboardConfig;
use crate::Result;
use axum::{
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::services::ServeDir;

/// Entry point for starting the dashboard server
pub struct DashboardServer;

/// A running dashboard server
pub struct DashboardHandle {
    local_addr: SocketAddr,
    url: String,
    root: PathBuf,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl DashboardServer {
    /// Bind the listener and start serving in the background.
    ///
    /// Returns once the port is bound, so the URL is reachable as soon as
    /// this resolves.
    pub async fn start(config: &DashboardConfig) -> Result<DashboardHandle> {
        let root = std::path::absolute(&config.root)?;
        let router = build_router(&root, &config.path);

        let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
        let local_addr = listener.local_addr()?;
        let url = format!("http://localhost:{}{}", local_addr.port(), config.path);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = server.await {
                tracing::error!("Dashboard server failed: {}", e);
            }
        });

        tracing::info!("Dashboard serving {:?} on {}", root, local_addr);

        Ok(DashboardHandle {
            local_addr,
            url,
            root,
            shutdown_tx,
            task,
        })
    }
}

impl DashboardHandle {
    /// Address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Browser URL of the dashboard page
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Directory files are served from
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Stop accepting connections and wait for the server task to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            tracing::warn!("Dashboard server task ended abnormally: {}", e);
        }
        tracing::info!("Dashboard server on {} stopped", self.local_addr);
    }
}

fn build_router(root: &std::path::Path, dashboard_path: &str) -> Router {
    let location = dashboard_path.to_string();
    Router::new()
        .route(
            "/",
            get(move || {
                let location = location.clone();
                async move { (StatusCode::FOUND, [(LOCATION, location)]).into_response() }
            }),
        )
        .fallback_service(ServeDir::new(root))
}
