use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use shelf_store::{ConnectionError, ItemStore};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;
use crate::state::AppState;

/// Shelf item server.
///
/// Owns the store connection for the lifetime of [`serve`](Self::serve):
/// the store is connected before the listener binds and closed after the
/// last in-flight request drains.
pub struct ShelfServer {
    config: ServerConfig,
}

impl ShelfServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router over an already connected store (useful for testing).
    pub fn router(&self, store: Arc<dyn ItemStore>) -> axum::Router {
        build_router(AppState::new(store), self.config.max_body_bytes)
    }

    /// Connect the store, bind, and serve until SIGINT or SIGTERM.
    pub async fn serve(self) -> ServerResult<()> {
        let grace = Duration::from_millis(self.config.shutdown_grace_ms);
        self.serve_until(async move {
            wait_for_shutdown_signal().await;
            tracing::info!("shutdown signal received");
            tokio::time::sleep(grace).await;
        })
        .await
    }

    /// Like [`serve`](Self::serve) but stops when `shutdown` resolves.
    pub async fn serve_until<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let uri = self
            .config
            .store_uri
            .as_deref()
            .ok_or(ConnectionError::MissingUri)?;
        let store = shelf_store::connect(uri).await?;
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        self.run(listener, store, shutdown).await
    }

    /// Serve on a bound listener with a connected store, closing the store
    /// once serving stops.
    pub async fn run<F>(
        &self,
        listener: TcpListener,
        store: Arc<dyn ItemStore>,
        shutdown: F,
    ) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router(Arc::clone(&store));
        tracing::info!(
            addr = %listener.local_addr()?,
            backend = store.backend(),
            "Server is running"
        );
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;
        let closed = store.close().await;
        served?;
        closed?;
        tracing::info!("server stopped");
        Ok(())
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
                return;
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "cannot install signal handlers, using ctrl-c");
            }
        }
    }
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
