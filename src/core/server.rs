//! Service runtime: binds the two backends and serves them until shutdown.

use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::core::config::ServerConfig;
use crate::core::observability::spawn_metrics_log_reporter;
use crate::http::{AppState, notes_router, todos_router};

/// Both backends, bound and ready to serve
pub struct Services {
    todos: TcpListener,
    notes: TcpListener,
    state: AppState,
    config: ServerConfig,
}

impl Services {
    /// Bind the configured addresses. Port 0 picks a free port.
    pub async fn bind(config: ServerConfig, state: AppState) -> Result<Self> {
        let todos = TcpListener::bind(config.todos_addr)
            .await
            .with_context(|| format!("Failed to bind to-do backend on {}", config.todos_addr))?;
        let notes = TcpListener::bind(config.notes_addr)
            .await
            .with_context(|| format!("Failed to bind notes backend on {}", config.notes_addr))?;

        Ok(Self {
            todos,
            notes,
            state,
            config,
        })
    }

    pub fn todos_addr(&self) -> Result<SocketAddr> {
        Ok(self.todos.local_addr()?)
    }

    pub fn notes_addr(&self) -> Result<SocketAddr> {
        Ok(self.notes.local_addr()?)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let todos_addr = self.todos_addr()?;
        let notes_addr = self.notes_addr()?;
        info!("To-do backend running on http://{}", todos_addr);
        info!("Notes backend running on http://{}", notes_addr);

        let reporter = self
            .config
            .metrics_log_interval()
            .map(|interval| spawn_metrics_log_reporter(self.state.metrics.clone(), interval));

        let (stop_tx, stop_rx) = watch::channel(false);
        tokio::spawn(async move {
            shutdown.await;
            info!("Shutdown requested");
            let _ = stop_tx.send(true);
        });

        let todos = axum::serve(self.todos, todos_router(self.state.clone()))
            .with_graceful_shutdown(stopped(stop_rx.clone()));
        let notes = axum::serve(self.notes, notes_router(self.state))
            .with_graceful_shutdown(stopped(stop_rx));

        let result = tokio::try_join!(async { todos.await }, async { notes.await });

        if let Some(reporter) = reporter {
            reporter.abort();
        }

        match result {
            Ok(_) => {
                info!("Services stopped");
                Ok(())
            }
            Err(e) => {
                warn!("Service failed: {}", e);
                Err(e).context("HTTP server error")
            }
        }
    }
}

fn stopped(mut rx: watch::Receiver<bool>) -> impl Future<Output = ()> + Send + 'static {
    async move {
        let _ = rx.wait_for(|stop| *stop).await;
    }
}
