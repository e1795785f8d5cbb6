use axum::Router;
use log::{error, info};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::context::ServiceContext;
use crate::http::build_router;

pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    /// Prepares the backend directory, builds the service context and binds
    /// the listener.
    pub async fn bind(config: &ServerConfig) -> io::Result<Self> {
        let backend_dir = config.backend_dir_path();
        std::fs::create_dir_all(&backend_dir)?;
        info!("Backend directory: {}", backend_dir.display());

        let context = Arc::new(ServiceContext::from_config(config)?);
        // Credential logs and handoff files live here; never serve them.
        let private_dir = std::fs::canonicalize(&backend_dir)?;
        let router = build_router(context, config.static_root_path(), private_dir);

        let socket = config.bind_socket();
        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(e);
            }
        };
        info!("Server bound to {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until Ctrl-C is received.
    pub async fn start(self) -> io::Result<()> {
        info!("Starting batch bridge server on {}", self.local_addr()?);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested, finishing in-flight requests"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            // Without a signal handler, keep serving until the process is killed.
            std::future::pending::<()>().await;
        }
    }
}
