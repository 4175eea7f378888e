//! Web server for fsbrowse.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use tokio::signal;

use crate::config::{Config, TlsConfig, WebConfig};
use crate::{FsBrowseError, Result};

use super::handlers::AppState;
use super::router::create_app;

/// Grace period for in-flight requests after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Web configuration.
    web_config: WebConfig,
    /// TLS configuration.
    tls_config: TlsConfig,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, app_state: Arc<AppState>) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| {
                FsBrowseError::Config(format!(
                    "invalid listen address {}:{}: {e}",
                    config.server.host, config.server.port
                ))
            })?;

        Ok(Self {
            addr,
            app_state,
            web_config: config.web.clone(),
            tls_config: config.tls.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server until Ctrl-C or SIGTERM.
    pub async fn run(self) -> Result<()> {
        let handle = Handle::new();
        tokio::spawn(shutdown_signal(handle.clone()));
        self.serve(handle).await
    }

    /// Run the web server until `handle` is shut down.
    pub async fn serve(self, handle: Handle) -> Result<()> {
        let tls = self.tls_config.enabled;
        let app = create_app(self.app_state, &self.web_config, tls).into_make_service();

        if tls {
            let rustls = RustlsConfig::from_pem_file(
                &self.tls_config.cert_file,
                &self.tls_config.key_file,
            )
            .await
            .map_err(|e| {
                FsBrowseError::Tls(format!(
                    "failed to load certificate {} / key {}: {e}",
                    self.tls_config.cert_file, self.tls_config.key_file
                ))
            })?;

            tracing::info!(addr = %self.addr, "Web server listening on https://{}", self.addr);
            axum_server::bind_rustls(self.addr, rustls)
                .handle(handle)
                .serve(app)
                .await?;
        } else {
            tracing::warn!("TLS disabled, session cookies require HTTPS in browsers");
            tracing::info!(addr = %self.addr, "Web server listening on http://{}", self.addr);
            axum_server::bind(self.addr).handle(handle).serve(app).await?;
        }

        tracing::info!("Web server stopped");
        Ok(())
    }
}

async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
