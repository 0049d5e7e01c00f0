//! HTTP server startup.

use std::future::{IntoFuture, pending};
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::config::ServerConfig;
use crate::server::lifecycle::serve_with_shutdown;
use crate::server::{Result, ServerError, shutdown_signal};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds to the configured address and serves `app` until a shutdown signal.
///
/// After the signal, in-flight requests get `shutdown_timeout` to finish;
/// whatever is still running then is dropped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
/// while running.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> Result<()> {
    let server_addr = server_config.server_addr();

    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "Failed to bind to address"
        );
        ServerError::bind_error(server_addr, err)
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "Server is ready and listening for connections"
    );

    let shutdown_timeout = server_config.shutdown_timeout();
    let (signaled_tx, signaled_rx) = oneshot::channel();
    let signal = async move {
        shutdown_signal(shutdown_timeout).await;
        let _ = signaled_tx.send(());
    };

    serve_with_shutdown(&server_config, || async move {
        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .into_future();

        tokio::select! {
            result = serve => result,
            () = drain_deadline(signaled_rx, shutdown_timeout) => {
                tracing::warn!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    timeout_secs = shutdown_timeout.as_secs(),
                    "Shutdown timeout elapsed, dropping in-flight requests"
                );
                Ok(())
            }
        }
    })
    .await
    .map_err(ServerError::Runtime)
}

/// Resolves `timeout` after the shutdown signal fired.
async fn drain_deadline(signaled: oneshot::Receiver<()>, timeout: Duration) {
    if signaled.await.is_err() {
        pending::<()>().await;
    }

    tokio::time::sleep(timeout).await;
}
