//! Application setup and server configuration.

use std::io::ErrorKind;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{deep_analysis_handler, health_handler, plan_handler};

/// How many times a port conflict is retried before startup gives up.
pub const MAX_BIND_RETRIES: u32 = 3;
const BIND_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps) -> Router {
    let app_state = AxumAppState {
        deps: Arc::new(deps),
    };

    // CORS configuration - allow any origin (the UI is served separately)
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/plan", post(plan_handler))
        .route("/api/deepAnalysis", post(deep_analysis_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr`, retrying while the port is in use.
///
/// Any other bind error, or a conflict that outlasts the retries, is returned.
pub async fn bind_with_retry(addr: &str, max_retries: u32, delay: Duration) -> Result<TcpListener> {
    let mut retries = 0;

    loop {
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == ErrorKind::AddrInUse && retries < max_retries => {
                retries += 1;
                tracing::warn!(
                    addr = %addr,
                    retry = retries,
                    max_retries,
                    "Port in use, retrying..."
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to bind to {}", addr));
            }
        }
    }
}

/// Bind with the default retry policy and serve until the process ends.
pub async fn serve(deps: ServerDeps, addr: &str) -> Result<()> {
    let listener = bind_with_retry(addr, MAX_BIND_RETRIES, BIND_RETRY_DELAY).await?;
    tracing::info!(addr = %listener.local_addr()?, "Orchid server running");

    axum::serve(listener, build_app(deps))
        .await
        .context("Server error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_gives_up_after_retries() {
        let holder = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = holder.local_addr().unwrap().to_string();

        let err = bind_with_retry(&addr, 2, Duration::from_millis(5))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to bind"));
    }

    #[tokio::test]
    async fn bind_succeeds_once_port_frees_up() {
        let holder = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = holder.local_addr().unwrap().to_string();

        let release = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            drop(holder);
        });

        let listener = bind_with_retry(&addr, 10, Duration::from_millis(20))
            .await
            .unwrap();

        assert_eq!(listener.local_addr().unwrap().to_string(), addr);
        release.await.unwrap();
    }
}
