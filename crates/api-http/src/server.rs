//! HTTP Server
//!
//! Router construction and server lifecycle (start / graceful stop).

use crate::handler;
use axum::routing::{delete, get, post};
use axum::Router;
use fruits_core::application::FruitCatalog;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 8080;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Allow any origin (development only)
    pub cors_permissive: bool,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            cors_permissive: false,
        }
    }
}

/// Shared handler state; the catalog is injected, never global
#[derive(Clone)]
pub struct AppState {
    pub catalog: FruitCatalog,
}

/// Build the application router with all routes
pub fn build_router(catalog: FruitCatalog) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route(
            "/api/fruits",
            get(handler::list_fruits).delete(handler::delete_all),
        )
        .route("/api/fruits/", delete(handler::delete_all))
        .route("/api/fruits/add", post(handler::add_fruit))
        .route(
            "/api/fruits/season/{season}",
            get(handler::get_fruits_by_season),
        )
        .route(
            "/api/fruits/{key}",
            get(handler::get_fruits_by_name)
                .put(handler::update_fruit)
                .delete(handler::delete_fruit),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { catalog })
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    catalog: FruitCatalog,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, catalog: FruitCatalog) -> Self {
        Self { config, catalog }
    }

    /// Bind and start serving in a background task
    pub async fn start(self) -> Result<ServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let mut app = build_router(self.catalog);
        if self.config.cors_permissive {
            tracing::warn!("CORS: permissive mode enabled - all origins allowed");
            app = app.layer(CorsLayer::permissive());
        }

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| format!("Failed to read local address: {}", e))?;

        info!(addr = %local_addr, "HTTP server listening");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(ServerHandle {
            local_addr,
            shutdown: shutdown_tx,
            task,
        })
    }
}

/// Running server
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn stop(self) -> Result<(), String> {
        let _ = self.shutdown.send(());
        self.task
            .await
            .map_err(|e| format!("HTTP server task failed: {}", e))?
            .map_err(|e| format!("HTTP server error: {}", e))?;
        info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use fruits_core::application::DEFAULT_STORAGE_TIMEOUT;
    use fruits_core::port::SystemTimeProvider;
    use fruits_infra_sqlite::{create_pool, run_migrations, SqliteFruitRepository};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn catalog() -> FruitCatalog {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        let repo = SqliteFruitRepository::new(pool, Arc::new(SystemTimeProvider));
        FruitCatalog::new(Arc::new(repo), DEFAULT_STORAGE_TIMEOUT)
    }

    #[test]
    fn default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.port, 8080);
        assert!(!config.cors_permissive);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(catalog().await);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(health["status"], "ok");
        assert_eq!(health["fruits"], 0);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_400() {
        let app = build_router(catalog().await);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/fruits/banana")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_undecodable_lookup_is_json_400() {
        let app = build_router(catalog().await);

        for uri in ["/api/fruits/%FF", "/api/fruits/season/%FF"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(error["error"], "bad_request", "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_reserved_segment_is_not_a_name_lookup() {
        let app = build_router(catalog().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/fruits/add")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let config = HttpServerConfig {
            port: 0,
            ..Default::default()
        };
        let handle = HttpServer::new(config, catalog().await)
            .start()
            .await
            .unwrap();

        assert_ne!(handle.local_addr().port(), 0);
        handle.stop().await.unwrap();
    }
}
