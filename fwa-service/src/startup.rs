//! Application startup and lifecycle management.

use crate::config::{AssetConfig, FwaConfig};
use crate::handlers::{
    analyze::analyze_fraud, health::health_check, items::read_item, metrics::metrics,
};
use crate::middleware::metrics_middleware;
use crate::services::metrics::init_metrics;
use crate::services::providers::{CompletionProvider, OpenAiProvider};
use crate::services::FraudAnalyzer;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, get_service, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// The analyzer, and with it the completion client, is built once and
/// handed to every request; tests inject a stub provider here.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<FraudAnalyzer>,
    pub assets: AssetConfig,
}

impl AppState {
    pub fn new(analyzer: FraudAnalyzer, assets: AssetConfig) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            assets,
        }
    }

    /// Wire the OpenAI provider when a credential is configured.
    pub fn from_config(config: &FwaConfig) -> Result<Self, AppError> {
        let provider: Option<Arc<dyn CompletionProvider>> = match config.openai.provider_config()
        {
            Some(openai) => {
                let provider = OpenAiProvider::new(openai)
                    .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
                tracing::info!(
                    model = %config.openai.model,
                    base_url = %config.openai.base_url,
                    "Initialized OpenAI completion provider"
                );
                Some(Arc::new(provider) as Arc<dyn CompletionProvider>)
            }
            None => {
                tracing::warn!(
                    "OPENAI_API_KEY is not set; /analyze-fraud will fail until it is configured"
                );
                None
            }
        };

        let analyzer = FraudAnalyzer::new(provider, config.openai.generation_params());
        Ok(Self::new(analyzer, config.assets.clone()))
    }
}

/// Build the HTTP router.
pub fn build_router(state: AppState) -> Router {
    let index = ServeFile::new(state.assets.index_file());
    let assets = ServeDir::new(&state.assets.dir);

    Router::new()
        .route(
            "/analyze-fraud",
            post(analyze_fraud).layer(DefaultBodyLimit::disable()),
        )
        .route("/items/:item_id", get(read_item))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route_layer(from_fn(metrics_middleware))
        .route("/", get_service(index))
        .nest_service("/src", assets)
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: FwaConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(&config)?;
        Self::with_state(config.common.port, state).await
    }

    /// Bind a listener for an already assembled state (port 0 = random port
    /// for testing).
    pub async fn with_state(port: u16, state: AppState) -> Result<Self, AppError> {
        init_metrics();

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("FWA service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
