#![allow(dead_code)]

use fwa_service::config::AssetConfig;
use fwa_service::services::providers::{CompletionProvider, GenerationParams};
use fwa_service::services::FraudAnalyzer;
use fwa_service::startup::{build_router, AppState, Application};
use axum::Router;
use std::sync::Arc;
use tempfile::TempDir;

pub const LANDING_PAGE: &str = "<html><body>FWA landing</body></html>";
pub const SCRIPT: &str = "console.log('fwa');";

/// Temporary assets directory with an index page and one script.
pub fn assets() -> (TempDir, AssetConfig) {
    let dir = tempfile::tempdir().expect("Failed to create assets dir");
    std::fs::write(dir.path().join("index.html"), LANDING_PAGE).expect("write index");
    std::fs::write(dir.path().join("app.js"), SCRIPT).expect("write script");
    let config = AssetConfig {
        dir: dir.path().to_path_buf(),
    };
    (dir, config)
}

pub fn state(provider: Option<Arc<dyn CompletionProvider>>, assets: AssetConfig) -> AppState {
    AppState::new(
        FraudAnalyzer::new(provider, GenerationParams::default()),
        assets,
    )
}

/// In-process router for `oneshot` tests.
pub fn router(provider: Option<Arc<dyn CompletionProvider>>) -> (TempDir, Router) {
    let (dir, assets) = assets();
    (dir, build_router(state(provider, assets)))
}

pub struct TestApp {
    pub address: String,
    // Keeps the assets directory alive for the lifetime of the server.
    _assets: Option<TempDir>,
}

impl TestApp {
    /// Serve `state` on a random port.
    pub async fn spawn(state: AppState, assets: Option<TempDir>) -> Self {
        let app = Application::with_state(0, state)
            .await
            .expect("Failed to build test application");
        Self::run(app, assets).await
    }

    pub async fn run(app: Application, assets: Option<TempDir>) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            _assets: assets,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}
