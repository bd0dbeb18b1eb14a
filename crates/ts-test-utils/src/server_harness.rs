//! Test server harness for E2E testing
//!
//! Provides `TestTokenServer` for spawning real Token Service instances in
//! tests.

use crate::fixtures::test_config;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use token_service::config::Config;
use token_service::observability::metrics::init_metrics_recorder;
use token_service::routes::{self, AppState};

/// Test harness for spawning the Token Service in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_issue_e2e() -> Result<()> {
///     let server = TestTokenServer::spawn(config_without("LIVEKIT_URL")).await?;
///     let response = reqwest::Client::new()
///         .post(format!("{}/api/v1/media/token", server.url()))
///         .json(&serde_json::json!({"room": "r", "username": "u"}))
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 500);
///     Ok(())
/// }
/// ```
pub struct TestTokenServer {
    addr: SocketAddr,
    config: Config,
    _handle: JoinHandle<()>,
}

impl TestTokenServer {
    /// Spawn a server on a random local port using `config`.
    ///
    /// `config.bind_address` is ignored; the server always binds
    /// `127.0.0.1:0`.
    pub async fn spawn(config: Config) -> Result<Self, anyhow::Error> {
        let state = Arc::new(AppState::new(config.clone()));

        // The global recorder can only be installed once per test process;
        // later servers get a standalone handle instead.
        let metrics_handle = match init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => {
                use metrics_exporter_prometheus::PrometheusBuilder;
                PrometheusBuilder::new().build_recorder().handle()
            }
        };

        let app = routes::build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            _handle: handle,
        })
    }

    /// Spawn a fully configured server using the fixed test credentials.
    pub async fn spawn_with_test_credentials() -> Result<Self, anyhow::Error> {
        Self::spawn(test_config()).await
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get reference to the configuration the server was started with
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for TestTokenServer {
    fn drop(&mut self) {
        self._handle.abort();
    }
}
