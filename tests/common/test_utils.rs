use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use serde_json::Value;
use std::{
    io,
    sync::{Arc, Mutex},
};
use todo_relay::{
    backend::TodoBackend,
    config::{BackendConfig, FailureMode, RelayConfig},
    server::{handlers::AppState, router},
};
use tracing_subscriber::fmt::MakeWriter;
use wiremock::MockServer;

pub const ROUTE_PATH: &str = "/api/todos";

/// Build the relay router around any backend implementation
pub fn create_test_app(backend: Arc<dyn TodoBackend>, failure_mode: FailureMode) -> Router {
    let relay = RelayConfig {
        failure_mode,
        ..RelayConfig::default()
    };
    router(AppState::new(backend, relay), ROUTE_PATH)
}

/// POST a raw body to the relay route
pub fn relay_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(ROUTE_PATH)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Backend config pointing at a wiremock server, with the default credentials
pub fn backend_config_for(server: &MockServer) -> BackendConfig {
    BackendConfig {
        url: format!("{}{}", server.uri(), ROUTE_PATH),
        ..BackendConfig::default()
    }
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  route_path: "/relay"
  logs:
    level: "debug"

backend:
  url: "http://todos.internal:3000/api/todos"
  auth_header: "X-Api-Key"
  auth_token: "s3cret"

relay:
  failure_mode: report
  success_message: "Relayed"
"#;

/// Configuration that only overrides a couple of keys
pub const PARTIAL_CONFIG_YAML: &str = r#"
backend:
  auth_token: "456"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"

relay:
  failure_mode: "shrug"
"#;

/// In-memory sink for a JSON tracing subscriber
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Subscriber writing JSON lines into this buffer, to be installed with
    /// `tracing::subscriber::set_default` on a current-thread runtime
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::INFO)
            .with_writer(self.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
