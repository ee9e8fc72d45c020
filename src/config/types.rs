use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_route_path")]
    pub route_path: String,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Where the todos API lives and how to authenticate against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    #[serde(default = "default_auth_header")]
    pub auth_header: String,
    #[serde(default = "default_auth_token")]
    pub auth_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub failure_mode: FailureMode,
    #[serde(default = "default_success_message")]
    pub success_message: String,
}

/// How the relay answers when the inbound body, the backend call or the
/// backend's body goes wrong.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Backend outcome is ignored; hard failures become a 500.
    #[default]
    Passthrough,
    /// Any failure, non-2xx status or falsy backend body becomes a 400.
    Report,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            route_path: default_route_path(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            auth_header: default_auth_header(),
            auth_token: default_auth_token(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            failure_mode: FailureMode::default(),
            success_message: default_success_message(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4321
}

fn default_route_path() -> String {
    "/api/todos".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_backend_url() -> String {
    "http://localhost:3000/api/todos".to_string()
}

fn default_auth_header() -> String {
    "X-Auth-Token".to_string()
}

fn default_auth_token() -> String {
    "123".to_string()
}

fn default_success_message() -> String {
    "This was a POST!".to_string()
}
