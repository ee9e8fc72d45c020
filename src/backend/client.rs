use super::types::*;
use crate::{Error, Result, config::BackendConfig};
use async_trait::async_trait;
use reqwest::{
    Url,
    header::{CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;
use tracing::debug;

#[async_trait]
pub trait TodoBackend: Send + Sync {
    /// Sends one request to the todos API and returns whatever it answered.
    /// A non-2xx status is not an error here.
    async fn forward(&self, method: TodoMethod, data: Option<&Value>) -> Result<BackendReply>;
}

pub struct HttpTodoBackend {
    client: reqwest::Client,
    url: Url,
    headers: HeaderMap,
}

impl HttpTodoBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let url = Url::parse(&config.url)
            .map_err(|e| Error::config(format!("Invalid backend url '{}': {}", config.url, e)))?;

        let auth_header = HeaderName::from_bytes(config.auth_header.as_bytes()).map_err(|e| {
            Error::config(format!(
                "Invalid auth header name '{}': {}",
                config.auth_header, e
            ))
        })?;
        let mut auth_token = HeaderValue::from_str(&config.auth_token)
            .map_err(|e| Error::config(format!("Invalid auth token: {}", e)))?;
        auth_token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(auth_header, auth_token);

        debug!("Creating todos backend client for: {}", url);

        Ok(Self {
            client: reqwest::Client::new(),
            url,
            headers,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl TodoBackend for HttpTodoBackend {
    async fn forward(
        &self,
        method: TodoMethod,
        data: Option<&Value>,
    ) -> Result<BackendReply> {
        debug!("Forwarding {} to {}", method, self.url);

        let mut request = self
            .client
            .request(method.into(), self.url.clone())
            .headers(self.headers.clone());

        // An absent payload goes out with no body at all; an explicit null
        // is sent as the literal `null`.
        if let Some(data) = data {
            request = request.body(serde_json::to_vec(data)?);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        let body = serde_json::from_slice(&bytes).map_err(|e| {
            Error::backend_response(status, format!("body is not valid JSON: {}", e))
        })?;

        debug!("Todos backend answered with status {}", status);

        Ok(BackendReply { status, body })
    }
}
