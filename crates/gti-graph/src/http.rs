//! HTTPS session over `reqwest`.
//!
//! One client per invocation. The API key travels in the `x-apikey` header
//! and every round trip is bounded by the configured timeout.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;

use gti_core::config::ApiConfig;
use gti_core::GtiError;

use crate::error::{GraphError, Result};
use crate::session::{ApiResponse, Session, SessionFactory};

/// Session backed by a pooled HTTP client.
pub struct HttpSession {
    client: Mutex<Option<Client>>,
    base_url: String,
}

impl HttpSession {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let key = config.require_key()?;

        let mut key_value = HeaderValue::from_str(key)
            .map_err(|e| GtiError::Config(format!("invalid API key header value: {e}")))?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-apikey", key_value);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| GtiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client: Mutex::new(Some(client)),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn client(&self) -> Option<Client> {
        self.client
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Session for HttpSession {
    async fn get(&self, path: &str, params: &[(String, String)]) -> Result<ApiResponse> {
        let client = self
            .client()
            .ok_or_else(|| GraphError::transport("session already closed"))?;
        let url = self.url(path);

        tracing::debug!(%url, params = params.len(), "GET");

        let response = client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(GraphError::transport)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(GraphError::transport)?;

        tracing::debug!(%url, status, bytes = text.len(), "Response received");
        Ok(ApiResponse::new(status, decode_body(text)))
    }

    fn close(&self) {
        let released = self
            .client
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if released.is_some() {
            tracing::debug!(base_url = %self.base_url, "HTTP session released");
        }
    }
}

/// Decode a response body, keeping non-JSON text as a JSON string.
fn decode_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

/// Opens an [`HttpSession`] per invocation from the API configuration.
#[derive(Debug, Clone)]
pub struct HttpSessionFactory {
    config: ApiConfig,
}

impl HttpSessionFactory {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

impl SessionFactory for HttpSessionFactory {
    fn open(&self) -> Result<Box<dyn Session>> {
        Ok(Box::new(HttpSession::new(&self.config)?))
    }
}
