//! `reqwest`-backed [`ApiClient`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::debug;

use crate::{ActionError, ApiClient, ApiRequest, HttpMethod};

/// Sends `apiCall` requests over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
}

impl HttpApiClient {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ActionError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| ActionError::Network(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

fn method(m: HttpMethod) -> Method {
    match m {
        HttpMethod::Get    => Method::GET,
        HttpMethod::Post   => Method::POST,
        HttpMethod::Put    => Method::PUT,
        HttpMethod::Patch  => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn send(&self, request: &ApiRequest) -> Result<Value, ActionError> {
        debug!("[HTTP] {} {}", request.method, request.url);

        let mut builder = self.client.request(method(request.method), &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ActionError::Network(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ActionError::Network(format!(
                "{} {} returned {status}",
                request.method, request.url
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ActionError::Network(format!("cannot read response body: {e}")))?;

        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}
