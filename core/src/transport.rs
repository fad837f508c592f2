//! `Transport` backed by a blocking ureq agent.
//!
//! # Design
//! ureq is synchronous, so each request runs on tokio's blocking pool via
//! `spawn_blocking`. The agent is configured with `http_status_as_error(false)`
//! so 4xx/5xx responses come back as data and the client keeps sole ownership
//! of status interpretation. When polled outside a tokio runtime the request
//! runs inline on the polling thread instead. Dropping the returned future
//! abandons the result but does not abort a request already on the wire.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// `timeout` bounds the whole round-trip; `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        // Outside a tokio runtime there is no blocking pool; run inline.
        if tokio::runtime::Handle::try_current().is_err() {
            return execute(&self.agent, request);
        }
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn execute(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    debug!(method = request.method.as_str(), path = %request.path, "executing request");

    let body = request.body.unwrap_or_default();
    let mut response = match request.method {
        HttpMethod::Get => with_headers(agent.get(&request.path), &request.headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(&request.path), &request.headers).call(),
        HttpMethod::Post => {
            with_headers(agent.post(&request.path), &request.headers).send(body.as_bytes())
        }
        HttpMethod::Put => {
            with_headers(agent.put(&request.path), &request.headers).send(body.as_bytes())
        }
    }?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response.body_mut().read_to_string()?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
