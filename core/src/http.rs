//! HTTP transport types and the `Transport` seam.
//!
//! # Design
//! Requests and responses are plain data. `HeroClient` never touches the
//! network itself: it hands an `HttpRequest` to whatever `Transport` was
//! injected and interprets the `HttpResponse` that comes back. Swapping the
//! transport (ureq, a test double, a host-provided bridge) requires
//! implementing a single method, `send`; the verb entry points are provided
//! on top of it.

use async_trait::async_trait;

use crate::error::ApiError;

pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Per-request options. Only headers are carried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Options sent with every mutating request.
    pub fn json() -> Self {
        Self {
            headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    fn new(method: HttpMethod, url: &str, options: &RequestOptions, body: Option<String>) -> Self {
        Self {
            method,
            path: url.to_string(),
            headers: options.headers.clone(),
            body,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes HTTP requests on behalf of `HeroClient`.
///
/// Each call resolves exactly once, with a response or an error. Non-2xx
/// statuses should be returned as data; status interpretation belongs to the
/// client. Timeouts, if any, are the transport's business.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;

    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest::new(HttpMethod::Get, url, &RequestOptions::default(), None);
        self.send(request).await
    }

    async fn post(
        &self,
        url: &str,
        body: String,
        options: &RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        self.send(HttpRequest::new(HttpMethod::Post, url, options, Some(body))).await
    }

    async fn put(
        &self,
        url: &str,
        body: String,
        options: &RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        self.send(HttpRequest::new(HttpMethod::Put, url, options, Some(body))).await
    }

    async fn delete(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, ApiError> {
        self.send(HttpRequest::new(HttpMethod::Delete, url, options, None)).await
    }
}
