//! Fail-soft hero client.
//!
//! # Design
//! `HeroClient` holds immutable configuration plus shared handles to an
//! injected `Transport` and `Notifier`, and carries no mutable state between
//! calls. Every public operation is one pipeline:
//!
//! 1. issue exactly one request through the transport,
//! 2. decode the response (`parse_json` / `parse_raw`),
//! 3. on `Ok`, tap the value with a success notification (`Result::inspect`),
//! 4. on `Err`, hand the error to `handle_error`, which logs it, notifies, and
//!    yields the operation's fallback.
//!
//! The public return types have no error variant, so callers always get a
//! value. An empty list or `None` may therefore mean "nothing there" or "the
//! request failed"; only the notification stream tells the two apart.
//!
//! Notifications are emitted inside the operation future after the response
//! arrives. Dropping the future before then suppresses them.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpResponse, RequestOptions, Transport};
use crate::notify::Notifier;
use crate::types::{Hero, NewHero};

#[derive(Clone)]
pub struct HeroClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for HeroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeroClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HeroClient {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            transport,
            notifier,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn heroes_url(&self) -> String {
        self.config.collection_url()
    }

    pub fn hero_url(&self, id: i64) -> String {
        format!("{}/{id}", self.heroes_url())
    }

    pub fn search_url(&self, term: &str) -> String {
        format!("{}?name={}", self.heroes_url(), encode_query_value(term))
    }

    /// GET all heroes. Falls back to an empty list.
    pub async fn get_heroes(&self) -> Vec<Hero> {
        self.get_json(&self.heroes_url())
            .await
            .inspect(|_| self.log("fetched heroes"))
            .unwrap_or_else(self.handle_error("getHeroes", Vec::new()))
    }

    /// GET one hero by id. `None` on failure, including 404.
    pub async fn get_hero(&self, id: i64) -> Option<Hero> {
        self.get_json(&self.hero_url(id))
            .await
            .inspect(|_: &Hero| self.log(&format!("fetched hero id={id}")))
            .map(Some)
            .unwrap_or_else(self.handle_error(&format!("getHero id={id}"), None))
    }

    /// PUT the hero to the collection URL. Returns the server's raw response
    /// body (`Value::Null` when empty).
    pub async fn update_hero(&self, hero: &Hero) -> Option<Value> {
        self.put_raw(&self.heroes_url(), hero)
            .await
            .inspect(|_| self.log(&format!("updated hero id={}", hero.id)))
            .map(Some)
            .unwrap_or_else(self.handle_error("updateHero", None))
    }

    /// POST a new hero. Returns the hero as echoed by the server, with the
    /// id it assigned. An `id` smuggled in through `extra` is not sent.
    pub async fn add_hero(&self, hero: &NewHero) -> Option<Hero> {
        let mut payload = hero.clone();
        payload.extra.remove("id");
        self.post_json(&self.heroes_url(), &payload)
            .await
            .inspect(|created: &Hero| self.log(&format!("added hero w/ id={}", created.id)))
            .map(Some)
            .unwrap_or_else(self.handle_error("addHero", None))
    }

    /// DELETE a hero by id. Returns the server's raw response body.
    pub async fn delete_hero(&self, id: i64) -> Option<Value> {
        self.delete_raw(&self.hero_url(id))
            .await
            .inspect(|_| self.log(&format!("deleted hero id={id}")))
            .map(Some)
            .unwrap_or_else(self.handle_error("deleteHero", None))
    }

    /// GET heroes whose name matches `term`. A blank term short-circuits to
    /// an empty list without touching the transport or the notifier.
    pub async fn search_heroes(&self, term: &str) -> Vec<Hero> {
        if term.trim().is_empty() {
            return Vec::new();
        }
        self.get_json(&self.search_url(term))
            .await
            .inspect(|heroes: &Vec<Hero>| {
                if heroes.is_empty() {
                    self.log(&format!("no heroes matching \"{term}\""));
                } else {
                    self.log(&format!("found heroes matching \"{term}\""));
                }
            })
            .unwrap_or_else(self.handle_error("searchHeroes", Vec::new()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.transport.get(url).await?;
        parse_json(response)
    }

    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(%url, "POST");
        let body = to_body(body)?;
        let response = self.transport.post(url, body, &RequestOptions::json()).await?;
        parse_json(response)
    }

    async fn put_raw<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value, ApiError> {
        debug!(%url, "PUT");
        let body = to_body(body)?;
        let response = self.transport.put(url, body, &RequestOptions::json()).await?;
        parse_raw(response)
    }

    async fn delete_raw(&self, url: &str) -> Result<Value, ApiError> {
        debug!(%url, "DELETE");
        let response = self.transport.delete(url, &RequestOptions::json()).await?;
        parse_raw(response)
    }

    /// Build the failure path for `operation`: record the raw error, emit one
    /// notification, and substitute `fallback`.
    fn handle_error<'a, T: 'a>(
        &'a self,
        operation: &str,
        fallback: T,
    ) -> impl FnOnce(ApiError) -> T + 'a {
        let operation = operation.to_string();
        move |err| {
            error!(operation = %operation, error = ?err, "hero request failed");
            self.log(&format!("{operation} failed: {err}"));
            fallback
        }
    }

    fn log(&self, message: &str) {
        self.notifier
            .add(format!("{}: {message}", self.config.service_name));
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))
}

/// Map non-2xx status codes to `ApiError::HttpError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Like `parse_json` for responses of unspecified shape; an empty body is `Null`.
fn parse_raw(response: HttpResponse) -> Result<Value, ApiError> {
    check_status(&response)?;
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
