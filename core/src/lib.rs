//! Fail-soft async client for the hero REST API.
//!
//! # Overview
//! `HeroClient` turns UI intents (list, get, search, create, update, delete)
//! into HTTP requests against a hero collection, and always answers with a
//! value: failures are logged, reported through the `Notifier`, and replaced
//! with an empty list or `None`.
//!
//! # Design
//! - The network is behind the `Transport` trait; `UreqTransport` is the
//!   bundled implementation and tests plug in scripted doubles.
//! - Human-readable operational messages go to an injected `Notifier`
//!   (`MessageService` keeps them in memory, `TracingNotifier` forwards them
//!   to `tracing`). Raw errors are recorded with `tracing::error!`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod transport;
pub mod types;

pub use client::HeroClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions, Transport};
pub use notify::{MessageService, Notifier, TracingNotifier};
pub use transport::UreqTransport;
pub use types::{Hero, NewHero};
