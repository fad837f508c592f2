//! Domain DTOs for the hero API.
//!
//! # Design
//! Only `id` and `name` are known to this layer. Every other field the server
//! sends is captured in `extra` via `#[serde(flatten)]` and written back out
//! untouched, so attributes added on the server survive a fetch/update cycle.
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single hero returned by the API. The `id` is always server-assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Hero {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// Request payload for creating a hero. Carries no `id`; the server assigns one
/// and echoes the created `Hero` back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewHero {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewHero {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}
