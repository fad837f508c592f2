//! Client configuration.

use serde::Deserialize;

pub const DEFAULT_COLLECTION: &str = "api/heroes";
pub const DEFAULT_SERVICE_NAME: &str = "HeroService";

/// Where the hero collection lives and how the client signs its messages.
///
/// An empty `base_url` yields relative URLs such as `api/heroes`, which is
/// what a host that resolves paths against its own origin expects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub collection: String,
    pub service_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            collection: DEFAULT_COLLECTION.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_collection(mut self, collection: &str) -> Self {
        self.collection = collection.trim_matches('/').to_string();
        self
    }

    pub fn with_service_name(mut self, service_name: &str) -> Self {
        self.service_name = service_name.to_string();
        self
    }

    /// Full URL of the collection resource.
    pub fn collection_url(&self) -> String {
        let collection = self.collection.trim_matches('/');
        let base = self.base_url.trim_end_matches('/');
        if base.is_empty() {
            collection.to_string()
        } else {
            format!("{base}/{collection}")
        }
    }
}
