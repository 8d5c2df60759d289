//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into the pipeline. Document identity lives here as
//! injectable defaults rather than as literals inside the builder, which keeps
//! the builder a pure transform.

use crate::constants::{
    DEFAULT_MAP_DESCRIPTION, DEFAULT_MAP_ID, DEFAULT_MAP_NAME, DEFAULT_PUBLISHER,
    SOURCE_VALUE_SET_URI, TARGET_SYSTEM_URI, TARGET_VALUE_SET_URI,
};
use crate::{MapError, MapResult};

/// Concept map configuration resolved at startup.
///
/// `base_url` and `version` vary per run; the remaining fields default to the
/// published map's fixed identity and only change in tests or when a new map
/// family is introduced.
#[derive(Clone, Debug)]
pub struct MapConfig {
    base_url: String,
    version: String,
    map_id: String,
    name: String,
    description: String,
    publisher: String,
    source_value_set: String,
    target_value_set: String,
    target_system: String,
}

impl MapConfig {
    /// Create a new `MapConfig` with the published map's fixed identity.
    ///
    /// # Errors
    ///
    /// Returns a `MapError::InvalidInput` if `base_url` or `version` is empty
    /// or whitespace-only.
    pub fn new(base_url: impl Into<String>, version: impl Into<String>) -> MapResult<Self> {
        let base_url = base_url.into();
        let version = version.into();

        if base_url.trim().is_empty() {
            return Err(MapError::InvalidInput("base_url cannot be empty".into()));
        }
        if version.trim().is_empty() {
            return Err(MapError::InvalidInput("version cannot be empty".into()));
        }

        Ok(Self {
            base_url,
            version,
            map_id: DEFAULT_MAP_ID.to_string(),
            name: DEFAULT_MAP_NAME.to_string(),
            description: DEFAULT_MAP_DESCRIPTION.to_string(),
            publisher: DEFAULT_PUBLISHER.to_string(),
            source_value_set: SOURCE_VALUE_SET_URI.to_string(),
            target_value_set: TARGET_VALUE_SET_URI.to_string(),
            target_system: TARGET_SYSTEM_URI.to_string(),
        })
    }

    /// Replace the map id (output file name and document id).
    pub fn with_map_id(mut self, map_id: impl Into<String>) -> Self {
        self.map_id = map_id.into();
        self
    }

    /// Replace the recorded publisher.
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = publisher.into();
        self
    }

    /// Canonical URL of the document: the base URL with the map id appended.
    pub fn canonical_url(&self) -> String {
        format!("{}{}", self.base_url, self.map_id)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn map_id(&self) -> &str {
        &self.map_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    /// Value set URI for the document's source scope; the single group reuses
    /// it as its source system URI.
    pub fn source_value_set(&self) -> &str {
        &self.source_value_set
    }

    pub fn target_value_set(&self) -> &str {
        &self.target_value_set
    }

    pub fn target_system(&self) -> &str {
        &self.target_system
    }
}
