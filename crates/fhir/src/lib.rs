//! FHIR wire/boundary support for the EMIS-to-SNOMED map generator.
//!
//! This crate provides **wire models** and **format/translation helpers** for the
//! FHIR R4 ConceptMap resource produced by the mapping pipeline:
//! - JSON documents (pretty-printed, one file per concept map)
//!
//! This crate focuses on:
//! - FHIR semantic alignment (without FHIR REST transport)
//! - serialisation/deserialisation
//! - translation between domain-level types and wire structs
//!
//! The wire shape (camelCase field names, `group` → `element` → `target` nesting,
//! the `equivalent`/`relatedto` equivalence tokens) is fixed by the ConceptMap
//! schema and must not drift: downstream terminology tooling consumes these
//! documents verbatim.

pub mod concept_map;

// Re-export facades
pub use concept_map::ConceptMap;

// Re-export public domain-level types
pub use concept_map::{
    ConceptMapData, Equivalence, GroupData, PublicationStatus, SourceElementData,
    TargetElementData,
};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
