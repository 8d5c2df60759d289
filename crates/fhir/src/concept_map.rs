//! FHIR-aligned ConceptMap wire models and translation helpers.
//!
//! This module provides both domain-level types and wire models for a ConceptMap
//! resource, which expresses code-to-code correspondences between two coding
//! systems, grouped by system pair.
//!
//! Responsibilities:
//! - Define public domain-level types for use by the mapping pipeline
//! - Define a strict wire model for serialisation/deserialisation
//! - Provide translation helpers between domain types and the wire model
//! - Validate document structure and enforce required fields
//!
//! Notes:
//! - The generated document is write-once; parsing exists for verification of
//!   produced output and for consuming maps written by earlier runs
//! - Equivalence is deliberately two-valued (`equivalent`/`relatedto`); richer
//!   FHIR equivalence codes are not produced by this pipeline

use crate::FhirError;
use serde::{Deserialize, Serialize};

// ============================================================================
// Public domain-level types
// ============================================================================

/// Publication status of a conformance resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    /// Still under development.
    Draft,
    /// Ready for normal use.
    Active,
    /// Withdrawn from use.
    Retired,
    /// Status is not known.
    Unknown,
}

/// How closely a source code's meaning aligns with its target code.
///
/// The pipeline collapses the input file's free-text qualifier column onto
/// these two codes; anything that is not exactly `equivalent` becomes
/// [`Equivalence::RelatedTo`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equivalence {
    /// The concepts mean the same thing.
    Equivalent,
    /// The concepts are related, but the exact relationship is not known.
    RelatedTo,
}

/// Domain-level carrier for a complete concept map document.
///
/// Field names follow the project's domain vocabulary; the exact JSON spelling
/// (`sourceUri`, `targetUri`, …) lives in the wire structs below.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConceptMapData {
    /// Logical id of the document; also names the output file.
    pub id: String,

    /// Canonical URL identifying this concept map.
    pub url: String,

    /// Business version of the map.
    pub version: String,

    /// Computer-friendly name.
    pub name: String,

    /// Human-friendly title.
    pub title: String,

    /// Natural-language description of the map's purpose.
    pub description: String,

    /// Publication status.
    pub status: PublicationStatus,

    /// Whether the map is for trial use rather than production.
    pub experimental: bool,

    /// Publisher of the map.
    pub publisher: String,

    /// Value set URI scoping the source codes of the whole document.
    pub source_value_set: String,

    /// Value set URI scoping the target codes of the whole document.
    pub target_value_set: String,

    /// Mappings grouped by source/target coding-system pair.
    pub groups: Vec<GroupData>,
}

/// One group of mappings between a fixed source and target coding system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupData {
    /// URI of the source coding system.
    pub source: String,

    /// Version of the source coding system.
    pub source_version: String,

    /// URI of the target coding system.
    pub target: String,

    /// One entry per distinct source code.
    pub elements: Vec<SourceElementData>,
}

/// Mappings for a single source code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceElementData {
    /// Identifier in the source coding system.
    pub code: String,

    /// Display text for the source code.
    pub display: String,

    /// Target codes this source code maps to.
    pub targets: Vec<TargetElementData>,
}

/// A single target code with its equivalence qualifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetElementData {
    /// Identifier in the target coding system.
    pub code: String,

    /// Display text for the target code.
    pub display: String,

    /// How closely the source and target meanings align.
    pub equivalence: Equivalence,

    /// Free-text annotation carried over from the mapping table.
    pub comment: Option<String>,
}

// ============================================================================
// Public ConceptMap operations
// ============================================================================

/// ConceptMap resource operations.
///
/// This is a zero-sized type used for namespacing concept-map operations.
/// All methods are associated functions.
pub struct ConceptMap;

impl ConceptMap {
    /// Parse a concept map resource from JSON text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
    /// `group.0.element.3.target.0.equivalence`) to the failing field when the
    /// JSON does not match the wire schema.
    ///
    /// # Arguments
    ///
    /// * `json_text` - JSON text expected to represent a ConceptMap resource.
    ///
    /// # Returns
    ///
    /// Returns a [`ConceptMapData`] with domain-level fields extracted from the
    /// resource.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if:
    /// - the JSON does not represent a valid concept map,
    /// - any field has an unexpected type or is missing,
    /// - any unknown keys are present (due to `#[serde(deny_unknown_fields)]`),
    /// - resourceType is not "ConceptMap".
    pub fn parse(json_text: &str) -> Result<ConceptMapData, FhirError> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let wire = match serde_path_to_error::deserialize::<_, ConceptMapWire>(&mut deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(FhirError::Translation(format!(
                    "ConceptMap schema mismatch at {path}: {source}"
                )));
            }
        };

        // Validate resourceType
        if wire.resource_type != "ConceptMap" {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType 'ConceptMap', got '{}'",
                wire.resource_type
            )));
        }

        Ok(wire_to_domain(wire))
    }

    /// Render a concept map resource as pretty-printed JSON text.
    ///
    /// This converts domain-level [`ConceptMapData`] into wire format and
    /// serialises to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::InvalidJson`] if serialisation fails.
    pub fn render(data: &ConceptMapData) -> Result<String, FhirError> {
        let wire: ConceptMapWire = domain_to_wire(data);
        Ok(serde_json::to_string_pretty(&wire)?)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a ConceptMap resource for on-disk JSON.
///
/// This is the exact structure that will be serialised to/from JSON.
/// All structs use `#[serde(deny_unknown_fields)]` for strict validation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ConceptMapWire {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    pub id: String,

    pub url: String,

    pub version: String,

    pub name: String,

    pub title: String,

    pub status: PublicationStatus,

    pub experimental: bool,

    pub description: String,

    pub publisher: String,

    #[serde(rename = "sourceUri")]
    pub source_uri: String,

    #[serde(rename = "targetUri")]
    pub target_uri: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group: Vec<GroupWire>,
}

/// Wire representation of one mapping group.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct GroupWire {
    pub source: String,

    #[serde(rename = "sourceVersion")]
    pub source_version: String,

    pub target: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub element: Vec<SourceElementWire>,
}

/// Wire representation of the mappings for one source code.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct SourceElementWire {
    pub code: String,

    pub display: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target: Vec<TargetElementWire>,
}

/// Wire representation of a single target mapping.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct TargetElementWire {
    pub code: String,

    pub display: String,

    pub equivalence: Equivalence,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

/// Convert wire format concept map to domain types.
fn wire_to_domain(wire: ConceptMapWire) -> ConceptMapData {
    ConceptMapData {
        id: wire.id,
        url: wire.url,
        version: wire.version,
        name: wire.name,
        title: wire.title,
        description: wire.description,
        status: wire.status,
        experimental: wire.experimental,
        publisher: wire.publisher,
        source_value_set: wire.source_uri,
        target_value_set: wire.target_uri,
        groups: wire
            .group
            .into_iter()
            .map(|g| GroupData {
                source: g.source,
                source_version: g.source_version,
                target: g.target,
                elements: g
                    .element
                    .into_iter()
                    .map(|e| SourceElementData {
                        code: e.code,
                        display: e.display,
                        targets: e
                            .target
                            .into_iter()
                            .map(|t| TargetElementData {
                                code: t.code,
                                display: t.display,
                                equivalence: t.equivalence,
                                comment: t.comment,
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Convert domain types to wire format concept map.
fn domain_to_wire(data: &ConceptMapData) -> ConceptMapWire {
    ConceptMapWire {
        resource_type: "ConceptMap".to_string(),
        id: data.id.clone(),
        url: data.url.clone(),
        version: data.version.clone(),
        name: data.name.clone(),
        title: data.title.clone(),
        status: data.status,
        experimental: data.experimental,
        description: data.description.clone(),
        publisher: data.publisher.clone(),
        source_uri: data.source_value_set.clone(),
        target_uri: data.target_value_set.clone(),
        group: data
            .groups
            .iter()
            .map(|g| GroupWire {
                source: g.source.clone(),
                source_version: g.source_version.clone(),
                target: g.target.clone(),
                element: g
                    .elements
                    .iter()
                    .map(|e| SourceElementWire {
                        code: e.code.clone(),
                        display: e.display.clone(),
                        target: e
                            .targets
                            .iter()
                            .map(|t| TargetElementWire {
                                code: t.code.clone(),
                                display: t.display.clone(),
                                equivalence: t.equivalence,
                                comment: t.comment.clone(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}
