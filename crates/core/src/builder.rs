//! Concept map assembly.
//!
//! Takes the deduplicated rows from [`crate::loader`] and produces a single
//! [`ConceptMapData`] with one group (EMIS local codes → SNOMED CT), one
//! source element per row and one target element per source element.
//!
//! The input file's equivalence column carries a small free-text vocabulary.
//! Only the literal token `equivalent` (case-sensitive) maps to
//! [`Equivalence::Equivalent`]; every other value, including the empty string
//! and casing variants, collapses to [`Equivalence::RelatedTo`]. Downstream
//! consumers rely on this exact binary behaviour.

use fhir::{
    ConceptMapData, Equivalence, GroupData, PublicationStatus, SourceElementData,
    TargetElementData,
};

use crate::config::MapConfig;
use crate::loader::MapRow;

/// Assemble a concept map document from deduplicated mapping rows.
///
/// Elements appear in the order the rows are received. The builder is a pure
/// transform: no I/O, no further deduplication, no validation of code values.
pub fn build(rows: &[MapRow], config: &MapConfig) -> ConceptMapData {
    let elements = rows
        .iter()
        .map(|row| SourceElementData {
            code: row.source_code.clone(),
            display: row.source_display.clone(),
            targets: vec![TargetElementData {
                code: row.target_code.clone(),
                display: row.target_display.clone(),
                equivalence: classify(&row.equivalence),
                comment: if row.comment.is_empty() {
                    None
                } else {
                    Some(row.comment.clone())
                },
            }],
        })
        .collect();

    ConceptMapData {
        id: config.map_id().to_string(),
        url: config.canonical_url(),
        version: config.version().to_string(),
        name: config.name().to_string(),
        title: config.map_id().to_string(),
        description: config.description().to_string(),
        status: PublicationStatus::Draft,
        experimental: true,
        publisher: config.publisher().to_string(),
        source_value_set: config.source_value_set().to_string(),
        target_value_set: config.target_value_set().to_string(),
        groups: vec![GroupData {
            source: config.source_value_set().to_string(),
            source_version: config.version().to_string(),
            target: config.target_system().to_string(),
            elements,
        }],
    }
}

/// Binary equivalence classification: exact match on `equivalent` only.
fn classify(tag: &str) -> Equivalence {
    if tag == "equivalent" {
        Equivalence::Equivalent
    } else {
        Equivalence::RelatedTo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MapConfig {
        MapConfig::new("https://prototype/", "0.0.1").expect("valid config")
    }

    fn row(
        source_code: &str,
        source_display: &str,
        target_code: &str,
        target_display: &str,
        equivalence: &str,
        comment: &str,
    ) -> MapRow {
        MapRow {
            source_code: source_code.to_string(),
            source_display: source_display.to_string(),
            target_code: target_code.to_string(),
            target_display: target_display.to_string(),
            equivalence: equivalence.to_string(),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn builds_equivalent_mapping() {
        let rows = vec![row("E001", "Local label", "S100", "SCT label", "equivalent", "")];

        let map = build(&rows, &config());

        assert_eq!(map.groups.len(), 1);
        let group = &map.groups[0];
        assert_eq!(group.elements.len(), 1);

        let element = &group.elements[0];
        assert_eq!(element.code, "E001");
        assert_eq!(element.display, "Local label");
        assert_eq!(element.targets.len(), 1);

        let target = &element.targets[0];
        assert_eq!(target.code, "S100");
        assert_eq!(target.display, "SCT label");
        assert_eq!(target.equivalence, Equivalence::Equivalent);
        assert_eq!(target.comment, None);
    }

    #[test]
    fn builds_related_mapping_with_comment() {
        let rows = vec![row("E002", "Local2", "S200", "SCT2", "related", "note")];

        let map = build(&rows, &config());

        let target = &map.groups[0].elements[0].targets[0];
        assert_eq!(target.code, "S200");
        assert_eq!(target.equivalence, Equivalence::RelatedTo);
        assert_eq!(target.comment, Some("note".to_string()));
    }

    #[test]
    fn classifies_exact_token_only() {
        assert_eq!(classify("equivalent"), Equivalence::Equivalent);
        assert_eq!(classify("Equivalent"), Equivalence::RelatedTo);
        assert_eq!(classify(""), Equivalence::RelatedTo);
        assert_eq!(classify("related-to"), Equivalence::RelatedTo);
        assert_eq!(classify("narrower"), Equivalence::RelatedTo);
    }

    #[test]
    fn one_element_per_row_in_received_order() {
        let rows = vec![
            row("E010", "a", "S010", "ta", "equivalent", ""),
            row("E011", "b", "S011", "tb", "related", ""),
            row("E012", "c", "S012", "tc", "equivalent", ""),
        ];

        let map = build(&rows, &config());

        let codes: Vec<&str> = map.groups[0]
            .elements
            .iter()
            .map(|e| e.code.as_str())
            .collect();
        assert_eq!(codes, vec!["E010", "E011", "E012"]);
    }

    #[test]
    fn records_document_identity_from_config() {
        let map = build(&[], &config());

        assert_eq!(map.id, "emis-snomed-experimental-map");
        assert_eq!(map.url, "https://prototype/emis-snomed-experimental-map");
        assert_eq!(map.version, "0.0.1");
        assert_eq!(map.title, "emis-snomed-experimental-map");
        assert_eq!(map.name, "EMIS local code to SNOMED");
        assert_eq!(map.status, PublicationStatus::Draft);
        assert!(map.experimental);
        assert_eq!(map.publisher, "OL");
        assert_eq!(map.source_value_set, "http://prototype/emislocal/vs");
        assert_eq!(
            map.target_value_set,
            "http://snomed.info/sct?fhir_vs=isa/138875005"
        );

        let group = &map.groups[0];
        assert_eq!(group.source, "http://prototype/emislocal/vs");
        assert_eq!(group.source_version, "0.0.1");
        assert_eq!(group.target, "http://snomed.info/sct");
        assert!(group.elements.is_empty());
    }
}
