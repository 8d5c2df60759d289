//! Constants used throughout the emap core crate.
//!
//! This module contains the fixed identity of the published concept map so the
//! same literals are not repeated across the codebase. All of them can be
//! overridden per-run through [`crate::MapConfig`].

/// Logical id of the concept map; also names the output file (`<id>.json`).
pub const DEFAULT_MAP_ID: &str = "emis-snomed-experimental-map";

/// Computer-friendly name recorded on the concept map.
pub const DEFAULT_MAP_NAME: &str = "EMIS local code to SNOMED";

/// Natural-language description recorded on the concept map.
pub const DEFAULT_MAP_DESCRIPTION: &str = "A FHIR ConceptMap for EMIS local codes to SNOMED";

/// Publisher recorded on the concept map.
pub const DEFAULT_PUBLISHER: &str = "OL";

/// Value set URI scoping the EMIS local codes; also the group's source system.
pub const SOURCE_VALUE_SET_URI: &str = "http://prototype/emislocal/vs";

/// Value set URI scoping the SNOMED CT targets (descendants of the root concept).
pub const TARGET_VALUE_SET_URI: &str = "http://snomed.info/sct?fhir_vs=isa/138875005";

/// SNOMED CT coding system URI used as the group's target system.
pub const TARGET_SYSTEM_URI: &str = "http://snomed.info/sct";

/// Default canonical URL prefix when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://prototype/";

/// Default document version when none is configured.
pub const DEFAULT_VERSION: &str = "0.0.1";
