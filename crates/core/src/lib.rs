//! # emap core
//!
//! Core transformation pipeline for the EMIS-to-SNOMED concept map generator.
//!
//! This crate turns a flat CSV mapping table (EMIS local codes to SNOMED CT
//! codes) into a FHIR ConceptMap document:
//! - CSV loading with dedup-by-source-code ([`loader`])
//! - Concept map assembly with equivalence classification ([`builder`])
//! - Render-then-write output ([`output`])
//!
//! **No transport concerns**: HTTP, terminology-server lookups, or service
//! interfaces do not belong here; the pipeline is a one-shot batch transform.

pub mod builder;
pub mod config;
pub mod constants;
pub mod loader;
pub mod output;

pub use builder::build;
pub use config::MapConfig;
pub use loader::{load, MapRow};
pub use output::write_concept_map;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read mapping file {path}: {source}", path = path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("malformed row at line {line}: expected at least 6 fields, found {found}")]
    MalformedRow { line: u64, found: usize },
    #[error("missing field '{field}' at line {line}")]
    MissingField { line: u64, field: &'static str },
    #[error("FHIR error: {0}")]
    Fhir(#[from] fhir::FhirError),
    #[error("failed to write concept map {path}: {source}", path = path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type MapResult<T> = std::result::Result<T, MapError>;
