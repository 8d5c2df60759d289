//! Concept map output.
//!
//! The document is rendered to its full JSON text before anything touches the
//! filesystem, then written in a single call. A rendering failure therefore
//! never leaves a partial output file behind.

use std::fs;
use std::path::{Path, PathBuf};

use fhir::{ConceptMap, ConceptMapData};

use crate::{MapError, MapResult};

/// Write `map` as pretty-printed JSON to `<out_dir>/<map.id>.json`.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns [`MapError::Fhir`] if the document cannot be rendered and
/// [`MapError::OutputWrite`] if the file cannot be written. No output file is
/// produced on a render failure.
pub fn write_concept_map(map: &ConceptMapData, out_dir: &Path) -> MapResult<PathBuf> {
    let rendered = ConceptMap::render(map)?;

    let path = out_dir.join(format!("{}.json", map.id));
    fs::write(&path, rendered).map_err(|source| MapError::OutputWrite {
        path: path.clone(),
        source,
    })?;

    tracing::info!("wrote concept map {}", path.display());

    Ok(path)
}
