use crate::core::models::store::StructureStore;
use crate::engine::error::ParseError;
use crate::engine::parser::{ParseReport, StructureParser};
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

const FALLBACK_STRUCTURE_ID: &str = "structure";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse '{path}': {source}")]
    Parse { path: String, source: ParseError },
}

/// The structure id for a file: its name without the extension.
pub fn structure_id_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| FALLBACK_STRUCTURE_ID.to_string())
}

/// Reads `path` and parses it into `store`.
///
/// Bytes that are not valid UTF-8 (legacy 8-bit headers) are replaced rather
/// than rejected; the columns the parser reads are ASCII.
#[instrument(skip_all, name = "load_workflow", fields(path = %path.display()))]
pub fn load_path<S: StructureStore + ?Sized>(
    path: &Path,
    store: &mut S,
    parser: &StructureParser,
) -> Result<ParseReport, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let structure_id = structure_id_from_path(path);

    info!("Parsing '{}' as structure '{}'.", path.display(), structure_id);
    parser
        .parse_with_path_hint(Some(path), &text, &structure_id, store)
        .map_err(|source| LoadError::Parse {
            path: path.display().to_string(),
            source,
        })
}
