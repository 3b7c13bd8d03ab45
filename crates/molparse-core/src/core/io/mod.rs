//! Field extraction for the two supported text formats.
//!
//! Extractors never fail on short or malformed lines: missing columns come back
//! empty and the engine decides whether that makes the record unusable.

pub mod cif_tokens;
pub mod format;
pub mod pdb_columns;
