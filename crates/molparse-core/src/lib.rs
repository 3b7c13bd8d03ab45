//! # molparse Core Library
//!
//! A lenient parser for macromolecular structure files in the fixed-column PDB
//! format and the token/loop based mmCIF format. Parsed atoms are pushed into a
//! structure store, after which secondary-structure annotations (`HELIX`/`SHEET`
//! records, `_struct_conf`/`_struct_sheet_range` loops) are painted onto the
//! residues they address.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** The in-memory structure store (`MolecularStore`)
//!   and the raw field extractors for both formats.
//!
//! - **[`engine`]: The Logic Core.** Atom-record parsing, mmCIF residue numbering,
//!   PDB model/title splitting, secondary-structure annotation, and the format
//!   driver (`StructureParser`) that ties them together. A malformed record never
//!   aborts a file: it is recorded and the next line is parsed.
//!
//! - **[`workflows`]: The Public API.** Reads a file from disk, picks the format,
//!   and runs the driver against a store.

pub mod core;
pub mod engine;
pub mod workflows;
