//! # Engine Module
//!
//! The parsing core. Raw text flows one way: field extraction, atom-record
//! parsing, and structure-store mutations. A second pass then reads residue
//! ranges back from the store and paints secondary-structure codes onto them.
//!
//! ## Key Components
//!
//! - **Format Driver** ([`parser`]) - [`StructureParser`](parser::StructureParser)
//!   dispatches on [`Format`](crate::core::io::format::Format) and runs the format's
//!   four operations (detect atom lines, parse atoms, parse the title, parse
//!   secondary structure) against one store.
//! - **PDB variant** ([`pdb`]) - Fixed-column atom records, model/title splitting,
//!   `HELIX`/`SHEET` records.
//! - **mmCIF variant** ([`cif`]) - `_atom_site` rows, `_struct.title`, and the
//!   `_struct_conf`/`_struct_sheet_range` loops.
//! - **Residue numbering** ([`numbering`]) - Stable residue numbers for mmCIF rows
//!   without a usable sequence id.
//! - **Annotation** ([`annotate`]) - The forward residue walk that applies one
//!   secondary-structure range.
//! - **Support** ([`config`], [`diagnostics`], [`error`]).

pub mod annotate;
pub mod cif;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod numbering;
pub mod parser;
pub mod pdb;
