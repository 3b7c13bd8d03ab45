//! # Core Module
//!
//! Stateless building blocks shared by the parsing engine.
//!
//! - **Structure Store** ([`models`]) - Structures, chains, residues and atoms, plus
//!   the [`StructureStore`](models::store::StructureStore) trait the engine drives.
//! - **Field Extraction** ([`io`]) - Fixed-column slicing for PDB lines, token
//!   splitting for mmCIF lines, and format detection.

pub mod io;
pub mod models;
