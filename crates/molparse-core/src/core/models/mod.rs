//! # Core Models Module
//!
//! Data structures for parsed molecular structures.
//!
//! ## Key Components
//!
//! - [`atom`] - The transient [`ParsedAtom`](atom::ParsedAtom) handed to a store, and
//!   the stored [`Atom`](atom::Atom)
//! - [`residue`] - Residues with their secondary-structure code and kind
//! - [`chain`] - Chains and their polymer type
//! - [`secondary`] - Secondary-structure codes
//! - [`structure`] - One parsed conformation
//! - [`store`] - The store interface used by the parser, and its in-memory implementation
//!
//! ## Usage
//!
//! ```ignore
//! use molparse::core::models::store::{MolecularStore, StructureStore};
//!
//! let mut store = MolecularStore::new();
//! let index = store.push_structure_id("1abc", "EXAMPLE PROTEIN");
//! store.add_atom(atom);
//! store.assign_residue_properties(index);
//! ```

pub mod atom;
pub mod chain;
pub mod residue;
pub mod secondary;
pub mod store;
pub mod structure;
