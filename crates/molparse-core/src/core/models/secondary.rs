use serde::{Deserialize, Serialize};
use std::fmt;

/// Secondary-structure assignment of a single residue.
///
/// Residues start out as [`Coil`](SecondaryStructure::Coil); helix and sheet
/// annotations from the input file overwrite that default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SecondaryStructure {
    /// No annotation (random coil, loop, or anything not covered by a range).
    #[default]
    Coil,
    /// Part of a helix (`HELIX` record or `_struct_conf` row).
    Helix,
    /// Part of a beta strand (`SHEET` record or `_struct_sheet_range` row).
    Sheet,
}

impl SecondaryStructure {
    /// Returns the single-character code used by renderers: `'H'`, `'E'`, or `' '`.
    pub fn code(self) -> char {
        match self {
            SecondaryStructure::Coil => ' ',
            SecondaryStructure::Helix => 'H',
            SecondaryStructure::Sheet => 'E',
        }
    }
}

impl fmt::Display for SecondaryStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SecondaryStructure::Coil => "Coil",
                SecondaryStructure::Helix => "Helix",
                SecondaryStructure::Sheet => "Sheet",
            }
        )
    }
}
