use super::secondary::SecondaryStructure;
use phf::{Set, phf_set};
use std::fmt;

static AMINO_ACID_NAMES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    // Protonation states and common variants
    "HSD", "HSE", "HSP", "HID", "HIE", "HIP", "CYX", "ASH", "GLH", "LYN",
    "MSE", "SEC", "PYL", "ASX", "GLX", "UNK",
};

static NUCLEOTIDE_NAMES: Set<&'static str> = phf_set! {
    "A", "C", "G", "U", "T", "I", "N",
    "DA", "DC", "DG", "DT", "DU", "DI", "DN",
};

static WATER_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "H2O", "DOD", "TIP", "TIP3", "SOL",
};

/// Returns `true` when a residue name denotes a water molecule.
pub fn is_water_name(name: &str) -> bool {
    WATER_NAMES.contains(name.trim())
}

/// Broad chemical classification of a residue, assigned from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResidueKind {
    AminoAcid,
    Nucleotide,
    Water,
    #[default]
    Ligand,
}

impl ResidueKind {
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if AMINO_ACID_NAMES.contains(name) {
            ResidueKind::AminoAcid
        } else if NUCLEOTIDE_NAMES.contains(name) {
            ResidueKind::Nucleotide
        } else if WATER_NAMES.contains(name) {
            ResidueKind::Water
        } else {
            ResidueKind::Ligand
        }
    }
}

impl fmt::Display for ResidueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResidueKind::AminoAcid => "amino-acid",
                ResidueKind::Nucleotide => "nucleotide",
                ResidueKind::Water => "water",
                ResidueKind::Ligand => "ligand",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub name: String,                     // Residue name (e.g., "ALA", "HOH")
    pub number: i32,                      // Residue sequence number from the source file
    pub insertion_code: Option<char>,     // PDB insertion code, if any
    pub chain_id: String,                 // Identifier of the parent chain
    pub kind: ResidueKind,                // Set by `assign_residue_properties`
    pub ss: SecondaryStructure,           // Painted by the secondary-structure annotator
    pub(crate) atoms: Vec<usize>,         // Indices of atoms belonging to this residue
}

impl Residue {
    pub(crate) fn new(
        name: &str,
        number: i32,
        insertion_code: Option<char>,
        chain_id: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            number,
            insertion_code,
            chain_id: chain_id.to_string(),
            kind: ResidueKind::default(),
            ss: SecondaryStructure::default(),
            atoms: Vec::new(),
        }
    }

    pub fn atoms(&self) -> &[usize] {
        &self.atoms
    }

    /// Returns `true` if this residue is the one addressed by `(chain, number, insertion code)`.
    pub fn matches(&self, chain_id: &str, number: i32, insertion_code: Option<char>) -> bool {
        self.number == number && self.insertion_code == insertion_code && self.chain_id == chain_id
    }
}
