use super::residue::{Residue, ResidueKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChainType {
    Protein,
    DNA,
    RNA,
    Ligand,
    Water,
    #[default]
    Other,
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ChainType::Protein => "Protein",
                ChainType::DNA => "DNA",
                ChainType::RNA => "RNA",
                ChainType::Ligand => "Ligand",
                ChainType::Water => "Water",
                ChainType::Other => "Other",
            }
        )
    }
}

impl ChainType {
    /// Classifies a chain from the kinds of the residues it holds.
    ///
    /// Polymer residues decide the type when present; deoxy nucleotide names
    /// (`DA`, `DC`, ...) mark a DNA chain. Chains made only of waters or only of
    /// ligands are typed accordingly.
    pub fn classify<'a>(residues: impl IntoIterator<Item = &'a Residue>) -> Self {
        let (mut amino, mut dna, mut rna, mut water, mut ligand) = (0, 0, 0, 0, 0);
        for residue in residues {
            match residue.kind {
                ResidueKind::AminoAcid => amino += 1,
                ResidueKind::Nucleotide if residue.name.trim().starts_with('D') => dna += 1,
                ResidueKind::Nucleotide => rna += 1,
                ResidueKind::Water => water += 1,
                ResidueKind::Ligand => ligand += 1,
            }
        }
        if amino > 0 && amino >= dna + rna {
            ChainType::Protein
        } else if dna > 0 && dna >= rna {
            ChainType::DNA
        } else if rna > 0 {
            ChainType::RNA
        } else if water > 0 && ligand == 0 {
            ChainType::Water
        } else if ligand > 0 {
            ChainType::Ligand
        } else {
            ChainType::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub id: String,                  // Chain identifier (e.g., "A", "B")
    pub chain_type: ChainType,       // Assigned together with residue properties
    pub(crate) residues: Vec<usize>, // Ordered indices of residues belonging to this chain
}

impl Chain {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            chain_type: ChainType::default(),
            residues: Vec::new(),
        }
    }

    pub fn residues(&self) -> &[usize] {
        &self.residues
    }
}
