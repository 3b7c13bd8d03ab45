use super::atom::{Atom, ParsedAtom};
use super::chain::{Chain, ChainType};
use super::residue::{Residue, ResidueKind};
use super::secondary::SecondaryStructure;
use std::collections::HashMap;

/// Per-code residue counts of a structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecondaryStructureCounts {
    pub helix: usize,
    pub sheet: usize,
    pub coil: usize,
}

/// One parsed molecular conformation.
///
/// Residues and chains are stored in insertion order and addressed by index.
/// The `(chain, number)` lookup only becomes available after
/// [`assign_residue_properties`](Structure::assign_residue_properties) has run.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    id: String,
    title: String,
    atoms: Vec<Atom>,
    residues: Vec<Residue>,
    chains: Vec<Chain>,
    residue_lookup: HashMap<(String, i32), Vec<usize>>,
    properties_assigned: bool,
}

impl Structure {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residues_mut(&mut self) -> &mut [Residue] {
        &mut self.residues
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn properties_assigned(&self) -> bool {
        self.properties_assigned
    }

    /// Appends an atom, opening a new residue and/or chain bucket when needed.
    ///
    /// A new residue is opened whenever `(chain, number, insertion code)` differs
    /// from the residue currently open; a new chain bucket whenever the chain id
    /// differs from the last chain. Returning to an earlier chain id later in the
    /// file opens a second bucket with the same id, mirroring file order.
    pub fn push_atom(&mut self, parsed: ParsedAtom) {
        let insertion_code = parsed.insertion_code.trim().chars().next();

        let opens_residue = match self.residues.last() {
            Some(open) => !open.matches(&parsed.chain_id, parsed.residue_number, insertion_code),
            None => true,
        };

        if opens_residue {
            let opens_chain = self
                .chains
                .last()
                .is_none_or(|chain| chain.id != parsed.chain_id);
            if opens_chain {
                self.chains.push(Chain::new(&parsed.chain_id));
            }

            let residue_index = self.residues.len();
            self.residues.push(Residue::new(
                &parsed.residue_name,
                parsed.residue_number,
                insertion_code,
                &parsed.chain_id,
            ));
            if let Some(chain) = self.chains.last_mut() {
                chain.residues.push(residue_index);
            }
            self.properties_assigned = false;
        }

        let residue_index = self.residues.len() - 1;
        let atom_index = self.atoms.len();
        self.atoms.push(Atom::from_parsed(parsed, residue_index));
        self.residues[residue_index].atoms.push(atom_index);
    }

    /// Builds the residue lookup and classifies residues and chains.
    pub fn assign_residue_properties(&mut self) {
        self.residue_lookup.clear();
        for (index, residue) in self.residues.iter_mut().enumerate() {
            residue.kind = ResidueKind::from_name(&residue.name);
            self.residue_lookup
                .entry((residue.chain_id.clone(), residue.number))
                .or_default()
                .push(index);
        }
        for chain in &mut self.chains {
            chain.chain_type =
                ChainType::classify(chain.residues.iter().map(|&i| &self.residues[i]));
        }
        self.properties_assigned = true;
    }

    /// Returns the indices of all residues numbered `residue_number` in chain `chain_id`.
    ///
    /// Several indices come back when insertion codes share a number. Before
    /// residue properties are assigned this falls back to a linear scan.
    pub fn find_residue_indices(&self, chain_id: &str, residue_number: i32) -> Vec<usize> {
        if self.properties_assigned {
            return self
                .residue_lookup
                .get(&(chain_id.to_string(), residue_number))
                .cloned()
                .unwrap_or_default();
        }
        self.residues
            .iter()
            .enumerate()
            .filter(|(_, r)| r.chain_id == chain_id && r.number == residue_number)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn secondary_structure_counts(&self) -> SecondaryStructureCounts {
        let mut counts = SecondaryStructureCounts::default();
        for residue in &self.residues {
            match residue.ss {
                SecondaryStructure::Helix => counts.helix += 1,
                SecondaryStructure::Sheet => counts.sheet += 1,
                SecondaryStructure::Coil => counts.coil += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn atom(name: &str, res_name: &str, number: i32, icode: &str, chain: &str) -> ParsedAtom {
        ParsedAtom {
            position: Point3::origin(),
            b_factor: 0.0,
            alt_loc: String::new(),
            name: name.to_string(),
            element: name[..1].to_string(),
            residue_name: res_name.to_string(),
            residue_number: number,
            insertion_code: icode.to_string(),
            chain_id: chain.to_string(),
        }
    }

    #[test]
    fn atoms_of_the_same_residue_share_a_bucket() {
        let mut structure = Structure::new("1abc", "TEST");
        structure.push_atom(atom("N", "ALA", 1, "", "A"));
        structure.push_atom(atom("CA", "ALA", 1, "", "A"));
        structure.push_atom(atom("N", "GLY", 2, "", "A"));

        assert_eq!(structure.atoms().len(), 3);
        assert_eq!(structure.residues().len(), 2);
        assert_eq!(structure.residues()[0].atoms(), &[0, 1]);
        assert_eq!(structure.residues()[1].atoms(), &[2]);
        assert_eq!(structure.atoms()[2].residue_index, 1);
        assert_eq!(structure.chains().len(), 1);
        assert_eq!(structure.chains()[0].residues(), &[0, 1]);
    }

    #[test]
    fn insertion_code_opens_a_new_residue() {
        let mut structure = Structure::new("s", "");
        structure.push_atom(atom("CA", "ALA", 52, "", "A"));
        structure.push_atom(atom("CA", "SER", 52, "A", "A"));
        assert_eq!(structure.residues().len(), 2);
        assert_eq!(structure.residues()[1].insertion_code, Some('A'));
    }

    #[test]
    fn chain_change_opens_a_new_chain_bucket() {
        let mut structure = Structure::new("s", "");
        structure.push_atom(atom("CA", "ALA", 1, "", "A"));
        structure.push_atom(atom("CA", "ALA", 1, "", "B"));
        assert_eq!(structure.residues().len(), 2);
        assert_eq!(structure.chains().len(), 2);
        assert_eq!(structure.chains()[1].id, "B");
        assert_eq!(structure.chains()[1].residues(), &[1]);
    }

    #[test]
    fn assign_residue_properties_classifies_residues_and_chains() {
        let mut structure = Structure::new("s", "");
        structure.push_atom(atom("CA", "ALA", 1, "", "A"));
        structure.push_atom(atom("O", "HOH", 101, "", "W"));
        structure.assign_residue_properties();

        assert!(structure.properties_assigned());
        assert_eq!(structure.residues()[0].kind, ResidueKind::AminoAcid);
        assert_eq!(structure.residues()[1].kind, ResidueKind::Water);
        assert_eq!(structure.chains()[0].chain_type, ChainType::Protein);
        assert_eq!(structure.chains()[1].chain_type, ChainType::Water);
    }

    #[test]
    fn find_residue_indices_uses_lookup_after_assignment() {
        let mut structure = Structure::new("s", "");
        structure.push_atom(atom("CA", "ALA", 10, "", "A"));
        structure.push_atom(atom("CA", "GLY", 10, "A", "A"));
        structure.push_atom(atom("CA", "SER", 11, "", "A"));

        assert_eq!(structure.find_residue_indices("A", 10), vec![0, 1]);

        structure.assign_residue_properties();
        assert_eq!(structure.find_residue_indices("A", 10), vec![0, 1]);
        assert_eq!(structure.find_residue_indices("A", 11), vec![2]);
        assert!(structure.find_residue_indices("B", 10).is_empty());
    }

    #[test]
    fn adding_atoms_invalidates_previous_assignment() {
        let mut structure = Structure::new("s", "");
        structure.push_atom(atom("CA", "ALA", 1, "", "A"));
        structure.assign_residue_properties();
        structure.push_atom(atom("CA", "ALA", 2, "", "A"));
        assert!(!structure.properties_assigned());
        assert_eq!(structure.find_residue_indices("A", 2), vec![1]);
    }

    #[test]
    fn secondary_structure_counts_tally_each_code() {
        let mut structure = Structure::new("s", "");
        for n in 1..=4 {
            structure.push_atom(atom("CA", "ALA", n, "", "A"));
        }
        structure.residues_mut()[0].ss = SecondaryStructure::Helix;
        structure.residues_mut()[1].ss = SecondaryStructure::Helix;
        structure.residues_mut()[2].ss = SecondaryStructure::Sheet;

        let counts = structure.secondary_structure_counts();
        assert_eq!(
            counts,
            SecondaryStructureCounts {
                helix: 2,
                sheet: 1,
                coil: 1
            }
        );
    }
}
