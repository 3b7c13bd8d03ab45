use super::atom::ParsedAtom;
use super::residue::Residue;
use super::structure::Structure;
use tracing::warn;

/// The mutation interface the parser drives.
///
/// A store receives one structure at a time: the parser pushes a structure id,
/// streams atoms into it, asks the store to index its residues, and finally
/// rewrites residue secondary-structure codes in place. Residues are addressed by
/// their insertion-ordered index within a structure.
pub trait StructureStore {
    /// Begins a new structure; subsequent atom insertions target it.
    ///
    /// # Return
    ///
    /// The index of the new structure.
    fn push_structure_id(&mut self, id: &str, title: &str) -> usize;

    /// Appends one atom to the current structure.
    fn add_atom(&mut self, atom: ParsedAtom);

    /// Makes the residues of a structure indexable by `(chain, number)`.
    fn assign_residue_properties(&mut self, structure_index: usize);

    /// Returns the residues of a structure in insertion order.
    fn residues(&self, structure_index: usize) -> &[Residue];

    /// Returns the residues of a structure for in-place mutation.
    fn residues_mut(&mut self, structure_index: usize) -> &mut [Residue];

    /// Returns the residue indices matching `(chain_id, residue_number)`.
    ///
    /// Normally zero or one index; several when insertion codes share a number.
    fn find_residue_indices(
        &self,
        structure_index: usize,
        chain_id: &str,
        residue_number: i32,
    ) -> Vec<usize>;
}

/// An in-memory [`StructureStore`] holding every pushed structure.
#[derive(Debug, Clone, Default)]
pub struct MolecularStore {
    structures: Vec<Structure>,
}

impl MolecularStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn structure(&self, index: usize) -> Option<&Structure> {
        self.structures.get(index)
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}

impl StructureStore for MolecularStore {
    fn push_structure_id(&mut self, id: &str, title: &str) -> usize {
        let index = self.structures.len();
        self.structures.push(Structure::new(id, title));
        index
    }

    fn add_atom(&mut self, atom: ParsedAtom) {
        if self.structures.is_empty() {
            warn!("Atom added before any structure was pushed; opening an unnamed structure.");
            self.structures.push(Structure::default());
        }
        if let Some(current) = self.structures.last_mut() {
            current.push_atom(atom);
        }
    }

    fn assign_residue_properties(&mut self, structure_index: usize) {
        match self.structures.get_mut(structure_index) {
            Some(structure) => structure.assign_residue_properties(),
            None => warn!(
                "Cannot assign residue properties: no structure at index {}",
                structure_index
            ),
        }
    }

    fn residues(&self, structure_index: usize) -> &[Residue] {
        match self.structures.get(structure_index) {
            Some(structure) => structure.residues(),
            None => &[],
        }
    }

    fn residues_mut(&mut self, structure_index: usize) -> &mut [Residue] {
        match self.structures.get_mut(structure_index) {
            Some(structure) => structure.residues_mut(),
            None => &mut [],
        }
    }

    fn find_residue_indices(
        &self,
        structure_index: usize,
        chain_id: &str,
        residue_number: i32,
    ) -> Vec<usize> {
        self.structures
            .get(structure_index)
            .map(|s| s.find_residue_indices(chain_id, residue_number))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn atom(number: i32, chain: &str) -> ParsedAtom {
        ParsedAtom {
            position: Point3::new(0.0, 0.0, 0.0),
            b_factor: 0.0,
            alt_loc: String::new(),
            name: "CA".to_string(),
            element: "C".to_string(),
            residue_name: "ALA".to_string(),
            residue_number: number,
            insertion_code: String::new(),
            chain_id: chain.to_string(),
        }
    }

    #[test]
    fn push_structure_id_returns_sequential_indices() {
        let mut store = MolecularStore::new();
        assert!(store.is_empty());
        assert_eq!(store.push_structure_id("a", "first"), 0);
        assert_eq!(store.push_structure_id("b", "second"), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.structure(1).unwrap().id(), "b");
        assert_eq!(store.structure(1).unwrap().title(), "second");
    }

    #[test]
    fn atoms_go_to_the_most_recent_structure() {
        let mut store = MolecularStore::new();
        store.push_structure_id("a", "");
        store.add_atom(atom(1, "A"));
        store.push_structure_id("b", "");
        store.add_atom(atom(1, "A"));
        store.add_atom(atom(2, "A"));

        assert_eq!(store.residues(0).len(), 1);
        assert_eq!(store.residues(1).len(), 2);
    }

    #[test]
    fn atom_without_structure_opens_an_unnamed_one() {
        let mut store = MolecularStore::new();
        store.add_atom(atom(1, "A"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.structure(0).unwrap().id(), "");
    }

    #[test]
    fn out_of_range_structure_index_yields_empty_results() {
        let mut store = MolecularStore::new();
        assert!(store.residues(3).is_empty());
        assert!(store.residues_mut(3).is_empty());
        assert!(store.find_residue_indices(3, "A", 1).is_empty());
        store.assign_residue_properties(3);
    }

    #[test]
    fn find_residue_indices_is_scoped_to_one_structure() {
        let mut store = MolecularStore::new();
        store.push_structure_id("a", "");
        store.add_atom(atom(5, "A"));
        store.push_structure_id("b", "");
        store.add_atom(atom(4, "A"));
        store.add_atom(atom(5, "A"));
        store.assign_residue_properties(0);
        store.assign_residue_properties(1);

        assert_eq!(store.find_residue_indices(0, "A", 5), vec![0]);
        assert_eq!(store.find_residue_indices(1, "A", 5), vec![1]);
    }
}
