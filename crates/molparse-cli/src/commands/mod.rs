pub mod inspect;
pub mod residues;
