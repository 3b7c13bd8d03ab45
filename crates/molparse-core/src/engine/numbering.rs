//! Residue numbering for mmCIF atom rows.
//!
//! `label_seq_id` is `.` for every non-polymer atom (ligands, waters), so the
//! residue an atom belongs to has to be inferred from its neighbours. The scan
//! state is a plain value: each step takes the previous state and returns the
//! next one.

use crate::core::models::residue::is_water_name;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidueNumbering {
    next_residue_number: i32,
    last_chain: Option<String>,
    last_entity: Option<String>,
}

impl ResidueNumbering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_residue_number(&self) -> i32 {
        self.next_residue_number
    }

    /// Resolves the residue number of one atom row.
    ///
    /// * `label_seq` - The explicit sequence number, or `None` for a `.`/`?` placeholder.
    /// * `chain` / `entity` - The row's asym and entity ids.
    /// * `residue_name` - Used to recognize water, which never shares a residue.
    ///
    /// An explicit number is adopted as-is and the counter continues after it. A
    /// placeholder keeps the open residue when chain and entity are unchanged and
    /// the residue is not water; otherwise the counter advances by one. The very
    /// first placeholder row of a file therefore opens residue 1. The counter
    /// saturates at `i32::MAX`.
    ///
    /// # Return
    ///
    /// The residue number and the state for the next row.
    pub fn resolve(
        &self,
        label_seq: Option<i32>,
        chain: &str,
        entity: &str,
        residue_name: &str,
    ) -> (i32, ResidueNumbering) {
        if let Some(number) = label_seq {
            return (number, self.advanced_to(number.saturating_add(1), chain, entity));
        }

        let continues_residue = self.last_chain.as_deref() == Some(chain)
            && self.last_entity.as_deref() == Some(entity)
            && !is_water_name(residue_name);
        if continues_residue {
            return (self.next_residue_number, self.clone());
        }

        let number = self.next_residue_number.saturating_add(1);
        (number, self.advanced_to(number, chain, entity))
    }

    fn advanced_to(&self, next: i32, chain: &str, entity: &str) -> ResidueNumbering {
        ResidueNumbering {
            next_residue_number: next,
            last_chain: Some(chain.to_string()),
            last_entity: Some(entity.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rows: &[(Option<i32>, &str, &str, &str)]) -> Vec<i32> {
        let mut state = ResidueNumbering::new();
        rows.iter()
            .map(|&(seq, chain, entity, name)| {
                let (number, next) = state.resolve(seq, chain, entity, name);
                state = next;
                number
            })
            .collect()
    }

    #[test]
    fn first_placeholder_row_opens_residue_one() {
        assert_eq!(run(&[(None, "A", "1", "HEM")]), vec![1]);
    }

    #[test]
    fn placeholder_rows_in_same_chain_and_entity_share_a_residue() {
        let numbers = run(&[
            (None, "C", "2", "HEM"),
            (None, "C", "2", "HEM"),
            (None, "C", "2", "HEM"),
            (None, "D", "2", "HEM"),
        ]);
        assert_eq!(numbers, vec![1, 1, 1, 2]);
    }

    #[test]
    fn entity_change_opens_a_new_residue() {
        assert_eq!(
            run(&[(None, "C", "2", "NAG"), (None, "C", "3", "NAG")]),
            vec![1, 2]
        );
    }

    #[test]
    fn every_water_row_is_its_own_residue() {
        let numbers = run(&[
            (None, "E", "4", "HOH"),
            (None, "E", "4", "HOH"),
            (None, "E", "4", "HOH"),
        ]);
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn explicit_numbers_are_adopted_and_reset_the_counter() {
        let numbers = run(&[
            (Some(1), "A", "1", "MET"),
            (Some(1), "A", "1", "MET"),
            (Some(2), "A", "1", "ALA"),
            (None, "B", "2", "HEM"),
            (None, "B", "2", "HEM"),
            (None, "C", "3", "HOH"),
        ]);
        assert_eq!(numbers, vec![1, 1, 2, 4, 4, 5]);
    }

    #[test]
    fn counter_saturates_at_the_largest_sequence_id() {
        let numbers = run(&[
            (Some(i32::MAX), "A", "1", "ALA"),
            (None, "B", "2", "HEM"),
            (None, "C", "3", "HOH"),
        ]);
        assert_eq!(numbers, vec![i32::MAX, i32::MAX, i32::MAX]);
    }

    #[test]
    fn resolve_does_not_mutate_the_previous_state() {
        let state = ResidueNumbering::new();
        let (_, next) = state.resolve(Some(10), "A", "1", "GLY");
        assert_eq!(state, ResidueNumbering::new());
        assert_eq!(next.next_residue_number(), 11);
    }
}
