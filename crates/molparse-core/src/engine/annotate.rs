use super::diagnostics::{Diagnostic, DiagnosticReporter};
use crate::core::models::residue::Residue;
use crate::core::models::secondary::SecondaryStructure;
use crate::core::models::store::StructureStore;
use tracing::debug;

/// A residue range announced by a `HELIX`/`SHEET` record or an mmCIF loop row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryStructureRange {
    pub chain_id: String,
    pub start: i32,
    pub end: i32,
    pub code: SecondaryStructure,
    /// 1-based line the range was read from.
    pub line: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    /// Residue assignments written (a residue covered twice counts twice).
    pub painted: usize,
    /// Ranges whose start residue could not be found.
    pub unmatched: usize,
}

/// Paints `range.code` onto consecutive residues starting at `start_index`.
///
/// The walk stops at the first residue numbered past `range.end`, at the first
/// residue of a different chain, or at the end of the slice, whichever comes
/// first.
///
/// # Return
///
/// The number of residues painted.
pub fn paint_range(
    residues: &mut [Residue],
    start_index: usize,
    range: &SecondaryStructureRange,
) -> usize {
    let mut painted = 0;
    for residue in residues.iter_mut().skip(start_index) {
        if residue.chain_id != range.chain_id || residue.number > range.end {
            break;
        }
        residue.ss = range.code;
        painted += 1;
    }
    painted
}

/// Applies every range to one structure of `store`, in order.
///
/// Each range is anchored at the first residue matching `(chain, start)`. A range
/// whose start residue is missing paints nothing and is reported as
/// [`Diagnostic::UnmatchedRange`]; it is not an error.
pub fn annotate<S: StructureStore + ?Sized>(
    store: &mut S,
    structure_index: usize,
    ranges: &[SecondaryStructureRange],
    reporter: &DiagnosticReporter,
) -> AnnotationSummary {
    let mut summary = AnnotationSummary::default();

    for range in ranges {
        let anchor = store
            .find_residue_indices(structure_index, &range.chain_id, range.start)
            .first()
            .copied();

        match anchor {
            Some(start_index) => {
                summary.painted +=
                    paint_range(store.residues_mut(structure_index), start_index, range);
            }
            None => {
                debug!(
                    "No residue {}:{} for {} range on line {}",
                    range.chain_id, range.start, range.code, range.line
                );
                summary.unmatched += 1;
                reporter.report(Diagnostic::UnmatchedRange {
                    structure_index,
                    range: range.clone(),
                });
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::ParsedAtom;
    use crate::core::models::store::MolecularStore;
    use nalgebra::Point3;
    use std::sync::Mutex;

    fn atom(number: i32, chain: &str) -> ParsedAtom {
        ParsedAtom {
            position: Point3::origin(),
            b_factor: 0.0,
            alt_loc: String::new(),
            name: "CA".into(),
            element: "C".into(),
            residue_name: "ALA".into(),
            residue_number: number,
            insertion_code: String::new(),
            chain_id: chain.into(),
        }
    }

    fn store_with(residues: &[(i32, &str)]) -> MolecularStore {
        let mut store = MolecularStore::new();
        store.push_structure_id("test", "");
        for &(number, chain) in residues {
            store.add_atom(atom(number, chain));
        }
        store.assign_residue_properties(0);
        store
    }

    fn helix(chain: &str, start: i32, end: i32) -> SecondaryStructureRange {
        SecondaryStructureRange {
            chain_id: chain.into(),
            start,
            end,
            code: SecondaryStructure::Helix,
            line: 1,
        }
    }

    fn codes(store: &MolecularStore) -> Vec<(i32, char)> {
        store
            .residues(0)
            .iter()
            .map(|r| (r.number, r.ss.code()))
            .collect()
    }

    #[test]
    fn helix_range_paints_inclusive_span_only() {
        let residues: Vec<(i32, &str)> = (8..=17).map(|n| (n, "A")).collect();
        let mut store = store_with(&residues);

        let summary = annotate(&mut store, 0, &[helix("A", 10, 15)], &DiagnosticReporter::new());

        assert_eq!(summary.painted, 6);
        let painted: Vec<i32> = store
            .residues(0)
            .iter()
            .filter(|r| r.ss == SecondaryStructure::Helix)
            .map(|r| r.number)
            .collect();
        assert_eq!(painted, vec![10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn walk_halts_when_chain_changes() {
        let mut store = store_with(&[(10, "A"), (11, "A"), (12, "B"), (13, "B")]);
        annotate(&mut store, 0, &[helix("A", 10, 15)], &DiagnosticReporter::new());
        assert_eq!(
            codes(&store),
            vec![(10, 'H'), (11, 'H'), (12, ' '), (13, ' ')]
        );
    }

    #[test]
    fn walk_stops_at_end_of_residues() {
        let mut store = store_with(&[(1, "A"), (2, "A")]);
        let summary = annotate(&mut store, 0, &[helix("A", 1, 100)], &DiagnosticReporter::new());
        assert_eq!(summary.painted, 2);
    }

    #[test]
    fn reversed_range_paints_nothing() {
        let mut store = store_with(&[(5, "A"), (6, "A")]);
        let summary = annotate(&mut store, 0, &[helix("A", 6, 5)], &DiagnosticReporter::new());
        assert_eq!(summary.painted, 0);
        assert_eq!(summary.unmatched, 0);
    }

    #[test]
    fn later_ranges_overwrite_earlier_ones() {
        let mut store = store_with(&[(1, "A"), (2, "A"), (3, "A")]);
        let strand = SecondaryStructureRange {
            code: SecondaryStructure::Sheet,
            ..helix("A", 2, 3)
        };
        annotate(
            &mut store,
            0,
            &[helix("A", 1, 3), strand],
            &DiagnosticReporter::new(),
        );
        assert_eq!(codes(&store), vec![(1, 'H'), (2, 'E'), (3, 'E')]);
    }

    #[test]
    fn unmatched_start_is_silent_but_reported() {
        let mut store = store_with(&[(1, "A"), (2, "A")]);
        let seen = Mutex::new(Vec::new());
        let reporter = DiagnosticReporter::with_callback(Box::new(|event| {
            seen.lock().unwrap().push(event.clone());
        }));

        let summary = annotate(&mut store, 0, &[helix("Z", 1, 2)], &reporter);
        drop(reporter);

        assert_eq!(summary, AnnotationSummary { painted: 0, unmatched: 1 });
        assert!(store
            .residues(0)
            .iter()
            .all(|r| r.ss == SecondaryStructure::Coil));
        let seen = seen.into_inner().unwrap();
        assert_eq!(
            seen,
            vec![Diagnostic::UnmatchedRange {
                structure_index: 0,
                range: helix("Z", 1, 2)
            }]
        );
    }

    #[test]
    fn insertion_codes_inside_the_range_are_painted() {
        let mut store = MolecularStore::new();
        store.push_structure_id("icode", "");
        store.add_atom(atom(10, "A"));
        let mut inserted = atom(10, "A");
        inserted.insertion_code = "A".into();
        store.add_atom(inserted);
        store.add_atom(atom(11, "A"));
        store.assign_residue_properties(0);

        let summary = annotate(&mut store, 0, &[helix("A", 10, 10)], &DiagnosticReporter::new());
        assert_eq!(summary.painted, 2);
        assert_eq!(store.residues(0)[2].ss, SecondaryStructure::Coil);
    }
}
