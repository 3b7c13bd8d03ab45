//! The PDB variant: fixed-column records.

use super::annotate::SecondaryStructureRange;
use super::error::{LineError, LineErrorKind, parse_float, parse_int, parse_optional_float};
use crate::core::io::pdb_columns::{column_char, payload_from, slice_and_trim};
use crate::core::models::atom::{ParsedAtom, resolve_element};
use crate::core::models::secondary::SecondaryStructure;
use nalgebra::Point3;
use std::ops::Range;
use tracing::debug;

// ATOM/HETATM columns (0-based, half-open).
const ATOM_NAME: Range<usize> = 12..16;
const ALT_LOC: usize = 16;
const RESIDUE_NAME: Range<usize> = 17..20;
const CHAIN_ID: Range<usize> = 21..22;
const RESIDUE_NUMBER: Range<usize> = 22..26;
const INSERTION_CODE: usize = 26;
const X: Range<usize> = 30..38;
const Y: Range<usize> = 38..46;
const Z: Range<usize> = 46..54;
const B_FACTOR: Range<usize> = 60..66;
const ELEMENT: Range<usize> = 76..78;
const MIN_ATOM_LINE: usize = 54;

const TITLE_PAYLOAD_START: usize = 10;

/// Column layout of the chain/start/end fields of a secondary-structure record.
struct RangeColumns {
    chain: Range<usize>,
    start: Range<usize>,
    end: Range<usize>,
    code: SecondaryStructure,
}

const HELIX_COLUMNS: RangeColumns = RangeColumns {
    chain: 19..20,
    start: 21..25,
    end: 33..37,
    code: SecondaryStructure::Helix,
};

const SHEET_COLUMNS: RangeColumns = RangeColumns {
    chain: 21..22,
    start: 22..26,
    end: 33..37,
    code: SecondaryStructure::Sheet,
};

/// A line kept for later parsing, tagged with its 1-based line number.
pub type NumberedLine<'a> = (usize, &'a str);

/// The result of splitting a PDB file into models.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbLayout<'a> {
    /// `EXPDTA` mentions NMR.
    pub is_nmr: bool,
    /// Atom lines of each non-empty model, in file order.
    pub models: Vec<Vec<NumberedLine<'a>>>,
}

/// Returns `true` for `ATOM` lines, and for `HETATM` lines when `include_hetero` is set.
pub fn is_atom_line(line: &str, include_hetero: bool) -> bool {
    line.starts_with("ATOM") || (include_hetero && line.starts_with("HETATM"))
}

fn is_terminator(line: &str) -> bool {
    line.starts_with("END")
}

/// Scans a PDB file once, splitting atom lines into models.
///
/// Every `END*` line closes the current model. When `EXPDTA` declares an NMR
/// experiment the first terminator ends the scan, so an NMR ensemble yields a
/// single representative model. Models with no atom lines are dropped.
pub fn split_models<'a>(lines: &[&'a str], include_hetero: bool) -> PdbLayout<'a> {
    let mut layout = PdbLayout::default();
    let mut current: Vec<NumberedLine<'a>> = Vec::new();

    for (idx, &line) in lines.iter().enumerate() {
        if is_atom_line(line, include_hetero) {
            current.push((idx + 1, line));
        } else if line.starts_with("EXPDTA") && line.contains("NMR") {
            layout.is_nmr = true;
        } else if is_terminator(line) {
            layout.models.push(std::mem::take(&mut current));
            if layout.is_nmr {
                debug!("NMR ensemble: keeping the first model only (line {}).", idx + 1);
                break;
            }
        }
    }
    layout.models.push(current);
    layout.models.retain(|model| !model.is_empty());
    layout
}

/// Concatenates the payload of every `TITLE` line, in file order.
pub fn parse_title(lines: &[&str]) -> String {
    lines
        .iter()
        .filter(|line| line.starts_with("TITLE"))
        .map(|line| payload_from(line, TITLE_PAYLOAD_START))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parses one `ATOM`/`HETATM` line.
///
/// Coordinates and residue number are required; a blank temperature factor
/// defaults to `0.0` but a garbled one fails the line. A blank element column is
/// derived from the atom name.
pub fn parse_atom(line: &str, line_number: usize) -> Result<ParsedAtom, LineError> {
    parse_atom_fields(line).map_err(|kind| LineError::new(line_number, kind))
}

fn parse_atom_fields(line: &str) -> Result<ParsedAtom, LineErrorKind> {
    if line.len() < MIN_ATOM_LINE {
        return Err(LineErrorKind::LineTooShort {
            required: MIN_ATOM_LINE,
            actual: line.len(),
        });
    }

    let name = slice_and_trim(line, ATOM_NAME);
    if name.is_empty() {
        return Err(LineErrorKind::MissingField { field: "atom name" });
    }
    let x = parse_float("x coordinate", slice_and_trim(line, X))?;
    let y = parse_float("y coordinate", slice_and_trim(line, Y))?;
    let z = parse_float("z coordinate", slice_and_trim(line, Z))?;
    let residue_number = parse_int("residue number", slice_and_trim(line, RESIDUE_NUMBER))?;
    let b_factor = parse_optional_float("b-factor", slice_and_trim(line, B_FACTOR))?;

    Ok(ParsedAtom {
        position: Point3::new(x, y, z),
        b_factor,
        alt_loc: column_char(line, ALT_LOC).map(String::from).unwrap_or_default(),
        name: name.to_string(),
        element: resolve_element(slice_and_trim(line, ELEMENT), name),
        residue_name: slice_and_trim(line, RESIDUE_NAME).to_string(),
        residue_number,
        insertion_code: column_char(line, INSERTION_CODE)
            .map(String::from)
            .unwrap_or_default(),
        chain_id: slice_and_trim(line, CHAIN_ID).to_string(),
    })
}

/// Collects the ranges of every `HELIX` and `SHEET` record, in file order.
///
/// Malformed records are returned as line errors alongside the usable ranges.
pub fn parse_secondary_structure(
    lines: &[&str],
) -> (Vec<SecondaryStructureRange>, Vec<LineError>) {
    let mut ranges = Vec::new();
    let mut errors = Vec::new();

    for (idx, &line) in lines.iter().enumerate() {
        let columns = if line.starts_with("HELIX") {
            &HELIX_COLUMNS
        } else if line.starts_with("SHEET") {
            &SHEET_COLUMNS
        } else {
            continue;
        };
        match parse_range(line, idx + 1, columns) {
            Ok(range) => ranges.push(range),
            Err(kind) => errors.push(LineError::new(idx + 1, kind)),
        }
    }
    (ranges, errors)
}

fn parse_range(
    line: &str,
    line_number: usize,
    columns: &RangeColumns,
) -> Result<SecondaryStructureRange, LineErrorKind> {
    if line.len() < columns.end.end {
        return Err(LineErrorKind::LineTooShort {
            required: columns.end.end,
            actual: line.len(),
        });
    }
    Ok(SecondaryStructureRange {
        chain_id: slice_and_trim(line, columns.chain.clone()).to_string(),
        start: parse_int("start residue", slice_and_trim(line, columns.start.clone()))?,
        end: parse_int("end residue", slice_and_trim(line, columns.end.clone()))?,
        code: columns.code,
        line: line_number,
    })
}
