//! The mmCIF variant: tokenized `loop_` rows.
//!
//! Only the categories the parser needs are read: `_atom_site`, `_struct.title`,
//! `_struct_conf` (helices) and `_struct_sheet_range` (strands). Column
//! positions come from the category header when it names them and fall back to
//! the layout RCSB files use.

use super::annotate::SecondaryStructureRange;
use super::error::{LineError, LineErrorKind, parse_float, parse_int, parse_optional_float};
use super::numbering::ResidueNumbering;
use crate::core::io::cif_tokens::{tokenize, unquote, value};
use crate::core::models::atom::{ParsedAtom, resolve_element};
use crate::core::models::secondary::SecondaryStructure;
use nalgebra::Point3;

const ATOM_SITE: &str = "_atom_site.";
const TITLE_KEY: &str = "_struct.title";
const TEXT_FIELD_DELIMITER: char = ';';

/// Token positions of the `_atom_site` columns the parser reads.
///
/// `None` marks a column the file does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomSiteLayout {
    pub element: Option<usize>,
    pub atom_name: Option<usize>,
    pub alt_loc: Option<usize>,
    pub residue_name: Option<usize>,
    pub chain: Option<usize>,
    pub entity: Option<usize>,
    pub sequence: Option<usize>,
    pub insertion_code: Option<usize>,
    pub x: Option<usize>,
    pub y: Option<usize>,
    pub z: Option<usize>,
    pub b_factor: Option<usize>,
}

impl Default for AtomSiteLayout {
    /// The column order written by the RCSB PDB.
    fn default() -> Self {
        Self {
            element: Some(2),
            atom_name: Some(3),
            alt_loc: Some(4),
            residue_name: Some(5),
            chain: Some(6),
            entity: Some(7),
            sequence: Some(8),
            insertion_code: Some(9),
            x: Some(10),
            y: Some(11),
            z: Some(12),
            b_factor: Some(14),
        }
    }
}

impl AtomSiteLayout {
    /// Builds a layout from `_atom_site` item names (without the category prefix).
    ///
    /// Without any header the RCSB order is assumed.
    pub fn from_tags(tags: &[&str]) -> Self {
        if tags.is_empty() {
            return Self::default();
        }
        let find = |item: &str| tags.iter().position(|tag| tag.eq_ignore_ascii_case(item));
        Self {
            element: find("type_symbol"),
            atom_name: find("label_atom_id"),
            alt_loc: find("label_alt_id"),
            residue_name: find("label_comp_id"),
            chain: find("label_asym_id"),
            entity: find("label_entity_id"),
            sequence: find("label_seq_id"),
            insertion_code: find("pdbx_PDB_ins_code"),
            x: find("Cartn_x"),
            y: find("Cartn_y"),
            z: find("Cartn_z"),
            b_factor: find("B_iso_or_equiv"),
        }
    }

    /// Reads the `_atom_site` header of a file.
    pub fn from_lines(lines: &[&str]) -> Self {
        Self::from_tags(&category_tags(lines, ATOM_SITE))
    }
}

/// Returns `true` for `ATOM` rows, and for `HETATM` rows when `include_hetero` is set.
pub fn is_atom_line(line: &str, include_hetero: bool) -> bool {
    line.starts_with("ATOM") || (include_hetero && line.starts_with("HETATM"))
}

/// Parses one `_atom_site` row, threading the residue-numbering state.
///
/// On failure the caller keeps its previous numbering state.
pub fn parse_atom(
    line: &str,
    line_number: usize,
    layout: &AtomSiteLayout,
    numbering: &ResidueNumbering,
) -> Result<(ParsedAtom, ResidueNumbering), LineError> {
    parse_atom_tokens(&tokenize(line), layout, numbering)
        .map_err(|kind| LineError::new(line_number, kind))
}

fn parse_atom_tokens(
    tokens: &[&str],
    layout: &AtomSiteLayout,
    numbering: &ResidueNumbering,
) -> Result<(ParsedAtom, ResidueNumbering), LineErrorKind> {
    let x = parse_float("x coordinate", required(tokens, layout.x, "Cartn_x")?)?;
    let y = parse_float("y coordinate", required(tokens, layout.y, "Cartn_y")?)?;
    let z = parse_float("z coordinate", required(tokens, layout.z, "Cartn_z")?)?;
    let b_factor = parse_optional_float("b-factor", optional(tokens, layout.b_factor))?;

    let name = required(tokens, layout.atom_name, "label_atom_id")?;
    let residue_name = required(tokens, layout.residue_name, "label_comp_id")?;
    let chain = required(tokens, layout.chain, "label_asym_id")?;
    let entity = optional(tokens, layout.entity);

    let label_seq = match optional(tokens, layout.sequence) {
        "" => None,
        text => Some(parse_int("residue number", text)?),
    };
    let (residue_number, next) = numbering.resolve(label_seq, chain, entity, residue_name);

    let atom = ParsedAtom {
        position: Point3::new(x, y, z),
        b_factor,
        alt_loc: optional(tokens, layout.alt_loc).to_string(),
        name: name.to_string(),
        element: resolve_element(optional(tokens, layout.element), name),
        residue_name: residue_name.to_string(),
        residue_number,
        insertion_code: optional(tokens, layout.insertion_code).to_string(),
        chain_id: chain.to_string(),
    };
    Ok((atom, next))
}

fn required<'a>(
    tokens: &[&'a str],
    index: Option<usize>,
    name: &'static str,
) -> Result<&'a str, LineErrorKind> {
    let token = index
        .and_then(|idx| tokens.get(idx).copied())
        .ok_or(LineErrorKind::MissingColumn { column: name })?;
    value(token).ok_or(LineErrorKind::MissingField { field: name })
}

fn optional<'a>(tokens: &[&'a str], index: Option<usize>) -> &'a str {
    index
        .and_then(|idx| tokens.get(idx).copied())
        .and_then(value)
        .unwrap_or("")
}

/// Reads `_struct.title`.
///
/// The value may follow the key on the same line, sit alone on the next line,
/// or be a `;`-delimited text field. The first `_struct.title` key wins.
pub fn parse_title(lines: &[&str]) -> String {
    let Some(idx) = lines
        .iter()
        .position(|line| tokenize(line).first() == Some(&TITLE_KEY))
    else {
        return String::new();
    };

    let same_line = lines[idx].trim().get(TITLE_KEY.len()..).unwrap_or("").trim();
    if !same_line.is_empty() {
        return unquote(same_line).to_string();
    }

    match lines.get(idx + 1) {
        Some(next) if next.starts_with(TEXT_FIELD_DELIMITER) => {
            read_text_field(&lines[idx + 1..])
        }
        Some(next) => unquote(next.trim()).to_string(),
        None => String::new(),
    }
}

/// Joins the lines of a text field that opens with `;` at `lines[0]`.
fn read_text_field(lines: &[&str]) -> String {
    let first = lines[0][TEXT_FIELD_DELIMITER.len_utf8()..].trim();
    std::iter::once(first)
        .chain(
            lines[1..]
                .iter()
                .take_while(|line| !line.starts_with(TEXT_FIELD_DELIMITER))
                .map(|line| line.trim()),
        )
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the item names of the first header run of `category` (e.g. `"_atom_site."`).
pub fn category_tags<'a>(lines: &[&'a str], category: &str) -> Vec<&'a str> {
    lines
        .iter()
        .map(|line| line.trim_start())
        .skip_while(|line| !line.starts_with(category))
        .take_while(|line| line.starts_with(category))
        .filter_map(|line| tokenize(line).first().copied().map(|tag| &tag[category.len()..]))
        .collect()
}

/// One data row of a category, with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
struct Row<'a> {
    line: usize,
    tokens: Vec<&'a str>,
}

/// The header and rows of one category, whether written as a `loop_` or as
/// single-row `key value` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
struct CategoryTable<'a> {
    tags: Vec<&'a str>,
    rows: Vec<Row<'a>>,
}

impl CategoryTable<'_> {
    /// Position of `item`, or `fallback` when the header does not name it.
    fn column(&self, item: &str, fallback: usize) -> Option<usize> {
        self.tags
            .iter()
            .position(|tag| tag.eq_ignore_ascii_case(item))
            .or(Some(fallback))
    }
}

fn ends_block(line: &str) -> bool {
    line.starts_with('#')
        || line.starts_with('_')
        || line.starts_with("loop_")
        || line.starts_with("data_")
}

/// Scans the block containing the `marker` line.
///
/// The header is the run of `category` lines around the marker; data rows
/// follow until a `#` line or the start of another block.
fn scan_category<'a>(lines: &[&'a str], marker: &str, category: &str) -> Option<CategoryTable<'a>> {
    let marker_idx = lines
        .iter()
        .position(|line| line.trim_start().starts_with(marker))?;
    let header_start = lines[..marker_idx]
        .iter()
        .rposition(|line| !line.trim_start().starts_with(category))
        .map_or(0, |idx| idx + 1);

    let mut table = CategoryTable::default();
    let mut key_values = Vec::new();
    let mut idx = header_start;

    while let Some(line) = lines.get(idx) {
        let line = line.trim_start();
        if !line.starts_with(category) {
            break;
        }
        let tokens = tokenize(line);
        if let Some(tag) = tokens.first().copied() {
            table.tags.push(&tag[category.len()..]);
            key_values.push(tokens.get(1).copied());
        }
        idx += 1;
    }

    if !key_values.is_empty() && key_values.iter().all(Option::is_some) {
        table.rows.push(Row {
            line: marker_idx + 1,
            tokens: key_values.into_iter().flatten().collect(),
        });
        return Some(table);
    }

    for (offset, line) in lines[idx..].iter().enumerate() {
        let line = line.trim_start();
        if ends_block(line) {
            break;
        }
        let tokens = tokenize(line);
        if !tokens.is_empty() {
            table.rows.push(Row {
                line: idx + offset + 1,
                tokens,
            });
        }
    }
    Some(table)
}

/// Where a range category keeps its chain/start/end columns.
struct RangeSource {
    marker: &'static str,
    category: &'static str,
    chain: (&'static str, usize),
    start: (&'static str, usize),
    end: (&'static str, usize),
    code: SecondaryStructure,
}

const HELIX_SOURCE: RangeSource = RangeSource {
    marker: "_struct_conf.pdbx_PDB_helix_id",
    category: "_struct_conf.",
    chain: ("beg_label_asym_id", 4),
    start: ("beg_label_seq_id", 5),
    end: ("end_label_seq_id", 9),
    code: SecondaryStructure::Helix,
};

const SHEET_SOURCE: RangeSource = RangeSource {
    marker: "_struct_sheet_range.sheet_id",
    category: "_struct_sheet_range.",
    chain: ("beg_label_asym_id", 3),
    start: ("beg_label_seq_id", 4),
    end: ("end_label_seq_id", 8),
    code: SecondaryStructure::Sheet,
};

fn parse_range_row(
    table: &CategoryTable,
    row: &Row,
    source: &RangeSource,
) -> Result<SecondaryStructureRange, LineErrorKind> {
    let (chain_item, chain_fallback) = source.chain;
    let (start_item, start_fallback) = source.start;
    let (end_item, end_fallback) = source.end;

    let chain = required(&row.tokens, table.column(chain_item, chain_fallback), chain_item)?;
    let start = required(&row.tokens, table.column(start_item, start_fallback), start_item)?;
    let end = required(&row.tokens, table.column(end_item, end_fallback), end_item)?;

    Ok(SecondaryStructureRange {
        chain_id: chain.to_string(),
        start: parse_int("start residue", start)?,
        end: parse_int("end residue", end)?,
        code: source.code,
        line: row.line,
    })
}

/// Collects helix ranges from `_struct_conf`, then strand ranges from
/// `_struct_sheet_range`.
///
/// Malformed rows are returned as line errors alongside the usable ranges.
pub fn parse_secondary_structure(
    lines: &[&str],
) -> (Vec<SecondaryStructureRange>, Vec<LineError>) {
    let mut ranges = Vec::new();
    let mut errors = Vec::new();

    for source in [&HELIX_SOURCE, &SHEET_SOURCE] {
        let Some(table) = scan_category(lines, source.marker, source.category) else {
            continue;
        };
        for row in &table.rows {
            match parse_range_row(&table, row, source) {
                Ok(range) => ranges.push(range),
                Err(kind) => errors.push(LineError::new(row.line, kind)),
            }
        }
    }
    (ranges, errors)
}
