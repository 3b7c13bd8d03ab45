use nalgebra::Point3;

/// Element symbol used when neither the element column nor the atom name yields one.
pub const UNKNOWN_ELEMENT: &str = "X";

/// One atom record as extracted from an input line.
///
/// This is a transient value: the parser builds it from a single `ATOM`/`HETATM`
/// line and immediately hands it to
/// [`StructureStore::add_atom`](super::store::StructureStore::add_atom), which takes
/// ownership. The store decides which residue and chain bucket the atom lands in.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAtom {
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Temperature factor; `0.0` when the record carries none.
    pub b_factor: f64,
    /// Alternate location indicator, empty when absent.
    pub alt_loc: String,
    /// Atom name (e.g. `"CA"`, `"O5'"`).
    pub name: String,
    /// Element symbol, never empty.
    pub element: String,
    /// Residue name, at most three characters for standard records.
    pub residue_name: String,
    /// Residue sequence number.
    pub residue_number: i32,
    /// Insertion code, empty when absent.
    pub insertion_code: String,
    /// Chain identifier.
    pub chain_id: String,
}

/// An atom owned by a [`Structure`](super::structure::Structure).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub name: String,
    pub element: String,
    pub alt_loc: Option<char>,
    pub position: Point3<f64>,
    pub b_factor: f64,
    /// Index of the parent residue within its structure.
    pub residue_index: usize,
}

impl Atom {
    pub(crate) fn from_parsed(parsed: ParsedAtom, residue_index: usize) -> Self {
        Self {
            alt_loc: parsed.alt_loc.chars().next(),
            name: parsed.name,
            element: parsed.element,
            position: parsed.position,
            b_factor: parsed.b_factor,
            residue_index,
        }
    }
}

/// Derives an element symbol from an atom name.
///
/// Digits are stripped from the trimmed name and the leading remaining character
/// is taken, so `"1HB"` yields `"H"` and `"CA"` yields `"C"`.
pub fn element_from_atom_name(atom_name: &str) -> String {
    atom_name
        .trim()
        .chars()
        .find(|c| !c.is_ascii_digit())
        .map(|c| c.to_string())
        .unwrap_or_else(|| UNKNOWN_ELEMENT.to_string())
}

/// Resolves the element of an atom from an optional explicit element field.
///
/// An explicit element is kept as written (trimmed, digits removed). A blank
/// field falls back to [`element_from_atom_name`].
pub fn resolve_element(explicit: &str, atom_name: &str) -> String {
    let explicit: String = explicit
        .trim()
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect();
    if explicit.is_empty() {
        element_from_atom_name(atom_name)
    } else {
        explicit
    }
}
