//! Fixed-column slicing for PDB records.
//!
//! Column ranges are 0-based and half-open, so the PDB documentation's
//! "columns 31-38" is written `30..38` here.

use std::ops::Range;

/// Returns the trimmed text of `range`, truncated to the line length.
///
/// A range starting past the end of the line, or one that would split a
/// multi-byte character, yields an empty string.
pub fn slice_and_trim(line: &str, range: Range<usize>) -> &str {
    let end = range.end.min(line.len());
    line.get(range.start..end).unwrap_or("").trim()
}

/// Returns the single non-blank character at `index`, if any.
pub fn column_char(line: &str, index: usize) -> Option<char> {
    slice_and_trim(line, index..index + 1).chars().next()
}

/// Returns everything from `start` to the end of the line with trailing blanks removed.
///
/// A `start` inside a multi-byte character moves forward to the next character.
pub fn payload_from(line: &str, start: usize) -> &str {
    let start = (start..=line.len())
        .find(|&index| line.is_char_boundary(index))
        .unwrap_or(line.len());
    line[start..].trim_end()
}
