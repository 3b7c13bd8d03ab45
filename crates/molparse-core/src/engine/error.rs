use thiserror::Error;

/// A record that could not be turned into an atom or a secondary-structure range.
///
/// Line errors never abort a file; the offending line is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error on line {line}: {kind}")]
pub struct LineError {
    /// 1-based line number in the input.
    pub line: usize,
    pub kind: LineErrorKind,
}

impl LineError {
    pub fn new(line: usize, kind: LineErrorKind) -> Self {
        Self { line, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineErrorKind {
    #[error("Line is too short for the record ({actual} chars, at least {required} required)")]
    LineTooShort { required: usize, actual: usize },
    #[error("Invalid float format in {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Invalid integer format in {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Required field {field} is empty")]
    MissingField { field: &'static str },
    #[error("Row has no value for column '{column}'")]
    MissingColumn { column: &'static str },
}

/// File-level failure: nothing was pushed into the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("No atom lines found in input")]
    NoAtomLines,
}

/// Parses a required float field, mapping failure to a [`LineErrorKind`].
pub(crate) fn parse_float(field: &'static str, value: &str) -> Result<f64, LineErrorKind> {
    if value.is_empty() {
        return Err(LineErrorKind::MissingField { field });
    }
    value.parse().map_err(|_| LineErrorKind::InvalidFloat {
        field,
        value: value.to_string(),
    })
}

/// Parses a float field that defaults to `0.0` when blank.
pub(crate) fn parse_optional_float(
    field: &'static str,
    value: &str,
) -> Result<f64, LineErrorKind> {
    if value.is_empty() {
        Ok(0.0)
    } else {
        parse_float(field, value)
    }
}

/// Parses a required integer field, mapping failure to a [`LineErrorKind`].
pub(crate) fn parse_int(field: &'static str, value: &str) -> Result<i32, LineErrorKind> {
    if value.is_empty() {
        return Err(LineErrorKind::MissingField { field });
    }
    value.parse().map_err(|_| LineErrorKind::InvalidInt {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_error_message_names_the_line() {
        let err = LineError::new(
            42,
            LineErrorKind::InvalidFloat {
                field: "x coordinate",
                value: "1.2.3".into(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Parse error on line 42: Invalid float format in x coordinate (value: '1.2.3')"
        );
    }

    #[test]
    fn parse_float_distinguishes_blank_from_garbage() {
        assert_eq!(parse_float("x", "1.5"), Ok(1.5));
        assert_eq!(
            parse_float("x", ""),
            Err(LineErrorKind::MissingField { field: "x" })
        );
        assert!(matches!(
            parse_float("x", "abc"),
            Err(LineErrorKind::InvalidFloat { .. })
        ));
    }

    #[test]
    fn optional_float_defaults_to_zero() {
        assert_eq!(parse_optional_float("b-factor", ""), Ok(0.0));
        assert_eq!(parse_optional_float("b-factor", "20.00"), Ok(20.0));
        assert!(parse_optional_float("b-factor", "2O.00").is_err());
    }

    #[test]
    fn parse_int_rejects_non_integers() {
        assert_eq!(parse_int("residue number", "-3"), Ok(-3));
        assert!(matches!(
            parse_int("residue number", "1A"),
            Err(LineErrorKind::InvalidInt { .. })
        ));
        assert!(matches!(
            parse_int("residue number", ""),
            Err(LineErrorKind::MissingField { .. })
        ));
    }

    #[test]
    fn no_atom_lines_has_a_distinct_message() {
        assert_eq!(
            ParseError::NoAtomLines.to_string(),
            "No atom lines found in input"
        );
    }
}
