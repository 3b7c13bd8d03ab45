//! Token splitting for mmCIF data lines.

/// Token meaning "value not applicable".
pub const INAPPLICABLE: &str = ".";
/// Token meaning "value unknown".
pub const UNKNOWN: &str = "?";

fn is_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b',')
}

/// Splits a line into tokens on runs of blanks and commas.
///
/// A token opening with `'` or `"` extends to the matching quote that is
/// followed by a separator or the end of the line, so quoted values may contain
/// blanks (`'MY PROTEIN'`) or the other quote character (`"O5'"`). An
/// unterminated quote is treated as an ordinary token. Quotes are kept; see
/// [`unquote`].
pub fn tokenize(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if is_separator(bytes[i]) {
            i += 1;
            continue;
        }
        let start = i;

        if matches!(bytes[i], b'\'' | b'"') {
            let quote = bytes[i];
            let closing = (i + 1..bytes.len()).find(|&j| {
                bytes[j] == quote && (j + 1 == bytes.len() || is_separator(bytes[j + 1]))
            });
            if let Some(end) = closing {
                tokens.push(&line[start..=end]);
                i = end + 1;
                continue;
            }
        }

        while i < bytes.len() && !is_separator(bytes[i]) {
            i += 1;
        }
        tokens.push(&line[start..i]);
    }
    tokens
}

/// Strips surrounding quotes when both ends carry the same quote character.
pub fn unquote(token: &str) -> &str {
    let bytes = token.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'\'' || first == b'"') {
            return &token[1..token.len() - 1];
        }
    }
    token
}

/// Returns `true` for the `.` and `?` placeholders.
pub fn is_absent(token: &str) -> bool {
    token == INAPPLICABLE || token == UNKNOWN
}

/// Returns the unquoted value of a token, or `None` for a placeholder.
pub fn value(token: &str) -> Option<&str> {
    if is_absent(token) {
        None
    } else {
        Some(unquote(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_and_comma_runs() {
        assert_eq!(
            tokenize("ATOM   1    N  N   .  MET A 1 1"),
            vec!["ATOM", "1", "N", "N", ".", "MET", "A", "1", "1"]
        );
        assert_eq!(tokenize("a,b ,, c\td"), vec!["a", "b", "c", "d"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn quoted_values_keep_inner_blanks() {
        assert_eq!(
            tokenize("_struct.title 'My Protein' x"),
            vec!["_struct.title", "'My Protein'", "x"]
        );
    }

    #[test]
    fn quote_inside_atom_name_does_not_end_token() {
        assert_eq!(
            tokenize(r#"ATOM 5 C "C5'" . DA"#),
            vec!["ATOM", "5", "C", r#""C5'""#, ".", "DA"]
        );
        assert_eq!(tokenize("HETATM 7 O O5' A"), vec!["HETATM", "7", "O", "O5'", "A"]);
    }

    #[test]
    fn unterminated_quote_is_an_ordinary_token() {
        assert_eq!(tokenize("'abc def"), vec!["'abc", "def"]);
    }

    #[test]
    fn unquote_requires_matching_ends() {
        assert_eq!(unquote("'My Protein'"), "My Protein");
        assert_eq!(unquote(r#""O5'""#), "O5'");
        assert_eq!(unquote("'abc\""), "'abc\"");
        assert_eq!(unquote("'"), "'");
        assert_eq!(unquote("CA"), "CA");
    }

    #[test]
    fn placeholders_have_no_value() {
        assert!(is_absent("."));
        assert!(is_absent("?"));
        assert!(!is_absent("'.'"));
        assert_eq!(value("."), None);
        assert_eq!(value("?"), None);
        assert_eq!(value("'A'"), Some("A"));
    }
}
