use crate::cli::OutputFormat;
use crate::error::{CliError, Result};
use molparse::engine::config::FormatPreference;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileParseConfig {
    pub format: Option<FormatPreference>,
    pub secondary_structure: Option<bool>,
    pub include_hetero_atoms: Option<bool>,
    pub max_logged_line_errors: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    pub format: Option<OutputFormat>,
}

/// The TOML configuration file; every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub parse: Option<FileParseConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|source| CliError::FileParsing {
            path: path.to_path_buf(),
            source: source.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_file_is_read() {
        let config = FileConfig::from_toml(
            r#"
[parse]
format = "cif"
secondary-structure = false
include-hetero-atoms = false
max-logged-line-errors = 3

[output]
format = "csv"
"#,
        )
        .unwrap();
        let parse = config.parse.unwrap();
        assert_eq!(parse.format, Some(FormatPreference::Cif));
        assert_eq!(parse.secondary_structure, Some(false));
        assert_eq!(parse.include_hetero_atoms, Some(false));
        assert_eq!(parse.max_logged_line_errors, Some(3));
        assert_eq!(config.output.unwrap().format, Some(OutputFormat::Csv));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("[parse]\nhetero = true\n").is_err());
        assert!(FileConfig::from_toml("[render]\n").is_err());
    }

    #[test]
    fn malformed_file_is_a_file_parsing_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("molparse.toml");
        fs::write(&path, "this is not toml").unwrap();
        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            FileConfig::from_file(&dir.path().join("absent.toml")),
            Err(CliError::Io(_))
        ));
    }
}
