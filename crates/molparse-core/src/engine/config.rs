use crate::core::io::format::Format;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_MAX_LOGGED_LINE_ERRORS: usize = 20;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown format '{0}'. Expected 'auto', 'pdb' or 'cif'.")]
pub struct ParseFormatPreferenceError(pub String);

/// How the input format is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatPreference {
    /// File extension first, then content sniffing.
    #[default]
    Auto,
    Pdb,
    Cif,
}

impl FormatPreference {
    pub fn resolve(self, path: Option<&Path>, content: &str) -> Format {
        match self {
            FormatPreference::Auto => Format::detect(path, content),
            FormatPreference::Pdb => Format::Pdb,
            FormatPreference::Cif => Format::Cif,
        }
    }
}

impl FromStr for FormatPreference {
    type Err = ParseFormatPreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(FormatPreference::Auto),
            "pdb" | "ent" => Ok(FormatPreference::Pdb),
            "cif" | "mmcif" => Ok(FormatPreference::Cif),
            _ => Err(ParseFormatPreferenceError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    pub format: FormatPreference,
    /// Run the secondary-structure annotator after atoms are loaded.
    pub secondary_structure: bool,
    /// Keep `HETATM` records (ligands, waters, modified residues).
    pub include_hetero_atoms: bool,
    /// Number of line errors logged per file; all of them are still recorded.
    pub max_logged_line_errors: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            format: FormatPreference::Auto,
            secondary_structure: true,
            include_hetero_atoms: true,
            max_logged_line_errors: DEFAULT_MAX_LOGGED_LINE_ERRORS,
        }
    }
}

#[derive(Default)]
pub struct ParseConfigBuilder {
    format: Option<FormatPreference>,
    secondary_structure: Option<bool>,
    include_hetero_atoms: Option<bool>,
    max_logged_line_errors: Option<usize>,
}

impl ParseConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: FormatPreference) -> Self {
        self.format = Some(format);
        self
    }
    pub fn secondary_structure(mut self, enabled: bool) -> Self {
        self.secondary_structure = Some(enabled);
        self
    }
    pub fn include_hetero_atoms(mut self, include: bool) -> Self {
        self.include_hetero_atoms = Some(include);
        self
    }
    pub fn max_logged_line_errors(mut self, limit: usize) -> Self {
        self.max_logged_line_errors = Some(limit);
        self
    }

    pub fn build(self) -> ParseConfig {
        let defaults = ParseConfig::default();
        ParseConfig {
            format: self.format.unwrap_or(defaults.format),
            secondary_structure: self
                .secondary_structure
                .unwrap_or(defaults.secondary_structure),
            include_hetero_atoms: self
                .include_hetero_atoms
                .unwrap_or(defaults.include_hetero_atoms),
            max_logged_line_errors: self
                .max_logged_line_errors
                .unwrap_or(defaults.max_logged_line_errors),
        }
    }
}
