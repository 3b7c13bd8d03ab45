use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The two supported structure file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Fixed-column Protein Data Bank format.
    Pdb,
    /// Macromolecular Crystallographic Information File (mmCIF).
    Cif,
}

impl Format {
    /// Picks a format from a file extension (`.pdb`, `.ent`, `.cif`, `.mmcif`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdb" | "ent" => Some(Format::Pdb),
            "cif" | "mmcif" => Some(Format::Cif),
            _ => None,
        }
    }

    /// Guesses the format from file content.
    ///
    /// mmCIF files open with a `data_` block header and are organized in
    /// `loop_`/`_category.item` lines; anything else is treated as PDB.
    pub fn sniff(content: &str) -> Self {
        let first = content
            .lines()
            .map(str::trim_start)
            .find(|line| !line.is_empty() && !line.starts_with('#'));
        match first {
            Some(line)
                if line.starts_with("data_")
                    || line.starts_with("loop_")
                    || line.starts_with('_') =>
            {
                Format::Cif
            }
            _ => Format::Pdb,
        }
    }

    /// Uses the extension of `path` when it is conclusive, content otherwise.
    pub fn detect(path: Option<&Path>, content: &str) -> Self {
        path.and_then(Self::from_path)
            .unwrap_or_else(|| Self::sniff(content))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Format::Pdb => "PDB",
                Format::Cif => "mmCIF",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_decides_when_known() {
        assert_eq!(Format::from_path(Path::new("1crn.pdb")), Some(Format::Pdb));
        assert_eq!(Format::from_path(Path::new("pdb1crn.ENT")), Some(Format::Pdb));
        assert_eq!(Format::from_path(Path::new("1crn.cif")), Some(Format::Cif));
        assert_eq!(Format::from_path(Path::new("1crn.mmcif")), Some(Format::Cif));
        assert_eq!(Format::from_path(Path::new("1crn.txt")), None);
        assert_eq!(Format::from_path(Path::new("1crn")), None);
    }

    #[test]
    fn sniff_recognizes_cif_markers() {
        assert_eq!(Format::sniff("data_1CRN\n#\n_entry.id 1CRN\n"), Format::Cif);
        assert_eq!(Format::sniff("\n# comment\nloop_\n_atom_site.id\n"), Format::Cif);
        assert_eq!(Format::sniff("HEADER    PLANT PROTEIN\nATOM ..."), Format::Pdb);
        assert_eq!(Format::sniff(""), Format::Pdb);
    }

    #[test]
    fn detect_falls_back_to_content() {
        let cif = "data_X\n_atom_site.id\n";
        assert_eq!(Format::detect(Some(Path::new("x.pdb")), cif), Format::Pdb);
        assert_eq!(Format::detect(Some(Path::new("x.dat")), cif), Format::Cif);
        assert_eq!(Format::detect(None, "ATOM"), Format::Pdb);
    }

    #[test]
    fn display_names() {
        assert_eq!(Format::Pdb.to_string(), "PDB");
        assert_eq!(Format::Cif.to_string(), "mmCIF");
    }
}
