use super::annotate::{SecondaryStructureRange, annotate};
use super::cif::{self, AtomSiteLayout};
use super::config::ParseConfig;
use super::diagnostics::{Diagnostic, DiagnosticReporter};
use super::error::{LineError, ParseError};
use super::numbering::ResidueNumbering;
use super::pdb;
use crate::core::io::format::Format;
use crate::core::models::store::StructureStore;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// What one parse did to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    pub format: Format,
    pub title: String,
    /// Indices of the structures pushed, in order.
    pub structures: Vec<usize>,
    pub atoms_added: usize,
    /// Every dropped record, in file order.
    pub errors: Vec<LineError>,
    /// The file announced at least one helix or strand range.
    pub has_secondary_structure: bool,
    pub annotated_residues: usize,
    pub unmatched_ranges: usize,
}

impl ParseReport {
    fn new(format: Format, title: String) -> Self {
        Self {
            format,
            title,
            structures: Vec::new(),
            atoms_added: 0,
            errors: Vec::new(),
            has_secondary_structure: false,
            annotated_residues: 0,
            unmatched_ranges: 0,
        }
    }

    /// The message of the last error in the file, if any record was dropped.
    pub fn last_error(&self) -> Option<String> {
        self.errors.last().map(ToString::to_string)
    }
}

/// Collects line errors, logging at most `limit` of them.
struct LineErrorLog<'r, 'a> {
    errors: Vec<LineError>,
    limit: usize,
    reporter: &'r DiagnosticReporter<'a>,
}

impl<'r, 'a> LineErrorLog<'r, 'a> {
    fn new(limit: usize, reporter: &'r DiagnosticReporter<'a>) -> Self {
        Self {
            errors: Vec::new(),
            limit,
            reporter,
        }
    }

    fn record(&mut self, error: LineError) {
        match self.errors.len() {
            n if n < self.limit => warn!("Skipping record. {}", error),
            n if n == self.limit => warn!(
                "More than {} line errors; further errors are recorded but not logged.",
                self.limit
            ),
            _ => {}
        }
        self.reporter.report(Diagnostic::LineSkipped(error.clone()));
        self.errors.push(error);
    }

    fn extend(&mut self, errors: Vec<LineError>) {
        for error in errors {
            self.record(error);
        }
    }

    fn into_sorted(mut self) -> Vec<LineError> {
        self.errors.sort_by_key(|error| error.line);
        self.errors
    }
}

/// Drives one format variant against a [`StructureStore`].
///
/// A parser holds no per-file state; one instance can load any number of files,
/// one at a time per store.
pub struct StructureParser<'a> {
    config: ParseConfig,
    reporter: DiagnosticReporter<'a>,
}

impl Default for StructureParser<'_> {
    fn default() -> Self {
        Self::new(ParseConfig::default())
    }
}

impl<'a> StructureParser<'a> {
    pub fn new(config: ParseConfig) -> Self {
        Self::with_reporter(config, DiagnosticReporter::new())
    }

    pub fn with_reporter(config: ParseConfig, reporter: DiagnosticReporter<'a>) -> Self {
        Self { config, reporter }
    }

    /// Parses `data`, choosing the format from the configured preference and
    /// the content.
    pub fn parse<S: StructureStore + ?Sized>(
        &self,
        data: &str,
        structure_id: &str,
        store: &mut S,
    ) -> Result<ParseReport, ParseError> {
        self.parse_with_path_hint(None, data, structure_id, store)
    }

    /// Like [`parse`](Self::parse), but lets a file extension decide the format
    /// under [`FormatPreference::Auto`](super::config::FormatPreference::Auto).
    pub fn parse_with_path_hint<S: StructureStore + ?Sized>(
        &self,
        path: Option<&Path>,
        data: &str,
        structure_id: &str,
        store: &mut S,
    ) -> Result<ParseReport, ParseError> {
        let format = self.config.format.resolve(path, data);
        self.parse_format(format, data, structure_id, store)
    }

    /// Parses `data` as `format`, pushing one structure per model into `store`.
    ///
    /// Malformed records are skipped and listed in the report. The only failure
    /// is a file without atom records, in which case the store is untouched.
    #[instrument(skip_all, name = "parse", fields(id = structure_id, format = %format))]
    pub fn parse_format<S: StructureStore + ?Sized>(
        &self,
        format: Format,
        data: &str,
        structure_id: &str,
        store: &mut S,
    ) -> Result<ParseReport, ParseError> {
        let lines: Vec<&str> = data.lines().collect();
        let report = match format {
            Format::Pdb => self.parse_pdb(&lines, structure_id, store)?,
            Format::Cif => self.parse_cif(&lines, structure_id, store)?,
        };

        info!(
            "Loaded {} atom(s) into {} structure(s) from {} input '{}' ({} line error(s), {} residue(s) annotated).",
            report.atoms_added,
            report.structures.len(),
            report.format,
            structure_id,
            report.errors.len(),
            report.annotated_residues
        );
        Ok(report)
    }

    fn parse_pdb<S: StructureStore + ?Sized>(
        &self,
        lines: &[&str],
        structure_id: &str,
        store: &mut S,
    ) -> Result<ParseReport, ParseError> {
        let layout = pdb::split_models(lines, self.config.include_hetero_atoms);
        if layout.models.is_empty() {
            warn!("No atom lines found in PDB input '{}'.", structure_id);
            return Err(ParseError::NoAtomLines);
        }
        debug!(
            "Split PDB input into {} model(s) (NMR: {}).",
            layout.models.len(),
            layout.is_nmr
        );

        let mut report = ParseReport::new(Format::Pdb, pdb::parse_title(lines));
        let mut log = LineErrorLog::new(self.config.max_logged_line_errors, &self.reporter);
        let ranges = if self.config.secondary_structure {
            let (ranges, errors) = pdb::parse_secondary_structure(lines);
            log.extend(errors);
            ranges
        } else {
            Vec::new()
        };

        let model_count = layout.models.len();
        for (k, model) in layout.models.iter().enumerate() {
            let id = if model_count > 1 {
                format!("{}[{}]", structure_id, k + 1)
            } else {
                structure_id.to_string()
            };
            let index = self.push_structure(store, &id, &report.title);
            report.structures.push(index);

            for &(line_number, line) in model {
                match pdb::parse_atom(line, line_number) {
                    Ok(atom) => {
                        store.add_atom(atom);
                        report.atoms_added += 1;
                    }
                    Err(error) => log.record(error),
                }
            }
            self.finish_structure(store, index, &ranges, &mut report);
        }

        report.has_secondary_structure = !ranges.is_empty();
        report.errors = log.into_sorted();
        Ok(report)
    }

    fn parse_cif<S: StructureStore + ?Sized>(
        &self,
        lines: &[&str],
        structure_id: &str,
        store: &mut S,
    ) -> Result<ParseReport, ParseError> {
        let include_hetero = self.config.include_hetero_atoms;
        let atom_lines: Vec<(usize, &str)> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| cif::is_atom_line(line, include_hetero))
            .map(|(idx, &line)| (idx + 1, line))
            .collect();
        if atom_lines.is_empty() {
            warn!("No atom lines found in mmCIF input '{}'.", structure_id);
            return Err(ParseError::NoAtomLines);
        }

        let mut report = ParseReport::new(Format::Cif, cif::parse_title(lines));
        let mut log = LineErrorLog::new(self.config.max_logged_line_errors, &self.reporter);
        let ranges = if self.config.secondary_structure {
            let (ranges, errors) = cif::parse_secondary_structure(lines);
            log.extend(errors);
            ranges
        } else {
            Vec::new()
        };

        let layout = AtomSiteLayout::from_lines(lines);
        let index = self.push_structure(store, structure_id, &report.title);
        report.structures.push(index);

        let mut numbering = ResidueNumbering::new();
        for (line_number, line) in atom_lines {
            match cif::parse_atom(line, line_number, &layout, &numbering) {
                Ok((atom, next)) => {
                    store.add_atom(atom);
                    report.atoms_added += 1;
                    numbering = next;
                }
                Err(error) => log.record(error),
            }
        }
        self.finish_structure(store, index, &ranges, &mut report);

        report.has_secondary_structure = !ranges.is_empty();
        report.errors = log.into_sorted();
        Ok(report)
    }

    fn push_structure<S: StructureStore + ?Sized>(
        &self,
        store: &mut S,
        id: &str,
        title: &str,
    ) -> usize {
        let index = store.push_structure_id(id, title);
        debug!("Pushed structure '{}' at index {}.", id, index);
        self.reporter.report(Diagnostic::StructurePushed {
            index,
            id: id.to_string(),
        });
        index
    }

    fn finish_structure<S: StructureStore + ?Sized>(
        &self,
        store: &mut S,
        index: usize,
        ranges: &[SecondaryStructureRange],
        report: &mut ParseReport,
    ) {
        store.assign_residue_properties(index);
        if !self.config.secondary_structure {
            return;
        }
        let summary = annotate(store, index, ranges, &self.reporter);
        report.annotated_residues += summary.painted;
        report.unmatched_ranges += summary.unmatched;
    }
}

/// Parses PDB text with the default configuration.
pub fn parse_pdb_data<S: StructureStore + ?Sized>(
    data: &str,
    structure_id: &str,
    store: &mut S,
) -> Result<ParseReport, ParseError> {
    StructureParser::default().parse_format(Format::Pdb, data, structure_id, store)
}

/// Parses mmCIF text with the default configuration.
pub fn parse_cif_data<S: StructureStore + ?Sized>(
    data: &str,
    structure_id: &str,
    store: &mut S,
) -> Result<ParseReport, ParseError> {
    StructureParser::default().parse_format(Format::Cif, data, structure_id, store)
}
