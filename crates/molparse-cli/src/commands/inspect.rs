use crate::cli::{InspectArgs, OutputFormat};
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::file_progress;
use molparse::core::io::format::Format;
use molparse::core::models::store::MolecularStore;
use molparse::engine::config::ParseConfig;
use molparse::engine::diagnostics::{Diagnostic, DiagnosticReporter};
use molparse::engine::parser::StructureParser;
use molparse::workflows::load::load_path;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

/// Chain id, chain type and residue count of one chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSummary {
    pub id: String,
    pub chain_type: String,
    pub residues: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub path: PathBuf,
    pub format: Format,
    pub title: String,
    pub structures: usize,
    pub atoms: usize,
    pub residues: usize,
    pub chains: Vec<ChainSummary>,
    pub helix_residues: usize,
    pub sheet_residues: usize,
    pub has_secondary_structure: bool,
    pub line_errors: usize,
    pub last_error: Option<String>,
    /// `chain:start-end` of every range whose start residue was not found.
    pub unmatched_ranges: Vec<String>,
}

/// Parses one file into its own store and summarizes the result.
pub fn summarize(path: &Path, config: &ParseConfig) -> Result<FileSummary> {
    let unmatched = Mutex::new(Vec::new());
    let reporter = DiagnosticReporter::with_callback(Box::new(|event: &Diagnostic| {
        if let Diagnostic::UnmatchedRange { range, .. } = event {
            if let Ok(mut list) = unmatched.lock() {
                list.push(format!("{}:{}-{}", range.chain_id, range.start, range.end));
            }
        }
    }));
    let parser = StructureParser::with_reporter(config.clone(), reporter);
    let mut store = MolecularStore::new();

    let report = load_path(path, &mut store, &parser)?;
    drop(parser);

    let mut summary = FileSummary {
        path: path.to_path_buf(),
        format: report.format,
        title: report.title.clone(),
        structures: store.len(),
        atoms: 0,
        residues: 0,
        chains: Vec::new(),
        helix_residues: 0,
        sheet_residues: 0,
        has_secondary_structure: report.has_secondary_structure,
        line_errors: report.errors.len(),
        last_error: report.last_error(),
        unmatched_ranges: unmatched.into_inner().unwrap_or_default(),
    };

    for structure in store.structures() {
        summary.atoms += structure.atoms().len();
        summary.residues += structure.residues().len();
        let counts = structure.secondary_structure_counts();
        summary.helix_residues += counts.helix;
        summary.sheet_residues += counts.sheet;
    }
    if let Some(first) = store.structures().first() {
        summary.chains = first
            .chains()
            .iter()
            .map(|chain| ChainSummary {
                id: chain.id.clone(),
                chain_type: chain.chain_type.to_string(),
                residues: chain.residues().len(),
            })
            .collect();
    }
    Ok(summary)
}

pub fn render_text(summary: &FileSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", summary.path.display(), summary.format);
    if !summary.title.is_empty() {
        let _ = writeln!(out, "  Title:       {}", summary.title);
    }
    let _ = writeln!(out, "  Structures:  {}", summary.structures);
    let _ = writeln!(
        out,
        "  Atoms:       {}  Residues: {}  Chains: {}",
        summary.atoms,
        summary.residues,
        summary.chains.len()
    );
    for chain in &summary.chains {
        let _ = writeln!(
            out,
            "    Chain {:<4} {:<8} {} residue(s)",
            chain.id, chain.chain_type, chain.residues
        );
    }
    if summary.has_secondary_structure {
        let _ = writeln!(
            out,
            "  Secondary:   {} helix, {} sheet residue(s)",
            summary.helix_residues, summary.sheet_residues
        );
    } else {
        let _ = writeln!(out, "  Secondary:   none annotated");
    }
    if !summary.unmatched_ranges.is_empty() {
        let _ = writeln!(
            out,
            "  Unmatched:   {}",
            summary.unmatched_ranges.join(", ")
        );
    }
    if let Some(last) = &summary.last_error {
        let _ = writeln!(
            out,
            "  Errors:      {} (last: {})",
            summary.line_errors, last
        );
    }
    out
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    path: String,
    format: String,
    title: &'a str,
    structures: usize,
    atoms: usize,
    residues: usize,
    chains: usize,
    helix_residues: usize,
    sheet_residues: usize,
    line_errors: usize,
    unmatched_ranges: usize,
}

pub fn write_csv<W: Write>(summaries: &[FileSummary], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for summary in summaries {
        wtr.serialize(SummaryRow {
            path: summary.path.display().to_string(),
            format: summary.format.to_string(),
            title: &summary.title,
            structures: summary.structures,
            atoms: summary.atoms,
            residues: summary.residues,
            chains: summary.chains.len(),
            helix_residues: summary.helix_residues,
            sheet_residues: summary.sheet_residues,
            line_errors: summary.line_errors,
            unmatched_ranges: summary.unmatched_ranges.len(),
        })
        .map_err(|e| CliError::Other(e.into()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn run(args: InspectArgs, quiet: bool) -> Result<()> {
    let config = build_config(&args.parse, args.output)?;
    info!(
        "Inspecting {} file(s) with {:?}.",
        args.files.len(),
        config.parse
    );

    let pb = file_progress(args.files.len(), quiet);
    let results: Vec<Result<FileSummary>> = args
        .files
        .par_iter()
        .map(|path| {
            let result = summarize(path, &config.parse);
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_and_clear();

    let total = results.len();
    let mut summaries = Vec::with_capacity(total);
    for result in results {
        match result {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                warn!("{}", e);
                eprintln!("Error: {}", e);
            }
        }
    }

    let stdout = std::io::stdout();
    match config.output_format {
        OutputFormat::Text => {
            let mut out = stdout.lock();
            for summary in &summaries {
                writeln!(out, "{}", render_text(summary))?;
            }
        }
        OutputFormat::Csv => write_csv(&summaries, stdout.lock())?,
    }

    let failed = total - summaries.len();
    if failed > 0 {
        return Err(CliError::PartialFailure { failed, total });
    }
    Ok(())
}
