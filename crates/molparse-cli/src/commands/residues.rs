use crate::cli::ResiduesArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use molparse::core::models::store::MolecularStore;
use molparse::engine::parser::StructureParser;
use molparse::workflows::load::load_path;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

#[derive(Serialize)]
struct ResidueRow<'a> {
    structure: &'a str,
    chain: &'a str,
    number: i32,
    insertion_code: String,
    name: &'a str,
    kind: String,
    ss: String,
}

/// Writes one CSV row per residue of every structure in `store`.
///
/// # Return
///
/// The number of rows written.
pub fn write_residues<W: Write>(store: &MolecularStore, writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for structure in store.structures() {
        for residue in structure.residues() {
            wtr.serialize(ResidueRow {
                structure: structure.id(),
                chain: &residue.chain_id,
                number: residue.number,
                insertion_code: residue.insertion_code.map(String::from).unwrap_or_default(),
                name: &residue.name,
                kind: residue.kind.to_string(),
                ss: residue.ss.to_string(),
            })
            .map_err(|e| CliError::Other(e.into()))?;
            rows += 1;
        }
    }
    wtr.flush()?;
    Ok(rows)
}

pub fn run(args: ResiduesArgs) -> Result<()> {
    let config = build_config(&args.parse, None)?;
    let parser = StructureParser::new(config.parse);
    let mut store = MolecularStore::new();

    let report = load_path(&args.input, &mut store, &parser)?;
    if let Some(last) = report.last_error() {
        info!(
            "{} record(s) skipped; last: {}",
            report.errors.len(),
            last
        );
    }

    let rows = match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            let rows = write_residues(&store, BufWriter::new(file))?;
            info!("Wrote {} residue(s) to '{}'.", rows, path.display());
            rows
        }
        None => write_residues(&store, std::io::stdout().lock())?,
    };
    info!("Residue table complete ({} row(s)).", rows);
    Ok(())
}
