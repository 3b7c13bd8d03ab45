pub mod defaults;
pub mod file;

use crate::cli::{OutputFormat, ParseArgs};
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use file::{FileConfig, FileOutputConfig};
use molparse::engine::config::{FormatPreference, ParseConfig, ParseConfigBuilder};

/// Settings after merging defaults, the config file, `-S` overrides and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub parse: ParseConfig,
    pub output_format: OutputFormat,
}

/// Builds the effective configuration. Command-line flags win over `-S` values,
/// which win over the config file, which wins over built-in defaults.
pub fn build_config(args: &ParseArgs, output_override: Option<OutputFormat>) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let parse_file = file_config.parse.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let format = args
        .format
        .or(parse_file.format)
        .unwrap_or(defaults.parse.format);
    let secondary_structure = if args.no_secondary_structure {
        false
    } else {
        parse_file
            .secondary_structure
            .unwrap_or(defaults.parse.secondary_structure)
    };
    let include_hetero_atoms = if args.no_hetero {
        false
    } else {
        parse_file
            .include_hetero_atoms
            .unwrap_or(defaults.parse.include_hetero_atoms)
    };
    let max_logged_line_errors = parse_file
        .max_logged_line_errors
        .unwrap_or(defaults.parse.max_logged_line_errors);

    let parse = ParseConfigBuilder::new()
        .format(format)
        .secondary_structure(secondary_structure)
        .include_hetero_atoms(include_hetero_atoms)
        .max_logged_line_errors(max_logged_line_errors)
        .build();

    Ok(AppConfig {
        parse,
        output_format: output_override
            .or(output_file.format)
            .unwrap_or(defaults.output_format),
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let (key, value_str) = (key.trim(), value_str.trim());

        match key {
            "parse.format" => {
                config.parse.get_or_insert_with(Default::default).format =
                    Some(value_str.parse::<FormatPreference>().map_err(|e| {
                        CliError::Config(format!("Invalid value for {}: {}", key, e))
                    })?);
            }
            "parse.secondary-structure" => {
                config
                    .parse
                    .get_or_insert_with(Default::default)
                    .secondary_structure = Some(parse_bool(key, value_str)?);
            }
            "parse.include-hetero-atoms" => {
                config
                    .parse
                    .get_or_insert_with(Default::default)
                    .include_hetero_atoms = Some(parse_bool(key, value_str)?);
            }
            "parse.max-logged-line-errors" => {
                config
                    .parse
                    .get_or_insert_with(Default::default)
                    .max_logged_line_errors = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            "output.format" => {
                let format = match value_str.to_ascii_lowercase().as_str() {
                    "text" => OutputFormat::Text,
                    "csv" => OutputFormat::Csv,
                    _ => {
                        return Err(CliError::Config(format!(
                            "Invalid value for {}: '{}'. Expected 'text' or 'csv'.",
                            key, value_str
                        )));
                    }
                };
                config
                    .output
                    .get_or_insert_with(FileOutputConfig::default)
                    .format = Some(format);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unknown configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid boolean value for {}: {}", key, value)))
}
