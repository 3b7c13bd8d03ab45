use crate::cli::OutputFormat;
use molparse::engine::config::ParseConfig;

pub struct DefaultsConfig {
    pub parse: ParseConfig,
    pub output_format: OutputFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            parse: ParseConfig::default(),
            output_format: OutputFormat::Text,
        }
    }
}
