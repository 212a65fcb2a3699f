pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::RemapFileConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "caption-remap")]
#[command(about = "Convert sentence/video caption metadata into caption annotation format")]
pub struct CliConfig {
    /// Source metadata JSON containing `sentences` and `videos`
    #[arg(value_name = "INPUT")]
    pub input_path: String,

    /// Destination for the converted annotation JSON (created or truncated)
    #[arg(value_name = "OUTPUT")]
    pub output_path: String,

    /// Optional TOML file with output and logging settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    #[arg(long, help = "Indent the output JSON")]
    pub pretty: bool,

    #[arg(long, help = "Convert without writing the output file")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Folds settings from a config file in; flags given on the command line win.
    pub fn apply_file_config(&mut self, file: &RemapFileConfig) {
        if file.pretty_output() {
            self.pretty = true;
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_path", &self.input_path)?;
        validate_path("output_path", &self.output_path)?;
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn pretty_output(&self) -> bool {
        self.pretty
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}
