pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::RemapFileConfig, CliConfig};
pub use core::{etl::RemapEngine, pipeline::CaptionPipeline, remap::remap_value};
pub use utils::error::{RemapError, Result};
