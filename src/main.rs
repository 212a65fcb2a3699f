use caption_remap::utils::{logger, validation::Validate};
use caption_remap::{CaptionPipeline, CliConfig, LocalStorage, RemapEngine, RemapError, RemapFileConfig};
use clap::Parser;

fn main() {
    let mut config = match CliConfig::try_parse() {
        Ok(config) => config,
        // --help
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => fail(RemapError::from(e)),
    };

    // 載入可選的 TOML 配置
    let file_config = match config.config.as_deref() {
        Some(path) => match RemapFileConfig::from_file(path) {
            Ok(file_config) => file_config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                std::process::exit(e.exit_code());
            }
        },
        None => RemapFileConfig::default(),
    };

    // 初始化日誌
    if file_config.json_logs() {
        logger::init_json_logger(config.verbose, file_config.log_level());
    } else {
        logger::init_cli_logger(config.verbose, file_config.log_level());
    }

    tracing::info!("Starting caption-remap CLI");

    // 驗證配置
    if let Err(e) = config.validate().and_then(|_| file_config.validate()) {
        fail(e);
    }

    config.apply_file_config(&file_config);
    tracing::debug!("CLI config: {:?}", config);

    let dry_run = config.dry_run;
    let pipeline = CaptionPipeline::new(LocalStorage::default(), config);
    let engine = RemapEngine::new(pipeline);

    match engine.run() {
        Ok(output_path) if dry_run => {
            tracing::info!("✅ Dry run completed, nothing written to {}", output_path);
        }
        Ok(output_path) => {
            tracing::info!("✅ Conversion completed, output saved to: {}", output_path);
        }
        Err(e) => fail(e),
    }
}

fn fail(e: RemapError) -> ! {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}
