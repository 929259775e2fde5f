//! lspgen CLI
//!
//! Entry point for generating the C++ LSP bindings, inspecting the
//! declaration order and bootstrapping a configuration file.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use clap::Parser;
use config::Config;
use lspgen_cli::{Cli, CliError, Commands, GenerateArgs, ModelArgs, Result};
use pipeline::GenerationContext;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let result = match cli.cmd {
        Commands::Generate(args) => generate(&args),
        Commands::Order(args) => order(&args),
        Commands::InitConfig { path } => init_config(path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let config = args.resolve()?;
    logging::init(Some(config.logging.level.as_str()));

    let ctx = GenerationContext::from_config(&config);
    let report = pipeline::run(&ctx)?;

    for failure in &report.failed {
        error!("{}", failure);
    }
    info!(
        "Generated {} artifact(s) in {} with {} model warning(s) (checksum {})",
        report.written.len(),
        ctx.output_dir.display(),
        report.warnings.len(),
        report.checksum
    );

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::ArtifactsFailed(report.failed.len()))
    }
}

fn order(args: &ModelArgs) -> Result<()> {
    let config = args.resolve()?;
    logging::init(Some(config.logging.level.as_str()));

    let ctx = GenerationContext::from_config(&config);
    for name in pipeline::emission_order(&ctx)? {
        println!("{}", name);
    }
    Ok(())
}

fn init_config(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_path()?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(config::ConfigError::from)?;
    }
    Config::default().save(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
