//! ndforge CLI entry point

use anyhow::{Context, Result};
use ndforge::config::cli::{Cli, Command};
use ndforge::config::{cli_convert, validator, ChainConfig, LibraryConfig};
use ndforge::pipeline::{ChainPipeline, LibraryPipeline};
use ndforge::process::CommandProcessor;
use ndforge::release::chain_spec;
use ndforge::report::RunReport;
use std::time::Instant;

fn main() -> Result<()> {
    let main_start = Instant::now();

    println!("ndforge v{}", env!("CARGO_PKG_VERSION"));
    println!("Nuclear data library pipeline");
    println!();

    // Parse CLI arguments
    let parse_start = Instant::now();
    let cli = Cli::parse_args();
    cli.validate()?;

    let result = match cli.command {
        Command::Library(ref args) => {
            let config = cli_convert::build_library_config(args)?;
            if config.runtime.debug {
                eprintln!("DEBUG TIMING: CLI parse: {:.3}s", parse_start.elapsed().as_secs_f64());
            }
            run_library(config)
        }
        Command::Chain(ref args) => {
            let config = cli_convert::build_chain_config(args)?;
            if config.runtime.debug {
                eprintln!("DEBUG TIMING: CLI parse: {:.3}s", parse_start.elapsed().as_secs_f64());
            }
            run_chain(config)
        }
    };

    let report = result?;
    report.print_summary();
    println!("Total elapsed: {:.1}s", main_start.elapsed().as_secs_f64());

    if report.total_failed() > 0 {
        anyhow::bail!("{} evaluations failed processing", report.total_failed());
    }
    Ok(())
}

/// Run the HDF5 library pipeline
fn run_library(config: LibraryConfig) -> Result<RunReport> {
    validator::validate_library(&config).context("Configuration validation failed")?;
    print_library_configuration(&config);

    if config.runtime.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(RunReport::new("library", config.release.prefix()));
    }

    let processor = CommandProcessor::new(&config.tool.program, config.runtime.debug);
    let pipeline = LibraryPipeline::new(&config, &processor)?;
    let report = pipeline.run()?;

    if let Some(path) = &config.runtime.json_output {
        report.write_json(path)?;
        println!("Run report written to {}", path.display());
    }
    Ok(report)
}

/// Run the depletion chain pipeline
fn run_chain(config: ChainConfig) -> Result<RunReport> {
    validator::validate_chain(&config).context("Configuration validation failed")?;
    print_chain_configuration(&config);

    if config.runtime.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(RunReport::new("chain", config.release.to_string()));
    }

    let processor = CommandProcessor::new(&config.tool.program, config.runtime.debug);
    let pipeline = ChainPipeline::new(&config, &processor)?;
    let report = pipeline.run()?;

    if let Some(path) = &config.runtime.json_output {
        report.write_json(path)?;
        println!("Run report written to {}", path.display());
    }
    Ok(report)
}

/// Print library configuration summary
fn print_library_configuration(config: &LibraryConfig) {
    println!("Configuration:");
    println!("  Release: {}", config.release);
    let particles: Vec<String> = config.particles.iter().map(|p| p.to_string()).collect();
    println!("  Particles: {}", particles.join(", "));
    let temps: Vec<String> = config.temperatures.iter().map(|t| format!("{} K", t)).collect();
    println!("  Temperatures: {}", temps.join(", "));
    println!("  HDF5 versioning: {}", config.libver);
    println!("  Destination: {}", config.destination.display());
    println!("  Tool: {}", config.tool.program.display());
    println!("  Threads: {}", config.tool.threads);
    println!(
        "  Stages: download={}, extract={}, cleanup={}",
        config.stages.download, config.stages.extract, config.stages.cleanup
    );
}

/// Print chain configuration summary
fn print_chain_configuration(config: &ChainConfig) {
    println!("Configuration:");
    println!("  Chain release: {}", config.release);
    println!("  Output: {}", config.output.display());
    match &config.endf_path {
        Some(path) => println!("  Evaluations: {} (pre-extracted)", path.display()),
        None => {
            let spec = chain_spec(config.release);
            let archives: usize = spec.kinds.iter().map(|k| k.files.len()).sum();
            println!("  Evaluations: {} archives from release servers", archives);
        }
    }
    println!("  Tool: {}", config.tool.program.display());
}
