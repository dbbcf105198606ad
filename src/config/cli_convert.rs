//! CLI to Config conversion utilities

use super::cli::{ChainArgs, ChainReleaseArg, LibVerArg, LibraryArgs, ParticleArg, ReleaseArg};
use super::{ChainConfig, FileConfig, LibraryConfig, RuntimeConfig, StageToggles, ToolConfig, DEFAULT_TEMPERATURES};
use crate::process::command::DEFAULT_TOOL;
use crate::process::LibVer;
use crate::release::{ChainRelease, Particle, Release};
use anyhow::{Context, Result};
use std::path::Path;

/// Convert CLI ReleaseArg to a release table key
pub fn convert_release(arg: ReleaseArg) -> Release {
    match arg {
        ReleaseArg::Vii1 => Release::EndfbVii1,
        ReleaseArg::Viii0 => Release::EndfbViii0,
        ReleaseArg::Viii1 => Release::EndfbViii1,
        ReleaseArg::Jendl5 => Release::Jendl5,
    }
}

/// Convert CLI ChainReleaseArg to a chain table key
pub fn convert_chain_release(arg: ChainReleaseArg) -> ChainRelease {
    match arg {
        ChainReleaseArg::Endfb81 => ChainRelease::Endfb81,
        ChainReleaseArg::Jeff33 => ChainRelease::Jeff33,
        ChainReleaseArg::Jeff40 => ChainRelease::Jeff40,
        ChainReleaseArg::Jendl5 => ChainRelease::Jendl5,
    }
}

/// Convert CLI ParticleArg to the release-table particle
pub fn convert_particle(arg: ParticleArg) -> Particle {
    match arg {
        ParticleArg::Neutron => Particle::Neutron,
        ParticleArg::Thermal => Particle::Thermal,
        ParticleArg::Photon => Particle::Photon,
        ParticleArg::Wmp => Particle::Wmp,
    }
}

/// Convert CLI LibVerArg to the tool-facing enum
pub fn convert_libver(arg: LibVerArg) -> LibVer {
    match arg {
        LibVerArg::Earliest => LibVer::Earliest,
        LibVerArg::Latest => LibVer::Latest,
    }
}

/// Build a library configuration from CLI arguments, rooted at the current
/// working directory
pub fn build_library_config(args: &LibraryArgs) -> Result<LibraryConfig> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let file = load_file_config(args.config.as_deref())?;
    build_library_config_in(args, &file, &cwd)
}

/// Build a library configuration rooted at an explicit base directory
pub fn build_library_config_in(
    args: &LibraryArgs,
    file: &FileConfig,
    base: &Path,
) -> Result<LibraryConfig> {
    let release = convert_release(args.release);
    let prefix = release.prefix();

    // The destination is decided after the release is known to avoid putting
    // the release in a folder with a misleading name
    let destination = args
        .destination
        .clone()
        .or_else(|| file.destination.clone())
        .unwrap_or_else(|| base.join(format!("{}-hdf5", prefix)));

    let temperatures = if args.temperatures != DEFAULT_TEMPERATURES {
        args.temperatures.clone()
    } else {
        file.temperatures.clone().unwrap_or_else(|| args.temperatures.clone())
    };

    let libver = if args.libver != super::cli::LibVerArg::Earliest {
        convert_libver(args.libver)
    } else {
        file.libver.unwrap_or_default()
    };

    Ok(LibraryConfig {
        release,
        particles: args.particles.iter().copied().map(convert_particle).collect(),
        temperatures,
        libver,
        destination,
        download_dir: base.join(format!("{}-download", prefix)),
        endf_dir: base.join(format!("{}-endf", prefix)),
        stages: StageToggles {
            download: !args.no_download,
            extract: !args.no_extract,
            cleanup: args.cleanup || file.cleanup.unwrap_or(false),
        },
        tool: tool_config(&args.tool, args.threads, file),
        runtime: RuntimeConfig {
            dry_run: args.dry_run,
            debug: args.debug,
            json_output: args.json_output.clone(),
        },
    })
}

/// Build a chain configuration from CLI arguments, rooted at the current
/// working directory
pub fn build_chain_config(args: &ChainArgs) -> Result<ChainConfig> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let file = load_file_config(args.config.as_deref())?;
    build_chain_config_in(args, &file, &cwd)
}

/// Build a chain configuration rooted at an explicit base directory
pub fn build_chain_config_in(args: &ChainArgs, file: &FileConfig, base: &Path) -> Result<ChainConfig> {
    let release = convert_chain_release(args.release);
    let prefix = release.prefix();

    let output = args
        .chain_path
        .clone()
        .unwrap_or_else(|| base.join(release.default_output()));

    Ok(ChainConfig {
        release,
        output,
        endf_path: args.endf_path.clone(),
        download_dir: base.join(format!("{}-download", prefix)),
        work_dir: base.join(format!("{}-endf", prefix)),
        stages: StageToggles {
            download: true,
            extract: true,
            cleanup: args.cleanup || file.cleanup.unwrap_or(false),
        },
        tool: tool_config(&args.tool, None, file),
        runtime: RuntimeConfig {
            dry_run: args.dry_run,
            debug: args.debug,
            json_output: args.json_output.clone(),
        },
    })
}

fn tool_config(cli_tool: &Path, cli_threads: Option<usize>, file: &FileConfig) -> ToolConfig {
    let program = if cli_tool != Path::new(DEFAULT_TOOL) {
        cli_tool.to_path_buf()
    } else {
        file.tool.clone().unwrap_or_else(|| cli_tool.to_path_buf())
    };

    let threads = cli_threads
        .or(file.threads)
        .unwrap_or_else(num_cpus::get)
        .max(1);

    ToolConfig { program, threads }
}

fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => super::toml::parse_toml_file(path),
        None => Ok(FileConfig::default()),
    }
}
