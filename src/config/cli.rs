//! CLI argument parsing using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ndforge - Nuclear data library pipeline
#[derive(Parser, Debug)]
#[command(name = "ndforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an HDF5 cross-section library for a nuclear data release
    Library(LibraryArgs),
    /// Build a depletion chain file for a nuclear data release
    Chain(ChainArgs),
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        match &self.command {
            Command::Library(args) => args.validate(),
            Command::Chain(args) => args.validate(),
        }
    }
}

#[derive(Args, Debug)]
pub struct LibraryArgs {
    /// Directory to create new library in (default: <library>-<release>-hdf5)
    #[arg(short = 'd', long)]
    pub destination: Option<PathBuf>,

    /// The nuclear data library release version
    #[arg(short = 'r', long, value_enum, default_value = "viii.1")]
    pub release: ReleaseArg,

    /// Incident particles to include (wmp is only available for vii.1)
    #[arg(short = 'p', long, value_enum, num_args = 1..,
          default_values = ["neutron", "thermal", "photon"])]
    pub particles: Vec<ParticleArg>,

    /// Temperatures in Kelvin
    #[arg(long, num_args = 1..,
          default_values_t = super::DEFAULT_TEMPERATURES)]
    pub temperatures: Vec<f64>,

    /// Output HDF5 versioning. Use 'earliest' for backwards compatibility or
    /// 'latest' for performance
    #[arg(long, value_enum, default_value = "earliest")]
    pub libver: LibVerArg,

    /// Do not download archives from the data center
    #[arg(long)]
    pub no_download: bool,

    /// Do not extract archives
    #[arg(long)]
    pub no_extract: bool,

    /// Remove download directories when data has been processed
    #[arg(long)]
    pub cleanup: bool,

    /// External processing tool executable
    #[arg(long, env = "NDFORGE_TOOL", default_value = "ndtool")]
    pub tool: PathBuf,

    /// Number of parallel processing jobs (default: CPU count)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Validate configuration without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug output (timing, tool invocations, etc.)
    #[arg(long)]
    pub debug: bool,
}

impl LibraryArgs {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.particles.is_empty() {
            anyhow::bail!("at least one particle must be selected");
        }

        if self.temperatures.is_empty() {
            anyhow::bail!("at least one temperature must be given");
        }
        for &t in &self.temperatures {
            if !t.is_finite() || t <= 0.0 {
                anyhow::bail!("temperatures must be positive, got {}", t);
            }
        }

        if let Some(threads) = self.threads {
            if threads == 0 {
                anyhow::bail!("threads must be at least 1");
            }
        }

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ChainArgs {
    /// The depletion chain release to build
    #[arg(short = 'r', long, value_enum, default_value = "endfb81")]
    pub release: ChainReleaseArg,

    /// Filename of the chain file produced (default: chain_<release>.xml)
    #[arg(long)]
    pub chain_path: Option<PathBuf>,

    /// Directory with pre-extracted neutrons/, decay/, and nfy/ trees;
    /// skips download and extraction
    #[arg(long)]
    pub endf_path: Option<PathBuf>,

    /// Remove download directories when the chain has been built
    #[arg(long)]
    pub cleanup: bool,

    /// External processing tool executable
    #[arg(long, env = "NDFORGE_TOOL", default_value = "ndtool")]
    pub tool: PathBuf,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Validate configuration without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug output (timing, tool invocations, etc.)
    #[arg(long)]
    pub debug: bool,
}

impl ChainArgs {
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(path) = &self.endf_path {
            if !path.is_dir() {
                anyhow::bail!("--endf-path is not a directory: {}", path.display());
            }
        }
        Ok(())
    }
}

/// Cross-section library release
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReleaseArg {
    /// ENDF/B-VII.1
    #[value(name = "vii.1")]
    Vii1,
    /// ENDF/B-VIII.0
    #[value(name = "viii.0")]
    Viii0,
    /// ENDF/B-VIII.1
    #[value(name = "viii.1")]
    Viii1,
    /// JENDL-5
    #[value(name = "jendl-5")]
    Jendl5,
}

/// Depletion chain release
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChainReleaseArg {
    /// ENDF/B-VIII.1
    Endfb81,
    /// JEFF-3.3
    Jeff33,
    /// JEFF-4.0
    Jeff40,
    /// JENDL-5
    Jendl5,
}

/// Incident particle / data class
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParticleArg {
    Neutron,
    Thermal,
    Photon,
    /// Pre-built windowed multipole library
    Wmp,
}

/// Output HDF5 versioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LibVerArg {
    Earliest,
    Latest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_library_defaults() {
        let cli = Cli::try_parse_from(["ndforge", "library"]).unwrap();
        let Command::Library(args) = cli.command else {
            panic!("expected library subcommand");
        };
        assert_eq!(args.release, ReleaseArg::Viii1);
        assert_eq!(
            args.particles,
            [ParticleArg::Neutron, ParticleArg::Thermal, ParticleArg::Photon]
        );
        assert_eq!(args.temperatures.len(), 6);
        assert_eq!(args.libver, LibVerArg::Earliest);
        assert!(!args.no_download);
        assert!(!args.cleanup);
    }

    #[test]
    fn test_library_particle_selection() {
        let cli = Cli::try_parse_from([
            "ndforge", "library", "-r", "vii.1", "-p", "neutron", "wmp",
        ])
        .unwrap();
        let Command::Library(args) = cli.command else {
            panic!("expected library subcommand");
        };
        assert_eq!(args.particles, [ParticleArg::Neutron, ParticleArg::Wmp]);
    }

    #[test]
    fn test_library_rejects_bad_temperature() {
        let cli = Cli::try_parse_from([
            "ndforge", "library", "--temperatures", "293.6", "0",
        ])
        .unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_chain_defaults() {
        let cli = Cli::try_parse_from(["ndforge", "chain", "-r", "jeff33"]).unwrap();
        let Command::Chain(args) = cli.command else {
            panic!("expected chain subcommand");
        };
        assert_eq!(args.release, ChainReleaseArg::Jeff33);
        assert!(args.chain_path.is_none());
    }
}
