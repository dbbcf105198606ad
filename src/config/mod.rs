//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::process::LibVer;
use crate::release::{ChainRelease, Release};
use serde::Deserialize;
use std::path::PathBuf;

/// Default processing temperatures in Kelvin
pub const DEFAULT_TEMPERATURES: [f64; 6] = [250.0, 293.6, 600.0, 900.0, 1200.0, 2500.0];

/// Complete configuration for a library build
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    pub release: Release,
    pub particles: Vec<crate::release::Particle>,
    /// Temperatures the neutron evaluations are processed at
    pub temperatures: Vec<f64>,
    pub libver: LibVer,
    /// Directory receiving the HDF5 tree and `cross_sections.xml`
    pub destination: PathBuf,
    /// Directory holding downloaded archives
    pub download_dir: PathBuf,
    /// Directory holding extracted evaluations
    pub endf_dir: PathBuf,
    pub stages: StageToggles,
    pub tool: ToolConfig,
    pub runtime: RuntimeConfig,
}

/// Complete configuration for a chain build
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub release: ChainRelease,
    /// Path of the chain XML file to write
    pub output: PathBuf,
    /// Pre-extracted tree with `neutrons`/`decay`/`nfy`; bypasses download
    pub endf_path: Option<PathBuf>,
    pub download_dir: PathBuf,
    /// Working tree the evaluations are organized in
    pub work_dir: PathBuf,
    pub stages: StageToggles,
    pub tool: ToolConfig,
    pub runtime: RuntimeConfig,
}

/// Per-stage enable flags
#[derive(Debug, Clone, Copy)]
pub struct StageToggles {
    pub download: bool,
    pub extract: bool,
    /// Remove the download tree once data has been extracted
    pub cleanup: bool,
}

impl Default for StageToggles {
    fn default() -> Self {
        Self {
            download: true,
            extract: true,
            cleanup: false,
        }
    }
}

/// External tool invocation settings
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Executable of the external processing tool
    pub program: PathBuf,
    /// Parallel processing jobs
    pub threads: usize,
}

/// Run-level settings
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub dry_run: bool,
    pub debug: bool,
    /// Write a JSON run report here
    pub json_output: Option<PathBuf>,
}

/// Subset of settings accepted from a TOML configuration file.
///
/// CLI arguments take precedence over file values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub destination: Option<PathBuf>,
    pub temperatures: Option<Vec<f64>>,
    pub libver: Option<LibVer>,
    pub tool: Option<PathBuf>,
    pub threads: Option<usize>,
    pub cleanup: Option<bool>,
}
