//! External processing tool seam
//!
//! Every non-trivial operation (ENDF parsing, NJOY-based neutron and thermal
//! processing, photo-atomic conversion, HDF5 export, chain construction) is
//! delegated to an external processing tool. The `Processor` trait is the
//! uniform interface over that tool: the pipeline is agnostic to how the tool
//! is invoked, which keeps the orchestration testable without the tool
//! installed (see `MockProcessor`).
//!
//! # Implementations
//!
//! - **CommandProcessor**: spawns the configured executable once per
//!   operation. This is the production path.
//! - **MockProcessor**: records invocations and fabricates output files for
//!   tests.

use crate::Result;
use std::fmt;
use std::path::Path;

pub mod command;
pub mod mock;

pub use command::CommandProcessor;
pub use mock::MockProcessor;

/// HDF5 library version compatibility requested from the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibVer {
    /// Widest reader compatibility
    Earliest,
    /// Best performance
    Latest,
}

impl Default for LibVer {
    fn default() -> Self {
        Self::Earliest
    }
}

impl LibVer {
    pub fn as_str(&self) -> &'static str {
        match self {
            LibVer::Earliest => "earliest",
            LibVer::Latest => "latest",
        }
    }
}

impl fmt::Display for LibVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interface to the external nuclear-data-processing tool.
///
/// Implementations must be `Send + Sync`: the pipeline shares one processor
/// across the rayon fan-out, with each invocation independent of the others.
pub trait Processor: Send + Sync {
    /// Process an incident-neutron evaluation into an HDF5 file.
    ///
    /// The tool runs NJOY at the requested temperatures and writes
    /// `<gnds-name>.h5` into `output_dir`.
    fn process_neutron(
        &self,
        evaluation: &Path,
        output_dir: &Path,
        temperatures: &[f64],
        libver: LibVer,
    ) -> Result<()>;

    /// Process a thermal scattering evaluation together with its companion
    /// incident-neutron evaluation into an HDF5 file.
    fn process_thermal(
        &self,
        neutron: &Path,
        thermal: &Path,
        output_dir: &Path,
        libver: LibVer,
    ) -> Result<()>;

    /// Convert a photo-atomic evaluation plus its atomic-relaxation companion
    /// into an HDF5 file.
    fn process_photon(
        &self,
        photoatomic: &Path,
        relaxation: &Path,
        output_dir: &Path,
        libver: LibVer,
    ) -> Result<()>;

    /// Build a depletion chain from directories of decay, fission-yield, and
    /// incident-neutron evaluations, writing the chain XML to `output`.
    fn build_chain(
        &self,
        decay_dir: &Path,
        nfy_dir: &Path,
        neutron_dir: &Path,
        output: &Path,
    ) -> Result<()>;
}
