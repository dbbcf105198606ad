//! ndforge - Nuclear data library pipeline
//!
//! ndforge fetches ENDF-format nuclear-data evaluations (incident neutron, thermal
//! scattering, photo-atomic, decay, and fission-yield files) from the public
//! archives of the national nuclear-data centers, reorganizes them on disk, and
//! drives an external processing tool to produce two artifacts: HDF5 cross-section
//! libraries with a `cross_sections.xml` index, and depletion chain XML files.
//!
//! # Architecture
//!
//! - **Release tables**: per-release URL/checksum/pairing tables (ENDF/B, JENDL, JEFF)
//! - **Fetch**: streaming downloads with bounded retry and MD5 verification
//! - **Extract**: zip/tar.gz extraction with optional path flattening
//! - **Patch**: ZSYMAM disambiguation, TPID fixes, errata relocation
//! - **Process**: trait seam over the external tool, one subprocess per evaluation
//! - **Pipeline**: staged orchestration with a rayon fan-out over evaluations
//!
//! All ENDF physics (parsing, resonance reconstruction, NJOY processing, HDF5 and
//! chain export) lives in the external tool; this crate owns only orchestration.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod library;
pub mod nuclide;
pub mod patch;
pub mod pipeline;
pub mod process;
pub mod release;
pub mod report;
pub mod util;

// Re-export commonly used types
pub use config::{ChainConfig, LibraryConfig};
pub use process::Processor;

/// Result type used throughout ndforge
pub type Result<T> = anyhow::Result<T>;
