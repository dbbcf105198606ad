//! Cross-field configuration validation
//!
//! CLI-level checks live in `cli.rs`; this module validates the assembled
//! configuration against the release tables, so a particle selection that a
//! release simply does not provide fails before anything is downloaded.

use super::{ChainConfig, LibraryConfig};
use anyhow::Result;

/// Validate a library configuration
pub fn validate_library(config: &LibraryConfig) -> Result<()> {
    if config.particles.is_empty() {
        anyhow::bail!("at least one particle must be selected");
    }

    for &particle in &config.particles {
        if config.release.sources(particle).is_none() {
            anyhow::bail!(
                "{} data is not available for release {}",
                particle,
                config.release
            );
        }
    }

    let mut seen = Vec::new();
    for &particle in &config.particles {
        if seen.contains(&particle) {
            anyhow::bail!("particle {} selected more than once", particle);
        }
        seen.push(particle);
    }

    if config.temperatures.is_empty() {
        anyhow::bail!("at least one temperature must be given");
    }
    for &t in &config.temperatures {
        if !t.is_finite() || t <= 0.0 {
            anyhow::bail!("temperatures must be positive, got {}", t);
        }
    }

    if config.tool.threads == 0 {
        anyhow::bail!("threads must be at least 1");
    }

    if config.tool.program.as_os_str().is_empty() {
        anyhow::bail!("processing tool executable must not be empty");
    }

    Ok(())
}

/// Validate a chain configuration
pub fn validate_chain(config: &ChainConfig) -> Result<()> {
    if let Some(path) = &config.endf_path {
        for dir in ["neutrons", "decay", "nfy"] {
            if !path.join(dir).is_dir() {
                anyhow::bail!(
                    "--endf-path {} is missing the {} directory",
                    path.display(),
                    dir
                );
            }
        }
    }

    if config.tool.program.as_os_str().is_empty() {
        anyhow::bail!("processing tool executable must not be empty");
    }

    Ok(())
}
