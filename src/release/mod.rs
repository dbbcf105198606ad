//! Per-release source tables
//!
//! Everything unique about a nuclear-data release lives here: which archives
//! to download from which data center, their published MD5 checksums, how the
//! extracted tree is organized, which thermal scattering evaluation pairs
//! with which incident-neutron evaluation, and which files need errata
//! relocation or header patches. New releases are added by extending these
//! tables; the pipeline itself is release-agnostic.

mod chains;
mod endfb;
mod jendl;

pub use chains::{chain_spec, ChainKindSources, ChainRelease, ChainRole, ChainSpec};

use std::fmt;

/// A downloadable file: path relative to the base URL plus optional checksum
#[derive(Debug, Clone, Copy)]
pub struct RemoteFile {
    pub path: &'static str,
    pub checksum: Option<&'static str>,
}

/// A thermal scattering evaluation and its companion neutron evaluation
#[derive(Debug, Clone, Copy)]
pub struct SabPair {
    pub neutron: &'static str,
    pub thermal: &'static str,
}

pub(crate) const fn sab(neutron: &'static str, thermal: &'static str) -> SabPair {
    SabPair { neutron, thermal }
}

/// Particle-specific structure of a release's sources
#[derive(Debug, Clone, Copy)]
pub enum ParticleDetail {
    /// Incident-neutron evaluations matched by file patterns
    Neutron {
        patterns: &'static [&'static str],
        /// Evaluations the processing tool is known to reject
        skip: &'static [&'static str],
    },
    /// Thermal scattering evaluations with explicit neutron pairings
    Thermal {
        pairs: &'static [SabPair],
        /// Files whose ZSYMAM must be rewritten before processing
        zsymam: &'static [(&'static str, &'static str)],
    },
    /// Photo-atomic plus atomic-relaxation evaluations, paired by sort order
    Photon {
        photo_pattern: &'static str,
        relax_pattern: &'static str,
    },
    /// Pre-built windowed-multipole HDF5 files, registered as downloaded
    Wmp,
}

/// Sources and layout for one particle of one release
#[derive(Debug, Clone, Copy)]
pub struct ParticleSources {
    pub base_url: &'static str,
    pub files: &'static [RemoteFile],
    /// Skip TLS verification (JAEA's certificate chain fails validation)
    pub insecure: bool,
    /// Flatten archive-internal paths on extraction
    pub flatten: bool,
    /// Directory inside the extraction tree that holds the evaluations
    pub evaluation_dir: Option<&'static str>,
    /// Update/errata files to relocate into the evaluation directory
    pub errata: &'static [&'static str],
    pub detail: ParticleDetail,
}

impl ParticleSources {
    /// Full URL for one of this particle's files
    pub fn url(&self, file: &RemoteFile) -> String {
        format!("{}{}", self.base_url, file.path)
    }

    /// Directory holding the evaluations, below the per-particle root
    pub fn evaluation_root(&self, particle_dir: &std::path::Path) -> std::path::PathBuf {
        match self.evaluation_dir {
            Some(dir) => particle_dir.join(dir),
            None => particle_dir.to_path_buf(),
        }
    }
}

/// Incident particle / data class within a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Particle {
    Neutron,
    Thermal,
    Photon,
    Wmp,
}

impl Particle {
    /// Subdirectory name used for downloads, evaluations, and HDF5 output
    pub fn dir_name(&self) -> &'static str {
        match self {
            Particle::Neutron => "neutron",
            Particle::Thermal => "thermal",
            Particle::Photon => "photon",
            Particle::Wmp => "wmp",
        }
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// Supported cross-section library releases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    EndfbVii1,
    EndfbViii0,
    EndfbViii1,
    Jendl5,
}

impl Release {
    /// Library family name used in directory prefixes
    pub fn library_name(&self) -> &'static str {
        match self {
            Release::EndfbVii1 | Release::EndfbViii0 | Release::EndfbViii1 => "endfb",
            Release::Jendl5 => "jendl",
        }
    }

    /// Release version string used in directory prefixes
    pub fn version(&self) -> &'static str {
        match self {
            Release::EndfbVii1 => "vii.1",
            Release::EndfbViii0 => "viii.0",
            Release::EndfbViii1 => "viii.1",
            Release::Jendl5 => "5",
        }
    }

    /// Directory prefix, e.g. `endfb-viii.1`
    pub fn prefix(&self) -> String {
        format!("{}-{}", self.library_name(), self.version())
    }

    /// Particles this release provides
    pub fn particles(&self) -> &'static [Particle] {
        match self {
            Release::EndfbVii1 => &[Particle::Neutron, Particle::Thermal, Particle::Photon, Particle::Wmp],
            Release::EndfbViii0 | Release::EndfbViii1 | Release::Jendl5 => {
                &[Particle::Neutron, Particle::Thermal, Particle::Photon]
            }
        }
    }

    /// Source table for a particle, if this release provides it
    pub fn sources(&self, particle: Particle) -> Option<&'static ParticleSources> {
        match self {
            Release::EndfbVii1 => endfb::vii1(particle),
            Release::EndfbViii0 => endfb::viii0(particle),
            Release::EndfbViii1 => endfb::viii1(particle),
            Release::Jendl5 => jendl::jendl5(particle),
        }
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_release_provides_its_particles() {
        for release in [Release::EndfbVii1, Release::EndfbViii0, Release::EndfbViii1, Release::Jendl5] {
            for &particle in release.particles() {
                let sources = release.sources(particle);
                assert!(
                    sources.is_some(),
                    "{} is missing sources for {}",
                    release,
                    particle
                );
                assert!(!sources.unwrap().files.is_empty());
            }
        }
    }

    #[test]
    fn test_wmp_only_in_vii1() {
        assert!(Release::EndfbVii1.sources(Particle::Wmp).is_some());
        assert!(Release::EndfbViii0.sources(Particle::Wmp).is_none());
        assert!(Release::EndfbViii1.sources(Particle::Wmp).is_none());
        assert!(Release::Jendl5.sources(Particle::Wmp).is_none());
    }

    #[test]
    fn test_url_join() {
        let sources = Release::EndfbViii0.sources(Particle::Neutron).unwrap();
        let urls: Vec<String> = sources.files.iter().map(|f| sources.url(f)).collect();
        assert_eq!(
            urls[0],
            "https://www.nndc.bnl.gov/endf-b8.0/zips/ENDF-B-VIII.0_neutrons.zip"
        );
        assert_eq!(
            urls[1],
            "https://www.nndc.bnl.gov/endf-b8.0/erratafiles/n-005_B_010.endf"
        );
    }

    #[test]
    fn test_thermal_pairs_reference_neutron_evaluations() {
        for release in [Release::EndfbVii1, Release::EndfbViii0, Release::EndfbViii1, Release::Jendl5] {
            let sources = release.sources(Particle::Thermal).unwrap();
            let ParticleDetail::Thermal { pairs, .. } = sources.detail else {
                panic!("thermal sources must carry pairs");
            };
            assert!(!pairs.is_empty());
            for pair in pairs {
                assert!(pair.neutron.starts_with("n-") || pair.neutron.starts_with("n_"));
                assert!(pair.thermal.starts_with("tsl"));
            }
        }
    }

    #[test]
    fn test_checksums_are_md5_hex() {
        for release in [Release::EndfbVii1, Release::EndfbViii0, Release::EndfbViii1] {
            for &particle in release.particles() {
                for file in release.sources(particle).unwrap().files {
                    if let Some(sum) = file.checksum {
                        assert_eq!(sum.len(), 32, "{} checksum length", file.path);
                        assert!(sum.chars().all(|c| c.is_ascii_hexdigit()));
                    }
                }
            }
        }
    }
}
