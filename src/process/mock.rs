//! Mock processor for testing
//!
//! Simulates the external tool without spawning anything: every operation is
//! recorded, and plausible output files are fabricated so the registration
//! and export stages see the same directory shapes the real tool produces.
//! Configurable failure injection exercises the pipeline's error collection.

use super::{LibVer, Processor};
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One recorded trait invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Neutron { evaluation: PathBuf },
    Thermal { neutron: PathBuf, thermal: PathBuf },
    Photon { photoatomic: PathBuf, relaxation: PathBuf },
    Chain { decay_dir: PathBuf, nfy_dir: PathBuf, neutron_dir: PathBuf, output: PathBuf },
}

/// Recording processor that fabricates outputs
#[derive(Clone, Default)]
pub struct MockProcessor {
    invocations: Arc<Mutex<Vec<Invocation>>>,
    /// Inputs whose file name contains this substring fail
    fail_matching: Option<String>,
}

impl MockProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any operation whose input file name contains `needle`
    pub fn failing_on(needle: impl Into<String>) -> Self {
        Self {
            invocations: Arc::new(Mutex::new(Vec::new())),
            fail_matching: Some(needle.into()),
        }
    }

    /// All invocations recorded so far
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    fn record(&self, invocation: Invocation) {
        self.invocations.lock().unwrap().push(invocation);
    }

    fn check(&self, input: &Path) -> Result<()> {
        if let Some(needle) = &self.fail_matching {
            let name = input.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            if name.contains(needle.as_str()) {
                anyhow::bail!("mock processing failure for {}", name);
            }
        }
        Ok(())
    }
}

impl Processor for MockProcessor {
    fn process_neutron(
        &self,
        evaluation: &Path,
        output_dir: &Path,
        _temperatures: &[f64],
        _libver: LibVer,
    ) -> Result<()> {
        self.record(Invocation::Neutron { evaluation: evaluation.to_path_buf() });
        self.check(evaluation)?;

        let name = gnds_from_evaluation(evaluation).unwrap_or_else(|| stem_of(evaluation));
        write_h5(output_dir, &name)
    }

    fn process_thermal(
        &self,
        neutron: &Path,
        thermal: &Path,
        output_dir: &Path,
        _libver: LibVer,
    ) -> Result<()> {
        self.record(Invocation::Thermal {
            neutron: neutron.to_path_buf(),
            thermal: thermal.to_path_buf(),
        });
        self.check(thermal)?;

        let stem = stem_of(thermal);
        let material = stem
            .trim_start_matches("tsl-")
            .trim_start_matches("tsl_")
            .replace('-', "_");
        write_h5(output_dir, &format!("c_{}", material))
    }

    fn process_photon(
        &self,
        photoatomic: &Path,
        relaxation: &Path,
        output_dir: &Path,
        _libver: LibVer,
    ) -> Result<()> {
        self.record(Invocation::Photon {
            photoatomic: photoatomic.to_path_buf(),
            relaxation: relaxation.to_path_buf(),
        });
        self.check(photoatomic)?;

        let stem = stem_of(photoatomic);
        let symbol = stem
            .split(['-', '_'])
            .find(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphabetic()) && *part != "photoat")
            .map(str::to_string);
        write_h5(output_dir, &symbol.unwrap_or(stem))
    }

    fn build_chain(
        &self,
        decay_dir: &Path,
        nfy_dir: &Path,
        neutron_dir: &Path,
        output: &Path,
    ) -> Result<()> {
        self.record(Invocation::Chain {
            decay_dir: decay_dir.to_path_buf(),
            nfy_dir: nfy_dir.to_path_buf(),
            neutron_dir: neutron_dir.to_path_buf(),
            output: output.to_path_buf(),
        });
        self.check(output)?;

        fs::write(output, "<depletion_chain/>\n")?;
        Ok(())
    }
}

fn stem_of(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

fn write_h5(output_dir: &Path, name: &str) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    fs::write(output_dir.join(format!("{}.h5", name)), b"mock")?;
    Ok(())
}

/// GNDS name from an evaluation file name, e.g. `n-092_U_235.endf` or
/// `n_095-Am-242m1.dat` becomes `U235` / `Am242_m1`
fn gnds_from_evaluation(path: &Path) -> Option<String> {
    let stem = stem_of(path);
    let parts: Vec<&str> = stem.split(['-', '_']).collect();
    if parts.len() != 4 || parts[0] != "n" {
        return None;
    }
    let symbol = parts[2];
    if !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mass = parts[3];
    let (a, m) = match mass.split_once('m') {
        Some((a, m)) => (a, Some(m)),
        None => (mass, None),
    };
    let a = a.trim_start_matches('0');
    let a = if a.is_empty() { "0" } else { a };

    Some(match m {
        Some(m) => format!("{}{}_m{}", symbol, a, m),
        None => format!("{}{}", symbol, a),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_gnds_from_evaluation() {
        assert_eq!(gnds_from_evaluation(Path::new("n-092_U_235.endf")).unwrap(), "U235");
        assert_eq!(gnds_from_evaluation(Path::new("n-006_C_000.endf")).unwrap(), "C0");
        assert_eq!(gnds_from_evaluation(Path::new("n_095-Am-242m1.dat")).unwrap(), "Am242_m1");
        assert!(gnds_from_evaluation(Path::new("tsl-HinH2O.endf")).is_none());
    }

    #[test]
    fn test_mock_fabricates_outputs() {
        let dir = tempdir().unwrap();
        let mock = MockProcessor::new();

        mock.process_neutron(Path::new("n-092_U_235.endf"), dir.path(), &[293.6], LibVer::Earliest)
            .unwrap();
        mock.process_thermal(
            Path::new("n-001_H_001.endf"),
            Path::new("tsl-HinH2O.endf"),
            dir.path(),
            LibVer::Earliest,
        )
        .unwrap();

        assert!(dir.path().join("U235.h5").exists());
        assert!(dir.path().join("c_HinH2O.h5").exists());
        assert_eq!(mock.invocations().len(), 2);
    }

    #[test]
    fn test_mock_failure_injection() {
        let dir = tempdir().unwrap();
        let mock = MockProcessor::failing_on("U_235");
        let err = mock
            .process_neutron(Path::new("n-092_U_235.endf"), dir.path(), &[], LibVer::Latest)
            .unwrap_err();
        assert!(err.to_string().contains("mock processing failure"));
        // The invocation is still recorded
        assert_eq!(mock.invocations().len(), 1);
    }
}
