//! Subprocess-backed processor
//!
//! Invokes the external processing tool once per operation. The tool's CLI
//! mirrors the trait: one subcommand per operation with long flags for inputs
//! and outputs. A nonzero exit fails the operation with the tool's stderr
//! attached, so a bad evaluation surfaces with the tool's own diagnostics.

use super::{LibVer, Processor};
use crate::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Default executable name looked up on PATH
pub const DEFAULT_TOOL: &str = "ndtool";

/// Processor that spawns the external tool for every operation
pub struct CommandProcessor {
    program: PathBuf,
    debug: bool,
}

impl CommandProcessor {
    pub fn new(program: impl Into<PathBuf>, debug: bool) -> Self {
        Self {
            program: program.into(),
            debug,
        }
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        if self.debug {
            eprintln!("DEBUG: {} {}", self.program.display(), args.join(" "));
        }

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to spawn processing tool: {}", self.program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "{} {} exited with {}: {}",
                self.program.display(),
                args.first().unwrap_or(&""),
                output.status,
                stderr.trim()
            );
        }
        Ok(())
    }
}

impl Processor for CommandProcessor {
    fn process_neutron(
        &self,
        evaluation: &Path,
        output_dir: &Path,
        temperatures: &[f64],
        libver: LibVer,
    ) -> Result<()> {
        let temps: Vec<String> = temperatures.iter().map(|t| t.to_string()).collect();
        let mut args = vec![
            "neutron",
            "--evaluation",
            path_str(evaluation)?,
            "--output-dir",
            path_str(output_dir)?,
            "--libver",
            libver.as_str(),
            "--temperatures",
        ];
        args.extend(temps.iter().map(|t| t.as_str()));
        self.run(&args)
    }

    fn process_thermal(
        &self,
        neutron: &Path,
        thermal: &Path,
        output_dir: &Path,
        libver: LibVer,
    ) -> Result<()> {
        self.run(&[
            "thermal",
            "--neutron",
            path_str(neutron)?,
            "--thermal",
            path_str(thermal)?,
            "--output-dir",
            path_str(output_dir)?,
            "--libver",
            libver.as_str(),
        ])
    }

    fn process_photon(
        &self,
        photoatomic: &Path,
        relaxation: &Path,
        output_dir: &Path,
        libver: LibVer,
    ) -> Result<()> {
        self.run(&[
            "photon",
            "--photoatomic",
            path_str(photoatomic)?,
            "--relaxation",
            path_str(relaxation)?,
            "--output-dir",
            path_str(output_dir)?,
            "--libver",
            libver.as_str(),
        ])
    }

    fn build_chain(
        &self,
        decay_dir: &Path,
        nfy_dir: &Path,
        neutron_dir: &Path,
        output: &Path,
    ) -> Result<()> {
        self.run(&[
            "chain",
            "--decay-dir",
            path_str(decay_dir)?,
            "--nfy-dir",
            path_str(nfy_dir)?,
            "--neutron-dir",
            path_str(neutron_dir)?,
            "--output",
            path_str(output)?,
        ])
    }
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow::anyhow!("Path is not valid UTF-8: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_an_error() {
        let processor = CommandProcessor::new("/nonexistent/ndtool", false);
        let err = processor
            .build_chain(
                Path::new("decay"),
                Path::new("nfy"),
                Path::new("neutrons"),
                Path::new("chain.xml"),
            )
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to spawn processing tool"));
    }

    #[test]
    fn test_tool_failure_carries_stderr() {
        // `false` exits nonzero without output; the status still surfaces
        let processor = CommandProcessor::new("false", false);
        let err = processor
            .process_thermal(
                Path::new("n.endf"),
                Path::new("tsl.endf"),
                Path::new("out"),
                LibVer::Earliest,
            )
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("exited with"), "unexpected error: {}", message);
    }
}
