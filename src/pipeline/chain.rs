//! Depletion chain pipeline
//!
//! Gathers the three evaluation sets a chain build needs (incident neutron,
//! decay, fission yields), normalizes them into a `neutrons`/`decay`/`nfy`
//! working tree, applies TPID fixes where a distribution ships without the
//! leading header record, and hands the directories to the external chain
//! builder. A pre-extracted tree can be supplied to skip the network stages.

use crate::config::ChainConfig;
use crate::extract::{extract, Layout};
use crate::fetch::{remote_file_name, Downloader};
use crate::patch::{ensure_tpid, relocate_errata};
use crate::process::Processor;
use crate::release::{chain_spec, ChainKindSources, ChainRole};
use crate::report::{RunReport, StageOutcome};
use crate::util::pattern::find_matching;
use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::PathBuf;

pub struct ChainPipeline<'a> {
    config: &'a ChainConfig,
    processor: &'a dyn Processor,
    downloader: Downloader,
}

impl<'a> ChainPipeline<'a> {
    pub fn new(config: &'a ChainConfig, processor: &'a dyn Processor) -> Result<Self> {
        Ok(Self {
            config,
            processor,
            downloader: Downloader::new(config.runtime.debug)?,
        })
    }

    pub fn run(&self) -> Result<RunReport> {
        let config = self.config;
        let spec = chain_spec(config.release);
        let mut report = RunReport::new("chain", config.release.to_string());

        if config.endf_path.is_none() {
            if config.stages.download {
                report.stage("download", |outcome| self.download_stage(spec.kinds, outcome))?;
            }
            if config.stages.extract {
                report.stage("extract", |outcome| self.extract_stage(spec.kinds, outcome))?;

                if config.stages.cleanup && config.download_dir.exists() {
                    fs::remove_dir_all(&config.download_dir).with_context(|| {
                        format!("Failed to remove download tree: {}", config.download_dir.display())
                    })?;
                }
            }
        }

        let dirs = report.stage("collect evaluations", |outcome| {
            self.collect_stage(spec.kinds, outcome)
        })?;

        report.stage("build chain", |outcome| {
            self.processor.build_chain(
                &dirs.decay,
                &dirs.nfy,
                &dirs.neutron,
                &config.output,
            )?;
            outcome.add_item();
            Ok(())
        })?;

        println!("Chain file written to {}", config.output.display());
        Ok(report)
    }

    fn download_stage(&self, kinds: &[ChainKindSources], outcome: &mut StageOutcome) -> Result<()> {
        for kind in kinds {
            for file in kind.files {
                let url = format!("{}{}", kind.base_url, file.path);
                self.downloader
                    .download(&url, &self.config.download_dir, file.checksum, kind.insecure)?;
                outcome.add_item();
            }
        }
        Ok(())
    }

    fn extract_stage(&self, kinds: &[ChainKindSources], outcome: &mut StageOutcome) -> Result<()> {
        let work = &self.config.work_dir;

        for kind in kinds {
            let dest = match kind.extract_into {
                Some(sub) => work.join(sub),
                None => work.clone(),
            };

            for file in kind.files {
                let name = remote_file_name(file.path)?;
                println!("Extracting {}...", name);
                extract(&self.config.download_dir.join(&name), &dest, Layout::Preserve)?;
                outcome.add_item();
            }

            for (from, to) in kind.renames {
                let from = work.join(from);
                let to = work.join(to);
                if !from.exists() && to.exists() {
                    // Already renamed by an earlier run
                    continue;
                }
                if let Some(parent) = to.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::rename(&from, &to).with_context(|| {
                    format!("Failed to rename {} to {}", from.display(), to.display())
                })?;
            }

            if !kind.errata.is_empty() {
                let evaluation_dir = work.join(pattern_dir(kind.pattern));
                let moved = relocate_errata(work, kind.errata, &evaluation_dir)?;
                outcome.add_items(moved);
            }
        }
        Ok(())
    }

    /// Resolve the evaluation directory per role, check that each actually
    /// holds files, and apply TPID fixes. Missing evaluations are fatal.
    fn collect_stage(
        &self,
        kinds: &[ChainKindSources],
        outcome: &mut StageOutcome,
    ) -> Result<RoleDirs> {
        let mut resolved: Vec<(ChainRole, PathBuf)> = Vec::new();

        for kind in kinds {
            let (dir, pattern) = match &self.config.endf_path {
                Some(endf_path) => {
                    let dir = endf_path.join(role_dir_name(kind.role));
                    (dir, pattern_file(kind.pattern))
                }
                None => {
                    let dir = self.config.work_dir.join(pattern_dir(kind.pattern));
                    (dir, pattern_file(kind.pattern))
                }
            };

            let files = find_matching(&dir, pattern)?;
            if files.is_empty() {
                anyhow::bail!("No {} endf files found in {}", kind.role, dir.display());
            }
            outcome.add_items(files.len());

            if kind.fix_tpid {
                for file in &files {
                    if ensure_tpid(file)? {
                        println!("Prepended TPID record to {}", file.display());
                    }
                }
            }

            resolved.push((kind.role, dir));
        }

        let find = |role: ChainRole| -> Result<PathBuf> {
            resolved
                .iter()
                .find(|(r, _)| *r == role)
                .map(|(_, d)| d.clone())
                .ok_or_else(|| anyhow::anyhow!("chain spec is missing the {} set", role))
        };

        Ok(RoleDirs {
            neutron: find(ChainRole::Neutron)?,
            decay: find(ChainRole::Decay)?,
            nfy: find(ChainRole::Nfy)?,
        })
    }
}

struct RoleDirs {
    neutron: PathBuf,
    decay: PathBuf,
    nfy: PathBuf,
}

fn role_dir_name(role: ChainRole) -> &'static str {
    match role {
        ChainRole::Neutron => "neutrons",
        ChainRole::Decay => "decay",
        ChainRole::Nfy => "nfy",
    }
}

/// Directory part of an evaluation pattern (`neutrons/*.endf` -> `neutrons`)
fn pattern_dir(pattern: &str) -> &str {
    pattern.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// File part of an evaluation pattern (`neutrons/*.endf` -> `*.endf`)
fn pattern_file(pattern: &str) -> &str {
    pattern.rsplit_once('/').map(|(_, file)| file).unwrap_or(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RuntimeConfig, StageToggles, ToolConfig};
    use crate::process::mock::Invocation;
    use crate::process::MockProcessor;
    use crate::release::ChainRelease;
    use std::path::Path;
    use tempfile::tempdir;

    fn chain_config(base: &Path, release: ChainRelease, endf_path: Option<PathBuf>) -> ChainConfig {
        ChainConfig {
            release,
            output: base.join("chain.xml"),
            endf_path,
            download_dir: base.join("download"),
            work_dir: base.join("work"),
            stages: StageToggles {
                download: false,
                extract: false,
                cleanup: false,
            },
            tool: ToolConfig {
                program: "ndtool".into(),
                threads: 1,
            },
            runtime: RuntimeConfig::default(),
        }
    }

    fn seed(base: &Path, rel: &str, content: &str) {
        let path = base.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_chain_build_from_endf_path() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        let tree = base.join("evaluations");
        seed(&tree, "neutrons/n-092_U_235.endf", "n");
        seed(&tree, "decay/dec-092_U_235.endf", "d");
        seed(&tree, "nfy/nfy-092_U_235.endf", "y");

        let config = chain_config(base, ChainRelease::Endfb81, Some(tree.clone()));
        let mock = MockProcessor::new();
        let pipeline = ChainPipeline::new(&config, &mock).unwrap();
        let report = pipeline.run().unwrap();

        assert_eq!(report.total_failed(), 0);
        assert!(base.join("chain.xml").exists());

        let invocations = mock.invocations();
        assert_eq!(invocations.len(), 1);
        let Invocation::Chain { decay_dir, nfy_dir, neutron_dir, .. } = &invocations[0] else {
            panic!("expected a chain invocation");
        };
        assert_eq!(neutron_dir, &tree.join("neutrons"));
        assert_eq!(decay_dir, &tree.join("decay"));
        assert_eq!(nfy_dir, &tree.join("nfy"));
    }

    #[test]
    fn test_missing_decay_files_are_fatal() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        let tree = base.join("evaluations");
        seed(&tree, "neutrons/n-092_U_235.endf", "n");
        fs::create_dir_all(tree.join("decay")).unwrap();
        fs::create_dir_all(tree.join("nfy")).unwrap();

        let config = chain_config(base, ChainRelease::Endfb81, Some(tree));
        let mock = MockProcessor::new();
        let pipeline = ChainPipeline::new(&config, &mock).unwrap();
        let err = pipeline.run().unwrap_err();
        assert!(err.to_string().contains("No decay endf files found"));
        assert!(mock.invocations().is_empty());
    }

    #[test]
    fn test_jeff33_nfy_gets_tpid_fix() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        let tree = base.join("evaluations");
        seed(&tree, "neutrons/U235.jeff33", "n");
        seed(&tree, "decay/U235.ASC", "d");
        // Fission-yield file shipped without its TPID record
        let record = format!("{:<66}{:>4}{:>2}{:>3}{:>5}\n", "data", 9228, 1, 451, 1);
        seed(&tree, "nfy/JEFF33-nfy.asc", &record);

        let config = chain_config(base, ChainRelease::Jeff33, Some(tree.clone()));
        let mock = MockProcessor::new();
        let pipeline = ChainPipeline::new(&config, &mock).unwrap();
        pipeline.run().unwrap();

        let patched = fs::read_to_string(tree.join("nfy/JEFF33-nfy.asc")).unwrap();
        assert_eq!(patched.lines().count(), 2);
        assert_eq!(&patched.lines().next().unwrap()[70..75], " 0  0");
    }

    #[test]
    fn test_collect_resolves_work_tree_after_renames() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        let config = chain_config(base, ChainRelease::Endfb81, None);

        // Work tree as it looks after extraction and the versioned-directory
        // renames the extract stage performs
        seed(&base.join("work"), "neutrons/n-092_U_235.endf", "n");
        seed(&base.join("work"), "decay/d.endf", "d");
        seed(&base.join("work"), "nfy/y.endf", "y");

        let spec = chain_spec(ChainRelease::Endfb81);
        let mock = MockProcessor::new();
        let pipeline = ChainPipeline::new(&config, &mock).unwrap();

        let mut outcome = StageOutcome::default();
        let dirs = pipeline.collect_stage(spec.kinds, &mut outcome).unwrap();
        assert_eq!(dirs.neutron, base.join("work/neutrons"));
        assert!(dirs.decay.join("d.endf").exists());
        assert_eq!(dirs.nfy, base.join("work/nfy"));
    }
}
