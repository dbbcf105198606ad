//! HDF5 library pipeline
//!
//! Orchestrates one full library build: fetch the release's archives, lay the
//! evaluations out per particle, apply the release's patches, fan the
//! processing tool out over every evaluation, then register the produced
//! files and export `cross_sections.xml`.

use crate::config::LibraryConfig;
use crate::extract::{extract, Layout};
use crate::fetch::{remote_file_name, Downloader};
use crate::library::DataLibrary;
use crate::nuclide::sort_for_registration;
use crate::patch::{relocate_errata, update_zsymam};
use crate::process::Processor;
use crate::release::{Particle, ParticleDetail, ParticleSources};
use crate::report::{RunReport, StageOutcome};
use crate::util::pattern::find_matching;
use crate::Result;
use anyhow::Context;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Registration walks particles in this order regardless of selection order
const REGISTRATION_ORDER: [Particle; 4] =
    [Particle::Neutron, Particle::Thermal, Particle::Photon, Particle::Wmp];

pub struct LibraryPipeline<'a> {
    config: &'a LibraryConfig,
    processor: &'a dyn Processor,
    downloader: Downloader,
    pool: rayon::ThreadPool,
}

impl<'a> LibraryPipeline<'a> {
    pub fn new(config: &'a LibraryConfig, processor: &'a dyn Processor) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.tool.threads)
            .build()
            .context("Failed to build processing pool")?;

        Ok(Self {
            config,
            processor,
            downloader: Downloader::new(config.runtime.debug)?,
            pool,
        })
    }

    /// Run every enabled stage. Per-evaluation failures are collected in the
    /// returned report rather than aborting the run.
    pub fn run(&self) -> Result<RunReport> {
        let config = self.config;
        let mut report = RunReport::new("library", config.release.prefix());

        if config.stages.download {
            report.stage("download", |outcome| self.download_stage(outcome))?;
        }

        if config.stages.extract {
            report.stage("extract", |outcome| self.extract_stage(outcome))?;

            if config.stages.cleanup && config.download_dir.exists() {
                fs::remove_dir_all(&config.download_dir).with_context(|| {
                    format!("Failed to remove download tree: {}", config.download_dir.display())
                })?;
            }
        }

        report.stage("patch", |outcome| self.patch_stage(outcome))?;

        for &particle in &config.particles {
            let destination = config.destination.join(particle.dir_name());
            fs::create_dir_all(&destination)
                .with_context(|| format!("Failed to create directory: {}", destination.display()))?;
        }

        if config.particles.contains(&Particle::Neutron) {
            report.stage("process neutron", |outcome| self.neutron_stage(outcome))?;
        }
        if config.particles.contains(&Particle::Thermal) {
            report.stage("process thermal", |outcome| self.thermal_stage(outcome))?;
        }
        if config.particles.contains(&Particle::Photon) {
            report.stage("convert photon", |outcome| self.photon_stage(outcome))?;
        }

        report.stage("register", |outcome| self.register_stage(outcome))?;

        Ok(report)
    }

    fn sources(&self, particle: Particle) -> Result<&'static ParticleSources> {
        self.config
            .release
            .sources(particle)
            .ok_or_else(|| anyhow::anyhow!("{} has no {} data", self.config.release, particle))
    }

    /// Download directory for one particle
    fn download_dir(&self, particle: Particle) -> PathBuf {
        self.config.download_dir.join(particle.dir_name())
    }

    /// Extraction directory for one particle. WMP files are pre-built HDF5
    /// and extract straight into the destination tree.
    fn extraction_dir(&self, particle: Particle, sources: &ParticleSources) -> PathBuf {
        match sources.detail {
            ParticleDetail::Wmp => self.config.destination.join(particle.dir_name()),
            _ => self.config.endf_dir.join(particle.dir_name()),
        }
    }

    fn download_stage(&self, outcome: &mut StageOutcome) -> Result<()> {
        for &particle in &self.config.particles {
            let sources = self.sources(particle)?;
            for file in sources.files {
                self.downloader.download(
                    &sources.url(file),
                    &self.download_dir(particle),
                    file.checksum,
                    sources.insecure,
                )?;
                outcome.add_item();
            }
        }
        Ok(())
    }

    fn extract_stage(&self, outcome: &mut StageOutcome) -> Result<()> {
        for &particle in &self.config.particles {
            let sources = self.sources(particle)?;
            let extraction_dir = self.extraction_dir(particle, sources);
            let layout = if sources.flatten { Layout::Flattened } else { Layout::Preserve };

            for file in sources.files {
                let name = remote_file_name(file.path)?;
                let archive = self.download_dir(particle).join(&name);
                println!("Extracting {}...", name);
                extract(&archive, &extraction_dir, layout)?;
                outcome.add_item();
            }
        }
        Ok(())
    }

    fn patch_stage(&self, outcome: &mut StageOutcome) -> Result<()> {
        for &particle in &self.config.particles {
            let sources = self.sources(particle)?;
            let particle_dir = self.config.endf_dir.join(particle.dir_name());

            if !sources.errata.is_empty() {
                let evaluation_dir = sources.evaluation_root(&particle_dir);
                let moved = relocate_errata(&particle_dir, sources.errata, &evaluation_dir)?;
                outcome.add_items(moved);
            }

            if let ParticleDetail::Thermal { zsymam, .. } = sources.detail {
                let evaluation_dir = sources.evaluation_root(&particle_dir);
                for (file, symbol) in zsymam {
                    update_zsymam(&evaluation_dir.join(file), symbol)?;
                    outcome.add_item();
                }
            }
        }
        Ok(())
    }

    fn neutron_stage(&self, outcome: &mut StageOutcome) -> Result<()> {
        let config = self.config;
        let sources = self.sources(Particle::Neutron)?;
        let ParticleDetail::Neutron { patterns, skip } = sources.detail else {
            anyhow::bail!("neutron sources carry no patterns");
        };

        let evaluation_dir = sources.evaluation_root(&config.endf_dir.join("neutron"));
        let mut evaluations = Vec::new();
        for pattern in patterns {
            evaluations.extend(find_matching(&evaluation_dir, pattern)?);
        }
        evaluations.sort();
        evaluations.dedup();

        if evaluations.is_empty() {
            anyhow::bail!(
                "No neutron evaluation files found in {}",
                evaluation_dir.display()
            );
        }

        let (skipped, to_process): (Vec<_>, Vec<_>) = evaluations.into_iter().partition(|path| {
            path.file_name()
                .map(|name| skip.iter().any(|s| name == std::ffi::OsStr::new(s)))
                .unwrap_or(false)
        });
        for path in &skipped {
            println!("Skipping {}", path.display());
            outcome.add_skipped();
        }

        let output_dir = config.destination.join("neutron");
        let results: Vec<(PathBuf, Result<()>)> = self.pool.install(|| {
            to_process
                .par_iter()
                .map(|path| {
                    let result = self.processor.process_neutron(
                        path,
                        &output_dir,
                        &config.temperatures,
                        config.libver,
                    );
                    (path.clone(), result)
                })
                .collect()
        });

        collect_results(results, outcome);
        Ok(())
    }

    fn thermal_stage(&self, outcome: &mut StageOutcome) -> Result<()> {
        let config = self.config;
        let sources = self.sources(Particle::Thermal)?;
        let ParticleDetail::Thermal { pairs, .. } = sources.detail else {
            anyhow::bail!("thermal sources carry no pairings");
        };

        // Companion incident-neutron evaluations live in the neutron tree
        let neutron_sources = self.sources(Particle::Neutron)?;
        let neutron_dir = neutron_sources.evaluation_root(&config.endf_dir.join("neutron"));
        let thermal_dir = sources.evaluation_root(&config.endf_dir.join("thermal"));

        let mut tasks = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let neutron = neutron_dir.join(pair.neutron);
            let thermal = thermal_dir.join(pair.thermal);
            for path in [&neutron, &thermal] {
                if !path.is_file() {
                    anyhow::bail!("Missing evaluation for thermal pairing: {}", path.display());
                }
            }
            tasks.push((neutron, thermal));
        }

        let output_dir = config.destination.join("thermal");
        let results: Vec<(PathBuf, Result<()>)> = self.pool.install(|| {
            tasks
                .par_iter()
                .map(|(neutron, thermal)| {
                    let result = self.processor.process_thermal(
                        neutron,
                        thermal,
                        &output_dir,
                        config.libver,
                    );
                    (thermal.clone(), result)
                })
                .collect()
        });

        collect_results(results, outcome);
        Ok(())
    }

    fn photon_stage(&self, outcome: &mut StageOutcome) -> Result<()> {
        let config = self.config;
        let sources = self.sources(Particle::Photon)?;
        let ParticleDetail::Photon { photo_pattern, relax_pattern } = sources.detail else {
            anyhow::bail!("photon sources carry no patterns");
        };

        let photon_dir = config.endf_dir.join("photon");
        let photo_files = find_matching(&photon_dir, photo_pattern)?;
        let relax_files = find_matching(&photon_dir, relax_pattern)?;

        if photo_files.is_empty() {
            anyhow::bail!("No photo-atomic evaluation files found in {}", photon_dir.display());
        }
        if photo_files.len() != relax_files.len() {
            anyhow::bail!(
                "Photo-atomic and atomic-relaxation evaluations do not pair up ({} vs {})",
                photo_files.len(),
                relax_files.len()
            );
        }

        let output_dir = config.destination.join("photon");
        for (photo, relax) in photo_files.iter().zip(&relax_files) {
            println!(
                "Converting: {} {}",
                file_name(photo),
                file_name(relax)
            );
            match self.processor.process_photon(photo, relax, &output_dir, config.libver) {
                Ok(()) => outcome.add_item(),
                Err(e) => outcome.add_failure(file_name(photo), format!("{:#}", e)),
            }
        }
        Ok(())
    }

    fn register_stage(&self, outcome: &mut StageOutcome) -> Result<()> {
        let config = self.config;
        let mut library = DataLibrary::new();

        for particle in REGISTRATION_ORDER {
            if !config.particles.contains(&particle) {
                continue;
            }
            let dir = config.destination.join(particle.dir_name());
            let mut files = find_matching(&dir, "*.h5")?;
            if matches!(particle, Particle::Neutron | Particle::Thermal) {
                sort_for_registration(&mut files);
            }
            for path in files {
                library.register_file(&path)?;
            }
        }

        outcome.add_items(library.len());
        let index = config.destination.join("cross_sections.xml");
        library.export_to_xml(&index)?;
        println!("Library index written to {}", index.display());
        Ok(())
    }
}

fn collect_results(results: Vec<(PathBuf, Result<()>)>, outcome: &mut StageOutcome) {
    for (path, result) in results {
        match result {
            Ok(()) => outcome.add_item(),
            Err(e) => outcome.add_failure(file_name(&path), format!("{:#}", e)),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RuntimeConfig, StageToggles, ToolConfig};
    use crate::process::{LibVer, MockProcessor};
    use crate::release::Release;
    use tempfile::tempdir;

    fn offline_config(base: &Path, particles: Vec<Particle>) -> LibraryConfig {
        LibraryConfig {
            release: Release::EndfbViii1,
            particles,
            temperatures: vec![293.6],
            libver: LibVer::Earliest,
            destination: base.join("hdf5"),
            download_dir: base.join("download"),
            endf_dir: base.join("endf"),
            stages: StageToggles {
                download: false,
                extract: false,
                cleanup: false,
            },
            tool: ToolConfig {
                program: "ndtool".into(),
                threads: 2,
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
    fn test_offline_neutron_run_registers_sorted_library() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        seed(base, "endf/neutron/n-092_U_235.endf", "u235");
        seed(base, "endf/neutron/n-001_H_001.endf", "h1");
        // The known-bad evaluation is skipped, not processed
        seed(base, "endf/neutron/n-000_n_001.endf", "n1");

        let config = offline_config(base, vec![Particle::Neutron]);
        let mock = MockProcessor::new();
        let pipeline = LibraryPipeline::new(&config, &mock).unwrap();
        let report = pipeline.run().unwrap();

        assert_eq!(report.total_failed(), 0);
        assert!(base.join("hdf5/neutron/U235.h5").exists());
        assert!(base.join("hdf5/neutron/H1.h5").exists());
        assert!(!base.join("hdf5/neutron/n1.h5").exists());

        let index = fs::read_to_string(base.join("hdf5/cross_sections.xml")).unwrap();
        let h1 = index.find("materials=\"H1\"").unwrap();
        let u235 = index.find("materials=\"U235\"").unwrap();
        assert!(h1 < u235, "registration must follow (Z, A, m) order");
        assert!(index.contains("path=\"neutron/H1.h5\""));
    }

    #[test]
    fn test_failures_are_collected_not_fatal() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        seed(base, "endf/neutron/n-092_U_235.endf", "u235");
        seed(base, "endf/neutron/n-001_H_001.endf", "h1");

        let config = offline_config(base, vec![Particle::Neutron]);
        let mock = MockProcessor::failing_on("U_235");
        let pipeline = LibraryPipeline::new(&config, &mock).unwrap();
        let report = pipeline.run().unwrap();

        assert_eq!(report.total_failed(), 1);
        // The healthy evaluation still processed and registered
        let index = fs::read_to_string(base.join("hdf5/cross_sections.xml")).unwrap();
        assert!(index.contains("materials=\"H1\""));
        assert!(!index.contains("materials=\"U235\""));
    }

    #[test]
    fn test_missing_evaluations_are_fatal() {
        let dir = tempdir().unwrap();
        let config = offline_config(dir.path(), vec![Particle::Neutron]);
        let mock = MockProcessor::new();
        let pipeline = LibraryPipeline::new(&config, &mock).unwrap();
        let err = pipeline.run().unwrap_err();
        assert!(err.to_string().contains("No neutron evaluation files found"));
    }

    #[test]
    fn test_thermal_requires_companion_neutron_evaluation() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        // TSL file present, companion neutron evaluation absent
        seed(base, "endf/thermal/tsl-HinH2O.endf", "tsl");

        let config = offline_config(base, vec![Particle::Thermal]);
        let mock = MockProcessor::new();
        let pipeline = LibraryPipeline::new(&config, &mock).unwrap();
        let err = pipeline.run().unwrap_err();
        assert!(err.to_string().contains("Missing evaluation for thermal pairing"));
    }

    #[test]
    fn test_thermal_pairs_feed_the_processor() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        let sources = Release::EndfbViii1.sources(Particle::Thermal).unwrap();
        let ParticleDetail::Thermal { pairs, .. } = sources.detail else {
            panic!("thermal detail expected");
        };
        for pair in pairs {
            seed(base, &format!("endf/neutron/{}", pair.neutron), "n");
            seed(base, &format!("endf/thermal/{}", pair.thermal), "tsl");
        }

        let config = offline_config(base, vec![Particle::Thermal]);
        let mock = MockProcessor::new();
        let pipeline = LibraryPipeline::new(&config, &mock).unwrap();
        let report = pipeline.run().unwrap();

        assert_eq!(report.total_failed(), 0);
        assert_eq!(mock.invocations().len(), pairs.len());
        let index = fs::read_to_string(base.join("hdf5/cross_sections.xml")).unwrap();
        assert!(index.contains("materials=\"c_HinH2O\""));
    }

    #[test]
    fn test_photon_pairing_mismatch_is_fatal() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        seed(base, "endf/photon/photoat-001_H_000.endf", "p");
        seed(base, "endf/photon/photoat-092_U_000.endf", "p");
        seed(base, "endf/photon/atom-001_H_000.endf", "a");

        let config = offline_config(base, vec![Particle::Photon]);
        let mock = MockProcessor::new();
        let pipeline = LibraryPipeline::new(&config, &mock).unwrap();
        let err = pipeline.run().unwrap_err();
        assert!(err.to_string().contains("do not pair up"));
    }

    #[test]
    fn test_photon_conversion_registers_photon_type() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        seed(base, "endf/photon/photoat-001_H_000.endf", "p");
        seed(base, "endf/photon/atom-001_H_000.endf", "a");

        let config = offline_config(base, vec![Particle::Photon]);
        let mock = MockProcessor::new();
        let pipeline = LibraryPipeline::new(&config, &mock).unwrap();
        pipeline.run().unwrap();

        let index = fs::read_to_string(base.join("hdf5/cross_sections.xml")).unwrap();
        assert!(index.contains(r#"type="photon""#));
    }
}
