//! Run reporting
//!
//! Collects per-stage timing and per-evaluation outcomes, prints a summary in
//! the console, and optionally exports the same data as JSON for archival
//! next to the generated library.

use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Outcome of one pipeline stage
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    pub name: String,
    pub elapsed_secs: f64,
    /// Items handled (files downloaded, evaluations processed, ...)
    pub items: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// A single failed evaluation with the tool's message
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    pub stage: String,
    pub input: String,
    pub message: String,
}

/// Full record of one pipeline run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub command: String,
    pub target: String,
    pub started_at: DateTime<Utc>,
    pub stages: Vec<StageReport>,
    pub failures: Vec<FailureRecord>,
}

impl RunReport {
    pub fn new(command: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            target: target.into(),
            started_at: Utc::now(),
            stages: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Time a stage body, recording its outcome
    pub fn stage<T>(
        &mut self,
        name: &str,
        body: impl FnOnce(&mut StageOutcome) -> Result<T>,
    ) -> Result<T> {
        println!();
        println!("=== {} ===", name);
        let start = Instant::now();
        let mut outcome = StageOutcome::default();
        let result = body(&mut outcome);

        self.stages.push(StageReport {
            name: name.to_string(),
            elapsed_secs: start.elapsed().as_secs_f64(),
            items: outcome.items,
            skipped: outcome.skipped,
            failed: outcome.failures.len(),
        });
        for (input, message) in outcome.failures {
            self.failures.push(FailureRecord {
                stage: name.to_string(),
                input,
                message,
            });
        }
        result
    }

    pub fn total_failed(&self) -> usize {
        self.failures.len()
    }

    /// Print the closing summary (nothing to print if no stage ran)
    pub fn print_summary(&self) {
        if self.stages.is_empty() {
            return;
        }
        println!();
        println!("═══════════════════════════════════════════════════════════");
        println!("                        SUMMARY");
        println!("═══════════════════════════════════════════════════════════");
        println!();
        println!("Target: {}", self.target);
        println!();

        for stage in &self.stages {
            let mut line = format!("  {:<28} {:>8.1}s  {} items", stage.name, stage.elapsed_secs, stage.items);
            if stage.skipped > 0 {
                line.push_str(&format!(", {} skipped", stage.skipped));
            }
            if stage.failed > 0 {
                line.push_str(&format!(", {} FAILED", stage.failed));
            }
            println!("{}", line);
        }

        if !self.failures.is_empty() {
            println!();
            println!("Failures:");
            for failure in &self.failures {
                println!("  [{}] {}: {}", failure.stage, failure.input, failure.message);
            }
        }
        println!();
    }

    /// Export the report as JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, self)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }
}

/// Mutable counters handed to a stage body
#[derive(Debug, Default)]
pub struct StageOutcome {
    items: usize,
    skipped: usize,
    failures: Vec<(String, String)>,
}

impl StageOutcome {
    pub fn add_item(&mut self) {
        self.items += 1;
    }

    pub fn add_items(&mut self, count: usize) {
        self.items += count;
    }

    pub fn add_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn add_failure(&mut self, input: impl Into<String>, message: impl Into<String>) {
        self.failures.push((input.into(), message.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_stage_records_outcome() {
        let mut report = RunReport::new("library", "endfb-viii.1");
        let value = report
            .stage("process neutron", |outcome| {
                outcome.add_items(3);
                outcome.add_skipped();
                outcome.add_failure("n-000_n_001.endf", "rejected");
                Ok(42)
            })
            .unwrap();

        assert_eq!(value, 42);
        assert_eq!(report.stages.len(), 1);
        assert_eq!(report.stages[0].items, 3);
        assert_eq!(report.stages[0].skipped, 1);
        assert_eq!(report.stages[0].failed, 1);
        assert_eq!(report.total_failed(), 1);
    }

    #[test]
    fn test_stage_error_still_recorded() {
        let mut report = RunReport::new("library", "endfb-viii.1");
        let result: Result<()> = report.stage("download", |outcome| {
            outcome.add_item();
            anyhow::bail!("network down")
        });
        assert!(result.is_err());
        assert_eq!(report.stages.len(), 1);
        assert_eq!(report.stages[0].items, 1);
    }

    #[test]
    fn test_write_json() {
        let dir = tempdir().unwrap();
        let mut report = RunReport::new("chain", "jeff33");
        report
            .stage("download", |outcome| {
                outcome.add_items(3);
                Ok(())
            })
            .unwrap();

        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["command"], "chain");
        assert_eq!(parsed["stages"][0]["items"], 3);
    }
}
