//! Funding report persistence.
//!
//! A run's report is written next to the test harness as pretty JSON so
//! later steps can see which whale paid what. Writes go through a sibling
//! temp file and a rename, so a reader never sees half a report.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::types::FundingReport;

/// A report file on disk.
#[derive(Debug, Clone)]
pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored report with `report`.
    pub fn write(&self, report: &FundingReport) -> Result<()> {
        let json = serde_json::to_vec_pretty(report).context("Failed to encode funding report")?;

        let staging = self.path.with_extension("json.tmp");
        std::fs::write(&staging, json)
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        std::fs::rename(&staging, &self.path)
            .with_context(|| format!("Failed to move report into {}", self.path.display()))?;

        debug!(path = %self.path.display(), run_id = %report.run_id, "Report written");
        Ok(())
    }

    /// Read back the last report written to this path.
    pub fn read(&self) -> Result<FundingReport> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("No report at {}", self.path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Corrupt report at {}", self.path.display()))
    }
}
