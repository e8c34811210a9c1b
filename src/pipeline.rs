//! Runs every configured split through reader and reporter, in order.
//!
//! Splits are independent: a missing or unreadable manifest is reported and
//! skipped, and the next split is processed as usual. Only a failure to write
//! the report itself stops the run.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::dataset::{read_manifest, SplitSpec};
use crate::report::{text, ClassDistribution, DistributionReporter, SplitStatus};
use crate::utils::error::{DistributionError, Result};

/// Result of analyzing one split
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSummary {
    pub name: String,
    pub manifest_path: PathBuf,
    pub status: SplitStatus,
    pub total_samples: usize,
    /// Data lines dropped for having fewer than two fields
    pub skipped_lines: usize,
    /// Per-class counts, in lexicographic class order
    pub classes: ClassDistribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SplitSummary {
    fn without_data(split: &SplitSpec, manifest_path: PathBuf, status: SplitStatus) -> Self {
        Self {
            name: split.name.clone(),
            manifest_path,
            status,
            total_samples: 0,
            skipped_lines: 0,
            classes: ClassDistribution::default(),
            chart_path: None,
            error: None,
        }
    }
}

/// Results of a whole run, one entry per configured split
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub data_path: PathBuf,
    pub splits: Vec<SplitSummary>,
}

impl AnalysisSummary {
    /// Summary for a split by name
    pub fn split(&self, name: &str) -> Option<&SplitSummary> {
        self.splits.iter().find(|s| s.name == name)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the summary as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        info!("Wrote summary to {}", path.display());
        Ok(())
    }
}

/// Analyze a single split: read its manifest and report it to `out`.
///
/// A missing manifest is not an error; the split is reported as
/// [`SplitStatus::FileMissing`] after a warning line.
pub fn analyze_split<W: Write>(
    split: &SplitSpec,
    data_path: &Path,
    reporter: &DistributionReporter,
    out: &mut W,
) -> Result<SplitSummary> {
    let manifest_path = split.manifest_path(data_path);
    info!("Analyzing '{}' from {}", split.name, manifest_path.display());

    let manifest = match read_manifest(&manifest_path)? {
        Some(manifest) => manifest,
        None => {
            warn!("Manifest for '{}' not found at {}", split.name, manifest_path.display());
            out.write_all(text::missing_manifest_line(&split.name, &manifest_path).as_bytes())?;
            return Ok(SplitSummary::without_data(
                split,
                manifest_path,
                SplitStatus::FileMissing,
            ));
        }
    };

    let outcome = reporter.report(&manifest.records, &split.name, out)?;

    Ok(SplitSummary {
        name: split.name.clone(),
        manifest_path,
        status: outcome.status,
        total_samples: outcome.distribution.total(),
        skipped_lines: manifest.skipped_lines,
        classes: outcome.distribution,
        chart_path: outcome.chart_path,
        error: outcome.chart_error,
    })
}

/// Analyze every configured split in order
pub fn run_analysis<W: Write>(
    config: &AnalysisConfig,
    reporter: &DistributionReporter,
    out: &mut W,
) -> Result<AnalysisSummary> {
    let mut splits = Vec::with_capacity(config.splits.len());

    for split in &config.splits {
        match analyze_split(split, &config.data_path, reporter, out) {
            Ok(summary) => splits.push(summary),
            // The report stream itself is broken; nothing more can be shown.
            Err(DistributionError::Io(e)) => return Err(DistributionError::Io(e)),
            Err(e) => {
                warn!("Skipping '{}': {}", split.name, e);
                let reason = e.to_string();
                out.write_all(text::unreadable_manifest_line(&split.name, &reason).as_bytes())?;

                let mut summary = SplitSummary::without_data(
                    split,
                    config.manifest_path(split),
                    SplitStatus::Failed,
                );
                summary.error = Some(reason);
                splits.push(summary);
            }
        }
    }

    Ok(AnalysisSummary {
        data_path: config.data_path.clone(),
        splits,
    })
}
