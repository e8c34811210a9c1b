//! Distribution Reporter
//!
//! Turns one split's records into a class distribution, prints it as a text
//! histogram and, when the charting capability is available, saves a bar chart.
//!
//! ## Per-split states
//!
//! ```text
//! NOT_STARTED -> FILE_MISSING
//! NOT_STARTED -> PARSED -> EMPTY
//!                       -> REPORTED_TEXT -> REPORTED_CHART
//!                       -> REPORTED_TEXT            (no chart capability)
//! ```
//!
//! `FILE_MISSING` is decided before the reporter runs (see [`crate::pipeline`]).

pub mod chart;
pub mod distribution;
pub mod text;

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::dataset::ManifestRecord;
use crate::utils::error::Result;
use crate::DEFAULT_BAR_WIDTH;

pub use chart::{
    chart_file_name, distribution_chart, ChartCapability, ChartFormat, ChartRenderer,
    SvgChartRenderer,
};
#[cfg(feature = "charts")]
pub use chart::PngChartRenderer;
pub use distribution::{bar_length, discover_classes, ClassDistribution};

/// Terminal state of one split's processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStatus {
    /// Manifest file absent; split skipped
    FileMissing,
    /// Manifest present but yielded no valid records
    Empty,
    /// Text histogram printed, no chart written
    ReportedText,
    /// Text histogram printed and chart written
    ReportedChart,
    /// Manifest present but unreadable; split skipped
    Failed,
}

/// Reporter settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Length of the bar for the most frequent class
    pub bar_width: usize,
    /// Directory chart files are written to
    pub output_dir: PathBuf,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            output_dir: PathBuf::from("."),
        }
    }
}

/// What the reporter did for one split
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub status: SplitStatus,
    pub distribution: ClassDistribution,
    pub chart_path: Option<PathBuf>,
    /// Set when a chart was attempted but could not be saved
    pub chart_error: Option<String>,
}

/// Aggregates and reports one split at a time
#[derive(Debug)]
pub struct DistributionReporter {
    options: ReportOptions,
    charts: ChartCapability,
}

impl DistributionReporter {
    pub fn new(options: ReportOptions, charts: ChartCapability) -> Self {
        Self { options, charts }
    }

    /// Reporter that never draws charts
    pub fn text_only(options: ReportOptions) -> Self {
        Self::new(options, ChartCapability::Disabled)
    }

    /// Where the chart for `split_name` goes, if charts are enabled
    pub fn chart_path(&self, split_name: &str) -> Option<PathBuf> {
        let renderer = self.charts.renderer()?;
        let file_name = chart_file_name(split_name, renderer.format());
        if self.options.output_dir.as_os_str().is_empty() || self.options.output_dir == Path::new(".") {
            Some(PathBuf::from(file_name))
        } else {
            Some(self.options.output_dir.join(file_name))
        }
    }

    /// Report one split's records to `out`.
    ///
    /// Only failures writing to `out` are returned as errors; a chart that
    /// cannot be saved is reported inline and the split still counts as
    /// reported.
    pub fn report<W: Write>(
        &self,
        records: &[ManifestRecord],
        split_name: &str,
        out: &mut W,
    ) -> Result<ReportOutcome> {
        let distribution = ClassDistribution::from_records(records);

        if distribution.is_empty() {
            out.write_all(text::render_empty(split_name).as_bytes())?;
            return Ok(ReportOutcome {
                status: SplitStatus::Empty,
                distribution,
                chart_path: None,
                chart_error: None,
            });
        }

        out.write_all(
            text::render_distribution(split_name, &distribution, self.options.bar_width).as_bytes(),
        )?;

        let (renderer, path) = match (self.charts.renderer(), self.chart_path(split_name)) {
            (Some(renderer), Some(path)) => (renderer, path),
            _ => {
                return Ok(ReportOutcome {
                    status: SplitStatus::ReportedText,
                    distribution,
                    chart_path: None,
                    chart_error: None,
                })
            }
        };

        let chart = distribution_chart(split_name, &distribution);
        match renderer.render(&chart, &path) {
            Ok(()) => {
                info!("Saved {} chart for '{}' to {}", renderer.format(), split_name, path.display());
                out.write_all(text::chart_saved_line(&path).as_bytes())?;
                Ok(ReportOutcome {
                    status: SplitStatus::ReportedChart,
                    distribution,
                    chart_path: Some(path),
                    chart_error: None,
                })
            }
            Err(e) => {
                warn!("Chart for '{}' not saved: {}", split_name, e);
                let reason = e.to_string();
                out.write_all(text::chart_failed_line(split_name, &reason).as_bytes())?;
                Ok(ReportOutcome {
                    status: SplitStatus::ReportedText,
                    distribution,
                    chart_path: None,
                    chart_error: Some(reason),
                })
            }
        }
    }
}
