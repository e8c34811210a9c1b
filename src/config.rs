//! Analysis configuration.
//!
//! Defaults reproduce the standard layout: a `data` directory holding
//! `trainval_data_list.txt` and `test_data_list.txt`. Everything can be
//! overridden from a TOML file:
//!
//! ```toml
//! data_path = "datasets/leaves"
//! output_dir = "reports"
//! bar_width = 40
//!
//! [[splits]]
//! name = "Train"
//! file = "train.csv"
//!
//! [chart]
//! format = "svg"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::{default_splits, SplitSpec};
use crate::report::{ChartFormat, ReportOptions};
use crate::utils::error::{DistributionError, Result};
use crate::{DEFAULT_BAR_WIDTH, DEFAULT_DATA_PATH};

/// Smallest chart size that leaves room for the plot area
pub const MIN_CHART_WIDTH: u32 = 200;
pub const MIN_CHART_HEIGHT: u32 = 150;

/// Chart settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Draw charts at all
    pub enabled: bool,
    pub format: ChartFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            format: ChartFormat::Png,
            width: 1000,
            height: 600,
        }
    }
}

/// Top-level configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory containing the manifest files
    pub data_path: PathBuf,
    /// Splits to analyze, in reporting order
    pub splits: Vec<SplitSpec>,
    /// Directory chart files are written to
    pub output_dir: PathBuf,
    /// Bar length of the most frequent class in the text histogram
    pub bar_width: usize,
    pub chart: ChartConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            splits: default_splits(),
            output_dir: PathBuf::from("."),
            bar_width: DEFAULT_BAR_WIDTH,
            chart: ChartConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse configuration from TOML text; missing keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DistributionError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content).map_err(|e| {
            DistributionError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    /// Check the configuration for values that cannot produce a sensible report
    pub fn validate(&self) -> Result<()> {
        if self.bar_width == 0 {
            return Err(DistributionError::Config(
                "bar_width must be greater than 0".to_string(),
            ));
        }

        // Chart files are named after the lowercased split name, so names
        // must stay distinct after lowercasing.
        let mut seen = HashSet::new();
        for split in &self.splits {
            if split.name.trim().is_empty() {
                return Err(DistributionError::Config(
                    "split names must not be empty".to_string(),
                ));
            }
            if !seen.insert(split.name.to_lowercase()) {
                return Err(DistributionError::Config(format!(
                    "duplicate split name '{}'",
                    split.name
                )));
            }
        }

        if self.chart.width < MIN_CHART_WIDTH || self.chart.height < MIN_CHART_HEIGHT {
            return Err(DistributionError::Config(format!(
                "chart size must be at least {}x{}, got {}x{}",
                MIN_CHART_WIDTH, MIN_CHART_HEIGHT, self.chart.width, self.chart.height
            )));
        }

        Ok(())
    }

    /// Manifest location of a split
    pub fn manifest_path(&self, split: &SplitSpec) -> PathBuf {
        split.manifest_path(&self.data_path)
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            bar_width: self.bar_width,
            output_dir: self.output_dir.clone(),
        }
    }
}
