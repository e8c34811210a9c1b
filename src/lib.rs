//! # Dataset Distribution
//!
//! Class balance report for labeled dataset manifests.
//!
//! Each split of a dataset (for example `TrainVal` and `Test`) is described by
//! a manifest listing `path,class_name` pairs. For every configured split this
//! crate discovers the classes present, counts samples per class, prints a
//! text histogram and optionally saves a bar chart.
//!
//! ## Modules
//!
//! - `dataset`: Manifest parsing and split definitions
//! - `report`: Class distribution, text histogram and chart output
//! - `pipeline`: Runs all splits in configuration order
//! - `config`: Analysis configuration (defaults + TOML)
//! - `utils`: Logging, errors and chart drawing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dataset_distribution::{run_analysis, AnalysisConfig, ChartCapability, DistributionReporter};
//!
//! let config = AnalysisConfig::default();
//! let reporter = DistributionReporter::new(
//!     config.report_options(),
//!     ChartCapability::detect(&config.chart),
//! );
//! let summary = run_analysis(&config, &reporter, &mut std::io::stdout())?;
//! println!("{} splits analyzed", summary.splits.len());
//! # Ok::<(), dataset_distribution::DistributionError>(())
//! ```

pub mod config;
pub mod dataset;
pub mod pipeline;
pub mod report;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::{AnalysisConfig, ChartConfig};
pub use dataset::{read_manifest, Manifest, ManifestRecord, SplitSpec};
pub use pipeline::{analyze_split, run_analysis, AnalysisSummary, SplitSummary};
pub use report::{
    ChartCapability, ChartFormat, ClassDistribution, DistributionReporter, ReportOptions,
    SplitStatus,
};
pub use utils::error::{DistributionError, Result};

/// Length of the text bar for the most frequent class
pub const DEFAULT_BAR_WIDTH: usize = 30;

/// Default directory holding the manifest files
pub const DEFAULT_DATA_PATH: &str = "data";

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
