//! Chart output for a split's distribution.
//!
//! Charting is an optional capability. It is resolved once at start-up into a
//! [`ChartCapability`] and handed to the reporter, which only ever asks it for
//! a renderer. PNG output needs the `charts` cargo feature; SVG is always
//! available.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::distribution::ClassDistribution;
use crate::config::ChartConfig;
use crate::utils::charts::{write_bar_chart_svg, BarChart, BarData};
use crate::utils::error::Result;

/// Image format for chart files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    #[default]
    Png,
    Svg,
}

impl ChartFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        }
    }

    /// Whether this build can produce the format
    pub fn is_supported(&self) -> bool {
        match self {
            ChartFormat::Png => cfg!(feature = "charts"),
            ChartFormat::Svg => true,
        }
    }
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ChartFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(ChartFormat::Png),
            "svg" => Ok(ChartFormat::Svg),
            other => Err(format!("unknown chart format '{}' (expected png or svg)", other)),
        }
    }
}

/// Something that can turn a bar chart into a file
pub trait ChartRenderer: fmt::Debug {
    fn format(&self) -> ChartFormat;

    fn render(&self, chart: &BarChart, output_path: &Path) -> Result<()>;
}

/// Vector output, no extra dependencies
#[derive(Debug, Clone, Copy)]
pub struct SvgChartRenderer {
    pub width: u32,
    pub height: u32,
}

impl ChartRenderer for SvgChartRenderer {
    fn format(&self) -> ChartFormat {
        ChartFormat::Svg
    }

    fn render(&self, chart: &BarChart, output_path: &Path) -> Result<()> {
        write_bar_chart_svg(chart, self.width, self.height, output_path)?;
        Ok(())
    }
}

/// Raster output through the `image` crate
#[cfg(feature = "charts")]
#[derive(Debug, Clone, Copy)]
pub struct PngChartRenderer {
    pub width: u32,
    pub height: u32,
}

#[cfg(feature = "charts")]
impl ChartRenderer for PngChartRenderer {
    fn format(&self) -> ChartFormat {
        ChartFormat::Png
    }

    fn render(&self, chart: &BarChart, output_path: &Path) -> Result<()> {
        crate::utils::charts::save_bar_chart_png(chart, self.width, self.height, output_path)
    }
}

/// Process-wide charting capability, fixed at start-up
#[derive(Debug)]
pub enum ChartCapability {
    /// Charts will be written with this renderer
    Available(Box<dyn ChartRenderer>),
    /// Turned off by configuration
    Disabled,
    /// Requested format is not compiled into this build
    Unavailable(ChartFormat),
}

impl ChartCapability {
    /// Resolve the capability from configuration and compiled features
    pub fn detect(config: &ChartConfig) -> Self {
        if !config.enabled {
            return ChartCapability::Disabled;
        }

        match config.format {
            ChartFormat::Svg => ChartCapability::Available(Box::new(SvgChartRenderer {
                width: config.width,
                height: config.height,
            })),
            #[cfg(feature = "charts")]
            ChartFormat::Png => ChartCapability::Available(Box::new(PngChartRenderer {
                width: config.width,
                height: config.height,
            })),
            #[cfg(not(feature = "charts"))]
            ChartFormat::Png => ChartCapability::Unavailable(ChartFormat::Png),
        }
    }

    /// Use a specific renderer
    pub fn with_renderer(renderer: Box<dyn ChartRenderer>) -> Self {
        ChartCapability::Available(renderer)
    }

    pub fn renderer(&self) -> Option<&dyn ChartRenderer> {
        match self {
            ChartCapability::Available(renderer) => Some(renderer.as_ref()),
            _ => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ChartCapability::Available(_))
    }

    /// One-time start-up warning, if charts were requested but cannot be drawn
    pub fn warning(&self) -> Option<String> {
        match self {
            ChartCapability::Unavailable(format) => Some(format!(
                "Warning: {} chart support is not compiled into this build. Chart generation will be skipped.\n\
                 You can enable it by reinstalling with: cargo install dataset_distribution --features charts\n\
                 (or pass --chart-format svg for vector charts)",
                format.extension().to_uppercase()
            )),
            _ => None,
        }
    }
}

/// Chart file name for a split, e.g. `trainval_distribution.png`
pub fn chart_file_name(split_name: &str, format: ChartFormat) -> String {
    format!("{}_distribution.{}", split_name.to_lowercase(), format.extension())
}

/// One bar per class, in lexicographic class order
pub fn distribution_chart(split_name: &str, dist: &ClassDistribution) -> BarChart {
    let bars = dist
        .iter()
        .map(|(class_name, count)| BarData {
            label: class_name.to_string(),
            value: count,
        })
        .collect();

    BarChart::new(
        format!("'{}' Set - Sample Distribution per Class", split_name),
        "Class Name",
        "Number of Samples",
        bars,
    )
}
