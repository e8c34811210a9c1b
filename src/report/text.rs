//! Console rendering of a class distribution.
//!
//! ```text
//! --- [TrainVal] Class Distribution ---
//!   cat            :    2 | ##############################
//!   dog            :    1 | ###############
//! ```

use std::path::Path;

use super::distribution::{bar_length, ClassDistribution};

/// Width of the left-aligned class name column
pub const NAME_WIDTH: usize = 15;

/// Width of the right-aligned count column
pub const COUNT_WIDTH: usize = 4;

/// Character used for histogram bars
pub const BAR_CHAR: char = '#';

/// Section header for a split
pub fn header_line(split_name: &str) -> String {
    format!("--- [{}] Class Distribution ---", split_name)
}

/// One histogram row
pub fn class_line(class_name: &str, count: usize, max_count: usize, bar_width: usize) -> String {
    let bar: String = std::iter::repeat(BAR_CHAR)
        .take(bar_length(count, max_count, bar_width))
        .collect();
    format!(
        "  {:<name_w$}: {:>count_w$} | {}",
        class_name,
        count,
        bar,
        name_w = NAME_WIDTH,
        count_w = COUNT_WIDTH
    )
}

/// Header, one row per class in lexicographic order, then a blank line
pub fn render_distribution(split_name: &str, dist: &ClassDistribution, bar_width: usize) -> String {
    let max_count = dist.max_count();
    let mut out = header_line(split_name);
    out.push('\n');
    for (class_name, count) in dist.iter() {
        out.push_str(&class_line(class_name, count, max_count, bar_width));
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Header followed by the "no data" notice
pub fn render_empty(split_name: &str) -> String {
    format!("{}\n  No data found.\n\n", header_line(split_name))
}

pub fn missing_manifest_line(split_name: &str, path: &Path) -> String {
    format!(
        "--> Warning: Data list file not found at '{}'. Skipping '{}' set.\n\n",
        path.display(),
        split_name
    )
}

pub fn unreadable_manifest_line(split_name: &str, reason: &str) -> String {
    format!(
        "--> Warning: Could not read data list for '{}' set: {}. Skipping.\n\n",
        split_name, reason
    )
}

pub fn chart_saved_line(path: &Path) -> String {
    format!("--> Saved bar chart to '{}'\n\n", path.display())
}

pub fn chart_failed_line(split_name: &str, reason: &str) -> String {
    format!(
        "--> Warning: Could not save bar chart for '{}' set: {}\n\n",
        split_name, reason
    )
}
