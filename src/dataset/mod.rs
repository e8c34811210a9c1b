//! Dataset module: manifests and splits
//!
//! This module provides functionality for:
//! - Reading per-split manifest files into labeled records
//! - Describing the configured splits and where their manifests live

pub mod manifest;
pub mod split;

pub use manifest::{is_header, parse_line, parse_manifest, read_manifest, Manifest, ManifestRecord};
pub use split::{default_splits, SplitSpec, TEST_LIST, TRAINVAL_LIST};
