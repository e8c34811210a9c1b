//! Split definitions
//!
//! A split is a named partition of the dataset backed by one manifest file.
//! The set of splits comes from configuration; nothing is discovered on disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Manifest file name for the combined train/validation split
pub const TRAINVAL_LIST: &str = "trainval_data_list.txt";

/// Manifest file name for the test split
pub const TEST_LIST: &str = "test_data_list.txt";

/// A configured split: display name plus manifest file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSpec {
    /// Human-readable name, e.g. "TrainVal"
    pub name: String,
    /// Manifest file, relative to the data directory unless absolute
    pub file: PathBuf,
}

impl SplitSpec {
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }

    /// Resolve the manifest location under `data_path`
    pub fn manifest_path(&self, data_path: &Path) -> PathBuf {
        data_path.join(&self.file)
    }
}

/// The default splits, in reporting order
pub fn default_splits() -> Vec<SplitSpec> {
    vec![
        SplitSpec::new("TrainVal", TRAINVAL_LIST),
        SplitSpec::new("Test", TEST_LIST),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_splits_order() {
        let splits = default_splits();
        let names: Vec<&str> = splits.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["TrainVal", "Test"]);
        assert_eq!(splits[0].file, PathBuf::from("trainval_data_list.txt"));
    }

    #[test]
    fn test_manifest_path_resolution() {
        let split = SplitSpec::new("Test", TEST_LIST);
        assert_eq!(
            split.manifest_path(Path::new("data")),
            PathBuf::from("data/test_data_list.txt")
        );

        let absolute = SplitSpec::new("Extra", "/lists/extra.txt");
        assert_eq!(
            absolute.manifest_path(Path::new("data")),
            PathBuf::from("/lists/extra.txt")
        );
    }
}
