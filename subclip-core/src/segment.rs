use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::timestamp::TimeRange;

const SEGMENT_PREFIX: &str = "segment";

/// File name for the `index`th (1-based) segment: `segment_007.mov`.
pub fn segment_file_name(index: usize, extension: &str) -> String {
    format!("{}_{:03}.{}", SEGMENT_PREFIX, index, extension)
}

/// A clip that has been cut out of the source media and exists on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub index: usize,
    pub path: PathBuf,
    pub range: TimeRange,
}

impl Segment {
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_zero_padded() {
        assert_eq!(segment_file_name(1, "mov"), "segment_001.mov");
        assert_eq!(segment_file_name(7, "mov"), "segment_007.mov");
        assert_eq!(segment_file_name(120, "mkv"), "segment_120.mkv");
    }

    #[test]
    fn padding_does_not_truncate() {
        assert_eq!(segment_file_name(1000, "mov"), "segment_1000.mov");
    }
}
