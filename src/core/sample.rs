use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A validated paired-end sequencing sample.
///
/// Produced once by discovery (see [`crate::discovery`]) and immutable
/// afterwards. The invariant - exactly one R1 file and exactly one R2 file
/// per prefix - is enforced at discovery time, so holders of a `Sample` may
/// rely on both paths being present and distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Sample identifier extracted from the read file names
    pub prefix: String,

    /// Forward (R1) read file
    pub r1: PathBuf,

    /// Reverse (R2) read file
    pub r2: PathBuf,
}

impl Sample {
    pub fn new(prefix: impl Into<String>, r1: impl Into<PathBuf>, r2: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            r1: r1.into(),
            r2: r2.into(),
        }
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (r1: {}, r2: {})",
            self.prefix,
            self.r1.display(),
            self.r2.display()
        )
    }
}
