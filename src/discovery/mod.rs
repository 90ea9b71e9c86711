//! Discovery of paired FASTQ files.
//!
//! A sequencing run deposits two read files per sample (R1/R2) whose names
//! share a common prefix followed by a mate-specific suffix. This module
//! classifies filenames against a [`PairingConvention`], groups them by
//! prefix, and validates that every prefix has exactly one file on each
//! side.
//!
//! Validation is fail-fast: a prefix with zero or multiple candidates on
//! either side aborts the whole discovery call with [`PairingError`].
//! Downstream per-sample pipeline runs assume a fully validated roster, so
//! silently dropping a malformed sample is not an option.
//!
//! ## Example
//!
//! ```rust,no_run
//! use denv_qc::discovery::{discover, PairingConvention};
//! use std::path::Path;
//!
//! let samples = discover(Path::new("fastq/"), &PairingConvention::default()).unwrap();
//! for sample in &samples {
//!     println!("{}", sample);
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::sample::Sample;

#[derive(Error, Debug)]
pub enum PairingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "sample '{prefix}' has {} {side} file(s), expected exactly 1: {}",
        .candidates.len(),
        format_candidates(.candidates)
    )]
    UnpairedPrefix {
        prefix: String,
        side: ReadSide,
        candidates: Vec<PathBuf>,
    },
}

fn format_candidates(candidates: &[PathBuf]) -> String {
    if candidates.is_empty() {
        return "none found".to_string();
    }
    candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Which mate of a read pair a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSide {
    R1,
    R2,
}

impl std::fmt::Display for ReadSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::R1 => write!(f, "R1"),
            Self::R2 => write!(f, "R2"),
        }
    }
}

/// A filename suffix convention for one mate of a read pair.
///
/// Stripping the suffix from a matching filename yields the sample prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadSuffix {
    /// Illumina sample-sheet naming: `<prefix>_S<number>_L001_R<mate>_001.fastq.gz`
    SampleSheet { mate: u8 },

    /// An exact literal suffix, e.g. `_1.fastq.gz`
    Literal(String),
}

impl ReadSuffix {
    /// If `filename` ends with this suffix, return the sample prefix in
    /// front of it. Returns `None` for non-matching names and for names
    /// whose prefix would be empty.
    #[must_use]
    pub fn strip<'a>(&self, filename: &'a str) -> Option<&'a str> {
        let prefix = match self {
            Self::SampleSheet { mate } => {
                let tail = format!("_L001_R{mate}_001.fastq.gz");
                let head = filename.strip_suffix(tail.as_str())?;
                // Peel the variable `S<number>` sample-sheet index
                let digits = head
                    .bytes()
                    .rev()
                    .take_while(u8::is_ascii_digit)
                    .count();
                if digits == 0 {
                    return None;
                }
                head[..head.len() - digits].strip_suffix("_S")?
            }
            Self::Literal(suffix) => filename.strip_suffix(suffix.as_str())?,
        };

        if prefix.is_empty() {
            None
        } else {
            Some(prefix)
        }
    }
}

/// Result of classifying one filename against a [`PairingConvention`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    R1(String),
    R2(String),
    NoMatch,
}

/// The pair of suffix conventions used to recognize R1 and R2 files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingConvention {
    r1: ReadSuffix,
    r2: ReadSuffix,
}

impl Default for PairingConvention {
    /// Illumina bcl2fastq defaults: `_S<n>_L001_R1_001.fastq.gz` / `..._R2_...`
    fn default() -> Self {
        Self {
            r1: ReadSuffix::SampleSheet { mate: 1 },
            r2: ReadSuffix::SampleSheet { mate: 2 },
        }
    }
}

impl PairingConvention {
    /// A convention from two literal suffixes, for sequencers or cores with
    /// non-default naming schemes.
    pub fn literal(r1_suffix: impl Into<String>, r2_suffix: impl Into<String>) -> Self {
        Self {
            r1: ReadSuffix::Literal(r1_suffix.into()),
            r2: ReadSuffix::Literal(r2_suffix.into()),
        }
    }

    /// Classify a bare filename. R1 takes precedence if both suffixes were
    /// configured to overlap.
    #[must_use]
    pub fn classify(&self, filename: &str) -> Classification {
        if let Some(prefix) = self.r1.strip(filename) {
            Classification::R1(prefix.to_string())
        } else if let Some(prefix) = self.r2.strip(filename) {
            Classification::R2(prefix.to_string())
        } else {
            Classification::NoMatch
        }
    }
}

/// Discover paired samples in a directory (non-recursive).
///
/// Files matching neither suffix are ignored. The returned roster is sorted
/// by prefix, so the output is deterministic for a fixed directory listing
/// regardless of filesystem iteration order.
///
/// # Errors
///
/// Returns `PairingError::Io` if the directory cannot be listed, or
/// `PairingError::UnpairedPrefix` if any prefix has a number of R1 or R2
/// candidates other than exactly one.
pub fn discover(dir: &Path, convention: &PairingConvention) -> Result<Vec<Sample>, PairingError> {
    let mut buckets: BTreeMap<String, (Vec<PathBuf>, Vec<PathBuf>)> = BTreeMap::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        match convention.classify(filename) {
            Classification::R1(prefix) => {
                buckets.entry(prefix).or_default().0.push(path);
            }
            Classification::R2(prefix) => {
                buckets.entry(prefix).or_default().1.push(path);
            }
            Classification::NoMatch => {}
        }
    }

    let mut samples = Vec::with_capacity(buckets.len());
    for (prefix, (mut r1, mut r2)) in buckets {
        r1.sort();
        r2.sort();
        if r1.len() != 1 {
            return Err(PairingError::UnpairedPrefix {
                prefix,
                side: ReadSide::R1,
                candidates: r1,
            });
        }
        if r2.len() != 1 {
            return Err(PairingError::UnpairedPrefix {
                prefix,
                side: ReadSide::R2,
                candidates: r2,
            });
        }
        samples.push(Sample::new(
            prefix,
            r1.pop().unwrap_or_default(),
            r2.pop().unwrap_or_default(),
        ));
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_classify_sample_sheet() {
        let convention = PairingConvention::default();
        assert_eq!(
            convention.classify("A_S1_L001_R1_001.fastq.gz"),
            Classification::R1("A".to_string())
        );
        assert_eq!(
            convention.classify("sample-7_S12_L001_R2_001.fastq.gz"),
            Classification::R2("sample-7".to_string())
        );
        assert_eq!(
            convention.classify("A_S1_L001_R1_001.fastq"),
            Classification::NoMatch
        );
        // Missing the sample-sheet index
        assert_eq!(
            convention.classify("A_L001_R1_001.fastq.gz"),
            Classification::NoMatch
        );
        // Index present but prefix empty
        assert_eq!(
            convention.classify("_S1_L001_R1_001.fastq.gz"),
            Classification::NoMatch
        );
    }

    #[test]
    fn test_classify_literal() {
        let convention = PairingConvention::literal("_1.fq.gz", "_2.fq.gz");
        assert_eq!(
            convention.classify("B_1.fq.gz"),
            Classification::R1("B".to_string())
        );
        assert_eq!(
            convention.classify("B_2.fq.gz"),
            Classification::R2("B".to_string())
        );
        assert_eq!(convention.classify("B.fq.gz"), Classification::NoMatch);
    }

    #[test]
    fn test_discover_two_samples() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "A_S1_L001_R1_001.fastq.gz");
        touch(dir.path(), "A_S1_L001_R2_001.fastq.gz");
        touch(dir.path(), "B_S2_L001_R1_001.fastq.gz");
        touch(dir.path(), "B_S2_L001_R2_001.fastq.gz");
        touch(dir.path(), "notes.txt"); // ignored

        let samples = discover(dir.path(), &PairingConvention::default()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].prefix, "A");
        assert_eq!(samples[1].prefix, "B");
        assert!(samples[0]
            .r1
            .to_string_lossy()
            .ends_with("A_S1_L001_R1_001.fastq.gz"));
        assert!(samples[1]
            .r2
            .to_string_lossy()
            .ends_with("B_S2_L001_R2_001.fastq.gz"));
    }

    #[test]
    fn test_discover_duplicate_r1_fails() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "A_S1_L001_R1_001.fastq.gz");
        touch(dir.path(), "A_S2_L001_R1_001.fastq.gz");
        touch(dir.path(), "A_S1_L001_R2_001.fastq.gz");

        let err = discover(dir.path(), &PairingConvention::default()).unwrap_err();
        match err {
            PairingError::UnpairedPrefix {
                prefix,
                side,
                candidates,
            } => {
                assert_eq!(prefix, "A");
                assert_eq!(side, ReadSide::R1);
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected UnpairedPrefix, got {other:?}"),
        }
    }

    #[test]
    fn test_discover_missing_r2_fails() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "A_S1_L001_R1_001.fastq.gz");

        let err = discover(dir.path(), &PairingConvention::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains('A'));
        assert!(message.contains("R2"));
    }

    #[test]
    fn test_discover_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        for prefix in ["zulu", "alpha", "mike"] {
            touch(dir.path(), &format!("{prefix}_S1_L001_R1_001.fastq.gz"));
            touch(dir.path(), &format!("{prefix}_S1_L001_R2_001.fastq.gz"));
        }

        let samples = discover(dir.path(), &PairingConvention::default()).unwrap();
        let prefixes: Vec<&str> = samples.iter().map(|s| s.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["alpha", "mike", "zulu"]);
    }
}
