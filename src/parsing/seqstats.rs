//! Parser for `seqkit stats -T` summary tables.
//!
//! One header row naming the columns, then one row per input file. Only the
//! `num_seqs` and `avg_len` columns are consumed: read counts are summed
//! across files and average read lengths are averaged, mirroring how a pair
//! of R1/R2 files describes one sample.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parsing::ParseError;

/// Aggregated read statistics for a set of FASTQ files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadStats {
    /// Total reads across all files
    pub num_reads: u64,

    /// Mean of the per-file average read lengths
    pub mean_read_length: f64,
}

impl ReadStats {
    /// Report entries in presentation order.
    #[must_use]
    pub fn report_entries(&self) -> Vec<(String, serde_json::Value)> {
        vec![
            ("Number of reads".to_string(), self.num_reads.into()),
            ("Average read length".to_string(), self.mean_read_length.into()),
        ]
    }
}

/// Parse a stats table from a file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` for malformed content.
pub fn parse_stats_file(path: &Path) -> Result<ReadStats, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_stats_text(&content)
}

/// Parse a stats table from text.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the header is missing the
/// `num_seqs`/`avg_len` columns, a data row is short, a value fails to
/// parse, or there are no data rows at all.
pub fn parse_stats_text(text: &str) -> Result<ReadStats, ParseError> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| ParseError::InvalidFormat("Empty stats table".to_string()))?;
    let columns: Vec<&str> = header.split('\t').map(str::trim).collect();

    let num_seqs_col = columns
        .iter()
        .position(|c| *c == "num_seqs")
        .ok_or_else(|| ParseError::InvalidFormat("Missing 'num_seqs' column".to_string()))?;
    let avg_len_col = columns
        .iter()
        .position(|c| *c == "avg_len")
        .ok_or_else(|| ParseError::InvalidFormat("Missing 'avg_len' column".to_string()))?;

    let mut num_reads: u64 = 0;
    let mut lengths: Vec<f64> = Vec::new();

    for (i, line) in lines.enumerate() {
        // Data rows start after the header
        let line_num = i + 2;
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

        if fields.len() <= num_seqs_col.max(avg_len_col) {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has too few fields"
            )));
        }

        // seqkit formats large counts with thousands separators unless -T is
        // given; reject them loudly rather than misparse
        let count: u64 = fields[num_seqs_col].parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid read count on line {}: '{}'",
                line_num, fields[num_seqs_col]
            ))
        })?;
        let avg_len: f64 = fields[avg_len_col].parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid average length on line {}: '{}'",
                line_num, fields[avg_len_col]
            ))
        })?;

        num_reads += count;
        lengths.push(avg_len);
    }

    if lengths.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No data rows in stats table".to_string(),
        ));
    }

    #[allow(clippy::cast_precision_loss)]
    let mean_read_length = lengths.iter().sum::<f64>() / lengths.len() as f64;

    Ok(ReadStats {
        num_reads,
        mean_read_length,
    })
}
