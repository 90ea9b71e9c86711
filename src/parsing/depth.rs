//! Parser for per-base coverage tables.
//!
//! Three tab-separated columns, no header, one line per base:
//! `chromosome`, `position` (1-based), `depth`. This is the `-d` output of
//! `bedtools genomecov`.

use std::path::Path;

use crate::core::types::DepthRecord;
use crate::parsing::ParseError;

/// Parse a depth table from a file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` for malformed lines.
pub fn parse_depth_file(path: &Path) -> Result<Vec<DepthRecord>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_depth_text(&content)
}

/// Parse a depth table from text.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 3 fields or
/// a position/depth value fails to parse.
pub fn parse_depth_text(text: &str) -> Result<Vec<DepthRecord>, ParseError> {
    let mut records = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 3 fields"
            )));
        }

        let pos: u64 = fields[1].trim().parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid position on line {}: '{}'",
                line_num, fields[1]
            ))
        })?;
        let depth: u32 = fields[2].trim().parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid depth on line {}: '{}'",
                line_num, fields[2]
            ))
        })?;

        records.push(DepthRecord::new(fields[0].trim(), pos, depth));
    }

    Ok(records)
}
