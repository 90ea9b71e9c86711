//! Parser for variant tables.
//!
//! Six tab-separated columns, no header:
//! `position`, `ref`, `alt`, `frequency`, `depth`, `quality`.
//! This is the tabular export of the variant caller; rendering it is a
//! collaborator concern, the pipeline only records counts from it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parsing::ParseError;

/// One row of a variant table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// 1-based position on the consensus
    pub pos: u64,
    pub ref_allele: String,
    pub alt_allele: String,
    /// Alternate allele frequency in `[0, 1]`
    pub frequency: f64,
    pub depth: u32,
    pub quality: f64,
}

/// Parse a variant table from a file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` for malformed lines.
pub fn parse_variant_file(path: &Path) -> Result<Vec<VariantRecord>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_variant_text(&content)
}

/// Parse a variant table from text.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 6 fields or
/// a numeric field fails to parse.
pub fn parse_variant_text(text: &str) -> Result<Vec<VariantRecord>, ParseError> {
    let mut records = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let line_num = i + 1;
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        if fields.len() < 6 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 6 fields"
            )));
        }

        let numeric = |col: usize, what: &str| {
            fields[col].parse::<f64>().map_err(|_| {
                ParseError::InvalidFormat(format!(
                    "Invalid {what} on line {}: '{}'",
                    line_num, fields[col]
                ))
            })
        };

        let pos: u64 = fields[0].parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid position on line {}: '{}'",
                line_num, fields[0]
            ))
        })?;
        let depth: u32 = fields[4].parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid depth on line {}: '{}'",
                line_num, fields[4]
            ))
        })?;

        records.push(VariantRecord {
            pos,
            ref_allele: fields[1].to_string(),
            alt_allele: fields[2].to_string(),
            frequency: numeric(3, "frequency")?,
            depth,
            quality: numeric(5, "quality")?,
        });
    }

    Ok(records)
}
