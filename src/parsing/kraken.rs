//! Extraction of read percentages from kraken-style classification reports.
//!
//! The report is tab-separated; column 0 holds the percentage of reads
//! assigned to a clade and column 4 holds the taxonomic identifier. Only the
//! identifiers named in a [`TaxonTable`] are extracted; everything else in
//! the report is ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::TaxonTable;
use crate::parsing::ParseError;

/// Column index of the clade read percentage.
const PERCENT_COLUMN: usize = 0;
/// Column index of the taxonomic identifier.
const TAXID_COLUMN: usize = 4;

/// Read percentages for the taxa of interest.
///
/// A taxon absent from the report keeps its default of 0.0, matching a run
/// where no reads were assigned to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    pub human: f64,
    pub dengue: f64,
    pub serotypes: [f64; 4],
}

impl ClassificationSummary {
    /// Report entries in presentation order.
    #[must_use]
    pub fn report_entries(&self) -> Vec<(String, f64)> {
        let mut entries = vec![
            ("Read percent human".to_string(), self.human),
            ("Read percent dengue".to_string(), self.dengue),
        ];
        for (i, percent) in self.serotypes.iter().enumerate() {
            entries.push((format!("Read percent dengue {}", i + 1), *percent));
        }
        entries
    }
}

/// Extract taxa percentages from a classification report file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` for malformed lines.
pub fn extract_file(path: &Path, taxa: &TaxonTable) -> Result<ClassificationSummary, ParseError> {
    let content = std::fs::read_to_string(path)?;
    extract_text(&content, taxa)
}

/// Extract taxa percentages from classification report text.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line is too short or its
/// percentage column does not parse as a float.
pub fn extract_text(text: &str, taxa: &TaxonTable) -> Result<ClassificationSummary, ParseError> {
    let mut summary = ClassificationSummary::default();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() <= TAXID_COLUMN {
            return Err(ParseError::InvalidFormat(format!(
                "Line {} has fewer than {} fields",
                i + 1,
                TAXID_COLUMN + 1
            )));
        }

        let taxid = fields[TAXID_COLUMN].trim();
        let slot = if taxid == taxa.human {
            &mut summary.human
        } else if taxid == taxa.dengue {
            &mut summary.dengue
        } else if let Some(serotype) = taxa.serotypes.iter().position(|t| t == taxid) {
            &mut summary.serotypes[serotype]
        } else {
            continue;
        };

        *slot = fields[PERCENT_COLUMN].trim().parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid percentage on line {}: '{}'",
                i + 1,
                fields[PERCENT_COLUMN]
            ))
        })?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
 12.50\t1000\t1000\tU\t0\tunclassified
 40.00\t3200\t10\tS\t9606\tHomo sapiens
 45.00\t3600\t5\tS\t12637\tDengue virus
 44.10\t3528\t3528\tS1\t11053\tDengue virus 1
  0.02\t2\t2\tS1\t11069\tDengue virus 3
";

    #[test]
    fn test_extract_text() {
        let summary = extract_text(REPORT, &TaxonTable::default()).unwrap();
        assert!((summary.human - 40.0).abs() < 1e-9);
        assert!((summary.dengue - 45.0).abs() < 1e-9);
        assert!((summary.serotypes[0] - 44.1).abs() < 1e-9);
        assert_eq!(summary.serotypes[1], 0.0);
        assert!((summary.serotypes[2] - 0.02).abs() < 1e-9);
        assert_eq!(summary.serotypes[3], 0.0);
    }

    #[test]
    fn test_extract_missing_taxa_default_to_zero() {
        let summary = extract_text(" 10.0\t5\t5\tU\t0\tunclassified\n", &TaxonTable::default())
            .unwrap();
        assert_eq!(summary, ClassificationSummary::default());
    }

    #[test]
    fn test_report_entries_order() {
        let summary = ClassificationSummary {
            human: 1.0,
            dengue: 2.0,
            serotypes: [3.0, 4.0, 5.0, 6.0],
        };
        let keys: Vec<String> = summary.report_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "Read percent human",
                "Read percent dengue",
                "Read percent dengue 1",
                "Read percent dengue 2",
                "Read percent dengue 3",
                "Read percent dengue 4",
            ]
        );
    }

    #[test]
    fn test_extract_short_line_fails() {
        let err = extract_text("40.0\t9606\n", &TaxonTable::default()).unwrap_err();
        assert!(err.to_string().contains("fewer than 5"));
    }
}
