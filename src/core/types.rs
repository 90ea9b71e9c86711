use serde::{Deserialize, Serialize};

/// A single genomic coordinate, 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenomicPosition {
    /// Chromosome / sequence name
    pub chrom: String,

    /// 1-based position within the chromosome
    pub pos: u64,
}

impl GenomicPosition {
    pub fn new(chrom: impl Into<String>, pos: u64) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
        }
    }
}

impl std::fmt::Display for GenomicPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.chrom, self.pos)
    }
}

/// Read depth observed at one genomic position.
///
/// One record per base of a single-chromosome reference, as produced by
/// `bedtools genomecov -d`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthRecord {
    /// Chromosome / sequence name
    pub chrom: String,

    /// 1-based position within the chromosome
    pub pos: u64,

    /// Number of reads overlapping this position
    pub depth: u32,
}

impl DepthRecord {
    pub fn new(chrom: impl Into<String>, pos: u64, depth: u32) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
            depth,
        }
    }

    #[must_use]
    pub fn position(&self) -> GenomicPosition {
        GenomicPosition::new(self.chrom.clone(), self.pos)
    }
}

/// Taxonomic identifiers recognized in classification reports.
///
/// These are fixed identifiers from the NCBI taxonomy build used by the
/// classification database; they are carried as configuration data rather
/// than hard-coded at extraction sites so an updated taxonomy can be
/// swapped in without touching the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonTable {
    /// Homo sapiens
    pub human: String,

    /// Dengue virus species node
    pub dengue: String,

    /// Serotypes 1-4, in order
    pub serotypes: [String; 4],
}

impl Default for TaxonTable {
    fn default() -> Self {
        Self {
            human: "9606".to_string(),
            dengue: "12637".to_string(),
            serotypes: [
                "11053".to_string(),
                "11060".to_string(),
                "11069".to_string(),
                "11070".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        let pos = GenomicPosition::new("DENV1", 42);
        assert_eq!(pos.to_string(), "DENV1:42");
    }

    #[test]
    fn test_default_taxon_table() {
        let table = TaxonTable::default();
        assert_eq!(table.human, "9606");
        assert_eq!(table.dengue, "12637");
        assert_eq!(table.serotypes[0], "11053");
        assert_eq!(table.serotypes[3], "11070");
    }
}
