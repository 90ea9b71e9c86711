//! Core data types for the dengue QC pipeline.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Sample`]: A validated paired-end sequencing sample (prefix + R1/R2 files)
//! - [`SeqRecord`]: A named nucleotide sequence (one FASTA record)
//! - [`GenomicPosition`], [`DepthRecord`]: 1-based per-base coordinates and coverage
//! - [`TaxonTable`]: The taxonomic identifiers recognized in classification reports
//!
//! ## Coordinates
//!
//! All genomic positions are **1-based and inclusive**, matching the coverage
//! tables emitted by `bedtools genomecov -d`. Conversion to 0-based indexing
//! happens only at the point of sequence mutation, never in the data model.

pub mod sample;
pub mod sequence;
pub mod types;

pub use sample::Sample;
pub use sequence::SeqRecord;
pub use types::{DepthRecord, GenomicPosition, TaxonTable};
