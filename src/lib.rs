//! # denv-qc
//!
//! A library and CLI for QC and consensus assembly of dengue virus
//! sequencing runs.
//!
//! A sequencing run folder holds paired FASTQ files for many samples. For
//! each validated pair, the pipeline assembles the reads, selects the single
//! genome-length contig, polishes it, masks every position without enough
//! read support, and records stage metrics in a durable per-sample report.
//!
//! The heavy lifting - alignment, assembly, classification, variant calling -
//! is delegated to external tools. This crate owns what surrounds them: file
//! pairing with hard validation, the coordinate-correct masking of the
//! consensus, the exactly-one-contig selection policy, and crash-durable
//! metric reports.
//!
//! ## Example
//!
//! ```rust,no_run
//! use denv_qc::discovery::{discover, PairingConvention};
//! use denv_qc::pipeline::{run_batch, PipelineConfig};
//! use std::path::Path;
//!
//! let samples = discover(Path::new("fastq/"), &PairingConvention::default()).unwrap();
//! let config = PipelineConfig::new("results/");
//! let summary = run_batch(&samples, &config);
//! assert!(summary.all_succeeded());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Data types for samples, sequences, and genomic positions
//! - [`discovery`]: Paired FASTQ discovery and roster validation
//! - [`parsing`]: Parsers for collaborator file formats
//! - [`consensus`]: Depth masking and contig selection
//! - [`report`]: Insertion-ordered, atomically persisted run reports
//! - [`pipeline`]: Checked external tool execution and the per-sample runner
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod consensus;
pub mod core;
pub mod discovery;
pub mod parsing;
pub mod pipeline;
pub mod report;

// Re-export commonly used types for convenience
pub use consensus::mask::{depth_mask_consensus, low_coverage_positions, mask_sequence};
pub use consensus::select::{filter_and_write, select_by_size, SelectionOutcome};
pub use core::sample::Sample;
pub use core::sequence::SeqRecord;
pub use core::types::{DepthRecord, GenomicPosition, TaxonTable};
pub use discovery::{discover, PairingConvention};
pub use report::Report;
