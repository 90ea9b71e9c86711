//! Command-line interface for denv-qc.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **run**: Discover paired samples in a directory and run the full
//!   pipeline for each
//! - **samples**: Validate and list the paired samples in a directory
//! - **mask**: Depth-mask a consensus FASTA from a coverage table
//! - **select**: Pick the single contig above a size cutoff from an assembly
//!
//! ## Usage
//!
//! ```text
//! # Full pipeline over a sequencing run folder
//! denv-qc run fastq/ --outdir results/ --kraken-db /dbs/k2_viral
//!
//! # Check pairing before committing to a run
//! denv-qc samples fastq/
//!
//! # Re-mask an existing consensus at a stricter cutoff
//! denv-qc mask sampleA.fasta sampleA.consensus.depth.txt \
//!     --cutoff 100 --name sampleA --output sampleA.masked.fasta
//!
//! # Contig selection on assembler output
//! denv-qc select final.contigs.fa --name sampleA --output sampleA.fasta
//! ```

use clap::{Parser, Subcommand};

pub mod mask;
pub mod run;
pub mod samples;
pub mod select;

#[derive(Parser)]
#[command(name = "denv-qc")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "QC, consensus building, and contig selection for dengue sequencing runs")]
#[command(
    long_about = "denv-qc takes a folder of paired FASTQ files from a dengue sequencing run and produces, per sample:\n- a depth-masked consensus sequence\n- a per-base coverage table and variant table\n- a durable JSON report of read, classification, and assembly metrics\n\nAlignment, assembly, classification, and variant calling are delegated to external tools (bwa, samtools, megahit, pilon, bedtools, kraken2, seqkit, lofreq, bcftools) which must be on PATH for the `run` command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline for every paired sample in a directory
    Run(run::RunArgs),

    /// Validate and list the paired samples in a directory
    Samples(samples::SamplesArgs),

    /// Depth-mask a consensus FASTA from a coverage table
    Mask(mask::MaskArgs),

    /// Select the single contig above a size cutoff from an assembly
    Select(select::SelectArgs),
}
