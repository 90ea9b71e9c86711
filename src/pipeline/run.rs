//! The per-sample pipeline: read QC, classification, assembly, contig
//! selection, polishing, depth masking, and variant counting.
//!
//! Each sample runs independently and owns its report file plus a fresh
//! temporary working directory, so runs for different samples share no
//! mutable state and may execute concurrently against the same output
//! directory. Failures of one sample's run (a failed tool, an ambiguous
//! assembly) are scoped to that sample; the batch keeps going.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::TempDir;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::consensus::mask;
use crate::consensus::select::{filter_and_write, SelectionOutcome};
use crate::core::sample::Sample;
use crate::core::types::TaxonTable;
use crate::parsing::{depth, fasta, kraken, seqstats, variants, ParseError};
use crate::pipeline::exec::{run_shell, CommandError};
use crate::report::{Report, ReportError};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Mask(#[from] mask::MaskError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ambiguous assembly: {count} contigs above the size cutoff, expected exactly 1")]
    AmbiguousAssembly { count: usize },
}

/// Settings shared by every sample run in a batch.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory receiving per-sample outputs (consensus, depth table,
    /// variant table, report)
    pub outdir: PathBuf,

    /// Threads handed to external tools
    pub threads: usize,

    /// Classification database; `None` skips the classification stage
    pub kraken_db: Option<PathBuf>,

    /// Positions with depth strictly below this are masked
    pub depth_cutoff: u32,

    /// Contigs must be strictly longer than this to qualify as the consensus
    pub size_cutoff: usize,

    /// Taxonomic identifiers extracted from classification reports
    pub taxa: TaxonTable,
}

impl PipelineConfig {
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
            threads: default_threads(),
            kraken_db: None,
            depth_cutoff: 50,
            size_cutoff: 9000,
            taxa: TaxonTable::default(),
        }
    }
}

/// A quarter of the available processing units, at least 1.
#[must_use]
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| (n.get() / 4).max(1))
        .unwrap_or(1)
}

/// Outcome of a batch over a validated sample roster.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Prefixes whose runs completed
    pub completed: Vec<String>,

    /// Prefixes whose runs failed, with the failure
    pub failed: Vec<(String, PipelineError)>,
}

impl BatchSummary {
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run the pipeline for every sample, continuing past per-sample failures.
pub fn run_batch(samples: &[Sample], config: &PipelineConfig) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for sample in samples {
        info!("Processing sample {}", sample.prefix);
        match run_sample(sample, config) {
            Ok(consensus) => {
                info!(
                    "Sample {} complete, consensus at {}",
                    sample.prefix,
                    consensus.display()
                );
                summary.completed.push(sample.prefix.clone());
            }
            Err(e) => {
                error!("Sample {} failed: {e}", sample.prefix);
                summary.failed.push((sample.prefix.clone(), e));
            }
        }
    }

    summary
}

/// Run the full pipeline for one sample and return the consensus path.
///
/// Intermediate files live in a per-run temporary directory with a fresh
/// unique name, so concurrent runs never collide on the filesystem.
///
/// # Errors
///
/// Any stage failure aborts this sample's run: a collaborator tool exiting
/// non-zero, unparseable tool output, an ambiguous assembly, a masking
/// precondition violation, or a report persistence failure.
pub fn run_sample(sample: &Sample, config: &PipelineConfig) -> Result<PathBuf, PipelineError> {
    let work = TempDir::new()?;
    let prefix = &sample.prefix;
    let r1 = sample.r1.display();
    let r2 = sample.r2.display();
    let threads = config.threads;

    let mut report = Report::open(config.outdir.join(format!("{prefix}.report.json")))?;
    report.set("Sample", prefix)?;
    report.set("Analysis date", Utc::now().to_rfc3339())?;

    // Read statistics
    let stats_path = work.path().join("stats.tsv");
    run_shell(&format!(
        "seqkit stats -T {r1} {r2} > {}",
        stats_path.display()
    ))?;
    let stats = seqstats::parse_stats_file(&stats_path)?;
    report.set_many(stats.report_entries())?;

    // Taxonomic classification
    if let Some(db) = &config.kraken_db {
        let kreport = work.path().join("kraken.report.txt");
        run_shell(&format!(
            "kraken2 --db {} --threads {threads} --report {} --output /dev/null --paired {r1} {r2}",
            db.display(),
            kreport.display()
        ))?;
        let summary = kraken::extract_file(&kreport, &config.taxa)?;
        report.set_many(summary.report_entries())?;
    } else {
        warn!("Classification skipped for {prefix}");
    }

    // De novo assembly; megahit insists on creating its own output directory
    let asm_dir = work.path().join("megahit");
    run_shell(&format!(
        "megahit -1 {r1} -2 {r2} -t {threads} -o {}",
        asm_dir.display()
    ))?;
    let contigs = fasta::read_records(&asm_dir.join("final.contigs.fa"))?;
    report.set("Number of contigs", contigs.len())?;

    // Contig selection
    let assembly = work.path().join("assembly.fasta");
    match filter_and_write(&contigs, &assembly, prefix, config.size_cutoff)? {
        SelectionOutcome::Selected { .. } => {}
        SelectionOutcome::Ambiguous { count } => {
            report.set(
                "Assembly",
                format!(
                    "ambiguous: {count} contigs longer than {} bp",
                    config.size_cutoff
                ),
            )?;
            return Err(PipelineError::AmbiguousAssembly { count });
        }
    }

    // Polishing
    let polished = polish_assembly(&assembly, sample, threads, work.path())?;

    // Realignment and per-base depth against the polished consensus
    let bam = work.path().join("consensus.bam");
    run_shell(&format!("bwa index {}", polished.display()))?;
    run_shell(&format!(
        "bwa mem -t {threads} {} {r1} {r2} | samtools sort -@ {threads} -o {}",
        polished.display(),
        bam.display()
    ))?;
    run_shell(&format!("samtools index {}", bam.display()))?;

    let depth_path = config.outdir.join(format!("{prefix}.consensus.depth.txt"));
    run_shell(&format!(
        "bedtools genomecov -ibam {} -d > {}",
        bam.display(),
        depth_path.display()
    ))?;

    // Depth masking; the output record is renamed under the sample prefix
    let source = fasta::read_single_record(&polished)?;
    let depth_records = depth::parse_depth_file(&depth_path)?;
    let masked = mask::depth_mask_consensus(&source, &depth_records, config.depth_cutoff, prefix)?;

    let consensus_path = config.outdir.join(format!("{prefix}.consensus.fasta"));
    fasta::write_records(&consensus_path, std::slice::from_ref(&masked))?;
    report.set("Consensus length", masked.len())?;
    report.set("Consensus percent masked", masked.masked_percent())?;

    // Variant counting; the rendered frequency plot is a downstream concern
    let variant_path = config.outdir.join(format!("{prefix}.lofreq.tsv"));
    run_shell(&format!(
        "lofreq call -f {} {} | bcftools query -f '%POS\\t%REF\\t%ALT\\t%INFO/AF\\t%INFO/DP\\t%QUAL\\n' > {}",
        polished.display(),
        bam.display(),
        variant_path.display()
    ))?;
    let variant_records = variants::parse_variant_file(&variant_path)?;
    report.set("Number of variants", variant_records.len())?;

    Ok(consensus_path)
}

/// Correct the selected contig with pilon: align the reads back to it, then
/// let pilon rewrite the sequence from the alignment evidence.
///
/// All intermediates (index files, sorted BAM) stay inside the per-run
/// working directory. Pilon suffixes record names with `_pilon`; the rename
/// under the sample prefix at masking time supersedes that.
fn polish_assembly(
    assembly: &Path,
    sample: &Sample,
    threads: usize,
    work: &Path,
) -> Result<PathBuf, PipelineError> {
    let prefix = &sample.prefix;
    let bam = work.join("polish.bam");

    run_shell(&format!("bwa index {}", assembly.display()))?;
    run_shell(&format!(
        "bwa mem -t {threads} -R '@RG\\tID:{prefix}\\tSM:{prefix}\\tPL:Illumina' {} {} {} | samtools sort -@ {threads} -o {}",
        assembly.display(),
        sample.r1.display(),
        sample.r2.display(),
        bam.display()
    ))?;
    run_shell(&format!("samtools index {}", bam.display()))?;

    let out_prefix = work.join("polished");
    run_shell(&format!(
        "pilon -Xmx10g --genome {} --frags {} --output {}",
        assembly.display(),
        bam.display(),
        out_prefix.display()
    ))?;

    Ok(work.join("polished.fasta"))
}
