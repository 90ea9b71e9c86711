use std::path::PathBuf;

use clap::Args;

use crate::discovery::{discover, PairingConvention};
use crate::pipeline::run::{default_threads, run_batch, PipelineConfig};

#[derive(Args)]
pub struct RunArgs {
    /// Directory holding the paired FASTQ files (searched non-recursively)
    #[arg(required = true)]
    pub dir: PathBuf,

    /// Directory receiving per-sample outputs
    #[arg(short, long, default_value = "denv-qc-results")]
    pub outdir: PathBuf,

    /// Threads handed to external tools (default: a quarter of available CPUs)
    #[arg(short, long, default_value_t = default_threads())]
    pub threads: usize,

    /// Kraken database for read classification
    #[arg(long)]
    pub kraken_db: Option<PathBuf>,

    /// Skip the taxonomic classification stage
    #[arg(long)]
    pub no_kraken: bool,

    /// Mask consensus positions with depth strictly below this
    #[arg(long, default_value = "50")]
    pub depth_cutoff: u32,

    /// Contigs must be strictly longer than this to become the consensus
    #[arg(long, default_value = "9000")]
    pub size_cutoff: usize,

    /// Literal R1 filename suffix, overriding the Illumina sample-sheet
    /// convention (must be given together with --r2-suffix)
    #[arg(long, requires = "r2_suffix")]
    pub r1_suffix: Option<String>,

    /// Literal R2 filename suffix, overriding the Illumina sample-sheet
    /// convention (must be given together with --r1-suffix)
    #[arg(long, requires = "r1_suffix")]
    pub r2_suffix: Option<String>,
}

/// Execute the run subcommand.
///
/// # Errors
///
/// Returns an error on a pairing failure, an unusable output directory, or
/// if any sample's pipeline run failed (after all samples were attempted).
pub fn run(args: &RunArgs) -> anyhow::Result<()> {
    let convention = match (&args.r1_suffix, &args.r2_suffix) {
        (Some(r1), Some(r2)) => PairingConvention::literal(r1, r2),
        _ => PairingConvention::default(),
    };

    let samples = discover(&args.dir, &convention)?;
    if samples.is_empty() {
        anyhow::bail!("No paired samples found in {}", args.dir.display());
    }
    println!("Found {} paired sample(s)", samples.len());

    std::fs::create_dir_all(&args.outdir)?;

    let mut config = PipelineConfig::new(&args.outdir);
    config.threads = args.threads.max(1);
    config.depth_cutoff = args.depth_cutoff;
    config.size_cutoff = args.size_cutoff;
    if !args.no_kraken {
        config.kraken_db = args.kraken_db.clone();
    }

    let summary = run_batch(&samples, &config);

    println!(
        "Completed {}/{} sample(s)",
        summary.completed.len(),
        samples.len()
    );
    for (prefix, err) in &summary.failed {
        eprintln!("  {prefix}: {err}");
    }

    if summary.all_succeeded() {
        Ok(())
    } else {
        anyhow::bail!("{} sample run(s) failed", summary.failed.len())
    }
}
