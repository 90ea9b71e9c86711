use std::path::PathBuf;

use clap::Args;

use crate::discovery::{discover, PairingConvention};

#[derive(Args)]
pub struct SamplesArgs {
    /// Directory holding the paired FASTQ files (searched non-recursively)
    #[arg(required = true)]
    pub dir: PathBuf,

    /// Print the roster as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Literal R1 filename suffix, overriding the Illumina sample-sheet
    /// convention (must be given together with --r2-suffix)
    #[arg(long, requires = "r2_suffix")]
    pub r1_suffix: Option<String>,

    /// Literal R2 filename suffix, overriding the Illumina sample-sheet
    /// convention (must be given together with --r1-suffix)
    #[arg(long, requires = "r1_suffix")]
    pub r2_suffix: Option<String>,
}

/// Execute the samples subcommand.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or pairing validation
/// fails for any prefix.
pub fn run(args: &SamplesArgs) -> anyhow::Result<()> {
    let convention = match (&args.r1_suffix, &args.r2_suffix) {
        (Some(r1), Some(r2)) => PairingConvention::literal(r1, r2),
        _ => PairingConvention::default(),
    };

    let samples = discover(&args.dir, &convention)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
    } else {
        println!("{} paired sample(s)", samples.len());
        for sample in &samples {
            println!("  {sample}");
        }
    }

    Ok(())
}
