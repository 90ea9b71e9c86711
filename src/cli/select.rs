use std::path::PathBuf;

use clap::Args;

use crate::consensus::select::{filter_and_write, SelectionOutcome};
use crate::parsing::fasta;

#[derive(Args)]
pub struct SelectArgs {
    /// Assembly FASTA with zero or more contigs
    #[arg(required = true)]
    pub input: PathBuf,

    /// Canonical record name for the selected contig
    #[arg(short, long, required = true)]
    pub name: String,

    /// Contigs must be strictly longer than this to qualify
    #[arg(short, long, default_value = "9000")]
    pub size_cutoff: usize,

    /// Output FASTA path
    #[arg(short, long, required = true)]
    pub output: PathBuf,
}

/// Execute the select subcommand.
///
/// # Errors
///
/// Returns an error if the assembly cannot be read or written, or exits
/// non-zero with the qualifying-contig count when selection is ambiguous.
pub fn run(args: &SelectArgs) -> anyhow::Result<()> {
    let contigs = fasta::read_records(&args.input)?;

    match filter_and_write(&contigs, &args.output, &args.name, args.size_cutoff)? {
        SelectionOutcome::Selected { path } => {
            println!("Selected 1 of {} contig(s), wrote {}", contigs.len(), path.display());
            Ok(())
        }
        SelectionOutcome::Ambiguous { count } => {
            anyhow::bail!(
                "Ambiguous assembly: {count} of {} contig(s) are longer than {} bp, expected exactly 1",
                contigs.len(),
                args.size_cutoff
            )
        }
    }
}
