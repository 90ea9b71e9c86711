use std::path::PathBuf;

use clap::Args;

use crate::consensus::mask::depth_mask_consensus;
use crate::parsing::{depth, fasta};

#[derive(Args)]
pub struct MaskArgs {
    /// Consensus FASTA (must hold exactly one record)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Per-base coverage table (chromosome, position, depth)
    #[arg(required = true)]
    pub depth: PathBuf,

    /// Mask positions with depth strictly below this
    #[arg(short, long, default_value = "50")]
    pub cutoff: u32,

    /// Record name for the masked output (default: the input record's name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output FASTA path
    #[arg(short, long, required = true)]
    pub output: PathBuf,
}

/// Execute the mask subcommand.
///
/// # Errors
///
/// Returns an error if the input holds anything other than one record, the
/// depth table spans several chromosomes or does not parse, or a position
/// falls outside the sequence.
pub fn run(args: &MaskArgs) -> anyhow::Result<()> {
    let source = fasta::read_single_record(&args.input)?;
    let records = depth::parse_depth_file(&args.depth)?;
    let name = args.name.clone().unwrap_or_else(|| source.name.clone());

    let masked = depth_mask_consensus(&source, &records, args.cutoff, &name)?;
    fasta::write_records(&args.output, std::slice::from_ref(&masked))?;

    let changed = masked
        .sequence
        .iter()
        .zip(&source.sequence)
        .filter(|(m, s)| m != s)
        .count();
    println!(
        "Masked {changed} of {} position(s) ({}% masked overall), wrote {}",
        masked.len(),
        masked.masked_percent(),
        args.output.display()
    );

    Ok(())
}
