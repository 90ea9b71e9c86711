//! Depth-based masking of a consensus sequence.
//!
//! Positions covered by fewer reads than the cutoff cannot be trusted and
//! are overwritten with `N`. The depth filter is strict: a position at
//! exactly the cutoff is kept.
//!
//! The coverage stream is assumed to describe a single chromosome, matching
//! the single-record consensus it will be applied to. Both assumptions are
//! enforced by counting, not by silently operating on the first entry.

use thiserror::Error;

use crate::core::sequence::{SeqRecord, MASK_SYMBOL};
use crate::core::types::{DepthRecord, GenomicPosition};

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Depth records span {} chromosomes ({}), expected exactly 1", .names.len(), .names.join(", "))]
    MultipleChromosomes { names: Vec<String> },

    #[error("Position {pos} is out of range for sequence '{name}' of length {len}")]
    PositionOutOfRange { name: String, pos: u64, len: usize },
}

/// Collect every position whose depth is strictly below `cutoff`, in input
/// order.
///
/// # Errors
///
/// Returns `MaskError::MultipleChromosomes` if the records mention more than
/// one chromosome; no partial result is produced in that case.
pub fn low_coverage_positions(
    records: &[DepthRecord],
    cutoff: u32,
) -> Result<Vec<GenomicPosition>, MaskError> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        if !names.iter().any(|n| n == &record.chrom) {
            names.push(record.chrom.clone());
        }
    }
    if names.len() > 1 {
        return Err(MaskError::MultipleChromosomes { names });
    }

    Ok(records
        .iter()
        .filter(|r| r.depth < cutoff)
        .map(DepthRecord::position)
        .collect())
}

/// Produce a copy of `source` with the listed 1-based positions replaced by
/// `N`, renamed to `output_name`.
///
/// The output length always equals the source length, and masking the same
/// position set again is a no-op. Renaming decouples the output identity
/// from the input identity, e.g. a polisher-corrected sequence republished
/// under the sample prefix.
///
/// # Errors
///
/// Returns `MaskError::PositionOutOfRange` for any position of 0 or beyond
/// the sequence end; nothing is written in that case.
pub fn mask_sequence(
    source: &SeqRecord,
    positions: &[GenomicPosition],
    output_name: &str,
) -> Result<SeqRecord, MaskError> {
    let mut sequence = source.sequence.clone();

    for position in positions {
        if position.pos < 1 || position.pos as usize > sequence.len() {
            return Err(MaskError::PositionOutOfRange {
                name: source.name.clone(),
                pos: position.pos,
                len: sequence.len(),
            });
        }
        // 1-based, checked above
        sequence[position.pos as usize - 1] = MASK_SYMBOL;
    }

    Ok(SeqRecord::new(output_name, sequence))
}

/// Mask `source` at every position whose depth falls below `cutoff`.
///
/// Convenience composition of [`low_coverage_positions`] and
/// [`mask_sequence`]; no additional semantics.
///
/// # Errors
///
/// Propagates the errors of both steps.
pub fn depth_mask_consensus(
    source: &SeqRecord,
    records: &[DepthRecord],
    cutoff: u32,
    output_name: &str,
) -> Result<SeqRecord, MaskError> {
    let positions = low_coverage_positions(records, cutoff)?;
    mask_sequence(source, &positions, output_name)
}
