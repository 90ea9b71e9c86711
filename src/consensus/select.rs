//! Selection of the single assembly contig above a size cutoff.
//!
//! A clean dengue assembly yields exactly one near-genome-length contig.
//! Zero or several qualifying contigs mean the assembly cannot be used as a
//! consensus, and that has to be a checkable outcome the caller decides on,
//! not something inferred from the absence of an output file.

use std::path::{Path, PathBuf};

use crate::core::sequence::SeqRecord;
use crate::parsing::fasta;

/// Outcome of contig selection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an ambiguous assembly must be handled, not assumed selected"]
pub enum SelectionOutcome {
    /// Exactly one contig qualified and was written under the canonical name.
    Selected { path: PathBuf },

    /// Zero or multiple contigs qualified; nothing was written.
    Ambiguous { count: usize },
}

impl SelectionOutcome {
    #[must_use]
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }
}

/// Contigs whose length is strictly greater than `cutoff`, in input order.
///
/// Pure filter, no side effects.
#[must_use]
pub fn select_by_size(contigs: &[SeqRecord], cutoff: usize) -> Vec<&SeqRecord> {
    contigs.iter().filter(|c| c.len() > cutoff).collect()
}

/// Write the single qualifying contig to `output` under `canonical_name`.
///
/// The contig is renamed regardless of its assembler-given name, so the
/// downstream consensus carries the sample identity. When the count of
/// qualifying contigs is not exactly one, nothing is written and the count
/// is returned in [`SelectionOutcome::Ambiguous`].
///
/// # Errors
///
/// Returns an IO error if the qualifying contig cannot be written.
pub fn filter_and_write(
    contigs: &[SeqRecord],
    output: &Path,
    canonical_name: &str,
    cutoff: usize,
) -> std::io::Result<SelectionOutcome> {
    let qualifying = select_by_size(contigs, cutoff);

    match qualifying.as_slice() {
        [contig] => {
            let renamed = SeqRecord::new(canonical_name, contig.sequence.clone());
            fasta::write_records(output, std::slice::from_ref(&renamed))?;
            Ok(SelectionOutcome::Selected {
                path: output.to_path_buf(),
            })
        }
        other => Ok(SelectionOutcome::Ambiguous { count: other.len() }),
    }
}
