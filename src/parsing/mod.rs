//! Parsers for the file formats exchanged with collaborator tools.
//!
//! The pipeline drives external aligners, assemblers, and classifiers; the
//! boundary between them and this crate is a set of well-defined file
//! formats, all parsed here:
//!
//! - **FASTA**: reference, assembly, and consensus sequences (gzip-aware)
//! - **Depth tables**: per-base coverage from `bedtools genomecov -d`
//! - **Classification reports**: kraken-style tab-separated reports
//! - **Read statistics**: `seqkit stats -T` summary tables
//! - **Variant tables**: position/ref/alt/frequency/depth/quality rows
//!
//! All tabular parsers report 1-based line numbers in their errors.

pub mod depth;
pub mod fasta;
pub mod kraken;
pub mod seqstats;
pub mod variants;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Expected exactly one sequence record, found {found}")]
    SingleRecordRequired { found: usize },
}
