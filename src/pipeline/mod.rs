//! External tool orchestration and the per-sample pipeline.
//!
//! The core of this crate is synchronous and single-threaded: every
//! collaborator invocation blocks until completion. Parallelism, where
//! wanted, belongs at whole-sample granularity - runs share no mutable
//! state, each owning its report file and a uniquely named temporary
//! working directory.

pub mod exec;
pub mod run;

pub use exec::{run_shell, run_shell_capture, CommandError};
pub use run::{run_batch, run_sample, BatchSummary, PipelineConfig, PipelineError};
