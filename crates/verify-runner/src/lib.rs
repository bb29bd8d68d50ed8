//! Suite execution and gating for scaffold verification.
//!
//! [`VerificationRunner`] drives single suites; [`run_pipeline`] fans
//! several suites out across the configured parallelism and persists
//! per-scaffold result artifacts.

pub mod gate;
pub mod pipeline;
pub mod runner;

pub use gate::{evaluate_gate, GateVerdict, SuiteStatus, CERTIFIED_THRESHOLD, PARTIAL_THRESHOLD};
pub use pipeline::{run_pipeline, PipelineReport};
pub use runner::{find_scaffold_file, CaseStage, VerificationRunner};
