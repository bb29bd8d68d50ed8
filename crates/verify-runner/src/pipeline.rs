//! Multi-suite orchestration.
//!
//! Suites run concurrently up to the configured parallelism; cases
//! within a suite stay sequential so per-scaffold results keep their
//! generation order. Each finished suite is gated and its artifact
//! persisted before the pipeline reports.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::info;

use verify_core::domain::{ScaffoldResults, TestSuite};
use verify_core::reporting::{write_results_json, ScaffoldResultsArtifact};

use crate::gate::{evaluate_gate, GateVerdict, SuiteStatus};
use crate::runner::VerificationRunner;

/// Outcome of a full pipeline run.
#[derive(Debug)]
pub struct PipelineReport {
    pub verdicts: Vec<GateVerdict>,
    pub results: Vec<ScaffoldResults>,
    pub duration_ms: u64,
}

impl PipelineReport {
    pub fn certified_count(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| v.status == SuiteStatus::Certified)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| v.status == SuiteStatus::Failed)
            .count()
    }
}

/// Run every suite, gate it, and persist one artifact per scaffold.
///
/// `results_dir` of `None` skips persistence (used by dry runs).
pub async fn run_pipeline(
    runner: Arc<VerificationRunner>,
    suites: Vec<TestSuite>,
    scaffolds_dir: &Path,
    results_dir: Option<&Path>,
) -> anyhow::Result<PipelineReport> {
    let start = Instant::now();
    let parallelism = runner.settings().parallel_llm_calls.max(1);

    info!(
        suites = suites.len(),
        parallelism,
        model = runner.model(),
        "starting verification pipeline"
    );

    let scaffolds_dir = scaffolds_dir.to_path_buf();
    let all_results: Vec<ScaffoldResults> = stream::iter(suites)
        .map(|suite| {
            let runner = Arc::clone(&runner);
            let dir = scaffolds_dir.clone();
            async move { runner.run_suite(&suite, &dir).await }
        })
        .buffered(parallelism)
        .collect()
        .await;

    let mut verdicts = Vec::with_capacity(all_results.len());
    for results in &all_results {
        let verdict = evaluate_gate(results);
        info!(
            scaffold = %verdict.scaffold,
            status = %verdict.status,
            pass_rate = verdict.pass_rate,
            "suite gated"
        );

        if let Some(dir) = results_dir {
            let artifact = ScaffoldResultsArtifact::from_results(results);
            let path = artifact_path(dir, &results.scaffold, &results.model);
            write_results_json(&path, &artifact)?;
        }
        verdicts.push(verdict);
    }

    Ok(PipelineReport {
        verdicts,
        results: all_results,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn artifact_path(results_dir: &Path, scaffold: &str, model: &str) -> PathBuf {
    results_dir.join(format!("{scaffold}_{model}.json"))
}
