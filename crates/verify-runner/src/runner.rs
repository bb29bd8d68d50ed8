//! Per-case and per-suite execution.
//!
//! A case moves through a fixed stage sequence: prompt assembly,
//! generation, extraction, validation, recording. Any stage may divert
//! to the absorbing error stage; downstream stages are then skipped
//! and the case is recorded as errored.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use verify_core::config::{Mode, Settings};
use verify_core::domain::{ScaffoldResults, TestCase, TestResult, TestSuite, ValidationResult};
use verify_core::llm::{LlmProvider, LlmRequest, ParsedScaffold, PromptBuilder, ResponseCache, ScaffoldParser};
use verify_core::oracle::TestFunction;
use verify_core::registry::{binding, AlgorithmId};
use verify_core::validators::{for_spec, Residual, ValidateOptions};

/// Stage a case has reached. Transitions only move forward; the error
/// stage absorbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStage {
    Pending,
    Prompted,
    Generated,
    Parsed,
    Validated,
    Recorded,
    Errored,
}

impl CaseStage {
    pub fn advance(self, next: CaseStage) -> CaseStage {
        if self == CaseStage::Errored {
            CaseStage::Errored
        } else {
            next
        }
    }
}

/// Executes suites against one provider/model pair.
pub struct VerificationRunner {
    provider: Arc<dyn LlmProvider>,
    settings: Settings,
    mode: Mode,
    cache: Option<ResponseCache>,
    prompt_builder: PromptBuilder,
}

impl VerificationRunner {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: Settings, mode: Mode) -> Self {
        let cache = settings
            .enable_cache
            .then(|| ResponseCache::new(settings.cache_dir.clone()));
        Self {
            provider,
            settings,
            mode,
            cache,
            prompt_builder: PromptBuilder::default(),
        }
    }

    pub fn model(&self) -> &str {
        self.settings.active_model(self.mode)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run one case end to end. Generation failures become errored
    /// results; extraction failures become failed validations.
    pub async fn run_case(&self, scaffold: &ParsedScaffold, test_case: &TestCase) -> TestResult {
        let start = Instant::now();
        let mut stage = CaseStage::Pending;

        let algorithm: AlgorithmId = match test_case.scaffold.parse() {
            Ok(id) => id,
            Err(e) => {
                return TestResult::errored(
                    test_case.clone(),
                    e.to_string(),
                    elapsed_ms(start),
                );
            }
        };
        let bound = binding(algorithm);

        let request = LlmRequest {
            prompt: self
                .prompt_builder
                .build_prompt(scaffold, test_case, bound.format),
            system_prompt: self.prompt_builder.build_system_prompt(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };
        stage = stage.advance(CaseStage::Prompted);

        let model = self.model();
        let cached = self
            .cache
            .as_ref()
            .and_then(|c| c.get(&test_case.scaffold, &test_case.id, model));

        let response = match cached {
            Some(response) => response,
            None => {
                let generated = self
                    .provider
                    .generate_with_retry(
                        &request,
                        model,
                        self.settings.max_retries,
                        self.settings.retry_delay,
                    )
                    .await;
                match generated {
                    Ok(response) => {
                        if let Some(cache) = &self.cache {
                            if let Err(e) =
                                cache.put(&test_case.scaffold, &test_case.id, model, &response)
                            {
                                warn!(case = %test_case.id, error = %e, "cache write failed");
                            }
                        }
                        response
                    }
                    Err(e) => {
                        return TestResult::errored(
                            test_case.clone(),
                            e.to_string(),
                            elapsed_ms(start),
                        );
                    }
                }
            }
        };
        stage = stage.advance(CaseStage::Generated);

        let parsed = verify_core::parser::parse(&response.content, algorithm);
        stage = stage.advance(CaseStage::Parsed);

        let validation = match &parsed.answer {
            Some(answer) => {
                let validator = for_spec(&bound.validator);
                let opts = validate_options(algorithm, &test_case.input);
                validator.validate(&test_case.expected, answer, &opts)
            }
            None => {
                let reason = parsed
                    .parse_error
                    .clone()
                    .unwrap_or_else(|| "no answer extracted".to_string());
                ValidationResult::invalid(
                    format!("answer extraction failed: {reason}"),
                    test_case.expected.clone(),
                    Value::Null,
                )
            }
        };
        stage = stage.advance(CaseStage::Validated);

        debug!(
            case = %test_case.id,
            valid = validation.is_valid,
            score = validation.score,
            confidence = parsed.confidence,
            ?stage,
            "case finished"
        );

        TestResult {
            test_case: test_case.clone(),
            response: Some(response),
            parsed: Some(parsed),
            validation: Some(validation),
            error: None,
            duration_ms: elapsed_ms(start),
        }
    }

    /// Run every case of one suite in order against its scaffold file.
    pub async fn run_suite(&self, suite: &TestSuite, scaffolds_dir: &Path) -> ScaffoldResults {
        let mut results = ScaffoldResults::new(suite.scaffold.clone(), self.model());

        let scaffold = match find_scaffold_file(scaffolds_dir, &suite.scaffold)
            .ok_or_else(|| format!("no scaffold file for '{}'", suite.scaffold))
            .and_then(|path| {
                ScaffoldParser
                    .parse_file(&path)
                    .map_err(|e| e.to_string())
            }) {
            Ok(scaffold) => scaffold,
            Err(error) => {
                // Without a scaffold every case is unrunnable; record
                // them all as errored rather than aborting the run.
                warn!(scaffold = %suite.scaffold, %error, "scaffold unavailable");
                for case in &suite.test_cases {
                    results
                        .test_results
                        .push(TestResult::errored(case.clone(), error.clone(), 0.0));
                }
                results.completed_at = Some(Utc::now());
                return results;
            }
        };

        info!(
            scaffold = %suite.scaffold,
            cases = suite.len(),
            model = self.model(),
            "running suite"
        );

        for case in &suite.test_cases {
            let result = self.run_case(&scaffold, case).await;
            results.test_results.push(result);
        }
        results.completed_at = Some(Utc::now());

        info!(
            scaffold = %suite.scaffold,
            passed = results.passed_tests(),
            total = results.total_tests(),
            "suite finished"
        );
        results
    }
}

/// Context some validators need beyond the expected/actual pair.
fn validate_options(algorithm: AlgorithmId, input: &Value) -> ValidateOptions {
    use AlgorithmId as A;
    match algorithm {
        A::Bfs | A::Dfs | A::Astar | A::SubsetSum => ValidateOptions::with_input(input.clone()),
        A::NewtonRaphson | A::Bisection => {
            let residual: Option<Residual> = input
                .get("function")
                .and_then(Value::as_str)
                .and_then(TestFunction::parse)
                .map(|f| Arc::new(move |x: f64| f.eval(x)) as Residual);
            ValidateOptions {
                input: None,
                residual,
            }
        }
        _ => ValidateOptions::default(),
    }
}

/// Locate the markdown file for a scaffold name, tolerating numeric
/// file prefixes like `05_dijkstra.md`.
pub fn find_scaffold_file(scaffolds_dir: &Path, name: &str) -> Option<PathBuf> {
    let files = ScaffoldParser.list_scaffolds(scaffolds_dir).ok()?;
    files.into_iter().find(|path| {
        let stem = path.file_stem().map(|s| s.to_string_lossy().to_string());
        match stem {
            Some(stem) => {
                let trimmed = stem
                    .trim_start_matches(|c: char| c.is_ascii_digit())
                    .trim_start_matches('_');
                trimmed == name || stem == name
            }
            None => false,
        }
    })
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_stage_absorbs() {
        let stage = CaseStage::Errored;
        assert_eq!(stage.advance(CaseStage::Validated), CaseStage::Errored);
        assert_eq!(
            CaseStage::Pending.advance(CaseStage::Prompted),
            CaseStage::Prompted
        );
    }

    #[test]
    fn test_find_scaffold_tolerates_numeric_prefix() {
        let dir = tempfile::tempdir().expect("tempdir");
        let category = dir.path().join("01_graph");
        std::fs::create_dir_all(&category).expect("mkdir");
        std::fs::write(category.join("03_dijkstra.md"), "# Dijkstra Scaffold").expect("write");
        std::fs::write(category.join("README.md"), "index").expect("write");

        let found = find_scaffold_file(dir.path(), "dijkstra").expect("find scaffold");
        assert!(found.ends_with("01_graph/03_dijkstra.md"));
        assert!(find_scaffold_file(dir.path(), "bfs").is_none());
    }

    #[test]
    fn test_root_options_carry_residual() {
        let opts = validate_options(
            AlgorithmId::NewtonRaphson,
            &serde_json::json!({ "function": "x^2 - 2", "x0": 1.5 }),
        );
        let residual = opts.residual.expect("residual present");
        assert!(residual(std::f64::consts::SQRT_2).abs() < 1e-9);

        let opts = validate_options(AlgorithmId::MergeSort, &serde_json::json!({}));
        assert!(opts.residual.is_none());
        assert!(opts.input.is_none());
    }
}
