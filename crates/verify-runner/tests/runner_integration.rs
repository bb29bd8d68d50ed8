//! End-to-end runner tests against a scripted provider.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use verify_core::config::{Mode, Settings};
use verify_core::domain::{TestCase, TestSuite, Tier};
use verify_core::generator::SUITE_VERSION;
use verify_core::llm::{LlmError, LlmProvider, LlmRequest, LlmResponse, ScaffoldParser};
use verify_runner::{evaluate_gate, SuiteStatus, VerificationRunner};

const SCAFFOLD_MD: &str = "# Dijkstra Scaffold\n\n## When to Use\nShortest paths.\n\n## Scaffold Instructions\n```\nRelax edges from the frontier until all vertices settle.\n```\n\n## Worked Example\nNone.\n";

/// Provider that replays a scripted sequence of outcomes.
struct MockProvider {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: AtomicUsize,
}

impl MockProvider {
    fn new(script: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    fn replying(content: &str) -> Self {
        Self::new(vec![Ok(content.to_string())])
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn generate(
        &self,
        _request: &LlmRequest,
        model: &str,
    ) -> Result<LlmResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or_else(|| Ok("no script entry".to_string()));
        next.map(|content| LlmResponse {
            content,
            model: model.to_string(),
            input_tokens: 100,
            output_tokens: 50,
            latency_ms: 1.0,
            timestamp: Utc::now(),
        })
    }
}

fn fast_settings() -> Settings {
    Settings {
        enable_cache: false,
        retry_delay: Duration::from_millis(1),
        ..Settings::default()
    }
}

fn runner_with(provider: MockProvider) -> VerificationRunner {
    VerificationRunner::new(Arc::new(provider), fast_settings(), Mode::Dev)
}

fn dijkstra_case() -> TestCase {
    TestCase {
        id: "dijkstra_simple_01".to_string(),
        scaffold: "dijkstra".to_string(),
        tier: Tier::Simple,
        input: json!({
            "vertices": ["A", "B", "C", "D"],
            "edges": [["A", "B", 5], ["A", "C", 2], ["C", "D", 3], ["B", "D", 1]],
            "source": "A",
        }),
        expected: json!({ "distances": { "A": 0, "B": 5, "C": 2, "D": 5 } }),
        description: "four-vertex shortest paths".to_string(),
    }
}

fn scaffold() -> verify_core::llm::ParsedScaffold {
    ScaffoldParser
        .parse_content(Path::new("01_graph/03_dijkstra.md"), SCAFFOLD_MD)
        .expect("parse scaffold")
}

#[tokio::test]
async fn correct_marker_answer_passes() {
    let provider = MockProvider::replying(
        "Relaxing edges step by step.\nFINAL_DISTANCES: {\"A\": 0, \"B\": 5, \"C\": 2, \"D\": 5}",
    );
    let runner = runner_with(provider);

    let result = runner.run_case(&scaffold(), &dijkstra_case()).await;
    assert!(result.passed());
    let validation = result.validation.expect("validated");
    assert_eq!(validation.score, 1.0);
    let parsed = result.parsed.expect("parsed");
    assert_eq!(parsed.confidence, 1.0);
}

#[tokio::test]
async fn one_wrong_distance_scores_partial() {
    let provider = MockProvider::replying(
        "FINAL_DISTANCES: {\"A\": 0, \"B\": 5, \"C\": 3, \"D\": 5}",
    );
    let runner = runner_with(provider);

    let result = runner.run_case(&scaffold(), &dijkstra_case()).await;
    assert!(!result.passed());
    let validation = result.validation.expect("validated");
    assert!(!validation.is_valid);
    assert!((validation.score - 0.75).abs() < 1e-9);
}

#[tokio::test]
async fn markerless_response_fails_validation_not_run() {
    let provider = MockProvider::replying("I am not sure how to proceed with this problem.");
    let runner = runner_with(provider);

    let result = runner.run_case(&scaffold(), &dijkstra_case()).await;
    assert!(result.error.is_none());
    assert!(!result.passed());
    let validation = result.validation.expect("validated");
    assert!(validation.message.contains("answer extraction failed"));
}

#[tokio::test]
async fn alternate_subset_with_correct_sum_passes() {
    let case = TestCase {
        id: "subset_sum_simple_01".to_string(),
        scaffold: "subset_sum".to_string(),
        tier: Tier::Simple,
        input: json!({ "numbers": [3, 34, 4, 12, 5, 2], "target": 9 }),
        expected: json!({ "subset": [3, 4, 2], "found": true }),
        description: "target 9".to_string(),
    };
    let provider = MockProvider::replying("FINAL_SUBSET: [4, 5]");
    let runner = runner_with(provider);

    let result = runner.run_case(&scaffold(), &case).await;
    assert!(result.passed(), "{:?}", result.validation);
}

#[tokio::test]
async fn retryable_failures_consume_extra_attempts() {
    let provider = Arc::new(MockProvider::new(vec![
        Err(LlmError::RateLimit("429".to_string())),
        Err(LlmError::Service {
            status: 500,
            message: "overloaded".to_string(),
        }),
        Ok("FINAL_ANSWER: 42".to_string()),
    ]));
    let request = LlmRequest {
        prompt: "p".to_string(),
        system_prompt: String::new(),
        temperature: 0.0,
        max_tokens: 16,
    };

    let response = provider
        .generate_with_retry(&request, "mock-model", 3, Duration::from_millis(1))
        .await
        .expect("third attempt succeeds");
    assert_eq!(response.content, "FINAL_ANSWER: 42");
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn auth_failure_aborts_without_retry() {
    let provider = Arc::new(MockProvider::new(vec![
        Err(LlmError::Authentication("bad key".to_string())),
        Ok("never reached".to_string()),
    ]));
    let request = LlmRequest {
        prompt: "p".to_string(),
        system_prompt: String::new(),
        temperature: 0.0,
        max_tokens: 16,
    };

    let err = provider
        .generate_with_retry(&request, "mock-model", 3, Duration::from_millis(1))
        .await
        .expect_err("auth errors do not retry");
    assert!(matches!(err, LlmError::Authentication(_)));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn missing_scaffold_errors_every_case_without_calls() {
    let provider = Arc::new(MockProvider::replying("unused"));
    let runner = VerificationRunner::new(provider.clone(), fast_settings(), Mode::Dev);
    let suite = TestSuite {
        scaffold: "dijkstra".to_string(),
        version: SUITE_VERSION.to_string(),
        seed: 1,
        generated_at: Utc::now(),
        test_cases: vec![dijkstra_case()],
    };

    let empty_dir = tempfile::tempdir().expect("tempdir");
    let results = runner.run_suite(&suite, empty_dir.path()).await;

    assert_eq!(results.total_tests(), 1);
    assert_eq!(results.passed_tests(), 0);
    assert!(results.test_results[0].error.is_some());
    assert_eq!(provider.calls(), 0);

    let verdict = evaluate_gate(&results);
    assert_eq!(verdict.status, SuiteStatus::Failed);
}

#[tokio::test]
async fn suite_runs_against_scaffold_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let category = dir.path().join("01_graph");
    std::fs::create_dir_all(&category).expect("mkdir");
    std::fs::write(category.join("03_dijkstra.md"), SCAFFOLD_MD).expect("write scaffold");

    let provider = MockProvider::new(vec![Ok(
        "FINAL_DISTANCES: {\"A\": 0, \"B\": 5, \"C\": 2, \"D\": 5}".to_string(),
    )]);
    let runner = runner_with(provider);
    let suite = TestSuite {
        scaffold: "dijkstra".to_string(),
        version: SUITE_VERSION.to_string(),
        seed: 1,
        generated_at: Utc::now(),
        test_cases: vec![dijkstra_case()],
    };

    let results = runner.run_suite(&suite, dir.path()).await;
    assert_eq!(results.passed_tests(), 1);
    assert!(results.completed_at.is_some());

    let verdict = evaluate_gate(&results);
    assert_eq!(verdict.status, SuiteStatus::Certified);
}
