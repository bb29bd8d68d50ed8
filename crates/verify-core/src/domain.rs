//! Core domain types for scaffold verification.
//!
//! A [`TestCase`] pairs an algorithm input with the oracle's expected
//! result. Running one case against a model produces a [`TestResult`];
//! the ordered collection for one scaffold/model pair is a
//! [`ScaffoldResults`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Test cases
// ---------------------------------------------------------------------------

/// Difficulty bucket of a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Simple,
    Standard,
    Edge,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Simple, Tier::Standard, Tier::Edge];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Simple => "simple",
            Tier::Standard => "standard",
            Tier::Edge => "edge",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single verification test case. Immutable once generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    /// Stable identifier, e.g. `dijkstra_simple_01`.
    pub id: String,

    /// Scaffold name this case exercises.
    pub scaffold: String,

    /// Difficulty tier.
    pub tier: Tier,

    /// Algorithm input parameters.
    pub input: Value,

    /// Ground-truth result from the reference oracle.
    pub expected: Value,

    /// Human-readable description.
    pub description: String,
}

/// All test cases for one scaffold, in execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuite {
    pub scaffold: String,
    pub version: String,
    pub seed: u64,
    pub generated_at: DateTime<Utc>,
    pub test_cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn len(&self) -> usize {
        self.test_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Parsed answers
// ---------------------------------------------------------------------------

/// Shape tag of an extracted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    Distances,
    DistanceMatrix,
    Path,
    Traversal,
    Order,
    Scalar,
    List,
    Knapsack,
    Sequence,
    Root,
    Positions,
    Matches,
    Huffman,
    Sudoku,
    Coloring,
    MatrixChain,
    Trie,
    Estimate,
    Optimization,
    Activity,
    Mst,
    Subset,
    Unknown,
}

/// Structured answer extracted from a raw completion.
///
/// Total function of the completion text: extraction failure is carried
/// in `parse_error`, never as an error value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedAnswer {
    /// Extracted answer payload, `None` on total extraction failure.
    pub answer: Option<Value>,

    /// Shape tag of the answer.
    pub kind: AnswerKind,

    /// 1.0 for explicit marker matches, 0.7 for textual heuristics,
    /// 0.5 for the generic fallback extractor.
    pub confidence: f64,

    /// Reason extraction failed, if it did.
    pub parse_error: Option<String>,

    /// Auxiliary extracted data (sub-fields, matched marker, ...).
    pub metadata: Value,
}

impl ParsedAnswer {
    pub fn extracted(kind: AnswerKind, answer: Value) -> Self {
        Self::with_confidence(kind, answer, 1.0)
    }

    pub fn with_confidence(kind: AnswerKind, answer: Value, confidence: f64) -> Self {
        Self {
            answer: Some(answer),
            kind,
            confidence,
            parse_error: None,
            metadata: Value::Object(Default::default()),
        }
    }

    pub fn failed(kind: AnswerKind, reason: impl Into<String>) -> Self {
        Self {
            answer: None,
            kind,
            confidence: 0.0,
            parse_error: Some(reason.into()),
            metadata: Value::Object(Default::default()),
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Whether extraction produced a usable answer.
    pub fn is_extracted(&self) -> bool {
        self.parse_error.is_none() && self.answer.is_some()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Graded outcome of comparing an extracted answer to ground truth.
///
/// `is_valid` is the sole pass/fail authority. `score` is diagnostic:
/// score 1.0 implies valid, but a valid result may carry a lower score
/// (e.g. an alternate equal-cost path).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub score: f64,
    pub message: String,
    pub expected: Value,
    pub actual: Value,
    #[serde(default)]
    pub details: Value,
}

impl ValidationResult {
    pub fn valid(expected: Value, actual: Value) -> Self {
        Self {
            is_valid: true,
            score: 1.0,
            message: String::new(),
            expected,
            actual,
            details: Value::Null,
        }
    }

    pub fn invalid(message: impl Into<String>, expected: Value, actual: Value) -> Self {
        Self {
            is_valid: false,
            score: 0.0,
            message: message.into(),
            expected,
            actual,
            details: Value::Null,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score.clamp(0.0, 1.0);
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of running a single test case end to end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub test_case: TestCase,

    /// Raw response from the successful generation attempt.
    pub response: Option<crate::llm::LlmResponse>,

    /// Parsed answer, when generation succeeded.
    pub parsed: Option<ParsedAnswer>,

    /// Validation outcome, when parsing was reached.
    pub validation: Option<ValidationResult>,

    /// Terminal error; mutually exclusive with a passing validation.
    pub error: Option<String>,

    /// Wall time for this case in milliseconds.
    pub duration_ms: f64,
}

impl TestResult {
    pub fn errored(test_case: TestCase, error: impl Into<String>, duration_ms: f64) -> Self {
        Self {
            test_case,
            response: None,
            parsed: None,
            validation: None,
            error: Some(error.into()),
            duration_ms,
        }
    }

    /// A case passes iff it validated true and hit no terminal error.
    pub fn passed(&self) -> bool {
        self.error.is_none()
            && self
                .validation
                .as_ref()
                .map(|v| v.is_valid)
                .unwrap_or(false)
    }
}

/// Ordered results for one scaffold/model pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldResults {
    pub scaffold: String,
    pub model: String,
    pub test_results: Vec<TestResult>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ScaffoldResults {
    pub fn new(scaffold: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            scaffold: scaffold.into(),
            model: model.into(),
            test_results: Vec::new(),
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn total_tests(&self) -> usize {
        self.test_results.len()
    }

    pub fn passed_tests(&self) -> usize {
        self.test_results.iter().filter(|r| r.passed()).count()
    }

    /// Pass rate in [0,1]; 0.0 for an empty suite.
    pub fn pass_rate(&self) -> f64 {
        if self.test_results.is_empty() {
            return 0.0;
        }
        self.passed_tests() as f64 / self.total_tests() as f64
    }

    pub fn total_tokens(&self) -> u64 {
        self.test_results
            .iter()
            .filter_map(|r| r.response.as_ref())
            .map(|resp| u64::from(resp.total_tokens()))
            .sum()
    }

    pub fn results_for_tier(&self, tier: Tier) -> Vec<&TestResult> {
        self.test_results
            .iter()
            .filter(|r| r.test_case.tier == tier)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn case(id: &str, tier: Tier) -> TestCase {
        TestCase {
            id: id.to_string(),
            scaffold: "dijkstra".to_string(),
            tier,
            input: json!({"source": "A"}),
            expected: json!({"distances": {"A": 0}}),
            description: "test".to_string(),
        }
    }

    fn passing_result(id: &str, tier: Tier) -> TestResult {
        TestResult {
            test_case: case(id, tier),
            response: None,
            parsed: None,
            validation: Some(ValidationResult::valid(json!(1), json!(1))),
            error: None,
            duration_ms: 10.0,
        }
    }

    #[test]
    fn test_tier_serde_round_trip() {
        for tier in Tier::ALL {
            let raw = serde_json::to_string(&tier).expect("serialize tier");
            let back: Tier = serde_json::from_str(&raw).expect("deserialize tier");
            assert_eq!(tier, back);
        }
        assert_eq!(serde_json::to_string(&Tier::Edge).unwrap(), "\"edge\"");
    }

    #[test]
    fn test_parsed_answer_is_extracted() {
        let ok = ParsedAnswer::extracted(AnswerKind::Scalar, json!(42));
        assert!(ok.is_extracted());
        assert_eq!(ok.confidence, 1.0);

        let bad = ParsedAnswer::failed(AnswerKind::Scalar, "no marker");
        assert!(!bad.is_extracted());
        assert!(bad.answer.is_none());
    }

    #[test]
    fn test_passed_requires_valid_and_no_error() {
        let mut result = passing_result("dijkstra_simple_01", Tier::Simple);
        assert!(result.passed());

        result.error = Some("boom".to_string());
        assert!(!result.passed());

        let errored = TestResult::errored(case("x", Tier::Edge), "io failure", 1.0);
        assert!(!errored.passed());
        assert!(errored.validation.is_none());
    }

    #[test]
    fn test_pass_rate_empty_suite_is_zero() {
        let results = ScaffoldResults::new("dijkstra", "model");
        assert_eq!(results.pass_rate(), 0.0);
    }

    #[test]
    fn test_pass_rate_and_tier_partition() {
        let mut results = ScaffoldResults::new("dijkstra", "model");
        results.test_results.push(passing_result("a", Tier::Simple));
        results.test_results.push(passing_result("b", Tier::Edge));
        results
            .test_results
            .push(TestResult::errored(case("c", Tier::Edge), "down", 0.0));

        assert_eq!(results.total_tests(), 3);
        assert_eq!(results.passed_tests(), 2);
        assert!((results.pass_rate() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(results.results_for_tier(Tier::Edge).len(), 2);
        assert_eq!(results.results_for_tier(Tier::Standard).len(), 0);
    }

    #[test]
    fn test_validation_result_score_clamped() {
        let result = ValidationResult::invalid("off", json!(1), json!(2)).with_score(1.7);
        assert_eq!(result.score, 1.0);
    }
}
