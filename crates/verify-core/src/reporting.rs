//! Persisted result artifacts and markdown rendering.
//!
//! One JSON artifact per scaffold/model pair, written after a run
//! completes. The markdown renderer produces the per-run summary used
//! in CI comments and terminal reports.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use serde_json::Value;

use crate::domain::ScaffoldResults;

pub const RESULTS_SCHEMA_VERSION: &str = "1.1";

/// Single case entry in the persisted results artifact.
///
/// Diagnostics survive the run: the validator message, the extraction
/// failure reason, and on a miss the expected/actual pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseResultArtifact {
    pub case_id: String,
    pub tier: String,
    pub score: f64,
    pub passed: bool,
    pub message: Option<String>,
    pub parse_error: Option<String>,
    pub expected: Option<Value>,
    pub actual: Option<Value>,
    pub error: Option<String>,
    pub duration_ms: f64,
}

/// Summary section persisted in the results artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryArtifact {
    pub total_tests: usize,
    pub passed_tests: usize,
    pub pass_rate: f64,
    pub total_tokens: u64,
}

/// Canonical results artifact for one scaffold/model pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScaffoldResultsArtifact {
    pub schema_version: String,
    pub scaffold: String,
    pub model: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub summary: SummaryArtifact,
    pub results: Vec<CaseResultArtifact>,
}

impl ScaffoldResultsArtifact {
    pub fn from_results(results: &ScaffoldResults) -> Self {
        let cases = results
            .test_results
            .iter()
            .map(|r| {
                let passed = r.passed();
                let validation = r.validation.as_ref();
                CaseResultArtifact {
                    case_id: r.test_case.id.clone(),
                    tier: r.test_case.tier.to_string(),
                    score: validation.map(|v| v.score).unwrap_or(0.0),
                    passed,
                    message: validation
                        .map(|v| v.message.clone())
                        .filter(|m| !m.is_empty()),
                    parse_error: r.parsed.as_ref().and_then(|p| p.parse_error.clone()),
                    // Mismatch detail only matters on a miss.
                    expected: (!passed)
                        .then(|| validation.map(|v| v.expected.clone()))
                        .flatten(),
                    actual: (!passed)
                        .then(|| validation.map(|v| v.actual.clone()))
                        .flatten(),
                    error: r.error.clone(),
                    duration_ms: r.duration_ms,
                }
            })
            .collect();

        Self {
            schema_version: RESULTS_SCHEMA_VERSION.to_string(),
            scaffold: results.scaffold.clone(),
            model: results.model.clone(),
            started_at: results.started_at,
            completed_at: results.completed_at,
            summary: SummaryArtifact {
                total_tests: results.total_tests(),
                passed_tests: results.passed_tests(),
                pass_rate: results.pass_rate(),
                total_tokens: results.total_tokens(),
            },
            results: cases,
        }
    }
}

/// Write the results artifact in pretty JSON format.
pub fn write_results_json(path: &Path, artifact: &ScaffoldResultsArtifact) -> Result<()> {
    let content = serde_json::to_string_pretty(artifact).context("serialize results artifact")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {:?}", parent))?;
    }
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Load a previously written results artifact.
pub fn load_results_json(path: &Path) -> Result<ScaffoldResultsArtifact> {
    let content = std::fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("parse {:?}", path))
}

/// Render the markdown summary for one scaffold run.
pub fn render_results_md(artifact: &ScaffoldResultsArtifact) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Verification: {}\n\n", artifact.scaffold));
    out.push_str(&format!("- model: `{}`\n", artifact.model));
    out.push_str(&format!(
        "- passed: {}/{} ({:.1}%)\n",
        artifact.summary.passed_tests,
        artifact.summary.total_tests,
        artifact.summary.pass_rate * 100.0
    ));
    out.push_str(&format!("- tokens: {}\n\n", artifact.summary.total_tokens));

    let failures: Vec<&CaseResultArtifact> =
        artifact.results.iter().filter(|c| !c.passed).collect();
    if failures.is_empty() {
        out.push_str("All cases passed.\n");
    } else {
        out.push_str("## Failures\n");
        for case in failures {
            let reason = case
                .error
                .as_deref()
                .or(case.message.as_deref())
                .or(case.parse_error.as_deref());
            match reason {
                Some(reason) => {
                    out.push_str(&format!("- `{}`: {}\n", case.case_id, reason));
                }
                None => {
                    out.push_str(&format!(
                        "- `{}`: score {:.2}\n",
                        case.case_id, case.score
                    ));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_artifact() -> ScaffoldResultsArtifact {
        ScaffoldResultsArtifact {
            schema_version: RESULTS_SCHEMA_VERSION.to_string(),
            scaffold: "dijkstra".to_string(),
            model: "claude-3-haiku-20240307".to_string(),
            started_at: DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
                .expect("parse RFC3339")
                .with_timezone(&Utc),
            completed_at: None,
            summary: SummaryArtifact {
                total_tests: 2,
                passed_tests: 1,
                pass_rate: 0.5,
                total_tokens: 1234,
            },
            results: vec![
                CaseResultArtifact {
                    case_id: "dijkstra_simple_01".to_string(),
                    tier: "simple".to_string(),
                    score: 1.0,
                    passed: true,
                    message: None,
                    parse_error: None,
                    expected: None,
                    actual: None,
                    error: None,
                    duration_ms: 820.0,
                },
                CaseResultArtifact {
                    case_id: "dijkstra_edge_01".to_string(),
                    tier: "edge".to_string(),
                    score: 0.75,
                    passed: false,
                    message: None,
                    parse_error: None,
                    expected: Some(json!({ "distances": { "A": 0, "B": 5 } })),
                    actual: Some(json!({ "distances": { "A": 0, "B": 6 } })),
                    error: None,
                    duration_ms: 950.0,
                },
            ],
        }
    }

    #[test]
    fn results_schema_has_expected_keys() {
        let raw = serde_json::to_value(sample_artifact()).expect("serialize artifact");
        let obj = raw.as_object().expect("artifact object");
        assert!(obj.contains_key("schema_version"));
        assert!(obj.contains_key("scaffold"));
        assert!(obj.contains_key("model"));
        assert!(obj.contains_key("started_at"));
        assert!(obj.contains_key("summary"));
        assert!(obj.contains_key("results"));

        assert_eq!(raw["summary"]["total_tests"], json!(2));
        assert_eq!(raw["summary"]["passed_tests"], json!(1));
        assert_eq!(raw["results"][1]["score"], json!(0.75));
    }

    #[test]
    fn markdown_lists_failures_with_scores() {
        let md = render_results_md(&sample_artifact());
        assert!(md.contains("# Verification: dijkstra"));
        assert!(md.contains("passed: 1/2 (50.0%)"));
        assert!(md.contains("`dijkstra_edge_01`: score 0.75"));
    }

    #[test]
    fn failing_case_keeps_validation_diagnostics() {
        use crate::domain::{
            AnswerKind, ParsedAnswer, ScaffoldResults, TestCase, TestResult, Tier,
            ValidationResult,
        };

        let expected = json!({ "distances": { "A": 0, "B": 5 } });
        let mut results = ScaffoldResults::new("dijkstra", "claude-3-haiku-20240307");
        results.test_results.push(TestResult {
            test_case: TestCase {
                id: "dijkstra_simple_01".to_string(),
                scaffold: "dijkstra".to_string(),
                tier: Tier::Simple,
                input: json!({}),
                expected: expected.clone(),
                description: String::new(),
            },
            response: None,
            parsed: Some(ParsedAnswer::failed(
                AnswerKind::Distances,
                "could not extract distances from response",
            )),
            validation: Some(ValidationResult::invalid(
                "answer extraction failed: could not extract distances from response",
                expected.clone(),
                json!(null),
            )),
            error: None,
            duration_ms: 1.0,
        });

        let artifact = ScaffoldResultsArtifact::from_results(&results);
        let raw = serde_json::to_value(&artifact).expect("serialize artifact");
        let case = &raw["results"][0];
        assert_eq!(
            case["message"],
            json!("answer extraction failed: could not extract distances from response")
        );
        assert_eq!(
            case["parse_error"],
            json!("could not extract distances from response")
        );
        assert_eq!(case["expected"], expected);
        assert_eq!(case["actual"], json!(null));
    }

    #[test]
    fn passing_case_omits_mismatch_detail() {
        use crate::domain::{ScaffoldResults, TestCase, TestResult, Tier, ValidationResult};

        let expected = json!({ "value": 3 });
        let mut results = ScaffoldResults::new("binary_search", "claude-3-haiku-20240307");
        results.test_results.push(TestResult {
            test_case: TestCase {
                id: "binary_search_simple_01".to_string(),
                scaffold: "binary_search".to_string(),
                tier: Tier::Simple,
                input: json!({}),
                expected: expected.clone(),
                description: String::new(),
            },
            response: None,
            parsed: None,
            validation: Some(ValidationResult::valid(expected.clone(), expected.clone())),
            error: None,
            duration_ms: 1.0,
        });

        let artifact = ScaffoldResultsArtifact::from_results(&results);
        let case = &artifact.results[0];
        assert!(case.passed);
        assert_eq!(case.message, None);
        assert_eq!(case.expected, None);
        assert_eq!(case.actual, None);
    }

    #[test]
    fn artifact_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("results").join("dijkstra.json");
        let artifact = sample_artifact();
        write_results_json(&path, &artifact).expect("write artifact");
        let loaded = load_results_json(&path).expect("load artifact");
        assert_eq!(loaded, artifact);
    }
}
