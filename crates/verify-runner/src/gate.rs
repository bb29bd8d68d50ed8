//! Suite status gating on pass rate.

use serde::{Deserialize, Serialize};

use verify_core::domain::ScaffoldResults;

/// Pass rate at or above which a scaffold counts as certified.
pub const CERTIFIED_THRESHOLD: f64 = 0.9;

/// Pass rate at or above which a scaffold counts as partially working.
pub const PARTIAL_THRESHOLD: f64 = 0.5;

/// Certification status of one scaffold suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteStatus {
    Certified,
    Partial,
    Failed,
}

impl SuiteStatus {
    pub fn from_pass_rate(pass_rate: f64) -> Self {
        if pass_rate >= CERTIFIED_THRESHOLD {
            SuiteStatus::Certified
        } else if pass_rate >= PARTIAL_THRESHOLD {
            SuiteStatus::Partial
        } else {
            SuiteStatus::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuiteStatus::Certified => "certified",
            SuiteStatus::Partial => "partial",
            SuiteStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SuiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gate evaluation verdict for one scaffold suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateVerdict {
    pub scaffold: String,
    pub status: SuiteStatus,
    pub pass_rate: f64,
    pub passed_tests: usize,
    pub total_tests: usize,
    pub message: String,
}

/// Grade the results of one suite run.
pub fn evaluate_gate(results: &ScaffoldResults) -> GateVerdict {
    let pass_rate = results.pass_rate();
    let status = SuiteStatus::from_pass_rate(pass_rate);
    let message = format!(
        "{} {}/{} ({:.1}%)",
        status,
        results.passed_tests(),
        results.total_tests(),
        pass_rate * 100.0
    );

    GateVerdict {
        scaffold: results.scaffold.clone(),
        status,
        pass_rate,
        passed_tests: results.passed_tests(),
        total_tests: results.total_tests(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use verify_core::domain::{TestCase, TestResult, Tier, ValidationResult};

    fn results_with(passed: usize, failed: usize) -> ScaffoldResults {
        let mut results = ScaffoldResults::new("dijkstra", "model");
        for i in 0..passed + failed {
            let case = TestCase {
                id: format!("dijkstra_simple_{i:02}"),
                scaffold: "dijkstra".to_string(),
                tier: Tier::Simple,
                input: json!({}),
                expected: json!({}),
                description: String::new(),
            };
            let validation = if i < passed {
                ValidationResult::valid(json!(1), json!(1))
            } else {
                ValidationResult::invalid("wrong", json!(1), json!(2))
            };
            results.test_results.push(TestResult {
                test_case: case,
                response: None,
                parsed: None,
                validation: Some(validation),
                error: None,
                duration_ms: 1.0,
            });
        }
        results
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(SuiteStatus::from_pass_rate(1.0), SuiteStatus::Certified);
        assert_eq!(SuiteStatus::from_pass_rate(0.9), SuiteStatus::Certified);
        assert_eq!(SuiteStatus::from_pass_rate(0.89), SuiteStatus::Partial);
        assert_eq!(SuiteStatus::from_pass_rate(0.5), SuiteStatus::Partial);
        assert_eq!(SuiteStatus::from_pass_rate(0.49), SuiteStatus::Failed);
        assert_eq!(SuiteStatus::from_pass_rate(0.0), SuiteStatus::Failed);
    }

    #[test]
    fn test_verdict_for_mixed_suite() {
        let verdict = evaluate_gate(&results_with(10, 1));
        assert_eq!(verdict.status, SuiteStatus::Certified);
        assert_eq!(verdict.passed_tests, 10);
        assert_eq!(verdict.total_tests, 11);
        assert!(verdict.message.contains("certified"));
    }

    #[test]
    fn test_verdict_for_empty_suite_is_failed() {
        let verdict = evaluate_gate(&ScaffoldResults::new("bfs", "model"));
        assert_eq!(verdict.status, SuiteStatus::Failed);
        assert_eq!(verdict.pass_rate, 0.0);
    }
}
