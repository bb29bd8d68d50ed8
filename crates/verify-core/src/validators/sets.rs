//! Order-insensitive and graph-structure validators.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{json, Value};

use crate::domain::ValidationResult;
use crate::validators::{ValidateOptions, Validator};

const WEIGHT_EPSILON: f64 = 1e-6;

/// Canonical text form of an element, with whole floats collapsed to
/// integers so `5` and `5.0` key identically.
fn canonical(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
            _ => value.to_string(),
        },
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(canonical).collect();
            format!("[{}]", parts.join(","))
        }
        _ => value.to_string(),
    }
}

fn as_elements<'a>(value: &'a Value, wrapper_keys: &[&str]) -> Option<&'a Vec<Value>> {
    if let Some(items) = value.as_array() {
        return Some(items);
    }
    if let Some(map) = value.as_object() {
        for key in wrapper_keys {
            if let Some(items) = map.get(*key).and_then(Value::as_array) {
                return Some(items);
            }
        }
    }
    None
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

// ---------------------------------------------------------------------------
// Set equivalence
// ---------------------------------------------------------------------------

/// Membership equality regardless of order, scored by Jaccard overlap
/// on a miss. Solution-shaped answers (`positions` plus a `found`
/// flag) are compared on both the flag and the position set.
pub struct SetEquivalenceValidator;

impl Validator for SetEquivalenceValidator {
    fn name(&self) -> &'static str {
        "set_equivalence"
    }

    fn validate(
        &self,
        expected: &Value,
        actual: &Value,
        _opts: &ValidateOptions,
    ) -> ValidationResult {
        // Solution objects carry an explicit found flag.
        if let (Some(exp_found), Some(act_found)) = (
            expected.get("found").and_then(Value::as_bool),
            actual.get("found").and_then(Value::as_bool),
        ) {
            if exp_found != act_found {
                return ValidationResult::invalid(
                    "solution existence claims disagree",
                    expected.clone(),
                    actual.clone(),
                );
            }
            if !exp_found {
                return ValidationResult::valid(expected.clone(), actual.clone());
            }
        }

        let wrappers = ["positions", "value", "items", "subset"];
        let (Some(exp_items), Some(act_items)) = (
            as_elements(expected, &wrappers),
            as_elements(actual, &wrappers),
        ) else {
            return ValidationResult::invalid(
                "expected list-shaped values on both sides",
                expected.clone(),
                actual.clone(),
            );
        };

        let exp_set: BTreeSet<String> = exp_items.iter().map(canonical).collect();
        let act_set: BTreeSet<String> = act_items.iter().map(canonical).collect();

        if exp_set == act_set {
            return ValidationResult::valid(expected.clone(), actual.clone());
        }

        let overlap = jaccard(&exp_set, &act_set);
        ValidationResult::invalid(
            "element sets differ",
            expected.clone(),
            actual.clone(),
        )
        .with_score(overlap)
    }
}

// ---------------------------------------------------------------------------
// Edge sets
// ---------------------------------------------------------------------------

/// Canonical undirected form of an edge given as `[u, v]`,
/// `[u, v, w]`, or a `u -> v` style string.
fn canonical_edge(edge: &Value) -> Option<String> {
    let endpoints: Vec<String> = match edge {
        Value::Array(items) if items.len() >= 2 => {
            items.iter().take(2).map(canonical).collect()
        }
        Value::String(s) => {
            let parts: Vec<&str> = s
                .split(|c: char| c == '-' || c == '>' || c == ',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            if parts.len() < 2 {
                return None;
            }
            vec![parts[0].to_string(), parts[1].to_string()]
        }
        _ => return None,
    };

    let (a, b) = (&endpoints[0], &endpoints[1]);
    if a <= b {
        Some(format!("{a}--{b}"))
    } else {
        Some(format!("{b}--{a}"))
    }
}

fn edge_set(value: &Value) -> Option<BTreeSet<String>> {
    let items = as_elements(value, &["edges"])?;
    let mut set = BTreeSet::new();
    for item in items {
        set.insert(canonical_edge(item)?);
    }
    Some(set)
}

/// Undirected edge-set equality, direction and listing order ignored.
pub struct EdgeSetValidator;

impl Validator for EdgeSetValidator {
    fn name(&self) -> &'static str {
        "edge_set"
    }

    fn validate(
        &self,
        expected: &Value,
        actual: &Value,
        _opts: &ValidateOptions,
    ) -> ValidationResult {
        let (Some(exp_set), Some(act_set)) = (edge_set(expected), edge_set(actual)) else {
            return ValidationResult::invalid(
                "expected edge lists on both sides",
                expected.clone(),
                actual.clone(),
            );
        };

        if exp_set == act_set {
            return ValidationResult::valid(expected.clone(), actual.clone());
        }

        ValidationResult::invalid("edge sets differ", expected.clone(), actual.clone())
            .with_score(jaccard(&exp_set, &act_set))
    }
}

// ---------------------------------------------------------------------------
// Minimum spanning trees
// ---------------------------------------------------------------------------

fn weight_of(value: &Value) -> Option<f64> {
    value
        .get("total_weight")
        .and_then(Value::as_f64)
        .or_else(|| {
            // Sum per-edge weights when the total is absent.
            let items = as_elements(value, &["edges"])?;
            let mut total = 0.0;
            for item in items {
                let w = item.as_array()?.get(2)?.as_f64()?;
                total += w;
            }
            Some(total)
        })
}

/// Total weight decides MST equivalence. Distinct trees of equal
/// weight are both minimal; the edge set is only consulted when no
/// weight is comparable on either side.
pub struct MstValidator;

impl Validator for MstValidator {
    fn name(&self) -> &'static str {
        "mst"
    }

    fn validate(
        &self,
        expected: &Value,
        actual: &Value,
        opts: &ValidateOptions,
    ) -> ValidationResult {
        if let (Some(e), Some(a)) = (weight_of(expected), weight_of(actual)) {
            if (e - a).abs() <= WEIGHT_EPSILON {
                return ValidationResult::valid(expected.clone(), actual.clone());
            }
            let rel_err = (e - a).abs() / e.abs().max(1e-12);
            return ValidationResult::invalid(
                format!("tree weight {a} differs from minimum {e}"),
                expected.clone(),
                actual.clone(),
            )
            .with_score((1.0 - rel_err).max(0.0));
        }

        EdgeSetValidator.validate(expected, actual, opts)
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

fn path_nodes(value: &Value) -> Option<Vec<String>> {
    let items = as_elements(value, &["path"])?;
    Some(items.iter().map(canonical).collect())
}

/// Undirected edge-cost table from the problem input, read from an
/// `edges` list or a `graph` adjacency object. First listing wins.
fn cost_table(input: &Value) -> Option<BTreeMap<(String, String), f64>> {
    let mut table = BTreeMap::new();

    if let Some(edges) = input.get("edges").and_then(Value::as_array) {
        for edge in edges {
            let items = edge.as_array()?;
            if items.len() < 3 {
                return None;
            }
            let (u, v) = (canonical(&items[0]), canonical(&items[1]));
            let w = items[2].as_f64()?;
            let key = if u <= v { (u, v) } else { (v, u) };
            table.entry(key).or_insert(w);
        }
    } else if let Some(graph) = input.get("graph").and_then(Value::as_object) {
        for (u, neighbors) in graph {
            for (v, w) in neighbors.as_object()? {
                let w = w.as_f64()?;
                let key = if u <= v {
                    (u.clone(), v.clone())
                } else {
                    (v.clone(), u.clone())
                };
                table.entry(key).or_insert(w);
            }
        }
    }

    if table.is_empty() {
        None
    } else {
        Some(table)
    }
}

fn path_cost(path: &[String], table: &BTreeMap<(String, String), f64>) -> Option<f64> {
    let mut total = 0.0;
    for hop in path.windows(2) {
        let (u, v) = (&hop[0], &hop[1]);
        let key = if u <= v {
            (u.clone(), v.clone())
        } else {
            (v.clone(), u.clone())
        };
        total += table.get(&key)?;
    }
    Some(total)
}

/// Path equivalence. An exact match scores 1.0. A different path with
/// the same endpoints and the same recomputed cost is still a correct
/// shortest path and stays valid at half score. Endpoint disagreement
/// is always wrong.
pub struct PathMatchValidator {
    check_cost: bool,
}

impl Default for PathMatchValidator {
    fn default() -> Self {
        Self { check_cost: true }
    }
}

impl PathMatchValidator {
    pub fn new(check_cost: bool) -> Self {
        Self { check_cost }
    }
}

impl Validator for PathMatchValidator {
    fn name(&self) -> &'static str {
        "path_match"
    }

    fn validate(
        &self,
        expected: &Value,
        actual: &Value,
        opts: &ValidateOptions,
    ) -> ValidationResult {
        let (Some(exp_path), Some(act_path)) = (path_nodes(expected), path_nodes(actual)) else {
            return ValidationResult::invalid(
                "expected path lists on both sides",
                expected.clone(),
                actual.clone(),
            );
        };

        if act_path.is_empty() {
            return ValidationResult::invalid("empty path", expected.clone(), actual.clone());
        }

        if exp_path == act_path {
            return ValidationResult::valid(expected.clone(), actual.clone());
        }

        let endpoints_match = exp_path.first() == act_path.first()
            && exp_path.last() == act_path.last();
        if !endpoints_match {
            return ValidationResult::invalid(
                "path endpoints do not match",
                expected.clone(),
                actual.clone(),
            );
        }

        if self.check_cost {
            if let Some(table) = opts.input.as_ref().and_then(cost_table) {
                let exp_cost = path_cost(&exp_path, &table);
                let act_cost = path_cost(&act_path, &table);
                match (exp_cost, act_cost) {
                    (Some(e), Some(a)) if (e - a).abs() <= WEIGHT_EPSILON => {
                        let mut result =
                            ValidationResult::valid(expected.clone(), actual.clone())
                                .with_details(json!({ "alternate_path_cost": a }));
                        result.score = 0.5;
                        result.message = "alternate path with equal cost".to_string();
                        return result;
                    }
                    (_, None) => {
                        return ValidationResult::invalid(
                            "path uses edges not present in the graph",
                            expected.clone(),
                            actual.clone(),
                        );
                    }
                    (Some(e), Some(a)) => {
                        return ValidationResult::invalid(
                            format!("path cost {a} differs from optimal {e}"),
                            expected.clone(),
                            actual.clone(),
                        );
                    }
                    (None, _) => {}
                }
            }
        }

        ValidationResult::invalid(
            "alternate path, cost not verifiable",
            expected.clone(),
            actual.clone(),
        )
        .with_score(0.5)
    }
}

// ---------------------------------------------------------------------------
// Subset sum
// ---------------------------------------------------------------------------

/// Checks the claim, not the listing: a reported subset is correct
/// when it sums to the target and draws only from the input multiset.
/// Many valid subsets can exist for one instance.
pub struct SubsetSumValidator;

impl Validator for SubsetSumValidator {
    fn name(&self) -> &'static str {
        "subset_sum"
    }

    fn validate(
        &self,
        expected: &Value,
        actual: &Value,
        opts: &ValidateOptions,
    ) -> ValidationResult {
        let exp_found = expected
            .get("found")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        let act_found = actual.get("found").and_then(Value::as_bool).unwrap_or(true);

        if exp_found != act_found {
            return ValidationResult::invalid(
                "solution existence claims disagree",
                expected.clone(),
                actual.clone(),
            );
        }
        if !exp_found {
            return ValidationResult::valid(expected.clone(), actual.clone());
        }

        let wrappers = ["subset", "value", "items"];
        let (Some(exp_items), Some(act_items)) = (
            as_elements(expected, &wrappers),
            as_elements(actual, &wrappers),
        ) else {
            return ValidationResult::invalid(
                "expected subset lists on both sides",
                expected.clone(),
                actual.clone(),
            );
        };

        let sum = |items: &[Value]| -> Option<f64> {
            items.iter().map(Value::as_f64).sum::<Option<f64>>()
        };
        let (Some(exp_sum), Some(act_sum)) = (sum(exp_items), sum(act_items)) else {
            return ValidationResult::invalid(
                "subset contains non-numeric elements",
                expected.clone(),
                actual.clone(),
            );
        };

        // Target from the problem input beats the reference sum.
        let target = opts
            .input
            .as_ref()
            .and_then(|input| input.get("target"))
            .and_then(Value::as_f64)
            .unwrap_or(exp_sum);

        if (act_sum - target).abs() > WEIGHT_EPSILON {
            return ValidationResult::invalid(
                format!("subset sums to {act_sum}, target is {target}"),
                expected.clone(),
                actual.clone(),
            );
        }

        // Multiset containment against the available numbers.
        if let Some(pool) = opts
            .input
            .as_ref()
            .and_then(|input| input.get("numbers"))
            .and_then(Value::as_array)
        {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for n in pool {
                *counts.entry(canonical(n)).or_insert(0) += 1;
            }
            for n in act_items {
                let key = canonical(n);
                match counts.get_mut(&key) {
                    Some(count) if *count > 0 => *count -= 1,
                    _ => {
                        return ValidationResult::invalid(
                            format!("element {key} is not available in the input"),
                            expected.clone(),
                            actual.clone(),
                        );
                    }
                }
            }
        }

        ValidationResult::valid(expected.clone(), actual.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts() -> ValidateOptions {
        ValidateOptions::default()
    }

    #[test]
    fn test_set_equivalence_order_insensitive() {
        let v = SetEquivalenceValidator;
        assert!(v
            .validate(&json!([1, 2, 3]), &json!([3.0, 2, 1]), &opts())
            .is_valid);
    }

    #[test]
    fn test_set_jaccard_partial() {
        let v = SetEquivalenceValidator;
        let result = v.validate(&json!([1, 2, 3]), &json!([2, 3, 4]), &opts());
        assert!(!result.is_valid);
        assert!((result.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_queens_alternate_placement() {
        let v = SetEquivalenceValidator;
        let expected = json!({ "positions": [[0, 1], [1, 3], [2, 0], [3, 2]], "found": true });
        let same_set = json!({ "positions": [[2, 0], [0, 1], [3, 2], [1, 3]], "found": true });
        assert!(v.validate(&expected, &same_set, &opts()).is_valid);
    }

    #[test]
    fn test_queens_found_flag_mismatch() {
        let v = SetEquivalenceValidator;
        let expected = json!({ "positions": [[0, 1]], "found": true });
        let actual = json!({ "positions": [], "found": false });
        assert!(!v.validate(&expected, &actual, &opts()).is_valid);
    }

    #[test]
    fn test_edge_set_direction_ignored() {
        let v = EdgeSetValidator;
        let expected = json!({ "edges": [["A", "B"], ["B", "C"]] });
        let actual = json!({ "edges": [["C", "B"], ["B", "A"]] });
        assert!(v.validate(&expected, &actual, &opts()).is_valid);
    }

    #[test]
    fn test_mst_equal_weight_different_edges() {
        // Two spanning trees of the same total weight are both minimal.
        let v = MstValidator;
        let expected = json!({ "total_weight": 6, "edges": [["A", "B", 1], ["B", "C", 2], ["C", "D", 3]] });
        let actual = json!({ "total_weight": 6, "edges": [["A", "B", 1], ["B", "C", 2], ["B", "D", 3]] });
        assert!(v.validate(&expected, &actual, &opts()).is_valid);
    }

    #[test]
    fn test_mst_weight_from_edges_when_total_missing() {
        let v = MstValidator;
        let expected = json!({ "total_weight": 6 });
        let actual = json!({ "edges": [["A", "B", 1.0], ["B", "C", 2.0], ["C", "D", 3.0]] });
        assert!(v.validate(&expected, &actual, &opts()).is_valid);
    }

    #[test]
    fn test_path_exact_match() {
        let v = PathMatchValidator::default();
        let path = json!({ "path": ["A", "C", "B", "D"] });
        let result = v.validate(&path, &path, &opts());
        assert!(result.is_valid);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_path_endpoint_mismatch_invalid() {
        let v = PathMatchValidator::default();
        let expected = json!({ "path": ["A", "B", "D"] });
        let actual = json!({ "path": ["A", "B", "C"] });
        let result = v.validate(&expected, &actual, &opts());
        assert!(!result.is_valid);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_path_equal_cost_alternate_valid_half_score() {
        let v = PathMatchValidator::default();
        let options = ValidateOptions::with_input(json!({
            "graph": { "A": { "B": 1, "C": 1 }, "B": { "D": 1 }, "C": { "D": 1 } }
        }));
        let expected = json!({ "path": ["A", "B", "D"] });
        let actual = json!({ "path": ["A", "C", "D"] });
        let result = v.validate(&expected, &actual, &options);
        assert!(result.is_valid);
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn test_path_costlier_alternate_invalid() {
        let v = PathMatchValidator::default();
        let options = ValidateOptions::with_input(json!({
            "graph": { "A": { "B": 1, "C": 5 }, "B": { "D": 1 }, "C": { "D": 1 } }
        }));
        let expected = json!({ "path": ["A", "B", "D"] });
        let actual = json!({ "path": ["A", "C", "D"] });
        let result = v.validate(&expected, &actual, &options);
        assert!(!result.is_valid);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_subset_sum_alternate_subset_valid() {
        let v = SubsetSumValidator;
        let options = ValidateOptions::with_input(json!({ "numbers": [3, 34, 4, 12, 5, 2], "target": 9 }));
        let expected = json!({ "subset": [4, 5], "found": true });
        let actual = json!({ "subset": [3, 4, 2], "found": true });
        assert!(v.validate(&expected, &actual, &options).is_valid);
    }

    #[test]
    fn test_subset_sum_wrong_total_invalid() {
        let v = SubsetSumValidator;
        let options = ValidateOptions::with_input(json!({ "numbers": [3, 34, 4, 12, 5, 2], "target": 9 }));
        let expected = json!({ "subset": [4, 5], "found": true });
        let actual = json!({ "subset": [3, 4], "found": true });
        assert!(!v.validate(&expected, &actual, &options).is_valid);
    }

    #[test]
    fn test_subset_sum_element_not_in_pool() {
        let v = SubsetSumValidator;
        let options = ValidateOptions::with_input(json!({ "numbers": [3, 4, 5], "target": 9 }));
        let expected = json!({ "subset": [4, 5], "found": true });
        let actual = json!({ "subset": [9], "found": true });
        assert!(!v.validate(&expected, &actual, &options).is_valid);
    }

    #[test]
    fn test_subset_sum_both_report_no_solution() {
        let v = SubsetSumValidator;
        let expected = json!({ "subset": [], "found": false });
        let actual = json!({ "subset": [], "found": false });
        assert!(v.validate(&expected, &actual, &opts()).is_valid);
    }
}
