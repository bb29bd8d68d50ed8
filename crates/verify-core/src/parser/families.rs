//! Per-family answer extractors.
//!
//! Every extractor is total: it returns a [`ParsedAnswer`] whose
//! `parse_error` is set on failure, and never panics on arbitrary
//! completion text. Marker hits carry confidence 1.0, textual
//! heuristics 0.7.

use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

use crate::domain::{AnswerKind, ParsedAnswer};
use crate::literal;
use crate::parser::heuristics::{
    coerce_scalar, distances_from_text, path_from_text, split_list, tuple_pairs,
};
use crate::parser::markers::{capture, MarkerTag};

const HEURISTIC_CONFIDENCE: f64 = 0.7;

fn cached(cell: &'static OnceLock<Regex>, source: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).unwrap_or_else(|e| panic!("invalid pattern: {e}")))
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Single-source shortest-path distances (Dijkstra, Bellman-Ford).
pub fn distances(text: &str) -> ParsedAnswer {
    if let Some(payload) = capture(MarkerTag::Distances, text) {
        if let Ok(map) = literal::parse_object(&payload) {
            return ParsedAnswer::extracted(
                AnswerKind::Distances,
                json!({ "distances": Value::Object(map) }),
            );
        }
    }

    if let Some(map) = distances_from_text(text) {
        return ParsedAnswer::with_confidence(
            AnswerKind::Distances,
            json!({ "distances": Value::Object(map) }),
            HEURISTIC_CONFIDENCE,
        );
    }

    ParsedAnswer::failed(
        AnswerKind::Distances,
        "could not extract distances from response",
    )
}

/// All-pairs distances (Floyd-Warshall). Falls back to the
/// single-source format rewrapped as a matrix.
pub fn distance_matrix(text: &str) -> ParsedAnswer {
    let inner = distances(text);
    match inner.answer {
        Some(answer) => {
            let map = answer
                .get("distances")
                .cloned()
                .unwrap_or(Value::Object(Map::new()));
            ParsedAnswer::with_confidence(
                AnswerKind::DistanceMatrix,
                json!({ "distance_matrix": map }),
                inner.confidence,
            )
        }
        None => ParsedAnswer::failed(
            AnswerKind::DistanceMatrix,
            "could not extract distance matrix from response",
        ),
    }
}

/// BFS/DFS traversal: path plus level distances, either sub-field
/// sufficient.
pub fn traversal(text: &str) -> ParsedAnswer {
    let distances = distances_from_text(text).map(Value::Object);

    let (path, from_marker) = match capture(MarkerTag::Path, text) {
        Some(content) => (split_list(&content), true),
        None => (
            path_from_text(text).unwrap_or_default(),
            false,
        ),
    };

    if path.is_empty() && distances.is_none() {
        return ParsedAnswer::failed(
            AnswerKind::Traversal,
            "could not extract traversal result from response",
        );
    }

    let confidence = if from_marker { 1.0 } else { HEURISTIC_CONFIDENCE };
    ParsedAnswer::with_confidence(
        AnswerKind::Traversal,
        json!({
            "path": path,
            "distances": distances.unwrap_or(Value::Object(Map::new())),
        }),
        confidence,
    )
}

/// A* search result: the path only.
pub fn astar_path(text: &str) -> ParsedAnswer {
    if let Some(content) = capture(MarkerTag::Path, text) {
        return ParsedAnswer::extracted(AnswerKind::Path, json!({ "path": split_list(&content) }));
    }

    if let Some(path) = path_from_text(text) {
        return ParsedAnswer::with_confidence(
            AnswerKind::Path,
            json!({ "path": path }),
            HEURISTIC_CONFIDENCE,
        );
    }

    ParsedAnswer::failed(AnswerKind::Path, "could not extract path from response")
}

/// Topological ordering, from `FINAL_ANSWER: [...]` or the path marker.
pub fn topological(text: &str) -> ParsedAnswer {
    if let Some(content) = capture(MarkerTag::Answer, text) {
        if let Some(inner) = content.strip_prefix('[').and_then(|c| c.strip_suffix(']')) {
            // Unquoted vertex names are the common shape, so a failed
            // literal parse degrades to comma-splitting.
            let items = match literal::parse_array(&content) {
                Ok(items) => items,
                Err(_) => split_list(inner),
            };
            if !items.is_empty() {
                return ParsedAnswer::extracted(AnswerKind::Order, json!({ "order": items }));
            }
        }
    }

    if let Some(content) = capture(MarkerTag::Path, text) {
        return ParsedAnswer::extracted(
            AnswerKind::Order,
            json!({ "order": split_list(&content) }),
        );
    }

    ParsedAnswer::failed(
        AnswerKind::Order,
        "could not extract topological order from response",
    )
}

// ---------------------------------------------------------------------------
// Divide & conquer
// ---------------------------------------------------------------------------

pub fn binary_search(text: &str) -> ParsedAnswer {
    if let Some(content) = capture(MarkerTag::Answer, text) {
        let value = coerce_scalar(&content);
        if value.is_number() {
            // Index -1 is the conventional "not found" report.
            let found = value != json!(-1);
            return ParsedAnswer::extracted(
                AnswerKind::Scalar,
                json!({ "value": value, "found": found }),
            );
        }
    }

    ParsedAnswer::failed(
        AnswerKind::Scalar,
        "could not extract binary search result from response",
    )
}

pub fn merge_sort(text: &str) -> ParsedAnswer {
    if let Some(content) = capture(MarkerTag::Answer, text) {
        if content.starts_with('[') {
            if let Ok(items) = literal::parse_array(&content) {
                return ParsedAnswer::extracted(AnswerKind::List, json!({ "value": items }));
            }
        }
    }

    ParsedAnswer::failed(AnswerKind::List, "could not extract sorted list from response")
}

pub fn quickselect(text: &str) -> ParsedAnswer {
    if let Some(content) = capture(MarkerTag::Answer, text) {
        if let Ok(value) = content.parse::<i64>() {
            return ParsedAnswer::extracted(AnswerKind::Scalar, json!({ "value": value }));
        }
    }

    ParsedAnswer::failed(
        AnswerKind::Scalar,
        "could not extract quickselect result from response",
    )
}

// ---------------------------------------------------------------------------
// Greedy
// ---------------------------------------------------------------------------

/// Activity selection: the count is canonical, a bare activity list
/// supplies it by length.
pub fn activity(text: &str) -> ParsedAnswer {
    let count = capture(MarkerTag::Count, text).and_then(|c| c.parse::<i64>().ok());
    let activities = capture(MarkerTag::Activities, text)
        .map(|content| split_list(&content))
        .unwrap_or_default();

    if count.is_some() || !activities.is_empty() {
        let count = count.unwrap_or(activities.len() as i64);
        return ParsedAnswer::extracted(AnswerKind::Activity, json!({ "count": count }));
    }

    if let Some(content) = capture(MarkerTag::Answer, text) {
        if let Ok(count) = content.parse::<i64>() {
            return ParsedAnswer::extracted(AnswerKind::Activity, json!({ "count": count }));
        }
        if content.starts_with('[') {
            if let Ok(items) = literal::parse_array(&content) {
                return ParsedAnswer::extracted(
                    AnswerKind::Activity,
                    json!({ "count": items.len() }),
                );
            }
        }
    }

    ParsedAnswer::failed(
        AnswerKind::Activity,
        "could not extract activity selection result from response",
    )
}

pub fn huffman(text: &str) -> ParsedAnswer {
    static BITS_FALLBACK: OnceLock<Regex> = OnceLock::new();
    static CODES_FALLBACK: OnceLock<Regex> = OnceLock::new();
    static CODE_TABLE: OnceLock<Regex> = OnceLock::new();

    let mut marker_hit = false;

    let mut total_bits = capture(MarkerTag::TotalBits, text)
        .and_then(|c| c.parse::<i64>().ok())
        .inspect(|_| marker_hit = true);

    let mut codes = capture(MarkerTag::Codes, text)
        .and_then(|payload| literal::parse_object(&payload).ok())
        .inspect(|_| marker_hit = true);

    if total_bits.is_none() {
        let re = cached(
            &BITS_FALLBACK,
            r"(?i)(?:total[_\s]*bits|bits|weighted[_\s]*path[_\s]*length|WPL)\s*[=:]\s*(\d+)",
        );
        total_bits = re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<i64>().ok());
    }

    if codes.is_none() {
        let re = cached(&CODES_FALLBACK, r"(?i)codes?\s*[=:]\s*(\{[^}]+\})");
        codes = re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| literal::parse_object(m.as_str()).ok());
    }

    if codes.is_none() {
        // Symbol/code tables like `a: 010` or `a | 010`.
        let re = cached(&CODE_TABLE, r"([A-Za-z])\s*[:|]\s*([01]+)");
        let mut table = Map::new();
        for caps in re.captures_iter(text) {
            if let (Some(symbol), Some(code)) = (caps.get(1), caps.get(2)) {
                table.insert(
                    symbol.as_str().to_string(),
                    Value::String(code.as_str().to_string()),
                );
            }
        }
        if !table.is_empty() {
            codes = Some(table);
        }
    }

    if total_bits.is_none() && codes.is_none() {
        return ParsedAnswer::failed(
            AnswerKind::Huffman,
            "could not extract Huffman result from response",
        );
    }

    let confidence = if marker_hit { 1.0 } else { HEURISTIC_CONFIDENCE };
    ParsedAnswer::with_confidence(
        AnswerKind::Huffman,
        json!({
            "total_bits": total_bits.unwrap_or(0),
            "codes": Value::Object(codes.unwrap_or_default()),
        }),
        confidence,
    )
}

pub fn kruskal(text: &str) -> ParsedAnswer {
    static WEIGHT_FALLBACK: OnceLock<Regex> = OnceLock::new();

    let mut marker_hit = false;

    let mut total_weight = capture(MarkerTag::Weight, text)
        .and_then(|c| c.parse::<f64>().ok())
        .inspect(|_| marker_hit = true);

    let mut edges = capture(MarkerTag::Edges, text)
        .and_then(|payload| literal::parse_array(&payload).ok())
        .inspect(|_| marker_hit = true)
        .unwrap_or_default();

    if total_weight.is_none() {
        let re = cached(
            &WEIGHT_FALLBACK,
            r"(?i)(?:total[_\s]*weight|weight|cost|mst[_\s]*weight)\s*[=:]\s*(\d+(?:\.\d+)?)",
        );
        total_weight = re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());
    }

    if edges.is_empty() {
        if let Some(content) = capture(MarkerTag::Items, text) {
            edges = split_list(&content);
        }
    }

    if total_weight.is_none() && edges.is_empty() {
        return ParsedAnswer::failed(
            AnswerKind::Mst,
            "could not extract MST result from response",
        );
    }

    let weight = match total_weight.unwrap_or(0.0) {
        w if w.fract() == 0.0 => json!(w as i64),
        w => json!(w),
    };
    let confidence = if marker_hit { 1.0 } else { HEURISTIC_CONFIDENCE };
    ParsedAnswer::with_confidence(
        AnswerKind::Mst,
        json!({ "total_weight": weight, "edges": edges }),
        confidence,
    )
}

pub fn fractional_knapsack(text: &str) -> ParsedAnswer {
    if let Some(content) = capture(MarkerTag::Value, text) {
        if let Ok(value) = content.parse::<f64>() {
            return ParsedAnswer::extracted(AnswerKind::Scalar, json!({ "value": value }));
        }
    }

    if let Some(content) = capture(MarkerTag::Answer, text) {
        if let Ok(value) = content.parse::<f64>() {
            return ParsedAnswer::extracted(AnswerKind::Scalar, json!({ "value": value }));
        }
    }

    ParsedAnswer::failed(
        AnswerKind::Scalar,
        "could not extract fractional knapsack result from response",
    )
}

// ---------------------------------------------------------------------------
// Dynamic programming
// ---------------------------------------------------------------------------

pub fn knapsack(text: &str) -> ParsedAnswer {
    let value = capture(MarkerTag::Value, text).and_then(|c| c.parse::<f64>().ok());
    let items = capture(MarkerTag::Items, text)
        .map(|content| split_list(&content))
        .unwrap_or_default();

    match value {
        Some(value) => ParsedAnswer::extracted(
            AnswerKind::Knapsack,
            json!({ "value": value as i64, "items": items }),
        )
        .with_metadata(json!({ "value": value as i64 })),
        None => ParsedAnswer::failed(
            AnswerKind::Knapsack,
            "could not extract knapsack result from response",
        ),
    }
}

/// LCS / LIS: length plus sequence; a bare sequence supplies the
/// length by its element count.
pub fn sequence(text: &str) -> ParsedAnswer {
    let length = capture(MarkerTag::Length, text).and_then(|c| c.parse::<i64>().ok());
    let elements = capture(MarkerTag::Sequence, text)
        .map(|content| split_list(&content))
        .unwrap_or_default();

    if length.is_none() && elements.is_empty() {
        return ParsedAnswer::failed(
            AnswerKind::Sequence,
            "could not extract sequence result from response",
        );
    }

    let length = length.unwrap_or(elements.len() as i64);
    ParsedAnswer::extracted(
        AnswerKind::Sequence,
        json!({ "length": length, "sequence": elements }),
    )
    .with_metadata(json!({ "length": length }))
}

pub fn edit_distance(text: &str) -> ParsedAnswer {
    static FALLBACK: OnceLock<Regex> = OnceLock::new();

    for tag in [MarkerTag::Distance, MarkerTag::Answer, MarkerTag::Value] {
        if let Some(content) = capture(tag, text) {
            if let Ok(value) = content.parse::<f64>() {
                return ParsedAnswer::extracted(
                    AnswerKind::Scalar,
                    json!({ "value": value as i64 }),
                );
            }
        }
    }

    let re = cached(
        &FALLBACK,
        r"(?i)(?:edit[_\s]*distance|minimum[_\s]*edits?)\s*[=:]\s*(\d+)",
    );
    if let Some(value) = re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
    {
        return ParsedAnswer::with_confidence(
            AnswerKind::Scalar,
            json!({ "value": value }),
            HEURISTIC_CONFIDENCE,
        );
    }

    ParsedAnswer::failed(
        AnswerKind::Scalar,
        "could not extract edit distance from response",
    )
}

pub fn matrix_chain(text: &str) -> ParsedAnswer {
    static OPS_FALLBACK: OnceLock<Regex> = OnceLock::new();
    static PAREN: OnceLock<Regex> = OnceLock::new();

    let mut marker_hit = false;
    let mut min_ops = capture(MarkerTag::Operations, text)
        .and_then(|c| c.parse::<i64>().ok())
        .inspect(|_| marker_hit = true);

    if min_ops.is_none() {
        let re = cached(
            &OPS_FALLBACK,
            r"(?i)(?:minimum|min)[_\s]*(?:operations|multiplications|cost|scalar)\s*[=:]\s*(\d+)",
        );
        min_ops = re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<i64>().ok());
    }

    let paren_re = cached(&PAREN, r"(?i)parenthesization\s*[=:]\s*(.+?)(?:\n|$)");
    let parenthesization = paren_re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    if let Some(ops) = min_ops {
        let confidence = if marker_hit { 1.0 } else { HEURISTIC_CONFIDENCE };
        let mut parsed = ParsedAnswer::with_confidence(
            AnswerKind::MatrixChain,
            json!({ "min_operations": ops }),
            confidence,
        );
        // Parenthesizations are not unique, so the grouping is kept as
        // diagnostic metadata rather than part of the answer.
        if !parenthesization.is_empty() {
            parsed = parsed.with_metadata(json!({ "parenthesization": parenthesization }));
        }
        return parsed;
    }

    if let Some(content) = capture(MarkerTag::Answer, text) {
        if let Ok(ops) = content.parse::<i64>() {
            return ParsedAnswer::extracted(
                AnswerKind::MatrixChain,
                json!({ "min_operations": ops }),
            );
        }
    }

    ParsedAnswer::failed(
        AnswerKind::MatrixChain,
        "could not extract matrix chain result from response",
    )
}

// ---------------------------------------------------------------------------
// Backtracking
// ---------------------------------------------------------------------------

/// N-Queens never reports a parse failure: no extractable positions
/// means "no solution claimed".
pub fn nqueens(text: &str) -> ParsedAnswer {
    if let Some(content) = capture(MarkerTag::Positions, text) {
        let positions = tuple_pairs(&content);
        if !positions.is_empty() {
            return ParsedAnswer::extracted(
                AnswerKind::Positions,
                json!({ "positions": positions, "found": true }),
            );
        }
    }

    ParsedAnswer::extracted(
        AnswerKind::Positions,
        json!({ "positions": [], "found": false }),
    )
}

pub fn sudoku(text: &str) -> ParsedAnswer {
    static GRID_ANYWHERE: OnceLock<Regex> = OnceLock::new();
    static NO_SOLUTION: OnceLock<Regex> = OnceLock::new();

    let nine_rows = |grid: &[Value]| grid.len() == 9;

    if let Some(payload) = capture(MarkerTag::Grid, text) {
        if let Ok(grid) = literal::parse_array(&payload) {
            if nine_rows(&grid) {
                return ParsedAnswer::extracted(
                    AnswerKind::Sudoku,
                    json!({ "solution": grid, "found": true }),
                );
            }
        }
    }

    if let Some(content) = capture(MarkerTag::Answer, text) {
        if content == "NO_SOLUTION" {
            return ParsedAnswer::extracted(
                AnswerKind::Sudoku,
                json!({ "solution": null, "found": false }),
            );
        }
        if content.starts_with('[') {
            if let Ok(grid) = literal::parse_array(&content) {
                if nine_rows(&grid) {
                    return ParsedAnswer::extracted(
                        AnswerKind::Sudoku,
                        json!({ "solution": grid, "found": true }),
                    );
                }
            }
        }
    }

    // A bare 9x9 grid of digits anywhere in the text.
    let grid_re = cached(
        &GRID_ANYWHERE,
        r"(?s)\[\s*\[[\d,\s]+\](?:\s*,\s*\[[\d,\s]+\]){8}\s*\]",
    );
    if let Some(m) = grid_re.find(text) {
        if let Ok(grid) = literal::parse_array(m.as_str()) {
            let square = nine_rows(&grid)
                && grid
                    .iter()
                    .all(|row| row.as_array().map(|r| r.len() == 9).unwrap_or(false));
            if square {
                return ParsedAnswer::with_confidence(
                    AnswerKind::Sudoku,
                    json!({ "solution": grid, "found": true }),
                    HEURISTIC_CONFIDENCE,
                );
            }
        }
    }

    let no_solution = cached(&NO_SOLUTION, r"(?i)no\s+solution");
    if no_solution.is_match(text) {
        return ParsedAnswer::with_confidence(
            AnswerKind::Sudoku,
            json!({ "solution": null, "found": false }),
            HEURISTIC_CONFIDENCE,
        );
    }

    ParsedAnswer::failed(
        AnswerKind::Sudoku,
        "could not extract Sudoku solution from response",
    )
}

pub fn graph_coloring(text: &str) -> ParsedAnswer {
    static COLORING_FALLBACK: OnceLock<Regex> = OnceLock::new();
    static NO_SOLUTION: OnceLock<Regex> = OnceLock::new();

    if let Some(payload) = capture(MarkerTag::Coloring, text) {
        if let Ok(coloring) = literal::parse_object(&payload) {
            return ParsedAnswer::extracted(
                AnswerKind::Coloring,
                json!({ "coloring": Value::Object(coloring), "found": true }),
            );
        }
    }

    let re = cached(&COLORING_FALLBACK, r"(?i)coloring\s*[=:]\s*(\{[^}]+\})");
    if let Some(coloring) = re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| literal::parse_object(m.as_str()).ok())
    {
        return ParsedAnswer::with_confidence(
            AnswerKind::Coloring,
            json!({ "coloring": Value::Object(coloring), "found": true }),
            HEURISTIC_CONFIDENCE,
        );
    }

    if let Some(content) = capture(MarkerTag::Answer, text) {
        if content == "NO_SOLUTION" {
            return ParsedAnswer::extracted(
                AnswerKind::Coloring,
                json!({ "coloring": {}, "found": false }),
            );
        }
    }

    let no_solution = cached(&NO_SOLUTION, r"(?i)(?:no\s+solution|not\s+possible|cannot)");
    if no_solution.is_match(text) {
        return ParsedAnswer::with_confidence(
            AnswerKind::Coloring,
            json!({ "coloring": {}, "found": false }),
            HEURISTIC_CONFIDENCE,
        );
    }

    ParsedAnswer::failed(
        AnswerKind::Coloring,
        "could not extract graph coloring from response",
    )
}

pub fn subset_sum(text: &str) -> ParsedAnswer {
    static NO_SOLUTION: OnceLock<Regex> = OnceLock::new();

    if let Some(content) = capture(MarkerTag::Subset, text) {
        let subset = split_list(&content);
        return ParsedAnswer::extracted(
            AnswerKind::Subset,
            json!({ "subset": subset, "found": true }),
        );
    }

    if let Some(content) = capture(MarkerTag::Answer, text) {
        if content == "NO_SOLUTION" {
            return ParsedAnswer::extracted(
                AnswerKind::Subset,
                json!({ "subset": [], "found": false }),
            );
        }
        if content.starts_with('[') {
            if let Ok(items) = literal::parse_array(&content) {
                return ParsedAnswer::extracted(
                    AnswerKind::Subset,
                    json!({ "subset": items, "found": true }),
                );
            }
        }
    }

    let no_solution = cached(&NO_SOLUTION, r"(?i)no\s+(?:solution|subset)");
    if no_solution.is_match(text) {
        return ParsedAnswer::with_confidence(
            AnswerKind::Subset,
            json!({ "subset": [], "found": false }),
            HEURISTIC_CONFIDENCE,
        );
    }

    ParsedAnswer::failed(
        AnswerKind::Subset,
        "could not extract subset sum result from response",
    )
}

// ---------------------------------------------------------------------------
// String
// ---------------------------------------------------------------------------

/// KMP / Rabin-Karp match indices. An explicitly empty list is a valid
/// "no matches" answer.
pub fn matches(text: &str) -> ParsedAnswer {
    if let Some(content) = capture(MarkerTag::Matches, text) {
        let indices: Vec<Value> = split_list(&content)
            .into_iter()
            .filter(|v| v.is_i64())
            .collect();
        return ParsedAnswer::extracted(AnswerKind::Matches, json!({ "matches": indices }));
    }

    ParsedAnswer::failed(
        AnswerKind::Matches,
        "could not extract matches from response",
    )
}

pub fn trie(text: &str) -> ParsedAnswer {
    let to_result = |value: Value| -> Value {
        if let Value::String(s) = &value {
            match s.to_ascii_lowercase().as_str() {
                "true" => return Value::Bool(true),
                "false" => return Value::Bool(false),
                _ => {}
            }
        }
        value
    };

    if let Some(content) = capture(MarkerTag::Results, text) {
        let results: Vec<Value> = split_list(&content).into_iter().map(to_result).collect();
        return ParsedAnswer::extracted(AnswerKind::Trie, json!({ "results": results }));
    }

    if let Some(content) = capture(MarkerTag::Answer, text) {
        if content.starts_with('[') {
            if let Ok(items) = literal::parse_array(&content) {
                return ParsedAnswer::extracted(AnswerKind::Trie, json!({ "results": items }));
            }
        }
    }

    ParsedAnswer::failed(
        AnswerKind::Trie,
        "could not extract trie results from response",
    )
}

// ---------------------------------------------------------------------------
// Numerical & optimization
// ---------------------------------------------------------------------------

pub fn root(text: &str) -> ParsedAnswer {
    if let Some(content) = capture(MarkerTag::Root, text) {
        if let Ok(value) = content.parse::<f64>() {
            return ParsedAnswer::extracted(AnswerKind::Root, json!({ "root": value }));
        }
    }

    ParsedAnswer::failed(AnswerKind::Root, "could not extract root from response")
}

pub fn monte_carlo(text: &str) -> ParsedAnswer {
    static FALLBACK: OnceLock<Regex> = OnceLock::new();

    if let Some(content) = capture(MarkerTag::Estimate, text) {
        if let Ok(value) = content.parse::<f64>() {
            return ParsedAnswer::extracted(AnswerKind::Estimate, json!({ "estimate": value }));
        }
    }

    let re = cached(
        &FALLBACK,
        r"(?i)(?:estimate|pi|value|result)\s*[=:]\s*(-?\d+\.?\d*)",
    );
    if let Some(value) = re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
    {
        return ParsedAnswer::with_confidence(
            AnswerKind::Estimate,
            json!({ "estimate": value }),
            HEURISTIC_CONFIDENCE,
        );
    }

    if let Some(content) = capture(MarkerTag::Answer, text) {
        if let Ok(value) = content.parse::<f64>() {
            return ParsedAnswer::extracted(AnswerKind::Estimate, json!({ "estimate": value }));
        }
    }

    ParsedAnswer::failed(
        AnswerKind::Estimate,
        "could not extract Monte Carlo estimate from response",
    )
}

pub fn optimization(text: &str) -> ParsedAnswer {
    static MIN_FALLBACK: OnceLock<Regex> = OnceLock::new();
    static SOLUTION_FALLBACK: OnceLock<Regex> = OnceLock::new();

    let mut marker_hit = false;

    let mut minimum = capture(MarkerTag::Minimum, text)
        .and_then(|c| c.parse::<f64>().ok())
        .inspect(|_| marker_hit = true);
    let mut solution = capture(MarkerTag::Solution, text)
        .and_then(|c| c.parse::<f64>().ok())
        .inspect(|_| marker_hit = true);

    if minimum.is_none() {
        let re = cached(
            &MIN_FALLBACK,
            r"(?i)(?:minimum[_\s]*value|min[_\s]*value|minimum|f\(x\))\s*[=:]\s*(-?\d+\.?\d*(?:[eE][+-]?\d+)?)",
        );
        minimum = re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());
    }

    if solution.is_none() {
        let re = cached(
            &SOLUTION_FALLBACK,
            r"(?i)(?:solution|x\*?|optimal[_\s]*x|at\s+x)\s*[=:]\s*(-?\d+\.?\d*(?:[eE][+-]?\d+)?)",
        );
        solution = re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());
    }

    if minimum.is_some() || solution.is_some() {
        let confidence = if marker_hit { 1.0 } else { HEURISTIC_CONFIDENCE };
        return ParsedAnswer::with_confidence(
            AnswerKind::Optimization,
            json!({ "minimum_value": minimum, "solution": solution }),
            confidence,
        );
    }

    if let Some(content) = capture(MarkerTag::Answer, text) {
        if let Ok(value) = content.parse::<f64>() {
            return ParsedAnswer::extracted(
                AnswerKind::Optimization,
                json!({ "minimum_value": value, "solution": null }),
            );
        }
    }

    ParsedAnswer::failed(
        AnswerKind::Optimization,
        "could not extract optimization result from response",
    )
}
