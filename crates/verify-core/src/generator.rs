//! Deterministic test-suite generation.
//!
//! Each algorithm family gets a fixed tier mix: three simple cases,
//! five standard, three edge. Randomized tiers draw from a seeded
//! generator, so the same seed always reproduces the same suite. Every
//! input is solved by the reference oracle at generation time; cases
//! carry their ground truth with them.

use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::domain::{TestCase, TestSuite, Tier};
use crate::error::Result;
use crate::oracle::{Oracle, ReferenceOracle};
use crate::registry::AlgorithmId;
use crate::rng::Xorshift64Star;

/// Bumped whenever fixture content changes shape.
pub const SUITE_VERSION: &str = "1.0.0";

const SIMPLE_CASES: usize = 3;
const STANDARD_CASES: usize = 5;
const EDGE_CASES: usize = 3;

pub struct SuiteGenerator {
    seed: u64,
    oracle: Box<dyn Oracle>,
}

impl SuiteGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            oracle: Box::new(ReferenceOracle),
        }
    }

    pub fn with_oracle(seed: u64, oracle: Box<dyn Oracle>) -> Self {
        Self { seed, oracle }
    }

    /// Build the full suite for one algorithm family.
    pub fn generate(&self, algorithm: AlgorithmId) -> Result<TestSuite> {
        let mut test_cases = Vec::with_capacity(SIMPLE_CASES + STANDARD_CASES + EDGE_CASES);

        for tier in Tier::ALL {
            let count = match tier {
                Tier::Simple => SIMPLE_CASES,
                Tier::Standard => STANDARD_CASES,
                Tier::Edge => EDGE_CASES,
            };
            for idx in 0..count {
                let mut rng = self.case_rng(algorithm, tier, idx);
                let (input, description) = fixture(algorithm, tier, idx, &mut rng);
                let expected = self.oracle.solve(algorithm, &input)?;
                test_cases.push(TestCase {
                    id: format!("{}_{}_{:02}", algorithm.as_str(), tier, idx + 1),
                    scaffold: algorithm.as_str().to_string(),
                    tier,
                    input,
                    expected,
                    description,
                });
            }
        }

        debug!(
            scaffold = algorithm.as_str(),
            cases = test_cases.len(),
            seed = self.seed,
            "generated suite"
        );

        Ok(TestSuite {
            scaffold: algorithm.as_str().to_string(),
            version: SUITE_VERSION.to_string(),
            seed: self.seed,
            generated_at: Utc::now(),
            test_cases,
        })
    }

    pub fn generate_all(&self) -> Result<Vec<TestSuite>> {
        AlgorithmId::ALL.iter().map(|&id| self.generate(id)).collect()
    }

    /// Per-case stream so inserting a case never reshuffles its
    /// neighbors.
    fn case_rng(&self, algorithm: AlgorithmId, tier: Tier, idx: usize) -> Xorshift64Star {
        let mut mix = self.seed;
        for byte in algorithm.as_str().bytes().chain(tier.as_str().bytes()) {
            mix = mix.wrapping_mul(0x100000001B3).wrapping_add(u64::from(byte));
        }
        Xorshift64Star::new(mix.wrapping_add(idx as u64 + 1))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn fixture(
    algorithm: AlgorithmId,
    tier: Tier,
    idx: usize,
    rng: &mut Xorshift64Star,
) -> (Value, String) {
    use AlgorithmId as A;
    match algorithm {
        A::Bfs | A::Dfs => unweighted_graph(tier, rng),
        A::Dijkstra | A::BellmanFord => weighted_graph(tier, rng),
        A::FloydWarshall => all_pairs_graph(tier, rng),
        A::TopologicalSort => dag(tier, idx, rng),
        A::Astar => astar_fixture(),
        A::BinarySearch => binary_search_fixture(tier, rng),
        A::MergeSort => merge_sort_fixture(tier, rng),
        A::Quickselect => quickselect_fixture(tier, rng),
        A::Knapsack01 => knapsack_fixture(tier, rng),
        A::Lcs => lcs_fixture(tier),
        A::EditDistance => edit_distance_fixture(idx),
        A::Lis => lis_fixture(tier, rng),
        A::MatrixChain => matrix_chain_fixture(tier, idx),
        A::ActivitySelection => activity_fixture(),
        A::Huffman => huffman_fixture(tier, idx, rng),
        A::Kruskal => kruskal_fixture(),
        A::FractionalKnapsack => fractional_fixture(),
        A::Nqueens => nqueens_fixture(tier),
        A::Sudoku => sudoku_fixture(tier),
        A::GraphColoring => coloring_fixture(tier),
        A::SubsetSum => subset_sum_fixture(tier),
        A::Kmp | A::RabinKarp => pattern_fixture(tier),
        A::TrieOperations => trie_fixture(tier),
        A::NewtonRaphson => (
            json!({ "function": "x^2 - 2", "x0": 1.5 }),
            "Root of x^2 - 2 near sqrt(2)".to_string(),
        ),
        A::Bisection => (
            json!({ "function": "x^3 - x - 2", "a": 1, "b": 2 }),
            "Root of x^3 - x - 2 on [1, 2]".to_string(),
        ),
        A::MonteCarlo => monte_carlo_fixture(tier, idx),
        A::GradientDescent | A::SimulatedAnnealing | A::GeneticAlgorithm | A::HillClimbing => {
            optimization_fixture(algorithm, tier, idx)
        }
    }
}

fn vertex_names(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| char::from(b'A' + (i % 26) as u8).to_string())
        .collect()
}

/// Chain edges keep every vertex reachable from the first.
fn chain_plus_extras(
    vertices: &[String],
    weight: impl Fn(&mut Xorshift64Star) -> i64,
    rng: &mut Xorshift64Star,
) -> Vec<Value> {
    let n = vertices.len();
    let mut edges: Vec<Value> = Vec::new();
    for i in 0..n.saturating_sub(1) {
        edges.push(json!([vertices[i], vertices[i + 1], weight(rng)]));
    }
    for _ in 0..n / 2 {
        let u = rng.gen_range_usize(0, n - 1);
        let v = rng.gen_range_usize(0, n - 1);
        if u != v {
            edges.push(json!([vertices[u], vertices[v], weight(rng)]));
        }
    }
    edges
}

fn graph_size(tier: Tier, rng: &mut Xorshift64Star) -> usize {
    match tier {
        Tier::Simple => 4,
        Tier::Standard => rng.gen_range_usize(5, 8),
        Tier::Edge => *rng.choose(&[1usize, 2, 10]),
    }
}

fn unweighted_graph(tier: Tier, rng: &mut Xorshift64Star) -> (Value, String) {
    let n = graph_size(tier, rng).max(1);
    let vertices = vertex_names(n);
    let edges = if n > 1 {
        chain_plus_extras(&vertices, |_| 1, rng)
    } else {
        Vec::new()
    };
    let input = json!({
        "vertices": vertices,
        "edges": edges,
        "source": vertices[0],
        "target": vertices[n - 1],
    });
    (input, format!("Traversal of a {n}-vertex graph"))
}

fn weighted_graph(tier: Tier, rng: &mut Xorshift64Star) -> (Value, String) {
    let n = graph_size(tier, rng).max(1);
    let vertices = vertex_names(n);
    let edges = if n > 1 {
        chain_plus_extras(&vertices, |r| r.gen_range_i64(1, 10), rng)
    } else {
        Vec::new()
    };
    let input = json!({
        "vertices": vertices,
        "edges": edges,
        "source": vertices[0],
    });
    (input, format!("Shortest paths on a {n}-vertex weighted graph"))
}

fn all_pairs_graph(tier: Tier, rng: &mut Xorshift64Star) -> (Value, String) {
    let n = match tier {
        Tier::Simple => 3,
        Tier::Standard => 4,
        Tier::Edge => 2,
    };
    let vertices = vertex_names(n);
    let mut edges: Vec<Value> = Vec::new();
    for i in 0..n - 1 {
        edges.push(json!([vertices[i], vertices[i + 1], rng.gen_range_i64(1, 10)]));
    }
    for i in 0..n {
        for j in i + 2..n {
            if rng.next_f64() < 0.7 {
                edges.push(json!([vertices[i], vertices[j], rng.gen_range_i64(1, 10)]));
            }
        }
    }
    let input = json!({ "vertices": vertices, "edges": edges });
    (input, format!("All-pairs distances on {n} vertices"))
}

fn dag(tier: Tier, idx: usize, rng: &mut Xorshift64Star) -> (Value, String) {
    match tier {
        Tier::Simple => {
            let input = json!({
                "vertices": ["A", "B", "C", "D"],
                "edges": [["A", "B"], ["A", "C"], ["B", "D"], ["C", "D"]],
            });
            (input, "Diamond dependency graph".to_string())
        }
        Tier::Standard => {
            let vertices = vertex_names(6);
            let mut edges: Vec<Value> = Vec::new();
            for i in 0..5 {
                edges.push(json!([vertices[i], vertices[i + 1]]));
            }
            // Forward skip edges preserve acyclicity.
            for _ in 0..2 {
                let i = rng.gen_range_usize(0, 3);
                let j = rng.gen_range_usize(i + 2, 5);
                edges.push(json!([vertices[i], vertices[j]]));
            }
            let input = json!({ "vertices": vertices, "edges": edges });
            (input, "Six-task dependency chain with skips".to_string())
        }
        Tier::Edge => match idx % 3 {
            0 => (
                json!({ "vertices": ["A"], "edges": [] }),
                "Single task, nothing to order".to_string(),
            ),
            1 => (
                json!({ "vertices": ["A", "B"], "edges": [["A", "B"]] }),
                "Two tasks, one dependency".to_string(),
            ),
            _ => {
                let vertices = vertex_names(6);
                let edges: Vec<Value> = (0..5)
                    .map(|i| json!([vertices[i], vertices[i + 1]]))
                    .collect();
                (
                    json!({ "vertices": vertices, "edges": edges }),
                    "Strict six-task chain".to_string(),
                )
            }
        },
    }
}

fn astar_fixture() -> (Value, String) {
    let input = json!({
        "vertices": ["A", "B", "C", "D"],
        "edges": [["A", "B", 1], ["A", "C", 3], ["B", "D", 2], ["C", "D", 1]],
        "heuristic": { "A": 3, "B": 2, "C": 1, "D": 0 },
        "source": "A",
        "target": "D",
    });
    (input, "Guided search from A to D".to_string())
}

fn binary_search_fixture(tier: Tier, rng: &mut Xorshift64Star) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({ "arr": [1, 3, 5, 7, 9], "target": 5 }),
            "Target present at the midpoint".to_string(),
        ),
        Tier::Standard => {
            let mut arr: Vec<i64> = (0..15).map(|_| rng.gen_range_i64(0, 100)).collect();
            arr.sort_unstable();
            arr.dedup();
            let target = arr[rng.gen_range_usize(0, arr.len() - 1)];
            (
                json!({ "arr": arr, "target": target }),
                "Random sorted array, target present".to_string(),
            )
        }
        Tier::Edge => {
            let arr: Vec<i64> = (0..10).map(|i| i * 2).collect();
            (
                json!({ "arr": arr, "target": 7 }),
                "Target absent from an even-only array".to_string(),
            )
        }
    }
}

fn merge_sort_fixture(tier: Tier, rng: &mut Xorshift64Star) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({ "arr": [5, 2, 8, 1, 9] }),
            "Five unsorted values".to_string(),
        ),
        Tier::Standard => {
            let arr: Vec<i64> = (0..10).map(|_| rng.gen_range_i64(1, 100)).collect();
            (json!({ "arr": arr }), "Ten random values".to_string())
        }
        Tier::Edge => (
            json!({ "arr": [1, 1, 1, 1, 1] }),
            "All elements equal".to_string(),
        ),
    }
}

fn quickselect_fixture(tier: Tier, rng: &mut Xorshift64Star) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({ "arr": [3, 1, 4, 1, 5, 9, 2, 6], "k": 3 }),
            "Third-smallest of eight values".to_string(),
        ),
        _ => {
            let arr: Vec<i64> = (0..10).map(|_| rng.gen_range_i64(1, 100)).collect();
            let k = rng.gen_range_usize(1, arr.len());
            (
                json!({ "arr": arr, "k": k }),
                format!("Order statistic k={k} of ten values"),
            )
        }
    }
}

fn knapsack_fixture(tier: Tier, rng: &mut Xorshift64Star) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({ "values": [1, 4, 5, 7], "weights": [1, 3, 4, 5], "capacity": 7 }),
            "Four items, capacity 7".to_string(),
        ),
        _ => {
            let n = rng.gen_range_usize(4, 8);
            let values: Vec<i64> = (0..n).map(|_| rng.gen_range_i64(1, 20)).collect();
            let weights: Vec<i64> = (0..n).map(|_| rng.gen_range_i64(1, 10)).collect();
            let capacity: i64 = weights.iter().sum::<i64>() / 2;
            (
                json!({ "values": values, "weights": weights, "capacity": capacity }),
                format!("{n} items, half-total capacity"),
            )
        }
    }
}

fn lcs_fixture(tier: Tier) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({ "seq1": "ABCBDAB", "seq2": "BDCAB" }),
            "Classic short pair".to_string(),
        ),
        _ => (
            json!({ "seq1": "AGGTAB", "seq2": "GXTXAYB" }),
            "Textbook GTAB pair".to_string(),
        ),
    }
}

fn edit_distance_fixture(idx: usize) -> (Value, String) {
    let pairs = [
        ("kitten", "sitting", "kitten to sitting"),
        ("sunday", "saturday", "sunday to saturday"),
        ("", "abc", "empty source string"),
    ];
    let (s1, s2, label) = pairs[idx % pairs.len()];
    (json!({ "s1": s1, "s2": s2 }), label.to_string())
}

fn lis_fixture(tier: Tier, rng: &mut Xorshift64Star) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({ "sequence": [10, 22, 9, 33, 21, 50, 41, 60, 80] }),
            "Nine-element classic sequence".to_string(),
        ),
        _ => {
            let sequence: Vec<i64> = (0..12).map(|_| rng.gen_range_i64(1, 100)).collect();
            (json!({ "sequence": sequence }), "Twelve random values".to_string())
        }
    }
}

fn matrix_chain_fixture(tier: Tier, idx: usize) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({ "dimensions": [10, 30, 5, 60] }),
            "Three-matrix chain".to_string(),
        ),
        Tier::Standard => {
            let dims: &[i64] = if idx % 2 == 0 {
                &[40, 20, 30, 10, 30]
            } else {
                &[10, 20, 30, 40, 30]
            };
            (json!({ "dimensions": dims }), "Four-matrix chain".to_string())
        }
        Tier::Edge => {
            let dims: &[i64] = match idx % 3 {
                0 => &[10, 20],
                1 => &[10, 20, 30],
                _ => &[5, 10, 3, 12, 5, 50, 6],
            };
            (
                json!({ "dimensions": dims }),
                format!("Chain of {} matrices", dims.len() - 1),
            )
        }
    }
}

fn activity_fixture() -> (Value, String) {
    (
        json!({ "activities": [[0, 6], [1, 4], [3, 5], [5, 7], [5, 9], [8, 9]] }),
        "Six overlapping activities".to_string(),
    )
}

fn huffman_fixture(tier: Tier, idx: usize, rng: &mut Xorshift64Star) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({ "frequencies": { "a": 5, "b": 9, "c": 12, "d": 13, "e": 16, "f": 45 } }),
            "Six-symbol textbook alphabet".to_string(),
        ),
        Tier::Standard => {
            let mut frequencies = Map::new();
            for i in 0..8u8 {
                let symbol = char::from(b'a' + i).to_string();
                frequencies.insert(symbol, json!(rng.gen_range_i64(1, 50)));
            }
            (
                json!({ "frequencies": frequencies }),
                "Eight symbols, random frequencies".to_string(),
            )
        }
        Tier::Edge => match idx % 3 {
            0 => (
                json!({ "frequencies": { "a": 100 } }),
                "Single symbol".to_string(),
            ),
            1 => (
                json!({ "frequencies": { "a": 10, "b": 10 } }),
                "Two equal symbols".to_string(),
            ),
            _ => (
                json!({ "frequencies": { "a": 5, "b": 5, "c": 5, "d": 5 } }),
                "Four equal symbols".to_string(),
            ),
        },
    }
}

fn kruskal_fixture() -> (Value, String) {
    let input = json!({
        "vertices": ["A", "B", "C", "D"],
        "edges": [["A", "B", 1], ["A", "C", 3], ["B", "C", 2], ["B", "D", 4], ["C", "D", 5]],
    });
    (input, "Spanning tree over five candidate edges".to_string())
}

fn fractional_fixture() -> (Value, String) {
    (
        json!({ "values": [60, 100, 120], "weights": [10, 20, 30], "capacity": 50 }),
        "Three divisible items, capacity 50".to_string(),
    )
}

fn nqueens_fixture(tier: Tier) -> (Value, String) {
    let n = match tier {
        Tier::Simple => 4,
        Tier::Standard => 8,
        Tier::Edge => 1,
    };
    (json!({ "n": n }), format!("{n}x{n} board"))
}

fn sudoku_fixture(tier: Tier) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({ "grid": [
                [5, 3, 0, 0, 7, 0, 0, 0, 0],
                [6, 0, 0, 1, 9, 5, 0, 0, 0],
                [0, 9, 8, 0, 0, 0, 0, 6, 0],
                [8, 0, 0, 0, 6, 0, 0, 0, 3],
                [4, 0, 0, 8, 0, 3, 0, 0, 1],
                [7, 0, 0, 0, 2, 0, 0, 0, 6],
                [0, 6, 0, 0, 0, 0, 2, 8, 0],
                [0, 0, 0, 4, 1, 9, 0, 0, 5],
                [0, 0, 0, 0, 8, 0, 0, 7, 9]
            ] }),
            "Well-known easy puzzle".to_string(),
        ),
        Tier::Standard => (
            json!({ "grid": [
                [0, 0, 0, 2, 6, 0, 7, 0, 1],
                [6, 8, 0, 0, 7, 0, 0, 9, 0],
                [1, 9, 0, 0, 0, 4, 5, 0, 0],
                [8, 2, 0, 1, 0, 0, 0, 4, 0],
                [0, 0, 4, 6, 0, 2, 9, 0, 0],
                [0, 5, 0, 0, 0, 3, 0, 2, 8],
                [0, 0, 9, 3, 0, 0, 0, 7, 4],
                [0, 4, 0, 0, 5, 0, 0, 3, 6],
                [7, 0, 3, 0, 1, 8, 0, 0, 0]
            ] }),
            "Moderate puzzle".to_string(),
        ),
        Tier::Edge => (
            json!({ "grid": [
                [5, 3, 4, 6, 7, 8, 9, 1, 2],
                [6, 7, 2, 1, 9, 5, 3, 4, 8],
                [1, 9, 8, 3, 4, 2, 5, 6, 7],
                [8, 5, 9, 7, 6, 1, 4, 2, 3],
                [4, 2, 6, 8, 5, 3, 7, 9, 1],
                [7, 1, 3, 9, 2, 4, 8, 5, 6],
                [9, 6, 1, 5, 3, 7, 2, 8, 4],
                [2, 8, 7, 4, 1, 9, 6, 3, 5],
                [3, 4, 5, 2, 8, 6, 1, 7, 0]
            ] }),
            "One empty cell".to_string(),
        ),
    }
}

fn coloring_fixture(tier: Tier) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({
                "vertices": ["A", "B", "C", "D"],
                "edges": [["A", "B"], ["B", "C"], ["C", "D"], ["D", "A"]],
                "num_colors": 2,
            }),
            "Even cycle, two colors".to_string(),
        ),
        Tier::Standard => (
            json!({
                "vertices": ["A", "B", "C", "D", "E"],
                "edges": [["A", "B"], ["A", "C"], ["B", "C"], ["B", "D"], ["C", "E"], ["D", "E"]],
                "num_colors": 3,
            }),
            "Five vertices, three colors".to_string(),
        ),
        Tier::Edge => (
            json!({
                "vertices": ["A", "B", "C"],
                "edges": [["A", "B"], ["B", "C"], ["A", "C"]],
                "num_colors": 3,
            }),
            "Triangle, exactly three colors".to_string(),
        ),
    }
}

fn subset_sum_fixture(tier: Tier) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({ "numbers": [3, 34, 4, 12, 5, 2], "target": 9 }),
            "Target reachable two ways".to_string(),
        ),
        _ => (
            json!({ "numbers": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10], "target": 15 }),
            "Dense pool, target 15".to_string(),
        ),
    }
}

fn pattern_fixture(tier: Tier) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({ "text": "ABABDABACDABABCABAB", "pattern": "ABABCABAB" }),
            "Single occurrence with self-overlap".to_string(),
        ),
        _ => (
            json!({ "text": "AABAACAADAABAAABAA", "pattern": "AABA" }),
            "Three overlapping occurrences".to_string(),
        ),
    }
}

fn trie_fixture(tier: Tier) -> (Value, String) {
    match tier {
        Tier::Simple => (
            json!({
                "words": ["apple", "app", "application", "banana"],
                "queries": [["search", "apple"], ["search", "ap"], ["prefix", "ap"], ["autocomplete", "app"]],
            }),
            "Prefix-heavy word set".to_string(),
        ),
        Tier::Standard => (
            json!({
                "words": ["cat", "car", "card", "care", "dog", "dot"],
                "queries": [["search", "car"], ["prefix", "ca"], ["autocomplete", "car"], ["search", "do"], ["autocomplete", "do"]],
            }),
            "Two clusters of stems".to_string(),
        ),
        Tier::Edge => (
            json!({
                "words": ["a"],
                "queries": [["search", "a"], ["search", "b"], ["prefix", ""], ["autocomplete", ""]],
            }),
            "Single-letter dictionary and empty prefix".to_string(),
        ),
    }
}

fn monte_carlo_fixture(tier: Tier, idx: usize) -> (Value, String) {
    let (n_samples, seed) = match tier {
        Tier::Simple => (1000u64, 42 + idx as u64),
        Tier::Standard => (10000, 100 + idx as u64),
        Tier::Edge => {
            let table = [(100u64, 1u64), (50000, 12345), (5000, 99999)];
            table[idx % table.len()]
        }
    };
    (
        json!({ "task": "estimate_pi", "n_samples": n_samples, "seed": seed }),
        format!("Pi from {n_samples} samples"),
    )
}

fn optimization_fixture(algorithm: AlgorithmId, tier: Tier, idx: usize) -> (Value, String) {
    // Objectives stay within the closed fixture-function set the
    // oracle can evaluate.
    let table: [(&str, f64); 4] = [
        ("x^2", 5.0),
        ("(x-3)^2 + 1", 0.0),
        ("(x-5)^2", -1.0),
        ("(x+2)^2 + 3", 4.0),
    ];
    let offset = match tier {
        Tier::Simple => 0,
        Tier::Standard => 1,
        Tier::Edge => 2,
    };
    let (function, x0) = table[(offset + idx) % table.len()];
    let input = json!({
        "method": algorithm.as_str(),
        "function": function,
        "x0": x0,
        "learning_rate": 0.1,
    });
    (input, format!("Minimize {function} from x0={x0}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_reproduces_suite() {
        let a = SuiteGenerator::new(7).generate(AlgorithmId::Dijkstra).unwrap();
        let b = SuiteGenerator::new(7).generate(AlgorithmId::Dijkstra).unwrap();
        assert_eq!(a.test_cases, b.test_cases);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = SuiteGenerator::new(1).generate(AlgorithmId::MergeSort).unwrap();
        let b = SuiteGenerator::new(2).generate(AlgorithmId::MergeSort).unwrap();
        let standard_a = &a.test_cases[4].input;
        let standard_b = &b.test_cases[4].input;
        assert_ne!(standard_a, standard_b);
    }

    #[test]
    fn test_tier_mix_is_three_five_three() {
        let suite = SuiteGenerator::new(3).generate(AlgorithmId::Knapsack01).unwrap();
        let count = |tier: Tier| {
            suite
                .test_cases
                .iter()
                .filter(|c| c.tier == tier)
                .count()
        };
        assert_eq!(count(Tier::Simple), 3);
        assert_eq!(count(Tier::Standard), 5);
        assert_eq!(count(Tier::Edge), 3);
        assert_eq!(suite.len(), 11);
    }

    #[test]
    fn test_case_ids_are_stable() {
        let suite = SuiteGenerator::new(9).generate(AlgorithmId::Bfs).unwrap();
        assert_eq!(suite.test_cases[0].id, "bfs_simple_01");
        assert_eq!(suite.test_cases[3].id, "bfs_standard_01");
        assert_eq!(suite.test_cases[8].id, "bfs_edge_01");
    }

    #[test]
    fn test_every_family_generates() {
        let generator = SuiteGenerator::new(42);
        let suites = generator.generate_all().unwrap();
        assert_eq!(suites.len(), AlgorithmId::ALL.len());
        for suite in &suites {
            assert_eq!(suite.len(), 11, "suite {}", suite.scaffold);
            for case in &suite.test_cases {
                assert!(!case.expected.is_null(), "case {}", case.id);
            }
        }
    }

    #[test]
    fn test_graph_inputs_stay_connected() {
        let suite = SuiteGenerator::new(11).generate(AlgorithmId::Dijkstra).unwrap();
        for case in &suite.test_cases {
            let distances = case.expected["distances"].as_object().unwrap();
            for (vertex, distance) in distances {
                assert!(!distance.is_null(), "{} unreachable in {}", vertex, case.id);
            }
        }
    }
}
