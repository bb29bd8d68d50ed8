//! Extraction of structured answers from free-form model output.
//!
//! Each algorithm family has a dedicated extractor that knows which
//! output markers and textual fallbacks apply. [`parse`] dispatches on
//! the algorithm identity; [`parse_named`] additionally degrades to a
//! generic marker sweep for names outside the registry.

mod families;
mod heuristics;
mod markers;

pub use markers::MarkerTag;

use serde_json::json;

use crate::domain::{AnswerKind, ParsedAnswer};
use crate::registry::AlgorithmId;

/// Extract the answer for a known algorithm from raw completion text.
pub fn parse(text: &str, algorithm: AlgorithmId) -> ParsedAnswer {
    use AlgorithmId::*;
    match algorithm {
        Dijkstra | BellmanFord => families::distances(text),
        FloydWarshall => families::distance_matrix(text),
        Bfs | Dfs => families::traversal(text),
        Astar => families::astar_path(text),
        TopologicalSort => families::topological(text),
        BinarySearch => families::binary_search(text),
        MergeSort => families::merge_sort(text),
        Quickselect => families::quickselect(text),
        ActivitySelection => families::activity(text),
        Huffman => families::huffman(text),
        Kruskal => families::kruskal(text),
        FractionalKnapsack => families::fractional_knapsack(text),
        Knapsack01 => families::knapsack(text),
        Lcs | Lis => families::sequence(text),
        EditDistance => families::edit_distance(text),
        MatrixChain => families::matrix_chain(text),
        Nqueens => families::nqueens(text),
        Sudoku => families::sudoku(text),
        GraphColoring => families::graph_coloring(text),
        SubsetSum => families::subset_sum(text),
        Kmp | RabinKarp => families::matches(text),
        TrieOperations => families::trie(text),
        NewtonRaphson | Bisection => families::root(text),
        MonteCarlo => families::monte_carlo(text),
        GradientDescent | SimulatedAnnealing | GeneticAlgorithm | HillClimbing => {
            families::optimization(text)
        }
    }
}

/// Extract an answer for a possibly unregistered algorithm name.
///
/// Registered names dispatch normally; anything else falls back to a
/// sweep over every known marker in priority order, reporting low
/// confidence and the marker that matched.
pub fn parse_named(text: &str, algorithm: &str) -> ParsedAnswer {
    match algorithm.parse::<AlgorithmId>() {
        Ok(id) => parse(text, id),
        Err(_) => parse_generic(text),
    }
}

fn parse_generic(text: &str) -> ParsedAnswer {
    for tag in MarkerTag::ALL {
        if let Some(content) = markers::capture(tag, text) {
            let value = crate::literal::parse_value(&content)
                .unwrap_or(serde_json::Value::String(content));
            return ParsedAnswer::with_confidence(AnswerKind::Unknown, value, 0.5)
                .with_metadata(json!({ "marker": tag.label() }));
        }
    }

    ParsedAnswer::failed(AnswerKind::Unknown, "no recognizable answer marker in response")
}
