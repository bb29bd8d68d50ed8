//! Closed registry of supported algorithms.
//!
//! Each [`AlgorithmId`] maps through one exhaustive [`binding`] to the
//! prompt output format and the validator policy for that family. The
//! answer parser dispatches on the same enum, so adding a tag without
//! wiring all three is a compile error, not a silent gap.

use serde::{Deserialize, Serialize};

use crate::error::VerifyError;

// ---------------------------------------------------------------------------
// Algorithm identifiers
// ---------------------------------------------------------------------------

/// Algorithm category, mirroring the scaffold directory layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Graph,
    DivideConquer,
    Greedy,
    Backtracking,
    DynamicProgramming,
    Optimization,
    StringAlgo,
    Numerical,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Graph,
        Category::DivideConquer,
        Category::Greedy,
        Category::Backtracking,
        Category::DynamicProgramming,
        Category::Optimization,
        Category::StringAlgo,
        Category::Numerical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Graph => "graph",
            Category::DivideConquer => "divide_conquer",
            Category::Greedy => "greedy",
            Category::Backtracking => "backtracking",
            Category::DynamicProgramming => "dynamic_programming",
            Category::Optimization => "optimization",
            Category::StringAlgo => "string",
            Category::Numerical => "numerical",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| VerifyError::UnknownCategory(s.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed enumeration of verified algorithm scaffolds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmId {
    // Graph
    Bfs,
    Dfs,
    Dijkstra,
    Astar,
    BellmanFord,
    FloydWarshall,
    TopologicalSort,
    // Divide & conquer
    BinarySearch,
    MergeSort,
    Quickselect,
    // Greedy
    ActivitySelection,
    Huffman,
    Kruskal,
    FractionalKnapsack,
    // Backtracking
    Nqueens,
    Sudoku,
    GraphColoring,
    SubsetSum,
    // Dynamic programming
    Knapsack01,
    Lcs,
    EditDistance,
    Lis,
    MatrixChain,
    // String
    Kmp,
    RabinKarp,
    TrieOperations,
    // Numerical
    NewtonRaphson,
    Bisection,
    MonteCarlo,
    // Optimization
    GradientDescent,
    SimulatedAnnealing,
    GeneticAlgorithm,
    HillClimbing,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 33] = [
        AlgorithmId::Bfs,
        AlgorithmId::Dfs,
        AlgorithmId::Dijkstra,
        AlgorithmId::Astar,
        AlgorithmId::BellmanFord,
        AlgorithmId::FloydWarshall,
        AlgorithmId::TopologicalSort,
        AlgorithmId::BinarySearch,
        AlgorithmId::MergeSort,
        AlgorithmId::Quickselect,
        AlgorithmId::ActivitySelection,
        AlgorithmId::Huffman,
        AlgorithmId::Kruskal,
        AlgorithmId::FractionalKnapsack,
        AlgorithmId::Nqueens,
        AlgorithmId::Sudoku,
        AlgorithmId::GraphColoring,
        AlgorithmId::SubsetSum,
        AlgorithmId::Knapsack01,
        AlgorithmId::Lcs,
        AlgorithmId::EditDistance,
        AlgorithmId::Lis,
        AlgorithmId::MatrixChain,
        AlgorithmId::Kmp,
        AlgorithmId::RabinKarp,
        AlgorithmId::TrieOperations,
        AlgorithmId::NewtonRaphson,
        AlgorithmId::Bisection,
        AlgorithmId::MonteCarlo,
        AlgorithmId::GradientDescent,
        AlgorithmId::SimulatedAnnealing,
        AlgorithmId::GeneticAlgorithm,
        AlgorithmId::HillClimbing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::Bfs => "bfs",
            AlgorithmId::Dfs => "dfs",
            AlgorithmId::Dijkstra => "dijkstra",
            AlgorithmId::Astar => "astar",
            AlgorithmId::BellmanFord => "bellman_ford",
            AlgorithmId::FloydWarshall => "floyd_warshall",
            AlgorithmId::TopologicalSort => "topological_sort",
            AlgorithmId::BinarySearch => "binary_search",
            AlgorithmId::MergeSort => "merge_sort",
            AlgorithmId::Quickselect => "quickselect",
            AlgorithmId::ActivitySelection => "activity_selection",
            AlgorithmId::Huffman => "huffman",
            AlgorithmId::Kruskal => "kruskal",
            AlgorithmId::FractionalKnapsack => "fractional_knapsack",
            AlgorithmId::Nqueens => "nqueens",
            AlgorithmId::Sudoku => "sudoku",
            AlgorithmId::GraphColoring => "graph_coloring",
            AlgorithmId::SubsetSum => "subset_sum",
            AlgorithmId::Knapsack01 => "knapsack_01",
            AlgorithmId::Lcs => "lcs",
            AlgorithmId::EditDistance => "edit_distance",
            AlgorithmId::Lis => "lis",
            AlgorithmId::MatrixChain => "matrix_chain",
            AlgorithmId::Kmp => "kmp",
            AlgorithmId::RabinKarp => "rabin_karp",
            AlgorithmId::TrieOperations => "trie_operations",
            AlgorithmId::NewtonRaphson => "newton_raphson",
            AlgorithmId::Bisection => "bisection",
            AlgorithmId::MonteCarlo => "monte_carlo",
            AlgorithmId::GradientDescent => "gradient_descent",
            AlgorithmId::SimulatedAnnealing => "simulated_annealing",
            AlgorithmId::GeneticAlgorithm => "genetic_algorithm",
            AlgorithmId::HillClimbing => "hill_climbing",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            AlgorithmId::Bfs
            | AlgorithmId::Dfs
            | AlgorithmId::Dijkstra
            | AlgorithmId::Astar
            | AlgorithmId::BellmanFord
            | AlgorithmId::FloydWarshall
            | AlgorithmId::TopologicalSort => Category::Graph,
            AlgorithmId::BinarySearch | AlgorithmId::MergeSort | AlgorithmId::Quickselect => {
                Category::DivideConquer
            }
            AlgorithmId::ActivitySelection
            | AlgorithmId::Huffman
            | AlgorithmId::Kruskal
            | AlgorithmId::FractionalKnapsack => Category::Greedy,
            AlgorithmId::Nqueens
            | AlgorithmId::Sudoku
            | AlgorithmId::GraphColoring
            | AlgorithmId::SubsetSum => Category::Backtracking,
            AlgorithmId::Knapsack01
            | AlgorithmId::Lcs
            | AlgorithmId::EditDistance
            | AlgorithmId::Lis
            | AlgorithmId::MatrixChain => Category::DynamicProgramming,
            AlgorithmId::Kmp | AlgorithmId::RabinKarp | AlgorithmId::TrieOperations => {
                Category::StringAlgo
            }
            AlgorithmId::NewtonRaphson | AlgorithmId::Bisection | AlgorithmId::MonteCarlo => {
                Category::Numerical
            }
            AlgorithmId::GradientDescent
            | AlgorithmId::SimulatedAnnealing
            | AlgorithmId::GeneticAlgorithm
            | AlgorithmId::HillClimbing => Category::Optimization,
        }
    }

    pub fn in_category(category: Category) -> Vec<AlgorithmId> {
        AlgorithmId::ALL
            .into_iter()
            .filter(|id| id.category() == category)
            .collect()
    }
}

impl std::str::FromStr for AlgorithmId {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| VerifyError::UnknownAlgorithm(s.to_string()))
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Bindings
// ---------------------------------------------------------------------------

/// Output-format block embedded in the prompt for a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    GraphPath,
    GraphDistances,
    SingleValue,
    List,
    Knapsack,
    Sequence,
    Root,
    Positions,
    PatternMatch,
    Huffman,
    Sudoku,
    GraphColoring,
    MatrixChain,
    Trie,
    MonteCarlo,
    Optimization,
    Activity,
    Kruskal,
    FractionalKnapsack,
    SubsetSum,
    EditDistance,
}

/// Validator policy plus its family-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidatorSpec {
    Exact { ignore_order: bool },
    Mapping,
    Path,
    Set,
    EdgeSet,
    Mst,
    Numeric { atol: f64, rtol: f64 },
    Root { tolerance: f64 },
    Optimization { tolerance_percent: f64, minimize: bool },
    SubsetSum,
}

/// Everything the pipeline needs to know about one algorithm family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub format: FormatKind,
    pub validator: ValidatorSpec,
}

/// The single source of truth tying prompt format, parser dispatch, and
/// validator selection together. Exhaustive by construction.
pub fn binding(id: AlgorithmId) -> Binding {
    use AlgorithmId as A;
    use FormatKind as F;
    use ValidatorSpec as V;

    let (format, validator) = match id {
        // Graph. Path-producing traversals accept cost-equal alternates;
        // distance maps compare per-key.
        A::Bfs => (F::GraphPath, V::Path),
        A::Dfs => (F::GraphPath, V::Path),
        A::Astar => (F::GraphPath, V::Path),
        A::Dijkstra => (F::GraphDistances, V::Mapping),
        A::BellmanFord => (F::GraphDistances, V::Mapping),
        A::FloydWarshall => (F::GraphDistances, V::Mapping),
        // The prompt pins the tie-breaking rule, so one order is canonical.
        A::TopologicalSort => (F::List, V::Exact { ignore_order: false }),

        // Divide & conquer
        A::BinarySearch => (F::SingleValue, V::Exact { ignore_order: false }),
        A::MergeSort => (F::List, V::Exact { ignore_order: false }),
        A::Quickselect => (F::SingleValue, V::Exact { ignore_order: false }),

        // Greedy
        A::ActivitySelection => (F::Activity, V::Mapping),
        A::Huffman => (F::Huffman, V::Mapping),
        A::Kruskal => (F::Kruskal, V::Mst),
        A::FractionalKnapsack => (
            F::FractionalKnapsack,
            V::Numeric {
                atol: 0.01,
                rtol: 0.01,
            },
        ),

        // Backtracking
        A::Nqueens => (F::Positions, V::Set),
        A::Sudoku => (F::Sudoku, V::Exact { ignore_order: false }),
        A::GraphColoring => (F::GraphColoring, V::Exact { ignore_order: false }),
        // The invariant is the sum, not the particular subset.
        A::SubsetSum => (F::SubsetSum, V::SubsetSum),

        // Dynamic programming
        A::Knapsack01 => (F::Knapsack, V::Mapping),
        A::Lcs => (F::Sequence, V::Mapping),
        A::EditDistance => (F::EditDistance, V::Exact { ignore_order: false }),
        A::Lis => (F::Sequence, V::Mapping),
        A::MatrixChain => (F::MatrixChain, V::Exact { ignore_order: false }),

        // String
        A::Kmp => (F::PatternMatch, V::Exact { ignore_order: false }),
        A::RabinKarp => (F::PatternMatch, V::Exact { ignore_order: false }),
        A::TrieOperations => (F::Trie, V::Exact { ignore_order: false }),

        // Numerical
        A::NewtonRaphson => (F::Root, V::Root { tolerance: 1e-6 }),
        A::Bisection => (F::Root, V::Root { tolerance: 1e-6 }),
        A::MonteCarlo => (
            F::MonteCarlo,
            V::Numeric {
                atol: 0.01,
                rtol: 0.01,
            },
        ),

        // Optimization
        A::GradientDescent
        | A::SimulatedAnnealing
        | A::GeneticAlgorithm
        | A::HillClimbing => (
            F::Optimization,
            V::Optimization {
                tolerance_percent: 10.0,
                minimize: true,
            },
        ),
    };

    Binding { format, validator }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_every_algorithm_has_a_binding() {
        for id in AlgorithmId::ALL {
            // Exhaustive match means this cannot panic; exercise it anyway.
            let b = binding(id);
            let _ = b.format;
            let _ = b.validator;
        }
    }

    #[test]
    fn test_from_str_normalizes_case_and_hyphens() {
        assert_eq!(
            AlgorithmId::from_str("Bellman-Ford").unwrap(),
            AlgorithmId::BellmanFord
        );
        assert_eq!(
            AlgorithmId::from_str("  dijkstra ").unwrap(),
            AlgorithmId::Dijkstra
        );
        assert!(AlgorithmId::from_str("bubble_sort").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for id in AlgorithmId::ALL {
            let back = AlgorithmId::from_str(&id.to_string()).unwrap();
            assert_eq!(id, back);
        }
    }

    #[test]
    fn test_category_partition_covers_all() {
        let total: usize = Category::ALL
            .into_iter()
            .map(|c| AlgorithmId::in_category(c).len())
            .sum();
        assert_eq!(total, AlgorithmId::ALL.len());
        assert_eq!(AlgorithmId::in_category(Category::Graph).len(), 7);
        assert_eq!(AlgorithmId::in_category(Category::Optimization).len(), 4);
    }

    #[test]
    fn test_selected_bindings() {
        assert_eq!(binding(AlgorithmId::Dijkstra).format, FormatKind::GraphDistances);
        assert_eq!(binding(AlgorithmId::Dijkstra).validator, ValidatorSpec::Mapping);
        assert_eq!(binding(AlgorithmId::Kruskal).validator, ValidatorSpec::Mst);
        assert_eq!(binding(AlgorithmId::SubsetSum).validator, ValidatorSpec::SubsetSum);
        assert!(matches!(
            binding(AlgorithmId::MonteCarlo).validator,
            ValidatorSpec::Numeric { .. }
        ));
    }
}
