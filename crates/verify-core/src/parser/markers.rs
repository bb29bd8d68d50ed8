//! Marker vocabulary shared by the prompt builder and the parser.
//!
//! Prompts instruct the model to emit `FINAL_<TAG>: <payload>` lines;
//! extraction mirrors those exact tags. `MarkerTag::ALL` doubles as the
//! fixed priority order for the generic fallback extractor.

use regex::Regex;
use std::sync::OnceLock;

/// One marker line in the output-format contract.
///
/// Declaration order defines the generic-fallback priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerTag {
    Distance,
    Distances,
    Path,
    Answer,
    Value,
    Items,
    Length,
    Sequence,
    Root,
    Positions,
    Matches,
    TotalBits,
    Codes,
    Grid,
    Coloring,
    Operations,
    Results,
    Estimate,
    Minimum,
    Solution,
    Count,
    Activities,
    Weight,
    Edges,
    Subset,
}

impl MarkerTag {
    pub const ALL: [MarkerTag; 25] = [
        MarkerTag::Distance,
        MarkerTag::Distances,
        MarkerTag::Path,
        MarkerTag::Answer,
        MarkerTag::Value,
        MarkerTag::Items,
        MarkerTag::Length,
        MarkerTag::Sequence,
        MarkerTag::Root,
        MarkerTag::Positions,
        MarkerTag::Matches,
        MarkerTag::TotalBits,
        MarkerTag::Codes,
        MarkerTag::Grid,
        MarkerTag::Coloring,
        MarkerTag::Operations,
        MarkerTag::Results,
        MarkerTag::Estimate,
        MarkerTag::Minimum,
        MarkerTag::Solution,
        MarkerTag::Count,
        MarkerTag::Activities,
        MarkerTag::Weight,
        MarkerTag::Edges,
        MarkerTag::Subset,
    ];

    /// Literal tag as it appears in prompts, e.g. `FINAL_DISTANCES`.
    pub fn label(self) -> &'static str {
        match self {
            MarkerTag::Distance => "FINAL_DISTANCE",
            MarkerTag::Distances => "FINAL_DISTANCES",
            MarkerTag::Path => "FINAL_PATH",
            MarkerTag::Answer => "FINAL_ANSWER",
            MarkerTag::Value => "FINAL_VALUE",
            MarkerTag::Items => "FINAL_ITEMS",
            MarkerTag::Length => "FINAL_LENGTH",
            MarkerTag::Sequence => "FINAL_SEQUENCE",
            MarkerTag::Root => "FINAL_ROOT",
            MarkerTag::Positions => "FINAL_POSITIONS",
            MarkerTag::Matches => "FINAL_MATCHES",
            MarkerTag::TotalBits => "FINAL_TOTAL_BITS",
            MarkerTag::Codes => "FINAL_CODES",
            MarkerTag::Grid => "FINAL_GRID",
            MarkerTag::Coloring => "FINAL_COLORING",
            MarkerTag::Operations => "FINAL_OPERATIONS",
            MarkerTag::Results => "FINAL_RESULTS",
            MarkerTag::Estimate => "FINAL_ESTIMATE",
            MarkerTag::Minimum => "FINAL_MINIMUM",
            MarkerTag::Solution => "FINAL_SOLUTION",
            MarkerTag::Count => "FINAL_COUNT",
            MarkerTag::Activities => "FINAL_ACTIVITIES",
            MarkerTag::Weight => "FINAL_WEIGHT",
            MarkerTag::Edges => "FINAL_EDGES",
            MarkerTag::Subset => "FINAL_SUBSET",
        }
    }

    fn pattern_source(self) -> &'static str {
        match self {
            MarkerTag::Distance => r"(?i)FINAL_DISTANCE:\s*(\d+(?:\.\d+)?)",
            MarkerTag::Distances => r"(?i)FINAL_DISTANCES:\s*(\{[^}]+\})",
            MarkerTag::Path => r"(?i)FINAL_PATH:\s*\[([^\]]+)\]",
            MarkerTag::Answer => r"(?i)FINAL_ANSWER:\s*(.+?)(?:\n|$)",
            MarkerTag::Value => r"(?i)FINAL_VALUE:\s*(\d+(?:\.\d+)?)",
            MarkerTag::Items => r"(?i)FINAL_ITEMS:\s*\[([^\]]*)\]",
            MarkerTag::Length => r"(?i)FINAL_LENGTH:\s*(\d+)",
            MarkerTag::Sequence => r"(?i)FINAL_SEQUENCE:\s*\[([^\]]+)\]",
            MarkerTag::Root => r"(?i)FINAL_ROOT:\s*(-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)",
            MarkerTag::Positions => r"(?i)FINAL_POSITIONS:\s*\[([^\]]+)\]",
            MarkerTag::Matches => r"(?i)FINAL_MATCHES:\s*\[([^\]]*)\]",
            MarkerTag::TotalBits => r"(?i)FINAL_TOTAL_BITS:\s*(\d+)",
            MarkerTag::Codes => r"(?i)FINAL_CODES:\s*(\{[^}]+\})",
            MarkerTag::Grid => r"(?is)FINAL_GRID:\s*(\[\[.+?\]\])",
            MarkerTag::Coloring => r"(?i)FINAL_COLORING:\s*(\{[^}]+\})",
            MarkerTag::Operations => r"(?i)FINAL_OPERATIONS:\s*(\d+)",
            MarkerTag::Results => r"(?i)FINAL_RESULTS:\s*\[([^\]]*)\]",
            MarkerTag::Estimate => r"(?i)FINAL_ESTIMATE:\s*(-?\d+\.?\d*)",
            MarkerTag::Minimum => r"(?i)FINAL_MINIMUM:\s*(-?\d+\.?\d*(?:[eE][+-]?\d+)?)",
            MarkerTag::Solution => r"(?i)FINAL_SOLUTION:\s*(-?\d+\.?\d*(?:[eE][+-]?\d+)?)",
            MarkerTag::Count => r"(?i)FINAL_COUNT:\s*(\d+)",
            MarkerTag::Activities => r"(?i)FINAL_ACTIVITIES:\s*\[([^\]]*)\]",
            MarkerTag::Weight => r"(?i)FINAL_WEIGHT:\s*(\d+(?:\.\d+)?)",
            MarkerTag::Edges => r"(?is)FINAL_EDGES:\s*(\[\[.+?\]\])",
            MarkerTag::Subset => r"(?i)FINAL_SUBSET:\s*\[([^\]]*)\]",
        }
    }

    /// Compiled pattern for this tag; compiled once per process.
    pub fn regex(self) -> &'static Regex {
        static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
        let all = COMPILED.get_or_init(|| {
            MarkerTag::ALL
                .iter()
                .map(|tag| {
                    Regex::new(tag.pattern_source()).unwrap_or_else(|e| {
                        panic!("invalid marker pattern {}: {e}", tag.label())
                    })
                })
                .collect()
        });
        &all[self as usize]
    }
}

/// First capture of the tag's marker line anywhere in the text.
pub fn capture(tag: MarkerTag, text: &str) -> Option<String> {
    tag.regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_first_match_wins() {
        let text = "final_distances: {\"A\": 0}\nFINAL_DISTANCES: {\"B\": 1}";
        assert_eq!(
            capture(MarkerTag::Distances, text).as_deref(),
            Some("{\"A\": 0}")
        );
    }

    #[test]
    fn test_answer_stops_at_newline() {
        let text = "FINAL_ANSWER: 42\nsome explanation after";
        assert_eq!(capture(MarkerTag::Answer, text).as_deref(), Some("42"));
    }

    #[test]
    fn test_grid_spans_lines() {
        let text = "FINAL_GRID: [[1, 2],\n[3, 4]]";
        assert_eq!(
            capture(MarkerTag::Grid, text).as_deref(),
            Some("[[1, 2],\n[3, 4]]")
        );
    }

    #[test]
    fn test_empty_list_markers_capture_empty() {
        assert_eq!(
            capture(MarkerTag::Matches, "FINAL_MATCHES: []").as_deref(),
            Some("")
        );
        assert_eq!(capture(MarkerTag::Path, "FINAL_PATH: []"), None);
    }

    #[test]
    fn test_all_patterns_compile() {
        for tag in MarkerTag::ALL {
            let _ = tag.regex();
            assert!(tag.label().starts_with("FINAL_"));
        }
    }

    #[test]
    fn test_root_accepts_scientific_notation() {
        assert_eq!(
            capture(MarkerTag::Root, "FINAL_ROOT: -1.414e0").as_deref(),
            Some("-1.414e0")
        );
    }
}
