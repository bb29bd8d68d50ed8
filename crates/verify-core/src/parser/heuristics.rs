//! Textual fallbacks applied when no explicit marker line is present,
//! plus the shared numeric-coercion helpers.

use regex::Regex;
use serde_json::{Map, Number, Value};
use std::sync::OnceLock;

fn regex(cell: &'static OnceLock<Regex>, source: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).unwrap_or_else(|e| panic!("invalid pattern: {e}")))
}

/// Coerce a raw token: integer first, then float, else keep the string.
/// Surrounding quotes are stripped before coercion.
pub fn coerce_scalar(raw: &str) -> Value {
    let token = raw.trim().trim_matches(|c| c == '\'' || c == '"');
    if let Ok(i) = token.parse::<i64>() {
        return Value::Number(Number::from(i));
    }
    if let Ok(f) = token.parse::<f64>() {
        if let Some(n) = Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(token.to_string())
}

/// Comma-split list content with independent per-element coercion.
/// Empty tokens are dropped.
pub fn split_list(content: &str) -> Vec<Value> {
    content
        .split(',')
        .map(|item| item.trim().trim_matches(|c| c == '\'' || c == '"'))
        .filter(|item| !item.is_empty())
        .map(coerce_scalar)
        .collect()
}

/// Extract `(row, col)` pairs as `[row, col]` arrays.
pub fn tuple_pairs(content: &str) -> Vec<Value> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = regex(&PATTERN, r"\((\d+),\s*(\d+)\)");

    re.captures_iter(content)
        .filter_map(|caps| {
            let row = caps.get(1)?.as_str().parse::<i64>().ok()?;
            let col = caps.get(2)?.as_str().parse::<i64>().ok()?;
            Some(Value::Array(vec![Value::from(row), Value::from(col)]))
        })
        .collect()
}

/// Scrape a node → distance map from free text: `A: 0`, `distance to
/// A = 0`, or `A → 0` forms. First occurrence per node wins.
pub fn distances_from_text(text: &str) -> Option<Map<String, Value>> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            r"(?i)(\w+):\s*(\d+(?:\.\d+)?)",
            r"(?i)distance to (\w+)\s*[=:]\s*(\d+(?:\.\d+)?)",
            r"(?i)(\w+)\s*→\s*(\d+(?:\.\d+)?)",
        ]
        .iter()
        .map(|src| Regex::new(src).unwrap_or_else(|e| panic!("invalid pattern: {e}")))
        .collect()
    });

    let mut distances = Map::new();
    for re in patterns {
        for caps in re.captures_iter(text) {
            let node = caps.get(1).map(|m| m.as_str().to_string());
            let dist = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
            if let (Some(node), Some(dist)) = (node, dist) {
                if !distances.contains_key(&node) {
                    if let Some(n) = Number::from_f64(dist) {
                        distances.insert(node, Value::Number(n));
                    }
                }
            }
        }
    }

    if distances.is_empty() {
        None
    } else {
        Some(distances)
    }
}

/// Scrape an arrow-separated path (`A -> B -> C`, `A → B`) from a
/// `Path:` or `Shortest path:` line. Needs at least two hops.
pub fn path_from_text(text: &str) -> Option<Vec<Value>> {
    static LINES: OnceLock<Vec<Regex>> = OnceLock::new();
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();

    let lines = LINES.get_or_init(|| {
        [
            r"[Pp]ath:\s*([\w\s→>-]+)",
            r"[Ss]hortest path:\s*([\w\s→>-]+)",
        ]
        .iter()
        .map(|src| Regex::new(src).unwrap_or_else(|e| panic!("invalid pattern: {e}")))
        .collect()
    });
    let sep = regex(&SEPARATOR, r"\s*[-→>]+\s*");

    for re in lines {
        if let Some(caps) = re.captures(text) {
            let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let nodes: Vec<Value> = sep
                .split(raw)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| Value::String(part.to_string()))
                .collect();
            if nodes.len() > 1 {
                return Some(nodes);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_scalar_order() {
        assert_eq!(coerce_scalar("42"), json!(42));
        assert_eq!(coerce_scalar("4.5"), json!(4.5));
        assert_eq!(coerce_scalar("'B'"), json!("B"));
        assert_eq!(coerce_scalar("node"), json!("node"));
    }

    #[test]
    fn test_split_list_mixed_elements() {
        assert_eq!(
            split_list("1, 2.5, 'A', , C"),
            vec![json!(1), json!(2.5), json!("A"), json!("C")]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_tuple_pairs() {
        assert_eq!(
            tuple_pairs("(0, 1), (2, 3)"),
            vec![json!([0, 1]), json!([2, 3])]
        );
        assert!(tuple_pairs("no tuples here").is_empty());
    }

    #[test]
    fn test_distances_first_occurrence_wins() {
        let text = "A: 0, B: 5\nlater we claim A: 99";
        let map = distances_from_text(text).unwrap();
        assert_eq!(map.get("A"), Some(&json!(0.0)));
        assert_eq!(map.get("B"), Some(&json!(5.0)));
    }

    #[test]
    fn test_distances_arrow_and_phrase_forms() {
        let map = distances_from_text("distance to D = 7").unwrap();
        assert_eq!(map.get("D"), Some(&json!(7.0)));
        assert!(distances_from_text("nothing numeric").is_none());
    }

    #[test]
    fn test_path_from_text_forms() {
        assert_eq!(
            path_from_text("Shortest path: A -> B -> D").unwrap(),
            vec![json!("A"), json!("B"), json!("D")]
        );
        assert_eq!(
            path_from_text("Path: A → C").unwrap(),
            vec![json!("A"), json!("C")]
        );
        assert!(path_from_text("Path: A").is_none());
        assert!(path_from_text("no route at all").is_none());
    }
}
