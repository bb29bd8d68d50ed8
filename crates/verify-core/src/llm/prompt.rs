//! Scaffold parsing and prompt assembly.
//!
//! Scaffolds are markdown files with a fixed section layout. The
//! instructions block is mandatory; the surrounding sections are
//! informational and may be absent.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::TestCase;
use crate::error::{Result, VerifyError};
use crate::registry::FormatKind;

/// One scaffold file, split into its sections.
#[derive(Debug, Clone)]
pub struct ParsedScaffold {
    /// Algorithm name from the title line.
    pub name: String,
    pub file_path: PathBuf,
    /// Conditions under which the algorithm applies.
    pub when_to_use: String,
    /// The instruction block the model is asked to follow.
    pub instructions: String,
    pub worked_example: String,
    pub failure_modes: String,
    pub raw_content: String,
}

fn cached(cell: &'static OnceLock<Regex>, source: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).unwrap_or_else(|e| panic!("invalid pattern: {e}")))
}

#[derive(Debug, Default)]
pub struct ScaffoldParser;

impl ScaffoldParser {
    pub fn parse_file(&self, file_path: &Path) -> Result<ParsedScaffold> {
        if !file_path.exists() {
            return Err(VerifyError::ScaffoldNotFound(file_path.display().to_string()));
        }
        let content = std::fs::read_to_string(file_path)?;
        self.parse_content(file_path, &content)
    }

    pub fn parse_content(&self, file_path: &Path, content: &str) -> Result<ParsedScaffold> {
        static TITLE: OnceLock<Regex> = OnceLock::new();
        static WHEN_TO_USE: OnceLock<Regex> = OnceLock::new();
        static INSTRUCTIONS: OnceLock<Regex> = OnceLock::new();
        static WORKED_EXAMPLE: OnceLock<Regex> = OnceLock::new();
        static FAILURE_MODES: OnceLock<Regex> = OnceLock::new();

        let name = cached(&TITLE, r"#\s*(.+?)\s*Scaffold")
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .or_else(|| {
                file_path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_default();

        let section = |re: &Regex| -> String {
            re.captures(content)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default()
        };

        let when_to_use = section(cached(
            &WHEN_TO_USE,
            r"(?is)##\s*When to Use\s*\n(.*?)(\n##|\n---|\z)",
        ));
        let instructions = section(cached(
            &INSTRUCTIONS,
            r"(?is)##\s*Scaffold Instructions.*?\n```\s*\n(.*?)\n```",
        ));
        let worked_example = section(cached(
            &WORKED_EXAMPLE,
            r"(?is)##\s*Worked Example\s*\n(.*?)(\n##\s*Common|\n---\s*\n##|\z)",
        ));
        let failure_modes = section(cached(
            &FAILURE_MODES,
            r"(?is)##\s*Common Failure Modes\s*\n(.*?)(\n##|\n---|\z)",
        ));

        if instructions.is_empty() {
            return Err(VerifyError::MalformedScaffold {
                name,
                section: "Scaffold Instructions".to_string(),
            });
        }

        Ok(ParsedScaffold {
            name,
            file_path: file_path.to_path_buf(),
            when_to_use,
            instructions,
            worked_example,
            failure_modes,
            raw_content: content.to_string(),
        })
    }

    /// Scaffold markdown files under numbered category directories,
    /// sorted for stable iteration order.
    pub fn list_scaffolds(&self, scaffolds_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut categories: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(scaffolds_dir)? {
            let path = entry?.path();
            let numbered = path
                .file_name()
                .map(|n| {
                    let name = n.to_string_lossy();
                    name.starts_with('0') || name.starts_with('1')
                })
                .unwrap_or(false);
            if path.is_dir() && numbered {
                categories.push(path);
            }
        }
        categories.sort();

        let mut scaffolds = Vec::new();
        for category in categories {
            let mut files: Vec<PathBuf> = Vec::new();
            for entry in std::fs::read_dir(&category)? {
                let path = entry?.path();
                let is_md = path.extension().map(|e| e == "md").unwrap_or(false);
                let is_readme = path
                    .file_name()
                    .map(|n| n == "README.md")
                    .unwrap_or(false);
                if is_md && !is_readme {
                    files.push(path);
                }
            }
            files.sort();
            scaffolds.extend(files);
        }
        Ok(scaffolds)
    }
}

// ---------------------------------------------------------------------------
// Prompt assembly
// ---------------------------------------------------------------------------

/// The exact answer-format block appended for each format family. The
/// extraction markers depend on this wording staying stable.
pub fn output_format(format: FormatKind) -> &'static str {
    match format {
        FormatKind::GraphPath => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_DISTANCE: <number>\nFINAL_PATH: [node1, node2, node3, ...]\n",
        FormatKind::GraphDistances => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_DISTANCES: {\"node1\": distance1, \"node2\": distance2, ...}\n",
        FormatKind::SingleValue => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_ANSWER: <your answer>\n",
        FormatKind::List => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_ANSWER: [item1, item2, item3, ...]\n",
        FormatKind::Knapsack => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_VALUE: <maximum value>\nFINAL_ITEMS: [item_index1, item_index2, ...]\n",
        FormatKind::Sequence => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_LENGTH: <length>\nFINAL_SEQUENCE: [element1, element2, ...]\n",
        FormatKind::Root => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_ROOT: <numerical value>\n",
        FormatKind::Positions => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_POSITIONS: [(row1, col1), (row2, col2), ...]\n",
        FormatKind::PatternMatch => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_MATCHES: [index1, index2, ...] (or [] if no matches)\n",
        FormatKind::Huffman => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_TOTAL_BITS: <number>\nFINAL_CODES: {\"symbol1\": \"code1\", \"symbol2\": \"code2\", ...}\n",
        FormatKind::Sudoku => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_GRID: [[row1], [row2], ..., [row9]]\n(where each row is 9 numbers)\nIf no solution exists, write: FINAL_ANSWER: NO_SOLUTION\n",
        FormatKind::GraphColoring => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_COLORING: {\"node1\": color1, \"node2\": color2, ...}\nIf no solution exists with the given number of colors, write: FINAL_ANSWER: NO_SOLUTION\n",
        FormatKind::MatrixChain => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_OPERATIONS: <minimum number of scalar multiplications>\n",
        FormatKind::Trie => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_RESULTS: [result1, result2, ...] (True/False for searches, or list of words for prefix)\n",
        FormatKind::MonteCarlo => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_ESTIMATE: <numerical value>\n",
        FormatKind::Optimization => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_MINIMUM: <minimum value found>\nFINAL_SOLUTION: <x value at minimum>\n",
        FormatKind::Activity => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_COUNT: <number of activities selected>\nFINAL_ACTIVITIES: [activity_index1, activity_index2, ...]\n",
        FormatKind::Kruskal => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_WEIGHT: <total MST weight>\nFINAL_EDGES: [[\"node1\", \"node2\"], [\"node3\", \"node4\"], ...]\n",
        FormatKind::FractionalKnapsack => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_VALUE: <maximum value as decimal>\n",
        FormatKind::SubsetSum => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_SUBSET: [element1, element2, ...] (the subset that sums to target)\nIf no solution exists, write: FINAL_ANSWER: NO_SOLUTION\n",
        FormatKind::EditDistance => "\nIMPORTANT: After your solution, provide your final answer in EXACTLY this format:\nFINAL_DISTANCE: <minimum edit distance>\n",
    }
}

pub const SYSTEM_PROMPT: &str = "You are an algorithm execution assistant. Your task is to:\n1. Follow the algorithm scaffold instructions EXACTLY as written\n2. Show your work step-by-step, including state tables where applicable\n3. Provide your final answer in the EXACT format specified at the end of the prompt\n\nBe precise and systematic. Do not skip steps or make assumptions not stated in the problem.";

#[derive(Debug, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// Scaffold instructions, then the concrete problem, then the
    /// mandatory answer-format block.
    pub fn build_prompt(
        &self,
        scaffold: &ParsedScaffold,
        test_case: &TestCase,
        format: FormatKind,
    ) -> String {
        let mut prompt = String::with_capacity(scaffold.instructions.len() + 512);
        prompt.push_str(&scaffold.instructions);
        prompt.push_str("\n\nNow solve this specific problem:\n");
        prompt.push_str(&self.format_problem(&test_case.input));
        prompt.push('\n');
        prompt.push_str(output_format(format));
        prompt
    }

    pub fn build_system_prompt(&self) -> String {
        SYSTEM_PROMPT.to_string()
    }

    /// One `- key: value` line per input field.
    fn format_problem(&self, input: &Value) -> String {
        let Some(map) = input.as_object() else {
            return format!("- input: {input}");
        };

        let mut lines = Vec::with_capacity(map.len());
        for (key, value) in map {
            lines.push(format!("- {key}: {}", render_value(value)));
        }
        lines.join("\n")
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", parts.join(", "))
        }
        _ => value.to_string(),
    }
}
