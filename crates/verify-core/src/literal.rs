//! Safe structured-literal reader for container payloads.
//!
//! Model completions frequently emit Python-flavoured literals
//! (`{'A': 0, 'B': True}`, tuples, `None`) where the prompt asked for
//! JSON. Strict JSON is tried first; on failure a small recursive-descent
//! parser accepts the permissive form. The grammar is limited to
//! numbers, strings, booleans, null, lists, tuples, and mappings.
//! There is no expression evaluation of any kind.

use serde_json::{Map, Number, Value};

/// Failure while reading a literal. Callers surface this as a parse
/// diagnostic, never as a process error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid literal at byte {offset}: {message}")]
pub struct LiteralError {
    pub offset: usize,
    pub message: String,
}

/// Read a single literal value, JSON first, permissive form second.
pub fn parse_value(input: &str) -> Result<Value, LiteralError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LiteralError {
            offset: 0,
            message: "empty input".to_string(),
        });
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    let mut reader = Reader::new(trimmed);
    let value = reader.value()?;
    reader.skip_whitespace();
    if !reader.at_end() {
        return Err(reader.error("trailing characters after literal"));
    }
    Ok(value)
}

/// Read a literal that must be a mapping.
pub fn parse_object(input: &str) -> Result<Map<String, Value>, LiteralError> {
    match parse_value(input)? {
        Value::Object(map) => Ok(map),
        other => Err(LiteralError {
            offset: 0,
            message: format!("expected a mapping, got {}", type_name(&other)),
        }),
    }
}

/// Read a literal that must be a list (tuples count as lists).
pub fn parse_array(input: &str) -> Result<Vec<Value>, LiteralError> {
    match parse_value(input)? {
        Value::Array(items) => Ok(items),
        other => Err(LiteralError {
            offset: 0,
            message: format!("expected a list, got {}", type_name(&other)),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, message: &str) -> LiteralError {
        LiteralError {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => self.mapping(),
            Some(b'[') => self.sequence(b'[', b']'),
            Some(b'(') => self.sequence(b'(', b')'),
            Some(b'\'') | Some(b'"') => self.string().map(Value::String),
            Some(b) if b == b'-' || b == b'+' || b.is_ascii_digit() || b == b'.' => self.number(),
            Some(_) => self.keyword(),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn mapping(&mut self) -> Result<Value, LiteralError> {
        self.bump();
        let mut map = Map::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.bump();
            return Ok(Value::Object(map));
        }

        loop {
            self.skip_whitespace();
            let key = match self.peek() {
                Some(b'\'') | Some(b'"') => self.string()?,
                Some(b) if b == b'-' || b.is_ascii_digit() => match self.number()? {
                    Value::Number(n) => n.to_string(),
                    _ => return Err(self.error("invalid mapping key")),
                },
                _ => return Err(self.error("mapping keys must be strings or numbers")),
            };

            self.skip_whitespace();
            if self.bump() != Some(b':') {
                return Err(self.error("expected ':' after mapping key"));
            }

            let value = self.value()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.bump() {
                Some(b',') => {
                    // Tolerate a trailing comma before the closing brace.
                    self.skip_whitespace();
                    if self.peek() == Some(b'}') {
                        self.bump();
                        return Ok(Value::Object(map));
                    }
                }
                Some(b'}') => return Ok(Value::Object(map)),
                _ => return Err(self.error("expected ',' or '}' in mapping")),
            }
        }
    }

    fn sequence(&mut self, open: u8, close: u8) -> Result<Value, LiteralError> {
        debug_assert_eq!(self.peek(), Some(open));
        self.bump();
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(close) {
            self.bump();
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.value()?);
            self.skip_whitespace();
            match self.bump() {
                Some(b',') => {
                    self.skip_whitespace();
                    if self.peek() == Some(close) {
                        self.bump();
                        return Ok(Value::Array(items));
                    }
                }
                Some(b) if b == close => return Ok(Value::Array(items)),
                _ => return Err(self.error("expected ',' or closing bracket in list")),
            }
        }
    }

    fn string(&mut self) -> Result<String, LiteralError> {
        let quote = self.bump().ok_or_else(|| self.error("expected string"))?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(b) if b == quote => return Ok(out),
                Some(b'\\') => match self.bump() {
                    Some(b'n') => out.push('\n'),
                    Some(b't') => out.push('\t'),
                    Some(b'r') => out.push('\r'),
                    Some(b'\\') => out.push('\\'),
                    Some(b'\'') => out.push('\''),
                    Some(b'"') => out.push('"'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other as char);
                    }
                    None => return Err(self.error("unterminated escape")),
                },
                Some(b) => {
                    // Collect multi-byte UTF-8 sequences verbatim.
                    let start = self.pos - 1;
                    let width = utf8_width(b);
                    let end = (start + width).min(self.bytes.len());
                    self.pos = end;
                    match std::str::from_utf8(&self.bytes[start..end]) {
                        Ok(s) => out.push_str(s),
                        Err(_) => return Err(self.error("invalid utf-8 in string")),
                    }
                }
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.bump();
        }
        let mut is_float = false;
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => {
                    self.bump();
                }
                b'.' => {
                    is_float = true;
                    self.bump();
                }
                b'e' | b'E' => {
                    is_float = true;
                    self.bump();
                    if matches!(self.peek(), Some(b'-' | b'+')) {
                        self.bump();
                    }
                }
                _ => break,
            }
        }

        let raw = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| self.error("invalid number"))?;

        if !is_float {
            if let Ok(i) = raw.parse::<i64>() {
                return Ok(Value::Number(Number::from(i)));
            }
        }
        let f = raw
            .parse::<f64>()
            .map_err(|_| self.error("invalid number"))?;
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| self.error("non-finite number"))
    }

    fn keyword(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.bump();
        }
        let word = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| self.error("invalid keyword"))?;
        match word {
            "true" | "True" => Ok(Value::Bool(true)),
            "false" | "False" => Ok(Value::Bool(false)),
            "null" | "None" => Ok(Value::Null),
            _ => Err(LiteralError {
                offset: start,
                message: format!("unrecognized token: {word}"),
            }),
        }
    }
}

fn utf8_width(first: u8) -> usize {
    match first {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_json_accepted() {
        assert_eq!(
            parse_value(r#"{"A": 0, "B": 5}"#).unwrap(),
            json!({"A": 0, "B": 5})
        );
        assert_eq!(parse_value("[1, 2, 3]").unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_python_style_literals() {
        assert_eq!(
            parse_value("{'A': 0, 'B': 5.5}").unwrap(),
            json!({"A": 0, "B": 5.5})
        );
        assert_eq!(
            parse_value("[True, False, None]").unwrap(),
            json!([true, false, null])
        );
    }

    #[test]
    fn test_tuples_become_lists() {
        assert_eq!(
            parse_value("[(0, 1), (2, 3)]").unwrap(),
            json!([[0, 1], [2, 3]])
        );
    }

    #[test]
    fn test_numeric_keys_become_strings() {
        assert_eq!(parse_value("{1: 'a'}").unwrap(), json!({"1": "a"}));
    }

    #[test]
    fn test_nested_and_trailing_comma() {
        assert_eq!(
            parse_value("{'xs': [1, 2,], 'ok': True,}").unwrap(),
            json!({"xs": [1, 2], "ok": true})
        );
    }

    #[test]
    fn test_scientific_notation_and_signs() {
        assert_eq!(parse_value("-1.5e3").unwrap(), json!(-1500.0));
        assert_eq!(parse_value("+2").unwrap(), json!(2));
        assert_eq!(parse_value("42").unwrap(), json!(42));
    }

    #[test]
    fn test_malformed_inputs_error_not_panic() {
        let cases = [
            "",
            "{",
            "[1, 2",
            "{'a': }",
            "{'a' 1}",
            "'unterminated",
            "lambda x: x",
            "__import__('os')",
            "1 + 1",
            "{'a': 1} extra",
            "nul",
        ];
        for case in cases {
            assert!(parse_value(case).is_err(), "should reject: {case}");
        }
    }

    #[test]
    fn test_typed_accessors() {
        assert!(parse_object("{'a': 1}").is_ok());
        assert!(parse_object("[1]").is_err());
        assert!(parse_array("(1, 2)").is_ok());
        assert!(parse_array("{'a': 1}").is_err());
    }

    #[test]
    fn test_unicode_strings() {
        assert_eq!(parse_value("'A → B'").unwrap(), json!("A → B"));
    }
}
