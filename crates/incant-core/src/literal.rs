//! Strict, bounded parser for the candidate literal dialect.
//!
//! Generated candidates are expected to be a single dictionary literal in a
//! JSON/Python-compatible spelling: string keys, nested dicts and lists,
//! single- or double-quoted strings, integers, floats, `true`/`True`,
//! `false`/`False` and `null`/`None`, with optional trailing commas. Nothing
//! outside that closed set is evaluated; the parser never executes anything
//! and rejects unknown tokens outright.
//!
//! Two hard bounds protect against pathological output from an untrusted
//! generator: total input size ([`MAX_INPUT_LEN`]) and nesting depth
//! ([`MAX_DEPTH`]). A markdown code fence wrapped around the candidate is
//! stripped before parsing, since chat models fence their output routinely;
//! the content itself is still parsed strictly.

use serde_json::{Map, Number, Value};

use crate::{error::CandidateParseError, validate::kind_name};

/// Maximum accepted candidate size in bytes, after fence stripping.
pub const MAX_INPUT_LEN: usize = 64 * 1024;

/// Maximum nesting depth of dict/list literals.
pub const MAX_DEPTH: usize = 16;

/// Parse a candidate into a key/value mapping.
///
/// The top-level value must be a dictionary literal; anything else (including
/// trailing non-whitespace after the literal) is a [`CandidateParseError`].
pub fn parse_mapping(input: &str) -> Result<Map<String, Value>, CandidateParseError> {
    let body = strip_code_fence(input.trim());
    if body.len() > MAX_INPUT_LEN {
        return Err(CandidateParseError {
            offset: 0,
            message: format!(
                "candidate of {} bytes exceeds the {MAX_INPUT_LEN} byte limit",
                body.len()
            ),
        });
    }

    let mut parser = Parser { src: body, pos: 0 };
    parser.skip_ws();
    let value = parser.parse_value(0)?;
    parser.skip_ws();
    if parser.pos != body.len() {
        return Err(parser.err("trailing characters after the literal"));
    }

    match value {
        Value::Object(map) => Ok(map),
        other => Err(CandidateParseError {
            offset: 0,
            message: format!("expected a mapping literal, got {}", kind_name(&other)),
        }),
    }
}

/// Remove one surrounding markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(newline) = rest.find('\n') else {
        return text;
    };
    let body = rest[newline + 1..].trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn err(&self, message: impl Into<String>) -> CandidateParseError {
        CandidateParseError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.bump();
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, CandidateParseError> {
        if depth > MAX_DEPTH {
            return Err(self.err(format!("nesting exceeds {MAX_DEPTH} levels")));
        }
        match self.peek() {
            Some(b'{') => self.parse_dict(depth),
            Some(b'[') => self.parse_list(depth),
            Some(b'\'' | b'"') => Ok(Value::String(self.parse_string()?)),
            Some(c) if c == b'-' || c.is_ascii_digit() => self.parse_number(),
            Some(_) => self.parse_keyword(),
            None => Err(self.err("unexpected end of input")),
        }
    }

    fn parse_dict(&mut self, depth: usize) -> Result<Value, CandidateParseError> {
        self.bump(); // consumes `{`
        let mut map = Map::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some(b'}') => {
                    self.bump();
                    return Ok(Value::Object(map));
                }
                Some(b'\'' | b'"') => {}
                Some(_) => return Err(self.err("mapping keys must be string literals")),
                None => return Err(self.err("unterminated mapping literal")),
            }
            let key = self.parse_string()?;
            self.skip_ws();
            if self.peek() != Some(b':') {
                return Err(self.err("expected `:` after mapping key"));
            }
            self.bump();
            self.skip_ws();
            let value = self.parse_value(depth + 1)?;
            // Last occurrence wins, as in the source dialect.
            map.insert(key, value);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.bump(),
                Some(b'}') => {
                    self.bump();
                    return Ok(Value::Object(map));
                }
                Some(_) => return Err(self.err("expected `,` or `}` in mapping literal")),
                None => return Err(self.err("unterminated mapping literal")),
            }
        }
    }

    fn parse_list(&mut self, depth: usize) -> Result<Value, CandidateParseError> {
        self.bump(); // consumes `[`
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(b']') {
                self.bump();
                return Ok(Value::Array(items));
            }
            items.push(self.parse_value(depth + 1)?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.bump(),
                Some(b']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(_) => return Err(self.err("expected `,` or `]` in list literal")),
                None => return Err(self.err("unterminated list literal")),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, CandidateParseError> {
        let quote = self.peek().expect("caller checked the opening quote");
        self.bump();
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.err("unterminated string literal")),
                Some(b) if b == quote => {
                    self.bump();
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.bump();
                    out.push(self.parse_escape()?);
                }
                Some(_) => {
                    let ch = self.src[self.pos..]
                        .chars()
                        .next()
                        .expect("pos is on a char boundary");
                    out.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char, CandidateParseError> {
        let Some(b) = self.peek() else {
            return Err(self.err("unterminated escape sequence"));
        };
        self.bump();
        match b {
            b'n' => Ok('\n'),
            b't' => Ok('\t'),
            b'r' => Ok('\r'),
            b'0' => Ok('\0'),
            b'\\' => Ok('\\'),
            b'\'' => Ok('\''),
            b'"' => Ok('"'),
            b'u' => {
                let hex = self
                    .src
                    .get(self.pos..self.pos + 4)
                    .filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()))
                    .ok_or_else(|| self.err("expected four hex digits after `\\u`"))?;
                let code = u32::from_str_radix(hex, 16).expect("hex digits checked");
                self.pos += 4;
                char::from_u32(code).ok_or_else(|| self.err("invalid unicode escape"))
            }
            other => Err(self.err(format!("unsupported escape `\\{}`", other as char))),
        }
    }

    fn parse_number(&mut self) -> Result<Value, CandidateParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.bump();
        }
        let mut is_float = false;
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => self.bump(),
                b'.' | b'e' | b'E' => {
                    is_float = true;
                    self.bump();
                }
                b'+' | b'-' if is_float => self.bump(),
                _ => break,
            }
        }
        let text = &self.src[start..self.pos];
        if is_float {
            let parsed: f64 = text
                .parse()
                .map_err(|_| self.err(format!("malformed float literal `{text}`")))?;
            Number::from_f64(parsed)
                .map(Value::Number)
                .ok_or_else(|| self.err("non-finite float literal"))
        } else {
            let parsed: i64 = text
                .parse()
                .map_err(|_| self.err(format!("malformed or out-of-range integer `{text}`")))?;
            Ok(Value::Number(parsed.into()))
        }
    }

    fn parse_keyword(&mut self) -> Result<Value, CandidateParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphabetic()) {
            self.bump();
        }
        let word = &self.src[start..self.pos];
        match word {
            "true" | "True" => Ok(Value::Bool(true)),
            "false" | "False" => Ok(Value::Bool(false)),
            "null" | "None" => Ok(Value::Null),
            "" => Err(self.err("unexpected character")),
            other => {
                self.pos = start;
                Err(self.err(format!("unexpected token `{other}`")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_python_spelling() {
        let map = parse_mapping("{'name': 'widgets', 'count': 3, 'done': True, 'note': None}")
            .unwrap();
        assert_eq!(map["name"], json!("widgets"));
        assert_eq!(map["count"], json!(3));
        assert_eq!(map["done"], json!(true));
        assert_eq!(map["note"], Value::Null);
    }

    #[test]
    fn parses_json_spelling_with_nesting() {
        let map = parse_mapping(
            r#"{"sections": [{"name": "A", "tasks": []}], "weight": -2.5, "big": 1e3}"#,
        )
        .unwrap();
        assert_eq!(map["sections"][0]["name"], json!("A"));
        assert_eq!(map["weight"], json!(-2.5));
        assert_eq!(map["big"], json!(1000.0));
    }

    #[test]
    fn accepts_trailing_commas_and_mixed_quotes() {
        let map = parse_mapping("{'a': [1, 2, 3,], \"b\": 'it\\'s',}").unwrap();
        assert_eq!(map["a"], json!([1, 2, 3]));
        assert_eq!(map["b"], json!("it's"));
    }

    #[test]
    fn strips_a_surrounding_code_fence() {
        let map = parse_mapping("```json\n{'name': 'widgets'}\n```").unwrap();
        assert_eq!(map["name"], json!("widgets"));
    }

    #[test]
    fn rejects_non_mapping_top_level() {
        let err = parse_mapping("[1, 2, 3]").unwrap_err();
        assert!(err.message.contains("expected a mapping literal, got list"));
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err = parse_mapping("{'a': 1} and then some").unwrap_err();
        assert!(err.message.contains("trailing characters"));
        assert_eq!(err.offset, 9);
    }

    #[test]
    fn rejects_unquoted_keys_and_unknown_tokens() {
        assert!(parse_mapping("{a: 1}")
            .unwrap_err()
            .message
            .contains("string literals"));
        assert!(parse_mapping("{'a': undefined}")
            .unwrap_err()
            .message
            .contains("`undefined`"));
    }

    #[test]
    fn rejects_function_call_lookalikes() {
        // Anything that is not a closed literal must fail, not evaluate.
        let err = parse_mapping("{'a': dict(b=1)}").unwrap_err();
        assert!(err.message.contains("`dict`"));
    }

    #[test]
    fn depth_bound_is_enforced() {
        let mut nested = String::from("{'a': 0}");
        for _ in 0..MAX_DEPTH + 1 {
            nested = format!("{{'a': {nested}}}");
        }
        let err = parse_mapping(&nested).unwrap_err();
        assert!(err.message.contains("nesting exceeds"));
    }

    #[test]
    fn size_bound_is_enforced() {
        let huge = format!("{{'a': '{}'}}", "x".repeat(MAX_INPUT_LEN));
        let err = parse_mapping(&huge).unwrap_err();
        assert!(err.message.contains("byte limit"));
    }

    #[test]
    fn unicode_escapes_and_raw_unicode_pass_through() {
        let map = parse_mapping("{'s': '\\u00e9clair \u{1F980}'}").unwrap();
        assert_eq!(map["s"], json!("éclair 🦀"));
    }

    #[test]
    fn empty_mapping_parses() {
        assert!(parse_mapping("{}").unwrap().is_empty());
    }
}
