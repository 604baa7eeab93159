//! Action-Input decoding sub-rules shared by every strategy that extracts
//! a JSON-ish body from raw model text.
//!
//! The cascade is: find a balanced brace/bracket region and parse it
//! directly; failing that, clean up common near-JSON mistakes and retry;
//! failing that, rebuild an object from loose `key: value` pairs; failing
//! that, fall back to splitting on commas. A single bareword with none of
//! the above binds to a synthetic `value` key. Nothing in this module can
//! fail — every input produces *some* [`ActionInput`].

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use reagent_types::{ActionInput, Value};
use regex::Regex;

lazy_static! {
    static ref BLOCK_COMMENT: Regex = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    static ref LINE_COMMENT: Regex = Regex::new(r"//[^\n]*").unwrap();
    static ref SINGLE_QUOTED: Regex = Regex::new(r#"(^|[:,{\[\s])'([^']*)'"#).unwrap();
    static ref TRAILING_COMMA: Regex = Regex::new(r",(\s*[}\]])").unwrap();
    static ref BARE_KEY: Regex = Regex::new(r#"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)\s*:"#).unwrap();
    static ref KV_PAIR: Regex =
        Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)\s*[:=]\s*("[^"]*"|'[^']*'|[^,}\n\s]+)"#).unwrap();
}

/// Scan `text` for the first `{` or `[` and return the substring up to its
/// matching close, tracking string/escape state so braces inside string
/// literals don't throw the depth count off.
pub fn extract_balanced(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let rest = &text[start..];

    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;
    let mut end = None;

    for (i, ch) in rest.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' | '[' if !in_string => depth += 1,
            '}' | ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    end = Some(i + ch.len_utf8());
                    break;
                }
            }
            _ => {}
        }
    }

    end.map(|e| &rest[..e])
}

/// Apply the JSON near-miss cleanup rules, in the declared order.
pub fn clean_json(raw: &str) -> String {
    let no_block_comments = BLOCK_COMMENT.replace_all(raw, "");
    let no_comments = LINE_COMMENT.replace_all(&no_block_comments, "");
    let double_quoted = SINGLE_QUOTED.replace_all(&no_comments, "$1\"$2\"");
    let no_trailing_commas = TRAILING_COMMA.replace_all(&double_quoted, "$1");
    let quoted_keys = BARE_KEY.replace_all(&no_trailing_commas, "$1\"$2\":");
    quoted_keys.replace("\"\"", "\"")
}

/// Parse a bare scalar token: strip surrounding quotes, then try number,
/// then boolean, else treat as a string.
pub fn parse_scalar(token: &str) -> Value {
    let trimmed = token.trim();
    let unquoted = strip_quotes(trimmed);

    if let Ok(n) = unquoted.parse::<f64>() {
        return Value::Number(n);
    }
    match unquoted.to_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }
    Value::String(unquoted.to_string())
}

fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Extract `key [:=] value` pairs from unstructured text and rebuild a
/// valid JSON-shaped map. Values are stringified unless they parse as a
/// number, boolean, or `null`.
pub fn aggressive_rebuild(text: &str) -> BTreeMap<String, Value> {
    let mut map = BTreeMap::new();
    for caps in KV_PAIR.captures_iter(text) {
        let key = caps[1].to_string();
        let value = parse_scalar(&caps[2]);
        map.insert(key, value);
    }
    map
}

/// Split `text` on commas, then each piece on the first `=` or `:`, and
/// coerce each value with [`parse_scalar`].
pub fn key_value_fallback(text: &str) -> BTreeMap<String, Value> {
    let mut map = BTreeMap::new();
    for piece in text.split(',') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let split_at = piece.find(['=', ':']);
        match split_at {
            Some(idx) => {
                let key = piece[..idx].trim();
                let value = &piece[idx + 1..];
                if !key.is_empty() {
                    map.insert(key.to_string(), parse_scalar(value));
                }
            }
            None => {
                // A single bareword with no separator binds to a synthetic key.
                map.insert("value".to_string(), parse_scalar(piece));
            }
        }
    }
    map
}

/// Decode an `Action Input:` body into an [`ActionInput`], trying strict
/// JSON first and degrading through the cleanup cascade. Never fails.
pub fn decode_action_input(text: &str) -> ActionInput {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ActionInput::empty();
    }

    if let Some(value) = try_strict_json(trimmed) {
        return value;
    }

    let cleaned = clean_json(trimmed);
    if let Some(value) = try_strict_json(cleaned.trim()) {
        return value;
    }

    let rebuilt = aggressive_rebuild(trimmed);
    if !rebuilt.is_empty() {
        return ActionInput::new(rebuilt);
    }

    ActionInput::new(key_value_fallback(trimmed))
}

/// Attempt strict (non-cleaned) JSON decoding of a balanced region inside
/// `text`. Returns `None` rather than falling back — callers chain the
/// remaining cascade steps themselves.
pub fn try_strict_json(text: &str) -> Option<ActionInput> {
    let candidate = extract_balanced(text).unwrap_or(text);
    let parsed: serde_json::Value = serde_json::from_str(candidate).ok()?;
    Some(match parsed {
        serde_json::Value::Object(_) => ActionInput::from_json_object(&parsed),
        other => {
            let mut map = BTreeMap::new();
            map.insert("value".to_string(), Value::from_json(&other));
            ActionInput::new(map)
        }
    })
}
