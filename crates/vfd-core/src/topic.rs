//! Normalization of the `ai_category_topic` column.
//!
//! The source table stores the topic either as a plain label, as a JSON
//! array, or as the textual form of a list (e.g. `"['Legenda', 'Corte']"`).
//! Charts need exactly one label per row, so the first element wins and
//! anything unparseable falls back to the raw text unchanged. Parsing is
//! per-row and infallible: a malformed value on one row never affects
//! another.

use serde_json::Value;

/// Outcome of interpreting a string as a list literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLiteral {
    /// A non-empty list; carries the first element.
    First(String),
    /// A well-formed empty list (`[]`).
    Empty,
    /// Not a well-formed list literal.
    Malformed,
}

/// Parses the FIRST element out of a list-literal string.
///
/// Deliberately a micro-grammar, not a general literal evaluator: the
/// input must start with `[`, the first element is either quoted
/// (`'`/`"`, backslash escapes) or bare (up to the next `,` or `]`), and
/// a separator must follow it. Nothing past the first element is parsed.
#[must_use]
pub fn first_list_element(raw: &str) -> ListLiteral {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix('[') else {
        return ListLiteral::Malformed;
    };
    let body = body.trim_start();
    if let Some(rest) = body.strip_prefix(']') {
        return if rest.trim().is_empty() {
            ListLiteral::Empty
        } else {
            ListLiteral::Malformed
        };
    }

    let mut chars = body.chars();
    match chars.next() {
        Some(quote @ ('\'' | '"')) => {
            let mut element = String::new();
            let mut escaped = false;
            for c in chars.by_ref() {
                if escaped {
                    element.push(c);
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == quote {
                    // The element must be followed by a separator or the
                    // list terminator.
                    let rest = chars.as_str().trim_start();
                    return if rest.starts_with(',') || rest.starts_with(']') {
                        ListLiteral::First(element)
                    } else {
                        ListLiteral::Malformed
                    };
                } else {
                    element.push(c);
                }
            }
            // Unterminated quote.
            ListLiteral::Malformed
        }
        Some(_) => match body.find([',', ']']) {
            Some(end) => {
                let element = body[..end].trim();
                if element.is_empty() {
                    ListLiteral::Malformed
                } else {
                    ListLiteral::First(element.to_string())
                }
            }
            None => ListLiteral::Malformed,
        },
        None => ListLiteral::Malformed,
    }
}

/// Collapses a raw topic value to a single display label.
///
/// - list-literal string with ≥1 element ⇒ that first element;
/// - any other string (including `"[]"` and malformed list-likes) ⇒ the
///   string unchanged;
/// - JSON array ⇒ coercion of its first element, `"[]"` when empty;
/// - `null` ⇒ `"None"`; numbers and booleans ⇒ their display form.
#[must_use]
pub fn normalize_topic(raw: &Value) -> String {
    match raw {
        Value::Null => "None".to_string(),
        Value::String(s) => {
            if s.trim_start().starts_with('[') {
                match first_list_element(s) {
                    ListLiteral::First(element) => element,
                    ListLiteral::Empty | ListLiteral::Malformed => s.clone(),
                }
            } else {
                s.clone()
            }
        }
        Value::Array(items) => match items.first() {
            Some(first) => coerce_scalar(first),
            None => "[]".to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(_) => raw.to_string(),
    }
}

/// String coercion for a single array element (strings unquoted, the
/// rest rendered as JSON text).
fn coerce_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
