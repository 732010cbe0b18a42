//! Member row mapping and label formatting.

use serde_json::{Map, Value};

use crate::model::{Dimension, MemberValue};

/// Read `field` from a member row; absent fields are `null`.
pub fn row_field(row: &Map<String, Value>, field: &str) -> Value {
    row.get(field).cloned().unwrap_or(Value::Null)
}

/// Raw `{key, label}` pair for a row, as configured by the dimension.
pub fn raw_member(dimension: &Dimension, row: &Map<String, Value>) -> MemberValue {
    MemberValue {
        key: row_field(row, &dimension.key),
        label: row_field(row, &dimension.value_ref),
    }
}

/// Display member for a row: the label reads `"<key> - <label>"` when the row
/// has a non-empty label different from its key, otherwise it is the key.
pub fn display_member(dimension: &Dimension, row: &Map<String, Value>) -> MemberValue {
    let MemberValue { key, label } = raw_member(dimension, row);
    let label = member_label(&key, &label);
    MemberValue { key, label }
}

/// Label deduplication rule.
///
/// Keys and labels compare by value: a number equals a string that parses to
/// the same number, so a key `1` matches the labels `"1"` and `"01"`. Numbers
/// render without a fractional part when they are integral.
pub fn member_label(key: &Value, label: &Value) -> Value {
    if is_truthy(label) && !loosely_equal(key, label) {
        Value::String(format!("{} - {}", text(key), text(label)))
    } else {
        key.clone()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(_) | Value::Number(_) | Value::String(_), Value::Bool(_) | Value::Number(_))
        | (Value::Bool(_) | Value::Number(_), Value::String(_)) => {
            matches!((as_number(a), as_number(b)), (Some(x), Some(y)) if x == y)
        }
        _ => text(a) == text(b),
    }
}

/// Numeric value of a scalar; `None` for text that is not a finite number.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(0.0);
            }
            trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        other => other.to_string(),
    }
}

fn number_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}
