//! Coercion between element kinds.
//!
//! These helpers give every value a numeric, textual, boolean and date
//! reading. The numeric reading mirrors loose `Number(x)` semantics:
//! numeric-looking strings become numbers, blank strings become `0`,
//! anything unreadable becomes `NaN`. Only digit-based literals count as
//! numbers: words such as `nan` or `inf` stay text, except the exact
//! `Infinity` spellings that [`format_number`] writes. No locale handling
//! happens here;
//! [`normalize_decimal_comma`] is offered to encoders that need it.

use itertools::Itertools;
use nom::{
    IResult, Parser,
    character::complete::{char, digit1},
    combinator::{all_consuming, opt, recognize},
    number::complete::{double, recognize_float},
};

use super::{
    Value,
    date::{DateConvention, epoch_millis, from_epoch_millis},
};

/// Reads a string as a number. Blank input reads as `0`.
///
/// The text must be a decimal literal (optional sign, digits, fraction,
/// exponent); `nan`, `inf` and `infinity` in any case are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    let literal: IResult<&str, &str> = all_consuming(recognize_float).parse(trimmed);
    let (_, literal) = literal.ok()?;
    let parsed: IResult<&str, f64> = all_consuming(double).parse(literal);
    parsed.ok().map(|(_, number)| number)
}

/// True when the text holds a number (blank text does not count).
pub fn looks_numeric(text: &str) -> bool {
    !text.trim().is_empty() && parse_number(text).is_some()
}

/// Rewrites `"3,25"` into `"3.25"`. Returns `None` when the text is not a
/// plain decimal-comma number.
pub fn normalize_decimal_comma(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let parsed: IResult<&str, &str> = all_consuming(recognize((
        opt(char('-')),
        digit1,
        char(','),
        digit1,
    )))
    .parse(trimmed);
    parsed.ok().map(|(_, number)| number.replace(',', "."))
}

/// Numeric reading of any value.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Boolean(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => *n,
        Value::String(s) => match s.trim() {
            "Infinity" | "+Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            other => parse_number(other).unwrap_or(f64::NAN),
        },
        Value::Date(date) => epoch_millis(date) as f64,
        _ => f64::NAN,
    }
}

/// Formats a number the way it is written back to text.
pub fn format_number(n: f64) -> String {
    if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        format!("{}", n)
    }
}

/// Textual reading of any value. `Null` reads as the empty string.
pub fn to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Boolean(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        Value::Date(date) => DateConvention::default().format(date),
        Value::Point(point) => point.to_string(),
        Value::Interval(interval) => interval.to_string(),
        Value::Node(node) => node.name.clone(),
        Value::Relation(relation) => relation.name.clone(),
        Value::Object(properties) => format!(
            "{{{}}}",
            properties
                .iter()
                .map(|(key, value)| format!("{}: {}", key, to_string(value)))
                .join(", ")
        ),
        Value::Container(container) => container.to_values().iter().map(to_string).join(","),
    }
}

/// Date reading of any value: dates pass through, numbers are epoch
/// milliseconds, strings are parsed under `convention`.
pub fn to_date(value: &Value, convention: &DateConvention) -> Option<chrono::NaiveDateTime> {
    match value {
        Value::Date(date) => Some(*date),
        Value::Number(n) if n.is_finite() => from_epoch_millis(*n as i64),
        Value::String(s) => convention.parse(s),
        _ => None,
    }
}

/// Boolean reading of any value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Boolean(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Reads a raw text cell: numeric-looking text becomes a number, anything
/// else stays a string.
pub fn infer(text: &str) -> Value {
    if looks_numeric(text) {
        parse_number(text)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(text.to_string()))
    } else {
        Value::String(text.to_string())
    }
}
