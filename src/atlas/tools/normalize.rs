//! Turns raw cells into trimmed, typed scalars.
//!
//! The `*_field` helpers never fail: problems are pushed onto the supplied
//! [`ValidationErrors`] and a default is returned so the pass can continue.

use serde_json::Value;
use thiserror::Error;

use crate::atlas::tools::error::ValidationErrors;
use crate::atlas::tools::model::{CellValue, Row};

/// Problem found while coercing a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("value missing")]
    Missing,
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
    #[error("cannot interpret '{0}' as a boolean")]
    InvalidBool(String),
}

/// Renders a cell as trimmed text. Integral numbers drop the fractional part.
pub fn cell_text(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Text(text) => text.trim().to_string(),
        CellValue::Number(number) => number.to_string(),
        CellValue::Bool(flag) => flag.to_string(),
    }
}

/// Converts a cell into JSON, keeping its native type. Integral numbers are
/// emitted as JSON integers.
pub fn cell_json(value: &CellValue) -> Value {
    match value {
        CellValue::Empty => Value::Null,
        CellValue::Text(text) => Value::String(text.trim().to_string()),
        CellValue::Number(number) if is_integral(*number) => Value::from(*number as i64),
        CellValue::Number(number) => serde_json::Number::from_f64(*number)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        CellValue::Bool(flag) => Value::Bool(*flag),
    }
}

fn is_integral(number: f64) -> bool {
    number.fract() == 0.0 && number.abs() < i64::MAX as f64
}

/// Returns the trimmed text of `column`, or `None` when the cell is blank.
pub fn text(row: &Row, column: &str) -> Option<String> {
    row.get(column)
        .filter(|value| !value.is_blank())
        .map(cell_text)
}

/// Returns the raw cell of `column` unless it is blank.
pub fn present<'a>(row: &'a Row, column: &str) -> Option<&'a CellValue> {
    row.get(column).filter(|value| !value.is_blank())
}

/// Reads a required text field, recording
/// `"<context>: required field '<column>' missing"` when it is blank.
pub fn require_field(
    row: &Row,
    column: &str,
    context: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let value = text(row, column);
    if value.is_none() {
        errors.push(format!("{context}: required field '{column}' missing"));
    }
    value
}

/// Coerces a cell into a boolean. Blank cells yield `default`.
pub fn parse_bool(value: Option<&CellValue>, default: bool) -> Result<bool, ValueError> {
    match value {
        None | Some(CellValue::Empty) => Ok(default),
        Some(CellValue::Bool(flag)) => Ok(*flag),
        Some(CellValue::Number(number)) => Ok(*number != 0.0),
        Some(CellValue::Text(raw)) => match raw.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" | "" => Ok(false),
            _ => Err(ValueError::InvalidBool(raw.trim().to_string())),
        },
    }
}

/// Coerces a cell into a float. Text accepts a comma as decimal separator.
pub fn parse_float(value: Option<&CellValue>) -> Result<f64, ValueError> {
    match value {
        None | Some(CellValue::Empty) => Err(ValueError::Missing),
        Some(CellValue::Number(number)) => Ok(*number),
        Some(CellValue::Bool(flag)) => Ok(if *flag { 1.0 } else { 0.0 }),
        Some(CellValue::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ValueError::Missing);
            }
            trimmed
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| ValueError::InvalidNumber(trimmed.to_string()))
        }
    }
}

/// Reads a boolean field, recording a value error and falling back to
/// `default` when the literal is not recognised.
pub fn bool_field(
    row: &Row,
    column: &str,
    context: &str,
    default: bool,
    errors: &mut ValidationErrors,
) -> bool {
    parse_bool(row.get(column), default).unwrap_or_else(|error| {
        errors.push(format!("{context} ({column}): {error}"));
        default
    })
}

/// Reads a numeric field, recording missing or invalid values and falling
/// back to `0.0`.
pub fn float_field(row: &Row, column: &str, context: &str, errors: &mut ValidationErrors) -> f64 {
    parse_float(row.get(column)).unwrap_or_else(|error| {
        errors.push(format!("{context} ({column}): {error}"));
        0.0
    })
}
