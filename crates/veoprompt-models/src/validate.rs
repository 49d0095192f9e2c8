//! Construction-time validation with aggregated field defects.
//!
//! Serde deserialization stops at the first problem; constructing a prompt
//! from model-produced arguments must instead report every defective field
//! in one pass, so the mapping is walked manually here.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::params::{AspectRatio, Duration};

/// A single field-level problem found during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefect {
    /// Dotted path to the offending field, e.g. `subject.action`.
    pub field: String,
    /// What is wrong with it.
    pub problem: String,
}

impl FieldDefect {
    pub fn new(field: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            problem: problem.into(),
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "required field is missing")
    }

    pub(crate) fn empty(field: impl Into<String>) -> Self {
        Self::new(field, "required field is empty")
    }

    pub(crate) fn wrong_type(field: impl Into<String>, expected: &str) -> Self {
        Self::new(field, format!("expected {expected}"))
    }
}

impl fmt::Display for FieldDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Aggregate validation failure: every defective field, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema validation failed: {}", render_defects(.defects))]
pub struct ValidationError {
    pub defects: Vec<FieldDefect>,
}

impl ValidationError {
    pub fn new(defects: Vec<FieldDefect>) -> Self {
        Self { defects }
    }

    pub(crate) fn single(defect: FieldDefect) -> Self {
        Self {
            defects: vec![defect],
        }
    }

    /// Names of all defective fields, in reporting order.
    pub fn fields(&self) -> Vec<&str> {
        self.defects.iter().map(|d| d.field.as_str()).collect()
    }
}

fn render_defects(defects: &[FieldDefect]) -> String {
    defects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

pub(crate) fn required_section<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    defects: &mut Vec<FieldDefect>,
) -> Option<&'a Map<String, Value>> {
    match map.get(key) {
        None | Some(Value::Null) => {
            defects.push(FieldDefect::missing(key));
            None
        }
        Some(Value::Object(section)) => Some(section),
        Some(_) => {
            defects.push(FieldDefect::wrong_type(key, "an object"));
            None
        }
    }
}

pub(crate) fn optional_section<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    defects: &mut Vec<FieldDefect>,
) -> Option<&'a Map<String, Value>> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Object(section)) => Some(section),
        Some(_) => {
            defects.push(FieldDefect::wrong_type(key, "an object"));
            None
        }
    }
}

pub(crate) fn required_string(
    map: &Map<String, Value>,
    prefix: &str,
    key: &str,
    defects: &mut Vec<FieldDefect>,
) -> Option<String> {
    let path = join(prefix, key);
    match map.get(key) {
        None | Some(Value::Null) => {
            defects.push(FieldDefect::missing(path));
            None
        }
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                defects.push(FieldDefect::empty(path));
                None
            } else {
                Some(s.clone())
            }
        }
        Some(_) => {
            defects.push(FieldDefect::wrong_type(path, "a string"));
            None
        }
    }
}

// Empty optional strings are normalized to absent.
pub(crate) fn optional_string(
    map: &Map<String, Value>,
    prefix: &str,
    key: &str,
    defects: &mut Vec<FieldDefect>,
) -> Option<String> {
    let path = join(prefix, key);
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            defects.push(FieldDefect::wrong_type(path, "a string"));
            None
        }
    }
}

pub(crate) fn bool_field(
    map: &Map<String, Value>,
    key: &str,
    default: bool,
    defects: &mut Vec<FieldDefect>,
) -> bool {
    match map.get(key) {
        None | Some(Value::Null) => default,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => {
            defects.push(FieldDefect::wrong_type(key, "a boolean"));
            default
        }
    }
}

pub(crate) fn duration_field(
    map: &Map<String, Value>,
    defects: &mut Vec<FieldDefect>,
) -> Duration {
    match map.get("duration_seconds") {
        None | Some(Value::Null) => Duration::default(),
        Some(value) => match integral(value) {
            Some(seconds) => match Duration::try_from(seconds) {
                Ok(duration) => duration,
                Err(err) => {
                    defects.push(FieldDefect::new("duration_seconds", err.to_string()));
                    Duration::default()
                }
            },
            None => {
                defects.push(FieldDefect::wrong_type("duration_seconds", "an integer"));
                Duration::default()
            }
        },
    }
}

pub(crate) fn aspect_ratio_field(
    map: &Map<String, Value>,
    defects: &mut Vec<FieldDefect>,
) -> AspectRatio {
    match map.get("aspect_ratio") {
        None | Some(Value::Null) => AspectRatio::default(),
        Some(Value::String(s)) => match s.parse::<AspectRatio>() {
            Ok(ratio) => ratio,
            Err(err) => {
                defects.push(FieldDefect::new("aspect_ratio", err.to_string()));
                AspectRatio::default()
            }
        },
        Some(_) => {
            defects.push(FieldDefect::wrong_type("aspect_ratio", "a string"));
            AspectRatio::default()
        }
    }
}

pub(crate) fn string_list_field(
    map: &Map<String, Value>,
    key: &str,
    defects: &mut Vec<FieldDefect>,
) -> Option<Vec<String>> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) => out.push(s.clone()),
                    _ => defects.push(FieldDefect::wrong_type(
                        format!("{key}[{index}]"),
                        "a string",
                    )),
                }
            }
            Some(out)
        }
        Some(_) => {
            defects.push(FieldDefect::wrong_type(key, "an array of strings"));
            None
        }
    }
}

// Function-call arguments sometimes carry whole numbers as floats.
fn integral(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 => Some(f as i64),
        _ => None,
    }
}
