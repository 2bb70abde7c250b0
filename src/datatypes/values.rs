// src/datatypes/values.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// One timed scare from a movie's detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScareEvent {
    pub timestamp: String,
    pub description: String,
    pub major: bool,
}

/// Typed attribute value stored on graph nodes.
///
/// `Null` is the undefined sentinel: the field is present but carries no
/// usable value (e.g. a Rotten Tomatoes score of "N/A"). An absent key is a
/// different thing and is represented by the key missing from the map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int64(i64),
    Float64(f64),
    String(String),
    Boolean(bool),
    List(Vec<String>),
    Events(Vec<ScareEvent>),
    Null,
}

impl Value {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Numeric view used by aggregation and chart sizing. NaN counts as undefined.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(i) => Some(*i as f64),
            Value::Float64(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float64(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Plain JSON rendering for export (no enum tags).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Int64(i) => serde_json::Value::from(*i),
            Value::Float64(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::List(items) => serde_json::Value::from(items.clone()),
            Value::Events(events) => serde_json::Value::Array(
                events
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "timestamp": e.timestamp,
                            "desc": e.description,
                            "major": e.major,
                        })
                    })
                    .collect(),
            ),
            Value::Null => serde_json::Value::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float64(v) => {
                if v.is_nan() {
                    write!(f, "NULL")
                } else {
                    // Debug keeps the decimal point on whole numbers: 90.0, not 90.
                    write!(f, "{:?}", v)
                }
            }
            Value::String(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::List(items) => write!(f, "{}", items.join(", ")),
            Value::Events(events) => {
                let lines: Vec<String> = events
                    .iter()
                    .map(|e| {
                        let marker = if e.major { " (major)" } else { "" };
                        format!("{} – {}{}", e.timestamp, e.description, marker)
                    })
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
            Value::Null => write!(f, "NULL"),
        }
    }
}
