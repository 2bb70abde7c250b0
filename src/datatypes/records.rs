// src/datatypes/records.rs
use super::values::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name → value mapping for one movie.
pub type Attributes = BTreeMap<String, Value>;

/// Field names used by the scraped dataset.
pub mod fields {
    pub const IMDB: &str = "imdb";
    pub const TOMATO: &str = "tomato";
    pub const RUNTIME: &str = "Runtime";
    pub const JUMP_SCARES: &str = "Jump Scares";
    pub const MAJOR_JUMP_SCARES: &str = "Major Jump Scares";
    pub const MINOR_JUMP_SCARES: &str = "Minor Jump Scares";
    pub const SCARE_RATING: &str = "Scare Rating";
    pub const DIRECTOR: &str = "Director";
    pub const DIRECTORS: &str = "Directors";
    pub const TAGS: &str = "Tags";
    pub const SCARES: &str = "scare";
    pub const LINK: &str = "link";
    /// Pseudo-field exposing the node category.
    pub const IS_INSTANCE: &str = "is_instance";
}

/// Numeric fields averaged onto person and tag nodes unless configured otherwise.
pub const DEFAULT_AGGREGATE_FIELDS: [&str; 7] = [
    fields::IMDB,
    fields::TOMATO,
    fields::JUMP_SCARES,
    fields::MAJOR_JUMP_SCARES,
    fields::MINOR_JUMP_SCARES,
    fields::RUNTIME,
    fields::SCARE_RATING,
];

/// A movie as read from the dataset, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub title: String,
    pub fields: Attributes,
}

impl RawRecord {
    pub fn new(title: impl Into<String>) -> Self {
        RawRecord {
            title: title.into(),
            fields: Attributes::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn with_text(self, name: &str, value: &str) -> Self {
        self.with_field(name, Value::String(value.to_string()))
    }
}

/// A movie whose fields have been parsed into typed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub attributes: Attributes,
}

impl MovieRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    /// Hands the record back as raw input, e.g. to re-run normalization.
    pub fn into_raw(self) -> RawRecord {
        RawRecord {
            title: self.title,
            fields: self.attributes,
        }
    }
}
