// src/ingest/dataset.rs
//
// The scraped dataset on disk: one JSON object keyed by movie page title,
// each value an object of fields with a nested `scare` sub-mapping
// (timestamp → { desc, major }).

use crate::datatypes::records::fields;
use crate::datatypes::{Attributes, RawRecord, ScareEvent, Value};
use crate::error::{GraphError, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Prefix the detail pages put in front of every movie title.
pub const DEFAULT_TITLE_PREFIX: &str = "Jump Scares In ";

#[derive(Debug, Deserialize)]
struct RawScare {
    #[serde(default)]
    desc: String,
    #[serde(default)]
    major: bool,
}

/// Records that loaded cleanly plus the entries that were rejected.
#[derive(Debug, Default)]
pub struct Dataset {
    pub records: Vec<RawRecord>,
    pub rejected: Vec<GraphError>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn clean_title(key: &str, prefix: &str) -> String {
    key.strip_prefix(prefix).unwrap_or(key).trim().to_string()
}

fn scare_events(value: serde_json::Value) -> std::result::Result<Vec<ScareEvent>, serde_json::Error> {
    let scares: BTreeMap<String, RawScare> = serde_json::from_value(value)?;
    Ok(scares
        .into_iter()
        .map(|(timestamp, scare)| ScareEvent {
            timestamp,
            description: scare.desc,
            major: scare.major,
        })
        .collect())
}

/// JSON → attribute value. Only the `scare` field is read as events.
pub fn convert_field(name: &str, value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int64(i),
            None => n.as_f64().map(Value::Float64).unwrap_or(Value::Null),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::List(
            items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        ),
        obj @ serde_json::Value::Object(_) if name == fields::SCARES => {
            let text = obj.to_string();
            scare_events(obj).map(Value::Events).unwrap_or_else(|err| {
                tracing::warn!(%err, "unreadable scare list kept as text");
                Value::String(text)
            })
        }
        other => Value::String(other.to_string()),
    }
}

/// Converts one dataset entry; an empty title or a non-object body is a
/// `MalformedRecord`.
pub fn parse_entry(key: &str, body: serde_json::Value, prefix: &str) -> Result<RawRecord> {
    let title = clean_title(key, prefix);
    if title.is_empty() {
        return Err(GraphError::MalformedRecord {
            entry: key.to_string(),
            reason: "empty title".to_string(),
        });
    }
    let serde_json::Value::Object(map) = body else {
        return Err(GraphError::MalformedRecord {
            entry: title,
            reason: "record is not an object".to_string(),
        });
    };
    let fields: Attributes = map
        .into_iter()
        .map(|(name, value)| {
            let converted = convert_field(&name, value);
            (name, converted)
        })
        .collect();
    Ok(RawRecord { title, fields })
}

pub fn parse_dataset(root: serde_json::Value, prefix: &str) -> Result<Dataset> {
    let serde_json::Value::Object(entries) = root else {
        return Err(GraphError::MalformedRecord {
            entry: "<root>".to_string(),
            reason: "dataset must be an object keyed by movie title".to_string(),
        });
    };

    let mut dataset = Dataset::default();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (key, body) in entries {
        match parse_entry(&key, body, prefix) {
            Ok(record) => match positions.get(&record.title) {
                // Two keys cleaning to one title: the later entry replaces
                // the earlier one, and the replaced entry is reported.
                Some(&pos) => {
                    let err = GraphError::MalformedRecord {
                        entry: record.title.clone(),
                        reason: format!("duplicate title, replaced by entry '{}'", key),
                    };
                    tracing::warn!(%err, "replacing dataset entry");
                    dataset.rejected.push(err);
                    dataset.records[pos] = record;
                }
                None => {
                    positions.insert(record.title.clone(), dataset.records.len());
                    dataset.records.push(record);
                }
            },
            Err(err) => {
                tracing::warn!(%err, "skipping dataset entry");
                dataset.rejected.push(err);
            }
        }
    }
    Ok(dataset)
}

pub fn load_dataset<P: AsRef<Path>>(path: P, prefix: &str) -> Result<Dataset> {
    let file = File::open(path.as_ref())?;
    let root: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
    let dataset = parse_dataset(root, prefix)?;
    tracing::info!(
        path = %path.as_ref().display(),
        records = dataset.len(),
        rejected = dataset.rejected.len(),
        "loaded dataset"
    );
    Ok(dataset)
}
