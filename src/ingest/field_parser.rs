// src/ingest/field_parser.rs
//
// Classifies the text blocks of a movie detail page into known field
// shapes. Fetching and HTML extraction happen upstream; a block arrives as
// its text plus whether its first run was emphasized (bold marks a major
// scare).

use crate::datatypes::records::fields;
use crate::datatypes::{RawRecord, ScareEvent, Value};
use crate::graph::reporting::{FieldIssue, IssueKind};
use regex::Regex;
use std::sync::LazyLock;

static SCARE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2}:\d{2}(?::\d{2})?)\s*[-–]\s*(.+?)\s*$").expect("valid regex")
});
static IMDB_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)imdb[^:]*:\s*(\S+)").expect("valid regex"));
static TOMATO_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Rotten Tomatoes:\s*(\S+)").expect("valid regex"));
static KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^:\n]{1,40}?)\s*:\s*(.+?)\s*$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub text: String,
    pub emphasized: bool,
}

impl TextBlock {
    pub fn plain(text: &str) -> Self {
        TextBlock {
            text: text.to_string(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: &str) -> Self {
        TextBlock {
            text: text.to_string(),
            emphasized: true,
        }
    }
}

/// The known shapes a detail-page block can take.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapedField {
    Tags(Vec<String>),
    ScareEvent(ScareEvent),
    Ratings {
        imdb: Option<String>,
        tomato: Option<String>,
    },
    Attribute {
        name: String,
        value: String,
    },
    Unrecognized(String),
}

fn parse_tags(text: &str) -> Option<ScrapedField> {
    let (_, list) = text.split_once("Tags:")?;
    let tags = list
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    Some(ScrapedField::Tags(tags))
}

fn parse_scare(block: &TextBlock) -> Option<ScrapedField> {
    let caps = SCARE_LINE.captures(&block.text)?;
    Some(ScrapedField::ScareEvent(ScareEvent {
        timestamp: caps[1].to_string(),
        description: caps[2].to_string(),
        major: block.emphasized,
    }))
}

fn parse_ratings(text: &str) -> Option<ScrapedField> {
    let imdb = IMDB_SCORE.captures(text).map(|c| c[1].to_string());
    let tomato = TOMATO_SCORE.captures(text).map(|c| c[1].to_string());
    if imdb.is_none() && tomato.is_none() {
        return None;
    }
    Some(ScrapedField::Ratings { imdb, tomato })
}

fn parse_attribute(text: &str) -> Option<ScrapedField> {
    let caps = KEY_VALUE.captures(text)?;
    Some(ScrapedField::Attribute {
        name: caps[1].to_string(),
        value: caps[2].to_string(),
    })
}

/// Tries each known pattern in turn; the first match wins.
pub fn classify(block: &TextBlock) -> ScrapedField {
    parse_tags(&block.text)
        .or_else(|| parse_scare(block))
        .or_else(|| parse_ratings(&block.text))
        .or_else(|| parse_attribute(&block.text))
        .unwrap_or_else(|| ScrapedField::Unrecognized(block.text.trim().to_string()))
}

/// Builds a raw record from a detail page. Unrecognized blocks are returned
/// as `UnrecognizedField` issues rather than dropped silently.
pub fn collect_record(title: &str, link: &str, blocks: &[TextBlock]) -> (RawRecord, Vec<FieldIssue>) {
    let mut record = RawRecord::new(title).with_text(fields::LINK, link);
    let mut events = Vec::new();
    let mut issues = Vec::new();

    for block in blocks {
        match classify(block) {
            ScrapedField::Tags(tags) => {
                record.fields.insert(fields::TAGS.to_string(), Value::List(tags));
            }
            ScrapedField::ScareEvent(event) => events.push(event),
            ScrapedField::Ratings { imdb, tomato } => {
                if let Some(imdb) = imdb {
                    record.fields.insert(fields::IMDB.to_string(), Value::String(imdb));
                }
                if let Some(tomato) = tomato {
                    record.fields.insert(fields::TOMATO.to_string(), Value::String(tomato));
                }
            }
            ScrapedField::Attribute { name, value } => {
                record.fields.insert(name, Value::String(value));
            }
            ScrapedField::Unrecognized(text) => {
                let issue = FieldIssue::new(title, "", IssueKind::UnrecognizedField { text });
                tracing::warn!(movie = title, "{}", issue);
                issues.push(issue);
            }
        }
    }

    record
        .fields
        .insert(fields::SCARES.to_string(), Value::Events(events));
    (record, issues)
}

/// Copies overview-table scare ratings onto the records with a matching
/// `link`. Ratings for links no record carries are reported.
pub fn attach_scare_ratings(
    records: Vec<RawRecord>,
    ratings: &[(String, Value)],
) -> (Vec<RawRecord>, Vec<FieldIssue>) {
    let mut records = records;
    let mut issues = Vec::new();
    for (link, rating) in ratings {
        let target = records.iter_mut().find(|r| {
            r.fields.get(fields::LINK).and_then(Value::as_string) == Some(link.as_str())
        });
        match target {
            Some(record) => {
                record
                    .fields
                    .insert(fields::SCARE_RATING.to_string(), rating.clone());
            }
            None => {
                let issue = FieldIssue::new(
                    "",
                    fields::SCARE_RATING,
                    IssueKind::UnmatchedLink { link: link.clone() },
                );
                tracing::warn!("{}", issue);
                issues.push(issue);
            }
        }
    }
    (records, issues)
}
