// src/graph/normalize.rs
//
// Record normalization: raw scraped strings → typed attribute values.
//
// Every failure here is local to one field. The offending field gets the
// undefined sentinel (or is dropped, for imdb) and an issue is recorded;
// the rest of the record is still processed.

use crate::datatypes::records::fields;
use crate::datatypes::{Attributes, MovieRecord, RawRecord, Value};
use crate::graph::reporting::{FieldIssue, IssueKind};
use regex::Regex;
use std::sync::LazyLock;

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Counts parsed from a summary such as `"12 (5 major, 7 minor)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpScareCounts {
    pub total: i64,
    pub major: i64,
    pub minor: i64,
}

/// `"7/10"` → `0.7`. Scores outside 0–10 are rejected.
pub fn imdb_score_to_float(imdb_score: &str) -> Option<f64> {
    let score = imdb_score.replace("/10", "");
    score
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|s| (0.0..=10.0).contains(s))
        .map(|s| s / 10.0)
}

/// `"85%"` → `0.85`, `"N/A"` → `Value::Null`.
pub fn tomato_score(tomato: &str) -> Result<Value, IssueKind> {
    let tomato = tomato.trim();
    if tomato == "N/A" {
        return Ok(Value::Null);
    }
    tomato
        .replace('%', "")
        .trim()
        .parse::<f64>()
        .map(|pct| Value::Float64(pct / 100.0))
        .map_err(|_| IssueKind::Unparseable {
            raw: tomato.to_string(),
        })
}

/// First integer in free text, as minutes.
pub fn runtime_minutes(runtime: &str) -> Option<f64> {
    FIRST_INTEGER
        .find(runtime)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

pub fn parse_jump_scares(summary: &str) -> Result<JumpScareCounts, IssueKind> {
    let tokens: Vec<&str> = summary.split_whitespace().collect();
    if tokens.len() < 5 {
        return Err(IssueKind::TooFewTokens {
            raw: summary.to_string(),
            tokens: tokens.len(),
        });
    }
    let unparseable = || IssueKind::Unparseable {
        raw: summary.to_string(),
    };
    let total = tokens[0].parse::<i64>().map_err(|_| unparseable())?;
    let major = tokens[1]
        .trim_start_matches('(')
        .parse::<i64>()
        .map_err(|_| unparseable())?;
    let minor = tokens[3].parse::<i64>().map_err(|_| unparseable())?;
    Ok(JumpScareCounts {
        total,
        major,
        minor,
    })
}

/// Normalizes one record. Already-typed values pass through untouched, so
/// running this on its own output changes nothing.
pub fn normalize_record(raw: RawRecord) -> (MovieRecord, Vec<FieldIssue>) {
    let RawRecord { title, fields } = raw;
    let mut attributes = Attributes::new();
    let mut issues = Vec::new();

    for (name, value) in fields {
        for (field, normalized) in normalize_field(&title, &name, value, &mut issues) {
            attributes.insert(field, normalized);
        }
    }

    for issue in &issues {
        tracing::warn!(movie = %issue.movie, field = %issue.field, "{}", issue);
    }

    (MovieRecord { title, attributes }, issues)
}

pub fn normalize_all(raws: Vec<RawRecord>) -> (Vec<MovieRecord>, Vec<FieldIssue>) {
    let mut records = Vec::with_capacity(raws.len());
    let mut issues = Vec::new();
    for raw in raws {
        let (record, record_issues) = normalize_record(raw);
        records.push(record);
        issues.extend(record_issues);
    }
    tracing::debug!(records = records.len(), issues = issues.len(), "normalized records");
    (records, issues)
}

fn normalize_field(
    movie: &str,
    name: &str,
    value: Value,
    issues: &mut Vec<FieldIssue>,
) -> Vec<(String, Value)> {
    let text = match value {
        Value::String(text) => text,
        Value::Int64(i) if name == fields::SCARE_RATING => {
            return vec![(name.to_string(), Value::Float64(i as f64))];
        }
        // Typed values (already normalized, or numeric in the source) and
        // the undefined sentinel are kept as they are.
        other => return vec![(name.to_string(), other)],
    };

    match name {
        fields::IMDB => match imdb_score_to_float(&text) {
            Some(score) => vec![(name.to_string(), Value::Float64(score))],
            None => {
                issues.push(FieldIssue::new(
                    movie,
                    name,
                    IssueKind::Unparseable { raw: text },
                ));
                Vec::new()
            }
        },
        fields::TOMATO => match tomato_score(&text) {
            Ok(value) => vec![(name.to_string(), value)],
            Err(kind) => {
                issues.push(FieldIssue::new(movie, name, kind));
                vec![(name.to_string(), Value::Null)]
            }
        },
        fields::RUNTIME => match runtime_minutes(&text) {
            Some(minutes) => vec![(name.to_string(), Value::Float64(minutes))],
            None => {
                issues.push(FieldIssue::new(
                    movie,
                    name,
                    IssueKind::Unparseable { raw: text },
                ));
                vec![(name.to_string(), Value::Null)]
            }
        },
        fields::SCARE_RATING => match text.trim().parse::<f64>() {
            Ok(rating) => vec![(name.to_string(), Value::Float64(rating))],
            Err(_) => {
                issues.push(FieldIssue::new(
                    movie,
                    name,
                    IssueKind::Unparseable { raw: text },
                ));
                vec![(name.to_string(), Value::Null)]
            }
        },
        fields::JUMP_SCARES => {
            let (total, major, minor) = match parse_jump_scares(&text) {
                Ok(counts) => (
                    Value::Int64(counts.total),
                    Value::Int64(counts.major),
                    Value::Int64(counts.minor),
                ),
                Err(kind) => {
                    issues.push(FieldIssue::new(movie, name, kind));
                    (Value::Null, Value::Null, Value::Null)
                }
            };
            vec![
                (fields::JUMP_SCARES.to_string(), total),
                (fields::MAJOR_JUMP_SCARES.to_string(), major),
                (fields::MINOR_JUMP_SCARES.to_string(), minor),
            ]
        }
        _ => vec![(name.to_string(), Value::String(text))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_movie() -> RawRecord {
        RawRecord::new("Insidious (2010)")
            .with_text(fields::IMDB, "6/10")
            .with_text(fields::TOMATO, "66%")
            .with_text(fields::RUNTIME, "103 minutes")
            .with_text(fields::JUMP_SCARES, "24 (10 major, 14 minor)")
            .with_text(fields::DIRECTOR, "James Wan")
            .with_field(
                fields::TAGS,
                Value::List(vec!["Haunted House".to_string()]),
            )
    }

    #[test]
    fn test_jump_scare_summary() {
        let counts = parse_jump_scares("12 (5 major, 7 minor)").unwrap();
        assert_eq!(
            counts,
            JumpScareCounts {
                total: 12,
                major: 5,
                minor: 7
            }
        );
    }

    #[test]
    fn test_jump_scare_summary_too_short() {
        let err = parse_jump_scares("12 (5 major)").unwrap_err();
        assert_eq!(
            err,
            IssueKind::TooFewTokens {
                raw: "12 (5 major)".to_string(),
                tokens: 3
            }
        );
    }

    #[test]
    fn test_scores() {
        assert_eq!(imdb_score_to_float("7/10"), Some(0.7));
        assert_eq!(imdb_score_to_float("n/a"), None);
        assert_eq!(imdb_score_to_float("15/10"), None);
        assert_eq!(imdb_score_to_float("-1/10"), None);
        assert_eq!(imdb_score_to_float("10/10"), Some(1.0));
        assert_eq!(tomato_score("85%"), Ok(Value::Float64(0.85)));
        assert_eq!(tomato_score("N/A"), Ok(Value::Null));
        assert!(tomato_score("great").is_err());
        assert_eq!(runtime_minutes("Runtime: 93 min (approx. 1h33)"), Some(93.0));
        assert_eq!(runtime_minutes("unknown"), None);
    }

    #[test]
    fn test_normalize_record_types_fields() {
        let (record, issues) = normalize_record(raw_movie());
        assert!(issues.is_empty());
        assert_eq!(record.get(fields::IMDB), Some(&Value::Float64(0.6)));
        assert_eq!(record.get(fields::TOMATO), Some(&Value::Float64(0.66)));
        assert_eq!(record.get(fields::RUNTIME), Some(&Value::Float64(103.0)));
        assert_eq!(record.get(fields::JUMP_SCARES), Some(&Value::Int64(24)));
        assert_eq!(record.get(fields::MAJOR_JUMP_SCARES), Some(&Value::Int64(10)));
        assert_eq!(record.get(fields::MINOR_JUMP_SCARES), Some(&Value::Int64(14)));
        assert_eq!(
            record.get(fields::DIRECTOR),
            Some(&Value::String("James Wan".to_string()))
        );
    }

    #[test]
    fn test_field_errors_are_local() {
        let raw = RawRecord::new("Broken")
            .with_text(fields::IMDB, "??")
            .with_text(fields::RUNTIME, "long")
            .with_text(fields::JUMP_SCARES, "many")
            .with_text(fields::TOMATO, "N/A")
            .with_text("Release Date", "2001");
        let (record, issues) = normalize_record(raw);

        assert_eq!(issues.len(), 3);
        assert_eq!(record.get(fields::IMDB), None);
        assert_eq!(record.get(fields::RUNTIME), Some(&Value::Null));
        assert_eq!(record.get(fields::JUMP_SCARES), Some(&Value::Null));
        assert_eq!(record.get(fields::MINOR_JUMP_SCARES), Some(&Value::Null));
        assert_eq!(record.get(fields::TOMATO), Some(&Value::Null));
        assert_eq!(
            record.get("Release Date"),
            Some(&Value::String("2001".to_string()))
        );
    }

    #[test]
    fn test_out_of_range_imdb_is_dropped() {
        let raw = RawRecord::new("Overrated").with_text(fields::IMDB, "15/10");
        let (record, issues) = normalize_record(raw);
        assert_eq!(record.get(fields::IMDB), None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, fields::IMDB);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let (once, _) = normalize_record(raw_movie());
        let (twice, issues) = normalize_record(once.clone().into_raw());
        assert!(issues.is_empty());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_scare_rating_becomes_float() {
        let raw = RawRecord::new("Rated")
            .with_field(fields::SCARE_RATING, Value::Int64(3))
            .with_text("Notes", "3");
        let (record, _) = normalize_record(raw);
        assert_eq!(record.get(fields::SCARE_RATING), Some(&Value::Float64(3.0)));
        assert_eq!(record.get("Notes"), Some(&Value::String("3".to_string())));
    }
}
