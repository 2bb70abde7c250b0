// src/graph/reporting.rs
use std::fmt;

/// What went wrong with a single field (or text block) of a movie.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// The value could not be parsed into the expected numeric form.
    Unparseable { raw: String },
    /// The jump-scare summary had fewer whitespace tokens than required.
    TooFewTokens { raw: String, tokens: usize },
    /// A scraped text block matched none of the known field patterns.
    UnrecognizedField { text: String },
    /// A scare rating referenced a link no record carries.
    UnmatchedLink { link: String },
}

/// Field-local problem found while building. Never aborts the build.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub movie: String,
    pub field: String,
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(movie: &str, field: &str, kind: IssueKind) -> Self {
        FieldIssue {
            movie: movie.to_string(),
            field: field.to_string(),
            kind,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Unparseable { raw } => {
                write!(f, "{} - cannot parse {} from '{}'", self.movie, self.field, raw)
            }
            IssueKind::TooFewTokens { raw, tokens } => write!(
                f,
                "{} - {} needs 5 tokens, got {} in '{}'",
                self.movie, self.field, tokens, raw
            ),
            IssueKind::UnrecognizedField { text } => {
                write!(f, "{} - nothing found in '{}'", self.movie, text)
            }
            IssueKind::UnmatchedLink { link } => {
                write!(f, "{} - no movie with link {}", self.field, link)
            }
        }
    }
}

/// Summary of one graph build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub movies: usize,
    pub persons: usize,
    pub tags: usize,
    pub edges: usize,
    pub records_skipped: usize,
    pub aggregate_fields: Vec<String>,
    pub processing_time_ms: f64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub issues: Vec<FieldIssue>,
    pub errors: Vec<String>,
}

impl BuildReport {
    pub fn new(aggregate_fields: Vec<String>) -> Self {
        Self {
            movies: 0,
            persons: 0,
            tags: 0,
            edges: 0,
            records_skipped: 0,
            aggregate_fields,
            processing_time_ms: 0.0,
            timestamp: chrono::Utc::now(),
            issues: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.records_skipped += errors.len();
        self.errors.extend(errors);
        self
    }

    pub fn has_problems(&self) -> bool {
        !self.issues.is_empty() || !self.errors.is_empty()
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "built at {}: {} movies, {} persons, {} tags, {} edges in {:.1} ms",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.movies,
            self.persons,
            self.tags,
            self.edges,
            self.processing_time_ms
        )?;
        if self.records_skipped > 0 {
            writeln!(f, "skipped records: {}", self.records_skipped)?;
        }
        for error in &self.errors {
            writeln!(f, "  error: {}", error)?;
        }
        for issue in &self.issues {
            writeln!(f, "  warning: {}", issue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_display_names_movie_and_field() {
        let issue = FieldIssue::new(
            "Alien (1979)",
            "Runtime",
            IssueKind::Unparseable {
                raw: "unknown".to_string(),
            },
        );
        assert_eq!(
            issue.to_string(),
            "Alien (1979) - cannot parse Runtime from 'unknown'"
        );
    }

    #[test]
    fn test_errors_count_as_skipped() {
        let report = BuildReport::new(vec![])
            .with_errors(vec!["malformed record '': empty title".to_string()]);
        assert_eq!(report.records_skipped, 1);
        assert!(report.has_problems());
    }
}
