// src/graph/mod.rs
//
// Build pipeline: raw records → normalized records → triples → graph →
// scored graph. Each pass consumes the previous pass's value and returns a
// new one.

use crate::config::BuildConfig;
use crate::datatypes::RawRecord;
use crate::error::Result;
use crate::ingest::dataset::{self, Dataset};
use std::time::Instant;

pub mod aggregate;
pub mod assemble;
pub mod chart;
pub mod edges;
pub mod io_operations;
pub mod normalize;
pub mod query;
pub mod reporting;
pub mod schema;

#[cfg(feature = "python")]
pub mod pymethods;

use reporting::BuildReport;
use schema::{MovieGraph, NodeKind};

/// Runs the full pipeline over already-loaded records.
pub fn build_graph(records: Vec<RawRecord>, aggregate_fields: &[String]) -> (MovieGraph, BuildReport) {
    let start = Instant::now();
    let mut report = BuildReport::new(aggregate_fields.to_vec());

    let (records, issues) = normalize::normalize_all(records);
    let triples = edges::extract_triples(&records);
    let graph = assemble::assemble(&records, &triples);
    let graph = aggregate::score(graph, aggregate_fields);

    report.issues = issues;
    report.movies = graph.count_kind(NodeKind::Movie);
    report.persons = graph.count_kind(NodeKind::Person);
    report.tags = graph.count_kind(NodeKind::Tag);
    report.edges = graph.edge_count();
    report.processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        movies = report.movies,
        persons = report.persons,
        tags = report.tags,
        edges = report.edges,
        warnings = report.issues.len(),
        "graph built"
    );
    (graph, report)
}

/// Builds from a loaded dataset, carrying its rejected entries into the report.
pub fn build_from_dataset(dataset: Dataset, aggregate_fields: &[String]) -> (MovieGraph, BuildReport) {
    let Dataset { records, rejected } = dataset;
    let (graph, report) = build_graph(records, aggregate_fields);
    let errors = rejected.iter().map(|e| e.to_string()).collect();
    (graph, report.with_errors(errors))
}

/// Loads the configured dataset from disk and builds the scored graph.
pub fn load_and_build(config: &BuildConfig) -> Result<(MovieGraph, BuildReport)> {
    let dataset = dataset::load_dataset(&config.dataset_path, &config.title_prefix)?;
    Ok(build_from_dataset(dataset, &config.aggregate_fields))
}
