// src/graph/aggregate.rs
//
// Aggregate scoring: each person and tag node gets the mean of every
// configured numeric field over its adjacent movie nodes.

use crate::datatypes::{Attributes, Value};
use crate::graph::schema::{MovieGraph, NodeKind};
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

/// Two decimals, ties to even: 7.125 → 7.12.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Mean of `field` over the movie neighbors of `node`, skipping neighbors
/// where the field is absent or undefined. `Value::Null` when none define it.
pub fn average_score(graph: &MovieGraph, node: NodeIndex, field: &str) -> Value {
    let mut sum = 0.0;
    let mut count = 0usize;
    for neighbor in graph.neighbor_indices(node) {
        let value = graph
            .get_node(neighbor)
            .filter(|n| n.kind() == NodeKind::Movie)
            .and_then(|n| n.get_field_ref(field))
            .and_then(Value::as_f64);
        if let Some(v) = value {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        Value::Null
    } else {
        Value::Float64(round2(sum / count as f64))
    }
}

/// Computes aggregates for every person and tag node and returns a new graph
/// with those nodes' attribute maps replaced by the fresh scores.
///
/// Must run on a fully assembled graph: scores depend on finished neighbor
/// sets.
pub fn score(graph: MovieGraph, aggregate_fields: &[String]) -> MovieGraph {
    let scores: HashMap<NodeIndex, Attributes> = graph
        .graph
        .node_indices()
        .filter(|&idx| {
            graph
                .get_node(idx)
                .is_some_and(|n| n.kind() != NodeKind::Movie)
        })
        .map(|idx| {
            let attributes: Attributes = aggregate_fields
                .iter()
                .map(|field| (field.clone(), average_score(&graph, idx, field)))
                .collect();
            (idx, attributes)
        })
        .collect();

    tracing::debug!(
        nodes = scores.len(),
        fields = aggregate_fields.len(),
        "computed aggregate scores"
    );

    let scored = graph.graph.map(
        |idx, node| match scores.get(&idx) {
            Some(attributes) => node.with_attributes(attributes.clone()),
            None => node.clone(),
        },
        |_, edge| edge.clone(),
    );
    MovieGraph::from_graph(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::MovieRecord;
    use crate::graph::assemble::assemble;
    use crate::graph::edges::Triple;
    use crate::graph::schema::{NodeId, Relation};

    fn movie(title: &str, attrs: Vec<(&str, Value)>) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            attributes: attrs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    fn fields() -> Vec<String> {
        vec!["imdb".to_string(), "tomato".to_string()]
    }

    #[test]
    fn test_mean_is_rounded() {
        let records = vec![
            movie("A", vec![("imdb", Value::Float64(0.7))]),
            movie("B", vec![("imdb", Value::Float64(0.55))]),
            movie("C", vec![("imdb", Value::Float64(0.6))]),
        ];
        let triples: Vec<Triple> = ["A", "B", "C"]
            .iter()
            .map(|m| Triple::new(m, "Gore", Relation::Tag))
            .collect();
        let graph = score(assemble(&records, &triples), &fields());
        let gore = graph.node(&NodeId::tag("Gore")).unwrap();
        // (0.7 + 0.55 + 0.6) / 3 = 0.61666...
        assert_eq!(gore.get_field_ref("imdb"), Some(&Value::Float64(0.62)));
    }

    #[test]
    fn test_mean_tie_rounds_to_even() {
        let counts = [7, 7, 7, 7, 7, 7, 7, 8];
        let records: Vec<MovieRecord> = counts
            .iter()
            .enumerate()
            .map(|(i, &n)| movie(&format!("M{}", i), vec![("Jump Scares", Value::Int64(n))]))
            .collect();
        let triples: Vec<Triple> = records
            .iter()
            .map(|r| Triple::new(&r.title, "Gore", Relation::Tag))
            .collect();
        let graph = score(assemble(&records, &triples), &["Jump Scares".to_string()]);
        let gore = graph.node(&NodeId::tag("Gore")).unwrap();
        // 57 / 8 = 7.125
        assert_eq!(gore.get_field_ref("Jump Scares"), Some(&Value::Float64(7.12)));
        assert_eq!(round2(0.125), 0.12);
    }

    #[test]
    fn test_undefined_values_are_skipped() {
        let records = vec![
            movie("A", vec![("tomato", Value::Null), ("imdb", Value::Float64(0.8))]),
            movie("B", vec![("tomato", Value::Float64(0.4))]),
        ];
        let triples = vec![
            Triple::new("A", "Jane", Relation::Director),
            Triple::new("B", "Jane", Relation::Director),
        ];
        let graph = score(assemble(&records, &triples), &fields());
        let jane = graph.node(&NodeId::person("Jane")).unwrap();
        assert_eq!(jane.get_field_ref("tomato"), Some(&Value::Float64(0.4)));
        assert_eq!(jane.get_field_ref("imdb"), Some(&Value::Float64(0.8)));
    }

    #[test]
    fn test_no_defined_neighbor_is_null_not_zero() {
        let records = vec![movie("A", vec![("tomato", Value::Null)])];
        let triples = vec![Triple::new("A", "Jane", Relation::Director)];
        let graph = score(assemble(&records, &triples), &fields());
        let jane = graph.node(&NodeId::person("Jane")).unwrap();
        assert_eq!(jane.get_field_ref("tomato"), Some(&Value::Null));
        assert_eq!(jane.get_field_ref("imdb"), Some(&Value::Null));
    }

    #[test]
    fn test_movies_untouched_and_counts_average() {
        let records = vec![
            movie("A", vec![("Jump Scares", Value::Int64(10))]),
            movie("B", vec![("Jump Scares", Value::Int64(5))]),
        ];
        let triples = vec![
            Triple::new("A", "Gore", Relation::Tag),
            Triple::new("B", "Gore", Relation::Tag),
        ];
        let graph = score(assemble(&records, &triples), &["Jump Scares".to_string()]);
        let gore = graph.node(&NodeId::tag("Gore")).unwrap();
        assert_eq!(gore.get_field_ref("Jump Scares"), Some(&Value::Float64(7.5)));
        let a = graph.node(&NodeId::movie("A")).unwrap();
        assert_eq!(a.attributes.len(), 1);
        assert_eq!(a.get_field_ref("Jump Scares"), Some(&Value::Int64(10)));
    }
}
