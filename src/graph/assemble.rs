// src/graph/assemble.rs
use crate::datatypes::{Attributes, MovieRecord};
use crate::graph::edges::Triple;
use crate::graph::schema::{EdgeData, Graph, MovieGraph, NodeData, NodeId};
use petgraph::graph::NodeIndex;
use std::collections::HashMap;

/// Accumulates nodes by identity while the graph is being built.
struct GraphBuilder {
    graph: Graph,
    index: HashMap<NodeId, NodeIndex>,
}

impl GraphBuilder {
    fn new() -> Self {
        GraphBuilder {
            graph: Graph::default(),
            index: HashMap::new(),
        }
    }

    /// Returns the node for `id`, creating it with `attributes` if absent.
    /// Existing nodes are never touched, so the category and the attribute
    /// map are fixed at creation.
    fn node(&mut self, id: NodeId, attributes: impl FnOnce() -> Attributes) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(NodeData::new(id.clone(), attributes()));
        self.index.insert(id, idx);
        idx
    }

    fn finish(self) -> MovieGraph {
        MovieGraph {
            graph: self.graph,
            index: self.index,
        }
    }
}

/// Builds the unscored graph.
///
/// Movie nodes carry their normalized attributes; person and tag nodes start
/// empty. Every record becomes a movie node, including movies without any
/// director or tag. A repeated (movie, object) pair keeps a single edge whose
/// label is the last one written. With category-namespaced identifiers the
/// label for a given pair is always the same, so the result does not depend
/// on triple order.
pub fn assemble(records: &[MovieRecord], triples: &[Triple]) -> MovieGraph {
    let mut builder = GraphBuilder::new();
    for record in records {
        builder.node(NodeId::movie(record.title.as_str()), || {
            record.attributes.clone()
        });
    }

    for triple in triples {
        // Triples for titles without a record still get a (bare) movie node.
        let movie = builder.node(triple.subject_id(), Attributes::new);
        let other = builder.node(triple.object_id(), Attributes::new);
        builder
            .graph
            .update_edge(movie, other, EdgeData::new(triple.relation));
    }

    let graph = builder.finish();
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "assembled graph"
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Value;
    use crate::graph::schema::{NodeKind, Relation};

    fn movie(title: &str, imdb: f64) -> MovieRecord {
        let mut attributes = Attributes::new();
        attributes.insert("imdb".to_string(), Value::Float64(imdb));
        MovieRecord {
            title: title.to_string(),
            attributes,
        }
    }

    #[test]
    fn test_nodes_and_categories() {
        let records = vec![movie("A", 0.7), movie("B", 0.5)];
        let triples = vec![
            Triple::new("A", "Jane Doe", Relation::Director),
            Triple::new("B", "Jane Doe", Relation::Director),
            Triple::new("A", "Gore", Relation::Tag),
        ];
        let graph = assemble(&records, &triples);

        assert_eq!(graph.count_kind(NodeKind::Movie), 2);
        assert_eq!(graph.count_kind(NodeKind::Person), 1);
        assert_eq!(graph.count_kind(NodeKind::Tag), 1);
        assert_eq!(graph.edge_count(), 3);

        let a = graph.node(&NodeId::movie("A")).unwrap();
        assert_eq!(a.get_field_ref("imdb"), Some(&Value::Float64(0.7)));
        let jane = graph.node(&NodeId::person("Jane Doe")).unwrap();
        assert!(jane.attributes.is_empty());
    }

    #[test]
    fn test_duplicate_triples_collapse() {
        let records = vec![movie("A", 0.7)];
        let triples = vec![
            Triple::new("A", "Jane Doe", Relation::Director),
            Triple::new("A", "Jane Doe", Relation::Director),
        ];
        let graph = assemble(&records, &triples);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_person_and_tag_with_same_name() {
        let records = vec![movie("A", 0.7)];
        let triples = vec![
            Triple::new("A", "Mama", Relation::Director),
            Triple::new("A", "Mama", Relation::Tag),
        ];
        let graph = assemble(&records, &triples);
        assert!(graph.contains(&NodeId::person("Mama")));
        assert!(graph.contains(&NodeId::tag("Mama")));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_isolated_movie_kept() {
        let graph = assemble(&[movie("Lonely", 0.1)], &[]);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_triple_for_unknown_movie() {
        let graph = assemble(&[], &[Triple::new("Ghost", "Gore", Relation::Tag)]);
        let ghost = graph.node(&NodeId::movie("Ghost")).unwrap();
        assert!(ghost.attributes.is_empty());
    }
}
