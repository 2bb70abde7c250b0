// src/graph/schema.rs
use crate::datatypes::records::fields;
use crate::datatypes::{Attributes, Value};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableUnGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Node category, exposed to callers as the `is_instance` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Movie,
    Person,
    Tag,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Movie => "movie",
            NodeKind::Person => "person",
            NodeKind::Tag => "tag",
        }
    }

    pub fn parse(s: &str) -> Option<NodeKind> {
        match s {
            "movie" => Some(NodeKind::Movie),
            "person" => Some(NodeKind::Person),
            "tag" => Some(NodeKind::Tag),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Relation {
    Director,
    Tag,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Director => "director",
            Relation::Tag => "tag",
        }
    }

    /// Category of the non-movie endpoint of an edge with this label.
    pub fn object_kind(&self) -> NodeKind {
        match self {
            Relation::Director => NodeKind::Person,
            Relation::Tag => NodeKind::Tag,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node identity. The category is part of the key, so a director and a tag
/// with the same name are separate nodes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub kind: NodeKind,
    pub name: String,
}

impl NodeId {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        NodeId {
            kind,
            name: name.into(),
        }
    }

    pub fn movie(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Movie, name)
    }

    pub fn person(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Person, name)
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Tag, name)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: NodeId,
    pub attributes: Attributes,
}

impl NodeData {
    pub fn new(id: NodeId, attributes: Attributes) -> Self {
        NodeData { id, attributes }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.id.kind
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.id.name
    }

    /// Field lookup including the `is_instance` pseudo-field.
    pub fn field(&self, field: &str) -> Option<Value> {
        if field == fields::IS_INSTANCE {
            return Some(Value::String(self.kind().as_str().to_string()));
        }
        self.attributes.get(field).cloned()
    }

    #[inline]
    pub fn get_field_ref(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    /// Same node with its attribute map replaced wholesale.
    pub fn with_attributes(&self, attributes: Attributes) -> Self {
        NodeData {
            id: self.id.clone(),
            attributes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub relation: Relation,
}

impl EdgeData {
    pub fn new(relation: Relation) -> Self {
        EdgeData { relation }
    }
}

pub type Graph = StableUnGraph<NodeData, EdgeData>;

/// The movie/person/tag graph plus an identifier index.
///
/// Built once per run and read-only afterwards. The index is skipped during
/// serialization and rebuilt from the graph on load via `rebuild_index()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieGraph {
    pub(crate) graph: Graph,
    #[serde(skip)]
    pub(crate) index: HashMap<NodeId, NodeIndex>,
}

impl MovieGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_graph(graph: Graph) -> Self {
        let mut movie_graph = MovieGraph {
            graph,
            index: HashMap::new(),
        };
        movie_graph.rebuild_index();
        movie_graph
    }

    pub fn rebuild_index(&mut self) {
        self.index = self
            .graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx).map(|n| (n.id.clone(), idx)))
            .collect();
    }

    pub fn node_index(&self, id: &NodeId) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn get_node(&self, index: NodeIndex) -> Option<&NodeData> {
        self.graph.node_weight(index)
    }

    pub fn node(&self, id: &NodeId) -> Option<&NodeData> {
        self.node_index(id).and_then(|idx| self.get_node(idx))
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> + '_ {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx))
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &NodeData> + '_ {
        self.nodes().filter(move |n| n.kind() == kind)
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes_of_kind(kind).count()
    }

    /// Every edge as (endpoint, endpoint, label), endpoints in storage order.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId, Relation)> + '_ {
        self.graph.edge_references().filter_map(move |e| {
            let a = self.graph.node_weight(e.source())?;
            let b = self.graph.node_weight(e.target())?;
            Some((&a.id, &b.id, e.weight().relation))
        })
    }

    /// Order-free view of the edges: endpoints sorted within each triple.
    pub fn edge_set(&self) -> BTreeSet<(NodeId, NodeId, Relation)> {
        self.edges()
            .map(|(a, b, rel)| {
                if a <= b {
                    (a.clone(), b.clone(), rel)
                } else {
                    (b.clone(), a.clone(), rel)
                }
            })
            .collect()
    }

    pub fn node_ids(&self) -> BTreeSet<NodeId> {
        self.nodes().map(|n| n.id.clone()).collect()
    }

    pub fn neighbor_indices(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(index)
    }
}
