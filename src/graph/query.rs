// src/graph/query.rs
//
// Read-only lookups used by the presentation layer.

use crate::datatypes::records::fields;
use crate::datatypes::Value;
use crate::error::{GraphError, Result};
use crate::graph::schema::{MovieGraph, NodeId, NodeKind};
use std::collections::BTreeSet;

/// Lookup order for bare labels (chart hover text carries no category).
const LABEL_PRECEDENCE: [NodeKind; 3] = [NodeKind::Movie, NodeKind::Person, NodeKind::Tag];

/// Adjacent node identifiers.
pub fn neighbors(graph: &MovieGraph, node: &NodeId) -> Result<BTreeSet<NodeId>> {
    let idx = graph
        .node_index(node)
        .ok_or_else(|| GraphError::NotFound(node.to_string()))?;
    Ok(graph
        .neighbor_indices(idx)
        .filter_map(|n| graph.get_node(n))
        .map(|n| n.id.clone())
        .collect())
}

/// The node's fields in display order: `is_instance` first, then its
/// attributes sorted by name.
pub fn node_info(graph: &MovieGraph, node: &NodeId) -> Result<Vec<(String, Value)>> {
    let data = graph
        .node(node)
        .ok_or_else(|| GraphError::NotFound(node.to_string()))?;
    let mut info = Vec::with_capacity(data.attributes.len() + 1);
    info.push((
        fields::IS_INSTANCE.to_string(),
        Value::String(data.kind().as_str().to_string()),
    ));
    info.extend(data.attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(info)
}

/// Markdown block for the info panel, or `None` when nothing is selected or
/// the node does not exist.
pub fn describe(graph: &MovieGraph, node: Option<&NodeId>) -> Option<String> {
    let node = node?;
    let info = node_info(graph, node).ok()?;
    let mut lines = vec![format!("#### {}", node.name)];
    lines.extend(
        info.iter()
            .map(|(field, value)| format!("##### {}:\n{}", field, value)),
    );
    Some(lines.join("\n"))
}

/// Resolves a display label to a node, preferring movies, then persons,
/// then tags.
pub fn resolve(graph: &MovieGraph, label: &str) -> Result<NodeId> {
    LABEL_PRECEDENCE
        .iter()
        .map(|&kind| NodeId::new(kind, label))
        .find(|id| graph.contains(id))
        .ok_or_else(|| GraphError::NotFound(label.to_string()))
}

/// Every node a label could refer to.
pub fn resolve_all(graph: &MovieGraph, label: &str) -> Vec<NodeId> {
    LABEL_PRECEDENCE
        .iter()
        .map(|&kind| NodeId::new(kind, label))
        .filter(|id| graph.contains(id))
        .collect()
}

/// Selection neighborhood: the node, its neighbors, and the neighbors'
/// neighbors that belong to a different category than the node.
pub fn related(graph: &MovieGraph, node: &NodeId) -> Result<BTreeSet<NodeId>> {
    let direct = neighbors(graph, node)?;
    let mut selected: BTreeSet<NodeId> = BTreeSet::new();
    for neighbor in &direct {
        for second in neighbors(graph, neighbor)? {
            if second.kind != node.kind {
                selected.insert(second);
            }
        }
    }
    selected.extend(direct);
    selected.insert(node.clone());
    Ok(selected)
}
