// src/graph/io_operations.rs
//
// Snapshot format for a built MovieGraph (session cache):
//   [0..4]   Magic: b"JSG\x01"
//   [4..8]   format version: u32 LE
//   [8..]    bincode of the petgraph StableUnGraph<NodeData, EdgeData>
//
// The identifier index is not stored; it is rebuilt on load.
//
// Export writes node-link JSON for the presentation layer.

use crate::error::{GraphError, Result};
use crate::graph::schema::{Graph, MovieGraph};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const MAGIC: [u8; 4] = [0x4a, 0x53, 0x47, 0x01];

/// Bump when NodeData, EdgeData or Value change shape.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

pub fn write_snapshot<W: Write>(graph: &MovieGraph, mut writer: W) -> Result<()> {
    writer.write_all(&MAGIC)?;
    writer.write_all(&CURRENT_FORMAT_VERSION.to_le_bytes())?;
    bincode::serialize_into(&mut writer, &graph.graph)?;
    writer.flush()?;
    Ok(())
}

pub fn read_snapshot<R: Read>(mut reader: R) -> Result<MovieGraph> {
    let mut header = [0u8; 8];
    reader.read_exact(&mut header).map_err(|_| {
        GraphError::InvalidSnapshot("file is too small to be a graph snapshot".to_string())
    })?;
    if header[..4] != MAGIC {
        return Err(GraphError::InvalidSnapshot(
            "unrecognized header; rebuild the graph from the dataset".to_string(),
        ));
    }
    let version = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if version != CURRENT_FORMAT_VERSION {
        return Err(GraphError::InvalidSnapshot(format!(
            "format version {} is not supported (expected {})",
            version, CURRENT_FORMAT_VERSION
        )));
    }
    let graph: Graph = bincode::deserialize_from(reader)?;
    Ok(MovieGraph::from_graph(graph))
}

pub fn save_snapshot<P: AsRef<Path>>(graph: &MovieGraph, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_snapshot(graph, BufWriter::new(file))?;
    tracing::info!(path = %path.as_ref().display(), "saved graph snapshot");
    Ok(())
}

pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<MovieGraph> {
    let file = File::open(path.as_ref())?;
    let graph = read_snapshot(BufReader::new(file))?;
    tracing::info!(
        path = %path.as_ref().display(),
        nodes = graph.node_count(),
        "loaded graph snapshot"
    );
    Ok(graph)
}

#[derive(Debug, Serialize)]
pub struct ExportNode {
    pub id: String,
    pub is_instance: &'static str,
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ExportLink {
    pub source: String,
    pub target: String,
    pub relation: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NodeLinkExport {
    pub nodes: Vec<ExportNode>,
    pub links: Vec<ExportLink>,
}

/// Node-link view of the graph. Node ids are the namespaced identifiers
/// (`movie:Alien (1979)`), so categories never clash.
pub fn node_link(graph: &MovieGraph) -> NodeLinkExport {
    let nodes = graph
        .nodes()
        .map(|node| ExportNode {
            id: node.id.to_string(),
            is_instance: node.kind().as_str(),
            attributes: node
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        })
        .collect();
    let links = graph
        .edges()
        .map(|(a, b, relation)| ExportLink {
            source: a.to_string(),
            target: b.to_string(),
            relation: relation.as_str(),
        })
        .collect();
    NodeLinkExport { nodes, links }
}

pub fn export_json<P: AsRef<Path>>(graph: &MovieGraph, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &node_link(graph))?;
    writer.flush()?;
    Ok(())
}
