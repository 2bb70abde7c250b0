// src/graph/chart.rs
//
// Data shaping for the bubble/network chart. Drawing and force-directed
// layout are left to the renderer; this module only decides sizes, colors,
// explicit positions, highlight opacity and edge segments.

use crate::datatypes::records::fields;
use crate::datatypes::Value;
use crate::error::{GraphError, Result};
use crate::graph::query;
use crate::graph::schema::{MovieGraph, NodeData, NodeId, Relation};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub const PALETTE: [&str; 11] = [
    "#FAA082", "#AFC3FF", "#E5546C", "#034B6F", "#8C5AC8", "#E6A0C8", "#027AB1", "#39BDF3",
    "#71D2F1", "#3C96B4", "#AAE6F0",
];
pub const MAX_BUBBLE_SIZE: f64 = 40.0;
pub const DEFAULT_BUBBLE_SIZE: f64 = 20.0;
const POWER_SKEW: i32 = 4;
const BASE_OPACITY: f64 = 0.8;
const DIMMED_OPACITY: f64 = 0.1;

/// Which attributes drive the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub size_field: String,
    pub color_field: String,
    /// Explicit (x, y) fields; `None` leaves placement to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<(String, String)>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            size_field: fields::IMDB.to_string(),
            color_field: fields::IS_INSTANCE.to_string(),
            position: None,
        }
    }
}

impl ChartConfig {
    /// `[size, color]` or `[size, color, x, y]`.
    pub fn from_dims<S: AsRef<str>>(dims: &[S]) -> Result<Self> {
        let dims: Vec<&str> = dims.iter().map(|d| d.as_ref()).collect();
        match dims.as_slice() {
            [size, color] => Ok(ChartConfig {
                size_field: size.to_string(),
                color_field: color.to_string(),
                position: None,
            }),
            [size, color, x, y] => Ok(ChartConfig {
                size_field: size.to_string(),
                color_field: color.to_string(),
                position: Some((x.to_string(), y.to_string())),
            }),
            other => Err(GraphError::InvalidChart(format!(
                "expected 2 or 4 dimensions, got {}",
                other.len()
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMarker {
    pub id: NodeId,
    pub label: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub size: f64,
    pub color: &'static str,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeSegment {
    pub source: NodeId,
    pub target: NodeId,
    pub relation: Relation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub markers: Vec<NodeMarker>,
    pub edges: Vec<EdgeSegment>,
}

/// `norm^4 × 40`, or the default size when the value is undefined.
pub fn bubble_size(normalized: Option<f64>) -> f64 {
    match normalized {
        Some(x) if x.is_finite() => x.powi(POWER_SKEW) * MAX_BUBBLE_SIZE,
        _ => DEFAULT_BUBBLE_SIZE,
    }
}

/// Min-max normalization; undefined when the range is empty.
fn normalize(value: Option<f64>, min: f64, max: f64) -> Option<f64> {
    let v = value?;
    let range = max - min;
    if range > 0.0 {
        Some((v - min) / range)
    } else {
        None
    }
}

/// Category key for coloring; `None` for undefined values.
fn color_key(value: Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) if v.is_null() => None,
        Some(v) => Some(v.to_string()),
    }
}

fn numeric(node: &NodeData, field: &str) -> Option<f64> {
    node.field(field).and_then(|v| v.as_f64())
}

/// Builds the chart data for the whole graph, optionally highlighting the
/// neighborhood of `selected`. An unknown selection leaves the chart
/// unhighlighted.
pub fn chart_data(
    graph: &MovieGraph,
    config: &ChartConfig,
    selected: Option<&NodeId>,
) -> ChartData {
    let nodes: Vec<&NodeData> = graph.nodes().collect();

    let sizes: Vec<Option<f64>> = nodes
        .iter()
        .map(|n| numeric(n, &config.size_field))
        .collect();
    let (min, max) = sizes
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let keys: Vec<Option<String>> = nodes
        .iter()
        .map(|n| color_key(n.field(&config.color_field)))
        .collect();
    let categories: BTreeSet<&String> = keys.iter().flatten().collect();
    let codes: HashMap<&String, usize> = categories
        .into_iter()
        .enumerate()
        .map(|(code, key)| (key, code))
        .collect();

    // An unknown selection has nothing to show, so the chart stays unhighlighted.
    let highlighted: Option<BTreeSet<NodeId>> =
        selected.and_then(|id| match query::related(graph, id) {
            Ok(set) => Some(set),
            Err(err) => {
                tracing::debug!(%err, "selection not in graph");
                None
            }
        });

    let markers = nodes
        .iter()
        .zip(sizes.iter())
        .zip(keys.iter())
        .map(|((node, size), key)| {
            let color = match key.as_ref().and_then(|k| codes.get(k)) {
                Some(&code) => PALETTE[code % PALETTE.len()],
                None => PALETTE[PALETTE.len() - 1],
            };
            let opacity = match &highlighted {
                Some(set) if set.contains(&node.id) => BASE_OPACITY,
                Some(_) => DIMMED_OPACITY,
                None => BASE_OPACITY,
            };
            let (x, y) = match &config.position {
                Some((xf, yf)) => (numeric(node, xf), numeric(node, yf)),
                None => (None, None),
            };
            NodeMarker {
                id: node.id.clone(),
                label: node.name().to_string(),
                x,
                y,
                size: bubble_size(normalize(*size, min, max)),
                color,
                opacity,
            }
        })
        .collect();

    let edges = graph
        .edges()
        .map(|(a, b, relation)| EdgeSegment {
            source: a.clone(),
            target: b.clone(),
            relation,
        })
        .collect();

    ChartData { markers, edges }
}
