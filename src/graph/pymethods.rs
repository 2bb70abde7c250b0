// src/graph/pymethods.rs
//
// Python surface for the dashboard: build or load a graph once, then query
// it from callbacks.

use crate::config::BuildConfig;
use crate::datatypes::py_out;
use crate::error::GraphError;
use crate::graph::chart::{self, ChartConfig};
use crate::graph::reporting::BuildReport;
use crate::graph::schema::MovieGraph;
use crate::graph::{io_operations, load_and_build, query};
use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError};
use pyo3::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

fn to_py_err(err: GraphError) -> PyErr {
    match err {
        GraphError::NotFound(name) => PyKeyError::new_err(name),
        GraphError::Io(e) => PyIOError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Read-only movie graph shared with Python. Cloning is cheap.
#[pyclass]
#[derive(Clone)]
pub struct JumpGraph {
    inner: Arc<MovieGraph>,
    report: Option<Arc<BuildReport>>,
}

impl JumpGraph {
    pub fn new(graph: MovieGraph, report: Option<BuildReport>) -> Self {
        JumpGraph {
            inner: Arc::new(graph),
            report: report.map(Arc::new),
        }
    }
}

#[pymethods]
impl JumpGraph {
    /// Build from a scraped dataset file, optionally with a JSON build config.
    #[staticmethod]
    #[pyo3(signature = (path, config_path=None))]
    fn from_dataset(path: &str, config_path: Option<&str>) -> PyResult<Self> {
        let mut config = match config_path {
            Some(cfg) => BuildConfig::from_file(cfg).map_err(to_py_err)?,
            None => BuildConfig::default(),
        };
        config.dataset_path = PathBuf::from(path);
        let (graph, report) = load_and_build(&config).map_err(to_py_err)?;
        Ok(JumpGraph::new(graph, Some(report)))
    }

    #[staticmethod]
    fn load_snapshot(path: &str) -> PyResult<Self> {
        let graph = io_operations::load_snapshot(path).map_err(to_py_err)?;
        Ok(JumpGraph::new(graph, None))
    }

    fn save_snapshot(&self, path: &str) -> PyResult<()> {
        io_operations::save_snapshot(&self.inner, path).map_err(to_py_err)
    }

    /// Markdown info for a clicked label; None when nothing matches.
    #[pyo3(signature = (label=None))]
    fn describe(&self, label: Option<&str>) -> Option<String> {
        let id = label.and_then(|l| query::resolve(&self.inner, l).ok());
        query::describe(&self.inner, id.as_ref())
    }

    fn neighbors(&self, label: &str) -> PyResult<Vec<String>> {
        let id = query::resolve(&self.inner, label).map_err(to_py_err)?;
        let found = query::neighbors(&self.inner, &id).map_err(to_py_err)?;
        Ok(found.into_iter().map(|n| n.name).collect())
    }

    fn node(&self, py: Python<'_>, label: &str) -> PyResult<PyObject> {
        let id = query::resolve(&self.inner, label).map_err(to_py_err)?;
        let data = self
            .inner
            .node(&id)
            .ok_or_else(|| PyKeyError::new_err(label.to_string()))?;
        let dict = py_out::attributes_to_pydict(py, data.kind().as_str(), &data.attributes)?;
        Ok(dict.into_any().unbind())
    }

    /// (name, is_instance) for every node.
    fn nodes(&self) -> Vec<(String, String)> {
        self.inner
            .nodes()
            .map(|n| (n.name().to_string(), n.kind().as_str().to_string()))
            .collect()
    }

    /// (name, name, relation) for every edge.
    fn edges(&self) -> Vec<(String, String, String)> {
        self.inner
            .edges()
            .map(|(a, b, rel)| (a.name.clone(), b.name.clone(), rel.as_str().to_string()))
            .collect()
    }

    /// Chart data as JSON for the given dimensions and optional selection.
    #[pyo3(signature = (dims, selected=None))]
    fn chart(&self, dims: Vec<String>, selected: Option<&str>) -> PyResult<String> {
        let config = ChartConfig::from_dims(dims.as_slice()).map_err(to_py_err)?;
        let selection = selected.and_then(|l| query::resolve(&self.inner, l).ok());
        let data = chart::chart_data(&self.inner, &config, selection.as_ref());
        serde_json::to_string(&data).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn report(&self) -> Option<String> {
        self.report.as_ref().map(|r| r.to_string())
    }

    fn __len__(&self) -> usize {
        self.inner.node_count()
    }

    fn __repr__(&self) -> String {
        format!(
            "JumpGraph(nodes={}, edges={})",
            self.inner.node_count(),
            self.inner.edge_count()
        )
    }
}
