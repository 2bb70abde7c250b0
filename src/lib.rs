// src/lib.rs
//! Movie jump-scare graph: scraped movie records become a movie/director/tag
//! graph with per-director and per-tag aggregate scores.

pub mod config;
pub mod datatypes;
pub mod error;
pub mod graph;
pub mod ingest;

pub use config::BuildConfig;
pub use datatypes::{MovieRecord, RawRecord, Value};
pub use error::{GraphError, Result};
pub use graph::schema::{MovieGraph, NodeId, NodeKind, Relation};
pub use graph::{build_from_dataset, build_graph, load_and_build};

#[cfg(feature = "python")]
mod python {
    use crate::graph::io_operations::load_snapshot;
    use crate::graph::pymethods::JumpGraph;
    use pyo3::prelude::*;

    #[pyfunction]
    fn load(path: String) -> PyResult<JumpGraph> {
        load_snapshot(&path)
            .map(|graph| JumpGraph::new(graph, None))
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyIOError, _>(e.to_string()))
    }

    #[pymodule]
    fn jumpscare_graph(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add("__version__", env!("CARGO_PKG_VERSION"))?;
        m.add_function(wrap_pyfunction!(load, m)?)?;
        m.add_class::<JumpGraph>()?;
        Ok(())
    }
}
