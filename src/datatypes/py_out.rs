// src/datatypes/py_out.rs
use super::values::Value;
use super::Attributes;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

pub fn value_to_py(py: Python<'_>, value: &Value) -> PyResult<PyObject> {
    match value {
        Value::String(s) => Ok(s.to_object(py)),
        Value::Float64(f) => Ok(f.to_object(py)),
        Value::Int64(i) => Ok(i.to_object(py)),
        Value::Boolean(b) => Ok(b.to_object(py)),
        Value::List(items) => Ok(items.to_object(py)),
        Value::Events(events) => {
            let list = PyList::empty_bound(py);
            for event in events {
                let dict = PyDict::new_bound(py);
                dict.set_item("timestamp", &event.timestamp)?;
                dict.set_item("desc", &event.description)?;
                dict.set_item("major", event.major)?;
                list.append(dict)?;
            }
            Ok(list.into_any().unbind())
        }
        Value::Null => Ok(py.None()),
    }
}

/// Attribute map as a Python dict, with `is_instance` merged in.
pub fn attributes_to_pydict<'py>(
    py: Python<'py>,
    is_instance: &str,
    attributes: &Attributes,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("is_instance", is_instance)?;
    for (k, v) in attributes {
        dict.set_item(k, value_to_py(py, v)?)?;
    }
    Ok(dict)
}
