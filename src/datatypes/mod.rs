// src/datatypes/mod.rs
pub mod records;
pub mod values;
#[cfg(feature = "python")]
pub mod py_out;

pub use records::{Attributes, MovieRecord, RawRecord};
pub use values::{ScareEvent, Value};
