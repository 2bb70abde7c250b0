// src/ingest/mod.rs
pub mod dataset;
pub mod field_parser;

pub use dataset::{load_dataset, Dataset};
pub use field_parser::{classify, ScrapedField, TextBlock};
