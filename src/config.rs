// src/config.rs
use crate::datatypes::records::DEFAULT_AGGREGATE_FIELDS;
use crate::error::{GraphError, Result};
use crate::graph::chart::ChartConfig;
use crate::ingest::dataset::DEFAULT_TITLE_PREFIX;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Environment variable overriding the dataset location.
pub const DATASET_ENV: &str = "JUMPSCARE_DATASET";

/// Build settings. Every field has a default, so a config file only needs
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub dataset_path: PathBuf,
    pub title_prefix: String,
    pub aggregate_fields: Vec<String>,
    pub chart: ChartConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            dataset_path: PathBuf::from("data/data_details.json"),
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
            aggregate_fields: DEFAULT_AGGREGATE_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            chart: ChartConfig::default(),
        }
    }
}

impl BuildConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config: BuildConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `JUMPSCARE_DATASET` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var(DATASET_ENV) {
            if !path.trim().is_empty() {
                self.dataset_path = PathBuf::from(path);
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.aggregate_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(GraphError::Config(
                "aggregate field names must not be empty".to_string(),
            ));
        }
        if self.chart.size_field.is_empty() || self.chart.color_field.is_empty() {
            return Err(GraphError::Config(
                "chart size and color fields must be set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        tracing::info!(
            dataset = %self.dataset_path.display(),
            fields = self.aggregate_fields.len(),
            size = %self.chart.size_field,
            color = %self.chart.color_field,
            "build configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.aggregate_fields.len(), 7);
        assert_eq!(config.title_prefix, "Jump Scares In ");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"aggregate_fields": ["imdb"], "chart": {{"size_field": "tomato", "color_field": "is_instance"}}}}"#
        )
        .unwrap();
        let config = BuildConfig::from_file(file.path()).unwrap();
        assert_eq!(config.aggregate_fields, vec!["imdb".to_string()]);
        assert_eq!(config.chart.size_field, "tomato");
        assert_eq!(config.dataset_path, PathBuf::from("data/data_details.json"));
    }

    #[test]
    fn test_rejects_empty_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"aggregate_fields": [" "]}}"#).unwrap();
        let err = BuildConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, GraphError::Config(_)));
    }
}
