//! Configuration model loaded from external sources.

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::{DISTANCE_THRESHOLD, TOP_K};

/// Pipeline configuration shared across all stages.
///
/// Every field has a default matching the reference workflow, so a missing
/// configuration file is not an error.
#[derive(Clone, Debug, Deserialize)]
pub struct PipelineConfig {
    /// Parquet file with the raw product rows.
    pub input_path: String,
    /// CSV written after text normalization.
    pub cleaned_path: String,
    /// CSV written after embedding generation.
    pub embedded_path: String,
    /// Saved nearest-neighbor index.
    pub index_path: String,
    /// JSON sidecar with per-id metadata for the index.
    pub index_metadata_path: String,
    /// CSV with the consolidated products.
    pub output_path: String,
    /// Cosine-distance threshold for accepting a neighbor as a duplicate.
    pub distance_threshold: f32,
    /// Neighbors fetched per consolidation query.
    pub top_k: usize,
}

impl PipelineConfig {
    /// Load configuration from an optional YAML file layered over defaults.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("input_path", "data/products.parquet")?
            .set_default("cleaned_path", "data/cleaned_products.csv")?
            .set_default("embedded_path", "data/embedded_products.csv")?
            .set_default("index_path", "data/products.usearch")?
            .set_default("index_metadata_path", "data/products_metadata.json")?
            .set_default("output_path", "data/consolidated_products.csv")?
            .set_default("distance_threshold", DISTANCE_THRESHOLD as f64)?
            .set_default("top_k", TOP_K as i64)?
            .add_source(File::with_name(path).format(FileFormat::Yaml).required(false))
            .build()?
            .try_deserialize()
    }
}
