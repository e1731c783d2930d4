//! Helpers for integration tests.

use std::path::Path;

use product_dedup::models::config::PipelineConfig;
use product_dedup::processing::embedding::Embedder;
use tempfile::TempDir;

/// Temporary workspace holding every pipeline artifact.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir."),
        }
    }

    pub fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }

    pub fn config(&self) -> PipelineConfig {
        let join = |name: &str| self.path(name).to_string_lossy().into_owned();
        PipelineConfig {
            input_path: join("products.parquet"),
            cleaned_path: join("cleaned_products.csv"),
            embedded_path: join("embedded_products.csv"),
            index_path: join("products.usearch"),
            index_metadata_path: join("products_metadata.json"),
            output_path: join("consolidated_products.csv"),
            distance_threshold: 0.15,
            top_k: 10,
        }
    }
}

/// Embedder returning preset vectors positionally, in dataset order.
pub struct FakeEmbedder {
    vectors: Vec<Vec<f32>>,
}

impl FakeEmbedder {
    pub fn new(vectors: Vec<Vec<f32>>) -> Self {
        Self { vectors }
    }
}

impl Embedder for FakeEmbedder {
    fn embed(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>, String> {
        if texts.len() != self.vectors.len() {
            return Err(format!(
                "expected {} texts, got {}",
                self.vectors.len(),
                texts.len()
            ));
        }
        Ok(self.vectors.clone())
    }
}

/// Write a product Parquet file with the six input columns.
pub fn write_input_parquet(path: &Path, rows: &[[Option<&str>; 6]]) {
    use polars::prelude::{DataFrame, NamedFrom, ParquetWriter, Series};

    let column = |index: usize| -> Vec<Option<&str>> { rows.iter().map(|row| row[index]).collect() };

    let mut df = DataFrame::new(vec![
        Series::new("product_title".into(), column(0)),
        Series::new("product_summary".into(), column(1)),
        Series::new("product_name".into(), column(2)),
        Series::new("brand".into(), column(3)),
        Series::new("unspsc".into(), column(4)),
        Series::new("description".into(), column(5)),
    ])
    .expect("Failed to build dataframe.");

    let file = std::fs::File::create(path).expect("Failed to create parquet file.");
    ParquetWriter::new(file)
        .finish(&mut df)
        .expect("Failed to write parquet file.");
}
