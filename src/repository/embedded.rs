use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::product::EmbeddedProduct;
use crate::repository::errors::RepositoryResult;
use crate::repository::{EmbeddedProductReader, EmbeddedProductWriter};

/// CSV row with the embedding serialized as a JSON list literal.
#[derive(Debug, Serialize, Deserialize)]
struct EmbeddedRow {
    id: i32,
    product_name: String,
    embedding: String,
}

/// CSV-backed storage for embedded products.
///
/// Columns: `id`, `product_name`, `embedding`.
pub struct CsvEmbeddedProductRepository {
    path: PathBuf,
}

impl CsvEmbeddedProductRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl EmbeddedProductWriter for CsvEmbeddedProductRepository {
    fn save(&self, products: &[EmbeddedProduct]) -> RepositoryResult<usize> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        if products.is_empty() {
            writer.write_record(["id", "product_name", "embedding"])?;
        }
        for product in products {
            writer.serialize(EmbeddedRow {
                id: product.id,
                product_name: product.product_name.clone(),
                embedding: serde_json::to_string(&product.embedding)?,
            })?;
        }
        writer.flush()?;

        Ok(products.len())
    }
}

impl EmbeddedProductReader for CsvEmbeddedProductRepository {
    fn list(&self) -> RepositoryResult<Vec<EmbeddedProduct>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut products = Vec::new();
        for record in reader.deserialize() {
            let row: EmbeddedRow = record?;
            products.push(EmbeddedProduct {
                id: row.id,
                product_name: row.product_name,
                embedding: serde_json::from_str(&row.embedding)?,
            });
        }

        Ok(products)
    }
}
