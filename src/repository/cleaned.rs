use std::path::{Path, PathBuf};

use crate::domain::product::CleanProduct;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CleanedProductReader, CleanedProductWriter};

/// CSV-backed storage for normalized products.
///
/// Columns: `id`, `product_name`, `combined_text`.
pub struct CsvCleanedProductRepository {
    path: PathBuf,
}

impl CsvCleanedProductRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CleanedProductWriter for CsvCleanedProductRepository {
    fn save(&self, products: &[CleanProduct]) -> RepositoryResult<usize> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        if products.is_empty() {
            // serde only emits headers with the first record
            writer.write_record(["id", "product_name", "combined_text"])?;
        }
        for product in products {
            writer.serialize(product)?;
        }
        writer.flush()?;

        Ok(products.len())
    }
}

impl CleanedProductReader for CsvCleanedProductRepository {
    fn list(&self) -> RepositoryResult<Vec<CleanProduct>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut products = Vec::new();
        for record in reader.deserialize() {
            products.push(record?);
        }

        Ok(products)
    }
}
