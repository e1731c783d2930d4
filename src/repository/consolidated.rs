use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::MERGE_SEPARATOR;
use crate::domain::product::ConsolidatedProduct;
use crate::repository::ConsolidatedProductWriter;
use crate::repository::errors::RepositoryResult;

#[derive(Debug, Serialize)]
struct ConsolidatedRow {
    ids: String,
    product_name: String,
}

/// CSV-backed storage for consolidated products.
///
/// Columns: `ids`, `product_name`, both joined with `" / "`.
pub struct CsvConsolidatedProductRepository {
    path: PathBuf,
}

impl CsvConsolidatedProductRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConsolidatedProductWriter for CsvConsolidatedProductRepository {
    fn save(&self, products: &[ConsolidatedProduct]) -> RepositoryResult<usize> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        if products.is_empty() {
            writer.write_record(["ids", "product_name"])?;
        }
        for product in products {
            let ids = product
                .ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(MERGE_SEPARATOR);
            writer.serialize(ConsolidatedRow {
                ids,
                product_name: product.product_names.join(MERGE_SEPARATOR),
            })?;
        }
        writer.flush()?;

        Ok(products.len())
    }
}
