use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{DataFrame, ParquetReader, SerReader, StringChunked};

use crate::domain::product::RawProduct;
use crate::repository::ProductReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Reads raw products from a Parquet file.
pub struct ParquetProductReader {
    path: PathBuf,
}

impl ParquetProductReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> RepositoryResult<&'a StringChunked> {
    let column = df
        .column(name)
        .map_err(|_| RepositoryError::SchemaMismatch(format!("missing column `{name}`")))?;
    column
        .str()
        .map_err(|_| RepositoryError::SchemaMismatch(format!("column `{name}` is not textual")))
}

impl ProductReader for ParquetProductReader {
    fn list(&self) -> RepositoryResult<Vec<RawProduct>> {
        let df = ParquetReader::new(File::open(&self.path)?).finish()?;

        let titles = text_column(&df, "product_title")?;
        let summaries = text_column(&df, "product_summary")?;
        let names = text_column(&df, "product_name")?;
        let brands = text_column(&df, "brand")?;
        let unspscs = text_column(&df, "unspsc")?;
        let descriptions = text_column(&df, "description")?;

        // Missing values become empty strings.
        let field = |column: &StringChunked, row: usize| -> String {
            column.get(row).unwrap_or_default().to_string()
        };

        let mut products = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            products.push(RawProduct {
                product_title: field(titles, row),
                product_summary: field(summaries, row),
                product_name: field(names, row),
                brand: field(brands, row),
                unspsc: field(unspscs, row),
                description: field(descriptions, row),
            });
        }

        Ok(products)
    }
}
