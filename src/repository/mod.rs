use crate::domain::product::{CleanProduct, ConsolidatedProduct, EmbeddedProduct, RawProduct};
use crate::repository::errors::RepositoryResult;

pub mod cleaned;
pub mod consolidated;
pub mod embedded;
pub mod errors;
pub mod product;
pub mod vector;

/// A single result of a nearest-neighbor query, ranked by cosine distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: i32,
    pub distance: f32,
}

pub trait ProductReader {
    fn list(&self) -> RepositoryResult<Vec<RawProduct>>;
}

pub trait CleanedProductReader {
    fn list(&self) -> RepositoryResult<Vec<CleanProduct>>;
}

pub trait CleanedProductWriter {
    fn save(&self, products: &[CleanProduct]) -> RepositoryResult<usize>;
}

pub trait EmbeddedProductReader {
    fn list(&self) -> RepositoryResult<Vec<EmbeddedProduct>>;
}

pub trait EmbeddedProductWriter {
    fn save(&self, products: &[EmbeddedProduct]) -> RepositoryResult<usize>;
}

pub trait ConsolidatedProductWriter {
    fn save(&self, products: &[ConsolidatedProduct]) -> RepositoryResult<usize>;
}

/// Write access to the nearest-neighbor index.
pub trait VectorStoreWriter {
    /// Insert or replace the embedding and metadata stored under `id`.
    fn upsert(&mut self, id: i32, embedding: &[f32], product_name: &str) -> RepositoryResult<()>;
}

/// Query access to the nearest-neighbor index.
pub trait VectorStoreReader {
    /// Return up to `k` neighbors ordered by increasing cosine distance.
    fn query(&self, embedding: &[f32], k: usize) -> RepositoryResult<Vec<Neighbor>>;

    /// Metadata stored alongside the embedding, if the id is present.
    fn product_name(&self, id: i32) -> Option<&str>;
}
