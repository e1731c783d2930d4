use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use usearch::{Index, IndexOptions, MetricKind, ScalarKind};

use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{Neighbor, VectorStoreReader, VectorStoreWriter};

fn index_options(dimensions: usize) -> IndexOptions {
    IndexOptions {
        dimensions,
        metric: MetricKind::Cos,
        quantization: ScalarKind::F32,
        ..Default::default()
    }
}

fn index_error<E: std::fmt::Display>(error: E) -> RepositoryError {
    RepositoryError::VectorIndex(error.to_string())
}

/// Cosine-distance nearest-neighbor store backed by an in-process usearch
/// index, with a sidecar map holding per-id `product_name` metadata.
pub struct UsearchVectorStore {
    index: Index,
    names: HashMap<i32, String>,
    dimensions: usize,
}

impl UsearchVectorStore {
    pub fn new(dimensions: usize) -> RepositoryResult<Self> {
        let index = Index::new(&index_options(dimensions)).map_err(index_error)?;

        Ok(Self {
            index,
            names: HashMap::new(),
            dimensions,
        })
    }

    /// Pre-allocate capacity for `capacity` vectors.
    pub fn reserve(&mut self, capacity: usize) -> RepositoryResult<()> {
        self.index.reserve(capacity).map_err(index_error)
    }

    pub fn len(&self) -> usize {
        self.index.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Persist the index and its metadata sidecar to disk.
    pub fn save(&self, index_path: &Path, metadata_path: &Path) -> RepositoryResult<()> {
        for path in [index_path, metadata_path] {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let index_path = index_path
            .to_str()
            .ok_or_else(|| RepositoryError::VectorIndex("non-utf8 index path".to_string()))?;
        self.index.save(index_path).map_err(index_error)?;

        let file = File::create(metadata_path)?;
        serde_json::to_writer(file, &self.names)?;

        Ok(())
    }

    /// Restore a store previously written by [`UsearchVectorStore::save`].
    pub fn load(
        dimensions: usize,
        index_path: &Path,
        metadata_path: &Path,
    ) -> RepositoryResult<Self> {
        let index = Index::new(&index_options(dimensions)).map_err(index_error)?;
        let path = index_path
            .to_str()
            .ok_or_else(|| RepositoryError::VectorIndex("non-utf8 index path".to_string()))?;
        index.load(path).map_err(index_error)?;

        let file = File::open(metadata_path)?;
        let names = serde_json::from_reader(file)?;

        Ok(Self {
            index,
            names,
            dimensions,
        })
    }
}

impl VectorStoreWriter for UsearchVectorStore {
    fn upsert(&mut self, id: i32, embedding: &[f32], product_name: &str) -> RepositoryResult<()> {
        if embedding.len() != self.dimensions {
            return Err(RepositoryError::SchemaMismatch(format!(
                "embedding for {id} has {} dimensions, index expects {}",
                embedding.len(),
                self.dimensions
            )));
        }

        let key = id as u64;
        if self.index.contains(key) {
            self.index.remove(key).map_err(index_error)?;
        }

        if self.index.size() >= self.index.capacity() {
            let target = (self.index.capacity() * 2).max(16);
            self.index.reserve(target).map_err(index_error)?;
        }

        self.index.add(key, embedding).map_err(index_error)?;
        self.names.insert(id, product_name.to_string());

        Ok(())
    }
}

impl VectorStoreReader for UsearchVectorStore {
    fn query(&self, embedding: &[f32], k: usize) -> RepositoryResult<Vec<Neighbor>> {
        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let matches = self.index.search(embedding, k).map_err(index_error)?;

        Ok(matches
            .keys
            .iter()
            .zip(matches.distances.iter())
            .map(|(&key, &distance)| Neighbor {
                id: key as i32,
                distance,
            })
            .collect())
    }

    fn product_name(&self, id: i32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }
}
