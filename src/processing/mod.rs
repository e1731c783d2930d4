use std::path::Path;

use crate::domain::product::EmbeddedProduct;
use crate::models::config::PipelineConfig;
use crate::processing::consolidate::{ConsolidationState, consolidate_products};
use crate::processing::embedding::Embedder;
use crate::processing::normalize::clean_products;
use crate::repository::cleaned::CsvCleanedProductRepository;
use crate::repository::consolidated::CsvConsolidatedProductRepository;
use crate::repository::embedded::CsvEmbeddedProductRepository;
use crate::repository::product::ParquetProductReader;
use crate::repository::vector::UsearchVectorStore;
use crate::repository::{
    CleanedProductWriter, ConsolidatedProductWriter, EmbeddedProductWriter, ProductReader,
    VectorStoreWriter,
};

pub mod consolidate;
pub mod embedding;
pub mod normalize;

/// Counters reported after a full pipeline run.
#[derive(Debug, Default)]
pub struct PipelineStats {
    pub products_loaded: usize,
    pub embeddings_generated: usize,
    pub clusters_emitted: usize,
    pub duplicates_merged: usize,
}

/// Run the full deduplication pipeline: load, normalize, embed, index,
/// consolidate. Every stage persists its result before the next one runs.
///
/// Each stage failure is fatal to the whole run; there is no partial-failure
/// or retry policy.
pub fn run_dedup_pipeline<E: Embedder>(
    config: &PipelineConfig,
    embedder: &mut E,
) -> Result<PipelineStats, ()> {
    let mut stats = PipelineStats::default();

    let raw = match ParquetProductReader::new(&config.input_path).list() {
        Ok(raw) => raw,
        Err(error) => {
            log::error!("Failed to read products from {}: {error}", config.input_path);
            return Err(());
        }
    };
    stats.products_loaded = raw.len();
    log::info!("Loaded {} products from {}", raw.len(), config.input_path);

    let cleaned = clean_products(&raw);
    if let Err(error) = CsvCleanedProductRepository::new(&config.cleaned_path).save(&cleaned) {
        log::error!(
            "Failed to write cleaned products to {}: {error}",
            config.cleaned_path
        );
        return Err(());
    }

    let texts: Vec<String> = cleaned
        .iter()
        .map(|product| product.combined_text.clone())
        .collect();
    let vectors = match embedder.embed(&texts) {
        Ok(vectors) => vectors,
        Err(error) => {
            log::error!("Embedding generation failed: {error}");
            return Err(());
        }
    };
    if vectors.len() != cleaned.len() {
        log::error!(
            "Embedder returned {} vectors for {} products",
            vectors.len(),
            cleaned.len()
        );
        return Err(());
    }
    stats.embeddings_generated = vectors.len();

    let embedded: Vec<EmbeddedProduct> = cleaned
        .into_iter()
        .zip(vectors)
        .map(|(product, embedding)| EmbeddedProduct {
            id: product.id,
            product_name: product.product_name,
            embedding,
        })
        .collect();
    if let Err(error) = CsvEmbeddedProductRepository::new(&config.embedded_path).save(&embedded) {
        log::error!(
            "Failed to write embedded products to {}: {error}",
            config.embedded_path
        );
        return Err(());
    }

    let output_repo = CsvConsolidatedProductRepository::new(&config.output_path);

    if embedded.is_empty() {
        log::warn!("No products to consolidate, writing empty output");
        if let Err(error) = output_repo.save(&[]) {
            log::error!(
                "Failed to write consolidated products to {}: {error}",
                config.output_path
            );
            return Err(());
        }
        return Ok(stats);
    }

    let store = match build_vector_store(config, &embedded) {
        Ok(store) => store,
        Err(()) => return Err(()),
    };

    let mut state = ConsolidationState::new();
    let consolidation = match consolidate_products(
        &embedded,
        &store,
        config.distance_threshold,
        config.top_k,
        &mut state,
    ) {
        Ok(consolidation) => consolidation,
        Err(error) => {
            log::error!("Consolidation failed: {error}");
            return Err(());
        }
    };
    stats.clusters_emitted = consolidation.clusters_emitted;
    stats.duplicates_merged = consolidation.duplicates_merged;

    if let Err(error) = output_repo.save(state.output()) {
        log::error!(
            "Failed to write consolidated products to {}: {error}",
            config.output_path
        );
        return Err(());
    }

    log::info!(
        "Finished deduplication: products_loaded={}, embeddings_generated={}, clusters_emitted={}, duplicates_merged={}",
        stats.products_loaded,
        stats.embeddings_generated,
        stats.clusters_emitted,
        stats.duplicates_merged
    );

    Ok(stats)
}

/// Index every embedded product and persist the store to disk.
fn build_vector_store(
    config: &PipelineConfig,
    embedded: &[EmbeddedProduct],
) -> Result<UsearchVectorStore, ()> {
    let dimensions = embedded[0].embedding.len();
    let mut store = match UsearchVectorStore::new(dimensions) {
        Ok(store) => store,
        Err(error) => {
            log::error!("Failed to create vector store: {error}");
            return Err(());
        }
    };

    if let Err(error) = store.reserve(embedded.len()) {
        log::error!("Failed to reserve vector store capacity: {error}");
        return Err(());
    }

    for product in embedded {
        if let Err(error) = store.upsert(product.id, &product.embedding, &product.product_name) {
            log::error!("Failed to index product {}: {error}", product.id);
            return Err(());
        }
    }

    if let Err(error) = store.save(
        Path::new(&config.index_path),
        Path::new(&config.index_metadata_path),
    ) {
        log::error!("Failed to save vector store to {}: {error}", config.index_path);
        return Err(());
    }
    log::info!(
        "Indexed {} products into {}",
        embedded.len(),
        config.index_path
    );

    Ok(store)
}
