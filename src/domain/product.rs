use serde::{Deserialize, Serialize};

/// A product row as read from the input dataset.
///
/// Missing values are materialized as empty strings by the reader.
#[derive(Debug, Clone, Default)]
pub struct RawProduct {
    pub product_title: String,
    pub product_summary: String,
    pub product_name: String,
    pub brand: String,
    pub unspsc: String,
    pub description: String,
}

/// A product after text normalization.
///
/// `id` is the 0-based row index of the product in the input dataset and is
/// stable for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanProduct {
    pub id: i32,
    pub product_name: String,
    pub combined_text: String,
}

/// A product with its embedding vector.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedProduct {
    pub id: i32,
    pub product_name: String,
    pub embedding: Vec<f32>,
}

/// One cluster of duplicate products produced by consolidation.
///
/// `ids` follows discovery order: the query record first, then accepted
/// neighbors in the order the index returned them. `product_names` follows
/// dataset order instead, because names are re-derived by membership filter
/// over the whole dataset. Neither list is deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatedProduct {
    pub ids: Vec<i32>,
    pub product_names: Vec<String>,
}
