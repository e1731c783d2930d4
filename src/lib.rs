pub mod domain;
pub mod models;
pub mod processing;
pub mod repository;

/// Cosine-distance threshold under which two products are merged.
///
/// The comparison is strict: a neighbor at exactly this distance stays
/// separate.
pub const DISTANCE_THRESHOLD: f32 = 0.15;

/// Number of nearest neighbors fetched per consolidation query.
pub const TOP_K: usize = 10;

/// Display name assigned to products with a blank or missing name.
pub const NO_NAME: &str = "no_name";

/// Separator used when joining merged identifiers and display names.
pub const MERGE_SEPARATOR: &str = " / ";
