use std::collections::HashSet;

use crate::domain::product::{ConsolidatedProduct, EmbeddedProduct};
use crate::repository::VectorStoreReader;
use crate::repository::errors::RepositoryResult;

/// State of one consolidation pass.
///
/// `seen` holds every identifier already absorbed into a consolidated
/// record; it only grows. Query records themselves are never inserted, they
/// cannot be revisited because the outer iteration only advances forward.
#[derive(Debug, Default)]
pub struct ConsolidationState {
    seen: HashSet<i32>,
    output: Vec<ConsolidatedProduct>,
}

impl ConsolidationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &[ConsolidatedProduct] {
        &self.output
    }

    pub fn into_output(self) -> Vec<ConsolidatedProduct> {
        self.output
    }
}

/// Counters reported after a consolidation pass.
#[derive(Debug, Default)]
pub struct ConsolidationStats {
    pub products_total: usize,
    pub skipped_seen: usize,
    pub clusters_emitted: usize,
    pub duplicates_merged: usize,
}

/// Greedy single-pass deduplication over a nearest-neighbor store.
///
/// Iterates `products` in dataset order. Each unseen record queries its
/// `top_k` nearest neighbors; neighbors strictly under `threshold` that are
/// not yet seen are absorbed into the record's cluster and marked seen
/// immediately. Self-matches are excluded by identifier equality, not by
/// distance.
///
/// There is no transitive closure: an absorbed record never issues its own
/// query, so a chain A-B-C with only A-B and B-C under the threshold yields
/// the clusters {A, B} and {C}. Cluster membership therefore depends on
/// dataset order.
///
/// Merged ids keep discovery order; display names are re-derived by
/// membership filter over the whole dataset and so keep dataset order
/// instead.
pub fn consolidate_products<S: VectorStoreReader>(
    products: &[EmbeddedProduct],
    store: &S,
    threshold: f32,
    top_k: usize,
    state: &mut ConsolidationState,
) -> RepositoryResult<ConsolidationStats> {
    let mut stats = ConsolidationStats {
        products_total: products.len(),
        ..Default::default()
    };

    for product in products {
        if state.seen.contains(&product.id) {
            stats.skipped_seen += 1;
            continue;
        }

        let neighbors = store.query(&product.embedding, top_k)?;

        let mut duplicate_ids = vec![product.id];
        for neighbor in neighbors {
            if neighbor.id == product.id {
                continue;
            }
            if neighbor.distance < threshold && !state.seen.contains(&neighbor.id) {
                duplicate_ids.push(neighbor.id);
                state.seen.insert(neighbor.id);
                stats.duplicates_merged += 1;
            }
        }

        let members: HashSet<i32> = duplicate_ids.iter().copied().collect();
        let product_names = products
            .iter()
            .filter(|candidate| members.contains(&candidate.id))
            .map(|candidate| candidate.product_name.clone())
            .collect();

        state.output.push(ConsolidatedProduct {
            ids: duplicate_ids,
            product_names,
        });
        stats.clusters_emitted += 1;
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::{Neighbor, VectorStoreReader};

    /// Store with scripted query results keyed by the querying product's id,
    /// which the fake recovers from the first embedding component.
    #[derive(Default)]
    struct FakeVectorStore {
        responses: HashMap<i32, Vec<Neighbor>>,
    }

    impl FakeVectorStore {
        fn with_responses(responses: &[(i32, &[(i32, f32)])]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(id, neighbors)| {
                        (
                            *id,
                            neighbors
                                .iter()
                                .map(|&(id, distance)| Neighbor { id, distance })
                                .collect(),
                        )
                    })
                    .collect(),
            }
        }
    }

    impl VectorStoreReader for FakeVectorStore {
        fn query(&self, embedding: &[f32], k: usize) -> RepositoryResult<Vec<Neighbor>> {
            let id = embedding[0] as i32;
            let mut neighbors = self.responses.get(&id).cloned().unwrap_or_default();
            neighbors.truncate(k);
            Ok(neighbors)
        }

        fn product_name(&self, _id: i32) -> Option<&str> {
            None
        }
    }

    fn product(id: i32, name: &str) -> EmbeddedProduct {
        EmbeddedProduct {
            id,
            product_name: name.to_string(),
            embedding: vec![id as f32],
        }
    }

    fn consolidate(
        products: &[EmbeddedProduct],
        store: &FakeVectorStore,
    ) -> (Vec<ConsolidatedProduct>, ConsolidationStats) {
        let mut state = ConsolidationState::new();
        let stats = consolidate_products(products, store, 0.15, 10, &mut state)
            .expect("consolidation should succeed");
        (state.into_output(), stats)
    }

    #[test]
    fn merges_neighbors_under_threshold() {
        let products = vec![product(0, "Pump"), product(1, "Pump X1000")];
        let store = FakeVectorStore::with_responses(&[
            (0, &[(0, 0.0), (1, 0.1)]),
            (1, &[(1, 0.0), (0, 0.1)]),
        ]);

        let (output, stats) = consolidate(&products, &store);

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].ids, vec![0, 1]);
        assert_eq!(output[0].product_names, vec!["Pump", "Pump X1000"]);
        assert_eq!(stats.clusters_emitted, 1);
        assert_eq!(stats.duplicates_merged, 1);
        assert_eq!(stats.skipped_seen, 1);
    }

    #[test]
    fn neighbor_at_exact_threshold_is_not_merged() {
        let products = vec![product(0, "Pump"), product(1, "Valve")];
        let store = FakeVectorStore::with_responses(&[
            (0, &[(0, 0.0), (1, 0.15)]),
            (1, &[(1, 0.0), (0, 0.15)]),
        ]);

        let (output, stats) = consolidate(&products, &store);

        assert_eq!(output.len(), 2);
        assert_eq!(output[0].ids, vec![0]);
        assert_eq!(output[1].ids, vec![1]);
        assert_eq!(stats.duplicates_merged, 0);
    }

    #[test]
    fn self_match_is_excluded_by_id() {
        let products = vec![product(0, "Pump")];
        let store = FakeVectorStore::with_responses(&[(0, &[(0, 0.0)])]);

        let (output, _) = consolidate(&products, &store);

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].ids, vec![0]);
    }

    #[test]
    fn chain_is_not_merged_transitively() {
        // distance(A, B) and (B, C) under threshold, (A, C) over it
        let products = vec![product(0, "A"), product(1, "B"), product(2, "C")];
        let store = FakeVectorStore::with_responses(&[
            (0, &[(0, 0.0), (1, 0.1), (2, 0.3)]),
            (1, &[(1, 0.0), (0, 0.1), (2, 0.1)]),
            (2, &[(2, 0.0), (1, 0.1), (0, 0.3)]),
        ]);

        let (output, stats) = consolidate(&products, &store);

        assert_eq!(output.len(), 2);
        assert_eq!(output[0].ids, vec![0, 1]);
        assert_eq!(output[1].ids, vec![2]);
        assert_eq!(stats.skipped_seen, 1);
        assert_eq!(stats.clusters_emitted, 2);
    }

    #[test]
    fn every_id_lands_in_exactly_one_cluster() {
        let products: Vec<_> = (0..6).map(|id| product(id, "p")).collect();
        let store = FakeVectorStore::with_responses(&[
            (0, &[(0, 0.0), (3, 0.05), (5, 0.12)]),
            (1, &[(1, 0.0), (4, 0.2)]),
            (2, &[(2, 0.0), (4, 0.14)]),
            (4, &[(4, 0.0), (2, 0.14)]),
        ]);

        let (output, _) = consolidate(&products, &store);

        let mut all_ids: Vec<i32> = output.iter().flat_map(|c| c.ids.clone()).collect();
        all_ids.sort_unstable();
        assert_eq!(all_ids, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn names_follow_dataset_order_when_discovery_order_differs() {
        let products = vec![product(0, "A"), product(1, "B"), product(2, "C")];
        // record 0 discovers 2 before 1
        let store = FakeVectorStore::with_responses(&[(
            0,
            &[(0, 0.0), (2, 0.05), (1, 0.1)],
        )]);

        let (output, _) = consolidate(&products, &store);

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].ids, vec![0, 2, 1]);
        assert_eq!(output[0].product_names, vec!["A", "B", "C"]);
    }

    #[test]
    fn state_is_reusable_across_calls() {
        let first = vec![product(0, "A"), product(1, "B")];
        let second = vec![product(2, "C")];
        let store = FakeVectorStore::with_responses(&[
            (0, &[(0, 0.0), (1, 0.1)]),
            (2, &[(2, 0.0), (1, 0.05)]),
        ]);

        let mut state = ConsolidationState::new();
        consolidate_products(&first, &store, 0.15, 10, &mut state).expect("first pass");
        // id 1 is already seen, so the second pass must not absorb it again
        consolidate_products(&second, &store, 0.15, 10, &mut state).expect("second pass");

        let output = state.into_output();
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].ids, vec![0, 1]);
        assert_eq!(output[1].ids, vec![2]);
    }
}
