//! Per-item top-N neighbor tables.
//!
//! A [`TopNTable`] is derived from a [`SimilarityMatrix`]: for every item,
//! the N most similar items ordered most-to-least similar. Rank 1 is the
//! item itself whenever its interaction vector has nonzero norm, since
//! self-similarity is then maximal.

use crate::error::{Result, SugerirError};
use crate::similarity::SimilarityMatrix;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default number of neighbors kept per item.
pub const DEFAULT_TOP_N: usize = 10;

/// Per-item ranked lists of most similar items, truncated to N entries.
///
/// Items with exactly equal similarity are ordered by name ascending
/// (except that an item always outranks an equal-scoring duplicate of
/// itself); the table is fully deterministic for a given similarity
/// matrix.
///
/// # Examples
///
/// ```
/// use sugerir::data::InteractionMatrix;
/// use sugerir::ranking::TopNTable;
/// use sugerir::similarity::SimilarityMatrix;
///
/// let m = InteractionMatrix::from_rows(
///     &["x", "y", "z"],
///     &[
///         &[1.0, 1.0, 0.0],
///         &[1.0, 1.0, 0.0],
///         &[0.0, 0.0, 1.0],
///     ],
/// ).unwrap();
/// let sim = SimilarityMatrix::compute(&m).unwrap();
/// let table = TopNTable::from_similarity(&sim, 3).unwrap();
///
/// // Rank 1 is "x" itself, then its twin "y", then disjoint "z".
/// assert_eq!(table.neighbors("x").unwrap(), &["x", "y", "z"]);
/// assert_eq!(table.similar_items("x").unwrap(), &["y", "z"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopNTable {
    n: usize,
    items: Vec<String>,
    /// `rows[i]` holds the ranked neighbor names for `items[i]`.
    rows: Vec<Vec<String>>,
}

impl TopNTable {
    /// Builds the table by ranking every item's similarity row.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `n` is 0 or exceeds the number of items.
    pub fn from_similarity(similarity: &SimilarityMatrix, n: usize) -> Result<Self> {
        let n_items = similarity.n_items();
        if n == 0 {
            return Err(SugerirError::invalid_input("top-N size must be at least 1"));
        }
        if n > n_items {
            return Err(SugerirError::invalid_input(format!(
                "top-N size {n} exceeds item count {n_items}"
            )));
        }

        let items = similarity.item_names().to_vec();
        let rows = (0..n_items)
            .map(|i| {
                let mut ranked: Vec<usize> = (0..n_items).collect();
                // Descending similarity; on an exact tie the item itself
                // wins (keeps rank 1 = self even when another column is a
                // duplicate), then item name ascending for determinism.
                ranked.sort_by(|&a, &b| {
                    similarity
                        .get(i, b)
                        .partial_cmp(&similarity.get(i, a))
                        .unwrap_or(Ordering::Equal)
                        .then_with(|| (b == i).cmp(&(a == i)))
                        .then_with(|| items[a].cmp(&items[b]))
                });
                ranked
                    .into_iter()
                    .take(n)
                    .map(|j| items[j].clone())
                    .collect()
            })
            .collect();

        Ok(Self { n, items, rows })
    }

    /// Returns the configured N.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the item names in table order.
    #[must_use]
    pub fn item_names(&self) -> &[String] {
        &self.items
    }

    /// Returns an item's full ranked neighbor row (rank 1 first).
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if the item is not in the table.
    pub fn neighbors(&self, name: &str) -> Result<&[String]> {
        let normalized = crate::data::normalize_name(name);
        self.items
            .iter()
            .position(|n| *n == normalized)
            .map(|i| self.rows[i].as_slice())
            .ok_or_else(|| SugerirError::ItemNotFound {
                name: name.to_string(),
            })
    }

    /// Returns an item's ranked neighbors with the item itself excluded.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if the item is not in the table.
    pub fn similar_items(&self, name: &str) -> Result<Vec<String>> {
        let normalized = crate::data::normalize_name(name);
        let row = self.neighbors(name)?;
        Ok(row
            .iter()
            .filter(|n| **n != normalized)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InteractionMatrix;

    fn sample_similarity() -> SimilarityMatrix {
        let m = InteractionMatrix::from_rows(
            &["x", "y", "z"],
            &[
                &[1.0, 1.0, 0.0],
                &[1.0, 1.0, 0.0],
                &[0.0, 0.0, 1.0],
            ],
        )
        .expect("valid matrix");
        SimilarityMatrix::compute(&m).expect("computes")
    }

    #[test]
    fn test_rank_one_is_self() {
        let table = TopNTable::from_similarity(&sample_similarity(), 3).expect("builds");
        for name in ["x", "y", "z"] {
            assert_eq!(table.neighbors(name).expect("known item")[0], name);
        }
    }

    #[test]
    fn test_twin_ranks_above_disjoint() {
        let table = TopNTable::from_similarity(&sample_similarity(), 3).expect("builds");
        assert_eq!(table.neighbors("x").expect("known item"), &["x", "y", "z"]);
        assert_eq!(table.neighbors("y").expect("known item"), &["y", "x", "z"]);
    }

    #[test]
    fn test_truncation() {
        let table = TopNTable::from_similarity(&sample_similarity(), 2).expect("builds");
        assert_eq!(table.neighbors("x").expect("known item").len(), 2);
        assert_eq!(table.n(), 2);
    }

    #[test]
    fn test_ties_break_by_name_ascending() {
        // All four items share one user, so every off-diagonal pair scores
        // the same; order within a rank class must be alphabetical.
        let m = InteractionMatrix::from_rows(
            &["delta", "alpha", "charlie", "bravo"],
            &[&[1.0, 1.0, 1.0, 1.0]],
        )
        .expect("valid matrix");
        let sim = SimilarityMatrix::compute(&m).expect("computes");
        let table = TopNTable::from_similarity(&sim, 4).expect("builds");

        // Everything ties at 1.0: the item itself keeps rank 1, the rest
        // of the row is alphabetical.
        assert_eq!(
            table.neighbors("bravo").expect("known item"),
            &["bravo", "alpha", "charlie", "delta"]
        );
        assert_eq!(
            table.neighbors("delta").expect("known item"),
            &["delta", "alpha", "bravo", "charlie"]
        );
        assert_eq!(
            table.neighbors("alpha").expect("known item"),
            &["alpha", "bravo", "charlie", "delta"]
        );
    }

    #[test]
    fn test_similar_items_excludes_self() {
        let table = TopNTable::from_similarity(&sample_similarity(), 3).expect("builds");
        let similar = table.similar_items("x").expect("known item");
        assert!(!similar.contains(&"x".to_string()));
        assert_eq!(similar, &["y", "z"]);
    }

    #[test]
    fn test_unknown_item_errors() {
        let table = TopNTable::from_similarity(&sample_similarity(), 3).expect("builds");
        let err = table.similar_items("does not exist").unwrap_err();
        assert!(matches!(err, SugerirError::ItemNotFound { .. }));
    }

    #[test]
    fn test_lookup_is_case_normalized() {
        let table = TopNTable::from_similarity(&sample_similarity(), 3).expect("builds");
        assert!(table.neighbors(" X ").is_ok());
    }

    #[test]
    fn test_n_zero_rejected() {
        let err = TopNTable::from_similarity(&sample_similarity(), 0).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_n_exceeding_items_rejected() {
        let err = TopNTable::from_similarity(&sample_similarity(), 4).unwrap_err();
        assert!(err.to_string().contains("exceeds item count"));
    }

    #[test]
    fn test_determinism() {
        let sim = sample_similarity();
        let a = TopNTable::from_similarity(&sim, 3).expect("builds");
        let b = TopNTable::from_similarity(&sim, 3).expect("builds");
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_round_trip() {
        let table = TopNTable::from_similarity(&sample_similarity(), 3).expect("builds");
        let json = serde_json::to_string(&table).expect("serializes");
        let back: TopNTable = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(table, back);
    }
}
