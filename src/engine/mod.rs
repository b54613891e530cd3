//! Process-wide recommendation engine.
//!
//! [`Recommender`] is the boundary an owning service calls. It holds the
//! append-only interaction matrix behind a write lock (serializing user
//! index assignment) and the last published model — similarity matrix and
//! top-N table, always paired — as an immutable snapshot behind an
//! atomically swapped [`Arc`]. Readers never observe a top-N table built
//! from a different similarity matrix.
//!
//! Batch recompute is long-running and CPU-bound; it snapshots the
//! interactions at start and computes off the locks, so users appended
//! mid-recompute simply land in the next batch.

use crate::data::InteractionMatrix;
use crate::error::{Result, SugerirError};
use crate::ranking::{TopNTable, DEFAULT_TOP_N};
use crate::scoring::{score_user, ScoredItem};
use crate::similarity::SimilarityMatrix;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Default number of ranked items returned per scoring request.
pub const DEFAULT_LIMIT: usize = 10;

/// The published output of one batch recompute: a similarity matrix and
/// the top-N table derived from it, immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Item × item cosine similarities.
    pub similarity: SimilarityMatrix,
    /// Per-item ranked neighbor lists.
    pub top_n: TopNTable,
}

/// Item-based recommendation engine with an atomically swapped model.
///
/// # Examples
///
/// ```
/// use sugerir::data::InteractionMatrix;
/// use sugerir::engine::Recommender;
///
/// let m = InteractionMatrix::from_rows(
///     &["x", "y", "z"],
///     &[
///         &[1.0, 1.0, 0.0],
///         &[1.0, 1.0, 0.0],
///         &[0.0, 0.0, 1.0],
///     ],
/// ).unwrap();
///
/// let engine = Recommender::new(m).with_top_n(3);
/// engine.recompute_all().unwrap();
///
/// let similar = engine.similar_items("x").unwrap();
/// assert_eq!(similar[0], "y");
///
/// let ranked = engine.score_user(2, 10).unwrap();
/// assert!(ranked.iter().all(|s| s.name != "z"));
/// ```
#[derive(Debug)]
pub struct Recommender {
    interactions: RwLock<InteractionMatrix>,
    model: RwLock<Option<Arc<Model>>>,
    top_n: usize,
}

impl Recommender {
    /// Creates an engine with no published model yet.
    #[must_use]
    pub fn new(interactions: InteractionMatrix) -> Self {
        Self {
            interactions: RwLock::new(interactions),
            model: RwLock::new(None),
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Creates an engine pre-loaded with a previously persisted model
    /// (the startup load path; no recompute is triggered).
    #[must_use]
    pub fn with_model(interactions: InteractionMatrix, model: Model) -> Self {
        let top_n = model.top_n.n();
        Self {
            interactions: RwLock::new(interactions),
            model: RwLock::new(Some(Arc::new(model))),
            top_n,
        }
    }

    /// Sets the top-N table size used by future recomputes.
    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Recomputes the similarity matrix and top-N table from a snapshot of
    /// the current interactions and publishes both atomically.
    ///
    /// Computation runs without holding any lock; concurrent reads keep
    /// seeing the previous model until the swap.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the interaction matrix is degenerate
    /// (fewer than 2 items, no users) or the configured N exceeds the item
    /// count. The previously published model is left untouched on error.
    pub fn recompute_all(&self) -> Result<Arc<Model>> {
        let snapshot = self.read_interactions().clone();

        let similarity = SimilarityMatrix::compute(&snapshot)?;
        let top_n = TopNTable::from_similarity(&similarity, self.top_n)?;
        let model = Arc::new(Model { similarity, top_n });

        *self.write_model() = Some(Arc::clone(&model));
        Ok(model)
    }

    /// Returns the current model if one has been computed or loaded,
    /// otherwise recomputes first (the load-or-compute startup path).
    ///
    /// # Errors
    ///
    /// Propagates `recompute_all` errors when no model exists yet.
    pub fn ensure_model(&self) -> Result<Arc<Model>> {
        if let Some(model) = self.read_model().as_ref() {
            return Ok(Arc::clone(model));
        }
        self.recompute_all()
    }

    /// Returns the currently published model.
    ///
    /// # Errors
    ///
    /// Returns `NotReady` if no recompute has run and no model was loaded.
    pub fn model(&self) -> Result<Arc<Model>> {
        self.read_model()
            .as_ref()
            .map(Arc::clone)
            .ok_or(SugerirError::NotReady)
    }

    /// Ranks unseen items for a user, truncated to [`DEFAULT_LIMIT`]
    /// entries.
    ///
    /// # Errors
    ///
    /// Same conditions as [`score_user`](Self::score_user).
    pub fn score_user_default(&self, user_index: usize) -> Result<Vec<ScoredItem>> {
        self.score_user(user_index, DEFAULT_LIMIT)
    }

    /// Ranks unseen items for a user, truncated to `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns `NotReady` without a published model and `UserNotFound` for
    /// an out-of-range index.
    pub fn score_user(&self, user_index: usize, limit: usize) -> Result<Vec<ScoredItem>> {
        let model = self.model()?;
        let interactions = self.read_interactions();
        let mut ranked = score_user(&interactions, &model.similarity, &model.top_n, user_index)?;
        ranked.truncate(limit);
        Ok(ranked)
    }

    /// Returns the items most similar to `name`, best first, excluding the
    /// item itself.
    ///
    /// # Errors
    ///
    /// Returns `NotReady` without a published model and `ItemNotFound` for
    /// an unknown item.
    pub fn similar_items(&self, name: &str) -> Result<Vec<String>> {
        let model = self.model()?;
        model.top_n.similar_items(name)
    }

    /// Appends a new user who liked the given items, returning the
    /// assigned index. Index assignment is serialized by the write lock;
    /// no recompute is triggered.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` if any name is not an item column; on error
    /// no row is appended.
    pub fn add_user<S: AsRef<str>>(&self, liked: &[S]) -> Result<usize> {
        self.write_interactions().add_user(liked)
    }

    /// Returns the item catalog in column order.
    #[must_use]
    pub fn items(&self) -> Vec<String> {
        self.read_interactions().item_names().to_vec()
    }

    /// Returns the current number of users.
    #[must_use]
    pub fn n_users(&self) -> usize {
        self.read_interactions().n_users()
    }

    /// Returns the items a user has interacted with.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` for an out-of-range index.
    pub fn liked_items(&self, user_index: usize) -> Result<Vec<String>> {
        self.read_interactions().liked_items(user_index)
    }

    // Lock poisoning only happens if a panic escaped mid-write; the data
    // here is only ever replaced wholesale, so recover the inner value
    // instead of propagating the panic to every caller.
    fn read_interactions(&self) -> RwLockReadGuard<'_, InteractionMatrix> {
        self.interactions
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_interactions(&self) -> RwLockWriteGuard<'_, InteractionMatrix> {
        self.interactions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn read_model(&self) -> RwLockReadGuard<'_, Option<Arc<Model>>> {
        self.model
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_model(&self) -> RwLockWriteGuard<'_, Option<Arc<Model>>> {
        self.model
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
