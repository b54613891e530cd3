//! Per-user recommendation scoring.
//!
//! For each item a user has not interacted with, the predicted score is a
//! similarity-weighted average of the user's interactions with that item's
//! nearest neighbors (ranks 2..N of its top-N row). Already-seen items
//! never appear in the output.

use crate::data::InteractionMatrix;
use crate::error::{Result, SugerirError};
use crate::ranking::TopNTable;
use crate::similarity::SimilarityMatrix;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One recommended item with its predicted preference score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    /// Item name (case-normalized).
    pub name: String,
    /// Predicted score in [0, 1] for binary interaction data.
    pub score: f32,
}

/// Scores every unseen item for one user and returns them ranked.
///
/// For a candidate item `c` with top-N neighbors `S` (self excluded) and
/// weights `w`, the score is `Σ h·w / Σ w` where `h` is the user's binary
/// history over `S`, or 0.0 when `Σ w` is 0 (no informative neighbors).
///
/// Output is sorted by descending score, ties by item name ascending.
///
/// # Errors
///
/// Returns `UserNotFound` if `user_index` is out of range, and
/// `InvalidInput` if the similarity matrix or top-N table does not cover
/// the interaction matrix's items (mismatched batch outputs).
///
/// # Examples
///
/// ```
/// use sugerir::data::InteractionMatrix;
/// use sugerir::ranking::TopNTable;
/// use sugerir::scoring::score_user;
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
/// // User 0 has seen x and y; only z is a candidate.
/// let ranked = score_user(&m, &sim, &table, 0).unwrap();
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].name, "z");
/// ```
pub fn score_user(
    interactions: &InteractionMatrix,
    similarity: &SimilarityMatrix,
    top_n: &TopNTable,
    user_index: usize,
) -> Result<Vec<ScoredItem>> {
    let history = interactions.user_row(user_index)?;

    let mut scored = Vec::new();
    for (candidate, name) in interactions.item_names().iter().enumerate() {
        if history[candidate] == 1.0 {
            // Already interacted; never recommend.
            continue;
        }

        let neighbors = top_n.neighbors(name)?;
        let mut weighted = 0.0_f32;
        let mut total_weight = 0.0_f32;
        for neighbor in neighbors {
            if neighbor == name {
                continue;
            }
            let weight = similarity.pair(name, neighbor).ok_or_else(|| {
                SugerirError::invalid_input(format!(
                    "top-N neighbor '{neighbor}' missing from similarity matrix"
                ))
            })?;
            let column = interactions.item_index(neighbor).ok_or_else(|| {
                SugerirError::invalid_input(format!(
                    "top-N neighbor '{neighbor}' missing from interaction matrix"
                ))
            })?;
            weighted += history[column] * weight;
            total_weight += weight;
        }

        let score = if total_weight == 0.0 {
            0.0
        } else {
            weighted / total_weight
        };
        scored.push(ScoredItem {
            name: name.clone(),
            score,
        });
    }

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(scored)
}
