//! Item-item cosine similarity.
//!
//! [`SimilarityMatrix::compute`] turns an [`InteractionMatrix`] into a
//! square, symmetric matrix of cosine similarities between item columns.
//! Only the upper triangle is computed; the lower half is mirrored.
//!
//! Zero-norm columns (items nobody interacted with) have undefined cosine
//! similarity; this crate defines it as 0.0, including the diagonal entry.
//! That is a policy decision, not an incidental NaN.

use crate::data::{normalize_name, InteractionMatrix};
use crate::error::{Result, SugerirError};
use crate::primitives::{Matrix, Vector};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Cosine similarity between two vectors: dot(u, v) / (‖u‖ · ‖v‖).
///
/// Returns 0.0 when either vector has zero norm.
///
/// # Examples
///
/// ```
/// use sugerir::primitives::Vector;
/// use sugerir::similarity::cosine_similarity;
///
/// let u = Vector::from_slice(&[1.0, 1.0, 0.0]);
/// let v = Vector::from_slice(&[1.0, 1.0, 0.0]);
/// let w = Vector::from_slice(&[0.0, 0.0, 1.0]);
///
/// assert!((cosine_similarity(&u, &v) - 1.0).abs() < 1e-6);
/// assert!(cosine_similarity(&u, &w).abs() < 1e-6);
/// ```
#[must_use]
pub fn cosine_similarity(u: &Vector<f32>, v: &Vector<f32>) -> f32 {
    let denom = u.norm() * v.norm();
    if denom == 0.0 {
        return 0.0;
    }
    u.dot(v) / denom
}

/// A square item × item cosine-similarity matrix.
///
/// Rows and columns follow the interaction matrix's item order. Symmetric
/// by construction; diagonal entries are 1.0 for items with at least one
/// interaction and 0.0 for zero-norm items.
///
/// # Examples
///
/// ```
/// use sugerir::data::InteractionMatrix;
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
///
/// let sim = SimilarityMatrix::compute(&m).unwrap();
/// assert!((sim.pair("x", "y").unwrap() - 1.0).abs() < 1e-6);
/// assert!(sim.pair("x", "z").unwrap().abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    items: Vec<String>,
    values: Matrix<f32>,
}

impl SimilarityMatrix {
    /// Computes the similarity matrix over all item-column pairs.
    ///
    /// With the `parallel` feature enabled, upper-triangle rows are
    /// computed across rayon workers; results are identical to the serial
    /// path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the interaction matrix has fewer than 2
    /// item columns or no user rows.
    pub fn compute(interactions: &InteractionMatrix) -> Result<Self> {
        let (columns, norms) = prepare(interactions)?;
        let n = columns.len();

        #[cfg(feature = "parallel")]
        let upper: Vec<Vec<f32>> = (0..n)
            .into_par_iter()
            .map(|i| upper_row(&columns, &norms, i))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let upper: Vec<Vec<f32>> = (0..n).map(|i| upper_row(&columns, &norms, i)).collect();

        Ok(Self::from_upper(interactions.item_names().to_vec(), &upper))
    }

    /// Serial variant of [`compute`](Self::compute) that reports progress
    /// after each finished item as `(items_done, n_items)`.
    ///
    /// No behavior depends on the callback; it exists for observability of
    /// long batch runs.
    ///
    /// # Errors
    ///
    /// Same conditions as [`compute`](Self::compute).
    pub fn compute_with_progress(
        interactions: &InteractionMatrix,
        mut progress: impl FnMut(usize, usize),
    ) -> Result<Self> {
        let (columns, norms) = prepare(interactions)?;
        let n = columns.len();

        let mut upper = Vec::with_capacity(n);
        for i in 0..n {
            upper.push(upper_row(&columns, &norms, i));
            progress(i + 1, n);
        }

        Ok(Self::from_upper(interactions.item_names().to_vec(), &upper))
    }

    /// Mirrors upper-triangle rows (`upper[i][k]` = similarity(i, i + k))
    /// into a full square matrix.
    fn from_upper(items: Vec<String>, upper: &[Vec<f32>]) -> Self {
        let n = items.len();
        let mut values = Matrix::zeros(n, n);
        for (i, row) in upper.iter().enumerate() {
            for (k, &value) in row.iter().enumerate() {
                let j = i + k;
                values.set(i, j, value);
                values.set(j, i, value);
            }
        }
        Self { items, values }
    }

    /// Returns the number of items.
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// Returns the item names in row/column order.
    #[must_use]
    pub fn item_names(&self) -> &[String] {
        &self.items
    }

    /// Returns the row/column index of an item, matching after
    /// case normalization.
    #[must_use]
    pub fn item_index(&self, name: &str) -> Option<usize> {
        let normalized = normalize_name(name);
        self.items.iter().position(|n| *n == normalized)
    }

    /// Similarity between two items by index.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values.get(i, j)
    }

    /// Similarity between two items by name, or `None` if either is
    /// unknown.
    #[must_use]
    pub fn pair(&self, a: &str, b: &str) -> Option<f32> {
        let i = self.item_index(a)?;
        let j = self.item_index(b)?;
        Some(self.values.get(i, j))
    }

    /// Returns an item's full similarity row.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f32] {
        self.values.row(i)
    }
}

/// Materializes item columns and their norms, validating the input shape.
fn prepare(interactions: &InteractionMatrix) -> Result<(Vec<Vector<f32>>, Vec<f32>)> {
    let n_items = interactions.n_items();
    if n_items < 2 {
        return Err(SugerirError::invalid_input(format!(
            "similarity needs at least 2 item columns, got {n_items}"
        )));
    }
    if interactions.n_users() == 0 {
        return Err(SugerirError::invalid_input(
            "similarity needs at least one user row",
        ));
    }

    let columns: Vec<Vector<f32>> = (0..n_items).map(|j| interactions.item_column(j)).collect();
    let norms: Vec<f32> = columns.iter().map(Vector::norm).collect();
    Ok((columns, norms))
}

/// Upper-triangle row for item `i`: similarities to items `i..n`.
fn upper_row(columns: &[Vector<f32>], norms: &[f32], i: usize) -> Vec<f32> {
    (i..columns.len())
        .map(|j| {
            let denom = norms[i] * norms[j];
            if denom == 0.0 {
                0.0
            } else {
                columns[i].dot(&columns[j]) / denom
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests_similarity_contract.rs"]
mod contract_tests;
