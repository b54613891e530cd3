//! Ranking evaluation metrics.
//!
//! Offline helpers for judging recommendation quality against held-out
//! interactions.

/// Hit@K: 1.0 if the target appears in the top-K recommendations.
///
/// # Examples
///
/// ```
/// use sugerir::metrics::hit_at_k;
///
/// let recs = ["abba", "coldplay", "muse"];
/// assert_eq!(hit_at_k(&recs, &"coldplay", 1), 0.0);
/// assert_eq!(hit_at_k(&recs, &"coldplay", 2), 1.0);
/// ```
#[must_use]
pub fn hit_at_k<T: PartialEq>(recommendations: &[T], target: &T, k: usize) -> f32 {
    if recommendations.iter().take(k).any(|r| r == target) {
        1.0
    } else {
        0.0
    }
}

/// Precision@K: fraction of the top-K recommendations that are relevant.
///
/// Returns 0.0 for k = 0.
///
/// # Examples
///
/// ```
/// use sugerir::metrics::precision_at_k;
///
/// let recs = ["a", "b", "c", "d"];
/// let relevant = ["a", "c"];
/// assert!((precision_at_k(&recs, &relevant, 4) - 0.5).abs() < 1e-6);
/// ```
#[must_use]
pub fn precision_at_k<T: PartialEq>(recommendations: &[T], relevant: &[T], k: usize) -> f32 {
    if k == 0 {
        return 0.0;
    }
    let considered = recommendations.iter().take(k);
    let hits = considered.filter(|r| relevant.contains(r)).count();
    hits as f32 / k.min(recommendations.len()).max(1) as f32
}

/// Reciprocal rank of the first relevant recommendation, or 0.0 if none
/// of the recommendations is relevant.
///
/// # Examples
///
/// ```
/// use sugerir::metrics::reciprocal_rank;
///
/// let recs = ["a", "b", "c"];
/// assert!((reciprocal_rank(&recs, &["b"]) - 0.5).abs() < 1e-6);
/// assert_eq!(reciprocal_rank(&recs, &["zz"]), 0.0);
/// ```
#[must_use]
pub fn reciprocal_rank<T: PartialEq>(recommendations: &[T], relevant: &[T]) -> f32 {
    for (rank, rec) in recommendations.iter().enumerate() {
        if relevant.contains(rec) {
            return 1.0 / (rank + 1) as f32;
        }
    }
    0.0
}
