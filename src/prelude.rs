//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sugerir::prelude::*;
//! ```

pub use crate::data::InteractionMatrix;
pub use crate::engine::{Model, Recommender, DEFAULT_LIMIT};
pub use crate::error::{Result, SugerirError};
pub use crate::primitives::{Matrix, Vector};
pub use crate::ranking::{TopNTable, DEFAULT_TOP_N};
pub use crate::scoring::{score_user, ScoredItem};
pub use crate::similarity::{cosine_similarity, SimilarityMatrix};
