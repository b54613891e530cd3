//! Core numeric primitives (Vector, Matrix).
//!
//! These types back the interaction data and the similarity tables.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
