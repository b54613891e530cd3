//! Sugerir: item-based collaborative filtering in pure Rust.
//!
//! Sugerir computes item-to-item similarity recommendations from a binary
//! user × item interaction matrix and serves personalized rankings by
//! combining per-item similarity with a user's interaction history.
//!
//! # Quick Start
//!
//! ```
//! use sugerir::prelude::*;
//!
//! // Three users, three items: "x" and "y" share the same audience,
//! // "z" has its own.
//! let interactions = InteractionMatrix::from_rows(
//!     &["x", "y", "z"],
//!     &[
//!         &[1.0, 1.0, 0.0],
//!         &[1.0, 1.0, 0.0],
//!         &[0.0, 0.0, 1.0],
//!     ],
//! ).unwrap();
//!
//! let engine = Recommender::new(interactions).with_top_n(3);
//! engine.recompute_all().unwrap();
//!
//! // "y" is the closest item to "x".
//! assert_eq!(engine.similar_items("x").unwrap()[0], "y");
//!
//! // User 2 only knows "z"; nothing they've seen is recommended back.
//! let ranked = engine.score_user(2, 10).unwrap();
//! assert!(ranked.iter().all(|s| s.name != "z"));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`data`]: Binary interaction matrix with named item columns
//! - [`similarity`]: Item-item cosine similarity engine
//! - [`ranking`]: Per-item top-N neighbor tables
//! - [`scoring`]: Per-user weighted-average scoring
//! - [`engine`]: Process-wide store with atomic model publication
//! - [`serialization`]: JSON persistence of computed models
//! - [`metrics`]: Offline ranking evaluation helpers

pub mod data;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod prelude;
pub mod primitives;
pub mod ranking;
pub mod scoring;
pub mod serialization;
pub mod similarity;

pub use error::{Result, SugerirError};
pub use primitives::{Matrix, Vector};
