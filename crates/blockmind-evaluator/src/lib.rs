//! Move evaluation for the block-placement agent.
//!
//! This crate implements a two-level evaluation architecture:
//!
//! 1. **Placement Evaluation** ([`placement_evaluator`]) - scores a single
//!    simulated placement as a weighted sum of 14 board features.
//! 2. **Move Search** ([`move_search`]) - enumerates every legal placement for
//!    the current hand, simulates each, and selects the maximizer.
//!
//! # Design: unnormalized linear model
//!
//! Placement scores are `Σ weight[key] × feature[key]` with no normalization
//! and no clipping. Weight magnitudes encode relative feature scale, and
//! trained weight vectors are calibrated against these exact scales; rescaling
//! a feature would invalidate every persisted training artifact. The genetic
//! trainer's per-key bounds (`blockmind-training`) match the same scales.
//!
//! # Supporting modules
//!
//! - [`feature`] - the 14 named features and their extraction rules
//! - [`weights`] - the [`weights::WeightVector`] type, its flat-map JSON
//!   format, and the built-in fallback vector
//! - [`placement_analysis`] - one candidate placement simulated on a cloned
//!   grid (cleared lines, score delta, resulting board)

pub mod feature;
pub mod move_search;
pub mod placement_analysis;
pub mod placement_evaluator;
pub mod weights;
