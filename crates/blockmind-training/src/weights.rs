//! Weight-vector operations for the genetic trainer.
//!
//! Every feature key carries a fixed `[min, max]` bound range used both for
//! fresh-random initialization and for mutation clamping. The ranges are part
//! of the trainer's contract with the evaluator: they match the coefficient
//! scales the unnormalized features were tuned against, and changing them
//! would invalidate persisted populations.

use blockmind_evaluator::{feature::Feature, weights::WeightVector};
use rand::Rng;

/// Probability of mutating each key.
pub const MUTATE_RATE: f64 = 0.2;
/// Mutation delta magnitude as a fraction of the key's bound range.
pub const MUTATE_POWER: f64 = 0.25;

/// The `[min, max]` bound range for one feature's coefficient.
#[must_use]
pub fn bounds(feature: Feature) -> (f64, f64) {
    match feature {
        Feature::Holes => (-15.0, -1.0),
        Feature::MaxHeight => (-8.0, -0.5),
        Feature::AvgHeight => (-5.0, -0.1),
        Feature::Filled => (-2.0, 0.0),
        Feature::EdgePenalty => (-5.0, 0.0),
        Feature::ClusterScore | Feature::Diversity => (0.0, 10.0),
        Feature::RowAlmostFull | Feature::ColAlmostFull => (5.0, 30.0),
        Feature::EmptyRows => (0.0, 15.0),
        Feature::ComboPreservation => (20.0, 100.0),
        Feature::PieceFit => (2.0, 20.0),
        Feature::ClearedLines => (50.0, 200.0),
        Feature::ImmediateGain => (0.0, 5.0),
    }
}

/// Generates a fresh vector with every key uniform within its bounds.
pub fn random<R>(rng: &mut R) -> WeightVector
where
    R: Rng + ?Sized,
{
    WeightVector::from_fn(|feature| {
        let (min, max) = bounds(feature);
        rng.random_range(min..=max)
    })
}

/// Uniform per-key crossover: each key comes from either parent with equal
/// probability, independently.
pub fn crossover<R>(p1: &WeightVector, p2: &WeightVector, rng: &mut R) -> WeightVector
where
    R: Rng + ?Sized,
{
    WeightVector::from_fn(|feature| {
        if rng.random_bool(0.5) {
            p1.get(feature)
        } else {
            p2.get(feature)
        }
    })
}

/// Mutates each key with probability [`MUTATE_RATE`] by a uniform delta scaled
/// to [`MUTATE_POWER`] of the key's bound range, clamping back into bounds.
pub fn mutate<R>(weights: &mut WeightVector, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for feature in Feature::ALL {
        if rng.random_bool(MUTATE_RATE) {
            let (min, max) = bounds(feature);
            let delta = (max - min) * MUTATE_POWER;
            let perturbed = weights.get(feature) + rng.random_range(-delta..=delta);
            weights.set(feature, perturbed.clamp(min, max));
        }
    }
}
