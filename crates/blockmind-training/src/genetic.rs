//! Population state and the generation turnover.

use blockmind_evaluator::weights::WeightVector;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::weights;

/// Number of members in every generation.
pub const POPULATION_SIZE: usize = 10;
/// Top members carried verbatim into the next generation.
pub const ELITE_COUNT: usize = 2;

/// One candidate solution: a weight vector and its fitness.
///
/// Wire field names (`w`, `f`) match the persisted population format. Fitness
/// `0` is the "not yet evaluated in this generation cycle" sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub w: WeightVector,
    pub f: f64,
}

impl Member {
    #[must_use]
    pub fn unevaluated(w: WeightVector) -> Self {
        Self { w, f: 0.0 }
    }

    /// Whether this member has been scored in the current cycle.
    #[must_use]
    pub fn evaluated(&self) -> bool {
        self.f > 0.0
    }
}

/// The all-time best weight vector, persisted independently of the rotating
/// population so a regression never loses the best-known configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestRecord {
    pub w: WeightVector,
    pub f: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,
}

/// A fixed-size ordered population of weight vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Population {
    members: Vec<Member>,
}

impl Population {
    /// Creates a fresh random population, optionally seeding member 0 with the
    /// currently active weight vector so a known-good configuration enters the
    /// first generation.
    #[must_use]
    pub fn fresh<R>(rng: &mut R, seed: Option<WeightVector>) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut members: Vec<Member> = (0..POPULATION_SIZE)
            .map(|_| Member::unevaluated(weights::random(rng)))
            .collect();
        if let Some(seed) = seed {
            members[0].w = seed;
        }
        Self { members }
    }

    /// Restores a persisted population, rejecting any with the wrong size.
    #[must_use]
    pub fn from_members(members: Vec<Member>) -> Option<Self> {
        (members.len() == POPULATION_SIZE).then_some(Self { members })
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn member(&self, index: usize) -> &Member {
        &self.members[index]
    }

    /// Records the fitness of the member currently bound to the live game.
    pub fn assign_fitness(&mut self, index: usize, fitness: f64) {
        self.members[index].f = fitness;
    }

    /// Whether every member carries a nonzero fitness.
    #[must_use]
    pub fn all_evaluated(&self) -> bool {
        self.members.iter().all(Member::evaluated)
    }

    /// Sorts members by fitness descending. The sort is stable, so equal
    /// fitness preserves the existing order.
    pub fn sort_by_fitness_desc(&mut self) {
        self.members.sort_by(|a, b| b.f.total_cmp(&a.f));
    }

    /// The fittest member. Call after [`Population::sort_by_fitness_desc`] to
    /// get the generation's winner at index 0.
    #[must_use]
    pub fn best(&self) -> &Member {
        &self.members[0]
    }

    /// Advances to the next unevaluated member at or after `cursor + 1`,
    /// wrapping to 0 when none is found past the current position.
    #[must_use]
    pub fn next_unevaluated(&self, cursor: usize) -> usize {
        let mut next = cursor + 1;
        while next < self.members.len() && self.members[next].evaluated() {
            next += 1;
        }
        if next >= self.members.len() { 0 } else { next }
    }

    /// Produces the next generation from a fully evaluated population.
    ///
    /// Must be called on a population already sorted descending by fitness.
    /// The top [`ELITE_COUNT`] members survive verbatim, fitness included; the
    /// rest are rebuilt by uniform crossover of two parents independently
    /// sampled from the top half, followed by mutation, and marked
    /// unevaluated.
    #[must_use]
    pub fn evolve<R>(&self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        debug_assert!(self.members.is_sorted_by(|a, b| a.f >= b.f));

        let mut next: Vec<Member> = self.members[..ELITE_COUNT].to_vec();
        let top_half = &self.members[..POPULATION_SIZE / 2];

        while next.len() < POPULATION_SIZE {
            let p1 = &top_half[rng.random_range(0..top_half.len())];
            let p2 = &top_half[rng.random_range(0..top_half.len())];
            let mut child = weights::crossover(&p1.w, &p2.w, rng);
            weights::mutate(&mut child, rng);
            next.push(Member::unevaluated(child));
        }

        Self { members: next }
    }
}
