//! Steady-state genetic trainer for the evaluator's weight vectors.
//!
//! Unlike a fixed-iteration-count GA, this trainer advances by exhaustion: a
//! population of 10 weight vectors is evaluated one member at a time in live
//! games, and only once every member carries a nonzero fitness does a
//! generation turn over (elitism, crossover, mutation). Between invocations
//! all state - population, evaluation cursor, all-time best record, per-game
//! stats - lives in flat JSON files, so the trainer survives process restarts
//! mid-evaluation.
//!
//! # Modules
//!
//! - [`fitness`] - per-game records and the fitness formula
//! - [`weights`] - per-key bounds, random initialization, crossover, mutation
//! - [`genetic`] - the population and the generation turnover
//! - [`store`] - file persistence and the [`store::train_step`] entry point
//!
//! # Known ambiguity: the zero-fitness sentinel
//!
//! Fitness `0` doubles as the "not yet evaluated" marker, so a genuine fitness
//! of exactly zero is indistinguishable from an unevaluated member. The
//! persisted artifacts share this convention with the authoritative engine's
//! tooling, so it is preserved as-is rather than silently replaced with an
//! explicit evaluated flag.

pub mod fitness;
pub mod genetic;
pub mod store;
pub mod weights;
