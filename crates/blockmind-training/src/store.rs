//! File persistence for the trainer and the single training step.

use std::path::{Path, PathBuf};

use blockmind_protocol::{ProtocolError, files, read_json_opt, write_json_atomic};
use chrono::Utc;
use rand::Rng;

use crate::{
    fitness::{self, GameStats},
    genetic::{BestRecord, Member, Population},
};

/// The trainer's view of the shared data directory.
///
/// Owns the paths of the five files the trainer reads and writes: the
/// population, the evaluation cursor, the all-time best record, the active
/// weight vector, and the per-game stats.
#[derive(Debug, Clone)]
pub struct TrainerStore {
    population: PathBuf,
    cursor: PathBuf,
    best: PathBuf,
    weights: PathBuf,
    stats: PathBuf,
}

/// What a single [`train_step`] invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainOutcome {
    /// No finished games to learn from; nothing changed.
    NoStats,
    /// The current member was scored and evaluation moved on.
    Advanced { cursor: usize },
    /// Every member was scored; a new generation was bred.
    Evolved { best_updated: bool },
}

impl TrainerStore {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            population: dir.join(files::POPULATION),
            cursor: dir.join(files::CURRENT_INDEX),
            best: dir.join(files::BEST_WEIGHTS),
            weights: dir.join(files::WEIGHTS),
            stats: dir.join(files::STATS),
        }
    }

    #[must_use]
    pub fn load_stats(&self) -> GameStats {
        read_json_opt(&self.stats).unwrap_or_default()
    }

    pub fn save_stats(&self, stats: &GameStats) -> Result<(), ProtocolError> {
        write_json_atomic(&self.stats, stats)
    }

    pub fn clear_stats(&self) -> Result<(), ProtocolError> {
        self.save_stats(&GameStats::new())
    }

    #[must_use]
    pub fn weights_path(&self) -> &Path {
        &self.weights
    }

    fn load_population<R>(&self, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        if let Some(members) = read_json_opt::<Vec<Member>>(&self.population)
            && let Some(population) = Population::from_members(members)
        {
            return population;
        }
        // First run or unusable file: seed member 0 with the active weight
        // vector when one is actually on disk, so known-good weights compete
        // in the first generation.
        Population::fresh(rng, read_json_opt(&self.weights))
    }

    fn load_cursor(&self, population: &Population) -> usize {
        read_json_opt::<usize>(&self.cursor)
            .filter(|&index| index < population.members().len())
            .unwrap_or(0)
    }

    fn load_best(&self) -> Option<BestRecord> {
        read_json_opt(&self.best)
    }

    fn persist(
        &self,
        population: &Population,
        cursor: usize,
    ) -> Result<(), ProtocolError> {
        write_json_atomic(&self.population, population.members())?;
        write_json_atomic(&self.cursor, &cursor)?;
        write_json_atomic(&self.weights, &population.member(cursor).w)
    }
}

/// Runs one training step against the persisted trainer state.
///
/// The accumulated stats score the member at the persisted cursor. If that
/// completes the generation, the population is sorted, the all-time best
/// record is updated when beaten, and a new generation is bred with the
/// cursor reset to 0; otherwise the cursor advances to the next unevaluated
/// member. Either way the population, cursor, and the active weight vector
/// (the member now under evaluation) are persisted before returning.
///
/// The caller decides when to clear the stats file; the step itself only
/// reads it.
pub fn train_step<R>(store: &TrainerStore, rng: &mut R) -> Result<TrainOutcome, ProtocolError>
where
    R: Rng + ?Sized,
{
    let stats = store.load_stats();
    if stats.is_empty() {
        return Ok(TrainOutcome::NoStats);
    }

    let mut population = store.load_population(rng);
    let cursor = store.load_cursor(&population);
    population.assign_fitness(cursor, fitness::calc_fitness(&stats));

    if population.all_evaluated() {
        population.sort_by_fitness_desc();
        let best_updated = update_best(store, &population)?;
        let next = population.evolve(rng);
        store.persist(&next, 0)?;
        Ok(TrainOutcome::Evolved { best_updated })
    } else {
        let next_cursor = population.next_unevaluated(cursor);
        store.persist(&population, next_cursor)?;
        Ok(TrainOutcome::Advanced {
            cursor: next_cursor,
        })
    }
}

fn update_best(store: &TrainerStore, sorted: &Population) -> Result<bool, ProtocolError> {
    let winner = sorted.best();
    let beaten = store.load_best().is_none_or(|record| winner.f > record.f);
    if beaten {
        let record = BestRecord {
            w: winner.w.clone(),
            f: winner.f,
            trained_at: Some(Utc::now()),
        };
        write_json_atomic(&store.best, &record)?;
    }
    Ok(beaten)
}
