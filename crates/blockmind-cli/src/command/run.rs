//! The self-play decision loop.
//!
//! Polls the snapshot file, picks the best placement under the active weight
//! vector, and publishes it as an action. Game-over snapshots close out the
//! current game's statistics; after a full batch of games the trainer runs a
//! step and the loop reloads whatever weight vector the trainer activated.
//!
//! A tiny stdin console toggles the loop at runtime: `on`, `off`, and `quit`.

use std::{
    io::{self, BufRead as _},
    path::PathBuf,
    process,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use blockmind_evaluator::{move_search::choose_best_move, weights::WeightVector};
use blockmind_protocol::{ActionPublisher, files, load_game_state, load_weights, publish_restart};
use blockmind_training::{
    fitness::{GameRecord, GameStats},
    store::{TrainOutcome, TrainerStore, train_step},
};
use clap::Args;

/// Delay between snapshot polls.
const POLL_DELAY: Duration = Duration::from_millis(50);
/// Pause after publishing an action, giving the game time to apply it.
const MOVE_COOLDOWN: Duration = Duration::from_millis(20);
/// Poll delay while the console has the loop switched off.
const DISABLED_DELAY: Duration = Duration::from_millis(100);
/// Finished games per weight-vector evaluation batch.
const GAMES_PER_BATCH: u64 = 10;

#[derive(Debug, Clone, Args)]
pub struct RunArg {
    /// Directory shared with the game process
    #[arg(long, default_value = ".")]
    dir: PathBuf,
}

impl Default for RunArg {
    fn default() -> Self {
        Self { dir: ".".into() }
    }
}

fn spawn_console(enabled: Arc<AtomicBool>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match line.trim() {
                "on" => {
                    enabled.store(true, Ordering::Relaxed);
                    eprintln!("agent enabled");
                }
                "off" => {
                    enabled.store(false, Ordering::Relaxed);
                    eprintln!("agent disabled");
                }
                "quit" | "exit" => process::exit(0),
                "" => {}
                other => eprintln!("unknown command: {other} (try on / off / quit)"),
            }
        }
    });
}

fn report_outcome(outcome: TrainOutcome) {
    match outcome {
        TrainOutcome::NoStats => eprintln!("trainer: no finished games, nothing to do"),
        TrainOutcome::Advanced { cursor } => {
            eprintln!("trainer: now evaluating population member {cursor}");
        }
        TrainOutcome::Evolved { best_updated } => {
            if best_updated {
                eprintln!("trainer: generation complete, new all-time best recorded");
            } else {
                eprintln!("trainer: generation complete");
            }
        }
    }
}

pub fn run(arg: &RunArg) -> anyhow::Result<()> {
    let state_path = arg.dir.join(files::STATE);
    let restart_path = arg.dir.join(files::RESTART);
    let store = TrainerStore::new(&arg.dir);
    let mut rng = rand::rng();

    // A previous process may have died between finishing a batch and training
    // on it. Consume any leftover stats before starting fresh games.
    let leftover = store.load_stats();
    if !leftover.is_empty() {
        eprintln!(
            "recovering {} finished game(s) from a previous run",
            leftover.len()
        );
        report_outcome(train_step(&store, &mut rng)?);
        store.clear_stats()?;
    }

    let enabled = Arc::new(AtomicBool::new(true));
    spawn_console(Arc::clone(&enabled));

    let mut weights: WeightVector = load_weights(store.weights_path());
    let mut publisher = ActionPublisher::new(arg.dir.join(files::ACTION));
    let mut stats = GameStats::new();
    let mut generation: u64 = 1;
    let mut game: u64 = 1;
    let mut moves_this_game: u64 = 0;
    let mut max_score: u64 = 0;
    let mut max_combo: u32 = 0;

    loop {
        if !enabled.load(Ordering::Relaxed) {
            thread::sleep(DISABLED_DELAY);
            continue;
        }

        let Some(state) = load_game_state(&state_path) else {
            // Game over or no snapshot yet. Close out the game only once:
            // after recording, the move counter is zero until play resumes.
            if moves_this_game > 0 {
                eprintln!(
                    "gen {generation} game {game}: {moves_this_game} moves, \
                     score {max_score}, max combo {max_combo}"
                );
                stats.insert(
                    game.to_string(),
                    GameRecord {
                        moves: moves_this_game,
                        score: max_score,
                        max_combo,
                    },
                );
                if let Err(err) = store.save_stats(&stats) {
                    eprintln!("failed to save stats: {err}");
                }
                game += 1;
                moves_this_game = 0;
                max_score = 0;
                max_combo = 0;

                if game > GAMES_PER_BATCH {
                    match train_step(&store, &mut rng) {
                        Ok(outcome) => report_outcome(outcome),
                        Err(err) => eprintln!("training step failed: {err}"),
                    }
                    if let Err(err) = store.clear_stats() {
                        eprintln!("failed to clear stats: {err}");
                    }
                    stats.clear();
                    weights = load_weights(store.weights_path());
                    generation += 1;
                    game = 1;
                }
            }
            if let Err(err) = publish_restart(&restart_path) {
                eprintln!("failed to request restart: {err}");
            }
            thread::sleep(POLL_DELAY);
            continue;
        };

        max_score = max_score.max(state.score());
        max_combo = max_combo.max(state.combo());

        let Some(chosen) = choose_best_move(&state, &weights) else {
            // Playable snapshot with no legal placement; wait for a fresher
            // one instead of treating it as game over.
            thread::sleep(POLL_DELAY);
            continue;
        };

        match publisher.publish(&chosen) {
            Ok(move_id) => {
                moves_this_game += 1;
                eprintln!(
                    "gen {generation} game {game} move {move_id}: \
                     slot {} -> ({}, {})",
                    chosen.slot, chosen.x, chosen.y
                );
            }
            Err(err) => eprintln!("failed to publish action: {err}"),
        }
        thread::sleep(MOVE_COOLDOWN);
    }
}
