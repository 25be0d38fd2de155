//! One-shot offline training against whatever stats are on disk.

use std::path::PathBuf;

use blockmind_training::store::{TrainOutcome, TrainerStore, train_step};
use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct TrainArg {
    /// Directory shared with the game process
    #[arg(long, default_value = ".")]
    dir: PathBuf,
}

pub fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let store = TrainerStore::new(&arg.dir);
    let mut rng = rand::rng();

    let outcome = train_step(&store, &mut rng)?;
    match outcome {
        TrainOutcome::NoStats => {
            eprintln!("no finished games in the stats file, nothing to train on");
        }
        TrainOutcome::Advanced { cursor } => {
            store.clear_stats()?;
            eprintln!("scored the current member; next up: member {cursor}");
        }
        TrainOutcome::Evolved { best_updated } => {
            store.clear_stats()?;
            if best_updated {
                eprintln!("generation complete; the all-time best record improved");
            } else {
                eprintln!("generation complete; the all-time best record stands");
            }
        }
    }
    Ok(())
}
