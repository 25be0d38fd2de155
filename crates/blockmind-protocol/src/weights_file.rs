//! Loading the active weight vector from its protocol file.

use std::path::Path;

use blockmind_evaluator::weights::WeightVector;

use crate::atomic::read_json_opt;

/// Loads the weight vector, falling back to the built-in defaults.
///
/// A missing file, unparseable payload, or missing key is logged and resolved
/// with [`WeightVector::fallback`]; weight loading is never fatal.
#[must_use]
pub fn load_weights(path: &Path) -> WeightVector {
    match read_json_opt::<WeightVector>(path) {
        Some(weights) => weights,
        None => {
            eprintln!(
                "could not load weights from {}, using fallback",
                path.display()
            );
            WeightVector::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf, process};

    use blockmind_evaluator::feature::Feature;

    use crate::atomic::write_json_atomic;

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("blockmind-weights-{}-{name}", process::id()))
    }

    #[test]
    fn test_round_trips_complete_vector() {
        let path = scratch_path("complete.json");
        let mut weights = WeightVector::fallback();
        weights.set(Feature::Holes, -11.5);
        write_json_atomic(&path, &weights).unwrap();

        assert_eq!(load_weights(&path), weights);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_incomplete_vector_falls_back() {
        let path = scratch_path("incomplete.json");
        let mut object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(
            &serde_json::to_string(&WeightVector::fallback()).unwrap(),
        )
        .unwrap();
        object.remove("cleared_lines");
        fs::write(&path, serde_json::to_string(&object).unwrap()).unwrap();

        assert_eq!(load_weights(&path), WeightVector::fallback());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_absent_file_falls_back() {
        assert_eq!(
            load_weights(&scratch_path("absent.json")),
            WeightVector::fallback()
        );
    }
}
