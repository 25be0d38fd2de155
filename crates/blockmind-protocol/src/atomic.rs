//! Atomic JSON file writes with bounded retry.
//!
//! Every persisted record is written to `<path>.tmp` first and then renamed
//! into place, so a reader never observes a partial payload. The replace step
//! retries a bounded number of times with a short backoff because the consumer
//! may hold the canonical file open at the moment of the rename; on
//! exhaustion the temp file is removed and a typed error surfaces instead of
//! leaving a stale or partial file behind.

use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use serde::{Serialize, de::DeserializeOwned};

const REPLACE_ATTEMPTS: usize = 5;
const REPLACE_BACKOFF: Duration = Duration::from_millis(50);

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ProtocolError {
    #[display("failed to serialize payload for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("failed to write {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to replace {} after {attempts} attempts: {source}", path.display())]
    ReplaceExhausted {
        path: PathBuf,
        attempts: usize,
        source: io::Error,
    },
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Writes `value` as pretty-printed JSON to `path` via temp-then-rename.
pub fn write_json_atomic<T>(path: &Path, value: &T) -> Result<(), ProtocolError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string_pretty(value).map_err(|source| {
        ProtocolError::Serialize {
            path: path.to_owned(),
            source,
        }
    })?;

    let tmp = tmp_path(path);
    fs::write(&tmp, payload).map_err(|source| ProtocolError::Io {
        path: tmp.clone(),
        source,
    })?;

    let mut last_error = None;
    for attempt in 0..REPLACE_ATTEMPTS {
        match replace(&tmp, path) {
            Ok(()) => return Ok(()),
            Err(err) => {
                last_error = Some(err);
                if attempt + 1 < REPLACE_ATTEMPTS {
                    thread::sleep(REPLACE_BACKOFF);
                }
            }
        }
    }

    // Never leave a stale temp file next to the canonical path.
    let _ = fs::remove_file(&tmp);
    Err(ProtocolError::ReplaceExhausted {
        path: path.to_owned(),
        attempts: REPLACE_ATTEMPTS,
        source: last_error.unwrap_or_else(|| io::Error::other("replace failed")),
    })
}

fn replace(tmp: &Path, path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    fs::rename(tmp, path)
}

/// Reads and parses a JSON file, treating absence and corruption alike.
///
/// Malformed or missing persisted state is never fatal anywhere in the
/// protocol; callers fall back to well-defined defaults.
#[must_use]
pub fn read_json_opt<T>(path: &Path) -> Option<T>
where
    T: DeserializeOwned,
{
    let payload = fs::read_to_string(path).ok()?;
    serde_json::from_str(&payload).ok()
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, env, process};

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("blockmind-atomic-{}-{name}", process::id()))
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let path = scratch_path("round-trip.json");
        let value: BTreeMap<String, u64> = [("a".to_owned(), 1), ("b".to_owned(), 2)].into();

        write_json_atomic(&path, &value).unwrap();
        let read: BTreeMap<String, u64> = read_json_opt(&path).unwrap();
        assert_eq!(read, value);

        assert!(
            !tmp_path(&path).exists(),
            "temp file must not survive a successful write"
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let path = scratch_path("replace.json");
        write_json_atomic(&path, &1_u64).unwrap();
        write_json_atomic(&path, &2_u64).unwrap();
        assert_eq!(read_json_opt::<u64>(&path), Some(2));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_missing_and_corrupt_files() {
        let path = scratch_path("missing.json");
        assert_eq!(read_json_opt::<u64>(&path), None);

        fs::write(&path, "{not json").unwrap();
        assert_eq!(read_json_opt::<u64>(&path), None);
        fs::remove_file(&path).unwrap();
    }
}
