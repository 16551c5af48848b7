//! Cooperative lock file shared by every process using the same store.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;

use crate::StoreError;

/// Interval between lock attempts while another process holds the lock.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Exclusive hold on the lock file. Released when dropped.
#[derive(Debug)]
pub(crate) struct LockGuard {
    _file: File,
}

/// Acquires an exclusive lock on `path`, waiting at most `timeout`.
///
/// A zero timeout makes a single attempt.
pub(crate) fn acquire(path: &Path, timeout: Duration) -> Result<LockGuard, StoreError> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
        .map_err(|source| StoreError::io(path, source))?;

    let contended = fs2::lock_contended_error().kind();
    let start = Instant::now();
    let mut warned = false;

    loop {
        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::trace!(path = %path.display(), waited = ?start.elapsed(), "acquired lock");
                return Ok(LockGuard { _file: file });
            }
            Err(e) if e.kind() == contended => {
                let waited = start.elapsed();
                if waited >= timeout {
                    return Err(StoreError::LockUnavailable {
                        path: PathBuf::from(path),
                        waited,
                    });
                }
                if !warned {
                    tracing::warn!(path = %path.display(), "store is locked by another process, waiting");
                    warned = true;
                }
                thread::sleep(POLL_INTERVAL.min(timeout - waited));
            }
            Err(source) => return Err(StoreError::io(path, source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_is_released_on_drop() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("store.lock");

        let guard = acquire(&path, Duration::ZERO).unwrap();
        drop(guard);

        assert!(acquire(&path, Duration::ZERO).is_ok());
    }

    #[test]
    fn held_lock_times_out() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("store.lock");

        let _held = acquire(&path, Duration::ZERO).unwrap();
        let err = acquire(&path, Duration::from_millis(60)).unwrap_err();

        match err {
            StoreError::LockUnavailable { path: p, waited } => {
                assert_eq!(p, path);
                assert!(waited >= Duration::from_millis(60));
            }
            other => panic!("expected LockUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_makes_a_single_attempt() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("store.lock");

        let _held = acquire(&path, Duration::ZERO).unwrap();
        let started = Instant::now();
        let err = acquire(&path, Duration::ZERO).unwrap_err();

        assert!(matches!(err, StoreError::LockUnavailable { waited, .. } if waited < Duration::from_secs(1)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn waiter_succeeds_once_holder_releases() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("store.lock");

        let held = acquire(&path, Duration::ZERO).unwrap();
        let releaser = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            drop(held);
        });

        assert!(acquire(&path, Duration::from_secs(5)).is_ok());
        releaser.join().unwrap();
    }
}
