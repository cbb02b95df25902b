//! # Lock Security
//!
//! Path validation and diagnostics for the process lock.

use std::path::Path;

/// Whether a process with the given PID is visible on this host.
///
/// Only used for diagnostics: a PID from another PID namespace shows as
/// not running even while its process holds the lock.
pub fn is_process_running(pid: u32) -> bool {
    #[cfg(unix)]
    {
        Path::new(&format!("/proc/{pid}")).exists()
    }

    #[cfg(not(unix))]
    {
        let _ = pid;
        true
    }
}

/// Validates that a lock file path is within the expected data directory.
///
/// Rejects lock paths that resolve elsewhere through symlinks.
pub fn validate_lock_path(data_dir: &Path, lock_path: &Path) -> bool {
    lock_path
        .canonicalize()
        .ok()
        .and_then(|canonical| {
            data_dir
                .canonicalize()
                .ok()
                .map(|data_canonical| canonical.starts_with(&data_canonical))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_process_running_self() {
        assert!(is_process_running(std::process::id()));
    }

    #[test]
    fn test_validate_lock_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let inside = dir.path().join("LOCK");
        std::fs::write(&inside, b"1").unwrap();
        assert!(validate_lock_path(dir.path(), &inside));

        let other = tempfile::TempDir::new().unwrap();
        let outside = other.path().join("LOCK");
        std::fs::write(&outside, b"1").unwrap();
        assert!(!validate_lock_path(dir.path(), &outside));
    }
}
