//! # Lock Tests

use super::*;
use std::fs;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const SHORT: Duration = Duration::from_millis(100);

#[test]
fn test_lock_acquire_writes_pid() {
    let dir = TempDir::new().unwrap();

    let lock = DatabaseLock::acquire(dir.path(), SHORT).expect("Should acquire lock");
    assert!(lock.path().exists());
    assert_eq!(lock.pid(), std::process::id());

    let stored_pid: u32 = fs::read_to_string(lock.path()).unwrap().trim().parse().unwrap();
    assert_eq!(stored_pid, std::process::id());
}

#[test]
fn test_double_lock_times_out_with_holder_pid() {
    let dir = TempDir::new().unwrap();
    let _lock = DatabaseLock::acquire(dir.path(), SHORT).expect("First lock should succeed");

    let started = Instant::now();
    let result = DatabaseLock::acquire(dir.path(), SHORT);

    assert!(started.elapsed() >= SHORT);
    match result {
        Err(LockError::AlreadyLocked { pid, .. }) => assert_eq!(pid, Some(std::process::id())),
        other => panic!("expected AlreadyLocked, got {other:?}"),
    }
}

#[test]
fn test_lock_released_on_drop() {
    let dir = TempDir::new().unwrap();

    {
        let _lock = DatabaseLock::acquire(dir.path(), SHORT).expect("Should acquire");
    }

    let _again = DatabaseLock::acquire(dir.path(), SHORT).expect("Should acquire after release");
}

#[test]
fn test_leftover_lock_file_does_not_block() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("LOCK"), "999999\n").unwrap();

    let lock = DatabaseLock::acquire(dir.path(), SHORT).expect("Unheld lock file is free");
    let stored = fs::read_to_string(lock.path()).unwrap();
    assert_eq!(stored.trim(), std::process::id().to_string());
}

#[test]
fn test_error_message_names_holder() {
    let err = LockError::AlreadyLocked {
        pid: Some(42),
        path: "/data/LOCK".into(),
    };
    assert_eq!(err.to_string(), "database already in use by process 42 (/data/LOCK)");
}
