#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `Junkyard` unit tests.
//!
//! Only compiled during testing (`#[cfg(test)]`).

use crate::data::{Card, Catalog};
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that modify `JUNKYARD_HOME`.
static HOME_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that points `JUNKYARD_HOME` at a temp directory for a test scope
/// and restores the original value when dropped.
///
/// Modifications are serialized through `HOME_LOCK`, which the guard holds for
/// its whole lifetime, so parallel tests never observe each other's value.
pub struct HomeGuard {
    original: Option<std::ffi::OsString>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables while holding HOME_LOCK"
)]
impl HomeGuard {
    /// Create a new guard that sets `JUNKYARD_HOME` to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = HOME_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var_os(crate::config::manager::HOME_ENV_VAR);
        // SAFETY: HOME_LOCK is held, so no other test reads or writes the variable
        // concurrently. The previous value is restored on drop.
        unsafe {
            std::env::set_var(crate::config::manager::HOME_ENV_VAR, temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables while holding HOME_LOCK"
)]
impl Drop for HomeGuard {
    fn drop(&mut self) {
        // SAFETY: the lock is still held until this struct's fields are dropped.
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(crate::config::manager::HOME_ENV_VAR, original);
            }
        } else {
            unsafe {
                std::env::remove_var(crate::config::manager::HOME_ENV_VAR);
            }
        }
    }
}

/// Card fixture with a predictable link
pub fn card(id: &str, tag_id: &str) -> Card {
    Card {
        id: id.to_string(),
        title: format!("{id} title"),
        subtitle: format!("{id} subtitle"),
        icon_key: "default".to_string(),
        link: format!("https://example.com/{id}"),
        tag_id: tag_id.to_string(),
    }
}

/// Catalog with tags {A, B} and cards tagged {a, a, b}
pub fn sample_catalog() -> Catalog {
    Catalog::new(
        vec!["A".to_string(), "B".to_string()],
        vec![card("one", "a"), card("two", "a"), card("three", "b")],
        [("default".to_string(), "<svg/>".to_string())].into(),
    )
    .unwrap()
}
