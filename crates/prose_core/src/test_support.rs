//! Shared test-only helpers for prose_core.

use crate::line_index::LineIndex;
use crate::Document;
use std::sync::{Mutex, OnceLock};

/// Process-wide lock serializing environment mutation across test threads.
pub(crate) fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Sets or removes an environment variable and restores it on drop.
pub(crate) struct EnvGuard {
    key: &'static str,
    previous: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        write_env(key, Some(value));
        Self { key, previous }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        write_env(key, None);
        Self { key, previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        write_env(self.key, self.previous.as_deref());
    }
}

#[allow(unused_unsafe)]
fn write_env(key: &str, value: Option<&str>) {
    // SAFETY: callers hold `env_lock` while mutating the environment.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// Asserts the document's maintained line index equals a fresh rebuild.
///
/// # Panics
/// Panics when any line start differs.
pub(crate) fn assert_line_index_fresh(doc: &Document) {
    let mut rebuilt = LineIndex::default();
    rebuilt.rebuild(doc.buffer());
    assert_eq!(
        doc.line_index().offsets(),
        rebuilt.offsets(),
        "line index drifted from rebuild for {:?}",
        doc.text()
    );
}
