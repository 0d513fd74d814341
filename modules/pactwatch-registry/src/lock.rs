use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use pactwatch_common::PactwatchError;

/// Scoped exclusive lock on the store, held for the duration of a
/// load-mutate-save cycle so two invocations cannot interleave writes.
///
/// Backed by a `<store>.lock` sibling created with `create_new`; released
/// on drop.
pub struct StoreLock {
    path: PathBuf,
}

impl StoreLock {
    pub fn acquire(store_path: &Path) -> Result<Self, PactwatchError> {
        let path = lock_path(store_path);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(Self { path }),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(PactwatchError::StoreLockConflict)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to release store lock");
        }
    }
}

fn lock_path(store_path: &Path) -> PathBuf {
    let file_name = store_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    store_path.with_file_name(format!("{file_name}.lock"))
}
