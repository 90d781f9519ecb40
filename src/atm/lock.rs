//! Append-only list of locked account numbers.
//!
//! An account number present in the file cannot authenticate. Appends are
//! best-effort: a failed write is logged and the terminal keeps running.

use log::warn;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The lock file, one account number per line. Duplicates are tolerated.
#[derive(Debug, Clone)]
pub struct LockList {
    path: PathBuf,
}

impl LockList {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        LockList {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns `true` if `number` appears in the lock file.
    ///
    /// A missing or unreadable file means no account is locked.
    pub fn is_locked(&self, number: &str) -> bool {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.lines().any(|line| line.trim() == number),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                warn!("could not read lock file {}: {}", self.path.display(), e);
                false
            }
        }
    }

    /// Appends `number` to the lock file.
    pub fn lock(&self, number: &str) {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{}", number));

        if let Err(e) = result {
            warn!(
                "could not append {} to lock file {}: {}",
                number,
                self.path.display(),
                e
            );
        }
    }
}
