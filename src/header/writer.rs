//! Locked, atomic artifact writes.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{BspconfError, Result};

use super::render::{fingerprint, Artifact};

/// What [`write_artifact`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The header was created or replaced.
    Written,
    /// The header already had the rendered contents and was left untouched.
    Unchanged,
}

/// Exclusive hold on an output path for one configuration run.
///
/// Backed by an advisory lock on a sibling `<name>.lock` file. The lock is
/// released when the guard is dropped or the process exits, however it
/// exits; the lock file itself stays on disk and is reused by later runs.
#[derive(Debug)]
pub struct OutputLock {
    target: PathBuf,
    lock_path: PathBuf,
    _file: File,
}

impl OutputLock {
    /// Acquire the lock for `target`, failing immediately if it is held.
    ///
    /// Creates the target's parent directory if needed.
    pub fn acquire(target: &Path) -> Result<Self> {
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let lock_path = sibling(target, "lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        match file.try_lock() {
            Ok(()) => {
                tracing::debug!("Locked {}", target.display());
                Ok(Self {
                    target: target.to_path_buf(),
                    lock_path,
                    _file: file,
                })
            }
            Err(TryLockError::WouldBlock) => Err(BspconfError::OutputLocked {
                path: target.to_path_buf(),
            }),
            Err(TryLockError::Error(e)) => Err(e.into()),
        }
    }

    /// The output path this lock covers.
    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn path(&self) -> &Path {
        &self.lock_path
    }
}

/// Lock `artifact`'s path and write it. See [`write_locked`].
pub fn write_artifact(artifact: &Artifact) -> Result<WriteOutcome> {
    let lock = OutputLock::acquire(&artifact.path)?;
    write_locked(artifact, &lock)
}

/// Write `artifact` under a lock the caller already holds.
///
/// Contents go to a temporary file next to the target and are renamed over
/// it; the temporary file is removed if either step fails. A target whose
/// fingerprint already matches is not rewritten.
pub fn write_locked(artifact: &Artifact, lock: &OutputLock) -> Result<WriteOutcome> {
    let target = &artifact.path;
    if lock.target() != target.as_path() {
        return Err(BspconfError::Other(anyhow::anyhow!(
            "lock on {} does not cover {}",
            lock.target().display(),
            target.display()
        )));
    }

    if let Ok(existing) = fs::read(target) {
        if fingerprint(&existing) == artifact.digest {
            tracing::debug!("{} is up to date", target.display());
            return Ok(WriteOutcome::Unchanged);
        }
    }

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut prefix = target.file_name().map(OsString::from).unwrap_or_default();
    prefix.push(".");

    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(artifact.contents.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(target).map_err(|e| BspconfError::Io(e.error))?;

    tracing::info!("Wrote {}", target.display());
    Ok(WriteOutcome::Written)
}

fn sibling(target: &Path, extension: &str) -> PathBuf {
    let mut name = target.file_name().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(extension);
    target.with_file_name(name)
}
