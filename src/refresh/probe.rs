//! Modification-time probing, platform-independent.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{AbacusError, Result};

/// Stats a database file (and its SQLite WAL/SHM siblings, if present) for
/// the latest modification time. A write that only touches the WAL file
/// (common with `journal_mode=WAL`) still counts as a change.
pub trait DbProbe: Send + Sync {
    fn latest_mod_time(&self, db_path: &Path) -> Result<SystemTime>;
}

/// Checks `<path>`, `<path>-wal`, and `<path>-shm` by suffix and returns the
/// max mtime across whichever exist. No platform-specific file APIs.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileDbProbe;

impl DbProbe for FileDbProbe {
    fn latest_mod_time(&self, db_path: &Path) -> Result<SystemTime> {
        let mut latest: Option<SystemTime> = None;
        for candidate in sibling_paths(db_path) {
            if let Ok(metadata) = std::fs::metadata(&candidate) {
                if let Ok(modified) = metadata.modified() {
                    latest = Some(match latest {
                        Some(current) if current >= modified => current,
                        _ => modified,
                    });
                }
            }
        }
        latest.ok_or_else(|| {
            AbacusError::Backend(format!("cannot stat database: {}", db_path.display()))
        })
    }
}

fn sibling_paths(db_path: &Path) -> [PathBuf; 3] {
    let mut wal = db_path.as_os_str().to_owned();
    wal.push("-wal");
    let mut shm = db_path.as_os_str().to_owned();
    shm.push("-shm");
    [db_path.to_path_buf(), PathBuf::from(wal), PathBuf::from(shm)]
}
