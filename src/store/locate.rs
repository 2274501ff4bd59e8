//! Database discovery: walk up from the working directory for
//! `.beads/beads.db`, falling back to `~/.beads/default.db`.

use std::path::{Path, PathBuf};

use crate::error::{AbacusError, Result};

/// Where the resolved database file lives, and how it was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbLocation {
    pub path: PathBuf,
}

/// Resolves the database path. `override_path`, if given, is used directly
/// (and rejected if it names a directory). Otherwise walks upward from
/// `start_dir` for `.beads/beads.db`, falling back to `~/.beads/default.db`.
pub fn locate_database(start_dir: &Path, override_path: Option<&Path>) -> Result<DbLocation> {
    if let Some(path) = override_path {
        if path.is_dir() {
            return Err(AbacusError::Backend(format!(
                "--db points at a directory: {}",
                path.display()
            )));
        }
        return Ok(DbLocation { path: path.to_path_buf() });
    }

    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(".beads").join("beads.db");
        if candidate.is_file() {
            return Ok(DbLocation { path: candidate });
        }
        if !dir.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        let fallback = home.join(".beads").join("default.db");
        return Ok(DbLocation { path: fallback });
    }

    Err(AbacusError::DbNotFound)
}
