// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Functions to glob files.

use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use log::debug;
use thiserror::Error;

/// Given a glob pattern, get all of the matches from the filesystem.
pub(crate) fn get_all_matches_from_glob(g: &str) -> Result<Vec<PathBuf>, GlobError> {
    let mut entries = vec![];
    for entry in glob(g)? {
        match entry {
            Ok(e) => entries.push(e),
            Err(e) => return Err(GlobError::GlobCrate(e)),
        }
    }
    Ok(entries)
}

/// Delete every file in `dir` that matches the glob `file_glob`. The directory
/// itself is not interpreted as a glob. The deleted paths are returned.
///
/// Deletion stops at the first failure; files deleted before it stay deleted.
pub(crate) fn delete_all_matches_from_glob(
    dir: &Path,
    file_glob: &str,
) -> Result<Vec<PathBuf>, GlobError> {
    let dir = Pattern::escape(&dir.display().to_string());
    let g = format!("{dir}/{file_glob}");
    let matches = get_all_matches_from_glob(&g)?;
    for m in &matches {
        debug!("Removing {}", m.display());
        std::fs::remove_file(m).map_err(|err| GlobError::Remove {
            file: m.clone(),
            err,
        })?;
    }
    Ok(matches)
}

#[derive(Error, Debug)]
/// Error type associated with glob helper functions.
pub enum GlobError {
    #[error("Couldn't remove {}: {err}", .file.display())]
    Remove { file: PathBuf, err: std::io::Error },

    #[error(transparent)]
    GlobCrate(#[from] glob::GlobError),

    #[error(transparent)]
    PatternError(#[from] glob::PatternError),
}
