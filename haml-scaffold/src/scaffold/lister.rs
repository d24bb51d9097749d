//! Template directory listing
//!
//! The planner enumerates theme images at plan time through [`FileLister`],
//! so tests can hand it a fixed set of names instead of a real tree.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};

/// Enumerates the plain files directly inside a directory
pub trait FileLister {
    /// File names (not paths) in `dir`, sorted by name
    ///
    /// A directory that does not exist yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    fn list_files(&self, dir: &Path) -> Result<Vec<String>>;
}

/// [`FileLister`] backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl FileLister for FsLister {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                ScaffoldError::io(path, e.into())
            })?;
            if entry.file_type().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        Ok(names)
    }
}
