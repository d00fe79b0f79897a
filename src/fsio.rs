//! Whole-file read/write with path context attached to failures.

use std::fs;
use std::path::Path;

use crate::error::{PakError, PakResult};

pub fn read_all_bytes(path: &Path) -> PakResult<Vec<u8>> {
    fs::read(path).map_err(|source| PakError::Read { path: path.to_owned(), source })
}

pub fn write_all_bytes(path: &Path, bytes: &[u8]) -> PakResult<()> {
    fs::write(path, bytes).map_err(|source| PakError::Write { path: path.to_owned(), source })
}

/// Create `dir` and its parents unless it already exists as a directory.
pub fn ensure_dir(dir: &Path) -> PakResult<()> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PakError::NotADirectory(dir.to_owned())),
        Err(_) => fs::create_dir_all(dir)
            .map_err(|source| PakError::CreateDir { path: dir.to_owned(), source }),
    }
}
