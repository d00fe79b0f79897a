//! Error taxonomy.
//!
//! Binary layout problems are [`FormatError`], text index problems are
//! [`IndexError`], and the unpack/pack drivers wrap both (plus filesystem
//! failures) in [`PakError`].  Nothing in this crate panics on bad input.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The archive bytes do not describe a well-formed pak.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unknown pak version: {0}")]
    UnknownVersion(u32),

    #[error("Probably truncated pak: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("Pak size mismatch: declared {declared} bytes, buffer holds {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    #[error("Entry {index} offset {offset} precedes previous offset {previous}")]
    OffsetUnderflow { index: usize, offset: u32, previous: u32 },

    #[error("Entry {index} offset {offset} is past end of pak ({len} bytes)")]
    OffsetOutOfBounds { index: usize, offset: u32, len: usize },

    #[error("Resource data at offset {offset} overlaps the tables ending at {data_start}")]
    OverlappingData { offset: u32, data_start: usize },

    #[error("Alias {resource_id} points at entry {entry_index}, only {resource_count} entries exist")]
    InvalidAlias { resource_id: u16, entry_index: u16, resource_count: u32 },

    #[error("Resource {resource_id} would start at offset {offset}, beyond the 32-bit limit")]
    OffsetOverflow { resource_id: u16, offset: usize },

    #[error("Too many {what}: {count} (maximum {max})")]
    CountOverflow { what: &'static str, count: usize, max: usize },
}

/// The text index cannot be interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("Index is missing the [{0}] section")]
    MissingSection(&'static str),

    #[error("Index is missing the `{0}` key")]
    MissingKey(&'static str),

    #[error("Index line {line}: expected `key=value`, found `{text}`")]
    InvalidLine { line: usize, text: String },

    #[error("Index line {line}: `{value}` is not a valid {key}")]
    InvalidNumber { line: usize, key: &'static str, value: String },

    #[error("Index line {line} is not valid UTF-8")]
    NotUtf8 { line: usize },
}

/// Failure of a whole unpack or pack operation.
#[derive(Error, Debug)]
pub enum PakError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("Cannot read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot create directory `{}`", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Output path `{}` exists and is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Resource {resource_id} maps to `{file_name}`, which another resource already uses")]
    DuplicateFileName { file_name: String, resource_id: u16 },
}

impl PakError {
    /// True for failures that came from the filesystem rather than the data.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            PakError::Read { .. }
                | PakError::Write { .. }
                | PakError::CreateDir { .. }
                | PakError::NotADirectory(_)
        )
    }
}

pub type PakResult<T> = Result<T, PakError>;
