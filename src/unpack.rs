//! Unpack: pak buffer → one file per resource plus `pak_index.ini`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::PakArchive;
use crate::error::{PakError, PakResult};
use crate::fsio::{ensure_dir, write_all_bytes};
use crate::index::{IndexDocument, INDEX_FILE_NAME};
use crate::sniff::sniff_suffix;

// ── UnpackOptions ─────────────────────────────────────────────────────────────

/// Configuration for [`unpack_with_options`].
#[derive(Debug, Clone)]
pub struct UnpackOptions {
    /// Name of the index written into the output directory.
    pub index_file_name: String,
}

impl Default for UnpackOptions {
    fn default() -> Self {
        Self { index_file_name: INDEX_FILE_NAME.to_owned() }
    }
}

// ── Unpack ────────────────────────────────────────────────────────────────────

pub fn unpack(buf: &[u8], output_dir: &Path) -> PakResult<IndexDocument> {
    unpack_with_options(buf, output_dir, &UnpackOptions::default())
}

/// Validate `buf`, write every resource as `<id><suffix>` under
/// `output_dir`, and write the index describing them.
///
/// Returns the index that was written.  On failure, resource files written
/// by this call are removed again.
pub fn unpack_with_options(
    buf:        &[u8],
    output_dir: &Path,
    opts:       &UnpackOptions,
) -> PakResult<IndexDocument> {
    let pak = PakArchive::parse(buf)?;
    let header = pak.header();

    // Name every file before touching the disk so a collision writes nothing.
    let mut doc = IndexDocument::new(header.version(), header.encoding());
    let mut used = HashSet::with_capacity(pak.resources().len());
    for res in pak.resources() {
        let file_name = format!("{}{}", res.id, sniff_suffix(res.bytes));
        if !used.insert(file_name.clone()) {
            return Err(PakError::DuplicateFileName { file_name, resource_id: res.id });
        }
        doc.push_resource(res.id, file_name);
    }
    for alias in pak.aliases() {
        doc.push_alias(*alias);
    }

    ensure_dir(output_dir)?;

    let mut written = Vec::with_capacity(doc.resources.len());
    match write_outputs(&pak, &doc, output_dir, opts, &mut written) {
        Ok(index_path) => {
            tracing::info!(
                version   = header.version(),
                resources = doc.resources.len(),
                aliases   = doc.aliases.len(),
                index     = %index_path.display(),
                "unpacked pak"
            );
            Ok(doc)
        }
        Err(e) => {
            for path in &written {
                if let Err(rm) = fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), error = %rm, "could not remove partial output");
                }
            }
            Err(e)
        }
    }
}

/// Write resources then the index, recording each resource path written.
fn write_outputs(
    pak:        &PakArchive<'_>,
    doc:        &IndexDocument,
    output_dir: &Path,
    opts:       &UnpackOptions,
    written:    &mut Vec<PathBuf>,
) -> PakResult<PathBuf> {
    for (res, entry) in pak.resources().iter().zip(&doc.resources) {
        let path = output_dir.join(&entry.file_name);
        write_all_bytes(&path, res.bytes)?;
        tracing::debug!(id = res.id, size = res.size(), path = %path.display(), "wrote resource");
        written.push(path);
    }
    let index_path = output_dir.join(&opts.index_file_name);
    write_all_bytes(&index_path, &doc.to_bytes())?;
    Ok(index_path)
}
