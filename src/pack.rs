//! Pack: `pak_index.ini` plus the files it names → pak buffer.
//!
//! Output layout, in order: header, entry table (sentinel last), alias
//! table, resource bytes in entry-table order.  Nothing is returned unless
//! every referenced file was read.

use std::path::Path;

use crate::alias::{check_alias, write_aliases, Alias};
use crate::entry::write_entries;
use crate::error::PakResult;
use crate::fsio::read_all_bytes;
use crate::header::{PakHeader, VERSION_V4};
use crate::index::IndexDocument;

/// Parse `index` and assemble the archive, resolving file names against
/// `base_dir`.
pub fn pack(index: &[u8], base_dir: &Path) -> PakResult<Vec<u8>> {
    let doc = IndexDocument::parse(index)?;
    pack_document(&doc, base_dir)
}

pub fn pack_document(doc: &IndexDocument, base_dir: &Path) -> PakResult<Vec<u8>> {
    let aliases: &[Alias] = if doc.version == VERSION_V4 && !doc.aliases.is_empty() {
        tracing::warn!(count = doc.aliases.len(), "version 4 has no alias table; dropping aliases");
        &[]
    } else {
        &doc.aliases
    };

    let header = PakHeader::new(doc.version, doc.encoding, doc.resources.len(), aliases.len())?;
    for alias in aliases {
        check_alias(alias, header.resource_count())?;
    }

    let mut blobs = Vec::with_capacity(doc.resources.len());
    for entry in &doc.resources {
        let path = base_dir.join(&entry.file_name);
        let bytes = read_all_bytes(&path)?;
        tracing::debug!(id = entry.resource_id, size = bytes.len(), path = %path.display(), "read resource");
        blobs.push(bytes);
    }

    let entries = write_entries(
        header.data_start(),
        doc.resources.iter().zip(&blobs).map(|(e, b)| (e.resource_id, b.len())),
    )?;

    let data_len: usize = blobs.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(header.data_start() + data_len);
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(&entries);
    out.extend_from_slice(&write_aliases(aliases));
    for blob in &blobs {
        out.extend_from_slice(blob);
    }

    tracing::info!(
        version   = header.version(),
        encoding  = header.encoding(),
        resources = header.resource_count(),
        aliases   = header.alias_count(),
        size      = out.len(),
        "packed pak"
    );
    Ok(out)
}
