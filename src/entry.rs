//! Resource entry table.
//!
//! The table holds `resource_count + 1` entries of `(u16 id, u32 offset)`.
//! The trailing sentinel entry carries no resource; its offset marks the end
//! of the data region so every resource length is `offset[i + 1] - offset[i]`.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::FormatError;
use crate::header::{PakHeader, ENTRY_SIZE};

/// Resource id written into the sentinel entry.
pub const SENTINEL_ID: u16 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub resource_id: u16,
    /// Absolute offset from the start of the pak.
    pub offset:      u32,
}

/// One resource's bytes, borrowed from the archive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource<'a> {
    pub id:    u16,
    pub bytes: &'a [u8],
}

impl Resource<'_> {
    pub fn size(&self) -> u32 {
        self.bytes.len() as u32
    }
}

/// Read every entry, sentinel included, from directly after the header.
pub fn parse_entries(buf: &[u8], header: &PakHeader) -> Result<Vec<Entry>, FormatError> {
    let start = header.size();
    let end = start + header.entry_table_size();
    if buf.len() < end {
        return Err(FormatError::Truncated { needed: end, available: buf.len() });
    }

    Ok(buf[start..end]
        .chunks_exact(ENTRY_SIZE)
        .map(|raw| Entry {
            resource_id: LittleEndian::read_u16(&raw[0..2]),
            offset:      LittleEndian::read_u32(&raw[2..6]),
        })
        .collect())
}

/// Slice each resource out of `buf` using adjacent entry offsets.
///
/// The last element of `entries` is treated as the sentinel.
pub fn resolve_resources<'a>(
    buf:     &'a [u8],
    entries: &[Entry],
) -> Result<Vec<Resource<'a>>, FormatError> {
    let mut out = Vec::with_capacity(entries.len().saturating_sub(1));
    for (i, pair) in entries.windows(2).enumerate() {
        let (cur, next) = (pair[0], pair[1]);
        if next.offset < cur.offset {
            return Err(FormatError::OffsetUnderflow {
                index:    i + 1,
                offset:   next.offset,
                previous: cur.offset,
            });
        }
        if next.offset as usize > buf.len() {
            return Err(FormatError::OffsetOutOfBounds {
                index:  i + 1,
                offset: next.offset,
                len:    buf.len(),
            });
        }
        out.push(Resource {
            id:    cur.resource_id,
            bytes: &buf[cur.offset as usize..next.offset as usize],
        });
    }
    Ok(out)
}

/// Lay resources out back to back from `data_start`, in the given order,
/// and append the sentinel.
pub fn layout_entries<I>(data_start: usize, resources: I) -> Result<Vec<Entry>, FormatError>
where
    I: IntoIterator<Item = (u16, usize)>,
{
    let mut entries = Vec::new();
    let mut offset = data_start;
    for (resource_id, len) in resources {
        entries.push(Entry { resource_id, offset: checked_offset(resource_id, offset)? });
        offset += len;
    }
    entries.push(Entry { resource_id: SENTINEL_ID, offset: checked_offset(SENTINEL_ID, offset)? });
    Ok(entries)
}

/// Serialize entries as 6-byte records in order.
pub fn encode_entries(entries: &[Entry]) -> Vec<u8> {
    let mut out = vec![0u8; entries.len() * ENTRY_SIZE];
    for (raw, e) in out.chunks_exact_mut(ENTRY_SIZE).zip(entries) {
        LittleEndian::write_u16(&mut raw[0..2], e.resource_id);
        LittleEndian::write_u32(&mut raw[2..6], e.offset);
    }
    out
}

/// Lay out and serialize the whole entry table in one step.
pub fn write_entries<I>(data_start: usize, resources: I) -> Result<Vec<u8>, FormatError>
where
    I: IntoIterator<Item = (u16, usize)>,
{
    Ok(encode_entries(&layout_entries(data_start, resources)?))
}

fn checked_offset(resource_id: u16, offset: usize) -> Result<u32, FormatError> {
    u32::try_from(offset).map_err(|_| FormatError::OffsetOverflow { resource_id, offset })
}
