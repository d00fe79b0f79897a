//! Alias table: `(u16 resource_id, u16 entry_index)` records that let a
//! resource id reuse another entry's bytes.  Version 5 only.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::FormatError;
use crate::header::{PakHeader, ALIAS_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    pub resource_id: u16,
    /// Position of the real entry in the entry table.
    pub entry_index: u16,
}

/// Read `header.alias_count()` aliases starting at `offset`.
///
/// Every `entry_index` must name a real entry (not the sentinel).
pub fn parse_aliases(buf: &[u8], header: &PakHeader, offset: usize) -> Result<Vec<Alias>, FormatError> {
    let count = header.alias_count() as usize;
    if count == 0 {
        return Ok(Vec::new());
    }
    let end = offset + count * ALIAS_SIZE;
    if buf.len() < end {
        return Err(FormatError::Truncated { needed: end, available: buf.len() });
    }

    buf[offset..end]
        .chunks_exact(ALIAS_SIZE)
        .map(|raw| {
            let alias = Alias {
                resource_id: LittleEndian::read_u16(&raw[0..2]),
                entry_index: LittleEndian::read_u16(&raw[2..4]),
            };
            check_alias(&alias, header.resource_count())?;
            Ok(alias)
        })
        .collect()
}

pub fn check_alias(alias: &Alias, resource_count: u32) -> Result<(), FormatError> {
    if alias.entry_index as u32 >= resource_count {
        return Err(FormatError::InvalidAlias {
            resource_id: alias.resource_id,
            entry_index: alias.entry_index,
            resource_count,
        });
    }
    Ok(())
}

/// Serialize aliases as 4-byte records, in input order.
pub fn write_aliases(aliases: &[Alias]) -> Vec<u8> {
    let mut out = vec![0u8; aliases.len() * ALIAS_SIZE];
    for (raw, a) in out.chunks_exact_mut(ALIAS_SIZE).zip(aliases) {
        LittleEndian::write_u16(&mut raw[0..2], a.resource_id);
        LittleEndian::write_u16(&mut raw[2..4], a.entry_index);
    }
    out
}
