//! Structural validation of a candidate pak buffer.
//!
//! Runs before any entry offset is used to slice the buffer.  A buffer that
//! passes [`validate`] can be resolved into resources without any further
//! bounds failures.

use crate::alias::{parse_aliases, Alias};
use crate::entry::{parse_entries, Entry};
use crate::error::FormatError;
use crate::header::PakHeader;

/// Tables of a buffer that passed validation.
#[derive(Debug, Clone)]
pub struct Tables {
    pub header:  PakHeader,
    /// `resource_count + 1` entries, sentinel last.
    pub entries: Vec<Entry>,
    pub aliases: Vec<Alias>,
}

/// `true` when `buf` is a structurally sound pak of exactly `declared_size` bytes.
pub fn check(buf: &[u8], declared_size: usize) -> bool {
    validate(buf, declared_size).is_ok()
}

pub fn validate(buf: &[u8], declared_size: usize) -> Result<Tables, FormatError> {
    if buf.len() != declared_size {
        return Err(FormatError::SizeMismatch { declared: declared_size, actual: buf.len() });
    }

    let header = PakHeader::parse(buf)?;
    let data_start = header.data_start();
    if data_start > buf.len() {
        return Err(FormatError::Truncated { needed: data_start, available: buf.len() });
    }

    let entries = parse_entries(buf, &header)?;
    if let Some(first) = entries.first() {
        if (first.offset as usize) < data_start {
            return Err(FormatError::OverlappingData { offset: first.offset, data_start });
        }
    }

    let mut previous = 0u32;
    for (index, e) in entries.iter().enumerate() {
        if e.offset < previous {
            return Err(FormatError::OffsetUnderflow { index, offset: e.offset, previous });
        }
        if e.offset as usize > buf.len() {
            return Err(FormatError::OffsetOutOfBounds { index, offset: e.offset, len: buf.len() });
        }
        previous = e.offset;
    }

    let data_end = previous as usize;
    if data_end < buf.len() {
        tracing::warn!(
            trailing = buf.len() - data_end,
            "pak has bytes past the sentinel offset"
        );
    }

    let aliases = parse_aliases(buf, &header, header.alias_offset())?;

    Ok(Tables { header, entries, aliases })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::write_aliases;
    use crate::entry::write_entries;

    /// v5, encoding 1, ids 10 and 20 with 4 and 6 bytes of data.
    fn sample() -> Vec<u8> {
        let header = PakHeader::V5 { encoding: 1, resource_count: 2, alias_count: 0 };
        let mut buf = header.to_bytes();
        buf.extend(write_entries(header.data_start(), [(10, 4), (20, 6)]).unwrap());
        buf.extend_from_slice(b"abcd");
        buf.extend_from_slice(b"efghij");
        buf
    }

    fn set_offset(buf: &mut [u8], index: usize, offset: u32) {
        let at = 12 + index * 6 + 2;
        buf[at..at + 4].copy_from_slice(&offset.to_le_bytes());
    }

    #[test]
    fn accepts_well_formed() {
        let buf = sample();
        assert_eq!(buf.len(), 40);
        let tables = validate(&buf, buf.len()).unwrap();
        assert_eq!(tables.entries.len(), 3);
        assert!(tables.aliases.is_empty());
        assert!(check(&buf, 40));
    }

    #[test]
    fn rejects_size_mismatch() {
        let buf = sample();
        assert_eq!(
            validate(&buf, 41).unwrap_err(),
            FormatError::SizeMismatch { declared: 41, actual: 40 }
        );
    }

    #[test]
    fn rejects_truncated_header() {
        let buf = &sample()[..8];
        assert!(!check(buf, 8));
        assert!(matches!(validate(buf, 8), Err(FormatError::Truncated { .. })));
    }

    #[test]
    fn rejects_entry_table_past_end() {
        let mut buf = sample();
        // claim 100 resources
        buf[8] = 100;
        assert!(matches!(
            validate(&buf, buf.len()),
            Err(FormatError::Truncated { needed, available: 40 }) if needed == 12 + 101 * 6
        ));
    }

    #[test]
    fn rejects_decreasing_offset() {
        let mut buf = sample();
        set_offset(&mut buf, 1, 31);
        set_offset(&mut buf, 0, 35);
        assert!(matches!(
            validate(&buf, buf.len()),
            Err(FormatError::OffsetUnderflow { index: 1, offset: 31, previous: 35 })
        ));
    }

    #[test]
    fn rejects_offset_past_end() {
        let mut buf = sample();
        set_offset(&mut buf, 2, 41);
        assert!(matches!(
            validate(&buf, buf.len()),
            Err(FormatError::OffsetOutOfBounds { index: 2, offset: 41, len: 40 })
        ));
    }

    #[test]
    fn rejects_data_inside_tables() {
        let mut buf = sample();
        set_offset(&mut buf, 0, 4);
        assert!(matches!(
            validate(&buf, buf.len()),
            Err(FormatError::OverlappingData { offset: 4, data_start: 30 })
        ));
    }

    #[test]
    fn rejects_out_of_range_alias() {
        let header = PakHeader::V5 { encoding: 1, resource_count: 1, alias_count: 1 };
        let mut buf = header.to_bytes();
        buf.extend(write_entries(header.data_start(), [(1, 2)]).unwrap());
        buf.extend(write_aliases(&[Alias { resource_id: 2, entry_index: 1 }]));
        buf.extend_from_slice(b"xy");
        assert!(matches!(
            validate(&buf, buf.len()),
            Err(FormatError::InvalidAlias { resource_id: 2, entry_index: 1, resource_count: 1 })
        ));
    }

    #[test]
    fn empty_archive_is_valid() {
        let header = PakHeader::V4 { encoding: 0, resource_count: 0 };
        let mut buf = header.to_bytes();
        buf.extend(write_entries(header.data_start(), std::iter::empty()).unwrap());
        assert!(check(&buf, buf.len()));
    }

    #[test]
    fn trailing_bytes_are_tolerated() {
        let mut buf = sample();
        buf.extend_from_slice(b"tail");
        assert!(check(&buf, buf.len()));
    }
}
