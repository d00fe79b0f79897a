//! High-level read-only [`PakArchive`] view.
//!
//! ```no_run
//! use chrome_pak::archive::PakArchive;
//!
//! let bytes = std::fs::read("resources.pak")?;
//! let pak = PakArchive::parse(&bytes)?;
//! for res in pak.resources() {
//!     println!("{} {} bytes", res.id, res.size());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::alias::Alias;
use crate::entry::{resolve_resources, Entry, Resource};
use crate::error::FormatError;
use crate::header::PakHeader;
use crate::validate::{validate, Tables};

/// A validated archive borrowing its buffer.  Resource views handed out by
/// this type cannot outlive the buffer.
#[derive(Debug, Clone)]
pub struct PakArchive<'a> {
    buf:       &'a [u8],
    tables:    Tables,
    resources: Vec<Resource<'a>>,
}

impl<'a> PakArchive<'a> {
    /// Validate `buf` and resolve every resource range.
    pub fn parse(buf: &'a [u8]) -> Result<Self, FormatError> {
        let tables = validate(buf, buf.len())?;
        let resources = resolve_resources(buf, &tables.entries)?;
        Ok(Self { buf, tables, resources })
    }

    pub fn header(&self) -> &PakHeader {
        &self.tables.header
    }

    /// Entry table including the sentinel.
    pub fn entries(&self) -> &[Entry] {
        &self.tables.entries
    }

    pub fn aliases(&self) -> &[Alias] {
        &self.tables.aliases
    }

    /// Resources in table order.
    pub fn resources(&self) -> &[Resource<'a>] {
        &self.resources
    }

    /// Number of resources, not counting aliases.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Size of the underlying archive buffer.
    pub fn byte_len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Look up a resource by id, following the alias table when the id has
    /// no entry of its own.
    pub fn get(&self, id: u16) -> Option<Resource<'a>> {
        if let Some(res) = self.resources.iter().find(|r| r.id == id) {
            return Some(*res);
        }
        let alias = self.tables.aliases.iter().find(|a| a.resource_id == id)?;
        self.resources
            .get(alias.entry_index as usize)
            .map(|target| Resource { id, bytes: target.bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::write_aliases;
    use crate::entry::write_entries;

    fn with_alias() -> Vec<u8> {
        let header = PakHeader::V5 { encoding: 1, resource_count: 2, alias_count: 1 };
        let mut buf = header.to_bytes();
        buf.extend(write_entries(header.data_start(), [(1, 3), (2, 2)]).unwrap());
        buf.extend(write_aliases(&[Alias { resource_id: 7, entry_index: 1 }]));
        buf.extend_from_slice(b"onetw");
        buf
    }

    #[test]
    fn resolves_direct_and_aliased_ids() {
        let buf = with_alias();
        let pak = PakArchive::parse(&buf).unwrap();
        assert_eq!(pak.header().alias_count(), 1);
        assert_eq!(pak.resources().len(), 2);
        assert_eq!(pak.get(1).unwrap().bytes, b"one");
        assert_eq!(pak.get(7), Some(Resource { id: 7, bytes: b"tw" }));
        assert_eq!(pak.get(3), None);
    }

    #[test]
    fn len_counts_resources() {
        let buf = with_alias();
        let pak = PakArchive::parse(&buf).unwrap();
        assert_eq!(pak.len(), 2);
        assert!(!pak.is_empty());
        assert_eq!(pak.byte_len(), buf.len());

        let empty = PakHeader::V5 { encoding: 0, resource_count: 0, alias_count: 0 };
        let mut buf = empty.to_bytes();
        buf.extend(write_entries(empty.data_start(), std::iter::empty()).unwrap());
        let pak = PakArchive::parse(&buf).unwrap();
        assert_eq!(pak.len(), 0);
        assert!(pak.is_empty());
        assert_eq!(pak.byte_len(), 18);
    }

    #[test]
    fn parse_propagates_format_errors() {
        let mut buf = with_alias();
        buf[0] = 9;
        assert_eq!(PakArchive::parse(&buf).unwrap_err(), FormatError::UnknownVersion(9));
    }
}
