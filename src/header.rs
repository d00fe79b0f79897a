//! Fixed-size version header.
//!
//! # Layouts (little-endian)
//!
//! | Version | Bytes | Fields                                                        |
//! |---------|-------|---------------------------------------------------------------|
//! | 5       | 12    | `u32 version, u8 encoding, [u8; 3] pad, u16 resources, u16 aliases` |
//! | 4       | 9     | `u32 version, u32 resources, u8 encoding`                     |
//!
//! Padding bytes are written as zero and ignored on read.  Version 4 has no
//! alias table, so its alias count is always 0.

use byteorder::{ByteOrder, LittleEndian};
use std::io::{self, Write};

use crate::error::FormatError;

pub const VERSION_V4: u32 = 4;
pub const VERSION_V5: u32 = 5;

pub const HEADER_SIZE_V4: usize = 9;
pub const HEADER_SIZE_V5: usize = 12;

/// Size of one `(u16 resource_id, u32 offset)` entry.
pub const ENTRY_SIZE: usize = 6;
/// Size of one `(u16 resource_id, u16 entry_index)` alias.
pub const ALIAS_SIZE: usize = 4;

const VERSION_FIELD_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PakHeader {
    V4 {
        encoding:       u8,
        resource_count: u32,
    },
    V5 {
        encoding:       u8,
        resource_count: u16,
        alias_count:    u16,
    },
}

impl PakHeader {
    /// Build a header for `version`, checking that the counts fit the
    /// variant's field widths.  Version 4 ignores `alias_count`.
    pub fn new(
        version:        u32,
        encoding:       u8,
        resource_count: usize,
        alias_count:    usize,
    ) -> Result<Self, FormatError> {
        match version {
            VERSION_V4 => Ok(PakHeader::V4 {
                encoding,
                resource_count: narrow("resources", resource_count, u32::MAX as usize)? as u32,
            }),
            VERSION_V5 => Ok(PakHeader::V5 {
                encoding,
                resource_count: narrow("resources", resource_count, u16::MAX as usize)? as u16,
                alias_count:    narrow("aliases", alias_count, u16::MAX as usize)? as u16,
            }),
            other => Err(FormatError::UnknownVersion(other)),
        }
    }

    /// Read the version field and parse the matching layout.
    pub fn parse(buf: &[u8]) -> Result<Self, FormatError> {
        let version = read_version(buf)?;
        let size = header_size(version)?;
        if buf.len() < size {
            return Err(FormatError::Truncated { needed: size, available: buf.len() });
        }

        Ok(match version {
            VERSION_V5 => PakHeader::V5 {
                encoding:       buf[4],
                resource_count: LittleEndian::read_u16(&buf[8..10]),
                alias_count:    LittleEndian::read_u16(&buf[10..12]),
            },
            _ => PakHeader::V4 {
                resource_count: LittleEndian::read_u32(&buf[4..8]),
                encoding:       buf[8],
            },
        })
    }

    /// The exact on-disk bytes for this header.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.size()];
        LittleEndian::write_u32(&mut out[0..4], self.version());
        match *self {
            PakHeader::V5 { encoding, resource_count, alias_count } => {
                out[4] = encoding;
                LittleEndian::write_u16(&mut out[8..10], resource_count);
                LittleEndian::write_u16(&mut out[10..12], alias_count);
            }
            PakHeader::V4 { encoding, resource_count } => {
                LittleEndian::write_u32(&mut out[4..8], resource_count);
                out[8] = encoding;
            }
        }
        out
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn version(&self) -> u32 {
        match self {
            PakHeader::V4 { .. } => VERSION_V4,
            PakHeader::V5 { .. } => VERSION_V5,
        }
    }

    pub fn encoding(&self) -> u8 {
        match *self {
            PakHeader::V4 { encoding, .. } | PakHeader::V5 { encoding, .. } => encoding,
        }
    }

    pub fn resource_count(&self) -> u32 {
        match *self {
            PakHeader::V4 { resource_count, .. } => resource_count,
            PakHeader::V5 { resource_count, .. } => resource_count as u32,
        }
    }

    pub fn alias_count(&self) -> u16 {
        match *self {
            PakHeader::V4 { .. } => 0,
            PakHeader::V5 { alias_count, .. } => alias_count,
        }
    }

    // ── Layout ──────────────────────────────────────────────────────────────

    /// Header size in bytes.
    pub fn size(&self) -> usize {
        match self {
            PakHeader::V4 { .. } => HEADER_SIZE_V4,
            PakHeader::V5 { .. } => HEADER_SIZE_V5,
        }
    }

    /// Size of the entry table, sentinel included.
    pub fn entry_table_size(&self) -> usize {
        (self.resource_count() as usize + 1) * ENTRY_SIZE
    }

    /// Byte offset of the alias table (directly after the entry table).
    pub fn alias_offset(&self) -> usize {
        self.size() + self.entry_table_size()
    }

    pub fn alias_table_size(&self) -> usize {
        self.alias_count() as usize * ALIAS_SIZE
    }

    /// First byte past every table; resource data starts here.
    pub fn data_start(&self) -> usize {
        self.alias_offset() + self.alias_table_size()
    }
}

/// Leading version field, little-endian.
pub fn read_version(buf: &[u8]) -> Result<u32, FormatError> {
    if buf.len() < VERSION_FIELD_SIZE {
        return Err(FormatError::Truncated { needed: VERSION_FIELD_SIZE, available: buf.len() });
    }
    Ok(LittleEndian::read_u32(&buf[..VERSION_FIELD_SIZE]))
}

/// Header size for a version, or `UnknownVersion`.
pub fn header_size(version: u32) -> Result<usize, FormatError> {
    match version {
        VERSION_V4 => Ok(HEADER_SIZE_V4),
        VERSION_V5 => Ok(HEADER_SIZE_V5),
        other => Err(FormatError::UnknownVersion(other)),
    }
}

fn narrow(what: &'static str, count: usize, max: usize) -> Result<usize, FormatError> {
    if count > max {
        return Err(FormatError::CountOverflow { what, count, max });
    }
    Ok(count)
}
