//! `pak_index.ini`: the text index that drives packing.
//!
//! ```text
//! [Global]
//! version=5
//! encoding=1
//!
//! [Resources]
//! 10=10.png
//! 20=20.json
//!
//! [Alias]
//! 30=0
//! ```
//!
//! Written with CRLF line endings.  The reader accepts CRLF or LF, skips
//! blank lines, and trims whitespace around keys and values.  Counts are
//! never stored; they come from the number of lines in each section.

use crate::alias::Alias;
use crate::error::IndexError;

pub const INDEX_FILE_NAME: &str = "pak_index.ini";

pub const GLOBAL_SECTION:    &str = "Global";
pub const RESOURCES_SECTION: &str = "Resources";
pub const ALIAS_SECTION:     &str = "Alias";

const VERSION_KEY:  &str = "version";
const ENCODING_KEY: &str = "encoding";
const CRLF:         &str = "\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub resource_id: u16,
    /// Relative to the directory holding the index.
    pub file_name:   String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDocument {
    pub version:   u32,
    pub encoding:  u8,
    /// In archive order.
    pub resources: Vec<IndexEntry>,
    pub aliases:   Vec<Alias>,
}

impl IndexDocument {
    pub fn new(version: u32, encoding: u8) -> Self {
        Self { version, encoding, resources: Vec::new(), aliases: Vec::new() }
    }

    pub fn push_resource(&mut self, resource_id: u16, file_name: impl Into<String>) {
        self.resources.push(IndexEntry { resource_id, file_name: file_name.into() });
    }

    pub fn push_alias(&mut self, alias: Alias) {
        self.aliases.push(alias);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = IndexWriter::new();
        w.section(GLOBAL_SECTION);
        w.pair(VERSION_KEY, self.version);
        w.pair(ENCODING_KEY, self.encoding);
        w.blank();
        w.section(RESOURCES_SECTION);
        for e in &self.resources {
            w.pair(e.resource_id, &e.file_name);
        }
        if !self.aliases.is_empty() {
            w.blank();
            w.section(ALIAS_SECTION);
            for a in &self.aliases {
                w.pair(a.resource_id, a.entry_index);
            }
        }
        w.finish()
    }

    pub fn parse(text: &[u8]) -> Result<Self, IndexError> {
        let mut section = Section::Outside;
        let mut seen_global = false;
        let mut seen_resources = false;
        let mut version = None;
        let mut encoding = None;
        let mut resources = Vec::new();
        let mut aliases = Vec::new();

        for (i, raw) in text.split(|&b| b == b'\n').enumerate() {
            let line_no = i + 1;
            let line = std::str::from_utf8(raw)
                .map_err(|_| IndexError::NotUtf8 { line: line_no })?
                .trim();
            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = match name.trim() {
                    GLOBAL_SECTION => {
                        seen_global = true;
                        Section::Global
                    }
                    RESOURCES_SECTION => {
                        seen_resources = true;
                        Section::Resources
                    }
                    ALIAS_SECTION => Section::Alias,
                    other => {
                        tracing::warn!(line = line_no, section = other, "skipping unknown index section");
                        Section::Unknown
                    }
                };
                continue;
            }

            match section {
                Section::Unknown => continue,
                Section::Outside => {
                    return Err(IndexError::InvalidLine { line: line_no, text: line.to_owned() });
                }
                _ => {}
            }

            let (key, value) = split_pair(line, line_no)?;
            match section {
                Section::Outside | Section::Unknown => {}
                Section::Global => match key {
                    VERSION_KEY => version = Some(parse_num::<u32>(value, line_no, VERSION_KEY)?),
                    ENCODING_KEY => encoding = Some(parse_num::<u8>(value, line_no, ENCODING_KEY)?),
                    other => tracing::warn!(line = line_no, key = other, "ignoring unknown global key"),
                },
                Section::Resources => {
                    if value.is_empty() {
                        return Err(IndexError::InvalidLine { line: line_no, text: line.to_owned() });
                    }
                    resources.push(IndexEntry {
                        resource_id: parse_num(key, line_no, "resource id")?,
                        file_name:   value.to_owned(),
                    });
                }
                Section::Alias => aliases.push(Alias {
                    resource_id: parse_num(key, line_no, "resource id")?,
                    entry_index: parse_num(value, line_no, "entry index")?,
                }),
            }
        }

        if !seen_global {
            return Err(IndexError::MissingSection(GLOBAL_SECTION));
        }
        if !seen_resources {
            return Err(IndexError::MissingSection(RESOURCES_SECTION));
        }

        Ok(Self {
            version:  version.ok_or(IndexError::MissingKey(VERSION_KEY))?,
            encoding: encoding.ok_or(IndexError::MissingKey(ENCODING_KEY))?,
            resources,
            aliases,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    Global,
    Resources,
    Alias,
    Unknown,
}

fn split_pair(line: &str, line_no: usize) -> Result<(&str, &str), IndexError> {
    line.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .ok_or_else(|| IndexError::InvalidLine { line: line_no, text: line.to_owned() })
}

fn parse_num<T: std::str::FromStr>(value: &str, line: usize, key: &'static str) -> Result<T, IndexError> {
    value
        .parse()
        .map_err(|_| IndexError::InvalidNumber { line, key, value: value.to_owned() })
}

// ── Writer ───────────────────────────────────────────────────────────────────

/// Append-only CRLF text builder.
#[derive(Debug, Default)]
pub struct IndexWriter {
    buf: String,
}

impl IndexWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn section(&mut self, name: &str) {
        self.append("[");
        self.append(name);
        self.append("]");
        self.append(CRLF);
    }

    pub fn pair(&mut self, key: impl std::fmt::Display, value: impl std::fmt::Display) {
        self.append(&key.to_string());
        self.append("=");
        self.append(&value.to_string());
        self.append(CRLF);
    }

    pub fn blank(&mut self) {
        self.append(CRLF);
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf.into_bytes()
    }
}
