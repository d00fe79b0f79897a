//! File-name suffix from leading magic bytes.

struct Signature {
    suffix: &'static str,
    magic:  &'static [u8],
}

/// Checked in order; the first match wins.  The leading seven entries take
/// precedence over the later, less common signatures.
static SIGNATURES: [Signature; 16] = [
    Signature { suffix: ".png",  magic: &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] },
    Signature { suffix: ".html", magic: b"<!doctype html>" },
    Signature { suffix: ".html", magic: b"<html>" },
    Signature { suffix: ".html", magic: b"<link" },
    Signature { suffix: ".js",   magic: b"// " },
    Signature { suffix: ".css",  magic: b"/*" },
    Signature { suffix: ".json", magic: b"{" },
    Signature { suffix: ".html", magic: b"<!DOCTYPE html>" },
    Signature { suffix: ".html", magic: b"<!--" },
    Signature { suffix: ".svg",  magic: b"<svg " },
    Signature { suffix: ".js",   magic: b"(function" },
    // gzip
    Signature { suffix: ".gz",   magic: &[0x1F, 0x8B] },
    // Chromium brotli framing; the payload is kept as-is.
    Signature { suffix: ".br",   magic: &[0x1E, 0x9B] },
    Signature { suffix: ".gif",  magic: b"GIF89a" },
    Signature { suffix: ".gif",  magic: b"GIF87a" },
    Signature { suffix: ".jpg",  magic: &[0xFF, 0xD8] },
];

/// Suffix (with leading dot) for `bytes`, or `""` when nothing matches.
pub fn sniff_suffix(bytes: &[u8]) -> &'static str {
    SIGNATURES
        .iter()
        .find(|s| bytes.starts_with(s.magic))
        .map_or("", |s| s.suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_magic() {
        let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(sniff_suffix(&png), ".png");
        png.extend_from_slice(b"IHDR");
        assert_eq!(sniff_suffix(&png), ".png");
    }

    #[test]
    fn text_prefixes() {
        assert_eq!(sniff_suffix(b"<!doctype html><p>"), ".html");
        assert_eq!(sniff_suffix(b"<html><body>"), ".html");
        assert_eq!(sniff_suffix(b"<link rel=import>"), ".html");
        assert_eq!(sniff_suffix(b"// Copyright"), ".js");
        assert_eq!(sniff_suffix(b"/* styles */"), ".css");
        assert_eq!(sniff_suffix(b"{\"a\":1}"), ".json");
        assert_eq!(sniff_suffix(b"<!DOCTYPE html><p>"), ".html");
        assert_eq!(sniff_suffix(b"<!-- x -->"), ".html");
        assert_eq!(sniff_suffix(b"<svg xmlns=\"x\">"), ".svg");
        assert_eq!(sniff_suffix(b"(function(){})()"), ".js");
    }

    #[test]
    fn binary_magics() {
        assert_eq!(sniff_suffix(b"GIF89a\x01\x00"), ".gif");
        assert_eq!(sniff_suffix(b"GIF87a"), ".gif");
        assert_eq!(sniff_suffix(&[0xFF, 0xD8, 0xFF, 0xE0]), ".jpg");
        assert_eq!(sniff_suffix(&[0x1F, 0x8B, 8, 0]), ".gz");
        assert_eq!(sniff_suffix(&[0x1E, 0x9B, 0, 0, 4, 0, 0, 0]), ".br");
    }

    #[test]
    fn earlier_signatures_win() {
        assert_eq!(sniff_suffix(b"<link rel=stylesheet>"), ".html");
        assert_eq!(sniff_suffix(b"// (function"), ".js");
    }

    #[test]
    fn no_match_is_empty() {
        assert_eq!(sniff_suffix(b""), "");
        assert_eq!(sniff_suffix(b"//no-space"), "");
        assert_eq!(sniff_suffix(&[0x89, b'P', b'N']), "");
        assert_eq!(sniff_suffix(b"plain text"), "");
        assert_eq!(sniff_suffix(b"<svg>"), "");
        assert_eq!(sniff_suffix(b"GIF8"), "");
        assert_eq!(sniff_suffix(&[0xFF]), "");
        assert_eq!(sniff_suffix(b"<!-"), "");
    }
}
