//! Font type classification and naming
//!
//! The declared type of a font comes from its sfnt header, never from the
//! file extension. Labels match the ones Windows shows in Explorer's "Type"
//! column, and only two of them are installable.

use std::fmt;
use std::path::Path;

use ttf_parser::{Face, name_id};

pub const TRUETYPE_LABEL: &str = "TrueType font file";
pub const OPENTYPE_LABEL: &str = "OpenType font file";
pub const COLLECTION_LABEL: &str = "TrueType collection font file";
pub const GENERIC_LABEL: &str = "File";

/// Declared type of a font file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontKind {
    TrueType,
    OpenType,
    /// Any other declared type; never installed
    Other(String),
}

impl FontKind {
    /// Resolve a declared type label by exact match
    pub fn from_label(label: &str) -> Self {
        match label {
            TRUETYPE_LABEL => FontKind::TrueType,
            OPENTYPE_LABEL => FontKind::OpenType,
            other => FontKind::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FontKind::TrueType => TRUETYPE_LABEL,
            FontKind::OpenType => OPENTYPE_LABEL,
            FontKind::Other(label) => label,
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, FontKind::TrueType | FontKind::OpenType)
    }

    /// Suffix appended to the display name in the registry value name
    pub fn registry_suffix(&self) -> Option<&'static str> {
        match self {
            FontKind::TrueType => Some("(TrueType)"),
            FontKind::OpenType => Some("(OpenType)"),
            FontKind::Other(_) => None,
        }
    }
}

impl fmt::Display for FontKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify file contents by their sfnt tag
pub fn classify_bytes(data: &[u8]) -> FontKind {
    let label = match data.get(..4) {
        Some(&[0x00, 0x01, 0x00, 0x00] | b"true") => TRUETYPE_LABEL,
        Some(b"OTTO") => OPENTYPE_LABEL,
        Some(b"ttcf") => COLLECTION_LABEL,
        _ => GENERIC_LABEL,
    };
    FontKind::from_label(label)
}

/// Human-readable font name: full name, then family name, then `fallback`
pub fn display_name(data: &[u8], fallback: &str) -> String {
    let Ok(face) = Face::parse(data, 0) else {
        return fallback.to_string();
    };

    let lookup = |id: u16| {
        face.names()
            .into_iter()
            .filter(|name| name.name_id == id && name.is_unicode())
            .find_map(|name| name.to_string())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    lookup(name_id::FULL_NAME)
        .or_else(|| lookup(name_id::FAMILY))
        .unwrap_or_else(|| fallback.to_string())
}

/// File stem used as the display name when the font has no usable name table
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Minimal sfnt with the required tables and a `name` table
///
/// Each name is `(platform id, encoding id, name id, text)`.
#[cfg(test)]
pub(crate) fn sfnt_with_names(magic: &[u8; 4], names: &[(u16, u16, u16, &str)]) -> Vec<u8> {
    let mut head = vec![0u8; 54];
    head[0..4].copy_from_slice(&[0x00, 0x01, 0x00, 0x00]);
    head[18..20].copy_from_slice(&1000u16.to_be_bytes());
    let hhea = vec![0u8; 36];
    let maxp = vec![0x00, 0x00, 0x50, 0x00, 0x00, 0x01];

    let mut records = Vec::new();
    let mut storage = Vec::new();
    for &(platform, encoding, id, text) in names {
        let encoded: Vec<u8> = text.encode_utf16().flat_map(u16::to_be_bytes).collect();
        for field in [
            platform,
            encoding,
            0x0409,
            id,
            encoded.len() as u16,
            storage.len() as u16,
        ] {
            records.extend_from_slice(&field.to_be_bytes());
        }
        storage.extend(encoded);
    }
    let mut name = Vec::new();
    for field in [0u16, names.len() as u16, (6 + records.len()) as u16] {
        name.extend_from_slice(&field.to_be_bytes());
    }
    name.extend(records);
    name.extend(storage);

    // Table records must be sorted by tag
    let tables: [(&[u8; 4], Vec<u8>); 4] =
        [(b"head", head), (b"hhea", hhea), (b"maxp", maxp), (b"name", name)];
    let mut font = magic.to_vec();
    for field in [tables.len() as u16, 0, 0, 0] {
        font.extend_from_slice(&field.to_be_bytes());
    }
    let mut offset = 12 + 16 * tables.len();
    let mut body = Vec::new();
    for (tag, data) in &tables {
        font.extend_from_slice(&tag[..]);
        font.extend_from_slice(&0u32.to_be_bytes());
        font.extend_from_slice(&(offset as u32).to_be_bytes());
        font.extend_from_slice(&(data.len() as u32).to_be_bytes());
        offset += data.len();
        body.extend_from_slice(data);
    }
    font.extend(body);
    font
}
