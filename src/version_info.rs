//! Parser for Windows `VS_VERSIONINFO` resource blocks.
//!
//! The block is a tree of length-prefixed nodes:
//!
//! ```text
//! VS_VERSION_INFO            (VS_FIXEDFILEINFO value)
//! ├── StringFileInfo
//! │   └── 040904b0           (one table per language/codepage)
//! │       ├── CompanyName    = "..."
//! │       └── ProductVersion = "1.2.3.0"
//! └── VarFileInfo
//!     └── Translation        ([u16 language, u16 codepage]...)
//! ```
//!
//! Each node is `wLength, wValueLength, wType, szKey`, padded to 32 bits, then
//! the value, padded to 32 bits, then the children. Alignment is relative to
//! the start of the whole block.

use crate::error::MetadataError;

const HEADER_LEN: usize = 6;
const ROOT_KEY: &str = "VS_VERSION_INFO";
const PRODUCT_VERSION: &str = "ProductVersion";

/// A language/codepage pair naming one string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub language: u16,
    pub codepage: u16,
}

impl Translation {
    /// Key of the matching `StringFileInfo` table, e.g. `040904b0`.
    pub fn table_key(&self) -> String {
        format!("{:04x}{:04x}", self.language, self.codepage)
    }
}

#[derive(Debug)]
struct StringTable {
    key: String,
    entries: Vec<(String, String)>,
}

/// Parsed contents of a version-info resource.
#[derive(Debug)]
pub struct VersionInfo {
    translations: Vec<Translation>,
    tables: Vec<StringTable>,
}

impl VersionInfo {
    pub fn parse(data: &[u8]) -> Result<Self, MetadataError> {
        if data.len() < HEADER_LEN {
            return Err(MetadataError::NoVersionResource);
        }

        let root = Node::parse(data, 0, data.len())?;
        if root.key != ROOT_KEY {
            return Err(malformed(format!("unexpected root key {:?}", root.key)));
        }

        let mut info = VersionInfo {
            translations: Vec::new(),
            tables: Vec::new(),
        };

        for section in root.children(data)? {
            match section.key.as_str() {
                "StringFileInfo" => {
                    for table in section.children(data)? {
                        let mut entries = Vec::new();
                        for entry in table.children(data)? {
                            let value = decode_utf16(entry.value(data));
                            entries.push((entry.key, value));
                        }
                        info.tables.push(StringTable {
                            key: table.key,
                            entries,
                        });
                    }
                }
                "VarFileInfo" => {
                    for var in section.children(data)? {
                        if var.key == "Translation" {
                            info.translations.extend(
                                var.value(data).chunks_exact(4).map(|pair| Translation {
                                    language: u16::from_le_bytes([pair[0], pair[1]]),
                                    codepage: u16::from_le_bytes([pair[2], pair[3]]),
                                }),
                            );
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(info)
    }

    /// Language/codepage pairs in resource order.
    pub fn translations(&self) -> &[Translation] {
        &self.translations
    }

    /// Look up a string field (`ProductVersion`, `CompanyName`, ...) in the
    /// table for `translation`. Table keys are matched case-insensitively.
    pub fn query_string(&self, translation: Translation, name: &str) -> Option<&str> {
        let key = translation.table_key();
        self.tables
            .iter()
            .filter(|t| t.key.eq_ignore_ascii_case(&key))
            .flat_map(|t| t.entries.iter())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The raw product version from the first available translation.
    pub fn product_version(&self) -> Result<&str, MetadataError> {
        let first = self
            .translations
            .first()
            .copied()
            .ok_or(MetadataError::NoTranslation)?;
        match self.query_string(first, PRODUCT_VERSION) {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(MetadataError::NoProductVersion),
        }
    }
}

/// One node of the resource tree, as absolute offsets into the block.
struct Node {
    key: String,
    end: usize,
    value_start: usize,
    value_end: usize,
    children_start: usize,
}

impl Node {
    fn parse(data: &[u8], start: usize, limit: usize) -> Result<Self, MetadataError> {
        let length = read_u16(data, start)? as usize;
        let value_length = read_u16(data, start + 2)? as usize;
        let value_type = read_u16(data, start + 4)?;

        if length < HEADER_LEN {
            return Err(malformed(format!("node at {start} shorter than its header")));
        }
        let end = start + length;
        if end > limit {
            return Err(malformed(format!("node at {start} overruns its parent")));
        }

        let mut pos = start + HEADER_LEN;
        let mut units = Vec::new();
        loop {
            if pos + 2 > end {
                return Err(malformed(format!("unterminated key at {start}")));
            }
            let unit = read_u16(data, pos)?;
            pos += 2;
            if unit == 0 {
                break;
            }
            units.push(unit);
        }

        // Text values count UTF-16 units, binary values count bytes
        let value_bytes = if value_type == 1 {
            value_length * 2
        } else {
            value_length
        };
        let value_start = align4(pos).min(end);
        let value_end = (value_start + value_bytes).min(end);

        Ok(Node {
            key: String::from_utf16_lossy(&units),
            end,
            value_start,
            value_end,
            children_start: align4(value_end).min(end),
        })
    }

    fn value<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.value_start..self.value_end]
    }

    fn children(&self, data: &[u8]) -> Result<Vec<Node>, MetadataError> {
        let mut nodes = Vec::new();
        let mut pos = self.children_start;
        while pos + HEADER_LEN <= self.end {
            let child = Node::parse(data, pos, self.end)?;
            pos = align4(child.end);
            nodes.push(child);
        }
        Ok(nodes)
    }
}

fn align4(n: usize) -> usize {
    (n + 3) & !3
}

fn read_u16(data: &[u8], at: usize) -> Result<u16, MetadataError> {
    data.get(at..at + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or_else(|| malformed(format!("truncated at offset {at}")))
}

fn decode_utf16(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .take_while(|&u| u != 0)
        .collect();
    String::from_utf16_lossy(&units)
}

fn malformed(msg: String) -> MetadataError {
    MetadataError::Malformed(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{node, text, version_block, FIXED_FILE_INFO};

    #[test]
    fn reads_product_version_of_first_translation() {
        let data = version_block("1.4.2.0");
        let info = VersionInfo::parse(&data).unwrap();
        assert_eq!(
            info.translations(),
            &[Translation {
                language: 0x0409,
                codepage: 0x04b0
            }]
        );
        assert_eq!(info.product_version().unwrap(), "1.4.2.0");
    }

    #[test]
    fn other_string_fields_are_queryable() {
        let data = version_block("0.9.0.3");
        let info = VersionInfo::parse(&data).unwrap();
        let t = info.translations()[0];
        assert_eq!(info.query_string(t, "CompanyName"), Some("ICARUS"));
        assert_eq!(info.query_string(t, "FileDescription"), None);
    }

    #[test]
    fn first_translation_wins() {
        let table = |key: &str, version: &str| {
            node(key, 1, &[], &[node("ProductVersion", 1, &text(version), &[])])
        };
        let data = node(
            "VS_VERSION_INFO",
            0,
            &FIXED_FILE_INFO,
            &[
                node(
                    "StringFileInfo",
                    1,
                    &[],
                    &[table("040904B0", "2.0.0.0"), table("040704b0", "3.0.0.0")],
                ),
                node(
                    "VarFileInfo",
                    1,
                    &[],
                    &[node(
                        "Translation",
                        0,
                        &[0x07, 0x04, 0xb0, 0x04, 0x09, 0x04, 0xb0, 0x04],
                        &[],
                    )],
                ),
            ],
        );

        let info = VersionInfo::parse(&data).unwrap();
        assert_eq!(info.translations().len(), 2);
        assert_eq!(info.product_version().unwrap(), "3.0.0.0");
    }

    #[test]
    fn missing_translation_table() {
        let data = node(
            "VS_VERSION_INFO",
            0,
            &FIXED_FILE_INFO,
            &[node(
                "StringFileInfo",
                1,
                &[],
                &[node(
                    "040904b0",
                    1,
                    &[],
                    &[node("ProductVersion", 1, &text("1.0.0.0"), &[])],
                )],
            )],
        );
        let info = VersionInfo::parse(&data).unwrap();
        assert!(matches!(
            info.product_version(),
            Err(MetadataError::NoTranslation)
        ));
    }

    #[test]
    fn empty_translation_table() {
        let data = node(
            "VS_VERSION_INFO",
            0,
            &FIXED_FILE_INFO,
            &[node("VarFileInfo", 1, &[], &[node("Translation", 0, &[], &[])])],
        );
        let info = VersionInfo::parse(&data).unwrap();
        assert!(matches!(
            info.product_version(),
            Err(MetadataError::NoTranslation)
        ));
    }

    #[test]
    fn missing_product_version() {
        let data = node(
            "VS_VERSION_INFO",
            0,
            &FIXED_FILE_INFO,
            &[
                node(
                    "StringFileInfo",
                    1,
                    &[],
                    &[node(
                        "040904b0",
                        1,
                        &[],
                        &[node("FileVersion", 1, &text("1.0.0.0"), &[])],
                    )],
                ),
                node(
                    "VarFileInfo",
                    1,
                    &[],
                    &[node("Translation", 0, &[0x09, 0x04, 0xb0, 0x04], &[])],
                ),
            ],
        );
        let info = VersionInfo::parse(&data).unwrap();
        assert!(matches!(
            info.product_version(),
            Err(MetadataError::NoProductVersion)
        ));
    }

    #[test]
    fn empty_block_has_no_resource() {
        assert!(matches!(
            VersionInfo::parse(&[]),
            Err(MetadataError::NoVersionResource)
        ));
    }

    #[test]
    fn truncated_block_is_malformed() {
        let data = version_block("1.0.0.0");
        let cut = &data[..data.len() / 2];
        assert!(matches!(
            VersionInfo::parse(cut),
            Err(MetadataError::Malformed(_))
        ));
    }

    #[test]
    fn wrong_root_key_is_malformed() {
        let data = node("NOT_VERSION_INFO", 0, &FIXED_FILE_INFO, &[]);
        assert!(matches!(
            VersionInfo::parse(&data),
            Err(MetadataError::Malformed(_))
        ));
    }

    #[test]
    fn trailing_bytes_after_block_are_ignored() {
        // GetFileVersionInfoW hands back a buffer larger than wLength
        let mut data = version_block("5.6.7.8");
        data.extend_from_slice(&[0xAB; 64]);
        let info = VersionInfo::parse(&data).unwrap();
        assert_eq!(info.product_version().unwrap(), "5.6.7.8");
    }
}
