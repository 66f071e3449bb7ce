//! Builders for version-info resource blocks used across unit tests.

/// `VS_FIXEDFILEINFO` with only the signature set.
pub const FIXED_FILE_INFO: [u8; 52] = {
    let mut info = [0u8; 52];
    info[0] = 0xBD;
    info[1] = 0x04;
    info[2] = 0xEF;
    info[3] = 0xFE;
    info
};

/// Encode a NUL-terminated UTF-16LE text value.
pub fn text(s: &str) -> Vec<u8> {
    s.encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect()
}

/// Build one resource node with its children laid out on 32-bit boundaries.
/// `value_type` 1 marks a text value, whose length is stored in UTF-16 units.
pub fn node(key: &str, value_type: u16, value: &[u8], children: &[Vec<u8>]) -> Vec<u8> {
    let mut out = vec![0u8; 6];
    for unit in key.encode_utf16().chain(std::iter::once(0)) {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    pad4(&mut out);
    out.extend_from_slice(value);
    for child in children {
        pad4(&mut out);
        out.extend_from_slice(child);
    }

    let value_len = if value_type == 1 {
        value.len() / 2
    } else {
        value.len()
    };
    let len = out.len() as u16;
    out[0..2].copy_from_slice(&len.to_le_bytes());
    out[2..4].copy_from_slice(&(value_len as u16).to_le_bytes());
    out[4..6].copy_from_slice(&value_type.to_le_bytes());
    out
}

/// A complete US-English/Unicode version block carrying `product_version`.
pub fn version_block(product_version: &str) -> Vec<u8> {
    node(
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
                    &[
                        node("CompanyName", 1, &text("ICARUS"), &[]),
                        node("ProductVersion", 1, &text(product_version), &[]),
                    ],
                )],
            ),
            node(
                "VarFileInfo",
                1,
                &[],
                &[node("Translation", 0, &[0x09, 0x04, 0xb0, 0x04], &[])],
            ),
        ],
    )
}

fn pad4(buf: &mut Vec<u8>) {
    while buf.len() % 4 != 0 {
        buf.push(0);
    }
}
