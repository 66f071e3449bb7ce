// Embeds a VERSIONINFO resource on Windows so the updater can read its own
// ProductVersion (MAJOR.MINOR.PATCH.0) the same way it reads the app's.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }

    let version = env::var("CARGO_PKG_VERSION").unwrap();
    let numeric: Vec<&str> = version
        .split(|c: char| c == '.' || c == '-' || c == '+')
        .take(3)
        .collect();
    let file_version = format!("{},0", numeric.join(","));
    let product_version = format!("{}.0", numeric.join("."));

    let rc = format!(
        r#"#include <winver.h>

VS_VERSION_INFO VERSIONINFO
FILEVERSION {file_version}
PRODUCTVERSION {file_version}
FILEOS VOS_NT_WINDOWS32
FILETYPE VFT_APP
BEGIN
    BLOCK "StringFileInfo"
    BEGIN
        BLOCK "040904b0"
        BEGIN
            VALUE "FileDescription", "ICARUS Terminal Updater"
            VALUE "ProductName", "ICARUS Terminal"
            VALUE "FileVersion", "{product_version}"
            VALUE "ProductVersion", "{product_version}"
        END
    END
    BLOCK "VarFileInfo"
    BEGIN
        VALUE "Translation", 0x409, 1200
    END
END
"#
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let rc_path = out_dir.join("version.rc");
    fs::write(&rc_path, rc).unwrap();

    embed_resource::compile(&rc_path, embed_resource::NONE)
        .manifest_optional()
        .unwrap();
}
