//! Error types for the update checker.

use std::path::PathBuf;

/// The running binary's own version could not be determined.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The executable carries no version-info resource.
    #[error("no version resource found")]
    NoVersionResource,

    /// The resource has no translation table, or the table is empty.
    #[error("no translation found in version resource")]
    NoTranslation,

    /// The string table for the first translation has no `ProductVersion`.
    #[error("no product version in version resource")]
    NoProductVersion,

    /// The resource block is truncated or structurally invalid.
    #[error("malformed version resource: {0}")]
    Malformed(String),

    /// The path of the running executable could not be determined.
    #[error("cannot determine current executable path: {0}")]
    Executable(std::io::Error),

    /// Reading embedded version info is not implemented on this platform.
    #[error("reading version resources is not supported on this platform")]
    Unsupported,
}

/// Top-level error type for update checks and downloads.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// Local version metadata unavailable.
    #[error("version metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// Request could not be sent, timed out, or got a non-success status.
    #[error("network error: {0}")]
    Network(String),

    /// The release feed lists no download URL for its first asset.
    #[error("could not get download URL from release feed")]
    MissingAsset,

    /// The release feed lists a download URL that is not absolute.
    #[error("invalid download URL {0:?}")]
    InvalidAssetUrl(String),

    /// Local file could not be created or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ureq::Error> for UpdateError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => UpdateError::Network(format!("HTTP status {code}")),
            ureq::Error::Transport(t) => UpdateError::Network(t.to_string()),
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, UpdateError>;
