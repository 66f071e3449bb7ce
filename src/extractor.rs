// Resolves the installed application's own version from its embedded metadata

use std::path::{Path, PathBuf};

use crate::error::MetadataError;
use crate::version::CanonicalVersion;
use crate::version_info::VersionInfo;

/// Something that can hand over a raw `VS_VERSIONINFO` block.
pub trait VersionSource {
    fn version_block(&self) -> Result<Vec<u8>, MetadataError>;
}

/// An in-memory block, e.g. one already read by another component.
impl VersionSource for [u8] {
    fn version_block(&self) -> Result<Vec<u8>, MetadataError> {
        Ok(self.to_vec())
    }
}

impl VersionSource for Vec<u8> {
    fn version_block(&self) -> Result<Vec<u8>, MetadataError> {
        Ok(self.clone())
    }
}

impl<T: VersionSource + ?Sized> VersionSource for &T {
    fn version_block(&self) -> Result<Vec<u8>, MetadataError> {
        (**self).version_block()
    }
}

/// Reads the version resource of an executable on disk.
#[derive(Debug, Clone)]
pub struct ExecutableVersionSource {
    path: PathBuf,
}

impl ExecutableVersionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The executable of the running process.
    pub fn current_exe() -> Result<Self, MetadataError> {
        let path = std::env::current_exe().map_err(MetadataError::Executable)?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(windows)]
impl VersionSource for ExecutableVersionSource {
    fn version_block(&self) -> Result<Vec<u8>, MetadataError> {
        use std::os::windows::ffi::OsStrExt;
        use windows::core::PCWSTR;
        use windows::Win32::Storage::FileSystem::{GetFileVersionInfoSizeW, GetFileVersionInfoW};

        let path_wide: Vec<u16> = self
            .path
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();

        unsafe {
            let size = GetFileVersionInfoSizeW(PCWSTR(path_wide.as_ptr()), None);
            if size == 0 {
                return Err(MetadataError::NoVersionResource);
            }

            let mut info = vec![0u8; size as usize];
            GetFileVersionInfoW(
                PCWSTR(path_wide.as_ptr()),
                None,
                size,
                info.as_mut_ptr().cast(),
            )
            .map_err(|_| MetadataError::NoVersionResource)?;
            Ok(info)
        }
    }
}

#[cfg(not(windows))]
impl VersionSource for ExecutableVersionSource {
    fn version_block(&self) -> Result<Vec<u8>, MetadataError> {
        Err(MetadataError::Unsupported)
    }
}

/// Read the product version from `source` and normalize it to
/// `MAJOR.MINOR.PATCH`.
pub fn get_current_version<S>(source: &S) -> Result<CanonicalVersion, MetadataError>
where
    S: VersionSource + ?Sized,
{
    let block = source.version_block()?;
    let info = VersionInfo::parse(&block)?;
    let raw = info.product_version()?;
    Ok(CanonicalVersion::from_product_version(raw))
}
