//! Self-update checker for ICARUS Terminal.
//!
//! Reads the installed version from the executable's version resource,
//! compares it with the latest GitHub release and, when they differ, asks the
//! user whether to download the new release.

pub mod config;
pub mod download;
pub mod error;
pub mod extractor;
pub mod platform;
pub mod release;
pub mod updater;
pub mod version;
pub mod version_info;

#[cfg(test)]
mod test_utils;

pub use config::UpdaterConfig;
pub use download::{download_release, ReleaseDownloader};
pub use error::{MetadataError, Result, UpdateError};
pub use extractor::{get_current_version, ExecutableVersionSource, VersionSource};
pub use platform::{NativePrompt, NativeShell, UrlOpener, UserPrompt};
pub use release::{get_latest_release, ReleaseDescriptor, ReleaseFetcher, ReleaseSource};
pub use updater::{UpdateDecision, Updater};
pub use version::CanonicalVersion;

/// Run one update check against the real executable, feed, dialog and shell.
pub fn check_for_update(config: &UpdaterConfig) {
    let source = match &config.executable {
        Some(path) => ExecutableVersionSource::new(path),
        None => match ExecutableVersionSource::current_exe() {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(error = %e, "skipping update check");
                return;
            }
        },
    };

    Updater::new(source, ReleaseFetcher::new(config), NativePrompt, NativeShell)
        .check_for_update();
}
