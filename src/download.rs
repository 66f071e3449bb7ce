// Streams a release asset to local storage. Never invoked by the update check
// itself: the downloaded installer needs elevation to run, so accepting an
// update opens the URL in the browser instead.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::UpdaterConfig;
use crate::error::{Result, UpdateError};
use crate::release::ReleaseDescriptor;

/// Downloads release assets to a fixed destination with a shared HTTP agent.
#[derive(Debug, Clone)]
pub struct ReleaseDownloader {
    agent: ureq::Agent,
    destination: PathBuf,
}

impl ReleaseDownloader {
    /// No overall timeout here; installers can take a while on slow links.
    /// Downloads land at `config.download_file_name`, relative to the working
    /// directory unless absolute.
    pub fn new(config: &UpdaterConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.timeout())
            .user_agent(&config.user_agent)
            .build();
        Self {
            agent,
            destination: PathBuf::from(&config.download_file_name),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Stream the asset to the fixed destination, replacing any existing file.
    pub fn download(&self, release: &ReleaseDescriptor) -> Result<PathBuf> {
        self.download_to(release, &self.destination)
    }

    /// Stream the asset to `dest`, replacing any existing file there.
    pub fn download_to(&self, release: &ReleaseDescriptor, dest: &Path) -> Result<PathBuf> {
        tracing::info!(url = %release.download_url(), dest = %dest.display(), "downloading release");

        let response = self.agent.get(release.download_url()).call()?;

        let mut file = File::create(dest).map_err(|source| io_error(dest, source))?;
        let mut reader = response.into_reader();
        let written = io::copy(&mut reader, &mut file).map_err(|source| io_error(dest, source))?;
        file.sync_all().map_err(|source| io_error(dest, source))?;

        tracing::info!(bytes = written, dest = %dest.display(), "release downloaded");
        Ok(dest.to_path_buf())
    }
}

/// Download `release` to `ICARUS Update.exe` in the working directory.
pub fn download_release(release: &ReleaseDescriptor) -> Result<PathBuf> {
    ReleaseDownloader::new(&UpdaterConfig::default()).download(release)
}

fn io_error(path: &Path, source: io::Error) -> UpdateError {
    UpdateError::Io {
        path: path.to_path_buf(),
        source,
    }
}
