//! Update check orchestration.
//!
//! Resolves the local version, fetches the latest release, and on a mismatch
//! asks the user whether to download it. Every failure before the prompt is
//! swallowed: an update check must never disturb the host application.

use crate::error::{Result, UpdateError};
use crate::extractor::{get_current_version, VersionSource};
use crate::platform::{UrlOpener, UserPrompt};
use crate::release::{ReleaseDescriptor, ReleaseSource};
use crate::version::CanonicalVersion;

pub const PROMPT_TITLE: &str = "New version available";
pub const PROMPT_MESSAGE: &str =
    "A new version of ICARUS Terminal is available.\n\nWould you like to download the update?";

/// Outcome of comparing the local version with the latest release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDecision {
    UpToDate,
    UpdateAvailable(ReleaseDescriptor),
}

impl UpdateDecision {
    /// Exact string comparison of canonical forms. A local build newer than
    /// the published release still counts as an available update.
    pub fn decide(local: &CanonicalVersion, release: ReleaseDescriptor) -> Self {
        if local == release.version() {
            UpdateDecision::UpToDate
        } else {
            UpdateDecision::UpdateAvailable(release)
        }
    }
}

/// Wires the version source, release source and user-facing collaborators
/// together. Holds no state between checks.
pub struct Updater<V, R, P, S> {
    version_source: V,
    releases: R,
    prompt: P,
    shell: S,
}

impl<V, R, P, S> Updater<V, R, P, S>
where
    V: VersionSource,
    R: ReleaseSource,
    P: UserPrompt,
    S: UrlOpener,
{
    pub fn new(version_source: V, releases: R, prompt: P, shell: S) -> Self {
        Self {
            version_source,
            releases,
            prompt,
            shell,
        }
    }

    /// Resolve both versions and compare them, without touching the user.
    pub fn evaluate(&self) -> Result<UpdateDecision> {
        let local = get_current_version(&self.version_source)?;
        tracing::debug!(version = %local, "local version resolved");

        let release = self.releases.latest_release()?;
        tracing::debug!(version = %release.version(), "latest release resolved");

        Ok(UpdateDecision::decide(&local, release))
    }

    /// Run one full check: compare, prompt on mismatch, open the download URL
    /// if the user accepts.
    pub fn check_for_update(&self) {
        let release = match self.evaluate() {
            Ok(UpdateDecision::UpToDate) => {
                tracing::info!("already running the latest release");
                return;
            }
            Ok(UpdateDecision::UpdateAvailable(release)) => release,
            Err(UpdateError::Metadata(e)) => {
                tracing::warn!(error = %e, "cannot determine installed version, skipping update check");
                return;
            }
            Err(e) => {
                tracing::debug!(error = %e, "release check failed, skipping");
                return;
            }
        };

        tracing::info!(latest = %release.version(), "update available");

        if !self.prompt.confirm(PROMPT_TITLE, PROMPT_MESSAGE) {
            tracing::info!("update declined");
            return;
        }

        self.shell.open_url(release.download_url());
    }
}
