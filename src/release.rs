// HTTP release fetcher against the GitHub "latest release" feed

use serde_json::Value;

use crate::config::UpdaterConfig;
use crate::error::{Result, UpdateError};
use crate::version::CanonicalVersion;

const TAG_NAME: &str = "/tag_name";
const FIRST_ASSET_URL: &str = "/assets/0/browser_download_url";

/// The latest published release, normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    version: CanonicalVersion,
    download_url: String,
}

impl ReleaseDescriptor {
    /// Fails with [`UpdateError::MissingAsset`] for an empty URL and
    /// [`UpdateError::InvalidAssetUrl`] for one that is not absolute.
    pub fn new(version: CanonicalVersion, download_url: impl Into<String>) -> Result<Self> {
        let download_url = download_url.into();
        if download_url.is_empty() {
            return Err(UpdateError::MissingAsset);
        }
        if url::Url::parse(&download_url).is_err() {
            return Err(UpdateError::InvalidAssetUrl(download_url));
        }
        Ok(Self {
            version,
            download_url,
        })
    }

    pub fn version(&self) -> &CanonicalVersion {
        &self.version
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }
}

/// Where the orchestrator gets the latest release from.
pub trait ReleaseSource {
    fn latest_release(&self) -> Result<ReleaseDescriptor>;
}

/// Blocking client for the release feed. One GET per call, no retries.
#[derive(Debug, Clone)]
pub struct ReleaseFetcher {
    agent: ureq::Agent,
    feed_url: String,
}

impl ReleaseFetcher {
    pub fn new(config: &UpdaterConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build();
        Self {
            agent,
            feed_url: config.feed_url.clone(),
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }
}

impl ReleaseSource for ReleaseFetcher {
    fn latest_release(&self) -> Result<ReleaseDescriptor> {
        tracing::debug!(url = %self.feed_url, "fetching latest release");

        let body = self
            .agent
            .get(&self.feed_url)
            .set("Accept", "application/json")
            .call()?
            .into_string()
            .map_err(|e| UpdateError::Network(format!("failed to read response: {e}")))?;

        parse_release(&body)
    }
}

/// Fetch the latest release from `feed_url` with default settings.
pub fn get_latest_release(feed_url: &str) -> Result<ReleaseDescriptor> {
    let config = UpdaterConfig {
        feed_url: feed_url.to_string(),
        ..UpdaterConfig::default()
    };
    ReleaseFetcher::new(&config).latest_release()
}

/// Turn a feed response body into a descriptor.
///
/// An unparsable body is treated as an empty document. A missing tag yields an
/// empty version; only a missing download URL fails the fetch.
pub fn parse_release(body: &str) -> Result<ReleaseDescriptor> {
    let doc: Value = serde_json::from_str(body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "release feed body is not JSON");
        Value::Null
    });

    let tag = json_str(&doc, TAG_NAME).unwrap_or_default();
    if tag.is_empty() {
        tracing::warn!("release feed has no tag_name");
    }

    let download_url = json_str(&doc, FIRST_ASSET_URL)
        .filter(|u| !u.is_empty())
        .ok_or(UpdateError::MissingAsset)?;

    ReleaseDescriptor::new(CanonicalVersion::from_tag(tag), download_url)
}

/// String at a JSON pointer. Absent keys, out-of-range indices, nulls and
/// non-string values all come back as `None`.
pub fn json_str<'a>(doc: &'a Value, pointer: &str) -> Option<&'a str> {
    doc.pointer(pointer).and_then(Value::as_str)
}
