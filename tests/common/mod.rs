//! Shared helpers for integration tests.

#![allow(dead_code)]

use icarus_updater::UpdaterConfig;
use wiremock::MockServer;

#[path = "../../src/test_utils.rs"]
mod blocks;

pub use blocks::version_block;

pub const FEED_PATH: &str = "/repos/iaincollins/icarus/releases/latest";

pub fn config_for(server: &MockServer) -> UpdaterConfig {
    UpdaterConfig {
        feed_url: format!("{}{}", server.uri(), FEED_PATH),
        timeout_secs: 1,
        ..UpdaterConfig::default()
    }
}
