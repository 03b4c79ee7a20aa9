// Configuration module: collects every process-wide constant (API
// tokens, album coordinates, HTTP timeout) into one struct built once
// at startup and passed by reference into the clients.

use std::time::Duration;

use anyhow::{Context, Result};

/// Default per-call timeout applied to every outbound HTTP request.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable run configuration. Nothing mutates this after startup and
/// there is no token refresh: a run lives or dies with the tokens it
/// started with.
#[derive(Debug, Clone)]
pub struct Config {
    /// VK API access token.
    pub vk_token: String,
    /// Identifier of the VK user or community owning the album.
    pub owner_id: String,
    /// Album to read. `None` means the owner's profile album.
    pub album_id: Option<String>,
    /// Yandex.Disk OAuth token.
    pub disk_token: String,
    /// Timeout for each individual HTTP call.
    pub http_timeout: Duration,
}

impl Config {
    /// Build a `Config` from environment variables. `VK_ACCESS_TOKEN`,
    /// `VK_OWNER_ID` and `YANDEX_DISK_TOKEN` are required;
    /// `VK_ALBUM_ID` and `HTTP_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        let vk_token =
            std::env::var("VK_ACCESS_TOKEN").context("VK_ACCESS_TOKEN is not set")?;
        let owner_id = std::env::var("VK_OWNER_ID").context("VK_OWNER_ID is not set")?;
        let album_id = std::env::var("VK_ALBUM_ID").ok().filter(|s| !s.is_empty());
        let disk_token =
            std::env::var("YANDEX_DISK_TOKEN").context("YANDEX_DISK_TOKEN is not set")?;

        let timeout_secs = match std::env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            vk_token,
            owner_id,
            album_id,
            disk_token,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment access is process-global, so everything lives in one
    // test to avoid interleaving with a parallel test runner.
    #[test]
    fn from_env_reads_required_and_optional_vars() {
        std::env::set_var("VK_ACCESS_TOKEN", "vk-token");
        std::env::set_var("VK_OWNER_ID", "123456");
        std::env::set_var("YANDEX_DISK_TOKEN", "disk-token");
        std::env::remove_var("VK_ALBUM_ID");
        std::env::remove_var("HTTP_TIMEOUT_SECS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.vk_token, "vk-token");
        assert_eq!(config.owner_id, "123456");
        assert_eq!(config.album_id, None);
        assert_eq!(config.http_timeout, Duration::from_secs(30));

        std::env::set_var("VK_ALBUM_ID", "987");
        std::env::set_var("HTTP_TIMEOUT_SECS", "5");
        let config = Config::from_env().unwrap();
        assert_eq!(config.album_id.as_deref(), Some("987"));
        assert_eq!(config.http_timeout, Duration::from_secs(5));

        std::env::set_var("HTTP_TIMEOUT_SECS", "soon");
        assert!(Config::from_env().is_err());

        std::env::remove_var("VK_ACCESS_TOKEN");
        std::env::remove_var("HTTP_TIMEOUT_SECS");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("VK_ACCESS_TOKEN"));
    }
}
