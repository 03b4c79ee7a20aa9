// VK client module: one small blocking HTTP client for the single read
// endpoint the job needs, `photos.get`. It is intentionally synchronous
// to match the strictly sequential shape of the whole job.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::Config;

const VK_API_BASE: &str = "https://api.vk.com/method";
const VK_API_VERSION: &str = "5.199";

/// Album id sentinel understood by VK as "the owner's profile photos".
const PROFILE_ALBUM: &str = "profile";

/// Client for the VK photos API. Holds a reqwest blocking client plus
/// the token and owner id every request needs.
pub struct VkClient {
    http: reqwest::blocking::Client,
    base_url: String,
    access_token: String,
    owner_id: String,
}

/// Top-level shape of a `photos.get` reply. VK reports its own errors
/// as data, so exactly one of `error` / `response` is populated and
/// callers must inspect the payload rather than rely on HTTP status.
#[derive(Debug, Deserialize)]
pub struct AlbumResponse {
    pub error: Option<VkApiError>,
    pub response: Option<AlbumItems>,
}

#[derive(Debug, Deserialize)]
pub struct VkApiError {
    pub error_msg: String,
}

#[derive(Debug, Deserialize)]
pub struct AlbumItems {
    pub items: Option<Vec<AlbumPhoto>>,
}

/// One photo of the album. Only the size variants and the like count
/// matter to the selection step; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct AlbumPhoto {
    #[serde(default)]
    pub sizes: Vec<PhotoSize>,
    #[serde(default)]
    pub likes: LikeCount,
}

#[derive(Debug, Deserialize)]
pub struct PhotoSize {
    pub width: u64,
    pub height: u64,
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LikeCount {
    pub count: u64,
}

impl VkClient {
    /// Create a client from the run configuration. The per-call timeout
    /// comes from the config so an unresponsive VK endpoint cannot hang
    /// the job forever.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build HTTP client for VK")?;
        Ok(VkClient {
            http,
            base_url: VK_API_BASE.to_string(),
            access_token: config.vk_token.clone(),
            owner_id: config.owner_id.clone(),
        })
    }

    /// Fetch the album metadata via `photos.get`. `extended=1` is always
    /// requested so every item carries its like count. Transport and
    /// decode failures propagate; an API-level error comes back inside
    /// the payload.
    pub fn get_photos(&self, album_id: Option<&str>) -> Result<AlbumResponse, reqwest::Error> {
        let url = format!("{}/photos.get", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("access_token", self.access_token.as_str()),
                ("owner_id", self.owner_id.as_str()),
                ("album_id", album_id.unwrap_or(PROFILE_ALBUM)),
                ("extended", "1"),
                ("v", VK_API_VERSION),
            ])
            .send()?;
        response.json::<AlbumResponse>()
    }
}
