// Yandex.Disk client module: folder lookup, folder creation, and the
// three-step file upload (obtain an upload link, fetch the source
// bytes, PUT them to the link). Blocking, one call at a time.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use crate::config::Config;

const DISK_API_BASE: &str = "https://cloud-api.yandex.net/v1/disk";

/// Client for the Yandex.Disk REST API. Every request carries an
/// `Authorization: OAuth <token>` header; there is no token refresh.
pub struct DiskClient {
    http: reqwest::blocking::Client,
    base_url: String,
    access_token: String,
}

/// Outcome of `create_folder`. Creating a folder that already exists is
/// a no-op, not an error, so it gets its own success variant.
#[derive(Debug, PartialEq, Eq)]
pub enum FolderStatus {
    Created(String),
    AlreadyExists(String),
}

impl fmt::Display for FolderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolderStatus::Created(name) => {
                write!(f, "Folder '{}' created successfully.", name)
            }
            FolderStatus::AlreadyExists(name) => {
                write!(f, "Folder '{}' already exists.", name)
            }
        }
    }
}

/// Errors from the Disk API, tagged by the step that failed. Each
/// message embeds the HTTP status so a printed error still tells the
/// user what the service answered.
#[derive(Debug, Error)]
pub enum DiskError {
    #[error("folder check failed: status {status}")]
    FolderCheck { status: StatusCode },

    #[error("folder creation failed: status {status}")]
    FolderCreate { status: StatusCode },

    #[error("failed to obtain an upload link: status {status}")]
    UploadLink { status: StatusCode },

    #[error("failed to download the source file: status {status}")]
    Download { status: StatusCode },

    #[error("failed to upload the file contents: status {status}")]
    Upload { status: StatusCode },

    #[error("request failed")]
    Http(#[from] reqwest::Error),
}

/// Reply to the upload-link request; `href` is the URL the file body
/// must be PUT to.
#[derive(Debug, Deserialize)]
struct UploadLink {
    href: String,
}

impl DiskClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build HTTP client for Yandex.Disk")?;
        Ok(DiskClient {
            http,
            base_url: DISK_API_BASE.to_string(),
            access_token: config.disk_token.clone(),
        })
    }

    fn auth_header(&self) -> String {
        format!("OAuth {}", self.access_token)
    }

    /// Whether a folder with this name exists at the Disk root.
    pub fn folder_exists(&self, folder_name: &str) -> Result<bool, DiskError> {
        let url = format!("{}/resources", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("Authorization", self.auth_header())
            .query(&[("path", folder_name)])
            .send()?;
        folder_presence(response.status())
    }

    /// Create a folder at the Disk root, or confirm it is already
    /// there. Calling this twice with the same name issues no second
    /// creation request.
    pub fn create_folder(&self, folder_name: &str) -> Result<FolderStatus, DiskError> {
        if self.folder_exists(folder_name)? {
            return Ok(FolderStatus::AlreadyExists(folder_name.to_string()));
        }

        let url = format!("{}/resources", self.base_url);
        let response = self
            .http
            .put(&url)
            .header("Authorization", self.auth_header())
            .query(&[("path", folder_name)])
            .send()?;

        match response.status() {
            StatusCode::CREATED => Ok(FolderStatus::Created(folder_name.to_string())),
            status => Err(DiskError::FolderCreate { status }),
        }
    }

    /// Upload one file into `folder_name` (or the Disk root when no
    /// folder is given), pulling its contents from `source_url`.
    ///
    /// Three network calls: obtain an upload link for the target path,
    /// download the source bytes in full, PUT them to the link. A
    /// failed download never reaches the PUT step.
    pub fn upload_file(
        &self,
        file_name: &str,
        source_url: &str,
        folder_name: Option<&str>,
    ) -> Result<(), DiskError> {
        let path = remote_path(file_name, folder_name);

        let url = format!("{}/resources/upload", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("Authorization", self.auth_header())
            .query(&[("path", path.as_str())])
            .send()?;
        if response.status() != StatusCode::OK {
            return Err(DiskError::UploadLink {
                status: response.status(),
            });
        }
        let link = response.json::<UploadLink>()?;

        let download = self.http.get(source_url).send()?;
        if download.status() != StatusCode::OK {
            return Err(DiskError::Download {
                status: download.status(),
            });
        }
        let body = download.bytes()?;

        let upload = self.http.put(&link.href).body(body).send()?;
        match upload.status() {
            StatusCode::CREATED => Ok(()),
            status => Err(DiskError::Upload { status }),
        }
    }
}

/// Map the status of a metadata lookup to folder presence. Anything
/// other than 200 or 404 is an error carrying the status code.
fn folder_presence(status: StatusCode) -> Result<bool, DiskError> {
    match status {
        StatusCode::OK => Ok(true),
        StatusCode::NOT_FOUND => Ok(false),
        status => Err(DiskError::FolderCheck { status }),
    }
}

/// Target path on Disk: `folder/file`, or just `file` without a folder.
fn remote_path(file_name: &str, folder_name: Option<&str>) -> String {
    match folder_name {
        Some(folder) => format!("{}/{}", folder, file_name),
        None => file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_path_joins_folder_and_file() {
        assert_eq!(
            remote_path("Photo №1 Like(5)", Some("vacation")),
            "vacation/Photo №1 Like(5)"
        );
        assert_eq!(remote_path("photo.jpg", None), "photo.jpg");
    }

    #[test]
    fn folder_presence_maps_statuses() {
        assert!(folder_presence(StatusCode::OK).unwrap());
        assert!(!folder_presence(StatusCode::NOT_FOUND).unwrap());
        let err = folder_presence(StatusCode::INTERNAL_SERVER_ERROR).unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn errors_name_the_failed_step_and_status() {
        let err = DiskError::Download {
            status: StatusCode::FORBIDDEN,
        };
        let text = err.to_string();
        assert!(text.contains("download"));
        assert!(text.contains("403"));

        let err = DiskError::Upload {
            status: StatusCode::INSUFFICIENT_STORAGE,
        };
        let text = err.to_string();
        assert!(text.contains("upload"));
        assert!(text.contains("507"));

        let err = DiskError::UploadLink {
            status: StatusCode::UNAUTHORIZED,
        };
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn folder_status_messages() {
        assert_eq!(
            FolderStatus::Created("trip".to_string()).to_string(),
            "Folder 'trip' created successfully."
        );
        assert_eq!(
            FolderStatus::AlreadyExists("trip".to_string()).to_string(),
            "Folder 'trip' already exists."
        );
    }

    #[test]
    fn upload_link_deserializes_href() {
        let raw = r#"{
            "operation_id": "abc",
            "href": "https://uploader.disk.yandex.net/upload-target/xyz",
            "method": "PUT",
            "templated": false
        }"#;
        let link: UploadLink = serde_json::from_str(raw).unwrap();
        assert_eq!(link.href, "https://uploader.disk.yandex.net/upload-target/xyz");
    }
}
