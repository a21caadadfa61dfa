//! Outbound actions on the current page: share and save photo.
//!
//! Both only read the controller's current record.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::carousel::CarouselController;
use crate::constants::CLIPBOARD_FALLBACK_NOTICE;
use crate::models::PersonRecord;
use crate::utils::message_formatter::{build_photo_file_name, build_share_text, build_share_title};
use crate::utils::photo::{decode_data_url, photo_data_url};

/// Content handed to a native share sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    /// Text to copy when no share sheet is available
    pub fn clipboard_text(&self) -> &str {
        &self.url
    }

    /// Notice shown after the clipboard fallback
    pub fn clipboard_notice(&self) -> &'static str {
        CLIPBOARD_FALLBACK_NOTICE
    }
}

/// A photo ready to be saved as a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDownload {
    pub file_name: String,
    pub data_url: String,
}

/// Errors raised while saving a photo
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Photo is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Failed to write photo: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the share payload for a person
pub fn build_share_payload(person: &PersonRecord, page_url: &str) -> SharePayload {
    SharePayload {
        title: build_share_title(person),
        text: build_share_text(person),
        url: page_url.to_string(),
    }
}

/// Share payload for whoever is on the current page
pub fn share_current(controller: &CarouselController, page_url: &str) -> Option<SharePayload> {
    controller
        .current()
        .map(|person| build_share_payload(&person, page_url))
}

/// Prepare a person's photo for download; `None` without a photo
pub fn prepare_photo_download(person: &PersonRecord) -> Option<PhotoDownload> {
    let photo = person.photo.as_deref().filter(|_| person.has_photo())?;

    Some(PhotoDownload {
        file_name: build_photo_file_name(person),
        data_url: photo_data_url(photo),
    })
}

/// Photo download for whoever is on the current page
pub fn download_current(controller: &CarouselController) -> Option<PhotoDownload> {
    controller.current().as_ref().and_then(prepare_photo_download)
}

/// Decode the photo and write it into `dir`, returning the file path
pub async fn save_photo(download: &PhotoDownload, dir: &Path) -> Result<PathBuf, DownloadError> {
    let bytes = decode_data_url(&download.data_url).map_err(|e| {
        warn!("Photo {} could not be decoded: {}", download.file_name, e);
        e
    })?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&download.file_name);
    tokio::fs::write(&path, &bytes).await?;

    info!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}
