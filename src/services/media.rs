//! Media upload service implementation
//!
//! This service handles image hosting API integration: event images are
//! posted as unsigned multipart uploads and the hosted URL comes back for
//! use in the creation payload. The hosting provider is an external
//! collaborator; only its upload contract is consumed here.

use std::time::Duration;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info};
use crate::config::settings::Settings;
use crate::utils::errors::{TicketryError, MediaError, Result};

/// Image hosting API upload response
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub secure_url: Option<String>,
    pub error: Option<UploadError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadError {
    pub message: String,
}

/// Media service for uploading event images
#[derive(Debug, Clone)]
pub struct MediaService {
    client: Client,
    settings: Settings,
}

impl MediaService {
    /// Create a new MediaService instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.media.timeout_seconds))
            .user_agent("Ticketry/1.0")
            .build()
            .map_err(TicketryError::Http)?;

        Ok(Self { client, settings })
    }

    /// Upload an image and return its hosted URL.
    /// Only image content types are accepted.
    pub async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        if !content_type.starts_with("image/") {
            return Err(TicketryError::Media(MediaError::UnsupportedType(
                content_type.to_string(),
            )));
        }

        debug!(file_name = %file_name, size = bytes.len(), "Uploading event image");

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| TicketryError::Media(MediaError::UploadFailed(e.to_string())))?;

        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.settings.media.upload_preset.clone())
            .text("folder", self.settings.media.folder.clone());

        let response = self.client
            .post(&self.settings.media.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TicketryError::Media(MediaError::UploadFailed(e.to_string())))?;

        let upload: UploadResponse = response.json().await
            .map_err(|e| TicketryError::Media(MediaError::InvalidResponse(e.to_string())))?;

        match upload.secure_url {
            Some(url) => {
                info!(file_name = %file_name, url = %url, "Event image uploaded");
                Ok(url)
            }
            None => {
                let message = upload
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| "upload failed".to_string());
                Err(TicketryError::Media(MediaError::UploadFailed(message)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_non_image_content_type_rejected() {
        let service = MediaService::new(Settings::default()).unwrap();
        let result = service
            .upload_image("notes.txt", b"hello".to_vec(), "text/plain")
            .await;

        assert_matches!(
            result,
            Err(TicketryError::Media(MediaError::UnsupportedType(_)))
        );
    }

    #[test]
    fn test_upload_response_with_error_message() {
        let json = r#"{"error": {"message": "Upload preset not found"}}"#;
        let response: UploadResponse = serde_json::from_str(json).unwrap();
        assert!(response.secure_url.is_none());
        assert_eq!(response.error.unwrap().message, "Upload preset not found");
    }
}
