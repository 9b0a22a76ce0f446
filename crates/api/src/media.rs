//! Image upload to an external media API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::MediaConfig;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Media request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Media API returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Media API response carried no url")]
    MissingUrl,
}

/// Stores an uploaded file somewhere reachable and returns its public url.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, filename: &str, content_type: &str) -> Result<String, MediaError>;
}

/// Posts the file as multipart form data to `MEDIA_UPLOAD_URL`.
pub struct HttpMediaUploader {
    client: reqwest::Client,
    config: MediaConfig,
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    secure_url: Option<String>,
    url: Option<String>,
}

impl HttpMediaUploader {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MediaUploader for HttpMediaUploader {
    async fn upload(&self, bytes: Vec<u8>, filename: &str, content_type: &str) -> Result<String, MediaError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;

        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(preset) = &self.config.upload_preset {
            form = form.text("upload_preset", preset.clone());
        }

        let mut request = self.client.post(&self.config.upload_url).multipart(form);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(MediaError::Rejected { status, body });
        }

        let reply: UploadReply = resp.json().await?;
        let url = reply.secure_url.or(reply.url).ok_or(MediaError::MissingUrl)?;
        tracing::info!(%url, filename, "Image uploaded to media API");
        Ok(url)
    }
}
