//! YouTube Resumable Upload Client
//!
//! UploadEndpoint の YouTube Data API v3 実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use reqwest::header::{CONTENT_RANGE, LOCATION, RANGE};
use reqwest::{redirect, Client, Response, StatusCode};
use serde_json::Value;

use super::models::{error_message, VideoInsertRequest};
use crate::domain::entities::upload_result::UploadResult;
use crate::domain::entities::video_metadata::VideoMetadata;
use crate::domain::errors::UploadError;
use crate::domain::repositories::upload_endpoint::{ChunkOutcome, UploadEndpoint};

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com";
const UPLOAD_PATH: &str = "/upload/youtube/v3/videos";

/// "Resume Incomplete" reuses the 308 status code
const RESUME_INCOMPLETE: u16 = 308;

/// `Content-Range` header for a chunk starting at `offset`
///
/// An empty chunk finalizes the upload (`bytes */total`).
pub fn content_range(offset: u64, len: usize, total: u64) -> String {
    if len == 0 {
        format!("bytes */{}", total)
    } else {
        format!("bytes {}-{}/{}", offset, offset + len as u64 - 1, total)
    }
}

/// Parse the `Range` header of a 308 response into the next offset to send
///
/// No header means the server has nothing persisted yet.
pub fn parse_acknowledged_range(header: Option<&str>) -> Result<u64, UploadError> {
    let Some(value) = header else {
        return Ok(0);
    };

    let last_byte = value
        .trim()
        .strip_prefix("bytes=")
        .and_then(|range| range.split_once('-'))
        .and_then(|(_, end)| end.trim().parse::<u64>().ok())
        .ok_or_else(|| UploadError::Protocol(format!("malformed Range header: {}", value)))?;

    Ok(last_byte + 1)
}

/// Handle to a resumable upload session
#[derive(Debug, Clone)]
pub struct ResumableSession {
    uri: String,
}

impl ResumableSession {
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// YouTube Data API client for resumable video uploads
pub struct YouTubeClient {
    http: Client,
    base_url: String,
    access_token: String,
    content_type: String,
}

impl YouTubeClient {
    pub fn new(base_url: &str, access_token: String, content_type: String) -> Result<Self> {
        // 308 must reach us instead of being followed as a redirect
        let http = Client::builder()
            .redirect(redirect::Policy::none())
            .user_agent(concat!("tubesync/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
            content_type,
        })
    }

    fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, UPLOAD_PATH)
    }
}

/// Build a `Remote` error from a failed response
async fn remote_error(response: Response) -> UploadError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    UploadError::Remote {
        status,
        message: error_message(&body),
    }
}

#[async_trait]
impl UploadEndpoint for YouTubeClient {
    type Session = ResumableSession;

    async fn create_session(
        &self,
        metadata: &VideoMetadata,
        size: u64,
    ) -> Result<ResumableSession, UploadError> {
        let response = self
            .http
            .post(self.upload_url())
            .query(&[("uploadType", "resumable"), ("part", "snippet,status")])
            .bearer_auth(&self.access_token)
            .header("X-Upload-Content-Length", size)
            .header("X-Upload-Content-Type", self.content_type.as_str())
            .json(&VideoInsertRequest::from(metadata))
            .send()
            .await
            .map_err(UploadError::transport)?;

        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }

        let uri = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                UploadError::Protocol("session response has no Location header".to_string())
            })?
            .to_string();

        debug!("Created resumable session for {} bytes", size);
        Ok(ResumableSession { uri })
    }

    async fn send_chunk(
        &self,
        session: &ResumableSession,
        offset: u64,
        chunk: Bytes,
        total: u64,
    ) -> Result<ChunkOutcome, UploadError> {
        let range = content_range(offset, chunk.len(), total);
        let response = self
            .http
            .put(session.uri())
            .bearer_auth(&self.access_token)
            .header(CONTENT_RANGE, range.as_str())
            .body(chunk)
            .send()
            .await
            .map_err(UploadError::transport)?;

        let status = response.status();
        match status {
            StatusCode::OK | StatusCode::CREATED => {
                let resource: Value = response.json().await.map_err(UploadError::transport)?;
                Ok(ChunkOutcome::Completed(UploadResult::from_resource(resource)?))
            }
            StatusCode::NOT_FOUND | StatusCode::GONE => Err(UploadError::SessionInvalid {
                status: status.as_u16(),
            }),
            _ if status.as_u16() == RESUME_INCOMPLETE => {
                let header = response
                    .headers()
                    .get(RANGE)
                    .and_then(|value| value.to_str().ok());
                let offset = parse_acknowledged_range(header)?;
                Ok(ChunkOutcome::Progress { offset })
            }
            _ => Err(remote_error(response).await),
        }
    }
}
