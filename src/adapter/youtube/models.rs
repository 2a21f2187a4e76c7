//! YouTube Data API Models
//!
//! videos.insert のリクエストボディとエラーレスポンス

use serde::{Deserialize, Serialize};

use crate::domain::entities::video_metadata::{PrivacyStatus, VideoMetadata};

/// `videos.insert` body (`part=snippet,status`)
#[derive(Debug, Clone, Serialize)]
pub struct VideoInsertRequest {
    pub snippet: VideoSnippet,
    pub status: VideoStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub privacy_status: PrivacyStatus,
}

impl From<&VideoMetadata> for VideoInsertRequest {
    fn from(metadata: &VideoMetadata) -> Self {
        Self {
            snippet: VideoSnippet {
                title: metadata.title.clone(),
                description: metadata.description.clone(),
                tags: metadata.tags.clone(),
                category_id: metadata.category_id.clone(),
            },
            status: VideoStatus {
                privacy_status: metadata.privacy_status,
            },
        }
    }
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
pub struct GoogleErrorResponse {
    pub error: GoogleError,
}

#[derive(Debug, Deserialize)]
pub struct GoogleError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<GoogleErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleErrorDetail {
    #[serde(default)]
    pub reason: String,
}

/// Extract a readable message from an error response body
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<GoogleErrorResponse>(body) {
        Ok(response) => {
            let reasons: Vec<&str> = response
                .error
                .errors
                .iter()
                .map(|detail| detail.reason.as_str())
                .filter(|reason| !reason.is_empty())
                .collect();
            if reasons.is_empty() {
                response.error.message
            } else {
                format!("{} ({})", response.error.message, reasons.join(", "))
            }
        }
        Err(_) => body.chars().take(200).collect(),
    }
}
