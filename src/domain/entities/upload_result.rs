//! # UploadResult Value Object
//!
//! アップロード成功時にリモートが返したリソース

use serde_json::Value;

use crate::domain::errors::UploadError;

/// アップロード結果
///
/// 作成されたリソースのIDと、リモートが返したJSONリソース全体。
/// 成功したアップロード1回につき1つだけ生成される。
#[derive(Debug, Clone, PartialEq)]
pub struct UploadResult {
    video_id: String,
    resource: Value,
}

impl UploadResult {
    /// リモートのリソースJSONから作成
    ///
    /// # Errors
    ///
    /// `id` フィールドが文字列で存在しない場合は `UploadError::Protocol`
    pub fn from_resource(resource: Value) -> Result<Self, UploadError> {
        let video_id = resource
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| UploadError::Protocol("resource has no id".to_string()))?
            .to_string();

        Ok(Self { video_id, resource })
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn resource(&self) -> &Value {
        &self.resource
    }

    /// `snippet.channelId`（無ければ空文字）
    pub fn channel_id(&self) -> &str {
        self.snippet_field("channelId")
    }

    /// `snippet.channelTitle`（無ければ空文字）
    pub fn channel_title(&self) -> &str {
        self.snippet_field("channelTitle")
    }

    /// 中画質サムネイルのURL
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/mqdefault.jpg", self.video_id)
    }

    fn snippet_field(&self, field: &str) -> &str {
        self.resource
            .get("snippet")
            .and_then(|snippet| snippet.get(field))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}
