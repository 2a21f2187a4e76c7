//! # VideoEntry Entity
//!
//! マニフェストに記録するアップロード済み動画1件

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::upload_result::UploadResult;

/// アップロード済み動画の記録
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEntry {
    /// マニフェスト内の通し番号（1始まり）
    pub id: usize,
    pub video_id: String,
    /// ファイル名（拡張子なし）
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub original_file_path: String,
    /// RFC 3339 (UTC, 秒精度)
    pub upload_date: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub channel_title: String,
}

impl VideoEntry {
    /// アップロード結果から記録を作成
    pub fn from_upload(
        id: usize,
        result: &UploadResult,
        title: &str,
        description: &str,
        original_file_path: &str,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            video_id: result.video_id().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            thumbnail_url: result.thumbnail_url(),
            original_file_path: original_file_path.to_string(),
            upload_date: uploaded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            channel_id: result.channel_id().to_string(),
            channel_title: result.channel_title().to_string(),
        }
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn result() -> UploadResult {
        UploadResult::from_resource(json!({
            "id": "vid-1",
            "snippet": {"channelId": "UC-42", "channelTitle": "Overlays"}
        }))
        .unwrap()
    }

    #[test]
    fn test_from_upload() {
        let uploaded_at = Utc.with_ymd_and_hms(2024, 12, 25, 10, 0, 0).unwrap();
        let entry = VideoEntry::from_upload(
            3,
            &result(),
            "clip-a",
            "Heatmap overlay. File: clip-a",
            "public/overlays/clip-a.webm",
            uploaded_at,
        );

        assert_eq!(entry.id, 3);
        assert_eq!(entry.video_id, "vid-1");
        assert_eq!(entry.title, "clip-a");
        assert_eq!(
            entry.thumbnail_url,
            "https://img.youtube.com/vi/vid-1/mqdefault.jpg"
        );
        assert_eq!(entry.upload_date, "2024-12-25T10:00:00Z");
        assert_eq!(entry.channel_id, "UC-42");
        assert_eq!(entry.channel_title, "Overlays");
        assert_eq!(entry.watch_url(), "https://www.youtube.com/watch?v=vid-1");
    }

    #[test]
    fn test_serializes_camel_case() {
        let uploaded_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entry = VideoEntry::from_upload(1, &result(), "a", "b", "a.webm", uploaded_at);

        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["videoId"], "vid-1");
        assert_eq!(value["originalFilePath"], "a.webm");
        assert_eq!(value["thumbnailUrl"], "https://img.youtube.com/vi/vid-1/mqdefault.jpg");
        assert_eq!(value["uploadDate"], "2024-01-01T00:00:00Z");
        assert_eq!(value["channelTitle"], "Overlays");
    }

    #[test]
    fn test_deserializes_without_channel_fields() {
        let entry: VideoEntry = serde_json::from_value(json!({
            "id": 1,
            "videoId": "v",
            "title": "t",
            "description": "d",
            "thumbnailUrl": "u",
            "originalFilePath": "p",
            "uploadDate": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(entry.channel_id, "");
        assert_eq!(entry.channel_title, "");
    }
}
