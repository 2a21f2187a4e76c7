//! # Upload Configuration DTO
//!
//! アップロード設定のData Transfer Object

use crate::domain::entities::video_metadata::{PrivacyStatus, VideoMetadata};
use crate::domain::services::retry_policy::RetryPolicy;

/// テンプレート内でファイル名（拡張子なし）に置き換えられるプレースホルダ
pub const NAME_PLACEHOLDER: &str = "{name}";

/// アップロード設定
///
/// 動画アップロードに必要な設定情報
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// チャンクサイズ（バイト）
    pub chunk_size: u64,
    /// リトライポリシー
    pub retry_policy: RetryPolicy,
    /// タイトルのテンプレート
    pub title_template: String,
    /// 説明文のテンプレート
    pub description_template: String,
    /// タグ
    pub tags: Vec<String>,
    /// カテゴリID
    pub category_id: String,
    /// 公開設定
    pub privacy_status: PrivacyStatus,
    /// アップロード済みファイルをスキップするかどうか
    pub enable_deduplication: bool,
}

impl UploadConfig {
    /// 新しいアップロード設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use tubesync::application::dto::upload_config::UploadConfig;
    /// use tubesync::domain::entities::video_metadata::PrivacyStatus;
    /// use tubesync::domain::services::retry_policy::RetryPolicy;
    ///
    /// let config = UploadConfig::new(
    ///     1024 * 1024,
    ///     RetryPolicy::default(),
    ///     "Heatmap Overlay - {name}".to_string(),
    ///     "Overlay video. File: {name}".to_string(),
    ///     vec!["heatmap".to_string(), "overlay".to_string()],
    ///     "22".to_string(),
    ///     PrivacyStatus::Unlisted,
    ///     true,
    /// );
    ///
    /// let metadata = config.metadata_for("clip-a");
    /// assert_eq!(metadata.title, "Heatmap Overlay - clip-a");
    /// assert_eq!(metadata.description, "Overlay video. File: clip-a");
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chunk_size: u64,
        retry_policy: RetryPolicy,
        title_template: String,
        description_template: String,
        tags: Vec<String>,
        category_id: String,
        privacy_status: PrivacyStatus,
        enable_deduplication: bool,
    ) -> Self {
        Self {
            chunk_size,
            retry_policy,
            title_template,
            description_template,
            tags,
            category_id,
            privacy_status,
            enable_deduplication,
        }
    }

    /// 動画名からメタデータを組み立てる
    pub fn metadata_for(&self, video_name: &str) -> VideoMetadata {
        VideoMetadata {
            title: self.title_template.replace(NAME_PLACEHOLDER, video_name),
            description: self.description_template.replace(NAME_PLACEHOLDER, video_name),
            tags: self.tags.clone(),
            category_id: self.category_id.clone(),
            privacy_status: self.privacy_status,
        }
    }
}
