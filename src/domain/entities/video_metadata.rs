//! # VideoMetadata Value Object
//!
//! リモートリソース作成時に渡すメタデータ（ドライバーは中身を解釈しない）

use serde::{Deserialize, Serialize};

/// 公開設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyStatus {
    Public,
    #[default]
    Unlisted,
    Private,
}

impl PrivacyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Unlisted => "unlisted",
            Self::Private => "private",
        }
    }
}

/// 動画メタデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    /// タイトル
    pub title: String,
    /// 説明文
    pub description: String,
    /// タグ
    pub tags: Vec<String>,
    /// カテゴリID（例: "22" = People & Blogs）
    pub category_id: String,
    /// 公開設定
    pub privacy_status: PrivacyStatus,
}
