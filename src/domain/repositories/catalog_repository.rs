//! # Catalog Repository Trait
//!
//! 動画ビューアのカタログ（`videos.json`）の読み書きを抽象化

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// カタログリポジトリ
///
/// カタログは外部ビューアの所有物なので、未知のフィールドを保つため
/// JSON のまま扱う。
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// カタログを読み込む
    ///
    /// 存在しない、または読めない場合は警告して空の配列を返す
    async fn load(&self, path: &str) -> Result<Vec<Value>>;

    /// カタログを保存する
    async fn save(&self, path: &str, catalog: &[Value]) -> Result<()>;
}
