//! # Link Catalog Use Case
//!
//! アップロード結果をビューアのカタログに反映する

use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::domain::entities::video_entry::VideoEntry;
use crate::domain::repositories::catalog_repository::CatalogRepository;
use crate::domain::services::catalog_linker::CatalogLinker;

/// カタログ更新ユースケース
pub struct LinkCatalogUseCase<C: CatalogRepository> {
    catalog_repository: Arc<C>,
}

impl<C: CatalogRepository> LinkCatalogUseCase<C> {
    pub fn new(catalog_repository: Arc<C>) -> Self {
        Self { catalog_repository }
    }

    /// カタログを読み込み、同名オーバーレイに動画IDとURLを書き込んで保存する
    ///
    /// 更新したオーバーレイの数を返す。
    ///
    /// # Errors
    ///
    /// カタログの保存に失敗した場合にエラーを返す
    pub async fn execute(&self, catalog_path: &str, uploads: &[VideoEntry]) -> Result<usize> {
        let mut catalog = self.catalog_repository.load(catalog_path).await?;

        let linked = CatalogLinker::link(&mut catalog, uploads);

        self.catalog_repository.save(catalog_path, &catalog).await?;
        info!("Linked {} overlays in {}", linked, catalog_path);
        println!(
            "✓ Updated {} with YouTube URLs for {} overlays",
            catalog_path, linked
        );

        Ok(linked)
    }
}
