//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod file_media_repository;
pub mod json_catalog_repository;
pub mod json_manifest_repository;
