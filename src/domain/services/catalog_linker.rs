//! # Catalog Linker
//!
//! アップロード済み動画を、カタログ内の同名オーバーレイに結び付ける

use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::domain::entities::video_entry::VideoEntry;

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

pub struct CatalogLinker;

impl CatalogLinker {
    /// `overlays[].path` のファイル名（拡張子なし）が一致するオーバーレイに
    /// `youtubeVideoId` と `youtubeUrl` を書き込む
    ///
    /// 更新したオーバーレイの数を返す。
    pub fn link(catalog: &mut [Value], uploads: &[VideoEntry]) -> usize {
        let by_name: HashMap<String, &VideoEntry> = uploads
            .iter()
            .map(|entry| (file_stem(&entry.original_file_path), entry))
            .collect();

        let mut linked = 0;
        let overlays = catalog
            .iter_mut()
            .filter_map(|video| video.get_mut("overlays"))
            .filter_map(Value::as_array_mut)
            .flat_map(|overlays| overlays.iter_mut());

        for overlay in overlays {
            let Some(name) = overlay.get("path").and_then(Value::as_str).map(file_stem) else {
                continue;
            };
            let (Some(entry), Some(fields)) = (by_name.get(&name), overlay.as_object_mut()) else {
                continue;
            };

            fields.insert("youtubeVideoId".to_string(), Value::from(entry.video_id.as_str()));
            fields.insert("youtubeUrl".to_string(), Value::from(entry.watch_url()));
            linked += 1;
        }

        linked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(video_id: &str, path: &str) -> VideoEntry {
        VideoEntry {
            id: 1,
            video_id: video_id.to_string(),
            title: file_stem(path),
            description: String::new(),
            thumbnail_url: String::new(),
            original_file_path: path.to_string(),
            upload_date: "2024-12-25T10:00:00Z".to_string(),
            channel_id: String::new(),
            channel_title: String::new(),
        }
    }

    #[test]
    fn test_link_matches_overlays_by_file_stem() {
        let mut catalog = vec![json!({
            "id": "session-1",
            "src": "videos/session-1.mp4",
            "overlays": [
                {"path": "overlays/group1_age20.webm", "label": "Group 1"},
                {"path": "overlays/group2_age30.webm", "label": "Group 2"}
            ]
        })];
        let uploads = vec![entry("abc123", "/data/public/overlays/group1_age20.webm")];

        let linked = CatalogLinker::link(&mut catalog, &uploads);

        assert_eq!(linked, 1);
        let overlays = &catalog[0]["overlays"];
        assert_eq!(overlays[0]["youtubeVideoId"], "abc123");
        assert_eq!(
            overlays[0]["youtubeUrl"],
            "https://www.youtube.com/watch?v=abc123"
        );
        assert_eq!(overlays[0]["label"], "Group 1");
        assert!(overlays[1].get("youtubeVideoId").is_none());
        assert_eq!(catalog[0]["src"], "videos/session-1.mp4");
    }

    #[test]
    fn test_link_overwrites_previous_video_id() {
        let mut catalog = vec![json!({
            "overlays": [{"path": "a.webm", "youtubeVideoId": "old", "youtubeUrl": "old"}]
        })];

        let linked = CatalogLinker::link(&mut catalog, &[entry("new", "a.webm")]);

        assert_eq!(linked, 1);
        assert_eq!(catalog[0]["overlays"][0]["youtubeVideoId"], "new");
    }

    #[test]
    fn test_link_same_overlay_in_several_videos() {
        let mut catalog = vec![
            json!({"overlays": [{"path": "x/a.webm"}]}),
            json!({"overlays": [{"path": "y/a.webm"}]}),
        ];

        let linked = CatalogLinker::link(&mut catalog, &[entry("vid", "a.webm")]);

        assert_eq!(linked, 2);
        assert_eq!(catalog[1]["overlays"][0]["youtubeVideoId"], "vid");
    }

    #[test]
    fn test_link_skips_entries_without_overlays_or_path() {
        let mut catalog = vec![
            json!({"id": "no-overlays"}),
            json!({"overlays": "not a list"}),
            json!({"overlays": [{"label": "no path"}, "plain string"]}),
        ];
        let before = catalog.clone();

        let linked = CatalogLinker::link(&mut catalog, &[entry("vid", "a.webm")]);

        assert_eq!(linked, 0);
        assert_eq!(catalog, before);
    }
}
