//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;
use std::path::PathBuf;

/// 動画ファイルを YouTube に resumable upload する CLI
#[derive(Parser, Debug, Clone)]
#[command(name = "tubesync")]
#[command(about = "Upload video files to YouTube with resumable, retrying uploads", long_about = None)]
pub struct Args {
    /// Video files to upload, in order
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Dry run mode - list what would be uploaded
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Config file path
    #[arg(short, long, default_value = "./.tubesync/config.json")]
    pub config: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_config() {
        let args = Args::parse_from(["tubesync", "a.webm"]);
        assert_eq!(args.config, "./.tubesync/config.json");
        assert_eq!(args.paths, vec![PathBuf::from("a.webm")]);
        assert!(!args.dry_run);
        assert!(!args.yes);
    }

    #[test]
    fn test_args_requires_paths() {
        assert!(Args::try_parse_from(["tubesync"]).is_err());
    }

    #[test]
    fn test_args_multiple_paths_keep_order() {
        let args = Args::parse_from(["tubesync", "b.webm", "a.webm", "c.mp4"]);
        assert_eq!(
            args.paths,
            vec![
                PathBuf::from("b.webm"),
                PathBuf::from("a.webm"),
                PathBuf::from("c.mp4")
            ]
        );
    }

    #[test]
    fn test_args_custom_config() {
        let args = Args::parse_from(["tubesync", "-c", "/custom/config.json", "a.webm"]);
        assert_eq!(args.config, "/custom/config.json");
    }

    #[test]
    fn test_args_combined() {
        let args = Args::parse_from(["tubesync", "--dry-run", "-y", "a.webm"]);
        assert!(args.dry_run);
        assert!(args.yes);
    }
}
