//! 媒體檔案雜湊重新命名
//!
//! 走訪媒體資料夾，把每個媒體檔案改名為正規化後的雜湊檔名

use crate::tools::{FileStore, FilenameHasher, Normalized, WalkFailure, split_leaf};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// 單一檔案的處理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    /// 檔名已是雜湊格式
    AlreadyNormalized { path: PathBuf },
    /// 同資料夾已有目標檔名，保留原檔
    SkippedExisting { path: PathBuf, target: PathBuf },
    /// 副檔名在重新命名清單中但雜湊器不支援
    Unsupported { path: PathBuf },
    Failed { path: PathBuf, error: String },
}

/// 重新命名結果
#[derive(Debug, Default)]
pub struct RenameReport {
    pub outcomes: Vec<RenameOutcome>,
    pub walk_failures: Vec<WalkFailure>,
}

impl RenameReport {
    #[must_use]
    pub fn renamed(&self) -> usize {
        self.count(|o| matches!(o, RenameOutcome::Renamed { .. }))
    }

    #[must_use]
    pub fn already_normalized(&self) -> usize {
        self.count(|o| matches!(o, RenameOutcome::AlreadyNormalized { .. }))
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                RenameOutcome::SkippedExisting { .. } | RenameOutcome::Unsupported { .. }
            )
        })
    }

    #[must_use]
    pub fn errors(&self) -> usize {
        self.count(|o| matches!(o, RenameOutcome::Failed { .. })) + self.walk_failures.len()
    }

    fn count(&self, predicate: impl Fn(&RenameOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// 雜湊重新命名器
pub struct HashedRenamer<'a, S: FileStore> {
    store: &'a S,
    hasher: FilenameHasher,
    extensions: Vec<String>,
}

impl<'a, S: FileStore> HashedRenamer<'a, S> {
    /// `extensions` 為要處理的副檔名（含前導點，不分大小寫）
    #[must_use]
    pub fn new(store: &'a S, extensions: &[String]) -> Self {
        Self {
            store,
            hasher: FilenameHasher::new(),
            extensions: extensions.to_vec(),
        }
    }

    /// 重新命名 `root` 底下所有符合副檔名的檔案
    ///
    /// 先取得完整清單再改名，改名後的檔案不會被重複處理
    pub fn rename_all(&self, root: &Path) -> RenameReport {
        info!("開始重新命名媒體檔案: {}", root.display());

        let listing = self.store.list_files(root);
        let mut report = RenameReport {
            walk_failures: listing.failures,
            ..RenameReport::default()
        };

        for path in &listing.files {
            if let Some(outcome) = self.rename_file(path) {
                report.outcomes.push(outcome);
            }
        }

        info!(
            "重新命名完成 - 成功: {}, 已是雜湊: {}, 跳過: {}, 失敗: {}",
            report.renamed(),
            report.already_normalized(),
            report.skipped(),
            report.errors()
        );

        report
    }

    fn matches_extension(&self, name: &str) -> bool {
        let (_, extension) = split_leaf(name);
        !extension.is_empty()
            && self
                .extensions
                .iter()
                .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// 不在副檔名清單中的檔案回傳 `None`
    fn rename_file(&self, path: &Path) -> Option<RenameOutcome> {
        let name = path.file_name()?.to_string_lossy();
        if !self.matches_extension(&name) {
            return None;
        }

        let new_name = match self.hasher.normalize(&name) {
            Normalized::Hashed(new_name) => new_name,
            Normalized::AlreadyNormalized(new_name) if new_name == name => {
                debug!("已是雜湊檔名: {}", path.display());
                return Some(RenameOutcome::AlreadyNormalized {
                    path: path.to_path_buf(),
                });
            }
            // 例如 abcdef0123.JPG -> abcdef0123.jpg
            Normalized::AlreadyNormalized(new_name) => new_name,
            Normalized::Unsupported { .. } => {
                return Some(RenameOutcome::Unsupported {
                    path: path.to_path_buf(),
                });
            }
        };

        let target = path.with_file_name(&new_name);

        if self.store.exists(&target) {
            info!(
                "檔案 {new_name} 已存在於 {}，跳過",
                target.parent().unwrap_or(path).display()
            );
            return Some(RenameOutcome::SkippedExisting {
                path: path.to_path_buf(),
                target,
            });
        }

        match self.store.rename(path, &target) {
            Ok(()) => {
                info!("重新命名 {} -> {}", path.display(), target.display());
                Some(RenameOutcome::Renamed {
                    from: path.to_path_buf(),
                    to: target,
                })
            }
            Err(e) => {
                warn!("重新命名失敗 {}: {e:#}", path.display());
                Some(RenameOutcome::Failed {
                    path: path.to_path_buf(),
                    error: format!("{e:#}"),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::MemoryStore;

    fn default_extensions() -> Vec<String> {
        vec![".jpg".to_string(), ".mp4".to_string()]
    }

    #[test]
    fn test_rename_in_place() {
        let store = MemoryStore::new()
            .with_file("media/clip1.mp4", "video")
            .with_file("media/sub/photo.JPG", "image")
            .with_file("media/sub/notes.txt", "text");

        let report = HashedRenamer::new(&store, &default_extensions()).rename_all(Path::new("media"));

        assert_eq!(report.renamed(), 2);
        assert_eq!(report.errors(), 0);
        assert_eq!(store.contents("media/c99dd2f060.mp4").as_deref(), Some("video"));
        assert_eq!(store.contents("media/sub/eeb35d331b.jpg").as_deref(), Some("image"));
        assert_eq!(store.contents("media/sub/notes.txt").as_deref(), Some("text"));
        assert!(store.contents("media/clip1.mp4").is_none());
    }

    #[test]
    fn test_collision_first_wins_without_data_loss() {
        // a.JPG 和 a.jpg 會得到相同的檔名
        let store = MemoryStore::new()
            .with_file("media/a.JPG", "upper")
            .with_file("media/a.jpg", "lower");

        let report = HashedRenamer::new(&store, &default_extensions()).rename_all(Path::new("media"));

        assert_eq!(report.renamed(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(store.file_paths().len(), 2);
        // 字典順序中 a.JPG 在前
        assert_eq!(store.contents("media/86f7e437fa.jpg").as_deref(), Some("upper"));
        assert_eq!(store.contents("media/a.jpg").as_deref(), Some("lower"));
        assert!(matches!(
            report.outcomes[1],
            RenameOutcome::SkippedExisting { ref path, .. } if path == Path::new("media/a.jpg")
        ));
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let store = MemoryStore::new()
            .with_file("media/clip1.mp4", "video")
            .with_file("media/intro.mp4", "intro");
        let renamer = HashedRenamer::new(&store, &default_extensions());

        renamer.rename_all(Path::new("media"));
        let before = store.file_paths();
        let report = renamer.rename_all(Path::new("media"));

        assert_eq!(report.renamed(), 0);
        assert_eq!(report.already_normalized(), 2);
        assert_eq!(store.file_paths(), before);
    }

    #[test]
    fn test_jpeg_ignored_by_default() {
        let store = MemoryStore::new().with_file("media/scene.jpeg", "image");

        let report = HashedRenamer::new(&store, &default_extensions()).rename_all(Path::new("media"));

        assert!(report.outcomes.is_empty());
        assert!(store.contents("media/scene.jpeg").is_some());
    }

    #[test]
    fn test_jpeg_renamed_when_configured() {
        let store = MemoryStore::new().with_file("media/scene.jpeg", "image");
        let extensions = vec![".jpeg".to_string()];

        let report = HashedRenamer::new(&store, &extensions).rename_all(Path::new("media"));

        assert_eq!(report.renamed(), 1);
        assert!(store.contents("media/ea5e044532.jpg").is_some());
    }

    #[test]
    fn test_unsupported_configured_extension() {
        let store = MemoryStore::new().with_file("media/scan.png", "image");
        let extensions = vec![".png".to_string()];

        let report = HashedRenamer::new(&store, &extensions).rename_all(Path::new("media"));

        assert_eq!(
            report.outcomes,
            vec![RenameOutcome::Unsupported {
                path: PathBuf::from("media/scan.png")
            }]
        );
    }

    #[test]
    fn test_rename_failure_is_recorded_and_walk_continues() {
        let store = MemoryStore::new()
            .with_file("media/a/clip1.mp4", "video")
            .with_file("media/b/photo.jpg", "image")
            .with_failing_path("media/a/clip1.mp4");

        let report = HashedRenamer::new(&store, &default_extensions()).rename_all(Path::new("media"));

        assert_eq!(report.renamed(), 1);
        assert_eq!(report.errors(), 1);
        assert!(matches!(
            report.outcomes[0],
            RenameOutcome::Failed { ref path, .. } if path == Path::new("media/a/clip1.mp4")
        ));
        assert_eq!(store.contents("media/a/clip1.mp4").as_deref(), Some("video"));
        assert_eq!(store.contents("media/b/eeb35d331b.jpg").as_deref(), Some("image"));
    }

    #[test]
    fn test_unreadable_subtree_does_not_abort() {
        let store = MemoryStore::new()
            .with_file("media/locked/a.mp4", "a")
            .with_file("media/open/b.mp4", "b")
            .with_unreadable_dir("media/locked");

        let report = HashedRenamer::new(&store, &default_extensions()).rename_all(Path::new("media"));

        assert_eq!(report.renamed(), 1);
        assert_eq!(report.walk_failures.len(), 1);
        assert!(store.contents("media/open/e9d71f5ee7.mp4").is_some());
        assert!(store.contents("media/locked/a.mp4").is_some());
    }
}
