//! 題目 JSON 的 `media` 欄位改寫
//!
//! 只更新 `media`，其他欄位與順序保持不變；解析失敗的檔案完全不寫入

use crate::tools::{FileStore, FilenameHasher, Normalized, WalkFailure, parse_records, serialize_records};
use anyhow::Result;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// 單一 `media` 值的變更
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaChange {
    pub from: String,
    pub to: String,
}

/// 單一 JSON 檔案的處理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    Updated {
        path: PathBuf,
        records: usize,
        changes: Vec<MediaChange>,
        /// 不支援副檔名而原樣保留的值
        unsupported: Vec<String>,
    },
    Failed { path: PathBuf, error: String },
}

/// 改寫結果
#[derive(Debug, Default)]
pub struct RewriteReport {
    pub outcomes: Vec<RewriteOutcome>,
    pub walk_failures: Vec<WalkFailure>,
}

impl RewriteReport {
    #[must_use]
    pub fn files_updated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RewriteOutcome::Updated { .. }))
            .count()
    }

    #[must_use]
    pub fn media_changed(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                RewriteOutcome::Updated { changes, .. } => changes.len(),
                RewriteOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    #[must_use]
    pub fn errors(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RewriteOutcome::Failed { .. }))
            .count()
            + self.walk_failures.len()
    }
}

/// 是否為題目 JSON 檔（副檔名區分大小寫）
#[must_use]
pub fn is_json_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// `media` 欄位改寫器
pub struct RecordRewriter<'a, S: FileStore> {
    store: &'a S,
    hasher: FilenameHasher,
}

impl<'a, S: FileStore> RecordRewriter<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            store,
            hasher: FilenameHasher::new(),
        }
    }

    /// 改寫 `root` 底下所有 `.json` 檔
    pub fn rewrite_all(&self, root: &Path) -> RewriteReport {
        info!("開始改寫題目 JSON: {}", root.display());

        let listing = self.store.list_files(root);
        let mut report = RewriteReport {
            walk_failures: listing.failures,
            ..RewriteReport::default()
        };

        for path in listing.files.iter().filter(|path| is_json_file(path)) {
            info!("處理中: {}", path.display());
            let outcome = match self.rewrite_file(path) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("改寫失敗 {}: {e:#}", path.display());
                    RewriteOutcome::Failed {
                        path: path.clone(),
                        error: format!("{e:#}"),
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        info!(
            "改寫完成 - 檔案: {}, media 變更: {}, 失敗: {}",
            report.files_updated(),
            report.media_changed(),
            report.errors()
        );

        report
    }

    /// 改寫單一檔案，任何錯誤都發生在寫入之前或寫入本身
    pub fn rewrite_file(&self, path: &Path) -> Result<RewriteOutcome> {
        let content = self.store.read_to_string(path)?;
        let mut records = parse_records(&content)?;

        let mut changes = Vec::new();
        let mut unsupported = Vec::new();

        for record in &mut records {
            let Some(media) = record.media() else {
                continue;
            };

            match self.hasher.normalize(media) {
                Normalized::Unsupported { original, .. } => unsupported.push(original),
                normalized => {
                    let to = normalized.into_name();
                    if to != media {
                        changes.push(MediaChange {
                            from: media.to_string(),
                            to: to.clone(),
                        });
                    }
                    record.set_media(to);
                }
            }
        }

        let output = serialize_records(&records)?;
        self.store.write(path, &output)?;
        info!("已更新: {}", path.display());

        Ok(RewriteOutcome::Updated {
            path: path.to_path_buf(),
            records: records.len(),
            changes,
            unsupported,
        })
    }
}
