//! 缺漏媒體比對
//!
//! 逐筆檢查題目引用的媒體檔：已在目標資料夾就略過，在媒體資料夾找到就移過去，
//! 兩邊都沒有則回報缺漏

use super::media_index::MediaIndex;
use crate::component::media_field_rewriter::is_json_file;
use crate::tools::{FileStore, WalkFailure, parse_records};
use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// 單筆引用的最終狀態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceStatus {
    /// 目標資料夾已有此檔
    AlreadyPresent,
    Moved { from: PathBuf, to: PathBuf },
    Missing,
    MoveFailed { from: PathBuf, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOutcome {
    pub json_file: PathBuf,
    pub media: String,
    pub status: ReferenceStatus,
}

/// 無法讀取或解析的 JSON 檔
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFailure {
    pub path: PathBuf,
    pub error: String,
}

/// 比對結果
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub references: Vec<ReferenceOutcome>,
    pub json_failures: Vec<JsonFailure>,
    pub walk_failures: Vec<WalkFailure>,
}

impl ReconcileReport {
    /// 缺漏的檔名，依出現順序
    #[must_use]
    pub fn missing(&self) -> Vec<&str> {
        self.references
            .iter()
            .filter(|r| r.status == ReferenceStatus::Missing)
            .map(|r| r.media.as_str())
            .collect()
    }

    /// 每個缺漏檔案一行 `Missing: <檔名>`
    #[must_use]
    pub fn missing_lines(&self) -> Vec<String> {
        self.missing()
            .into_iter()
            .map(|media| format!("Missing: {media}"))
            .collect()
    }

    #[must_use]
    pub fn moved(&self) -> usize {
        self.count(|s| matches!(s, ReferenceStatus::Moved { .. }))
    }

    #[must_use]
    pub fn already_present(&self) -> usize {
        self.count(|s| matches!(s, ReferenceStatus::AlreadyPresent))
    }

    #[must_use]
    pub fn errors(&self) -> usize {
        self.count(|s| matches!(s, ReferenceStatus::MoveFailed { .. }))
            + self.json_failures.len()
            + self.walk_failures.len()
    }

    fn count(&self, predicate: impl Fn(&ReferenceStatus) -> bool) -> usize {
        self.references.iter().filter(|r| predicate(&r.status)).count()
    }
}

/// 將檔案移入 `directory`，保留檔名；目標已存在時不覆蓋
pub fn move_into_directory<S: FileStore>(
    store: &S,
    source: &Path,
    directory: &Path,
) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .with_context(|| format!("無法取得檔案名稱: {}", source.display()))?;
    let target = directory.join(file_name);

    if store.exists(&target) {
        bail!("目標已存在，不覆蓋: {}", target.display());
    }

    store.create_dir_all(directory)?;
    store.move_file(source, &target)?;
    Ok(target)
}

/// 缺漏媒體比對器
pub struct MediaReconciler<'a, S: FileStore> {
    store: &'a S,
    json_directory: PathBuf,
    media_directory: PathBuf,
    found_directory: PathBuf,
    /// 第一次需要搜尋時才建立
    index: Option<MediaIndex>,
}

impl<'a, S: FileStore> MediaReconciler<'a, S> {
    #[must_use]
    pub fn new(
        store: &'a S,
        json_directory: impl Into<PathBuf>,
        media_directory: impl Into<PathBuf>,
        found_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            json_directory: json_directory.into(),
            media_directory: media_directory.into(),
            found_directory: found_directory.into(),
            index: None,
        }
    }

    /// 執行一次完整比對
    pub fn reconcile(&mut self) -> ReconcileReport {
        info!(
            "開始比對媒體: JSON {} / 媒體 {} / 目標 {}",
            self.json_directory.display(),
            self.media_directory.display(),
            self.found_directory.display()
        );

        let listing = self.store.list_files(&self.json_directory);
        let mut report = ReconcileReport {
            walk_failures: listing.failures,
            ..ReconcileReport::default()
        };

        for path in listing.files.iter().filter(|path| is_json_file(path)) {
            info!("處理 JSON: {}", path.display());

            let references = match self.read_references(path) {
                Ok(references) => references,
                Err(e) => {
                    warn!("略過 {}: {e:#}", path.display());
                    report.json_failures.push(JsonFailure {
                        path: path.clone(),
                        error: format!("{e:#}"),
                    });
                    continue;
                }
            };

            for media in references {
                let status = self.reconcile_reference(&media, &mut report.walk_failures);
                report.references.push(ReferenceOutcome {
                    json_file: path.clone(),
                    media,
                    status,
                });
            }
        }

        info!(
            "比對完成 - 已存在: {}, 移動: {}, 缺漏: {}, 錯誤: {}",
            report.already_present(),
            report.moved(),
            report.missing().len(),
            report.errors()
        );

        report
    }

    fn read_references(&self, path: &Path) -> Result<Vec<String>> {
        let content = self.store.read_to_string(path)?;
        let records = parse_records(&content)
            .with_context(|| format!("無法解析 JSON: {}", path.display()))?;

        Ok(records
            .iter()
            .filter_map(|record| record.media().map(str::to_string))
            .collect())
    }

    fn reconcile_reference(
        &mut self,
        media: &str,
        walk_failures: &mut Vec<WalkFailure>,
    ) -> ReferenceStatus {
        let found_path = self.found_directory.join(media.trim_start_matches('/'));
        if self.store.exists(&found_path) {
            debug!("已在目標資料夾: {media}");
            return ReferenceStatus::AlreadyPresent;
        }

        let index = self.index.get_or_insert_with(|| {
            let (index, failures) = MediaIndex::build(self.store, &self.media_directory);
            debug!("媒體索引建立完成，共 {} 個檔名", index.len());
            walk_failures.extend(failures);
            index
        });

        let Some(source) = index.find(media).cloned() else {
            info!("找不到媒體檔案: {media}");
            return ReferenceStatus::Missing;
        };

        match move_into_directory(self.store, &source, &self.found_directory) {
            Ok(target) => {
                index.remove(media);
                info!("移動 {} -> {}", source.display(), target.display());
                ReferenceStatus::Moved {
                    from: source,
                    to: target,
                }
            }
            Err(e) => {
                warn!("移動失敗 {}: {e:#}", source.display());
                ReferenceStatus::MoveFailed {
                    from: source,
                    error: format!("{e:#}"),
                }
            }
        }
    }
}
