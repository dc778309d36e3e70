use crate::tools::{FileStore, WalkFailure};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 媒體資料夾的「檔名 -> 路徑」索引
///
/// 同名檔案以走訪順序中第一個為準
#[derive(Debug, Default)]
pub struct MediaIndex {
    entries: HashMap<String, PathBuf>,
}

impl MediaIndex {
    /// 走訪一次 `root` 建立索引，無法讀取的子樹會一併回傳
    pub fn build<S: FileStore>(store: &S, root: &Path) -> (Self, Vec<WalkFailure>) {
        let listing = store.list_files(root);
        let mut entries = HashMap::with_capacity(listing.files.len());

        for path in listing.files {
            let Some(name) = path.file_name() else {
                continue;
            };
            entries
                .entry(name.to_string_lossy().into_owned())
                .or_insert(path);
        }

        (Self { entries }, listing.failures)
    }

    #[must_use]
    pub fn find(&self, file_name: &str) -> Option<&PathBuf> {
        self.entries.get(file_name)
    }

    /// 檔案被移走後從索引中移除
    pub fn remove(&mut self, file_name: &str) -> Option<PathBuf> {
        self.entries.remove(file_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
