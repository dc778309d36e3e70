//! 檔案存取抽象
//!
//! 批次工作只透過 [`FileStore`] 存取檔案系統，測試時可換成 [`MemoryStore`](super::MemoryStore)

use anyhow::{Context, Result, bail};
use log::warn;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 走訪時無法讀取的子樹
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkFailure {
    pub path: Option<PathBuf>,
    pub message: String,
}

/// 遞迴列出的檔案與走訪錯誤
#[derive(Debug, Clone, Default)]
pub struct FileListing {
    /// 依路徑字典順序排列的檔案
    pub files: Vec<PathBuf>,
    pub failures: Vec<WalkFailure>,
}

pub trait FileStore {
    /// 遞迴列出 `root` 底下所有非資料夾項目（符號連結視為檔案，不跟隨）
    fn list_files(&self, root: &Path) -> FileListing;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;

    /// 重新命名；目標已存在時會被覆蓋
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// 移動檔案，跨檔案系統時改用複製後刪除
    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        self.rename(from, to)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()>;
}

/// 實體檔案系統
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl DiskStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileStore for DiskStore {
    fn list_files(&self, root: &Path) -> FileListing {
        let mut listing = FileListing::default();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) if !entry.file_type().is_dir() => listing.files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf);
                    warn!(
                        "無法存取 {}: {e}",
                        path.as_deref().unwrap_or(root).display()
                    );
                    listing.failures.push(WalkFailure {
                        path,
                        message: e.to_string(),
                    });
                }
            }
        }

        listing
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("無法讀取檔案: {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).with_context(|| format!("無法寫入檔案: {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).with_context(|| {
            format!("無法重新命名: {} -> {}", from.display(), to.display())
        })
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                copy_then_remove(from, to, |path| fs::remove_file(path))
            }
            Err(e) => Err(e).with_context(|| {
                format!("無法移動檔案: {} -> {}", from.display(), to.display())
            }),
        }
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("無法建立目錄: {}", path.display()))
    }
}

/// 跨檔案系統移動：複製後刪除原檔
///
/// 原檔刪除失敗時會移除已複製的目標，檔案只會留在其中一邊
fn copy_then_remove(
    from: &Path,
    to: &Path,
    remove: impl Fn(&Path) -> io::Result<()>,
) -> Result<()> {
    if to.exists() {
        bail!("目標已存在，不覆蓋: {}", to.display());
    }

    fs::copy(from, to)
        .with_context(|| format!("複製檔案失敗: {} -> {}", from.display(), to.display()))?;

    if let Err(e) = remove(from) {
        if let Err(cleanup) = fs::remove_file(to) {
            warn!("無法移除已複製的檔案 {}: {cleanup}", to.display());
        }
        return Err(e).with_context(|| format!("刪除原檔案失敗: {}", from.display()));
    }

    Ok(())
}
