//! 記憶體內的檔案系統，讓批次工作不需要實體目錄也能測試

use super::file_store::{FileListing, FileStore, WalkFailure};
use anyhow::{Result, anyhow, bail};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
struct Tree {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
    /// 寫入或改名時一律失敗的路徑
    failing: BTreeSet<PathBuf>,
}

impl Tree {
    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.directories.insert(ancestor.to_path_buf());
        }
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.directories.contains(parent),
            _ => true,
        }
    }

    fn is_unreadable(&self, path: &Path) -> Option<&PathBuf> {
        self.unreadable.iter().find(|dir| path.starts_with(dir))
    }

    fn ensure_writable(&self, path: &Path) -> Result<()> {
        if self.failing.contains(path) {
            bail!("權限不足: {}", path.display());
        }
        Ok(())
    }
}

/// 記憶體檔案系統
#[derive(Debug, Default)]
pub struct MemoryStore {
    tree: RefCell<Tree>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 新增檔案，上層資料夾會自動建立
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.insert_file(path, contents);
        self
    }

    #[must_use]
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut tree = self.tree.borrow_mut();
        tree.add_ancestors(path);
        tree.directories.insert(path.to_path_buf());
        drop(tree);
        self
    }

    /// 標記無法讀取的資料夾，走訪時整個子樹會被略過並回報錯誤
    #[must_use]
    pub fn with_unreadable_dir(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut tree = self.tree.borrow_mut();
        tree.add_ancestors(&path);
        tree.directories.insert(path.clone());
        tree.unreadable.insert(path);
        drop(tree);
        self
    }

    /// 標記寫入或改名一定失敗的路徑（來源或目標皆適用）
    #[must_use]
    pub fn with_failing_path(self, path: impl AsRef<Path>) -> Self {
        self.tree
            .borrow_mut()
            .failing
            .insert(path.as_ref().to_path_buf());
        self
    }

    pub fn insert_file(&self, path: impl AsRef<Path>, contents: impl Into<String>) {
        let path = path.as_ref();
        let mut tree = self.tree.borrow_mut();
        tree.add_ancestors(path);
        tree.files.insert(path.to_path_buf(), contents.into());
    }

    #[must_use]
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.tree.borrow().files.get(path.as_ref()).cloned()
    }

    /// 所有檔案路徑（字典順序）
    #[must_use]
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.tree.borrow().files.keys().cloned().collect()
    }

    #[must_use]
    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.tree.borrow().directories.contains(path.as_ref())
    }
}

impl FileStore for MemoryStore {
    fn list_files(&self, root: &Path) -> FileListing {
        let tree = self.tree.borrow();
        let mut listing = FileListing::default();

        if !tree.directories.contains(root) {
            listing.failures.push(WalkFailure {
                path: Some(root.to_path_buf()),
                message: format!("路徑不存在: {}", root.display()),
            });
            return listing;
        }

        for dir in tree.unreadable.iter().filter(|dir| dir.starts_with(root)) {
            listing.failures.push(WalkFailure {
                path: Some(dir.clone()),
                message: format!("權限不足: {}", dir.display()),
            });
        }

        listing.files = tree
            .files
            .keys()
            .filter(|path| path.starts_with(root) && tree.is_unreadable(path).is_none())
            .cloned()
            .collect();

        listing
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let tree = self.tree.borrow();
        if let Some(dir) = tree.is_unreadable(path) {
            bail!("權限不足: {}", dir.display());
        }
        tree.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("無法讀取檔案: {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        tree.ensure_writable(path)?;
        if !tree.parent_exists(path) {
            bail!("無法寫入檔案: {}（上層資料夾不存在）", path.display());
        }
        tree.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let tree = self.tree.borrow();
        tree.files.contains_key(path) || tree.directories.contains(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        tree.ensure_writable(from)?;
        tree.ensure_writable(to)?;
        if !tree.parent_exists(to) {
            bail!(
                "無法重新命名: {} -> {}（目標資料夾不存在）",
                from.display(),
                to.display()
            );
        }
        let contents = tree
            .files
            .remove(from)
            .ok_or_else(|| anyhow!("無法重新命名: {} 不存在", from.display()))?;
        tree.files.insert(to.to_path_buf(), contents);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        if tree.files.contains_key(path) {
            bail!("無法建立目錄: {}（已存在同名檔案）", path.display());
        }
        tree.add_ancestors(path);
        tree.directories.insert(path.to_path_buf());
        Ok(())
    }
}
