use anyhow::{Result, bail};
use std::path::Path;

/// 確認設定中的資料夾存在，`label` 用於錯誤訊息
pub fn validate_directory_exists(label: &str, path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("{label}不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("{label}不是資料夾: {}", path.display());
    }
    Ok(())
}
