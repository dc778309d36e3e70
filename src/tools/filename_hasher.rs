//! 檔名雜湊模組
//!
//! 將媒體檔名正規化為「SHA-1 前 10 碼 + 標準副檔名」

use log::info;
use regex::Regex;
use sha1::{Digest, Sha1};
use std::sync::LazyLock;

/// 雜湊截斷後保留的十六進位字元數
pub const HASH_PREFIX_LEN: usize = 10;

static REGEX_NORMALIZED_BASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{10}$").expect("Invalid regex"));

/// 正規化結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// 已計算雜湊的新檔名
    Hashed(String),
    /// 基本檔名本身已是雜湊值，只統一副檔名
    AlreadyNormalized(String),
    /// 不支援的副檔名，原樣保留
    Unsupported { original: String, extension: String },
}

impl Normalized {
    /// 正規化後的檔名（不支援時為原始輸入）
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Hashed(name) | Self::AlreadyNormalized(name) => name,
            Self::Unsupported { original, .. } => original,
        }
    }

    #[must_use]
    pub fn into_name(self) -> String {
        match self {
            Self::Hashed(name) | Self::AlreadyNormalized(name) => name,
            Self::Unsupported { original, .. } => original,
        }
    }

    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported { .. })
    }
}

/// 拆出最後一個路徑元件，再切成（基本檔名, 副檔名）
///
/// 副檔名包含前導點，沒有點時為空字串
#[must_use]
pub fn split_leaf(filename: &str) -> (&str, &str) {
    let leaf = filename.rsplit('/').next().unwrap_or(filename);
    match leaf.rfind('.') {
        Some(index) => leaf.split_at(index),
        None => (leaf, ""),
    }
}

/// 將副檔名（不分大小寫）對應到標準形式
#[must_use]
pub fn canonical_extension(extension: &str) -> Option<&'static str> {
    match extension.to_lowercase().as_str() {
        ".mp4" => Some(".mp4"),
        ".jpg" | ".jpeg" => Some(".jpg"),
        _ => None,
    }
}

/// 計算基本檔名的截斷 SHA-1
#[must_use]
pub fn hash_base_name(base: &str) -> String {
    let digest = Sha1::digest(base.as_bytes());
    let mut hashed = hex::encode(digest);
    hashed.truncate(HASH_PREFIX_LEN);
    hashed
}

/// 基本檔名是否已經是正規化後的雜湊
#[must_use]
pub fn is_normalized_base(base: &str) -> bool {
    REGEX_NORMALIZED_BASE.is_match(base)
}

/// 檔名雜湊器
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenameHasher;

impl FilenameHasher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// 正規化檔名
    ///
    /// # Arguments
    /// * `filename` - 原始檔名，可含路徑與前後空白
    ///
    /// # Returns
    /// 正規化結果；不支援的副檔名會回傳未修改的輸入
    #[must_use]
    pub fn normalize(&self, filename: &str) -> Normalized {
        let trimmed = filename.trim();
        let (base, extension) = split_leaf(trimmed);

        let Some(canonical) = canonical_extension(extension) else {
            info!("忽略檔案 {trimmed}（不支援的副檔名: {extension}）");
            return Normalized::Unsupported {
                original: filename.to_string(),
                extension: extension.to_string(),
            };
        };

        if is_normalized_base(base) {
            return Normalized::AlreadyNormalized(format!("{base}{canonical}"));
        }

        Normalized::Hashed(format!("{}{canonical}", hash_base_name(base)))
    }
}

/// 便利函式：直接取得正規化後的檔名
#[must_use]
pub fn normalize(filename: &str) -> String {
    FilenameHasher::new().normalize(filename).into_name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_known_values() {
        assert_eq!(normalize("clip1.mp4"), "c99dd2f060.mp4");
        assert_eq!(normalize("KW_D16_354org.mp4"), "5f87595962.mp4");
        assert_eq!(normalize("photo.jpg"), "eeb35d331b.jpg");
    }

    #[test]
    fn test_extension_canonicalization() {
        assert_eq!(normalize("photo.JPG"), "eeb35d331b.jpg");
        assert_eq!(normalize("photo.jpeg"), "eeb35d331b.jpg");
        assert_eq!(normalize("photo.JpEg"), "eeb35d331b.jpg");
        assert_eq!(normalize("clip1.MP4"), "c99dd2f060.mp4");
    }

    #[test]
    fn test_base_name_is_case_sensitive() {
        assert_eq!(normalize("IMG_001.jpg"), "e73968c28d.jpg");
        assert_eq!(normalize("img_001.jpg"), "b355dc40f0.jpg");
    }

    #[test]
    fn test_trims_whitespace_and_directories() {
        assert_eq!(normalize("  clip1.mp4 \n"), "c99dd2f060.mp4");
        assert_eq!(normalize("media/sub/clip1.mp4"), "c99dd2f060.mp4");
    }

    #[test]
    fn test_deterministic() {
        let hasher = FilenameHasher::new();
        for name in ["a.jpg", "a.JPG", "Zdjęcie 1.jpeg", "scene.Mp4"] {
            assert_eq!(hasher.normalize(name), hasher.normalize(name));
        }
    }

    #[test]
    fn test_unsupported_extension_passthrough() {
        let hasher = FilenameHasher::new();
        for name in ["notes.txt", "clip.mov", "noext", " padded.png ", "archive.tar.gz"] {
            let result = hasher.normalize(name);
            assert!(!result.is_supported());
            assert_eq!(result.name(), name);
        }
    }

    #[test]
    fn test_unsupported_reports_extension() {
        let result = FilenameHasher::new().normalize("image.png");
        assert_eq!(
            result,
            Normalized::Unsupported {
                original: "image.png".to_string(),
                extension: ".png".to_string(),
            }
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("clip1.mp4");
        let twice = normalize(&once);
        assert_eq!(once, twice);

        // 不做偵測的話，對雜湊再雜湊會得到另一個名稱
        assert_eq!(hash_base_name("c99dd2f060"), "2c3cca6160");
        assert_ne!(format!("{}.mp4", hash_base_name("c99dd2f060")), once);
    }

    #[test]
    fn test_already_normalized_extension_is_canonicalized() {
        let result = FilenameHasher::new().normalize("c99dd2f060.JPEG");
        assert_eq!(result, Normalized::AlreadyNormalized("c99dd2f060.jpg".to_string()));
    }

    #[test]
    fn test_uppercase_hex_base_is_hashed() {
        let result = FilenameHasher::new().normalize("C99DD2F060.mp4");
        assert!(matches!(result, Normalized::Hashed(_)));
    }

    #[test]
    fn test_empty_base_name() {
        assert_eq!(normalize(".mp4"), "da39a3ee5e.mp4");
    }

    #[test]
    fn test_split_leaf() {
        assert_eq!(split_leaf("dir/name.tar.gz"), ("name.tar", ".gz"));
        assert_eq!(split_leaf("noext"), ("noext", ""));
        assert_eq!(split_leaf("a.b/noext"), ("noext", ""));
    }
}
