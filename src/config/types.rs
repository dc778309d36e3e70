use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_JSON_DIRECTORY: &str = "./kategorie-json";
pub const DEFAULT_MEDIA_DIRECTORY: &str = "./media-section";
pub const DEFAULT_FOUND_DIRECTORY: &str = "./exists";

/// 設定檔名稱（位於工作目錄）
pub const SETTINGS_FILE: &str = "settings.json";

fn default_rename_extensions() -> Vec<String> {
    vec![".jpg".to_string(), ".mp4".to_string()]
}

/// 介面語言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Language {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZhTw => "zh-TW",
            Self::EnUs => "en-US",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZhTw => write!(f, "繁體中文"),
            Self::EnUs => write!(f, "English"),
        }
    }
}

/// 使用者設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// 題目 JSON 資料夾
    pub json_directory: PathBuf,
    /// 媒體檔案資料夾（任意深度）
    pub media_directory: PathBuf,
    /// 已找到的媒體檔案資料夾（平面）
    pub found_directory: PathBuf,
    /// 重新命名時處理的副檔名（含前導點，不分大小寫）
    pub rename_extensions: Vec<String>,
    pub language: Language,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            json_directory: PathBuf::from(DEFAULT_JSON_DIRECTORY),
            media_directory: PathBuf::from(DEFAULT_MEDIA_DIRECTORY),
            found_directory: PathBuf::from(DEFAULT_FOUND_DIRECTORY),
            rename_extensions: default_rename_extensions(),
            language: Language::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
}
