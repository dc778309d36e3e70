//! 題目紀錄
//!
//! 只關心 `media` 欄位，其餘欄位原樣保留（包含順序）

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MEDIA_FIELD: &str = "media";

/// JSON 陣列中的一筆題目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionRecord {
    fields: Map<String, Value>,
}

impl QuestionRecord {
    /// 非空字串的 `media` 欄位；缺少、空字串或非字串都視為沒有附件
    #[must_use]
    pub fn media(&self) -> Option<&str> {
        self.fields
            .get(MEDIA_FIELD)
            .and_then(Value::as_str)
            .filter(|media| !media.is_empty())
    }

    pub fn set_media(&mut self, media: impl Into<String>) {
        self.fields
            .insert(MEDIA_FIELD.to_string(), Value::String(media.into()));
    }
}

/// 解析整個 JSON 檔案內容
pub fn parse_records(content: &str) -> Result<Vec<QuestionRecord>> {
    serde_json::from_str(content).context("無法解析 JSON 題目陣列")
}

/// 以兩格縮排輸出
pub fn serialize_records(records: &[QuestionRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("無法序列化 JSON 題目陣列")
}
