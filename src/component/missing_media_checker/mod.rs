//! 缺漏媒體檢查元件
//!
//! 依題目 JSON 的 `media` 欄位，把找到的媒體檔集中到已找到資料夾，並列出缺漏的檔案

mod main;
mod media_index;
mod reconciler;

pub use main::MissingMediaChecker;
pub use media_index::MediaIndex;
pub use reconciler::{
    JsonFailure, MediaReconciler, ReconcileReport, ReferenceOutcome, ReferenceStatus,
    move_into_directory,
};
