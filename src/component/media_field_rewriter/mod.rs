//! 題目 JSON 媒體欄位改寫元件

mod main;
mod record_rewriter;

pub use main::MediaFieldRewriter;
pub use record_rewriter::{MediaChange, RecordRewriter, RewriteOutcome, RewriteReport, is_json_file};
