//! 功能元件模組
//!
//! 每個子模組實現一個獨立的批次工作，包含主要邏輯和互動介面

pub mod media_field_rewriter;
pub mod media_renamer;
pub mod missing_media_checker;

pub use media_field_rewriter::MediaFieldRewriter;
pub use media_renamer::MediaRenamer;
pub use missing_media_checker::MissingMediaChecker;
