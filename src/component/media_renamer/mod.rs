//! 媒體檔名雜湊化元件
//!
//! 掃描媒體資料夾，將影片與圖片改名為檔名雜湊

mod hashed_renamer;
mod main;

pub use hashed_renamer::{HashedRenamer, RenameOutcome, RenameReport};
pub use main::MediaRenamer;
