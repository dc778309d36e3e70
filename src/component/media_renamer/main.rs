//! 媒體重新命名主模組
//!
//! 顯示設定、確認後執行重新命名並輸出統計

use super::hashed_renamer::{HashedRenamer, RenameOutcome, RenameReport};
use crate::config::Config;
use crate::tools::{DiskStore, validate_directory_exists};
use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 媒體檔案雜湊重新命名元件
pub struct MediaRenamer {
    config: Config,
}

impl MediaRenamer {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// 互動模式：確認後執行
    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 媒體檔名雜湊化 ===").cyan().bold());
        println!(
            "  媒體資料夾: {}",
            style(self.config.settings.media_directory.display()).cyan()
        );
        println!(
            "  副檔名: {}",
            style(self.config.settings.rename_extensions.join(", ")).dim()
        );
        println!();

        if !self.confirm_rename()? {
            println!("{}", style("操作已取消").yellow());
            return Ok(());
        }

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress bar template"),
        );
        progress_bar.enable_steady_tick(Duration::from_millis(120));
        progress_bar.set_message("重新命名中...");

        let result = self.execute();
        progress_bar.finish_and_clear();

        self.print_result(&result?);
        Ok(())
    }

    /// 直接執行，不詢問
    pub fn execute(&self) -> Result<RenameReport> {
        let directory = &self.config.settings.media_directory;
        validate_directory_exists("媒體資料夾", directory)?;

        let store = DiskStore::new();
        let renamer = HashedRenamer::new(&store, &self.config.settings.rename_extensions);
        Ok(renamer.rename_all(directory))
    }

    fn confirm_rename(&self) -> Result<bool> {
        let confirmed = Confirm::new()
            .with_prompt("確定要重新命名這些檔案嗎？")
            .default(false)
            .interact()?;
        Ok(confirmed)
    }

    pub fn print_result(&self, report: &RenameReport) {
        for outcome in &report.outcomes {
            match outcome {
                RenameOutcome::Renamed { from, to } => {
                    println!("  {} {} -> {}", style("✓").green(), from.display(), to.display());
                }
                RenameOutcome::SkippedExisting { path, target } => println!(
                    "  {} {} ({} 已存在)",
                    style("⋯").yellow(),
                    path.display(),
                    target.display()
                ),
                RenameOutcome::Failed { path, error } => {
                    println!("  {} {}: {error}", style("✗").red(), path.display());
                }
                RenameOutcome::AlreadyNormalized { .. } | RenameOutcome::Unsupported { .. } => {}
            }
        }
        for failure in &report.walk_failures {
            println!("  {} {}", style("✗").red(), failure.message);
        }

        println!();
        println!("{}", style("=== 重新命名結果 ===").cyan().bold());
        println!("  成功: {} 個", style(report.renamed()).green());
        if report.already_normalized() > 0 {
            println!("  已是雜湊檔名: {} 個", style(report.already_normalized()).dim());
        }
        if report.skipped() > 0 {
            println!("  跳過: {} 個", style(report.skipped()).yellow());
        }
        if report.errors() > 0 {
            println!("  失敗: {} 個", style(report.errors()).red());
        }
    }
}
