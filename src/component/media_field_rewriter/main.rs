use super::record_rewriter::{RecordRewriter, RewriteOutcome, RewriteReport};
use crate::config::Config;
use crate::tools::{DiskStore, validate_directory_exists};
use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 題目 JSON `media` 欄位改寫元件
pub struct MediaFieldRewriter {
    config: Config,
}

impl MediaFieldRewriter {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 題目 JSON 媒體欄位雜湊化 ===").cyan().bold());
        println!(
            "  JSON 資料夾: {}",
            style(self.config.settings.json_directory.display()).cyan()
        );
        println!();

        let confirmed = Confirm::new()
            .with_prompt("確定要覆寫這些 JSON 檔案嗎？")
            .default(false)
            .interact()?;
        if !confirmed {
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
        progress_bar.set_message("改寫 JSON 中...");

        let result = self.execute();
        progress_bar.finish_and_clear();

        self.print_result(&result?);
        Ok(())
    }

    pub fn execute(&self) -> Result<RewriteReport> {
        let directory = &self.config.settings.json_directory;
        validate_directory_exists("JSON 資料夾", directory)?;

        let store = DiskStore::new();
        Ok(RecordRewriter::new(&store).rewrite_all(directory))
    }

    pub fn print_result(&self, report: &RewriteReport) {
        for outcome in &report.outcomes {
            match outcome {
                RewriteOutcome::Updated {
                    path,
                    changes,
                    unsupported,
                    ..
                } => {
                    println!(
                        "  {} {} ({} 筆 media 更新)",
                        style("✓").green(),
                        path.display(),
                        changes.len()
                    );
                    for value in unsupported {
                        println!("    {} 不支援的副檔名，保留: {value}", style("⋯").dim());
                    }
                }
                RewriteOutcome::Failed { path, error } => {
                    println!("  {} {}: {error}", style("✗").red(), path.display());
                }
            }
        }
        for failure in &report.walk_failures {
            println!("  {} {}", style("✗").red(), failure.message);
        }

        println!();
        println!("{}", style("=== 改寫結果 ===").cyan().bold());
        println!("  更新檔案: {} 個", style(report.files_updated()).green());
        println!("  media 變更: {} 筆", style(report.media_changed()).green());
        if report.errors() > 0 {
            println!("  失敗: {} 個", style(report.errors()).red());
        }
    }
}
