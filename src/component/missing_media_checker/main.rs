//! 缺漏媒體檢查主模組

use super::reconciler::{MediaReconciler, ReconcileReport, ReferenceStatus};
use crate::config::Config;
use crate::tools::{DiskStore, validate_directory_exists};
use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 缺漏媒體檢查元件
pub struct MissingMediaChecker {
    config: Config,
}

impl MissingMediaChecker {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<()> {
        let settings = &self.config.settings;

        println!("{}", style("=== 檢查缺漏媒體 ===").cyan().bold());
        println!("  JSON 資料夾: {}", style(settings.json_directory.display()).cyan());
        println!("  媒體資料夾: {}", style(settings.media_directory.display()).cyan());
        println!("  已找到資料夾: {}", style(settings.found_directory.display()).cyan());
        println!();

        let confirmed = Confirm::new()
            .with_prompt("找到的檔案會移動到已找到資料夾，確定執行？")
            .default(true)
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
        progress_bar.set_message("比對中...");

        let result = self.execute();
        progress_bar.finish_and_clear();

        self.print_result(&result?);
        Ok(())
    }

    pub fn execute(&self) -> Result<ReconcileReport> {
        let settings = &self.config.settings;
        validate_directory_exists("JSON 資料夾", &settings.json_directory)?;

        let store = DiskStore::new();
        let mut reconciler = MediaReconciler::new(
            &store,
            &settings.json_directory,
            &settings.media_directory,
            &settings.found_directory,
        );
        Ok(reconciler.reconcile())
    }

    pub fn print_result(&self, report: &ReconcileReport) {
        for line in report.missing_lines() {
            println!("{line}");
        }

        for reference in &report.references {
            if let ReferenceStatus::MoveFailed { from, error } = &reference.status {
                println!("  {} {}: {error}", style("✗").red(), from.display());
            }
        }
        for failure in &report.json_failures {
            println!("  {} {}: {}", style("✗").red(), failure.path.display(), failure.error);
        }
        for failure in &report.walk_failures {
            println!("  {} {}", style("✗").red(), failure.message);
        }

        println!();
        println!("{}", style("=== 比對結果 ===").cyan().bold());
        println!("  已存在: {} 個", style(report.already_present()).dim());
        println!("  新移動: {} 個", style(report.moved()).green());
        println!("  缺漏: {} 個", style(report.missing().len()).yellow());
        if report.errors() > 0 {
            println!("  失敗: {} 個", style(report.errors()).red());
        }
    }
}
