//! 依設定的媒體資料夾執行一次檔名雜湊化，不詢問

use console::style;
use log::error;
use quiz_media_sync::component::MediaRenamer;
use quiz_media_sync::config::Config;
use quiz_media_sync::init;

fn main() {
    init::init();

    let result = Config::new().and_then(|config| {
        let component = MediaRenamer::new(config);
        let report = component.execute()?;
        component.print_result(&report);
        Ok(())
    });

    // 錯誤只輸出，不改變結束碼
    if let Err(e) = result {
        error!("重新命名失敗: {e:#}");
        println!("{} {e:#}", style("錯誤:").red().bold());
    }
}
