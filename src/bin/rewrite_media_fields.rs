//! 依設定的 JSON 資料夾改寫一次 media 欄位，不詢問

use console::style;
use log::error;
use quiz_media_sync::component::MediaFieldRewriter;
use quiz_media_sync::config::Config;
use quiz_media_sync::init;

fn main() {
    init::init();

    let result = Config::new().and_then(|config| {
        let component = MediaFieldRewriter::new(config);
        let report = component.execute()?;
        component.print_result(&report);
        Ok(())
    });

    // 錯誤只輸出，不改變結束碼
    if let Err(e) = result {
        error!("改寫失敗: {e:#}");
        println!("{} {e:#}", style("錯誤:").red().bold());
    }
}
