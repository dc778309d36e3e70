//! 依設定比對一次缺漏媒體，不詢問

use console::style;
use log::error;
use quiz_media_sync::component::MissingMediaChecker;
use quiz_media_sync::config::Config;
use quiz_media_sync::init;

fn main() {
    init::init();

    let result = Config::new().and_then(|config| {
        let component = MissingMediaChecker::new(config);
        let report = component.execute()?;
        component.print_result(&report);
        Ok(())
    });

    // 錯誤只輸出，不改變結束碼
    if let Err(e) = result {
        error!("比對失敗: {e:#}");
        println!("{} {e:#}", style("錯誤:").red().bold());
    }
}
