use anyhow::Result;
use console::{Term, style};
use log::{info, warn};
use quiz_media_sync::config::Config;
use quiz_media_sync::init;
use quiz_media_sync::menu::show_main_menu;
use rust_i18n::t;

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "zh-TW");

fn main() -> Result<()> {
    init::init();
    let term = Term::stdout();

    // Load config and set locale
    let mut config = Config::new()?;
    rust_i18n::set_locale(config.settings.language.as_str());

    loop {
        match show_main_menu(&term, &mut config) {
            Ok(true) => {}
            Ok(false) => {
                if let Err(e) = term.clear_screen() {
                    warn!("無法清除畫面: {e}");
                }
                println!("\n{}", style(t!("main_menu.goodbye")).green().bold());
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                eprintln!("{} {}", style(t!("main_menu.error_prefix")).red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}
