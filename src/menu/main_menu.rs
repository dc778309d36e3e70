use crate::config::save::save_settings;
use crate::config::{Config, Language, UserSettings};
use crate::menu::handlers::{
    run_media_field_rewriter, run_media_renamer, run_missing_media_checker,
};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::path::{Path, PathBuf};

pub fn show_main_menu(term: &Term, config: &mut Config) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_renamer"),
        t!("main_menu.opt_rewriter"),
        t!("main_menu.opt_checker"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_media_renamer(term, config)?;
            Ok(true)
        }
        Some(1) => {
            run_media_field_rewriter(term, config)?;
            Ok(true)
        }
        Some(2) => {
            run_missing_media_checker(term, config)?;
            Ok(true)
        }
        Some(3) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(4) => Ok(false),
        None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        let settings = &config.settings;
        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_back_hint")).dim());

        let options = vec![
            t!("settings.opt_json_directory", path = settings.json_directory.display()),
            t!("settings.opt_media_directory", path = settings.media_directory.display()),
            t!("settings.opt_found_directory", path = settings.found_directory.display()),
            t!("settings.opt_extensions", extensions = settings.rename_extensions.join(", ")),
            t!("settings.opt_language", language = settings.language),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        let mut updated = config.settings.clone();
        match selection {
            Some(0) => {
                updated.json_directory =
                    prompt_path(&t!("settings.json_directory"), &updated.json_directory)?;
            }
            Some(1) => {
                updated.media_directory =
                    prompt_path(&t!("settings.media_directory"), &updated.media_directory)?;
            }
            Some(2) => {
                updated.found_directory =
                    prompt_path(&t!("settings.found_directory"), &updated.found_directory)?;
            }
            Some(3) => updated.rename_extensions = prompt_extensions(&updated)?,
            Some(4) => {
                let Some(language) = prompt_language(term, updated.language)? else {
                    continue;
                };
                updated.language = language;
            }
            Some(5) | None => break, // ESC or back
            _ => unreachable!(),
        }

        if updated != config.settings {
            if updated.language != config.settings.language {
                rust_i18n::set_locale(updated.language.as_str());
            }
            save_settings(&updated)?;
            config.settings = updated;
            println!("\n{}", style(t!("settings.saved")).green());
            std::thread::sleep(std::time::Duration::from_secs(1));
        }
    }

    Ok(())
}

/// 語言設定選單，ESC 回傳 None
fn prompt_language(term: &Term, current: Language) -> Result<Option<Language>> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_back_hint")).dim());

    let languages = [Language::ZhTw, Language::EnUs];
    let items: Vec<String> = languages.iter().map(ToString::to_string).collect();
    let default_index = languages.iter().position(|&l| l == current).unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    Ok(selection.map(|index| languages[index]))
}

fn prompt_path(label: &str, current: &Path) -> Result<PathBuf> {
    let path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .default(current.display().to_string())
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}

/// 以逗號分隔輸入，自動補上前導點並轉小寫
fn prompt_extensions(settings: &UserSettings) -> Result<Vec<String>> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.extensions_prompt"))
        .default(settings.rename_extensions.join(", "))
        .interact_text()?;
    Ok(parse_extensions(&input))
}

fn parse_extensions(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            let ext = ext.to_lowercase();
            if ext.starts_with('.') { ext } else { format!(".{ext}") }
        })
        .collect()
}
