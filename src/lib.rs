pub mod component;
pub mod config;
pub mod init;
pub mod menu;
pub mod tools;

use anyhow::Result;
use console::{Term, style};

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "zh-TW");

pub fn pause(term: &Term) -> Result<()> {
    println!("\n{}", style("按 Enter 繼續...").dim());
    term.read_line()?;
    Ok(())
}
