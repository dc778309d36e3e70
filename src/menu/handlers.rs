use crate::component::{MediaFieldRewriter, MediaRenamer, MissingMediaChecker};
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};

pub fn run_media_renamer(term: &Term, config: &Config) -> Result<()> {
    let renamer = MediaRenamer::new(config.clone());

    if let Err(e) = renamer.run() {
        eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_media_field_rewriter(term: &Term, config: &Config) -> Result<()> {
    let rewriter = MediaFieldRewriter::new(config.clone());

    if let Err(e) = rewriter.run() {
        eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_missing_media_checker(term: &Term, config: &Config) -> Result<()> {
    let checker = MissingMediaChecker::new(config.clone());

    if let Err(e) = checker.run() {
        eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}
