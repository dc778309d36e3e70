use crate::config::types::{SETTINGS_FILE, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_settings(settings: &UserSettings) -> Result<()> {
    // Save to settings.json in the current working directory
    save_settings_to(settings, Path::new(SETTINGS_FILE))
}

pub fn save_settings_to(settings: &UserSettings, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Language};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = UserSettings {
            found_directory: PathBuf::from("/srv/found"),
            rename_extensions: vec![".jpg".to_string(), ".jpeg".to_string()],
            language: Language::EnUs,
            ..UserSettings::default()
        };
        save_settings_to(&settings, &path).unwrap();

        assert_eq!(Config::load_from(&path).settings, settings);
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"language\": \"en-US\""));
    }
}
