pub mod load;
pub mod save;
pub mod types;

pub use types::{
    Config, DEFAULT_FOUND_DIRECTORY, DEFAULT_JSON_DIRECTORY, DEFAULT_MEDIA_DIRECTORY,
    Language, SETTINGS_FILE, UserSettings,
};
