use std::path::PathBuf;

use dirs::{data_dir, preference_dir};

pub const APP_NAME: &str = "maze-game";

pub const DEFAULT_SIZE: i32 = 15;
pub const DEFAULT_MAX_SIZE: i32 = 200;
/// Ceiling for the configured `max_size`.
pub const MAX_SIZE_LIMIT: i32 = 2000;

pub mod paths {
    use super::*;

    pub fn settings_path() -> PathBuf {
        preference_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join("settings.ron")
    }

    pub fn score_data_path() -> PathBuf {
        data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join("scores.json")
    }
}
