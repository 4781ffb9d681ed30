use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::constants::{
    paths::{score_data_path, settings_path},
    DEFAULT_MAX_SIZE, DEFAULT_SIZE, MAX_SIZE_LIMIT,
};

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read/write settings file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub default_width: Option<i32>,
    #[serde(default)]
    pub default_height: Option<i32>,
    #[serde(default)]
    pub max_size: Option<i32>,
    #[serde(default)]
    pub log_level: Option<LogLevel>,
    #[serde(default)]
    pub data_path: Option<PathBuf>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_path() -> PathBuf {
        settings_path()
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn from_ron(source: &str, path: &Path) -> Result<Self, SettingsError> {
        Self::options()
            .from_str(source)
            .map_err(|source| SettingsError::Parse {
                path: path.to_owned(),
                source,
            })
    }

    /// Loads settings from `path`, creating it with the defaults when missing.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(source) => Self::from_ron(&source, path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Self::reset_config(path)?;
                Self::from_ron(DEFAULT_SETTINGS, path)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Overwrites `path` with the default settings.
    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }

    pub fn set_default_width(mut self, value: i32) -> Self {
        self.default_width = Some(value);
        self
    }

    pub fn get_default_width(&self) -> i32 {
        self.default_width.unwrap_or(DEFAULT_SIZE)
    }

    pub fn set_default_height(mut self, value: i32) -> Self {
        self.default_height = Some(value);
        self
    }

    pub fn get_default_height(&self) -> i32 {
        self.default_height.unwrap_or(DEFAULT_SIZE)
    }

    pub fn set_max_size(mut self, value: i32) -> Self {
        self.max_size = Some(value);
        self
    }

    /// Never above [`MAX_SIZE_LIMIT`].
    pub fn get_max_size(&self) -> i32 {
        self.max_size
            .unwrap_or(DEFAULT_MAX_SIZE)
            .min(MAX_SIZE_LIMIT)
    }

    pub fn set_log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    pub fn set_data_path(mut self, value: PathBuf) -> Self {
        self.data_path = Some(value);
        self
    }

    pub fn get_data_path(&self) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(score_data_path)
    }
}
