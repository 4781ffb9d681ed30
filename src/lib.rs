pub mod constants;
pub mod data;
pub mod logging;
pub mod service;
pub mod settings;

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] settings::SettingsError),
    #[error(transparent)]
    Store(#[from] data::ScoreStoreError),
    #[error(transparent)]
    Service(#[from] service::ServiceError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
