use chrono::{DateTime, Local};
use model::ScoreRecord;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};

pub mod model {
    use super::*;

    /// One finished game of a player.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ScoreRecord {
        pub user: String,
        pub moves: u32,
        /// Seconds
        pub time_elapsed: u32,
        pub created: DateTime<Local>,
    }

    impl ScoreRecord {
        pub const DATE_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

        pub fn new(user: impl Into<String>, moves: u32, time_elapsed: u32) -> Self {
            Self {
                user: user.into(),
                moves,
                time_elapsed,
                created: Local::now(),
            }
        }

        pub fn date(&self) -> String {
            self.created.format(Self::DATE_FORMAT).to_string()
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ScoreStoreError {
    #[error("Failed to load/save score file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse score file: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Score records of all players, optionally backed by a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreStore {
    #[serde(default)]
    scores: Vec<ScoreRecord>,

    #[serde(skip_serializing, skip_deserializing)]
    path: Option<PathBuf>,
}

impl ScoreStore {
    /// Store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the store from `path`, a missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, ScoreStoreError> {
        match File::open(path) {
            Ok(file) => {
                let store: ScoreStore = serde_json::from_reader(BufReader::new(file))?;
                log::info!("Loaded {} scores from {:?}", store.scores.len(), path);
                Ok(Self {
                    path: Some(path.to_owned()),
                    ..store
                })
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self {
                scores: Vec::new(),
                path: Some(path.to_owned()),
            }),
            Err(err) => Err(err.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn scores(&self) -> &[ScoreRecord] {
        &self.scores
    }

    fn write(&self) -> Result<(), ScoreStoreError> {
        match &self.path {
            Some(path) => self.write_to(path),
            None => Ok(()),
        }
    }

    fn write_to(&self, path: &Path) -> Result<(), ScoreStoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), self)?;
        log::info!("Saved {} scores to {:?}", self.scores.len(), path);
        Ok(())
    }

    /// Removes the backing file, if there is one.
    pub fn delete(self) -> Result<(), ScoreStoreError> {
        match &self.path {
            Some(path) => Self::delete_file(path),
            None => Ok(()),
        }
    }

    /// Removes a score file without reading it, a missing file is not an error.
    pub fn delete_file(path: &Path) -> Result<(), ScoreStoreError> {
        match fs::remove_file(path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => {
                log::info!("Deleted score file {:?}", path);
                Ok(())
            }
        }
    }
}

impl ScoreStore {
    /// Records a finished game stamped with the current time.
    pub fn save_score(
        &mut self,
        user: &str,
        moves: u32,
        time_elapsed: u32,
    ) -> Result<&ScoreRecord, ScoreStoreError> {
        self.push(ScoreRecord::new(user, moves, time_elapsed))
    }

    pub fn push(&mut self, record: ScoreRecord) -> Result<&ScoreRecord, ScoreStoreError> {
        self.scores.push(record);
        if let Err(err) = self.write() {
            // keep memory in line with the file
            self.scores.pop();
            return Err(err);
        }
        Ok(&self.scores[self.scores.len() - 1])
    }

    /// Most recent record of `user`, the later inserted one wins on equal timestamps.
    pub fn last_score(&self, user: &str) -> Option<&ScoreRecord> {
        self.scores
            .iter()
            .filter(|record| record.user == user)
            .max_by_key(|record| record.created)
    }
}
