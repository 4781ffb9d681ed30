//! JSON shapes of requests and responses.
//!
//! A request is `{"method": "...", "params": {...}}`, every response carries `success`.

use mazegen::MazeGrid;
use serde::{Deserialize, Serialize};

use super::ServiceError;
use crate::data::model::ScoreRecord;

#[derive(Debug, Deserialize)]
struct RawRequest {
    method: String,
    #[serde(default)]
    params: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateParams {
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveScoreParams {
    pub moves: u32,
    pub time_elapsed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Generate(GenerateParams),
    SaveScore(SaveScoreParams),
    GetLastScore,
}

impl Request {
    /// Accepts both bare method names and the `/maze_game/<method>` route form.
    pub fn parse(source: &str) -> Result<Self, ServiceError> {
        let RawRequest { method, params } =
            serde_json::from_str(source).map_err(ServiceError::InvalidRequest)?;
        let params = params
            .filter(|params| !params.is_null())
            .unwrap_or_else(|| serde_json::Value::Object(Default::default()));

        let name = method.strip_prefix("/maze_game/").unwrap_or(&method);
        match name {
            "generate" => Ok(Request::Generate(
                serde_json::from_value(params).map_err(ServiceError::InvalidParams)?,
            )),
            "save_score" => Ok(Request::SaveScore(
                serde_json::from_value(params).map_err(ServiceError::InvalidParams)?,
            )),
            "get_last_score" => Ok(Request::GetLastScore),
            _ => Err(ServiceError::UnknownMethod(method)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Maze {
        success: bool,
        maze: MazeGrid,
        /// `[row, column]` of the entry cell
        start: (usize, usize),
        /// `[row, column]` of the exit cell
        end: (usize, usize),
        width: i32,
        height: i32,
        seed: u64,
    },
    LastScore {
        success: bool,
        moves: u32,
        time_elapsed: u32,
        date: String,
    },
    NoScore {
        success: bool,
        no_score: bool,
    },
    Done {
        success: bool,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl Response {
    pub fn maze(maze: MazeGrid, seed: u64) -> Self {
        let (start, end) = (maze.start(), maze.end());
        let size = maze.size();

        Response::Maze {
            success: true,
            start: (start.1 as usize, start.0 as usize),
            end: (end.1 as usize, end.0 as usize),
            width: size.0,
            height: size.1,
            seed,
            maze,
        }
    }

    pub fn last_score(record: Option<&ScoreRecord>) -> Self {
        match record {
            Some(record) => Response::LastScore {
                success: true,
                moves: record.moves,
                time_elapsed: record.time_elapsed,
                date: record.date(),
            },
            None => Response::NoScore {
                success: true,
                no_score: true,
            },
        }
    }

    pub fn done() -> Self {
        Response::Done { success: true }
    }

    pub fn failure(error: &ServiceError) -> Self {
        Response::Failure {
            success: false,
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Response::Maze { success, .. }
            | Response::LastScore { success, .. }
            | Response::NoScore { success, .. }
            | Response::Done { success }
            | Response::Failure { success, .. } => *success,
        }
    }
}
