pub mod protocol;

use std::io::{self, BufRead, Write};

use mazegen::{Dims, Generator, GeneratorError};
use thiserror::Error;

use crate::{
    data::{ScoreStore, ScoreStoreError},
    settings::Settings,
};
pub use protocol::{GenerateParams, Request, Response, SaveScoreParams};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(serde_json::Error),
    #[error("Invalid parameters: {0}")]
    InvalidParams(serde_json::Error),
    #[error("Request is not valid UTF-8: {0}")]
    InvalidEncoding(std::string::FromUtf8Error),
    #[error("Unknown method {0:?}")]
    UnknownMethod(String),
    #[error("Maze size {width}x{height} exceeds the limit of {max}")]
    SizeLimit { width: i64, height: i64, max: i32 },
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Store(#[from] ScoreStoreError),
}

/// Identity of the caller, as established by whatever authenticates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: String,
}

impl Session {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }

    /// Session of the user running the process.
    pub fn from_env() -> Self {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "anonymous".to_string());
        Self::new(user)
    }
}

/// Request handling on top of the maze generator and the score store.
///
/// Every generation builds its maze from scratch, the only state kept between requests is the
/// score store.
#[derive(Debug)]
pub struct MazeService {
    settings: Settings,
    store: ScoreStore,
    generator: Generator,
}

impl MazeService {
    pub fn new(settings: Settings, store: ScoreStore) -> Self {
        Self {
            settings,
            store,
            generator: Generator::new(),
        }
    }

    pub fn store(&self) -> &ScoreStore {
        &self.store
    }

    /// Parses and handles one request, failures become [`Response::Failure`].
    pub fn handle_line(&mut self, session: &Session, line: &str) -> Response {
        match Request::parse(line) {
            Ok(request) => self.handle(session, request),
            Err(err) => {
                log::warn!("Rejected request: {}", err);
                Response::failure(&err)
            }
        }
    }

    pub fn handle(&mut self, session: &Session, request: Request) -> Response {
        let result = match request {
            Request::Generate(params) => self.generate(&params),
            Request::SaveScore(params) => self.save_score(session, &params),
            Request::GetLastScore => Ok(self.last_score(session)),
        };

        result.unwrap_or_else(|err| {
            log::warn!("Request of {:?} failed: {}", session.user, err);
            Response::failure(&err)
        })
    }

    /// Resolves requested dimensions against the defaults and the size limit.
    pub fn maze_size(&self, params: &GenerateParams) -> Result<Dims, ServiceError> {
        let width = params
            .width
            .unwrap_or(self.settings.get_default_width() as i64);
        let height = params
            .height
            .unwrap_or(self.settings.get_default_height() as i64);

        let max = self.settings.get_max_size();
        if width > max as i64 || height > max as i64 {
            return Err(ServiceError::SizeLimit { width, height, max });
        }

        // at most `max` now, anything below `i32::MIN` is as invalid as zero
        let clamp = |v: i64| v.max(i32::MIN as i64) as i32;
        Ok(Dims(clamp(width), clamp(height)))
    }

    pub fn generate(&self, params: &GenerateParams) -> Result<Response, ServiceError> {
        let size = self.maze_size(params)?;
        let generated = self.generator.generate(size, params.seed)?;
        log::debug!(
            "Generated {}x{} maze from seed {}",
            size.0,
            size.1,
            generated.seed
        );

        Ok(Response::maze(generated.maze, generated.seed))
    }

    pub fn save_score(
        &mut self,
        session: &Session,
        params: &SaveScoreParams,
    ) -> Result<Response, ServiceError> {
        self.store
            .save_score(&session.user, params.moves, params.time_elapsed)?;
        log::debug!(
            "Saved score of {:?}: {} moves in {}s",
            session.user,
            params.moves,
            params.time_elapsed
        );
        Ok(Response::done())
    }

    pub fn last_score(&self, session: &Session) -> Response {
        Response::last_score(self.store.last_score(&session.user))
    }

    /// Answers newline-delimited JSON requests until `input` ends.
    pub fn serve(
        &mut self,
        session: &Session,
        input: impl BufRead,
        mut output: impl Write,
    ) -> io::Result<()> {
        for line in input.split(b'\n') {
            let response = match String::from_utf8(line?) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(session, &line),
                Err(err) => {
                    let err = ServiceError::InvalidEncoding(err);
                    log::warn!("Rejected request: {}", err);
                    Response::failure(&err)
                }
            };
            serde_json::to_writer(&mut output, &response)?;
            writeln!(output)?;
            output.flush()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn service() -> MazeService {
        MazeService::new(Settings::new().set_max_size(50), ScoreStore::in_memory())
    }

    fn ana() -> Session {
        Session::new("ana")
    }

    fn call(service: &mut MazeService, session: &Session, request: Value) -> Value {
        let response = service.handle_line(session, &request.to_string());
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn generate_defaults_to_fifteen() {
        let mut service = service();
        let response = call(&mut service, &ana(), json!({"method": "generate"}));

        assert_eq!(response["success"], true);
        assert_eq!(response["width"], 15);
        assert_eq!(response["height"], 15);
        assert_eq!(response["start"], json!([1, 1]));
        assert_eq!(response["end"], json!([29, 29]));

        let maze = response["maze"].as_array().unwrap();
        assert_eq!(maze.len(), 31);
        assert!(maze.iter().all(|row| row.as_array().unwrap().len() == 31));
    }

    #[test]
    fn generate_rectangular() {
        let mut service = service();
        let response = call(
            &mut service,
            &ana(),
            json!({"method": "generate", "params": {"width": 2, "height": 1, "seed": 5}}),
        );

        assert_eq!(
            response["maze"],
            json!([[1, 1, 1, 1, 1], [1, 0, 0, 0, 1], [1, 1, 1, 1, 1]])
        );
        assert_eq!(response["start"], json!([1, 1]));
        assert_eq!(response["end"], json!([1, 3]));
        assert_eq!(response["seed"], 5);
    }

    #[test]
    fn generate_is_reproducible_with_seed() {
        let mut service = service();
        let request = json!({"method": "generate", "params": {"width": 12, "height": 7, "seed": 31}});
        let a = call(&mut service, &ana(), request.clone());
        let b = call(&mut service, &ana(), request);
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_sizes_are_structured_failures() {
        let mut service = service();
        for params in [
            json!({"width": 0}),
            json!({"height": -4}),
            json!({"width": -10000000000i64}),
            json!({"width": 51}),
            json!({"width": "wide"}),
        ] {
            let response = call(
                &mut service,
                &ana(),
                json!({"method": "generate", "params": params}),
            );
            assert_eq!(response["success"], false, "{params}");
            assert!(response["error"].is_string());
        }
    }

    #[test]
    fn size_errors_name_the_problem() {
        let service = service();
        let err = service
            .generate(&GenerateParams {
                width: Some(0),
                height: Some(3),
                seed: None,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Generator(GeneratorError::InvalidSize {
                width: 0,
                height: 3
            })
        ));

        let err = service
            .maze_size(&GenerateParams {
                width: Some(10),
                height: Some(80),
                seed: None,
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Maze size 10x80 exceeds the limit of 50");
    }

    #[test]
    fn huge_limit_does_not_allow_huge_mazes() {
        let service = MazeService::new(
            Settings::new().set_max_size(2_000_000_000),
            ScoreStore::in_memory(),
        );
        let err = service
            .generate(&GenerateParams {
                width: Some(1_000_000_000),
                height: Some(1_000_000_000),
                seed: None,
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::SizeLimit { max: 2000, .. }));
    }

    #[test]
    fn scores_are_per_session() {
        let mut service = service();
        let bob = Session::new("bob");

        let response = call(&mut service, &ana(), json!({"method": "get_last_score"}));
        assert_eq!(response, json!({"success": true, "no_score": true}));

        let response = call(
            &mut service,
            &ana(),
            json!({"method": "save_score", "params": {"moves": 40, "time_elapsed": 25}}),
        );
        assert_eq!(response, json!({"success": true}));

        let response = call(&mut service, &ana(), json!({"method": "get_last_score"}));
        assert_eq!(response["success"], true);
        assert_eq!(response["moves"], 40);
        assert_eq!(response["time_elapsed"], 25);
        assert!(response["date"].is_string());

        let response = call(&mut service, &bob, json!({"method": "get_last_score"}));
        assert_eq!(response["no_score"], true);
    }

    #[test]
    fn serve_answers_each_line() {
        let mut service = service();
        let input = concat!(
            r#"{"method": "generate", "params": {"width": 3, "height": 2, "seed": 1}}"#,
            "\n\n",
            "garbage\n",
            r#"{"method": "save_score", "params": {"moves": 1, "time_elapsed": 2}}"#,
            "\n",
        );
        let mut output = Vec::new();
        service.serve(&ana(), input.as_bytes(), &mut output).unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["width"], 3);
        assert_eq!(responses[1]["success"], false);
        assert_eq!(responses[2], json!({"success": true}));
        assert_eq!(service.store().scores().len(), 1);
    }

    #[test]
    fn serve_survives_invalid_utf8() {
        let mut service = service();
        let mut input = vec![0xff, 0xfe, b'\n'];
        input.extend_from_slice(br#"{"method": "get_last_score"}"#);
        input.push(b'\n');

        let mut output = Vec::new();
        service.serve(&ana(), input.as_slice(), &mut output).unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["success"], false);
        assert!(responses[0]["error"].as_str().unwrap().contains("UTF-8"));
        assert_eq!(responses[1], json!({"success": true, "no_score": true}));
    }
}
