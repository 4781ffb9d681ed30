use std::{io, path::PathBuf};

use clap::{CommandFactory as _, Parser, Subcommand};
use maze_game::{
    data::ScoreStore,
    logging,
    service::{GenerateParams, MazeService, Response, SaveScoreParams, Session},
    settings::Settings,
    AppError,
};

#[derive(Parser, Debug)]
#[clap(version, about, name = "maze-game")]
struct Args {
    #[clap(long, help = "Use settings from this file instead of the default one")]
    config: Option<PathBuf>,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "Log more, can be repeated")]
    verbose: u8,
    #[clap(short, long, help = "Player name, defaults to the current OS user")]
    user: Option<String>,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a maze and print it
    Generate {
        #[clap(short = 'W', long)]
        width: Option<i64>,
        #[clap(short = 'H', long)]
        height: Option<i64>,
        #[clap(short, long)]
        seed: Option<u64>,
        #[clap(long, action, help = "Print the full JSON response")]
        json: bool,
    },
    /// Record a finished game
    SaveScore {
        #[clap(short, long)]
        moves: u32,
        #[clap(short, long, help = "Elapsed time in seconds")]
        time: u32,
    },
    /// Show the most recent score of the player
    LastScore,
    /// Delete all saved scores
    DeleteScores,
    /// Answer JSON requests from stdin, one per line
    Serve,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.show_config_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if args.reset_config {
        Settings::reset_config(&config_path)?;
        return Ok(());
    }

    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    better_panic::install();

    let settings = Settings::load(&config_path)?;
    let level: log::LevelFilter = settings.get_log_level().into();
    let level = (0..args.verbose).fold(level, |level, _| raise(level));
    logging::init(level);

    let data_path = settings.get_data_path();
    let session = args.user.map(Session::new).unwrap_or_else(Session::from_env);
    let open_service = |settings: Settings| -> Result<MazeService, AppError> {
        Ok(MazeService::new(settings, ScoreStore::load(&data_path)?))
    };

    match command {
        Command::Generate {
            width,
            height,
            seed,
            json,
        } => {
            let response = open_service(settings)?.generate(&GenerateParams {
                width,
                height,
                seed,
            })?;
            if json {
                print_json(&response)?;
            } else if let Response::Maze { maze, seed, .. } = &response {
                log::info!("Seed: {}", seed);
                print!("{}", maze);
            }
        }
        Command::SaveScore { moves, time } => {
            let params = SaveScoreParams {
                moves,
                time_elapsed: time,
            };
            open_service(settings)?.save_score(&session, &params)?;
        }
        Command::LastScore => print_json(&open_service(settings)?.last_score(&session))?,
        // the store is never read, so a corrupt file can still be removed
        Command::DeleteScores => ScoreStore::delete_file(&data_path)?,
        Command::Serve => {
            log::info!("Serving requests of {:?}", session.user);
            open_service(settings)?.serve(&session, io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}

fn raise(level: log::LevelFilter) -> log::LevelFilter {
    use log::LevelFilter::*;

    match level {
        Off => Error,
        Error => Warn,
        Warn => Info,
        Info => Debug,
        Debug | Trace => Trace,
    }
}

fn print_json(response: &Response) -> Result<(), AppError> {
    println!(
        "{}",
        serde_json::to_string(response).map_err(io::Error::from)?
    );
    Ok(())
}
