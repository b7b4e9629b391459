use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use warp_board::board::Board;
use warp_board::config::RenderConfig;
use warp_board::error::{BoardError, Error};
use warp_board::feed::watch;
use warp_board::fetch::get_json;
use warp_board::protocol::BoardMessage;
use warp_board::svg::SvgSurface;

#[derive(Debug, Parser)]
#[command(name = "warp_board", about = "Renders warp chess positions to SVG")]
struct Cli {
    /// Renderer config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Cell size in pixels, overrides the config file
    #[arg(long, global = true)]
    step: Option<f64>,
    /// Pixel offset of the grid, overrides the config file
    #[arg(long, global = true)]
    min: Option<f64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render one board; without --board an empty grid is drawn
    Render {
        /// Board JSON file, or an http(s) URL to fetch it from
        #[arg(long)]
        board: Option<String>,
        /// Output SVG file, stdout when absent
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Follow a websocket board feed, rewriting the SVG on every update
    Watch {
        #[arg(long)]
        url: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the cell under a pixel
    Cell {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },
}

fn load_config(cli: &Cli) -> Result<RenderConfig, Error> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(step) = cli.step {
        config.geometry.step = step;
    }
    if let Some(min) = cli.min {
        config.geometry.min = min;
    }
    Ok(config.validate()?)
}

fn load_board(location: Option<&str>, config: &RenderConfig) -> Result<Board, Error> {
    let board = match location {
        None => Board::new(config.geometry.width, config.geometry.height)?,
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            get_json::<BoardMessage>(url)?.into_board()
        }
        Some(file) => {
            let json = fs::read_to_string(file)
                .map_err(|source| Error::Io { path: PathBuf::from(file), source })?;
            serde_json::from_str::<BoardMessage>(&json).map_err(BoardError::from)?.into_board()
        }
    };
    log::debug!("Loaded board:\n{}", board);
    Ok(board)
}

fn write_output(out: Option<&Path>, svg: &str) -> Result<(), Error> {
    match out {
        Some(path) => {
            fs::write(path, svg).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
            log::info!("Wrote {}", path.display());
        }
        None => print!("{}", svg),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = load_config(&cli)?;
    let renderer = config.renderer();
    match cli.command {
        Command::Render { board, out } => {
            let board = load_board(board.as_deref(), &config)?;
            let mut surface = SvgSurface::for_geometry(renderer.geometry());
            renderer.draw(&mut surface, &board);
            write_output(out.as_deref(), &surface.finish())?;
        }
        Command::Watch { url, out } => {
            let frames = watch(&url, &renderer, |board, svg| {
                match fs::write(&out, svg) {
                    Ok(_) => log::info!("Updated {} ({} pieces)", out.display(), board.occupied()),
                    Err(e) => log::error!("Cannot write {}: {}", out.display(), e),
                }
            })?;
            log::info!("Feed ended after {} frames", frames);
        }
        Command::Cell { x, y } => match renderer.geometry().cell_at(x, y) {
            Some((column, row)) => println!("{} {}", column, row),
            None => println!("outside the grid"),
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    let logger_env = env_logger::Env::default().filter_or("LOG_LEVEL", "INFO");
    env_logger::Builder::from_env(logger_env).format_timestamp_millis().init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
