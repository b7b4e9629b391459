use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("board must have at least one cell, got {width}x{height}")]
    Empty { width: usize, height: usize },
    #[error("board of {width}x{height} cells exceeds the limit of {limit} cells")]
    TooLarge { width: usize, height: usize, limit: usize },
    #[error("column {column} has {found} cells, expected {expected}")]
    Ragged { column: usize, expected: usize, found: usize },
    #[error("cell ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds { x: i64, y: i64, width: usize, height: usize },
    #[error("cannot decode board: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("step must be a positive number of pixels, got {0}")]
    InvalidStep(f64),
    #[error("min must be a finite pixel offset, got {0}")]
    InvalidMin(f64),
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("cannot read config {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("cannot decode config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("cannot decode response body: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("websocket error: {0}")]
    Socket(#[from] tungstenite::Error),
}

/// Everything the command line front end can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error("cannot access {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
