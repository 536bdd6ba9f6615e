//! Error types for chess-scoring-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid FEN: {0}")]
    Fen(String),

    #[error("Illegal position: {0}")]
    Position(String),

    #[error("Invalid UCI move: {0}")]
    Uci(String),
}

pub type Result<T> = std::result::Result<T, Error>;
