//! Database models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredReport {
    pub id: i64,
    pub game_id: String,
    pub white_player: String,
    pub black_player: String,
    pub result: String,
    pub white_accuracy: f64,
    pub black_accuracy: f64,
    pub white_avg_cp_loss: f64,
    pub black_avg_cp_loss: f64,
    pub created_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTimelinePoint {
    pub id: i64,
    pub report_id: i64,
    pub ply: u32,
    pub move_number: u32,
    pub fen: String,
    pub stockfish_cp: Option<i32>,
    pub chess_api_cp: Option<i32>,
    pub consensus_cp: i32,
    pub delta_cp: i32,
    pub confidence: u8,
    pub quality: Option<String>,
    pub wdl_win: u8,
    pub wdl_draw: u8,
    pub wdl_loss: u8,
    pub created_at: u64,
}
