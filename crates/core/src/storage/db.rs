//! Database operations

use rusqlite::{params, Connection};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::models::*;
use crate::error::Result;
use crate::review::{AnalysisTimelinePoint, GameReport};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS reports (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_id TEXT UNIQUE NOT NULL,
                white_player TEXT NOT NULL,
                black_player TEXT NOT NULL,
                result TEXT NOT NULL,
                white_accuracy REAL NOT NULL,
                black_accuracy REAL NOT NULL,
                white_avg_cp_loss REAL NOT NULL,
                black_avg_cp_loss REAL NOT NULL,
                created_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS timeline_points (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                report_id INTEGER NOT NULL,
                ply INTEGER NOT NULL,
                move_number INTEGER NOT NULL,
                fen TEXT NOT NULL,
                stockfish_cp INTEGER,
                chess_api_cp INTEGER,
                consensus_cp INTEGER NOT NULL,
                delta_cp INTEGER NOT NULL,
                confidence INTEGER NOT NULL,
                quality TEXT,
                wdl_win INTEGER NOT NULL,
                wdl_draw INTEGER NOT NULL,
                wdl_loss INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                FOREIGN KEY (report_id) REFERENCES reports(id)
            );

            CREATE INDEX IF NOT EXISTS idx_reports_game_id ON reports(game_id);
            CREATE INDEX IF NOT EXISTS idx_points_report_id ON timeline_points(report_id);
            CREATE INDEX IF NOT EXISTS idx_points_ply ON timeline_points(report_id, ply);
            "#,
        )?;
        Ok(())
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    /// Inserts the report row. Reinserting the same game is a no-op that
    /// hands back the already stored id.
    pub fn insert_report(&self, report: &GameReport) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT OR IGNORE INTO reports
            (game_id, white_player, black_player, result,
             white_accuracy, black_accuracy, white_avg_cp_loss, black_avg_cp_loss, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                report.game_id,
                report.white_player,
                report.black_player,
                report.result,
                report.summary.white.accuracy,
                report.summary.black.accuracy,
                report.summary.white.avg_cp_loss,
                report.summary.black.avg_cp_loss,
                Self::now(),
            ],
        )?;

        if self.conn.changes() == 0 {
            let id = self.conn.query_row(
                "SELECT id FROM reports WHERE game_id = ?1",
                params![report.game_id],
                |row| row.get(0),
            )?;
            return Ok(id);
        }

        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_point(&self, report_id: i64, point: &AnalysisTimelinePoint) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO timeline_points
            (report_id, ply, move_number, fen, stockfish_cp, chess_api_cp,
             consensus_cp, delta_cp, confidence, quality,
             wdl_win, wdl_draw, wdl_loss, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
            params![
                report_id,
                point.ply,
                point.move_number,
                point.fen,
                point.stockfish_cp,
                point.chess_api_cp,
                point.consensus_cp,
                point.delta_cp,
                point.confidence,
                point.quality.map(|q| q.as_str()),
                point.wdl_win,
                point.wdl_draw,
                point.wdl_loss,
                Self::now(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_timeline(&self, report_id: i64, points: &[AnalysisTimelinePoint]) -> Result<u32> {
        let mut count = 0;
        for point in points {
            self.insert_point(report_id, point)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn get_report(&self, id: i64) -> Result<Option<StoredReport>> {
        let mut stmt = self.conn.prepare("SELECT * FROM reports WHERE id = ?1")?;

        let report = stmt
            .query_row(params![id], |row| {
                Ok(StoredReport {
                    id: row.get(0)?,
                    game_id: row.get(1)?,
                    white_player: row.get(2)?,
                    black_player: row.get(3)?,
                    result: row.get(4)?,
                    white_accuracy: row.get(5)?,
                    black_accuracy: row.get(6)?,
                    white_avg_cp_loss: row.get(7)?,
                    black_avg_cp_loss: row.get(8)?,
                    created_at: row.get(9)?,
                })
            })
            .ok();

        Ok(report)
    }

    pub fn get_report_by_game(&self, game_id: &str) -> Result<Option<StoredReport>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM reports WHERE game_id = ?1")?;

        let report = stmt
            .query_row(params![game_id], |row| {
                Ok(StoredReport {
                    id: row.get(0)?,
                    game_id: row.get(1)?,
                    white_player: row.get(2)?,
                    black_player: row.get(3)?,
                    result: row.get(4)?,
                    white_accuracy: row.get(5)?,
                    black_accuracy: row.get(6)?,
                    white_avg_cp_loss: row.get(7)?,
                    black_avg_cp_loss: row.get(8)?,
                    created_at: row.get(9)?,
                })
            })
            .ok();

        Ok(report)
    }

    pub fn get_recent_reports(&self, limit: u32) -> Result<Vec<StoredReport>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM reports ORDER BY id DESC LIMIT ?1")?;

        let reports = stmt
            .query_map(params![limit], |row| {
                Ok(StoredReport {
                    id: row.get(0)?,
                    game_id: row.get(1)?,
                    white_player: row.get(2)?,
                    black_player: row.get(3)?,
                    result: row.get(4)?,
                    white_accuracy: row.get(5)?,
                    black_accuracy: row.get(6)?,
                    white_avg_cp_loss: row.get(7)?,
                    black_avg_cp_loss: row.get(8)?,
                    created_at: row.get(9)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(reports)
    }

    pub fn get_timeline(&self, report_id: i64) -> Result<Vec<StoredTimelinePoint>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM timeline_points WHERE report_id = ?1 ORDER BY ply ASC")?;

        let points = stmt
            .query_map(params![report_id], |row| {
                Ok(StoredTimelinePoint {
                    id: row.get(0)?,
                    report_id: row.get(1)?,
                    ply: row.get(2)?,
                    move_number: row.get(3)?,
                    fen: row.get(4)?,
                    stockfish_cp: row.get(5)?,
                    chess_api_cp: row.get(6)?,
                    consensus_cp: row.get(7)?,
                    delta_cp: row.get(8)?,
                    confidence: row.get(9)?,
                    quality: row.get(10)?,
                    wdl_win: row.get(11)?,
                    wdl_draw: row.get(12)?,
                    wdl_loss: row.get(13)?,
                    created_at: row.get(14)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(points)
    }

    pub fn count_reports(&self) -> Result<u32> {
        let count: u32 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn count_points(&self) -> Result<u32> {
        let count: u32 = self
            .conn
            .query_row("SELECT COUNT(*) FROM timeline_points", [], |row| row.get(0))?;
        Ok(count)
    }
}
