//! SQLite storage for finished game reports

mod db;
mod models;

pub use db::Database;
pub use models::*;
