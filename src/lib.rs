pub mod commit;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod graph;
pub mod log;
pub mod range;
pub mod render;
pub mod tags;
pub mod task;
pub mod ui;

pub use error::{HistoryGraphError, Result};
