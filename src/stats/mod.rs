//! Outbound recording seam for finished rounds.
//!
//! Cross-game statistics and rankings live outside this crate; all the
//! core does is hand each finished round's category and ranked scores to
//! a [`ScoreSink`] once the round closes.

use crate::game::entities::{Category, Score};
use crate::room::RoomId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything a recording backend gets about one finished round.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GameReport {
    pub room_id: RoomId,
    pub category: Category,
    pub scores: Vec<Score>,
    pub finished_at: DateTime<Utc>,
}

/// Stats errors
#[derive(Debug, Error)]
pub enum StatsError {
    /// The backend could not accept the report right now
    #[error("stats backend unavailable: {0}")]
    Unavailable(String),
}

/// Receiver of finished-round reports.
#[async_trait]
pub trait ScoreSink: Send + Sync {
    async fn record(&self, report: GameReport) -> Result<(), StatsError>;
}

/// Sink that writes final standings to the log. The default when no
/// recording backend is wired up.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

#[async_trait]
impl ScoreSink for LogSink {
    async fn record(&self, report: GameReport) -> Result<(), StatsError> {
        for score in &report.scores {
            log::info!("[{}] {score}", report.category.name);
        }
        Ok(())
    }
}
