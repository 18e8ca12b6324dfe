//! Room actor message types.

use super::RoomId;
use crate::game::{
    GameError, GameState,
    entities::{Answer, Player, Score},
};
use tokio::sync::oneshot;

/// Messages that can be sent to a RoomActor
#[derive(Debug)]
pub enum RoomMessage {
    /// Admit a player to the game
    Join {
        player: Player,
        response: oneshot::Sender<RoomResponse>,
    },

    /// Open the submission window
    Start {
        response: oneshot::Sender<RoomResponse>,
    },

    /// Grade one player's answer batch
    SubmitAnswers {
        player: Player,
        answers: Vec<Answer>,
        response: oneshot::Sender<RoomResponse>,
    },

    /// Fetch the ranked results of a closed game
    GetResults {
        response: oneshot::Sender<Result<Vec<Score>, GameError>>,
    },

    /// Get a snapshot of the room
    GetStatus {
        response: oneshot::Sender<RoomStatus>,
    },

    /// End the round ahead of its deadline; the room keeps serving
    /// results afterwards
    EndRound {
        response: oneshot::Sender<RoomResponse>,
    },

    /// Shut the room down after publishing whatever results exist
    Close {
        response: oneshot::Sender<RoomResponse>,
    },

    /// Internal: advance the game's lazy lifecycle (called by timer)
    Tick,
}

/// Response from room operations
#[derive(Clone, Debug)]
pub enum RoomResponse {
    /// Operation succeeded
    Success,

    /// Operation rejected by the game's rules
    Rejected(GameError),
}

impl RoomResponse {
    /// Check if response is success
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, RoomResponse::Success)
    }

    /// Get error message if response is a rejection
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self {
            RoomResponse::Success => None,
            RoomResponse::Rejected(error) => Some(error.to_string()),
        }
    }
}

/// Room state snapshot
#[derive(Clone, Debug, serde::Serialize)]
pub struct RoomStatus {
    /// Room ID
    pub room_id: RoomId,

    /// Room name
    pub name: String,

    /// Current lifecycle state
    pub state: GameState,

    /// Category being played
    pub category: String,

    /// Number of questions in the round
    pub question_count: usize,

    /// Current player count
    pub player_count: usize,

    /// Player usernames in join order
    pub players: Vec<String>,

    /// Number of players graded so far
    pub scored_count: usize,
}
