//! Room error types.

use super::RoomId;
use crate::catalog::CatalogError;
use crate::game::GameError;
use thiserror::Error;

/// Room errors
#[derive(Debug, Error)]
pub enum RoomError {
    /// No room with this id is being managed
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// The room's actor has shut down and no longer answers
    #[error("room is no longer running")]
    RoomUnavailable,

    /// The game rejected the operation
    #[error(transparent)]
    Game(#[from] GameError),

    /// The catalog could not supply the requested content
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
