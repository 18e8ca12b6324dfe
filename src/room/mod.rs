//! Room module providing multi-room support with an async actor model.
//!
//! This module implements:
//! - RoomActor: Async actor hosting a single live quiz game
//! - RoomManager: Spawns and tracks room instances
//! - Message-based communication with tokio channels
//!
//! ## Architecture
//!
//! Each room runs in a separate Tokio task with an mpsc message inbox.
//! The actor owns its [`Game`](crate::game::Game) exclusively and drains
//! the inbox sequentially, so roster and ledger mutations are serialized
//! and every gate check acts on the state it just computed. A periodic
//! tick drives the game's lazy deadline transition and publishes final
//! scores to the configured [`ScoreSink`](crate::stats::ScoreSink)
//! exactly once after closure.
//!
//! ## Example
//!
//! ```ignore
//! use pub_quiz::{InMemoryCatalog, LogSink, RoomConfig, RoomManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = Arc::new(InMemoryCatalog::from_json(SEED).unwrap());
//!     let manager = RoomManager::new(catalog, Arc::new(LogSink));
//!
//!     let room_id = manager
//!         .create_room(RoomConfig::new("friday night", 1))
//!         .await
//!         .unwrap();
//!     let room = manager.get_room(room_id).await.unwrap();
//!     // room.join(player).await / room.start().await / ...
//! }
//! ```

use uuid::Uuid;

pub mod actor;
pub mod config;
pub mod errors;
pub mod manager;
pub mod messages;

pub use actor::{RoomActor, RoomHandle};
pub use config::RoomConfig;
pub use errors::RoomError;
pub use manager::RoomManager;
pub use messages::{RoomMessage, RoomResponse, RoomStatus};

/// Identifier for a live room.
pub type RoomId = Uuid;
