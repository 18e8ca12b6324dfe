//! # Pub Quiz
//!
//! A multiplayer quiz game session library.
//!
//! One [`Game`] governs one round of play over a fixed question sequence
//! drawn from a single category: it admits players, gates when answer
//! batches may be submitted, grades each player exactly once, and
//! releases ranked results only after the round is closed.
//!
//! ## Architecture
//!
//! The round lifecycle is a strictly forward, pull-based state machine:
//!
//! - **NotStarted**: players are joining; submissions are rejected
//! - **InProgress**: the submission window is open until the deadline
//! - **Closed**: results are ranked and available, nothing else changes
//!
//! Concurrent access is handled by the [`room`] actor layer: each live
//! game runs inside a Tokio task that owns it exclusively and drains its
//! message inbox sequentially. Content and persistence stay behind the
//! narrow [`catalog`] and [`stats`] seams.
//!
//! ## Core Modules
//!
//! - [`game`]: Entities, lifecycle state machine, scoring, and the
//!   session orchestrator
//! - [`room`]: Async actor hosting for live games, plus a multi-room
//!   manager
//! - [`catalog`]: Read-only supplier of categories and question draws
//! - [`stats`]: Outbound recording of finished rounds
//!
//! ## Example
//!
//! ```
//! use pub_quiz::{Game, entities::{Answer, Category, Player, Question}};
//!
//! let category = Category::new(7, "World History");
//! let questions = vec![
//!     Question::new(1, 7, "Who was the first emperor of Rome?"),
//!     Question::new(2, 7, "In which year did the Berlin Wall fall?"),
//! ];
//!
//! let mut game = Game::new(category, questions)?;
//! let alice = Player::new(1, "alice");
//! game.add_player(alice.clone());
//! game.start();
//! game.evaluate_answers(&alice, &[Answer::correct(1), Answer::incorrect(2)])?;
//! # Ok::<(), pub_quiz::GameError>(())
//! ```

/// Read-only access to quiz content.
pub mod catalog;
pub use catalog::{Catalog, CatalogError, InMemoryCatalog};

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    Game, GameError, GameEvent, GameSettings, GameState, GameStateMachine,
    entities::{self, Answer, Category, Player, Question, Score, Username},
    scoring::{CorrectCountBuilder, ScoreBuilder, rank_scores},
    state_machine::{Clock, ManualClock, StateMachine, SystemClock},
};

/// Async actor hosting for live games.
pub mod room;
pub use room::{RoomConfig, RoomError, RoomHandle, RoomId, RoomManager, RoomStatus};

/// Outbound recording of finished rounds.
pub mod stats;
pub use stats::{GameReport, LogSink, ScoreSink, StatsError};
