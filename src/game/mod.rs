//! Quiz game core - session orchestration, lifecycle, and scoring.
//!
//! This module provides the foundational game implementation including:
//! - The [`Game`] aggregate governing one round of play
//! - A strictly forward, pull-based lifecycle [`StateMachine`]
//! - Answer grading and score ranking

pub mod entities;
pub mod scoring;
pub mod session;
pub mod state_machine;

pub use scoring::{CorrectCountBuilder, ScoreBuilder, rank_scores};
pub use session::{Game, GameError, GameEvent, GameSettings};
pub use state_machine::{
    Clock, GameState, GameStateMachine, ManualClock, StateMachine, SystemClock,
};
