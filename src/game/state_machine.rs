//! Lifecycle state machine for one quiz game session.
//!
//! A session moves strictly forward through three states and never
//! revisits one:
//!
//! ```text
//! NotStarted -> InProgress -> Closed
//! ```
//!
//! The machine is pull-based: nothing advances it in the background.
//! Instead, [`StateMachine::determine_current_state`] re-evaluates the
//! closure rule (deadline elapsed, or an explicit close request) whenever
//! the session is about to act on its state. This keeps transitions
//! deterministic and confines all time dependence to the [`Clock`] seam.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Lifecycle states of a session.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameState {
    NotStarted,
    InProgress,
    Closed,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Closed => "closed",
        };
        write!(f, "{repr}")
    }
}

/// Source of the current wall-clock reading.
pub trait Clock: fmt::Debug + Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock reading the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Clones share the same reading,
/// so a test can keep one handle while the machine owns the other.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    #[must_use]
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = *now + delta;
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The lifecycle capability a [`Game`](super::Game) depends on. The
/// default implementation is [`GameStateMachine`]; tests may substitute
/// their own to script the session's state.
pub trait StateMachine: fmt::Debug + Send {
    /// Opens the submission window. Calling this again after the machine
    /// has left its initial state has no effect.
    fn start(&mut self);

    /// Re-evaluates the closure rule and returns the (possibly advanced)
    /// current state. This is the only operation that moves the machine
    /// from `InProgress` to `Closed`.
    fn determine_current_state(&mut self) -> GameState;

    /// Asks the machine to close at its next evaluation. The request is
    /// only honored once the session has started; a session cannot skip
    /// straight from `NotStarted` to `Closed`.
    fn request_close(&mut self);

    fn game_is_not_in_progress(&self) -> bool;

    fn game_is_closed(&self) -> bool;
}

/// Default state machine: the session closes when its deadline passes or
/// when a close was requested, whichever the next evaluation sees first.
#[derive(Debug)]
pub struct GameStateMachine {
    state: GameState,
    round_duration: TimeDelta,
    deadline: Option<DateTime<Utc>>,
    close_requested: bool,
    clock: Box<dyn Clock>,
}

impl GameStateMachine {
    #[must_use]
    pub fn new(round_duration: TimeDelta) -> Self {
        Self::with_clock(round_duration, Box::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(round_duration: TimeDelta, clock: Box<dyn Clock>) -> Self {
        Self {
            state: GameState::NotStarted,
            round_duration,
            deadline: None,
            close_requested: false,
            clock,
        }
    }

    /// The state as of the last evaluation, without re-evaluating it.
    #[must_use]
    pub fn current_state(&self) -> GameState {
        self.state
    }

    /// The submission deadline, set when the session starts.
    #[must_use]
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }
}

impl StateMachine for GameStateMachine {
    fn start(&mut self) {
        if self.state != GameState::NotStarted {
            return;
        }
        self.deadline = Some(self.clock.now() + self.round_duration);
        self.state = GameState::InProgress;
    }

    fn determine_current_state(&mut self) -> GameState {
        if self.state == GameState::InProgress {
            let expired = self
                .deadline
                .is_some_and(|deadline| self.clock.now() >= deadline);
            if expired || self.close_requested {
                self.state = GameState::Closed;
            }
        }
        self.state
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn game_is_not_in_progress(&self) -> bool {
        self.state != GameState::InProgress
    }

    fn game_is_closed(&self) -> bool {
        self.state == GameState::Closed
    }
}
