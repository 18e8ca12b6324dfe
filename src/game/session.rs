//! The session orchestrator: one [`Game`] governs one round of play.
//!
//! A `Game` owns the player roster, the score ledger, and the lifecycle
//! machine, and is the single place where the rules of a round are
//! enforced: who is admitted, when answers may be submitted, that each
//! player is graded at most once, and that results only leave the game
//! after closure. It is deliberately single-threaded; concurrent callers
//! go through the room actor, which owns a `Game` exclusively and
//! serializes access to it.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use thiserror::Error;

use super::entities::{
    Answer, Category, DEFAULT_SECONDS_PER_QUESTION, Player, PlayerId, Question, Score, Username,
};
use super::scoring::{CorrectCountBuilder, ScoreBuilder, rank_scores};
use super::state_machine::{GameState, GameStateMachine, StateMachine};
use chrono::TimeDelta;

/// Errors that can occur during a round. All of them are recoverable by
/// the caller and are surfaced verbatim by the room layer.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("can't play a game with {supplied} questions")]
    InvalidQuestionCount { supplied: usize },
    #[error("answers can only be submitted while the game is in progress")]
    AnswerSubmissionOutOfWindow,
    #[error("scores can't be checked until the game is closed")]
    ScoresNotYetAvailable,
}

/// Events that occur during a round
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    PlayerJoined(Username),
    GameStarted,
    AnswersScored {
        player: Username,
        correct_count: usize,
    },
    GameClosed,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PlayerJoined(username) => format!("{username} joined the game"),
            Self::GameStarted => "the game has started".to_string(),
            Self::AnswersScored {
                player,
                correct_count,
            } => format!("{player} scored {correct_count} correct"),
            Self::GameClosed => "the game is closed".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// Game configuration settings
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameSettings {
    /// Answer-time budget per question; the round deadline is this times
    /// the question count.
    pub seconds_per_question: u32,
    /// Optional upper bound on the question count. The lower bound of one
    /// question is not configurable.
    pub max_questions: Option<usize>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(DEFAULT_SECONDS_PER_QUESTION, None)
    }
}

impl GameSettings {
    #[must_use]
    pub const fn new(seconds_per_question: u32, max_questions: Option<usize>) -> Self {
        Self {
            seconds_per_question,
            max_questions,
        }
    }

    #[must_use]
    pub fn round_duration(&self, question_count: usize) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.seconds_per_question) * question_count as i64)
    }
}

/// One round of play over a fixed question sequence.
#[derive(Debug)]
pub struct Game {
    category: Category,
    questions: Vec<Question>,
    players: Vec<Player>,
    graded: HashSet<PlayerId>,
    scores: Vec<Score>,
    state_machine: Box<dyn StateMachine>,
    score_builder: Box<dyn ScoreBuilder>,
    events: VecDeque<GameEvent>,
}

impl Game {
    /// Creates a game with default settings over the given questions.
    pub fn new(category: Category, questions: Vec<Question>) -> Result<Self, GameError> {
        Self::with_settings(category, questions, GameSettings::default())
    }

    /// Creates a game with the default state machine and grader, with the
    /// round deadline derived from the settings.
    pub fn with_settings(
        category: Category,
        questions: Vec<Question>,
        settings: GameSettings,
    ) -> Result<Self, GameError> {
        if let Some(max) = settings.max_questions
            && questions.len() > max
        {
            return Err(GameError::InvalidQuestionCount {
                supplied: questions.len(),
            });
        }
        let round_duration = settings.round_duration(questions.len());
        Self::with_parts(
            category,
            questions,
            Box::new(GameStateMachine::new(round_duration)),
            Box::new(CorrectCountBuilder),
        )
    }

    /// Creates a game from explicit lifecycle and grading capabilities.
    /// This is the injection seam: production code goes through
    /// [`Game::new`]/[`Game::with_settings`], tests may substitute either
    /// capability.
    pub fn with_parts(
        category: Category,
        questions: Vec<Question>,
        state_machine: Box<dyn StateMachine>,
        score_builder: Box<dyn ScoreBuilder>,
    ) -> Result<Self, GameError> {
        if questions.is_empty() {
            return Err(GameError::InvalidQuestionCount { supplied: 0 });
        }
        Ok(Self {
            category,
            questions,
            players: Vec::new(),
            graded: HashSet::new(),
            scores: Vec::new(),
            state_machine,
            score_builder,
            events: VecDeque::new(),
        })
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The roster in join order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Number of players graded so far.
    #[must_use]
    pub fn scored_count(&self) -> usize {
        self.scores.len()
    }

    /// Re-evaluates and returns the lifecycle state.
    pub fn current_state(&mut self) -> GameState {
        self.state_machine.determine_current_state()
    }

    /// Admits a player to the roster. Re-adding a player who is already
    /// admitted has no effect.
    pub fn add_player(&mut self, player: Player) {
        if self.players.contains(&player) {
            return;
        }
        self.events
            .push_back(GameEvent::PlayerJoined(player.name.clone()));
        self.players.push(player);
    }

    /// Opens the submission window. Starting a game that already left its
    /// initial state has no effect.
    pub fn start(&mut self) {
        if self.state_machine.determine_current_state() != GameState::NotStarted {
            return;
        }
        self.state_machine.start();
        self.events.push_back(GameEvent::GameStarted);
    }

    /// Grades one player's submitted batch. Fails unless the submission
    /// window is open; a batch from an already-graded player is accepted
    /// and ignored, so client retransmissions are harmless.
    pub fn evaluate_answers(
        &mut self,
        player: &Player,
        answers: &[Answer],
    ) -> Result<(), GameError> {
        self.state_machine.determine_current_state();
        if self.state_machine.game_is_not_in_progress() {
            return Err(GameError::AnswerSubmissionOutOfWindow);
        }
        if !self.graded.insert(player.id) {
            // retransmission of an already-graded batch
            return Ok(());
        }
        let score = self.score_builder.build(player, answers);
        self.events.push_back(GameEvent::AnswersScored {
            player: player.name.clone(),
            correct_count: score.correct_count,
        });
        self.scores.push(score);
        Ok(())
    }

    /// Returns the ranked results. Fails until the lifecycle machine
    /// reports the game closed. Ranking is a pure recomputation over the
    /// ledger, so repeated calls return the same standings.
    pub fn check_scores(&mut self) -> Result<Vec<Score>, GameError> {
        self.state_machine.determine_current_state();
        if !self.state_machine.game_is_closed() {
            return Err(GameError::ScoresNotYetAvailable);
        }
        Ok(rank_scores(&self.scores))
    }

    /// Ends the round ahead of its deadline. The machine only honors the
    /// request once the game has started; a game that never started stays
    /// in its initial state.
    pub fn close(&mut self) {
        if self.state_machine.game_is_closed() {
            return;
        }
        self.state_machine.request_close();
        if self.state_machine.determine_current_state() == GameState::Closed {
            self.events.push_back(GameEvent::GameClosed);
        }
    }

    /// Drains the events queued since the last call, oldest first.
    pub fn drain_events(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
