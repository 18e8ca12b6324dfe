//! Turning submitted answer batches into scores and ranking a finished
//! ledger for display.

use std::fmt;

use super::entities::{Answer, Player, Score};

/// The grading capability a [`Game`](super::Game) depends on. The default
/// implementation is [`CorrectCountBuilder`].
pub trait ScoreBuilder: fmt::Debug + Send {
    /// Builds a score from one player's submitted batch. Pure: no side
    /// effects, and the cross-score `is_highest` flag is left unset.
    fn build(&self, player: &Player, answers: &[Answer]) -> Score;
}

/// Default grader: one point per correct answer.
#[derive(Clone, Copy, Debug, Default)]
pub struct CorrectCountBuilder;

impl ScoreBuilder for CorrectCountBuilder {
    fn build(&self, player: &Player, answers: &[Answer]) -> Score {
        let correct_count = answers.iter().filter(|answer| answer.is_correct).count();
        Score::new(player.clone(), correct_count)
    }
}

/// Ranks a ledger for display: descending by correct count, stable with
/// respect to grading order, and with the single top entry flagged as
/// highest. Ties keep their grading order, so among players sharing the
/// maximum the one graded first carries the flag.
#[must_use]
pub fn rank_scores(ledger: &[Score]) -> Vec<Score> {
    let mut ranked = ledger.to_vec();
    ranked.sort_by(|a, b| b.correct_count.cmp(&a.correct_count));
    for score in &mut ranked {
        score.is_highest = false;
    }
    if let Some(top) = ranked.first_mut() {
        top.is_highest = true;
    }
    ranked
}
