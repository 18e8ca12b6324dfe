//! Room configuration models.

use crate::game::{
    GameError, GameSettings,
    entities::{CategoryId, DEFAULT_QUESTIONS_PER_GAME},
};
use serde::{Deserialize, Serialize};

/// Room configuration
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RoomConfig {
    /// Room name
    pub name: String,

    /// Category the round draws its questions from
    pub category_id: CategoryId,

    /// How many questions to draw
    pub question_count: usize,

    /// Timing and bounds handed to the game
    pub settings: GameSettings,
}

impl RoomConfig {
    #[must_use]
    pub fn new(name: &str, category_id: CategoryId) -> Self {
        Self {
            name: name.to_string(),
            category_id,
            question_count: DEFAULT_QUESTIONS_PER_GAME,
            settings: GameSettings::default(),
        }
    }

    /// Validate configuration before a game is built from it.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.question_count == 0 {
            return Err(GameError::InvalidQuestionCount { supplied: 0 });
        }
        if let Some(max) = self.settings.max_questions
            && self.question_count > max
        {
            return Err(GameError::InvalidQuestionCount {
                supplied: self.question_count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RoomConfig::new("trivia night", 1).validate().is_ok());
    }

    #[test]
    fn test_zero_questions_is_rejected() {
        let mut config = RoomConfig::new("trivia night", 1);
        config.question_count = 0;
        assert_eq!(
            config.validate(),
            Err(GameError::InvalidQuestionCount { supplied: 0 })
        );
    }

    #[test]
    fn test_question_cap_is_enforced() {
        let mut config = RoomConfig::new("trivia night", 1);
        config.question_count = 25;
        config.settings.max_questions = Some(10);
        assert_eq!(
            config.validate(),
            Err(GameError::InvalidQuestionCount { supplied: 25 })
        );
    }
}
