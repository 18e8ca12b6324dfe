use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// Hard cap applied to player-supplied display names.
pub const MAX_USERNAME_LENGTH: usize = 32;

// A standard round draws 10 questions; with the default 30 second
// answer budget per question that makes a 5 minute game.
pub const DEFAULT_QUESTIONS_PER_GAME: usize = 10;
pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 30;

/// Type alias for category identifiers issued by the catalog.
pub type CategoryId = u64;

/// Type alias for question identifiers issued by the catalog.
pub type QuestionId = u64;

/// Type alias for player identifiers issued by the identity provider.
pub type PlayerId = u64;

/// A quiz category as supplied by the catalog. Read-only to the game
/// core; games never mutate catalog content.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl Category {
    #[must_use]
    pub fn new(id: CategoryId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: String::new(),
            image_url: String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// A single question belonging to exactly one category. The game core
/// only counts questions and passes them through; answer options and
/// their presentation live with the catalog.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub category_id: CategoryId,
    pub prompt: String,
}

impl Question {
    #[must_use]
    pub fn new(id: QuestionId, category_id: CategoryId, prompt: &str) -> Self {
        Self {
            id,
            category_id,
            prompt: prompt.to_string(),
        }
    }
}

/// One submitted answer for one question. The calling layer resolves the
/// chosen option against the catalog; the core only needs the verdict.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub is_correct: bool,
}

impl Answer {
    #[must_use]
    pub const fn correct(question_id: QuestionId) -> Self {
        Self {
            question_id,
            is_correct: true,
        }
    }

    #[must_use]
    pub const fn incorrect(question_id: QuestionId) -> Self {
        Self {
            question_id,
            is_correct: false,
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Username(String);

impl Username {
    pub fn new(s: &str) -> Self {
        let username: String = s
            .chars()
            .map(|c| if c.is_ascii_whitespace() { '_' } else { c })
            .take(MAX_USERNAME_LENGTH)
            .collect();
        Self(username)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// An identity handle for one participant. Two handles refer to the same
/// player exactly when their ids match; the display name is carried along
/// for events and score listings only.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: Username,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: &str) -> Self {
        Self {
            id,
            name: Username::new(name),
        }
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// One player's result for one game. `is_highest` is a property of the
/// whole score set and is only resolved while ranking a closed game;
/// freshly built scores always carry `false`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Score {
    pub player: Player,
    pub correct_count: usize,
    pub is_highest: bool,
}

impl Score {
    #[must_use]
    pub fn new(player: Player, correct_count: usize) -> Self {
        Self {
            player,
            correct_count,
            is_highest: false,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = if self.is_highest {
            format!("{}: {} correct (highest)", self.player, self.correct_count)
        } else {
            format!("{}: {} correct", self.player, self.correct_count)
        };
        write!(f, "{repr}")
    }
}
