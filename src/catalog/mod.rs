//! Read-only access to quiz content.
//!
//! The game core never owns categories or questions; it consumes them
//! through the narrow [`Catalog`] interface. Production deployments back
//! this with whatever store holds the question bank; the bundled
//! [`InMemoryCatalog`] serves tests and small self-contained setups.

use crate::game::entities::{Category, CategoryId, Question};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;

pub use memory::InMemoryCatalog;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No category with this id exists
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),

    /// The category holds fewer questions than were requested
    #[error("category {category} has {available} questions, {requested} requested")]
    NotEnoughQuestions {
        category: CategoryId,
        requested: usize,
        available: usize,
    },

    /// Seed data could not be parsed
    #[error("malformed catalog data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Supplier of categories and question draws.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Look a category up by id.
    async fn category(&self, id: CategoryId) -> Result<Category, CatalogError>;

    /// All categories, ordered by id.
    async fn categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Draw `count` distinct questions from a category. The returned
    /// order becomes the fixed question sequence of a round.
    async fn draw_questions(
        &self,
        id: CategoryId,
        count: usize,
    ) -> Result<Vec<Question>, CatalogError>;
}
