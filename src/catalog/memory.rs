//! In-memory catalog implementation.

use super::{Catalog, CatalogError};
use crate::game::entities::{Category, CategoryId, Question};
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use std::collections::HashMap;

/// Seed entry pairing a category with its question bank.
#[derive(Deserialize)]
struct CategorySeed {
    #[serde(flatten)]
    category: Category,
    questions: Vec<Question>,
}

/// A catalog held entirely in memory, seeded programmatically or from a
/// JSON document of the form:
///
/// ```json
/// [
///   {
///     "id": 1,
///     "name": "World History",
///     "description": "",
///     "image_url": "",
///     "questions": [
///       { "id": 10, "category_id": 1, "prompt": "..." }
///     ]
///   }
/// ]
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    categories: HashMap<CategoryId, Category>,
    questions: HashMap<CategoryId, Vec<Question>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category and its question bank, replacing any previous entry
    /// with the same id.
    #[must_use]
    pub fn with_category(mut self, category: Category, questions: Vec<Question>) -> Self {
        self.questions.insert(category.id, questions);
        self.categories.insert(category.id, category);
        self
    }

    /// Build a catalog from a JSON seed document.
    pub fn from_json(data: &str) -> Result<Self, CatalogError> {
        let seeds: Vec<CategorySeed> = serde_json::from_str(data)?;
        Ok(seeds.into_iter().fold(Self::new(), |catalog, seed| {
            catalog.with_category(seed.category, seed.questions)
        }))
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn category(&self, id: CategoryId) -> Result<Category, CatalogError> {
        self.categories
            .get(&id)
            .cloned()
            .ok_or(CatalogError::UnknownCategory(id))
    }

    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let mut all: Vec<Category> = self.categories.values().cloned().collect();
        all.sort_by_key(|category| category.id);
        Ok(all)
    }

    async fn draw_questions(
        &self,
        id: CategoryId,
        count: usize,
    ) -> Result<Vec<Question>, CatalogError> {
        let bank = self
            .questions
            .get(&id)
            .ok_or(CatalogError::UnknownCategory(id))?;
        if bank.len() < count {
            return Err(CatalogError::NotEnoughQuestions {
                category: id,
                requested: count,
                available: bank.len(),
            });
        }
        let mut rng = rand::rng();
        Ok(bank.choose_multiple(&mut rng, count).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryCatalog {
        let questions = (0..12)
            .map(|i| Question::new(i, 1, &format!("question {i}")))
            .collect();
        InMemoryCatalog::new().with_category(Category::new(1, "World History"), questions)
    }

    #[tokio::test]
    async fn test_category_lookup() {
        let catalog = seeded();
        let category = catalog.category(1).await.unwrap();
        assert_eq!(category.name, "World History");
        assert!(matches!(
            catalog.category(9).await,
            Err(CatalogError::UnknownCategory(9))
        ));
    }

    #[tokio::test]
    async fn test_draw_returns_distinct_questions() {
        let catalog = seeded();
        let drawn = catalog.draw_questions(1, 10).await.unwrap();
        assert_eq!(drawn.len(), 10);
        let mut ids: Vec<_> = drawn.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[tokio::test]
    async fn test_draw_rejects_oversized_requests() {
        let catalog = seeded();
        assert!(matches!(
            catalog.draw_questions(1, 50).await,
            Err(CatalogError::NotEnoughQuestions {
                requested: 50,
                available: 12,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_from_json_seed() {
        let seed = r#"[
            {
                "id": 3,
                "name": "Geography",
                "description": "capitals and coastlines",
                "image_url": "",
                "questions": [
                    { "id": 30, "category_id": 3, "prompt": "Capital of Peru?" },
                    { "id": 31, "category_id": 3, "prompt": "Longest river?" }
                ]
            }
        ]"#;
        let catalog = InMemoryCatalog::from_json(seed).unwrap();
        assert_eq!(catalog.categories().await.unwrap().len(), 1);
        assert_eq!(catalog.draw_questions(3, 2).await.unwrap().len(), 2);
    }
}
