//! Read-only access to the user's mood and food log.
//!
//! The assistant never writes or validates this data; `/summary` reads it
//! through this trait. The SQLite implementation lives in moodbites-infra.

use moodbites_types::error::RepositoryError;
use moodbites_types::wellness::{FoodEntry, MoodEntry};

/// Trait for reading logged mood and food entries.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait WellnessDataProvider: Send + Sync {
    /// All mood entries, oldest first.
    fn mood_entries(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MoodEntry>, RepositoryError>> + Send;

    /// All food entries, oldest first.
    fn food_entries(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<FoodEntry>, RepositoryError>> + Send;
}

/// Fixed in-memory log.
#[derive(Debug, Clone, Default)]
pub struct StaticWellnessData {
    pub moods: Vec<MoodEntry>,
    pub foods: Vec<FoodEntry>,
}

impl WellnessDataProvider for StaticWellnessData {
    async fn mood_entries(&self) -> Result<Vec<MoodEntry>, RepositoryError> {
        Ok(self.moods.clone())
    }

    async fn food_entries(&self) -> Result<Vec<FoodEntry>, RepositoryError> {
        Ok(self.foods.clone())
    }
}
