//! SQLite mood and food log.
//!
//! Implements `WellnessDataProvider` for `/summary` and adds the write side
//! used by the `log` CLI commands.

use chrono::{DateTime, SecondsFormat, Utc};
use moodbites_core::wellness::provider::WellnessDataProvider;
use moodbites_types::error::RepositoryError;
use moodbites_types::wellness::{FoodEntry, MealType, MoodEntry, MOOD_MAX, MOOD_MIN};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed mood and food log.
#[derive(Clone)]
pub struct SqliteWellnessRepository {
    pool: DatabasePool,
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct MoodRow {
    id: String,
    mood: i64,
    note: Option<String>,
    created_at: String,
}

impl MoodRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            mood: row.try_get("mood")?,
            note: row.try_get("note")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_entry(self) -> Result<MoodEntry, RepositoryError> {
        let mood = u8::try_from(self.mood)
            .map_err(|_| RepositoryError::Corrupt(format!("mood out of range: {}", self.mood)))?;
        Ok(MoodEntry {
            id: parse_uuid(&self.id)?,
            mood,
            note: self.note,
            timestamp: parse_datetime(&self.created_at)?,
        })
    }
}

struct FoodRow {
    id: String,
    name: String,
    calories: i64,
    meal_type: String,
    created_at: String,
}

impl FoodRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            calories: row.try_get("calories")?,
            meal_type: row.try_get("meal_type")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_entry(self) -> Result<FoodEntry, RepositoryError> {
        let calories = u32::try_from(self.calories).map_err(|_| {
            RepositoryError::Corrupt(format!("calories out of range: {}", self.calories))
        })?;
        let meal_type = self
            .meal_type
            .parse::<MealType>()
            .map_err(RepositoryError::Corrupt)?;
        Ok(FoodEntry {
            id: parse_uuid(&self.id)?,
            name: self.name,
            calories,
            meal_type,
            timestamp: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_uuid(s: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(s).map_err(|e| RepositoryError::Corrupt(format!("invalid id: {e}")))
}

/// Fixed-width RFC 3339 so `ORDER BY created_at` sorts chronologically.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Corrupt(format!("invalid datetime: {e}")))
}

impl SqliteWellnessRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Record a mood score (1..=7) with an optional note.
    pub async fn add_mood_entry(
        &self,
        mood: u8,
        note: Option<String>,
    ) -> Result<MoodEntry, RepositoryError> {
        if !(MOOD_MIN..=MOOD_MAX).contains(&mood) {
            return Err(RepositoryError::Invalid(format!(
                "mood must be between {MOOD_MIN} and {MOOD_MAX}, got {mood}"
            )));
        }
        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let entry = MoodEntry {
            id: Uuid::now_v7(),
            mood,
            note,
            timestamp: Utc::now(),
        };

        sqlx::query("INSERT INTO mood_entries (id, mood, note, created_at) VALUES (?, ?, ?, ?)")
            .bind(entry.id.to_string())
            .bind(i64::from(entry.mood))
            .bind(&entry.note)
            .bind(format_datetime(&entry.timestamp))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(entry)
    }

    /// Record a food eaten at the given meal.
    pub async fn add_food_entry(
        &self,
        name: &str,
        calories: u32,
        meal_type: MealType,
    ) -> Result<FoodEntry, RepositoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::Invalid("food name is empty".to_string()));
        }
        let entry = FoodEntry {
            id: Uuid::now_v7(),
            name: name.to_string(),
            calories,
            meal_type,
            timestamp: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO food_entries (id, name, calories, meal_type, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(entry.id.to_string())
        .bind(&entry.name)
        .bind(i64::from(entry.calories))
        .bind(entry.meal_type.to_string())
        .bind(format_datetime(&entry.timestamp))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(entry)
    }
}

impl WellnessDataProvider for SqliteWellnessRepository {
    async fn mood_entries(&self) -> Result<Vec<MoodEntry>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM mood_entries ORDER BY created_at, id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                MoodRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_entry()
            })
            .collect()
    }

    async fn food_entries(&self) -> Result<Vec<FoodEntry>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM food_entries ORDER BY created_at, id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                FoodRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_entry()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_repo() -> (SqliteWellnessRepository, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::open_in(dir.path()).await.unwrap();
        (SqliteWellnessRepository::new(pool), dir)
    }

    #[tokio::test]
    async fn test_empty_log() {
        let (repo, _dir) = test_repo().await;
        assert!(repo.mood_entries().await.unwrap().is_empty());
        assert!(repo.food_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mood_entries_in_insertion_order() {
        let (repo, _dir) = test_repo().await;
        repo.add_mood_entry(3, None).await.unwrap();
        repo.add_mood_entry(6, Some("  great run  ".to_string()))
            .await
            .unwrap();

        let moods = repo.mood_entries().await.unwrap();
        assert_eq!(moods.len(), 2);
        assert_eq!(moods[0].mood, 3);
        assert!(moods[0].note.is_none());
        assert_eq!(moods[1].note.as_deref(), Some("great run"));
    }

    #[tokio::test]
    async fn test_mood_out_of_range_rejected() {
        let (repo, _dir) = test_repo().await;
        assert!(matches!(
            repo.add_mood_entry(0, None).await,
            Err(RepositoryError::Invalid(_))
        ));
        assert!(matches!(
            repo.add_mood_entry(8, None).await,
            Err(RepositoryError::Invalid(_))
        ));
        assert!(repo.mood_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_food_entries_roundtrip() {
        let (repo, _dir) = test_repo().await;
        let added = repo
            .add_food_entry("Greek yogurt", 150, MealType::Breakfast)
            .await
            .unwrap();

        let foods = repo.food_entries().await.unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].id, added.id);
        assert_eq!(foods[0].name, "Greek yogurt");
        assert_eq!(foods[0].calories, 150);
        assert_eq!(foods[0].meal_type, MealType::Breakfast);
    }

    #[tokio::test]
    async fn test_blank_food_name_rejected() {
        let (repo, _dir) = test_repo().await;
        assert!(matches!(
            repo.add_food_entry("  ", 100, MealType::Snack).await,
            Err(RepositoryError::Invalid(_))
        ));
    }
}
