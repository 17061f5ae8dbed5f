use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::db::{DbPool, WriteHandle};
use crate::local_storage::LocalStorageRepository;
use goaltrack_core::goals::{Goal, GoalRepositoryTrait};
use goaltrack_core::Result;

/// Stores the goal collection as a JSON array in a local storage slot.
pub struct GoalRepository {
    storage: LocalStorageRepository,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository {
            storage: LocalStorageRepository::new(pool, writer),
        }
    }

    pub fn from_storage(storage: LocalStorageRepository) -> Self {
        GoalRepository { storage }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self, storage_key: &str) -> Result<Vec<Goal>> {
        match self.storage.get_item(storage_key)? {
            Some(json) => {
                let goals: Vec<Goal> = serde_json::from_str(&json)?;
                debug!("Loaded {} goals from slot '{}'", goals.len(), storage_key);
                Ok(goals)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn save_goals(&self, storage_key: &str, goals: Vec<Goal>) -> Result<()> {
        let json = serde_json::to_string(&goals)?;
        self.storage.set_item(storage_key, json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init, run_migrations, spawn_writer};
    use chrono::NaiveDate;
    use goaltrack_core::errors::{DatabaseError, Error};
    use goaltrack_core::goals::{GoalCategory, GoalPriority};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (GoalRepository, LocalStorageRepository, tempfile::TempDir)
    {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path_str = temp_dir.path().join("test.db").to_string_lossy().to_string();

        init(&db_path_str).expect("Failed to init database");
        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone()).expect("Failed to spawn writer");

        let storage = LocalStorageRepository::new(pool, writer);
        (GoalRepository::from_storage(storage.clone()), storage, temp_dir)
    }

    fn create_test_goal(id: &str, title: &str) -> Goal {
        Goal {
            id: id.to_string(),
            title: title.to_string(),
            description: "Test goal".to_string(),
            target_amount: dec!(1500.75),
            current_amount: dec!(0.10),
            target_date: NaiveDate::from_ymd_opt(2027, 8, 31).unwrap(),
            category: GoalCategory::Education,
            priority: GoalPriority::High,
            is_active: true,
            created_at: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_empty_slot_loads_no_goals() {
        let (repo, _storage, _dir) = create_test_repository().await;
        assert!(repo.load_goals("financial-goals").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let (repo, _storage, _dir) = create_test_repository().await;
        let goals = vec![
            create_test_goal("g2", "Course"),
            create_test_goal("g1", "Laptop"),
        ];

        repo.save_goals("financial-goals", goals.clone())
            .await
            .unwrap();

        assert_eq!(repo.load_goals("financial-goals").unwrap(), goals);
    }

    #[tokio::test]
    async fn test_save_replaces_whole_collection() {
        let (repo, _storage, _dir) = create_test_repository().await;
        repo.save_goals("financial-goals", vec![create_test_goal("g1", "Laptop")])
            .await
            .unwrap();
        repo.save_goals("financial-goals", Vec::new()).await.unwrap();

        assert!(repo.load_goals("financial-goals").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_slots_are_independent() {
        let (repo, _storage, _dir) = create_test_repository().await;
        repo.save_goals("profile-a", vec![create_test_goal("g1", "Laptop")])
            .await
            .unwrap();

        assert!(repo.load_goals("profile-b").unwrap().is_empty());
        assert_eq!(repo.load_goals("profile-a").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_slot_is_a_serialization_error() {
        let (repo, storage, _dir) = create_test_repository().await;
        storage
            .set_item("financial-goals", "not json".to_string())
            .await
            .unwrap();

        let result = repo.load_goals("financial-goals");
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::Serialization(_)))
        ));
    }
}
