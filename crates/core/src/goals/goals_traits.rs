use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalCategory, GoalPriority, GoalUpdate, GoalsSummary, NewGoal};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Persistence port for the goal collection.
///
/// Goals live in a single named slot; every save writes the complete collection.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Loads the collection stored under `storage_key`. A missing slot yields an empty list.
    fn load_goals(&self, storage_key: &str) -> Result<Vec<Goal>>;

    /// Replaces the collection stored under `storage_key`.
    async fn save_goals(&self, storage_key: &str, goals: Vec<Goal>) -> Result<()>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;
    fn get_active_goals(&self) -> Result<Vec<Goal>>;
    fn get_completed_goals(&self) -> Result<Vec<Goal>>;
    fn get_goals_by_category(&self, category: GoalCategory) -> Result<Vec<Goal>>;
    fn get_goals_by_priority(&self, priority: GoalPriority) -> Result<Vec<Goal>>;
    fn get_goal_progress(&self, goal_id: &str) -> Decimal;
    fn get_goals_summary(&self) -> Result<GoalsSummary>;
    fn is_loading(&self) -> bool;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_id: &str, goal_update: GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, goal_id: &str) -> Result<()>;
    async fn adjust_progress(&self, goal_id: &str, delta: Decimal) -> Result<Goal>;
}
