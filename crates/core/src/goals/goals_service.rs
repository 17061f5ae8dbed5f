use async_trait::async_trait;
use log::{debug, error, info, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::constants::{
    COMPLETION_NOTIFICATION_DELAY, DEFAULT_GOALS_STORAGE_KEY, DISPLAY_DECIMAL_PRECISION,
};
use crate::errors::{Error, Result, ValidationError};
use crate::goals::goals_model::{
    clamp_amount, normalize_title, Goal, GoalCategory, GoalPriority, GoalUpdate, GoalsSummary,
    NewGoal,
};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::notifications::NotificationSink;
use crate::utils::time_utils::Clock;

/// Settings for a goal store instance.
#[derive(Debug, Clone)]
pub struct GoalServiceConfig {
    /// Persistence slot holding the goal collection.
    pub storage_key: String,
    /// How long the goal-completed notification waits behind the progress notification.
    pub completion_notification_delay: Duration,
}

impl Default for GoalServiceConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_GOALS_STORAGE_KEY.to_string(),
            completion_notification_delay: COMPLETION_NOTIFICATION_DELAY,
        }
    }
}

/// The goal store: owns the goal collection and exposes every operation on it.
///
/// Mutations are serialized through `write_lock`, which is held from the
/// initial read until the repository has saved the new collection. The
/// in-memory list is only replaced after a successful save, so readers never
/// see unsaved state.
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
    notifier: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    config: GoalServiceConfig,
    goals: RwLock<Vec<Goal>>,
    write_lock: Mutex<()>,
    loading: AtomicBool,
}

impl GoalService {
    /// Creates a store seeded with the collection found in the configured slot.
    pub fn new(
        repository: Arc<dyn GoalRepositoryTrait>,
        notifier: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
        config: GoalServiceConfig,
    ) -> Result<Self> {
        let goals = repository.load_goals(&config.storage_key)?;
        info!(
            "Goal store initialised with {} goals from slot '{}'",
            goals.len(),
            config.storage_key
        );
        Ok(GoalService {
            repository,
            notifier,
            clock,
            config,
            goals: RwLock::new(goals),
            write_lock: Mutex::new(()),
            loading: AtomicBool::new(false),
        })
    }

    fn read_goals<F>(&self, filter: F) -> Result<Vec<Goal>>
    where
        F: Fn(&Goal) -> bool,
    {
        let goals = self.goals.read().map_err(|_| poisoned())?;
        Ok(goals.iter().filter(|&g| filter(g)).cloned().collect())
    }

    /// Saves `goals` through the repository, then makes them the current state.
    async fn commit(&self, goals: Vec<Goal>) -> Result<()> {
        debug!(
            "Saving {} goals to slot '{}'",
            goals.len(),
            self.config.storage_key
        );
        if let Err(e) = self
            .repository
            .save_goals(&self.config.storage_key, goals.clone())
            .await
        {
            error!("Failed to save goals: {}", e);
            return Err(e);
        }
        let mut current = self.goals.write().map_err(|_| poisoned())?;
        *current = goals;
        Ok(())
    }

    /// Emits the outcome of an operation and hands the result back to the caller.
    fn report<T>(&self, operation: &str, result: Result<T>, success_message: &str) -> Result<T> {
        match &result {
            Ok(_) => self.notifier.notify_success(success_message),
            Err(e) => {
                warn!("Goal {} rejected: {}", operation, e);
                self.notifier.notify_failure(&e.to_string());
            }
        }
        result
    }

    async fn try_create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        let _writer = self.write_lock.lock().await;
        let _loading = LoadingGuard::start(&self.loading);

        let today = self.clock.today();
        new_goal.validate(today)?;

        let mut goals = self.read_goals(|_| true)?;
        ensure_unique_title(&goals, &new_goal.title, None)?;

        let goal = new_goal.into_goal(Uuid::new_v4().to_string(), today)?;
        goals.insert(0, goal.clone());
        self.commit(goals).await?;

        debug!("Created goal {} ('{}')", goal.id, goal.title);
        Ok(goal)
    }

    async fn try_update_goal(&self, goal_id: &str, goal_update: GoalUpdate) -> Result<Goal> {
        let _writer = self.write_lock.lock().await;
        let _loading = LoadingGuard::start(&self.loading);

        let mut goals = self.read_goals(|_| true)?;
        let index = position_of(&goals, goal_id)?;

        goal_update.validate(self.clock.today())?;
        if goal_update.title.is_some() || goal_update.is_active == Some(true) {
            let title = goal_update
                .title
                .as_deref()
                .unwrap_or(&goals[index].title);
            ensure_unique_title(&goals, title, Some(goal_id))?;
        }

        goal_update.apply_to(&mut goals[index]);
        let updated = goals[index].clone();
        self.commit(goals).await?;

        debug!("Updated goal {}", goal_id);
        Ok(updated)
    }

    async fn try_delete_goal(&self, goal_id: &str) -> Result<()> {
        let _writer = self.write_lock.lock().await;
        let _loading = LoadingGuard::start(&self.loading);

        let mut goals = self.read_goals(|_| true)?;
        let index = position_of(&goals, goal_id)?;
        let removed = goals.remove(index);
        self.commit(goals).await?;

        debug!("Deleted goal {} ('{}')", removed.id, removed.title);
        Ok(())
    }

    /// Returns the updated goal and whether this adjustment completed it.
    async fn try_adjust_progress(&self, goal_id: &str, delta: Decimal) -> Result<(Goal, bool)> {
        let _writer = self.write_lock.lock().await;
        let _loading = LoadingGuard::start(&self.loading);

        let mut goals = self.read_goals(|_| true)?;
        let index = position_of(&goals, goal_id)?;
        if delta.is_zero() {
            return Err(Error::zero_progress_amount());
        }

        let goal = &mut goals[index];
        let previous_amount = goal.current_amount;
        let adjusted = previous_amount
            .checked_add(delta)
            .ok_or_else(Error::progress_amount_too_large)?;
        goal.current_amount = clamp_amount(adjusted);
        let completed_now =
            previous_amount < goal.target_amount && goal.target_amount <= goal.current_amount;
        let updated = goal.clone();
        self.commit(goals).await?;

        debug!(
            "Adjusted goal {} progress from {} to {}",
            goal_id, previous_amount, updated.current_amount
        );
        Ok((updated, completed_now))
    }

    /// Sends the goal-completed message on its own task after the configured delay.
    fn schedule_completion_notification(&self, goal: &Goal) {
        let notifier = Arc::clone(&self.notifier);
        let delay = self.config.completion_notification_delay;
        let message = format!("Congratulations! You completed your goal: {}", goal.title);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            notifier.notify_success(&message);
        });
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self) -> Result<Vec<Goal>> {
        self.read_goals(|_| true)
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        self.read_goals(|g| g.id == goal_id)?
            .pop()
            .ok_or_else(Error::goal_not_found)
    }

    fn get_active_goals(&self) -> Result<Vec<Goal>> {
        self.read_goals(|g| g.is_active)
    }

    fn get_completed_goals(&self) -> Result<Vec<Goal>> {
        self.read_goals(Goal::is_completed)
    }

    fn get_goals_by_category(&self, category: GoalCategory) -> Result<Vec<Goal>> {
        self.read_goals(|g| g.category == category)
    }

    fn get_goals_by_priority(&self, priority: GoalPriority) -> Result<Vec<Goal>> {
        self.read_goals(|g| g.priority == priority)
    }

    fn get_goal_progress(&self, goal_id: &str) -> Decimal {
        self.get_goal(goal_id)
            .map(|g| g.progress_percentage())
            .unwrap_or(Decimal::ZERO)
    }

    fn get_goals_summary(&self) -> Result<GoalsSummary> {
        let goals = self.goals.read().map_err(|_| poisoned())?;
        Ok(GoalsSummary::from_goals(&goals))
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        debug!("Creating goal '{}'", new_goal.title.trim());
        let result = self.try_create_goal(new_goal).await;
        self.report("create", result, "Goal created successfully")
    }

    async fn update_goal(&self, goal_id: &str, goal_update: GoalUpdate) -> Result<Goal> {
        debug!("Updating goal {}", goal_id);
        let result = self.try_update_goal(goal_id, goal_update).await;
        self.report("update", result, "Goal updated successfully")
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        debug!("Deleting goal {}", goal_id);
        let result = self.try_delete_goal(goal_id).await;
        self.report("delete", result, "Goal deleted successfully")
    }

    async fn adjust_progress(&self, goal_id: &str, delta: Decimal) -> Result<Goal> {
        debug!("Adjusting goal {} progress by {}", goal_id, delta);
        match self.try_adjust_progress(goal_id, delta).await {
            Ok((goal, completed_now)) => {
                let direction = if delta > Decimal::ZERO {
                    "added to"
                } else {
                    "subtracted from"
                };
                self.notifier.notify_success(&format!(
                    "{} {} {}",
                    format_amount(delta.abs()),
                    direction,
                    goal.title
                ));
                if completed_now {
                    self.schedule_completion_notification(&goal);
                }
                Ok(goal)
            }
            Err(e) => self.report("progress update", Err(e), ""),
        }
    }
}

/// Clears the loading flag when a mutation ends, however it ends.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        LoadingGuard(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

fn position_of(goals: &[Goal], goal_id: &str) -> Result<usize> {
    goals
        .iter()
        .position(|g| g.id == goal_id)
        .ok_or_else(Error::goal_not_found)
}

/// Rejects `title` if an active goal other than `exclude_id` already uses it.
fn ensure_unique_title(
    goals: &[Goal],
    title: &str,
    exclude_id: Option<&str>,
) -> std::result::Result<(), ValidationError> {
    let normalized = normalize_title(title);
    let taken = goals.iter().any(|g| {
        g.is_active && Some(g.id.as_str()) != exclude_id && g.normalized_title() == normalized
    });
    if taken {
        Err(ValidationError::DuplicateTitle)
    } else {
        Ok(())
    }
}

fn format_amount(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

fn poisoned() -> Error {
    Error::Unexpected("goal state lock poisoned".to_string())
}
