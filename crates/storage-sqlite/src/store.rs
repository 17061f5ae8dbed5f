//! Wires a `GoalService` to SQLite local storage.

use log::info;
use std::sync::Arc;

use crate::config::StorageConfig;
use crate::db::{create_pool, init, run_migrations, spawn_writer};
use crate::goals::GoalRepository;
use goaltrack_core::goals::GoalService;
use goaltrack_core::notifications::NotificationSink;
use goaltrack_core::utils::time_utils::Clock;
use goaltrack_core::Result;

/// Opens the database, applies migrations, and loads the goal store from its slot.
///
/// Must be called from within a Tokio runtime, which hosts the writer actor.
pub fn open_goal_store(
    config: &StorageConfig,
    notifier: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
) -> Result<GoalService> {
    init(&config.db_path)?;
    let pool = create_pool(&config.db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone())?;

    let repository = Arc::new(GoalRepository::new(pool, writer));
    let service = GoalService::new(repository, notifier, clock, config.goal_service_config())?;
    info!("Goal store ready at {}", config.db_path);
    Ok(service)
}
