//! Storage configuration resolved from the environment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::db::get_db_path;
use goaltrack_core::constants::{COMPLETION_NOTIFICATION_DELAY, DEFAULT_GOALS_STORAGE_KEY};
use goaltrack_core::goals::GoalServiceConfig;

/// Environment variable overriding the goals slot name.
pub const GOALS_KEY_ENV: &str = "GOALTRACK_GOALS_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    /// SQLite database file.
    pub db_path: String,
    /// Slot holding the goal collection.
    pub goals_storage_key: String,
    /// Delay of the goal-completed notification, in milliseconds.
    pub completion_notification_delay_ms: u64,
}

impl StorageConfig {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            goals_storage_key: DEFAULT_GOALS_STORAGE_KEY.to_string(),
            completion_notification_delay_ms: COMPLETION_NOTIFICATION_DELAY.as_millis() as u64,
        }
    }

    /// Builds the configuration for an application data directory.
    ///
    /// `DATABASE_URL` overrides the database location and
    /// `GOALTRACK_GOALS_KEY` overrides the slot name.
    pub fn from_env(app_data_dir: &str) -> Self {
        let mut config = Self::new(get_db_path(app_data_dir));
        if let Ok(key) = std::env::var(GOALS_KEY_ENV) {
            if !key.trim().is_empty() {
                config.goals_storage_key = key.trim().to_string();
            }
        }
        config
    }

    pub fn goal_service_config(&self) -> GoalServiceConfig {
        GoalServiceConfig {
            storage_key: self.goals_storage_key.clone(),
            completion_notification_delay: Duration::from_millis(
                self.completion_notification_delay_ms,
            ),
        }
    }
}
