use std::time::Duration;

/// Local storage slot holding the serialized goal collection
pub const DEFAULT_GOALS_STORAGE_KEY: &str = "financial-goals";

/// Delay before the goal-completed notification follows the progress notification
pub const COMPLETION_NOTIFICATION_DELAY: Duration = Duration::from_millis(1000);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
