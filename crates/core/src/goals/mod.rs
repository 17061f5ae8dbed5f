//! Goals module - domain models, the goal store service, and traits.

mod goals_model;
mod goals_service;
mod goals_traits;


pub use goals_model::{
    clamp_amount, normalize_title, Goal, GoalCategory, GoalPriority, GoalUpdate, GoalsSummary,
    NewGoal,
};
pub use goals_service::{GoalService, GoalServiceConfig};
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
