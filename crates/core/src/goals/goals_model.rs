//! Goals domain models.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::ValidationError;
use crate::utils::time_utils::{days_between, whole_months_between};

/// What a goal is saving for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Emergency,
    Vacation,
    House,
    Car,
    Education,
    Retirement,
    Investment,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: NaiveDate,
    pub category: GoalCategory,
    pub priority: GoalPriority,
    pub is_active: bool,
    pub created_at: NaiveDate,
}

impl Goal {
    /// A goal is completed once the saved amount reaches the target.
    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Saved amount as a percentage of the target. Not capped at 100.
    ///
    /// Returns zero when the target is zero and saturates at `Decimal::MAX`.
    pub fn progress_percentage(&self) -> Decimal {
        percentage_of(self.current_amount, self.target_amount)
    }

    /// Amount still missing to reach the target, never negative.
    pub fn remaining_amount(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    /// Days left until the target date; negative once the date has passed.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        days_between(today, self.target_date)
    }

    /// Monthly saving required to hit the target on time.
    ///
    /// The remaining amount is spread over the whole months left, counting at
    /// least one month, and rounded to display precision.
    pub fn monthly_contribution_needed(&self, today: NaiveDate) -> Decimal {
        let months = whole_months_between(today, self.target_date).max(1);
        (self.remaining_amount() / Decimal::from(months)).round_dp_with_strategy(
            DISPLAY_DECIMAL_PRECISION,
            RoundingStrategy::MidpointAwayFromZero,
        )
    }

    pub(crate) fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target_amount: Option<Decimal>,
    #[serde(default)]
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub category: GoalCategory,
    #[serde(default)]
    pub priority: GoalPriority,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl NewGoal {
    /// Checks the field-level rules in their fixed order.
    ///
    /// Title uniqueness needs the current collection and is checked by the
    /// store after these rules pass.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if is_blank(&self.title) {
            return Err(ValidationError::MissingTitle);
        }
        if is_blank(&self.description) {
            return Err(ValidationError::MissingDescription);
        }
        match self.target_amount {
            Some(amount) if amount > Decimal::ZERO => {}
            _ => return Err(ValidationError::NonPositiveTargetAmount),
        }
        if self.current_amount < Decimal::ZERO {
            return Err(ValidationError::NegativeCurrentAmount);
        }
        match self.target_date {
            None => Err(ValidationError::MissingTargetDate),
            Some(date) if date <= today => Err(ValidationError::TargetDateNotInFuture),
            Some(_) => Ok(()),
        }
    }

    /// Builds the stored goal from a validated draft.
    pub(crate) fn into_goal(
        self,
        id: String,
        created_at: NaiveDate,
    ) -> Result<Goal, ValidationError> {
        Ok(Goal {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            target_amount: self
                .target_amount
                .ok_or(ValidationError::NonPositiveTargetAmount)?,
            current_amount: clamp_amount(self.current_amount),
            target_date: self.target_date.ok_or(ValidationError::MissingTargetDate)?,
            category: self.category,
            priority: self.priority,
            is_active: self.is_active,
            created_at,
        })
    }
}

/// Partial update for an existing goal. Absent fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub target_date: Option<NaiveDate>,
    pub category: Option<GoalCategory>,
    pub priority: Option<GoalPriority>,
    pub is_active: Option<bool>,
}

impl GoalUpdate {
    /// Checks the supplied fields against the same rules as creation.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.title.as_deref().is_some_and(is_blank) {
            return Err(ValidationError::MissingTitle);
        }
        if self.description.as_deref().is_some_and(is_blank) {
            return Err(ValidationError::MissingDescription);
        }
        if self.target_amount.is_some_and(|a| a <= Decimal::ZERO) {
            return Err(ValidationError::NonPositiveTargetAmount);
        }
        if self.current_amount.is_some_and(|a| a < Decimal::ZERO) {
            return Err(ValidationError::NegativeCurrentAmount);
        }
        if self.target_date.is_some_and(|d| d <= today) {
            return Err(ValidationError::TargetDateNotInFuture);
        }
        Ok(())
    }

    /// Merges the supplied fields into `goal`, trimming strings and clamping amounts.
    pub(crate) fn apply_to(self, goal: &mut Goal) {
        if let Some(title) = self.title {
            goal.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            goal.description = description.trim().to_string();
        }
        if let Some(target_amount) = self.target_amount {
            goal.target_amount = target_amount;
        }
        if let Some(current_amount) = self.current_amount {
            goal.current_amount = clamp_amount(current_amount);
        }
        if let Some(target_date) = self.target_date {
            goal.target_date = target_date;
        }
        if let Some(category) = self.category {
            goal.category = category;
        }
        if let Some(priority) = self.priority {
            goal.priority = priority;
        }
        if let Some(is_active) = self.is_active {
            goal.is_active = is_active;
        }
    }
}

/// Aggregates over the goal collection.
///
/// Amount totals and the completed count only consider active goals.
/// Totals saturate at `Decimal::MAX` instead of overflowing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalsSummary {
    pub total_goals: usize,
    pub active_goals: usize,
    pub completed_goals: usize,
    pub total_target_amount: Decimal,
    pub total_current_amount: Decimal,
    pub overall_progress: Decimal,
}

impl GoalsSummary {
    pub fn from_goals(goals: &[Goal]) -> Self {
        let active: Vec<&Goal> = goals.iter().filter(|g| g.is_active).collect();
        let total_target_amount = active
            .iter()
            .fold(Decimal::ZERO, |acc, g| acc.saturating_add(g.target_amount));
        let total_current_amount = active
            .iter()
            .fold(Decimal::ZERO, |acc, g| acc.saturating_add(g.current_amount));
        let overall_progress = percentage_of(total_current_amount, total_target_amount)
            .round_dp_with_strategy(
                DISPLAY_DECIMAL_PRECISION,
                RoundingStrategy::MidpointAwayFromZero,
            );

        Self {
            total_goals: goals.len(),
            active_goals: active.len(),
            completed_goals: active.iter().filter(|g| g.is_completed()).count(),
            total_target_amount,
            total_current_amount,
            overall_progress,
        }
    }
}

/// Case-insensitive, whitespace-trimmed form used for title uniqueness.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// `part` as a percentage of `whole`, zero for a zero `whole`.
fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .map(|ratio| ratio.saturating_mul(dec!(100)))
        .unwrap_or(Decimal::MAX)
}

/// Amounts at rest are never negative.
pub fn clamp_amount(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
