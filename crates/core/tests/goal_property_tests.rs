//! Property-based integration tests for the goal store.
//!
//! These tests verify that store invariants hold across generated inputs,
//! using the `proptest` crate for random test case generation.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate};
use goaltrack_core::goals::{
    normalize_title, Goal, GoalCategory, GoalPriority, GoalRepositoryTrait, GoalService,
    GoalServiceConfig, GoalServiceTrait, GoalsSummary, NewGoal,
};
use goaltrack_core::notifications::NoOpNotificationSink;
use goaltrack_core::utils::time_utils::FixedClock;
use goaltrack_core::Result;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};

// =============================================================================
// Fixtures
// =============================================================================

#[derive(Default)]
struct InMemoryGoalRepository {
    goals: Mutex<Vec<Goal>>,
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryGoalRepository {
    fn load_goals(&self, _storage_key: &str) -> Result<Vec<Goal>> {
        Ok(self.goals.lock().unwrap().clone())
    }

    async fn save_goals(&self, _storage_key: &str, goals: Vec<Goal>) -> Result<()> {
        *self.goals.lock().unwrap() = goals;
        Ok(())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

fn new_service() -> (GoalService, Arc<InMemoryGoalRepository>) {
    let repo = Arc::new(InMemoryGoalRepository::default());
    let service = GoalService::new(
        repo.clone(),
        Arc::new(NoOpNotificationSink),
        Arc::new(FixedClock(today())),
        GoalServiceConfig::default(),
    )
    .unwrap();
    (service, repo)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

// =============================================================================
// Generators
// =============================================================================

/// Generates a cent-precision amount between 0.00 and 100000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generates a non-zero cent-precision delta, positive or negative.
fn arb_delta() -> impl Strategy<Value = Decimal> {
    prop_oneof![1i64..5_000_000, -5_000_000i64..-1].prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_category() -> impl Strategy<Value = GoalCategory> {
    prop_oneof![
        Just(GoalCategory::Emergency),
        Just(GoalCategory::Vacation),
        Just(GoalCategory::House),
        Just(GoalCategory::Car),
        Just(GoalCategory::Education),
        Just(GoalCategory::Retirement),
        Just(GoalCategory::Investment),
        Just(GoalCategory::Other),
    ]
}

fn arb_priority() -> impl Strategy<Value = GoalPriority> {
    prop_oneof![
        Just(GoalPriority::High),
        Just(GoalPriority::Medium),
        Just(GoalPriority::Low),
    ]
}

/// Generates a draft that passes every field rule.
fn arb_valid_draft() -> impl Strategy<Value = NewGoal> {
    (
        "[ ]{0,3}[A-Za-z][A-Za-z ]{0,20}[ ]{0,3}", // title
        "[A-Za-z][A-Za-z ]{0,40}",                 // description
        arb_amount().prop_map(|a| a + Decimal::new(1, 2)),
        arb_amount(),
        1i64..2000, // days ahead
        arb_category(),
        arb_priority(),
        any::<bool>(),
    )
        .prop_map(
            |(title, description, target, current, days, category, priority, is_active)| NewGoal {
                title,
                description,
                target_amount: Some(target),
                current_amount: current,
                target_date: Some(today() + ChronoDuration::days(days)),
                category,
                priority,
                is_active,
            },
        )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A valid draft is stored exactly as given, modulo trimming.
    #[test]
    fn prop_create_stores_trimmed_draft(draft in arb_valid_draft()) {
        let (service, repo) = new_service();
        let created = runtime().block_on(service.create_goal(draft.clone())).unwrap();

        prop_assert_eq!(&created.title, draft.title.trim());
        prop_assert_eq!(&created.description, draft.description.trim());
        prop_assert_eq!(Some(created.target_amount), draft.target_amount);
        prop_assert_eq!(created.current_amount, draft.current_amount);
        prop_assert_eq!(Some(created.target_date), draft.target_date);
        prop_assert_eq!(created.created_at, today());
        prop_assert_eq!(service.get_goal(&created.id).unwrap(), created.clone());
        prop_assert_eq!(repo.goals.lock().unwrap().clone(), vec![created]);
    }

    /// Progress adjustments never leave a negative amount behind.
    #[test]
    fn prop_adjust_progress_never_negative(
        draft in arb_valid_draft(),
        deltas in proptest::collection::vec(arb_delta(), 1..10),
    ) {
        let (service, _repo) = new_service();
        let rt = runtime();
        let goal = rt.block_on(service.create_goal(draft)).unwrap();

        let mut expected = goal.current_amount;
        for delta in deltas {
            let updated = rt.block_on(service.adjust_progress(&goal.id, delta)).unwrap();
            expected = (expected + delta).max(Decimal::ZERO);
            prop_assert!(updated.current_amount >= Decimal::ZERO);
            prop_assert_eq!(updated.current_amount, expected);
        }
    }

    /// No two active goals ever share a normalized title.
    #[test]
    fn prop_active_titles_stay_unique(
        drafts in proptest::collection::vec(arb_valid_draft(), 1..12),
    ) {
        let (service, _repo) = new_service();
        let rt = runtime();
        for draft in drafts {
            let _ = rt.block_on(service.create_goal(draft));
        }

        let active = service.get_active_goals().unwrap();
        let mut titles: Vec<String> = active.iter().map(|g| normalize_title(&g.title)).collect();
        let total = titles.len();
        titles.sort();
        titles.dedup();
        prop_assert_eq!(titles.len(), total);
    }

    /// Completed goals are exactly those whose saved amount reaches the target.
    #[test]
    fn prop_completed_matches_amounts(
        target in arb_amount(),
        current in arb_amount(),
    ) {
        let goal = Goal {
            id: "g".to_string(),
            title: "Goal".to_string(),
            description: "Goal".to_string(),
            target_amount: target,
            current_amount: current,
            target_date: today(),
            category: GoalCategory::Other,
            priority: GoalPriority::Medium,
            is_active: true,
            created_at: today(),
        };
        prop_assert_eq!(goal.is_completed(), current >= target);
        if target.is_zero() {
            prop_assert_eq!(goal.progress_percentage(), Decimal::ZERO);
        } else if goal.is_completed() {
            prop_assert!(goal.progress_percentage() >= Decimal::ONE_HUNDRED);
        } else {
            prop_assert!(goal.progress_percentage() < Decimal::ONE_HUNDRED);
        }
    }

    /// Summary totals equal the sums over active goals.
    #[test]
    fn prop_summary_totals_match_active_goals(
        drafts in proptest::collection::vec(arb_valid_draft(), 0..8),
    ) {
        let (service, _repo) = new_service();
        let rt = runtime();
        for draft in drafts {
            let _ = rt.block_on(service.create_goal(draft));
        }

        let goals = service.get_goals().unwrap();
        let summary: GoalsSummary = service.get_goals_summary().unwrap();
        let active: Vec<&Goal> = goals.iter().filter(|g| g.is_active).collect();

        prop_assert_eq!(summary.total_goals, goals.len());
        prop_assert_eq!(summary.active_goals, active.len());
        prop_assert_eq!(
            summary.total_target_amount,
            active.iter().map(|g| g.target_amount).sum::<Decimal>()
        );
        prop_assert_eq!(
            summary.total_current_amount,
            active.iter().map(|g| g.current_amount).sum::<Decimal>()
        );
    }
}
