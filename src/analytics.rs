//! Productivity analytics derived from the todo snapshot.
//!
//! Like the other derived views these are pure functions of the snapshot and
//! a supplied "now"; nothing is cached.
//!
//! The completion streak is defined over the *creation* dates of completed
//! todos — no completion timestamp is tracked, so "created on day D and later
//! completed" stands in for "completed on day D".

use crate::models::{Priority, Todo};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// How many days back the streak walk looks.
const STREAK_WINDOW_DAYS: usize = 30;

/// Created/completed counts for one period window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodStats {
    /// Todos created within the period.
    pub created: usize,
    /// Of those, how many are completed.
    pub completed: usize,
}

/// Todo counts per priority value. Todos without a priority are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    /// High-priority todos.
    pub high: usize,
    /// Medium-priority todos.
    pub medium: usize,
    /// Low-priority todos.
    pub low: usize,
}

/// The full analytics aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    /// Percentage of todos completed, rounded. 0 when the collection is
    /// empty.
    pub completion_rate: u32,
    /// Consecutive days (ending no later than today, within a 30-day window)
    /// on which a later-completed todo was created.
    pub streak: u32,
    /// Today's window (from local midnight of the supplied `now`).
    pub today: PeriodStats,
    /// This week's window (from the most recent Sunday).
    pub this_week: PeriodStats,
    /// This month's window (from the 1st of the month).
    pub this_month: PeriodStats,
    /// This month's todo count averaged over 30 days, rounded.
    pub average_per_day: u32,
    /// Counts per priority value.
    pub priority_breakdown: PriorityBreakdown,
}

fn period_stats(todos: &[Todo], start: DateTime<Utc>) -> PeriodStats {
    let in_period: Vec<&Todo> = todos.iter().filter(|t| t.created_at >= start).collect();
    PeriodStats {
        created: in_period.len(),
        completed: in_period.iter().filter(|t| t.completed).count(),
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded_ratio(numerator: usize, denominator: usize, scale: f64) -> u32 {
    ((numerator as f64 / denominator as f64) * scale).round() as u32
}

/// Walk backward day by day from `today`, counting days on which a completed
/// todo was created. A gap before the first matching day does not end the
/// walk; the first gap after a match does.
fn streak(todos: &[Todo], today: NaiveDate) -> u32 {
    let completed_days: HashSet<NaiveDate> =
        todos.iter().filter(|t| t.completed).map(|t| t.created_at.date_naive()).collect();

    let mut count = 0;
    let mut day = today;
    for _ in 0..STREAK_WINDOW_DAYS {
        if completed_days.contains(&day) {
            count += 1;
        } else if count > 0 {
            break;
        }
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    count
}

/// Compute the analytics aggregate for the snapshot as of `now`.
#[must_use]
pub fn analyze(todos: &[Todo], now: DateTime<Utc>) -> Analytics {
    let today_date = now.date_naive();
    let today_start = today_date.and_time(NaiveTime::MIN).and_utc();
    let week_start = today_start
        - Duration::days(i64::from(today_date.weekday().num_days_from_sunday()));
    let month_start = NaiveDate::from_ymd_opt(today_date.year(), today_date.month(), 1)
        .unwrap_or(today_date)
        .and_time(NaiveTime::MIN)
        .and_utc();

    let completed = todos.iter().filter(|t| t.completed).count();
    let completion_rate =
        if todos.is_empty() { 0 } else { rounded_ratio(completed, todos.len(), 100.0) };

    let this_month = period_stats(todos, month_start);
    let average_per_day = if this_month.created == 0 {
        0
    } else {
        rounded_ratio(this_month.created, STREAK_WINDOW_DAYS, 1.0)
    };

    Analytics {
        completion_rate,
        streak: streak(todos, today_date),
        today: period_stats(todos, today_start),
        this_week: period_stats(todos, week_start),
        this_month,
        average_per_day,
        priority_breakdown: PriorityBreakdown {
            high: todos.iter().filter(|t| t.priority == Some(Priority::High)).count(),
            medium: todos.iter().filter(|t| t.priority == Some(Priority::Medium)).count(),
            low: todos.iter().filter(|t| t.priority == Some(Priority::Low)).count(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn todo_created_at(id: &str, created_at: DateTime<Utc>, completed: bool) -> Todo {
        Todo {
            id: id.to_string(),
            text: "t".to_string(),
            completed,
            created_at,
            updated_at: created_at,
            due_date: None,
            priority: Some(Priority::Medium),
            category_id: None,
            tags: Vec::new(),
        }
    }

    // Wednesday 2024-03-13.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 13, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_collection() {
        let stats = analyze(&[], now());
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.average_per_day, 0);
        assert_eq!(stats.today, PeriodStats { created: 0, completed: 0 });
    }

    #[test]
    fn test_streak_today_and_yesterday() {
        // Completed todos created today and yesterday, none the day before.
        let todos = vec![
            todo_created_at("1", Utc.with_ymd_and_hms(2024, 3, 13, 9, 0, 0).unwrap(), true),
            todo_created_at("2", Utc.with_ymd_and_hms(2024, 3, 12, 9, 0, 0).unwrap(), true),
        ];
        assert_eq!(analyze(&todos, now()).streak, 2);
    }

    #[test]
    fn test_streak_gap_before_first_match_continues() {
        // Nothing today or yesterday; a completed todo created three days
        // ago. The leading gap does not end the walk, so the streak is 1.
        let todos = vec![todo_created_at(
            "1",
            Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
            true,
        )];
        assert_eq!(analyze(&todos, now()).streak, 1);
    }

    #[test]
    fn test_streak_stops_at_first_gap_after_match() {
        // Completed on the 13th and the 11th, not the 12th: the walk counts
        // the 13th, then stops at the 12th.
        let todos = vec![
            todo_created_at("1", Utc.with_ymd_and_hms(2024, 3, 13, 9, 0, 0).unwrap(), true),
            todo_created_at("2", Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap(), true),
        ];
        assert_eq!(analyze(&todos, now()).streak, 1);
    }

    #[test]
    fn test_streak_ignores_incomplete_todos() {
        let todos = vec![
            todo_created_at("1", Utc.with_ymd_and_hms(2024, 3, 13, 9, 0, 0).unwrap(), false),
        ];
        assert_eq!(analyze(&todos, now()).streak, 0);
    }

    #[test]
    fn test_streak_ignores_days_outside_window() {
        let todos = vec![todo_created_at(
            "1",
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            true,
        )];
        assert_eq!(analyze(&todos, now()).streak, 0);
    }

    #[test]
    fn test_completion_rate_rounds() {
        // 1 of 3 completed -> 33.33 -> 33.
        let todos = vec![
            todo_created_at("1", now(), true),
            todo_created_at("2", now(), false),
            todo_created_at("3", now(), false),
        ];
        assert_eq!(analyze(&todos, now()).completion_rate, 33);

        // 2 of 3 -> 66.67 -> 67.
        let todos = vec![
            todo_created_at("1", now(), true),
            todo_created_at("2", now(), true),
            todo_created_at("3", now(), false),
        ];
        assert_eq!(analyze(&todos, now()).completion_rate, 67);
    }

    #[test]
    fn test_period_windows() {
        let todos = vec![
            // Today.
            todo_created_at("1", Utc.with_ymd_and_hms(2024, 3, 13, 1, 0, 0).unwrap(), true),
            // This week (Sunday 2024-03-10 onward) but not today.
            todo_created_at("2", Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap(), false),
            // This month but last week.
            todo_created_at("3", Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap(), true),
            // Last month.
            todo_created_at("4", Utc.with_ymd_and_hms(2024, 2, 20, 8, 0, 0).unwrap(), true),
        ];

        let stats = analyze(&todos, now());
        assert_eq!(stats.today, PeriodStats { created: 1, completed: 1 });
        assert_eq!(stats.this_week, PeriodStats { created: 2, completed: 1 });
        assert_eq!(stats.this_month, PeriodStats { created: 3, completed: 2 });
    }

    #[test]
    fn test_saturday_before_week_start_excluded() {
        // Saturday 2024-03-09 is the day before the most recent Sunday.
        let todos = vec![todo_created_at(
            "1",
            Utc.with_ymd_and_hms(2024, 3, 9, 23, 0, 0).unwrap(),
            false,
        )];
        assert_eq!(analyze(&todos, now()).this_week.created, 0);
    }

    #[test]
    fn test_average_per_day() {
        // 15 todos this month / 30 days -> 0.5 -> rounds to 1.
        let todos: Vec<Todo> = (0..15)
            .map(|i| {
                todo_created_at(
                    &i.to_string(),
                    Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap(),
                    false,
                )
            })
            .collect();
        assert_eq!(analyze(&todos, now()).average_per_day, 1);

        // A lone todo this month -> 1/30 -> rounds to 0.
        let todos = vec![todo_created_at("1", now(), false)];
        assert_eq!(analyze(&todos, now()).average_per_day, 0);
    }

    #[test]
    fn test_priority_breakdown() {
        let mut high = todo_created_at("1", now(), false);
        high.priority = Some(Priority::High);
        let mut low = todo_created_at("2", now(), false);
        low.priority = Some(Priority::Low);
        let medium = todo_created_at("3", now(), false);
        let mut none = todo_created_at("4", now(), false);
        none.priority = None;

        let breakdown = analyze(&[high, low, medium, none], now()).priority_breakdown;
        assert_eq!(breakdown.high, 1);
        assert_eq!(breakdown.medium, 1);
        assert_eq!(breakdown.low, 1);
    }
}
