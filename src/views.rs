//! Derived views over the todo snapshot.
//!
//! Everything here is a pure function recomputed from the current snapshot on
//! every call; there is no cached or invalidated state.

use crate::models::{Filter, Todo};
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use serde::Serialize;

/// Counts over the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TodoCounts {
    /// Collection size.
    pub all: usize,
    /// Incomplete todos.
    pub active: usize,
    /// Completed todos.
    pub completed: usize,
    /// Incomplete todos whose due date falls strictly before the end of the
    /// current calendar day.
    pub overdue: usize,
}

/// One cell of the month calendar grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// The cell's date.
    pub date: NaiveDate,
    /// Whether the date falls within the displayed month.
    pub is_current_month: bool,
    /// Whether the date is today.
    pub is_today: bool,
    /// Todos due (day-truncated) on this date.
    pub todos: Vec<Todo>,
}

/// The last representable instant of `date`'s calendar day.
#[must_use]
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_milli_opt(23, 59, 59, 999).expect("valid wall-clock time").and_utc()
}

/// Narrow the snapshot by search query, then by completion status.
///
/// The search is a case-insensitive substring match on the todo text and is
/// skipped when the query trims to empty. Source order is preserved.
#[must_use]
pub fn filter_todos(todos: &[Todo], filter: Filter, search_query: &str) -> Vec<Todo> {
    let query = if search_query.trim().is_empty() {
        None
    } else {
        Some(search_query.to_lowercase())
    };

    todos
        .iter()
        .filter(|todo| {
            query.as_ref().map_or(true, |q| todo.text.to_lowercase().contains(q.as_str()))
        })
        .filter(|todo| match filter {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        })
        .cloned()
        .collect()
}

/// Compute the collection counts as of `now`.
///
/// A completed todo is never overdue, regardless of its due date.
#[must_use]
pub fn count_todos(todos: &[Todo], now: DateTime<Utc>) -> TodoCounts {
    let day_end = end_of_day(now.date_naive());
    let completed = todos.iter().filter(|t| t.completed).count();
    let overdue = todos
        .iter()
        .filter(|t| !t.completed && t.due_date.is_some_and(|due| due < day_end))
        .count();

    TodoCounts { all: todos.len(), active: todos.len() - completed, completed, overdue }
}

/// Build the calendar grid for a displayed month.
///
/// The grid spans whole Sunday-aligned weeks, so it includes trailing days of
/// the previous month and leading days of the next. Each cell carries the
/// todos whose due date (truncated to the day) equals that date. An invalid
/// year/month yields an empty grid.
#[must_use]
pub fn calendar_month(todos: &[Todo], year: i32, month: u32, today: NaiveDate) -> Vec<CalendarDay> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(first);

    let start = first - Duration::days(i64::from(first.weekday().num_days_from_sunday()));
    let end = last + Duration::days(i64::from(6 - last.weekday().num_days_from_sunday()));

    let mut days = Vec::new();
    for date in start.iter_days() {
        if date > end {
            break;
        }
        let day_todos: Vec<Todo> = todos
            .iter()
            .filter(|t| t.due_date.is_some_and(|due| due.date_naive() == date))
            .cloned()
            .collect();
        days.push(CalendarDay {
            date,
            is_current_month: (date.year(), date.month()) == (year, month),
            is_today: date == today,
            todos: day_todos,
        });
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn make_todo(id: &str, text: &str, completed: bool) -> Todo {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Todo {
            id: id.to_string(),
            text: text.to_string(),
            completed,
            created_at: ts,
            updated_at: ts,
            due_date: None,
            priority: Some(Priority::Medium),
            category_id: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_filter_preserves_newest_first_order() {
        // Created A, B, C in that order; snapshot is newest-first.
        let todos =
            vec![make_todo("c", "C", false), make_todo("b", "B", false), make_todo("a", "A", false)];

        let all = filter_todos(&todos, Filter::All, "");
        let ids: Vec<&str> = all.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }

    #[test]
    fn test_filter_active_after_toggling_b() {
        let todos =
            vec![make_todo("c", "C", false), make_todo("b", "B", true), make_todo("a", "A", false)];

        let active = filter_todos(&todos, Filter::Active, "");
        let ids: Vec<&str> = active.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["c", "a"]);

        let completed = filter_todos(&todos, Filter::Completed, "");
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, "b");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let todos = vec![
            make_todo("1", "Buy Milk", false),
            make_todo("2", "buy bread", true),
            make_todo("3", "Call mom", false),
        ];

        let hits = filter_todos(&todos, Filter::All, "BUY");
        assert_eq!(hits.len(), 2);

        let hits = filter_todos(&todos, Filter::Completed, "buy");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let todos = vec![make_todo("1", "A", false)];
        assert_eq!(filter_todos(&todos, Filter::All, "   ").len(), 1);
    }

    #[test]
    fn test_counts_basic() {
        let todos = vec![
            make_todo("1", "A", false),
            make_todo("2", "B", true),
            make_todo("3", "C", true),
        ];
        let counts = count_todos(&todos, Utc::now());
        assert_eq!(counts.all, 3);
        assert_eq!(counts.active, 1);
        assert_eq!(counts.completed, 2);
        assert_eq!(counts.overdue, 0);
    }

    #[test]
    fn test_overdue_counts_past_due_incomplete() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2024, 3, 14, 9, 0, 0).unwrap();

        let mut due_yesterday = make_todo("1", "late", false);
        due_yesterday.due_date = Some(yesterday);

        let counts = count_todos(&[due_yesterday], now);
        assert_eq!(counts.overdue, 1);
    }

    #[test]
    fn test_overdue_never_counts_completed() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let mut done_late = make_todo("1", "late but done", true);
        done_late.due_date = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());

        let counts = count_todos(&[done_late], now);
        assert_eq!(counts.overdue, 0);
    }

    #[test]
    fn test_due_earlier_today_is_overdue_due_tomorrow_is_not() {
        // The boundary is the end of the current calendar day, so anything
        // due at any time today already counts.
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();

        let mut due_today = make_todo("1", "today", false);
        due_today.due_date = Some(Utc.with_ymd_and_hms(2024, 3, 15, 17, 0, 0).unwrap());
        let mut due_tomorrow = make_todo("2", "tomorrow", false);
        due_tomorrow.due_date = Some(Utc.with_ymd_and_hms(2024, 3, 16, 9, 0, 0).unwrap());

        let counts = count_todos(&[due_today, due_tomorrow], now);
        assert_eq!(counts.overdue, 1);
    }

    #[test]
    fn test_calendar_grid_is_whole_weeks() {
        // March 2024: the 1st is a Friday, the 31st a Sunday.
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let days = calendar_month(&[], 2024, 3, today);

        assert_eq!(days.len() % 7, 0);
        assert_eq!(days.len(), 42);
        // Grid opens on the Sunday before March 1st.
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert!(!days[0].is_current_month);
        // And closes on the Saturday after March 31st.
        assert_eq!(days.last().unwrap().date, NaiveDate::from_ymd_opt(2024, 4, 6).unwrap());
        assert!(!days.last().unwrap().is_current_month);

        let in_month = days.iter().filter(|d| d.is_current_month).count();
        assert_eq!(in_month, 31);
        let today_cells = days.iter().filter(|d| d.is_today).count();
        assert_eq!(today_cells, 1);
    }

    #[test]
    fn test_calendar_december_closes_after_year_rollover() {
        // The last day of December comes from stepping into January of the
        // next year and back one day.
        let today = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        let days = calendar_month(&[], 2024, 12, today);

        assert_eq!(days.len() % 7, 0);
        let last_in_month = days.iter().rfind(|d| d.is_current_month).unwrap();
        assert_eq!(last_in_month.date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        // December 31st 2024 is a Tuesday, so the grid runs into January.
        assert_eq!(days.last().unwrap().date, NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());
    }

    #[test]
    fn test_calendar_month_starting_on_sunday_has_no_leading_days() {
        // September 2024 starts on a Sunday.
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let days = calendar_month(&[], 2024, 9, today);

        assert_eq!(days[0].date, today);
        assert!(days[0].is_current_month);
        assert!(days[0].is_today);
        assert_eq!(days.len(), 35);
    }

    #[test]
    fn test_calendar_buckets_by_due_day() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let mut due_yesterday = make_todo("1", "late", false);
        due_yesterday.due_date = Some(Utc.with_ymd_and_hms(2024, 3, 14, 23, 30, 0).unwrap());

        let days = calendar_month(&[due_yesterday], 2024, 3, today);
        let bucket_14 =
            days.iter().find(|d| d.date == NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()).unwrap();
        let bucket_15 = days.iter().find(|d| d.date == today).unwrap();

        assert_eq!(bucket_14.todos.len(), 1);
        assert!(bucket_15.todos.is_empty());
    }

    #[test]
    fn test_calendar_todos_without_due_date_never_appear() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let days = calendar_month(&[make_todo("1", "no due", false)], 2024, 3, today);
        assert!(days.iter().all(|d| d.todos.is_empty()));
    }

    #[test]
    fn test_calendar_invalid_month_is_empty() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!(calendar_month(&[], 2024, 13, today).is_empty());
        assert!(calendar_month(&[], 2024, 0, today).is_empty());
    }

    proptest! {
        #[test]
        fn prop_counts_partition(flags in proptest::collection::vec(any::<bool>(), 0..50)) {
            let todos: Vec<Todo> = flags
                .iter()
                .enumerate()
                .map(|(i, &completed)| make_todo(&i.to_string(), "t", completed))
                .collect();

            let counts = count_todos(&todos, Utc::now());
            prop_assert_eq!(counts.all, todos.len());
            prop_assert_eq!(counts.active + counts.completed, counts.all);
        }
    }
}
