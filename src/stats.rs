use crate::catalog::TASKS;
use crate::daily::DailyLogStore;
use crate::models::{CalendarDay, CalendarMonth, DaySummary, TaskRow};
use crate::points::{TaskSet, both_brushed, calendar_status, day_points, done_count, is_done};
use chrono::{Datelike, Duration, NaiveDate};

/// Upper bound on how far back a streak walk looks.
pub const MAX_STREAK_LOOKBACK_DAYS: u32 = 3650;

pub fn streak_at(store: &DailyLogStore, as_of: NaiveDate) -> u32 {
    let mut streak = 0;
    for offset in 0..MAX_STREAK_LOOKBACK_DAYS {
        let Some(date) = as_of.checked_sub_signed(Duration::days(i64::from(offset))) else {
            break;
        };
        let qualifies = store
            .get(date)
            .is_some_and(|log| both_brushed(log.tasks()));
        if !qualifies {
            break;
        }
        streak += 1;
    }
    streak
}

// Recomputed from tasks; cached awards are ignored.
pub fn lifetime_total(store: &DailyLogStore) -> u64 {
    store
        .iter()
        .map(|(_, log)| u64::from(day_points(log.tasks())))
        .sum()
}

pub fn day_summary(store: &DailyLogStore, date: NaiveDate) -> DaySummary {
    let empty = TaskSet::new();
    let log = store.get(date);
    let tasks = log.map_or(&empty, |log| log.tasks());

    DaySummary {
        date,
        tasks: TASKS
            .iter()
            .map(|task| TaskRow {
                key: task.key,
                title: task.title,
                meta: task.meta,
                points: task.points,
                done: is_done(tasks, task.key),
            })
            .collect(),
        done_count: done_count(tasks),
        task_count: TASKS.len(),
        points: day_points(tasks),
        status: calendar_status(tasks),
        note: log.and_then(|log| log.note()).map(str::to_owned),
    }
}

pub fn calendar_month(store: &DailyLogStore, year: i32, month: u32) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let days_in_month = (next_month - first).num_days();

    let empty = TaskSet::new();
    let mut days = Vec::with_capacity(days_in_month as usize);
    for offset in 0..days_in_month {
        let date = first + Duration::days(offset);
        let log = store.get(date);
        let tasks = log.map_or(&empty, |log| log.tasks());
        let note = log
            .and_then(|log| log.note())
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_owned);

        days.push(CalendarDay {
            date,
            day: date.day(),
            status: calendar_status(tasks),
            points: day_points(tasks),
            note,
        });
    }

    Some(CalendarMonth {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_monday(),
        days,
    })
}
