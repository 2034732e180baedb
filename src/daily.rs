use crate::catalog::TaskKey;
use crate::points::{TaskSet, day_points, is_done};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Only writable through [`DailyLogStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyLog {
    pub(crate) tasks: TaskSet,
    pub(crate) awarded_points: Option<u32>,
    pub(crate) note: Option<String>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

impl DailyLog {
    fn empty(now: DateTime<Utc>) -> Self {
        Self {
            tasks: TaskSet::new(),
            awarded_points: Some(0),
            note: None,
            updated_at: Some(now),
        }
    }

    pub fn tasks(&self) -> &TaskSet {
        &self.tasks
    }

    pub fn is_done(&self, key: TaskKey) -> bool {
        is_done(&self.tasks, key)
    }

    pub fn awarded_points(&self) -> u32 {
        self.awarded_points.unwrap_or_else(|| day_points(&self.tasks))
    }

    pub fn has_cached_points(&self) -> bool {
        self.awarded_points.is_some()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn heal(&mut self) -> bool {
        if self.awarded_points.is_some() {
            return false;
        }
        self.awarded_points = Some(day_points(&self.tasks));
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointsChange {
    pub old_points: u32,
    pub new_points: u32,
}

impl PointsChange {
    pub fn delta(&self) -> i64 {
        i64::from(self.new_points) - i64::from(self.old_points)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyLogStore {
    logs: BTreeMap<NaiveDate, DailyLog>,
}

impl DailyLogStore {
    pub fn get(&self, date: NaiveDate) -> Option<&DailyLog> {
        self.logs.get(&date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DailyLog)> {
        self.logs.iter()
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    pub fn get_or_create(&mut self, date: NaiveDate, now: DateTime<Utc>) -> &DailyLog {
        self.entry(date, now)
    }

    pub fn set_task(
        &mut self,
        date: NaiveDate,
        key: TaskKey,
        done: bool,
        now: DateTime<Utc>,
    ) -> PointsChange {
        let log = self.entry(date, now);
        let old_points = log.awarded_points();
        log.tasks.insert(key, done);
        Self::recompute(log, old_points, now)
    }

    pub fn clear_tasks(&mut self, date: NaiveDate, now: DateTime<Utc>) -> PointsChange {
        let log = self.entry(date, now);
        let old_points = log.awarded_points();
        log.tasks.clear();
        Self::recompute(log, old_points, now)
    }

    pub fn set_note(&mut self, date: NaiveDate, text: Option<&str>, now: DateTime<Utc>) {
        let log = self.entry(date, now);
        log.note = text
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        log.updated_at = Some(now);
    }

    pub(crate) fn backfill_awarded_points(&mut self) -> usize {
        self.logs
            .values_mut()
            .map(DailyLog::heal)
            .filter(|healed| *healed)
            .count()
    }

    pub(crate) fn insert_raw(&mut self, date: NaiveDate, log: DailyLog) {
        self.logs.insert(date, log);
    }

    fn entry(&mut self, date: NaiveDate, now: DateTime<Utc>) -> &mut DailyLog {
        let log = self.logs.entry(date).or_insert_with(|| DailyLog::empty(now));
        log.heal();
        log
    }

    fn recompute(log: &mut DailyLog, old_points: u32, now: DateTime<Utc>) -> PointsChange {
        let new_points = day_points(&log.tasks);
        log.awarded_points = Some(new_points);
        log.updated_at = Some(now);
        PointsChange {
            old_points,
            new_points,
        }
    }
}
