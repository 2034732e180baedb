use crate::catalog::{BOTH_BRUSH_BONUS, COMPLETIONIST_BONUS, TASKS, TaskKey};
use serde::Serialize;
use std::collections::BTreeMap;

/// Completion flags for one day. Keys that are missing count as not done.
pub type TaskSet = BTreeMap<TaskKey, bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    None,
    Part,
    Good,
    Perfect,
}

pub fn is_done(tasks: &TaskSet, key: TaskKey) -> bool {
    tasks.get(&key).copied().unwrap_or(false)
}

pub fn both_brushed(tasks: &TaskSet) -> bool {
    is_done(tasks, TaskKey::BrushAm) && is_done(tasks, TaskKey::BrushPm)
}

pub fn done_count(tasks: &TaskSet) -> usize {
    TASKS.iter().filter(|task| is_done(tasks, task.key)).count()
}

pub fn day_points(tasks: &TaskSet) -> u32 {
    let mut points: u32 = TASKS
        .iter()
        .filter(|task| is_done(tasks, task.key))
        .map(|task| task.points)
        .sum();

    if both_brushed(tasks) {
        points += BOTH_BRUSH_BONUS;
    }
    if done_count(tasks) == TASKS.len() {
        points += COMPLETIONIST_BONUS;
    }
    points
}

pub fn calendar_status(tasks: &TaskSet) -> DayStatus {
    let done = done_count(tasks);
    if done == 0 {
        DayStatus::None
    } else if done == TASKS.len() {
        DayStatus::Perfect
    } else if both_brushed(tasks) {
        DayStatus::Good
    } else {
        DayStatus::Part
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(done: &[TaskKey]) -> TaskSet {
        done.iter().map(|key| (*key, true)).collect()
    }

    #[test]
    fn empty_day_is_worth_nothing() {
        let tasks = TaskSet::new();
        assert_eq!(day_points(&tasks), 0);
        assert_eq!(calendar_status(&tasks), DayStatus::None);
    }

    #[test]
    fn full_day_earns_both_bonuses() {
        let tasks = set(&TaskKey::ALL);
        assert_eq!(day_points(&tasks), 10 + 10 + 10 + 5 + 10 + 10);
        assert_eq!(day_points(&tasks), day_points(&tasks));
        assert_eq!(calendar_status(&tasks), DayStatus::Perfect);
    }

    #[test]
    fn both_brushes_earn_brush_bonus_only() {
        let tasks = set(&[TaskKey::BrushAm, TaskKey::BrushPm]);
        assert_eq!(day_points(&tasks), 30);
        assert_eq!(calendar_status(&tasks), DayStatus::Good);
    }

    #[test]
    fn floss_alone_is_partial() {
        let tasks = set(&[TaskKey::Floss]);
        assert_eq!(day_points(&tasks), 10);
        assert_eq!(calendar_status(&tasks), DayStatus::Part);
    }

    #[test]
    fn explicit_false_flags_count_as_not_done() {
        let mut tasks = set(&[TaskKey::BrushAm, TaskKey::Rinse]);
        tasks.insert(TaskKey::BrushPm, false);
        assert_eq!(day_points(&tasks), 15);
        assert_eq!(done_count(&tasks), 2);
        assert_eq!(calendar_status(&tasks), DayStatus::Part);
    }

    #[test]
    fn three_tasks_with_both_brushes_is_good_not_perfect() {
        let tasks = set(&[TaskKey::BrushAm, TaskKey::BrushPm, TaskKey::Floss]);
        assert_eq!(day_points(&tasks), 40);
        assert_eq!(calendar_status(&tasks), DayStatus::Good);
    }
}
