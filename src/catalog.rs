use serde::{Deserialize, Serialize};
use std::fmt;

/// Points debited for one advice request.
pub const ADVICE_COST: u64 = 20;

pub const BOTH_BRUSH_BONUS: u32 = 10;

pub const COMPLETIONIST_BONUS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskKey {
    #[serde(rename = "brushAM")]
    BrushAm,
    #[serde(rename = "brushPM")]
    BrushPm,
    #[serde(rename = "floss")]
    Floss,
    #[serde(rename = "rinse")]
    Rinse,
}

impl TaskKey {
    pub const ALL: [TaskKey; 4] = [TaskKey::BrushAm, TaskKey::BrushPm, TaskKey::Floss, TaskKey::Rinse];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskKey::BrushAm => "brushAM",
            TaskKey::BrushPm => "brushPM",
            TaskKey::Floss => "floss",
            TaskKey::Rinse => "rinse",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|task| task.as_str() == key)
    }

    pub fn definition(self) -> &'static TaskDefinition {
        // TASKS is declared in the same order as ALL.
        &TASKS[self as usize]
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDefinition {
    pub key: TaskKey,
    pub title: &'static str,
    pub meta: &'static str,
    pub points: u32,
}

pub const TASKS: [TaskDefinition; 4] = [
    TaskDefinition {
        key: TaskKey::BrushAm,
        title: "Morning brushing",
        meta: "2 minutes",
        points: 10,
    },
    TaskDefinition {
        key: TaskKey::BrushPm,
        title: "Evening brushing",
        meta: "before bed",
        points: 10,
    },
    TaskDefinition {
        key: TaskKey::Floss,
        title: "Floss / interdental brush",
        meta: "between teeth",
        points: 10,
    },
    TaskDefinition {
        key: TaskKey::Rinse,
        title: "Mouthwash",
        meta: "optional",
        points: 5,
    },
];
