use crate::catalog::TaskKey;
use crate::points::DayStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct TaskRow {
    pub key: TaskKey,
    pub title: &'static str,
    pub meta: &'static str,
    pub points: u32,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub tasks: Vec<TaskRow>,
    pub done_count: usize,
    pub task_count: usize,
    pub points: u32,
    pub status: DayStatus,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub status: DayStatus,
    pub points: u32,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Monday-first grid.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub task: String,
    pub done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskUpdateResponse {
    pub date: NaiveDate,
    pub task: TaskKey,
    pub done: bool,
    pub old_points: u32,
    pub new_points: u32,
    pub delta: i64,
    pub balance: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub date: NaiveDate,
    pub old_points: u32,
    pub new_points: u32,
    pub delta: i64,
    pub balance: u64,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SpendRequest {
    #[serde(default)]
    pub amount: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WalletResponse {
    pub balance: u64,
    pub advice_cost: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpendResponse {
    pub spent: u64,
    pub balance: u64,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub date: NaiveDate,
    pub balance: u64,
    pub streak: u32,
    pub lifetime_total: u64,
    pub today_points: u32,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub month: Option<String>,
}
