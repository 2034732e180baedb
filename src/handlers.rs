use crate::catalog::{ADVICE_COST, TaskKey};
use crate::errors::AppError;
use crate::models::{
    CalendarMonth, CalendarQuery, ClearResponse, DaySummary, NoteRequest, SpendRequest,
    SpendResponse, SummaryResponse, TaskRequest, TaskUpdateResponse, WalletResponse,
};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{Datelike, Local, NaiveDate};
use tracing::info;

pub async fn get_today(State(state): State<AppState>) -> Json<DaySummary> {
    let ledger = state.ledger.lock().await;
    Json(ledger.day_summary(today()))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DaySummary>, AppError> {
    let date = parse_date(&date)?;
    let ledger = state.ledger.lock().await;
    Ok(Json(ledger.day_summary(date)))
}

pub async fn set_task(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<TaskRequest>,
) -> Result<Json<TaskUpdateResponse>, AppError> {
    let date = parse_date(&date)?;
    let task = TaskKey::parse(payload.task.trim())
        .ok_or_else(|| AppError::bad_request(format!("unknown task '{}'", payload.task)))?;

    let mut ledger = state.ledger.lock().await;
    let change = ledger.set_task(date, task, payload.done)?;

    Ok(Json(TaskUpdateResponse {
        date,
        task,
        done: payload.done,
        old_points: change.old_points,
        new_points: change.new_points,
        delta: change.delta(),
        balance: ledger.balance(),
    }))
}

pub async fn set_note(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<NoteRequest>,
) -> Result<Json<DaySummary>, AppError> {
    let date = parse_date(&date)?;
    let mut ledger = state.ledger.lock().await;
    ledger.set_note(date, payload.note.as_deref())?;
    Ok(Json(ledger.day_summary(date)))
}

pub async fn clear_tasks(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<ClearResponse>, AppError> {
    let date = parse_date(&date)?;
    let mut ledger = state.ledger.lock().await;
    let change = ledger.clear_tasks(date)?;

    Ok(Json(ClearResponse {
        date,
        old_points: change.old_points,
        new_points: change.new_points,
        delta: change.delta(),
        balance: ledger.balance(),
    }))
}

pub async fn get_wallet(State(state): State<AppState>) -> Json<WalletResponse> {
    let ledger = state.ledger.lock().await;
    Json(WalletResponse {
        balance: ledger.balance(),
        advice_cost: ADVICE_COST,
    })
}

/// Debits the wallet, refusing rather than clamping when funds are short.
pub async fn spend(
    State(state): State<AppState>,
    payload: Option<Json<SpendRequest>>,
) -> Result<Json<SpendResponse>, AppError> {
    let amount = payload
        .and_then(|Json(request)| request.amount)
        .unwrap_or(ADVICE_COST);
    if amount == 0 {
        return Err(AppError::bad_request("amount must be positive"));
    }
    let delta = i64::try_from(amount).map_err(|_| AppError::bad_request("amount is too large"))?;

    let mut ledger = state.ledger.lock().await;
    let balance = ledger.balance();
    if balance < amount {
        return Err(AppError::payment_required(format!(
            "insufficient points: need {} more",
            amount - balance
        )));
    }

    let balance = ledger.apply_delta(-delta)?;
    info!(amount, balance, "points spent");
    Ok(Json(SpendResponse {
        spent: amount,
        balance,
    }))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let date = today();
    let ledger = state.ledger.lock().await;
    Json(SummaryResponse {
        date,
        balance: ledger.balance(),
        streak: ledger.streak(date),
        lifetime_total: ledger.lifetime_total(),
        today_points: ledger.day_summary(date).points,
    })
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    let (year, month) = match query.month.as_deref() {
        Some(raw) => parse_month(raw)?,
        None => {
            let date = today();
            (date.year(), date.month())
        }
    };

    let ledger = state.ledger.lock().await;
    ledger
        .calendar_month(year, month)
        .map(Json)
        .ok_or_else(|| AppError::bad_request("month is out of range"))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<WalletResponse>, AppError> {
    let mut ledger = state.ledger.lock().await;
    ledger.reset()?;
    Ok(Json(WalletResponse {
        balance: ledger.balance(),
        advice_cost: ADVICE_COST,
    }))
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))
}

fn parse_month(raw: &str) -> Result<(i32, u32), AppError> {
    let invalid = || AppError::bad_request("month must be YYYY-MM");
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
