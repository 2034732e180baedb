use crate::catalog::TaskKey;
use crate::daily::{DailyLog, PointsChange};
use crate::errors::StorageError;
use crate::migration::{MigrationReport, migrate};
use crate::models::{CalendarMonth, DaySummary};
use crate::points::{DayStatus, TaskSet, calendar_status};
use crate::schema::LedgerState;
use crate::stats;
use crate::storage::Persistence;
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

pub struct Ledger<P> {
    state: LedgerState,
    persistence: P,
}

impl<P: Persistence> Ledger<P> {
    pub fn open(persistence: P) -> Result<Self, StorageError> {
        let state = persistence.load_state()?.unwrap_or_default();
        debug!(days = state.daily.len(), "ledger state loaded");
        Ok(Self { state, persistence })
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    /// Call once at startup, before anything else touches the ledger.
    pub fn run_migration(&mut self) -> Result<MigrationReport, StorageError> {
        let report = migrate(&mut self.state);
        if let Some(balance) = report.initialized_balance {
            info!(balance, "wallet initialized from history");
        }
        if report.backfilled > 0 {
            info!(rows = report.backfilled, "backfilled awarded points");
        }
        self.persist()?;
        Ok(report)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DailyLog> {
        self.state.daily.get(date)
    }

    // Not persisted here; the record is saved with the next mutation.
    pub fn get_or_create(&mut self, date: NaiveDate) -> &DailyLog {
        self.state.daily.get_or_create(date, Utc::now())
    }

    pub fn set_task(
        &mut self,
        date: NaiveDate,
        task: TaskKey,
        done: bool,
    ) -> Result<PointsChange, StorageError> {
        let change = self.state.daily.set_task(date, task, done, Utc::now());
        self.state.wallet.apply_delta(change.delta());
        debug!(
            %date,
            %task,
            done,
            delta = change.delta(),
            balance = self.state.wallet.balance(),
            "task updated"
        );
        self.persist()?;
        Ok(change)
    }

    pub fn set_note(&mut self, date: NaiveDate, text: Option<&str>) -> Result<(), StorageError> {
        self.state.daily.set_note(date, text, Utc::now());
        self.persist()
    }

    pub fn clear_tasks(&mut self, date: NaiveDate) -> Result<PointsChange, StorageError> {
        let change = self.state.daily.clear_tasks(date, Utc::now());
        self.state.wallet.apply_delta(change.delta());
        debug!(%date, delta = change.delta(), "tasks cleared");
        self.persist()?;
        Ok(change)
    }

    pub fn balance(&self) -> u64 {
        self.state.wallet.balance()
    }

    /// Clamps at zero. Callers that must refuse an overspend check
    /// [`Ledger::balance`] first.
    pub fn apply_delta(&mut self, delta: i64) -> Result<u64, StorageError> {
        if delta == 0 {
            return Ok(self.balance());
        }
        self.state.wallet.apply_delta(delta);
        self.persist()?;
        Ok(self.balance())
    }

    pub fn streak(&self, as_of: NaiveDate) -> u32 {
        stats::streak_at(&self.state.daily, as_of)
    }

    pub fn calendar_status(&self, tasks: &TaskSet) -> DayStatus {
        calendar_status(tasks)
    }

    pub fn lifetime_total(&self) -> u64 {
        stats::lifetime_total(&self.state.daily)
    }

    pub fn day_summary(&self, date: NaiveDate) -> DaySummary {
        stats::day_summary(&self.state.daily, date)
    }

    pub fn calendar_month(&self, year: i32, month: u32) -> Option<CalendarMonth> {
        stats::calendar_month(&self.state.daily, year, month)
    }

    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.state = LedgerState {
            wallet_initialized: true,
            ..LedgerState::default()
        };
        info!("ledger state reset");
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.persistence.save_state(&self.state)
    }
}
