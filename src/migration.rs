use crate::schema::LedgerState;
use crate::stats::lifetime_total;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MigrationReport {
    pub backfilled: usize,
    /// Opening balance, when this run initialized the wallet.
    pub initialized_balance: Option<u64>,
}

/// The wallet is only seeded while `wallet_initialized` is unset.
pub fn migrate(state: &mut LedgerState) -> MigrationReport {
    let backfilled = state.daily.backfill_awarded_points();

    let initialized_balance = if state.wallet_initialized {
        None
    } else {
        let total = lifetime_total(&state.daily);
        state.wallet.initialize(total);
        state.wallet_initialized = true;
        Some(total)
    };

    MigrationReport {
        backfilled,
        initialized_balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TaskKey;
    use crate::daily::DailyLog;
    use chrono::NaiveDate;

    fn legacy_state() -> LedgerState {
        let mut state = LedgerState::default();
        state.daily.insert_raw(
            NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            DailyLog {
                tasks: TaskKey::ALL.into_iter().map(|key| (key, true)).collect(),
                awarded_points: None,
                note: None,
                updated_at: None,
            },
        );
        state.daily.insert_raw(
            NaiveDate::from_ymd_opt(2025, 11, 2).unwrap(),
            DailyLog {
                tasks: [(TaskKey::Floss, true)].into(),
                awarded_points: Some(10),
                note: Some("old".into()),
                updated_at: None,
            },
        );
        state
    }

    #[test]
    fn first_run_backfills_and_seeds_wallet() {
        let mut state = legacy_state();
        let report = migrate(&mut state);

        assert_eq!(report.backfilled, 1);
        assert_eq!(report.initialized_balance, Some(65));
        assert_eq!(state.wallet.balance(), 65);
        assert!(state.wallet_initialized);
        assert!(state.daily.iter().all(|(_, log)| log.has_cached_points()));
    }

    #[test]
    fn second_run_leaves_spent_balance_alone() {
        let mut state = legacy_state();
        migrate(&mut state);
        state.wallet.apply_delta(-60);

        let report = migrate(&mut state);
        assert_eq!(report, MigrationReport::default());
        assert_eq!(state.wallet.balance(), 5);
    }

    #[test]
    fn initialized_flag_blocks_seeding_even_at_zero() {
        let mut state = legacy_state();
        state.wallet_initialized = true;

        let report = migrate(&mut state);
        assert_eq!(report.backfilled, 1);
        assert_eq!(report.initialized_balance, None);
        assert_eq!(state.wallet.balance(), 0);
    }
}
