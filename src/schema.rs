use crate::catalog::TaskKey;
use crate::daily::{DailyLog, DailyLogStore};
use crate::errors::StorageError;
use crate::points::TaskSet;
use crate::wallet::Wallet;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

pub const SCHEMA_VERSION: u64 = 1;

const DATE_FORMAT: &str = "%Y-%m-%d";

const LEDGER_KEYS: [&str; 4] = ["schemaVersion", "daily", "wallet", "walletInitialized"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    pub(crate) daily: DailyLogStore,
    pub(crate) wallet: Wallet,
    pub(crate) wallet_initialized: bool,
    /// Top-level members the ledger does not own (profile, advice history,
    /// UI settings). Written back untouched.
    pub(crate) extra: Map<String, Value>,
}

impl LedgerState {
    pub fn daily(&self) -> &DailyLogStore {
        &self.daily
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn wallet_initialized(&self) -> bool {
        self.wallet_initialized
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState<'a> {
    schema_version: u64,
    daily: BTreeMap<String, PersistedLog<'a>>,
    wallet: PersistedWallet,
    wallet_initialized: bool,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedLog<'a> {
    tasks: BTreeMap<&'static str, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    awarded_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct PersistedWallet {
    balance: u64,
}

pub fn encode_state(state: &LedgerState) -> Result<Vec<u8>, StorageError> {
    let daily = state
        .daily
        .iter()
        .map(|(date, log)| {
            let row = PersistedLog {
                tasks: log
                    .tasks
                    .iter()
                    .map(|(key, done)| (key.as_str(), *done))
                    .collect(),
                awarded_points: log.awarded_points,
                note: log.note.as_deref(),
                updated_at: log.updated_at,
            };
            (date.format(DATE_FORMAT).to_string(), row)
        })
        .collect();

    let persisted = PersistedState {
        schema_version: SCHEMA_VERSION,
        daily,
        wallet: PersistedWallet {
            balance: state.wallet.balance(),
        },
        wallet_initialized: state.wallet_initialized,
        extra: &state.extra,
    };

    serde_json::to_vec_pretty(&persisted).map_err(StorageError::Encode)
}

pub fn decode_state(bytes: &[u8]) -> Result<LedgerState, StorageError> {
    let value: Value = serde_json::from_slice(bytes).map_err(StorageError::Decode)?;
    decode_value(&value)
}

fn decode_value(value: &Value) -> Result<LedgerState, StorageError> {
    let Some(root) = value.as_object() else {
        warn!("persisted state is not an object, starting empty");
        return Ok(LedgerState::default());
    };

    if let Some(found) = root.get("schemaVersion").and_then(Value::as_u64) {
        if found > SCHEMA_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found,
                supported: SCHEMA_VERSION,
            });
        }
    }

    let mut daily = DailyLogStore::default();
    if let Some(rows) = root.get("daily").and_then(Value::as_object) {
        for (key, row) in rows {
            let Ok(date) = NaiveDate::parse_from_str(key, DATE_FORMAT) else {
                warn!(key = %key, "dropping daily log with malformed date key");
                continue;
            };
            let Some(row) = row.as_object() else {
                warn!(%date, "dropping daily log that is not an object");
                continue;
            };
            daily.insert_raw(date, decode_log(row));
        }
    }

    let balance = root
        .get("wallet")
        .and_then(|wallet| wallet.get("balance"))
        .map(decode_balance)
        .unwrap_or(0);

    let wallet_initialized = root
        .get("walletInitialized")
        .and_then(Value::as_bool)
        .or_else(|| {
            root.get("ui")
                .and_then(|ui| ui.get("walletInitialized"))
                .and_then(Value::as_bool)
        })
        .unwrap_or(false);

    let extra = root
        .iter()
        .filter(|(key, _)| !LEDGER_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(LedgerState {
        daily,
        wallet: Wallet::with_balance(balance),
        wallet_initialized,
        extra,
    })
}

fn decode_log(row: &Map<String, Value>) -> DailyLog {
    let mut tasks = TaskSet::new();
    if let Some(flags) = row.get("tasks").and_then(Value::as_object) {
        for (key, flag) in flags {
            if let (Some(task), Some(done)) = (TaskKey::parse(key), flag.as_bool()) {
                tasks.insert(task, done);
            }
        }
    }

    DailyLog {
        tasks,
        awarded_points: row
            .get("awardedPoints")
            .and_then(Value::as_u64)
            .and_then(|points| u32::try_from(points).ok()),
        note: row.get("note").and_then(Value::as_str).map(str::to_owned),
        updated_at: row
            .get("updatedAt")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|stamp| stamp.with_timezone(&Utc)),
    }
}

fn decode_balance(value: &Value) -> u64 {
    if let Some(balance) = value.as_u64() {
        return balance;
    }
    match value.as_f64() {
        Some(balance) if balance.is_finite() && balance > 0.0 => balance.trunc() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    #[test]
    fn encode_then_decode_preserves_absent_and_empty_fields() {
        let mut state = LedgerState::default();
        state.daily.insert_raw(
            date(1),
            DailyLog {
                tasks: [(TaskKey::BrushAm, true), (TaskKey::Floss, false)].into(),
                awarded_points: None,
                note: Some(String::new()),
                updated_at: Some(Utc.with_ymd_and_hms(2026, 2, 1, 7, 30, 0).unwrap()),
            },
        );
        state.daily.insert_raw(
            date(2),
            DailyLog {
                tasks: TaskSet::new(),
                awarded_points: Some(0),
                note: None,
                updated_at: None,
            },
        );
        state.wallet = Wallet::with_balance(42);
        state.wallet_initialized = true;

        let bytes = encode_state(&state).unwrap();
        let decoded = decode_state(&bytes).unwrap();
        assert_eq!(decoded, state);

        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["schemaVersion"], 1);
        assert!(json["daily"]["2026-02-01"].get("awardedPoints").is_none());
        assert_eq!(json["daily"]["2026-02-01"]["note"], "");
        assert!(json["daily"]["2026-02-02"].get("note").is_none());
        assert_eq!(json["daily"]["2026-02-02"]["awardedPoints"], 0);
    }

    #[test]
    fn legacy_blob_decodes_leniently() {
        let legacy = serde_json::json!({
            "auth": { "loggedIn": true },
            "history": [],
            "daily": {
                "2025-12-30": {
                    "tasks": { "brushAM": true, "brushPM": true, "whiten": true, "rinse": "yes" },
                    "updatedAt": "2025-12-30T20:15:00.000Z"
                },
                "2025-12-31": "garbage",
                "yesterday": { "tasks": { "floss": true } },
                "2026-01-01": { "tasks": [], "awardedPoints": -5, "note": 12 }
            },
            "ui": { "walletInitialized": true, "theme": "dark" },
            "wallet": { "balance": 17.9 }
        });

        let state = decode_value(&legacy).unwrap();
        assert_eq!(state.daily.len(), 2);

        let first = state.daily.get(NaiveDate::from_ymd_opt(2025, 12, 30).unwrap()).unwrap();
        assert_eq!(first.tasks.len(), 2);
        assert!(!first.has_cached_points());
        assert_eq!(first.awarded_points(), 30);
        assert_eq!(
            first.updated_at(),
            Some(Utc.with_ymd_and_hms(2025, 12, 30, 20, 15, 0).unwrap())
        );

        let second = state.daily.get(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()).unwrap();
        assert!(second.tasks.is_empty());
        assert!(!second.has_cached_points());
        assert_eq!(second.note(), None);

        assert_eq!(state.wallet.balance(), 17);
        assert!(state.wallet_initialized);
        assert_eq!(state.extra.len(), 3);
        assert_eq!(state.extra["ui"]["theme"], "dark");
    }

    #[test]
    fn unowned_members_are_written_back() {
        let stored = serde_json::json!({
            "profile": { "name": "Aru", "age": 31 },
            "history": [{ "id": "a1", "spent": { "type": "advice", "cost": 20 } }],
            "ui": { "theme": "dark", "walletInitialized": true },
            "daily": {},
            "wallet": { "balance": 5 }
        });
        let state = decode_value(&stored).unwrap();
        assert!(!state.extra.contains_key("daily"));
        assert!(!state.extra.contains_key("wallet"));

        let json: Value = serde_json::from_slice(&encode_state(&state).unwrap()).unwrap();
        assert_eq!(json["profile"], stored["profile"]);
        assert_eq!(json["history"], stored["history"]);
        assert_eq!(json["ui"], stored["ui"]);
        assert_eq!(json["wallet"]["balance"], 5);
        assert_eq!(json["walletInitialized"], true);
        assert_eq!(decode_value(&json).unwrap(), state);
    }

    #[test]
    fn wrong_top_level_types_fall_back_to_defaults() {
        let state = decode_state(br#"{"daily": [], "wallet": {"balance": -3}, "walletInitialized": "true"}"#)
            .unwrap();
        assert!(state.daily.is_empty());
        assert_eq!(state.wallet.balance(), 0);
        assert!(!state.wallet_initialized);

        let state = decode_state(b"[1, 2, 3]").unwrap();
        assert_eq!(state, LedgerState::default());
    }

    #[test]
    fn non_json_bytes_are_rejected() {
        let err = decode_state(b"{not json").unwrap_err();
        assert!(matches!(err, StorageError::Decode(_)));
    }

    #[test]
    fn newer_schema_is_rejected() {
        let err = decode_state(br#"{"schemaVersion": 2}"#).unwrap_err();
        assert!(matches!(
            err,
            StorageError::UnsupportedVersion { found: 2, supported: 1 }
        ));
    }
}
