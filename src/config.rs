use std::{env, path::PathBuf};

const DEFAULT_DATA_PATH: &str = "data/state.json";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_values(env::var("APP_DATA_PATH").ok(), env::var("PORT").ok())
    }

    fn from_values(data_path: Option<String>, port: Option<String>) -> Self {
        Self {
            data_path: data_path
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            port: port
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset_or_invalid() {
        let config = Config::from_values(None, Some("not-a-port".into()));
        assert_eq!(config.data_path, PathBuf::from("data/state.json"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn explicit_values_win() {
        let config = Config::from_values(Some("/tmp/ledger.json".into()), Some("9191".into()));
        assert_eq!(config.data_path, PathBuf::from("/tmp/ledger.json"));
        assert_eq!(config.port, 9191);
    }
}
