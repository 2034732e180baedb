use crate::errors::StorageError;
use crate::schema::{LedgerState, decode_state, encode_state};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub trait Persistence {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load_state(&self) -> Result<Option<LedgerState>, StorageError>;

    fn save_state(&mut self, state: &LedgerState) -> Result<(), StorageError>;
}

/// Writes go to a sibling temp file that is renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Persistence for JsonFileStore {
    fn load_state(&self) -> Result<Option<LedgerState>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => decode_state(&bytes).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                action: "read",
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save_state(&mut self, state: &LedgerState) -> Result<(), StorageError> {
        let payload = encode_state(state)?;
        let temp_path = self.temp_path();

        fs::write(&temp_path, payload).map_err(|source| StorageError::Io {
            action: "write",
            path: temp_path.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::Io {
                action: "replace",
                path: self.path.clone(),
                source,
            });
        }

        debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
    writes: usize,
    #[cfg(test)]
    reject_writes: bool,
}

impl MemoryStore {
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    #[cfg(test)]
    pub(crate) fn reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }
}

impl Persistence for MemoryStore {
    fn load_state(&self) -> Result<Option<LedgerState>, StorageError> {
        self.bytes
            .as_deref()
            .map(decode_state)
            .transpose()
    }

    fn save_state(&mut self, state: &LedgerState) -> Result<(), StorageError> {
        #[cfg(test)]
        if self.reject_writes {
            return Err(StorageError::WriteRejected);
        }
        self.bytes = Some(encode_state(state)?);
        self.writes += 1;
        Ok(())
    }
}
