use crate::ledger::Ledger;
use crate::storage::JsonFileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Mutex<Ledger<JsonFileStore>>>,
}

impl AppState {
    pub fn new(ledger: Ledger<JsonFileStore>) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }
}
