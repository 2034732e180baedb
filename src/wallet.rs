use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Wallet {
    balance: u64,
}

impl Wallet {
    pub(crate) fn with_balance(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Returns whether the balance changed.
    pub fn apply_delta(&mut self, delta: i64) -> bool {
        if delta == 0 {
            return false;
        }
        let before = self.balance;
        self.balance = if delta > 0 {
            self.balance.saturating_add(delta.unsigned_abs())
        } else {
            self.balance.saturating_sub(delta.unsigned_abs())
        };
        self.balance != before
    }

    /// Direct assignment, reserved for migration.
    pub(crate) fn initialize(&mut self, balance: u64) {
        self.balance = balance;
    }
}
