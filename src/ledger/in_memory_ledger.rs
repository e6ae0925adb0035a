use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use tracing::debug;

use crate::{account::AccountId, command::LedgerCommand};

use super::{BalanceEntry, Ledger, LedgerError, state::LedgerState};

/// Thread-safe ledger. Reads share the lock, mutations take it exclusively
/// for both handling and applying, so every mutation is linearizable.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    /// Starts from previously exported balances, e.g. a genesis file.
    pub fn from_balances<I, S>(entries: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = (AccountId, S, Decimal)>,
        S: AsRef<str>,
    {
        Ok(Self {
            state: RwLock::new(LedgerState::restore(entries)?),
        })
    }

    fn execute(&self, command: LedgerCommand) -> Result<(), LedgerError> {
        let mut state = self.write();
        let evt = state.handle(command)?;
        state.apply(&evt);
        debug!(event = ?evt, "ledger event applied");
        Ok(())
    }

    // A panic can only happen before `apply` starts mutating, so the state
    // behind a poisoned lock is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Ledger for InMemoryLedger {
    fn mint(&self, account: &AccountId, denom: &str, amount: Decimal) -> Result<(), LedgerError> {
        self.execute(LedgerCommand::parse_mint(account, denom, amount)?)
    }

    fn transfer(
        &self,
        sender: &AccountId,
        receiver: &AccountId,
        denom: &str,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        self.execute(LedgerCommand::parse_transfer(
            sender, receiver, denom, amount,
        )?)
    }

    fn balance(&self, account: &AccountId, denom: &str) -> Decimal {
        self.read().balance(account, denom)
    }

    fn total_supply(&self, denom: &str) -> Decimal {
        self.read().total_supply(denom)
    }

    fn balances(&self) -> Vec<BalanceEntry> {
        self.read().entries().collect()
    }
}
