use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::{AccountId, Denom};

pub mod in_memory_ledger;
pub mod state;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerAction {
    Mint,
    Transfer,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AmountViolation {
    #[error("amount must not be negative")]
    Negative,
    #[error("amount must be a whole number")]
    Fractional,
    #[error("resulting amount overflows")]
    Overflow,
}

/// Closed set of failure categories reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidAccount,
    InvalidAmount,
    InsufficientFunds,
    InvalidDenomination,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account identifier must be {expected} bytes long, got {actual}")]
    InvalidAccount { expected: usize, actual: usize },
    #[error("Invalid amount {amount} for {action:?}: {reason}")]
    InvalidAmount {
        action: LedgerAction,
        amount: Decimal,
        reason: AmountViolation,
    },
    #[error("Invalid denomination {denom:?}")]
    InvalidDenomination { denom: String },
    #[error("Insufficient funds: {account} holds {available}{denom}, {required}{denom} required")]
    InsufficientFunds {
        account: AccountId,
        denom: Denom,
        available: Decimal,
        required: Decimal,
    },
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAccount { .. } => ErrorKind::InvalidAccount,
            Self::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            Self::InvalidDenomination { .. } => ErrorKind::InvalidDenomination,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
        }
    }
}

/// One non-zero balance held in the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceEntry {
    pub account: AccountId,
    pub denom: Denom,
    pub amount: Decimal,
}

/// Balance store. Every mutation is atomic: it either fully applies or
/// leaves all balances untouched.
pub trait Ledger {
    fn mint(&self, account: &AccountId, denom: &str, amount: Decimal) -> Result<(), LedgerError>;

    /// Moves `amount` from `sender` to `receiver`. A self-transfer still
    /// requires the sender to hold at least `amount`.
    fn transfer(
        &self,
        sender: &AccountId,
        receiver: &AccountId,
        denom: &str,
        amount: Decimal,
    ) -> Result<(), LedgerError>;

    /// Zero when no entry exists.
    fn balance(&self, account: &AccountId, denom: &str) -> Decimal;

    fn total_supply(&self, denom: &str) -> Decimal;

    /// All non-zero balances ordered by account, then denomination.
    fn balances(&self) -> Vec<BalanceEntry>;
}
