use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    account::{AccountId, Coin},
    ledger::{LedgerAction, LedgerError},
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Mint,
    Transfer,
}

/// Mint `amount` of `denom` to the creator's own account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgMint {
    pub creator: String,
    pub denom: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgMintResponse {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgTransfer {
    pub sender: String,
    pub receiver: String,
    pub denom: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgTransferResponse {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBalanceRequest {
    pub address: String,
    pub denom: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBalanceResponse {
    /// Balance as a decimal string, `"0"` when nothing is held.
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintCommand {
    pub account: AccountId,
    pub coin: Coin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCommand {
    pub sender: AccountId,
    pub receiver: AccountId,
    pub coin: Coin,
}

/// Validated ledger mutation, ready to be handled against current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    Mint(MintCommand),
    Transfer(TransferCommand),
}

impl LedgerCommand {
    pub fn parse_mint(
        account: &AccountId,
        denom: &str,
        amount: Decimal,
    ) -> Result<Self, LedgerError> {
        Ok(Self::Mint(MintCommand {
            account: *account,
            coin: Coin::parse(denom, amount, LedgerAction::Mint)?,
        }))
    }

    pub fn parse_transfer(
        sender: &AccountId,
        receiver: &AccountId,
        denom: &str,
        amount: Decimal,
    ) -> Result<Self, LedgerError> {
        Ok(Self::Transfer(TransferCommand {
            sender: *sender,
            receiver: *receiver,
            coin: Coin::parse(denom, amount, LedgerAction::Transfer)?,
        }))
    }
}
