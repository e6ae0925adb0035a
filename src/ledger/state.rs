use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    account::{AccountId, Coin, Denom},
    command::{LedgerCommand, MintCommand, TransferCommand},
};

use super::{AmountViolation, BalanceEntry, LedgerAction, LedgerError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    Minted {
        account: AccountId,
        coin: Coin,
    },
    Transferred {
        sender: AccountId,
        receiver: AccountId,
        coin: Coin,
    },
}

/// Balances and per-denomination supply.
///
/// Commands are checked by [`LedgerState::handle`] against the current
/// state and turned into events; [`LedgerState::apply`] performs no
/// validation, so an event must be applied to the same state it was
/// handled against.
#[derive(Debug, Default)]
pub struct LedgerState {
    balances: BTreeMap<AccountId, BTreeMap<Denom, Decimal>>,
    supply: BTreeMap<Denom, Decimal>,
}

impl LedgerState {
    /// Rebuilds state by minting every entry in order. Repeated
    /// (account, denom) pairs accumulate.
    pub fn restore<I, S>(entries: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = (AccountId, S, Decimal)>,
        S: AsRef<str>,
    {
        let mut state = Self::default();
        for (account, denom, amount) in entries {
            let cmd = LedgerCommand::parse_mint(&account, denom.as_ref(), amount)?;
            let evt = state.handle(cmd)?;
            state.apply(&evt);
        }
        Ok(state)
    }

    pub fn balance(&self, account: &AccountId, denom: &str) -> Decimal {
        self.balances
            .get(account)
            .and_then(|denoms| denoms.get(denom))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total_supply(&self, denom: &str) -> Decimal {
        self.supply.get(denom).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn entries(&self) -> impl Iterator<Item = BalanceEntry> + '_ {
        self.balances.iter().flat_map(|(account, denoms)| {
            denoms.iter().map(|(denom, amount)| BalanceEntry {
                account: *account,
                denom: denom.clone(),
                amount: *amount,
            })
        })
    }

    pub fn handle(&self, command: LedgerCommand) -> Result<LedgerEvent, LedgerError> {
        match command {
            LedgerCommand::Mint(command) => self.handle_mint(command),
            LedgerCommand::Transfer(command) => self.handle_transfer(command),
        }
    }

    fn handle_mint(&self, command: MintCommand) -> Result<LedgerEvent, LedgerError> {
        let MintCommand { account, coin } = command;
        let denom = coin.denom.as_str();
        checked_credit(self.balance(&account, denom), &coin, LedgerAction::Mint)?;
        checked_credit(self.total_supply(denom), &coin, LedgerAction::Mint)?;
        Ok(LedgerEvent::Minted { account, coin })
    }

    fn handle_transfer(&self, command: TransferCommand) -> Result<LedgerEvent, LedgerError> {
        let TransferCommand {
            sender,
            receiver,
            coin,
        } = command;
        let available = self.balance(&sender, coin.denom.as_str());
        if available < coin.amount {
            return Err(LedgerError::InsufficientFunds {
                account: sender,
                denom: coin.denom,
                available,
                required: coin.amount,
            });
        }
        // no overflow check for the receiver: both balances are part of the
        // supply, which mint keeps within range
        Ok(LedgerEvent::Transferred {
            sender,
            receiver,
            coin,
        })
    }

    pub fn apply(&mut self, event: &LedgerEvent) {
        match event {
            LedgerEvent::Minted { account, coin } => {
                self.credit(account, coin);
                let supply = self.total_supply(coin.denom.as_str()) + coin.amount;
                if !supply.is_zero() {
                    self.supply.insert(coin.denom.clone(), supply);
                }
            }
            LedgerEvent::Transferred {
                sender,
                receiver,
                coin,
            } => {
                self.debit(sender, coin);
                self.credit(receiver, coin);
            }
        }
    }

    fn credit(&mut self, account: &AccountId, coin: &Coin) {
        let balance = self.balance(account, coin.denom.as_str()) + coin.amount;
        self.set_balance(account, &coin.denom, balance);
    }

    fn debit(&mut self, account: &AccountId, coin: &Coin) {
        let balance = self.balance(account, coin.denom.as_str()) - coin.amount;
        self.set_balance(account, &coin.denom, balance);
    }

    // zero balances are pruned, never stored
    fn set_balance(&mut self, account: &AccountId, denom: &Denom, amount: Decimal) {
        if amount.is_zero() {
            if let Some(denoms) = self.balances.get_mut(account) {
                denoms.remove(denom.as_str());
                if denoms.is_empty() {
                    self.balances.remove(account);
                }
            }
        } else {
            self.balances
                .entry(*account)
                .or_default()
                .insert(denom.clone(), amount.normalize());
        }
    }
}

fn checked_credit(
    current: Decimal,
    coin: &Coin,
    action: LedgerAction,
) -> Result<Decimal, LedgerError> {
    current
        .checked_add(coin.amount)
        .ok_or(LedgerError::InvalidAmount {
            action,
            amount: coin.amount,
            reason: AmountViolation::Overflow,
        })
}
