//! Batch front-end for the ledger: reads commands as CSV, feeds them through
//! [`TokenHandler`] and prints the resulting balances as CSV.

use std::io::{Read, Write};

use crate::{
    account::AccountId,
    codec::{AddressCodec, HexAddressCodec},
    command::{CommandKind, MsgMint, MsgTransfer},
    handler::{MsgError, TokenHandler},
    ledger::{ErrorKind, Ledger, in_memory_ledger::InMemoryLedger},
};
use anyhow::{Context, Result};
use csv_parser::{CommandRow, CsvCommandParser, CsvGenesisParser};
use csv_printer::{Balance, print_balances};
use thiserror::Error;
use tracing::info;
pub mod csv_parser;
pub mod csv_printer;

pub const DEFAULT_ADDRESS_PREFIX: &str = "leo";
pub const ADDRESS_PREFIX_ENV: &str = "TOKEN_LEDGER_ADDRESS_PREFIX";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub address_prefix: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            address_prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Defaults, overridden by `TOKEN_LEDGER_ADDRESS_PREFIX` when set.
    pub fn from_env() -> Self {
        match std::env::var(ADDRESS_PREFIX_ENV) {
            Ok(prefix) if !prefix.is_empty() => Self {
                address_prefix: prefix,
            },
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Malformed row: {0}")]
    Parse(#[from] csv::Error),
    #[error("Transfer requires a receiver")]
    MissingReceiver,
    #[error(transparent)]
    Msg(#[from] MsgError),
}

impl ServiceError {
    /// `None` for rows that never reached the ledger.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Msg(err) => Some(err.kind()),
            Self::Parse(_) | Self::MissingReceiver => None,
        }
    }
}

pub struct Service<'w, R, W: 'w> {
    pub config: ServiceConfig,
    /// Initial balances as `address,denom,amount` CSV.
    pub genesis: Option<Box<dyn Read + 'w>>,
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, ServiceError) + 'w>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let codec = HexAddressCodec::new(self.config.address_prefix.as_str());
        let ledger = match self.genesis.take() {
            Some(genesis) => load_genesis(genesis, &codec)?,
            None => InMemoryLedger::default(),
        };
        let handler = TokenHandler::new(&ledger, &codec);

        let parser = CsvCommandParser::new(self.input);
        let mut processed = 0usize;
        let mut rejected = 0usize;
        for (line, row) in parser {
            processed += 1;
            let result = row
                .map_err(ServiceError::from)
                .and_then(|row| dispatch(&handler, row));
            if let Err(err) = result {
                rejected += 1;
                (self.error_printer)(line, err);
            }
        }
        info!(processed, rejected, "command batch finished");

        print_balances(
            self.output,
            ledger.balances().into_iter().map(|entry| Balance {
                address: codec.bytes_to_string(entry.account.as_bytes()),
                denom: entry.denom.to_string(),
                balance: entry.amount,
            }),
        )
    }
}

fn dispatch<L, C>(handler: &TokenHandler<'_, L, C>, row: CommandRow) -> Result<(), ServiceError>
where
    L: Ledger,
    C: AddressCodec,
{
    match row.kind {
        CommandKind::Mint => {
            handler.mint(&MsgMint {
                creator: row.signer,
                denom: row.denom,
                amount: row.amount,
            })?;
        }
        CommandKind::Transfer => {
            let receiver = row.receiver.ok_or(ServiceError::MissingReceiver)?;
            handler.transfer(&MsgTransfer {
                sender: row.signer,
                receiver,
                denom: row.denom,
                amount: row.amount,
            })?;
        }
    }
    Ok(())
}

fn load_genesis<R, C>(source: R, codec: &C) -> Result<InMemoryLedger>
where
    R: Read,
    C: AddressCodec,
{
    let mut entries = Vec::new();
    for (line, row) in CsvGenesisParser::new(source) {
        let row = row.with_context(|| format!("Malformed genesis row at line {line}"))?;
        let bytes = codec
            .string_to_bytes(&row.address)
            .with_context(|| format!("Invalid genesis address at line {line}"))?;
        let account = AccountId::try_from(bytes.as_slice())
            .with_context(|| format!("Invalid genesis address at line {line}"))?;
        entries.push((account, row.denom, row.amount));
    }
    let ledger =
        InMemoryLedger::from_balances(entries).context("Failed to restore genesis balances")?;
    info!(entries = ledger.balances().len(), "genesis loaded");
    Ok(ledger)
}
