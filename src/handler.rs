use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    account::AccountId,
    codec::{AddressCodec, CodecError},
    command::{
        MsgMint, MsgMintResponse, MsgTransfer, MsgTransferResponse, QueryBalanceRequest,
        QueryBalanceResponse,
    },
    ledger::{ErrorKind, Ledger, LedgerError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRole {
    Creator,
    Sender,
    Receiver,
    Holder,
}

impl fmt::Display for AddressRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Creator => "creator",
            Self::Sender => "sender",
            Self::Receiver => "receiver",
            Self::Holder => "holder",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AddressError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Account(#[from] LedgerError),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MsgError {
    #[error("Invalid {role} address {address:?}")]
    InvalidAddress {
        role: AddressRole,
        address: String,
        #[source]
        source: AddressError,
    },
    #[error("Failed to mint coins")]
    Mint(#[source] LedgerError),
    #[error("Failed to transfer coins")]
    Transfer(#[source] LedgerError),
}

impl MsgError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAddress { .. } => ErrorKind::InvalidAccount,
            Self::Mint(err) | Self::Transfer(err) => err.kind(),
        }
    }
}

/// Entry point for caller messages: turns textual addresses into
/// accounts and forwards to the ledger. Holds no balance state itself.
pub struct TokenHandler<'a, L, C> {
    ledger: &'a L,
    codec: &'a C,
}

impl<'a, L, C> TokenHandler<'a, L, C>
where
    L: Ledger,
    C: AddressCodec,
{
    pub fn new(ledger: &'a L, codec: &'a C) -> Self {
        Self { ledger, codec }
    }

    pub fn mint(&self, msg: &MsgMint) -> Result<MsgMintResponse, MsgError> {
        let creator = self.decode(AddressRole::Creator, &msg.creator)?;
        self.ledger
            .mint(&creator, &msg.denom, Decimal::from(msg.amount))
            .map_err(MsgError::Mint)
            .inspect_err(|err| warn!(creator = %msg.creator, error = %err, "mint rejected"))?;
        debug!(creator = %msg.creator, denom = %msg.denom, amount = msg.amount, "minted");
        Ok(MsgMintResponse {})
    }

    pub fn transfer(&self, msg: &MsgTransfer) -> Result<MsgTransferResponse, MsgError> {
        let sender = self.decode(AddressRole::Sender, &msg.sender)?;
        let receiver = self.decode(AddressRole::Receiver, &msg.receiver)?;
        self.ledger
            .transfer(&sender, &receiver, &msg.denom, Decimal::from(msg.amount))
            .map_err(MsgError::Transfer)
            .inspect_err(|err| warn!(sender = %msg.sender, error = %err, "transfer rejected"))?;
        debug!(
            sender = %msg.sender,
            receiver = %msg.receiver,
            denom = %msg.denom,
            amount = msg.amount,
            "transferred"
        );
        Ok(MsgTransferResponse {})
    }

    pub fn balance(&self, req: &QueryBalanceRequest) -> Result<QueryBalanceResponse, MsgError> {
        let holder = self.decode(AddressRole::Holder, &req.address)?;
        let balance = self.ledger.balance(&holder, &req.denom);
        Ok(QueryBalanceResponse {
            balance: balance.normalize().to_string(),
        })
    }

    fn decode(&self, role: AddressRole, address: &str) -> Result<AccountId, MsgError> {
        self.codec
            .string_to_bytes(address)
            .map_err(AddressError::from)
            .and_then(|bytes| Ok(AccountId::try_from(bytes.as_slice())?))
            .map_err(|source| {
                warn!(%role, address, error = %source, "address rejected");
                MsgError::InvalidAddress {
                    role,
                    address: address.to_owned(),
                    source,
                }
            })
    }
}
