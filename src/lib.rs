/// Account identifiers, denominations and validated coin amounts.
pub mod account;

/// Caller messages and the validated ledger commands built from them.
pub mod command;

/// Balance store interface, plus "in memory" implementation.
/// State is modified using events, which are created by handling commands.
pub mod ledger;

/// Textual address encoding, injected into the message layer.
pub mod codec;

/// Mint, Transfer and Balance handlers sitting between callers and the
/// ledger.
pub mod handler;

/// CSV batch front-end used by the binary and the integration test.
pub mod bin_utils;
