use std::io::Read;

use crate::command::CommandKind;
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::{Deserialize, de::DeserializeOwned};

/// `type,signer,receiver,denom,amount`; `receiver` stays empty for mints.
#[derive(Debug, Deserialize)]
pub struct CommandRow {
    #[serde(rename = "type")]
    pub kind: CommandKind,
    pub signer: String,
    pub receiver: Option<String>,
    pub denom: String,
    pub amount: u64,
}

/// `address,denom,amount`; the `balance` header written by
/// [`super::csv_printer::print_balances`] is accepted too.
#[derive(Debug, Deserialize)]
pub struct GenesisRow {
    pub address: String,
    pub denom: String,
    // parsed from text, csv would otherwise hand large integers over as u128
    #[serde(alias = "balance", with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// Yields every CSV record together with the line it starts on. Malformed
/// records are reported, not skipped, so callers can point at the line.
pub struct CsvParser<R, T> {
    iter: DeserializeRecordsIntoIter<R, T>,
}

pub type CsvCommandParser<R> = CsvParser<R, CommandRow>;
pub type CsvGenesisParser<R> = CsvParser<R, GenesisRow>;

impl<R, T> CsvParser<R, T>
where
    R: Read,
    T: DeserializeOwned,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R, T> Iterator for CsvParser<R, T>
where
    R: Read,
    T: DeserializeOwned,
{
    type Item = (u64, Result<T, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
