use std::io::Write;

use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Balance {
    pub address: String,
    pub denom: String,
    pub balance: Decimal,
}

pub fn print_balances<W>(
    output: &mut W,
    balances: impl Iterator<Item = Balance>,
) -> anyhow::Result<()>
where
    W: Write,
{
    // header is written by hand so that an empty ledger still gets one
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);
    writer.write_record(["address", "denom", "balance"])?;
    for balance in balances {
        if let Err(err) = writer.serialize(balance) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_rows() {
        let mut output = Vec::new();
        print_balances(
            &mut output,
            [Balance {
                address: "leo0a".to_string(),
                denom: "leo".to_string(),
                balance: Decimal::from(60),
            }]
            .into_iter(),
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "address,denom,balance\nleo0a,leo,60\n"
        );
    }

    #[test]
    fn print_empty() {
        let mut output = Vec::new();
        print_balances(&mut output, std::iter::empty()).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "address,denom,balance\n");
    }
}
