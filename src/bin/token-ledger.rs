use std::{fs::File, io::Read};

use anyhow::{Context, Result};
use token_ledger::{
    bin_utils::{Service, ServiceConfig, ServiceError},
    ledger::ErrorKind,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries the balances CSV
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let filename = args
        .next()
        .context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;
    let genesis = match args.next() {
        Some(genesis) => {
            let file = File::open(&genesis)
                .with_context(|| format!("Failed to open genesis file `{genesis}`"))?;
            Some(Box::new(file) as Box<dyn Read>)
        }
        None => None,
    };

    let service = Service {
        config: ServiceConfig::from_env(),
        genesis,
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err: ServiceError| {
            match err.kind() {
                Some(ErrorKind::InsufficientFunds) => {
                    // rejected by the ledger, not a malformed row; already logged
                }
                _ => eprintln!("Error at line {line}: {err}"),
            }
        }),
    };
    service.run()
}
