use std::str::from_utf8;

use token_ledger::{
    bin_utils::{Service, ServiceConfig, ServiceError},
    ledger::ErrorKind,
};

const TEST_FILE: &str = include_str!("transactions.csv");
const GENESIS_FILE: &str = include_str!("genesis.csv");

fn run(genesis: Option<&str>) -> (String, Vec<(u64, Option<ErrorKind>)>) {
    run_batch(TEST_FILE, genesis)
}

fn run_batch(commands: &str, genesis: Option<&str>) -> (String, Vec<(u64, Option<ErrorKind>)>) {
    let mut output = Vec::new();
    let mut errors = Vec::new();
    let service = Service {
        config: ServiceConfig::default(),
        genesis: genesis.map(|g| Box::new(g.as_bytes()) as Box<dyn std::io::Read + '_>),
        input: commands.as_bytes(),
        output: &mut output,
        error_printer: Box::new(|line, err: ServiceError| errors.push((line, err.kind()))),
    };
    service.run().unwrap();
    (from_utf8(&output).unwrap().to_owned(), errors)
}

#[test]
fn process_transactions() {
    let (output, errors) = run(None);
    // balances come out ordered by account, then denomination
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "address,denom,balance",
            "leo0101010101010101010101010101010101010101,leo,60",
            "leo0202020202020202020202020202020202020202,leo,40",
            "leo0303030303030303030303030303030303030303,atom,5",
        ]
    );
    assert_eq!(
        errors,
        vec![
            (4, Some(ErrorKind::InsufficientFunds)),
            (6, Some(ErrorKind::InvalidAccount)),
            (7, None),
            (8, Some(ErrorKind::InvalidDenomination)),
        ]
    );
}

#[test]
fn process_transactions_from_genesis() {
    let (output, errors) = run(Some(GENESIS_FILE));
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "address,denom,balance",
            "leo0101010101010101010101010101010101010101,leo,70",
            "leo0202020202020202020202020202020202020202,leo,40",
            "leo0303030303030303030303030303030303030303,atom,5",
            "leo0404040404040404040404040404040404040404,leo,25",
        ]
    );
    assert_eq!(errors.len(), 4);
}

#[test]
fn invalid_genesis_aborts() {
    let mut output = Vec::new();
    let service = Service {
        config: ServiceConfig::default(),
        genesis: Some(Box::new("address,denom,amount\nleo01,leo,5\n".as_bytes())),
        input: TEST_FILE.as_bytes(),
        output: &mut output,
        error_printer: Box::new(|_, _| {}),
    };
    let err = service.run().unwrap_err();
    assert!(err.to_string().contains("line 2"));
    assert!(output.is_empty());
}

#[test]
fn exported_balances_load_back_as_genesis() {
    let holder = "leo0101010101010101010101010101010101010101";
    let commands = format!(
        "type,signer,receiver,denom,amount\n\
         mint,{holder},,leo,{max}\n\
         mint,{holder},,leo,{max}\n",
        max = u64::MAX
    );
    let (exported, errors) = run_batch(&commands, None);
    assert!(errors.is_empty());
    // 2 * u64::MAX no longer fits into a u64
    assert!(exported.contains(&format!("{holder},leo,36893488147419103230")));

    let (reloaded, errors) = run_batch("type,signer,receiver,denom,amount\n", Some(&exported));
    assert!(errors.is_empty());
    assert_eq!(reloaded, exported);
}
