//! Saves a small account ledger, reads it back, and prints it.
//!
//! Run with `cargo run -p store --example accounts`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use store::Store;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Transaction {
    timestamp: u64,
    amount: i64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Account {
    balance: i64,
    name: String,
    transactions: Vec<Transaction>,
}

fn main() -> Result<()> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let account = Account {
        balance: 145_187,
        name: "checking".to_string(),
        transactions: vec![
            Transaction { timestamp: now, amount: 999 },
            Transaction { timestamp: now, amount: 1295 },
        ],
    };

    let dir = tempfile::tempdir()?;
    let store = Store::open(dir.path().join("accounts.json"), true)?;

    store.save("accountData", &account)?;

    let mut restored = Account::default();
    store.read("accountData", &mut restored)?;
    println!("{:?}", restored);

    Ok(())
}
