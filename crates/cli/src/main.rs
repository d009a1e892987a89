///! # CLI - ShelfKV Interactive Shell
///!
///! A REPL-style command-line interface for the ShelfKV store. Reads commands
///! from stdin, executes them against one open store, and prints results to
///! stdout. Designed for both interactive use and scripted testing (pipe
///! commands via stdin).
///!
///! ## Commands
///!
///! ```text
///! SET key value      Save a value (parsed as JSON if well-formed, else as a string)
///! GET key            Look up a key (prints value or "(nil)")
///! KEYS               List all keys, sorted
///! FLUSH              Rewrite the backing file now
///! STATS              Print store debug info
///! EXIT / QUIT        Shut down gracefully
///! ```
///!
///! ## Configuration
///!
///! All settings are controlled via environment variables:
///!
///! ```text
///! SHELF_PATH          Backing file path              (default: "shelf.json")
///! SHELF_AUTO_PERSIST  Rewrite file after every SET   (default: "true")
///! ```
///!
///! ## Example
///!
///! ```text
///! $ cargo run -p cli
///! ShelfKV started (path=shelf.json, entries=0, version=1, auto_persist=true)
///! > SET name Alice
///! OK
///! > GET name
///! "Alice"
///! > KEYS
///! name
///! (1 keys)
///! > EXIT
///! bye
///! ```

use anyhow::Result;
use serde_json::Value;
use std::io::{self, BufRead, Write};
use store::{Store, StoreError};

/// Reads a configuration value from the environment, falling back to `default`.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn main() -> Result<()> {
    // Configuration via environment variables with sensible defaults.
    //
    //  SHELF_PATH         - backing file path            (default: "shelf.json")
    //  SHELF_AUTO_PERSIST - rewrite file after every SET (default: "true")
    let path = env_or("SHELF_PATH", "shelf.json");
    let auto_persist: bool = env_or("SHELF_AUTO_PERSIST", "true").parse().unwrap_or(true);

    let store = Store::open(&path, auto_persist)?;

    println!(
        "ShelfKV started (path={}, entries={}, version={}, auto_persist={})",
        path,
        store.len(),
        store.format_version(),
        auto_persist
    );
    println!("Commands: SET key value | GET key | KEYS | FLUSH | STATS | EXIT");
    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        if let Some(cmd) = parts.next() {
            match cmd.to_uppercase().as_str() {
                "SET" => {
                    if let Some(k) = parts.next() {
                        let v: String = parts.collect::<Vec<&str>>().join(" ");
                        if v.is_empty() {
                            println!("ERR usage: SET key value");
                        } else {
                            // Well-formed JSON is stored as-is; anything else
                            // becomes a JSON string.
                            let value: Value = serde_json::from_str(&v)
                                .unwrap_or_else(|_| Value::String(v.clone()));
                            match store.save(k, &value) {
                                Ok(()) => println!("OK"),
                                Err(e) => println!("ERR set failed: {}", e),
                            }
                        }
                    } else {
                        println!("ERR usage: SET key value");
                    }
                }
                "GET" => {
                    if let Some(k) = parts.next() {
                        let mut value = Value::Null;
                        match store.read(k, &mut value) {
                            Ok(()) => println!("{}", value),
                            Err(StoreError::NoSuchKey(_)) => println!("(nil)"),
                            Err(e) => println!("ERR read failed: {}", e),
                        }
                    } else {
                        println!("ERR usage: GET key");
                    }
                }
                "KEYS" => {
                    let keys = store.keys();
                    if keys.is_empty() {
                        println!("(empty)");
                    } else {
                        for key in &keys {
                            println!("{}", key);
                        }
                        println!("({} keys)", keys.len());
                    }
                }
                "FLUSH" => match store.flush() {
                    Ok(()) => println!("OK ({} entries)", store.len()),
                    Err(e) => println!("ERR flush failed: {}", e),
                },
                "STATS" => {
                    println!("{:?}", store);
                }
                "EXIT" | "QUIT" => {
                    println!("bye");
                    break;
                }
                other => {
                    println!("unknown command: {}", other);
                }
            }
        }

        print!("> ");
        io::stdout().flush().ok();
    }

    Ok(())
}
