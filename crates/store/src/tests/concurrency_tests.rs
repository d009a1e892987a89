use super::helpers::*;
use crate::*;
use anyhow::Result;
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;

// --------------------- Parallel saves ---------------------

#[test]
fn concurrent_saves_all_survive_a_flush() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("shelf.json");

    let store = Arc::new(Store::open(&path, false)?);
    let mut handles = Vec::new();

    for worker in 0..8 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..50usize {
                let key = format!("worker{}-{}", worker, i);
                store.save(&key, &i).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    store.flush()?;

    let reopened = Store::open(&path, false)?;
    assert_eq!(reopened.len(), 8 * 50);
    for worker in 0..8 {
        for i in 0..50usize {
            let mut out = usize::MAX;
            reopened.read(&format!("worker{}-{}", worker, i), &mut out)?;
            assert_eq!(out, i);
        }
    }
    Ok(())
}

// --------------------- Mixed saves and reads ---------------------

#[test]
fn concurrent_saves_and_reads() -> Result<()> {
    // Writers fill distinct keys while every thread polls one stable entry.
    let dir = tempdir()?;
    let store = Arc::new(Store::open(dir.path().join("shelf.json"), false)?);
    store.save("stable", &sample_fixture())?;

    let mut handles = Vec::new();
    for worker in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..25usize {
                store.save(&format!("w{}-{}", worker, i), &i).unwrap();

                let mut out = Fixture::default();
                store.read("stable", &mut out).unwrap();
                assert_eq!(out, sample_fixture());
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 4 * 25 + 1);
    Ok(())
}

// --------------------- Auto-persist under contention ---------------------

#[test]
fn concurrent_auto_persist_saves() -> Result<()> {
    // Every save rewrites the file; the final document must hold all keys.
    let dir = tempdir()?;
    let path = dir.path().join("shelf.json");
    let store = Arc::new(Store::open(&path, true)?);

    let mut handles = Vec::new();
    for worker in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..10usize {
                store.save(&format!("w{}-{}", worker, i), &i).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let reopened = Store::open(&path, false)?;
    assert_eq!(reopened.len(), 4 * 10);
    Ok(())
}
