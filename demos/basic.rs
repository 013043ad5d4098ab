//! Basic Bracket Example
//!
//! Demonstrates the acquire → use → release flow and the four shapes an
//! outcome can take.
//!
//! Run with `cargo run --example basic --features tracing` to see the
//! release events logged.

use brago::testing::CallLog;
use brago::{bracket, bracket_infallible, BracketError};

#[derive(Debug)]
struct Connection {
    id: u32,
}

fn open(id: u32) -> Result<Connection, String> {
    println!("  open connection {}", id);
    Ok(Connection { id })
}

fn close(conn: Connection, fail: bool) -> Result<(), String> {
    println!("  close connection {}", conn.id);
    if fail {
        Err(format!("connection {} reset during close", conn.id))
    } else {
        Ok(())
    }
}

fn run(label: &str, use_fails: bool, close_fails: bool) {
    println!("\n=== {} ===", label);

    let result = bracket(
        || open(1),
        |conn| close(conn, close_fails),
        |conn| {
            println!("  query on connection {}", conn.id);
            if use_fails {
                Err("query timed out".to_string())
            } else {
                Ok(42)
            }
        },
    );

    match result {
        Ok(v) => println!("  result: {}", v),
        Err(BracketError::Use(e)) => println!("  use failed: {}", e),
        Err(BracketError::Release(e)) => println!("  release failed: {}", e),
        Err(BracketError::Both {
            use_error,
            release_error,
        }) => println!("  both failed: {} / {}", use_error, release_error),
        Err(BracketError::Acquire(e)) => println!("  acquire failed: {}", e),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    run("Everything succeeds", false, false);
    run("Use fails, release still runs", true, false);
    run("Release fails after successful use", false, true);
    run("Both fail, neither error is lost", true, true);

    println!("\n=== Acquire fails ===");
    let touched = CallLog::new();
    let result = bracket_infallible(
        || Err::<Connection, _>("host unreachable".to_string()),
        |_| touched.record("release"),
        |_| {
            touched.record("use");
            Ok(())
        },
    );
    println!("  result: {:?}, callbacks run: {}", result, touched.count());
}
