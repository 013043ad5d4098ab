//! File Copy Example
//!
//! Copies one file into another with the `fs` wrappers: both handles are
//! closed on every path, and a failure to sync the destination is reported
//! instead of being lost when the handle drops.
//!
//! Usage: `cargo run --example file_copy -- <from> <to>`

use std::io::{self, Read, Write};
use std::process::ExitCode;

use brago::fs::{with_create, with_open};
use brago::BracketError;

fn copy(from: &str, to: &str) -> Result<usize, BracketError<io::Error>> {
    let mut contents = Vec::new();
    with_open(from, |f| f.read_to_end(&mut contents)).map_err(BracketError::Acquire)?;

    with_create(to, |f| {
        f.write_all(&contents)?;
        Ok(contents.len())
    })
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [from, to] = args.as_slice() else {
        eprintln!("usage: file_copy <from> <to>");
        return ExitCode::FAILURE;
    };

    match copy(from, to) {
        Ok(n) => {
            println!("copied {} bytes from {} to {}", n, from, to);
            ExitCode::SUCCESS
        }
        Err(BracketError::Both {
            use_error,
            release_error,
        }) => {
            eprintln!("write failed: {}", use_error);
            eprintln!("closing {} also failed: {}", to, release_error);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("copy failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
