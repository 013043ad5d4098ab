//! Async Bracket Example
//!
//! Demonstrates `bracket_async` and `with_resource_async` with tokio files.
//!
//! Run with: cargo run --example async_bracket --features async

use std::io;

use brago::future::{bracket_async, with_resource_async};
use futures::FutureExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("brago_async_demo.txt");

    println!("\n=== with_resource_async: write and flush ===");
    with_resource_async(tokio::fs::File::create(&path), |f| {
        async move { f.write_all(b"hello from an async bracket\n").await }.boxed()
    })
    .await?;
    println!("  wrote {}", path.display());

    println!("\n=== bracket_async: read, then remove the file ===");
    let remove_path = path.clone();
    let contents = bracket_async(
        tokio::fs::File::open(&path),
        |f| async move {
            drop(f);
            tokio::fs::remove_file(&remove_path).await?;
            println!("  removed {}", remove_path.display());
            Ok::<(), io::Error>(())
        },
        |f| {
            async move {
                let mut s = String::new();
                f.read_to_string(&mut s).await?;
                Ok(s)
            }
            .boxed()
        },
    )
    .await?;
    print!("  read: {}", contents);

    Ok(())
}
