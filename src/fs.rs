//! Bracket wrappers for [`std::fs::File`].
//!
//! Each function opens a file, hands it to `use_fn` and closes it afterwards,
//! so the handle can neither leak nor be closed twice.
//!
//! ```rust,no_run
//! use std::io::Read;
//!
//! let mut contents = String::new();
//! brago::fs::with_open("Cargo.toml", |f| f.read_to_string(&mut contents))?;
//! # Ok::<(), std::io::Error>(())
//! ```

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use crate::bracket::bracket;
use crate::close::with_resource_infallible;
use crate::error::BracketError;

/// Opens `path` read-only and runs `use_fn` on it.
///
/// See [`File::open`].
pub fn with_open<P, T, Use>(path: P, use_fn: Use) -> io::Result<T>
where
    P: AsRef<Path>,
    Use: FnOnce(&mut File) -> io::Result<T>,
{
    with_resource_infallible(|| File::open(path), use_fn)
}

/// Creates (or truncates) `path` and runs `use_fn` on it.
///
/// The file is synced to disk on release, so a failed write-back is reported
/// as [`BracketError::Release`] instead of being lost when the handle drops.
///
/// See [`File::create`].
pub fn with_create<P, T, Use>(path: P, use_fn: Use) -> Result<T, BracketError<io::Error>>
where
    P: AsRef<Path>,
    Use: FnOnce(&mut File) -> io::Result<T>,
{
    bracket(|| File::create(path), |f: File| f.sync_all(), use_fn)
}

/// Opens `path` with the given options and runs `use_fn` on it.
///
/// See [`OpenOptions::open`].
pub fn with_open_file<P, T, Use>(path: P, options: &OpenOptions, use_fn: Use) -> io::Result<T>
where
    P: AsRef<Path>,
    Use: FnOnce(&mut File) -> io::Result<T>,
{
    with_resource_infallible(|| options.open(path), use_fn)
}
