//! Bracket pattern for safe resource management.
//!
//! The bracket pattern ensures resources are properly released even when
//! errors occur. This module provides:
//!
//! - [`bracket`] - Acquire/use/release where release can fail
//! - [`bracket_infallible`] - Acquire/use/release where release cannot fail
//!
//! # Guarantees
//!
//! - If acquisition fails, neither use nor release runs and the acquire error
//!   is returned unmodified.
//! - If acquisition succeeds, release runs exactly once, after use, whatever
//!   use returned. This includes a panic in use: release runs, then the
//!   panic continues to unwind.
//! - A release error is never discarded. It is either the whole outcome
//!   (use succeeded) or half of [`BracketError::Both`] (use failed too).
//!
//! # Example
//!
//! ```rust
//! use brago::bracket;
//!
//! let result = bracket(
//!     || Ok::<_, String>(vec![1, 2, 3]),
//!     |buf: Vec<i32>| {
//!         assert_eq!(buf.len(), 4);
//!         Ok::<_, String>(())
//!     },
//!     |buf| {
//!         buf.push(4);
//!         Ok(buf.iter().sum::<i32>())
//!     },
//! );
//!
//! assert_eq!(result, Ok(10));
//! ```

use std::convert::Infallible;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crate::error::BracketError;

/// Bracket pattern for safe resource management.
///
/// Acquires a resource, uses it, and guarantees release even on error or
/// panic. Both use and release outcomes are reported through
/// [`BracketError`].
///
/// # Type Parameters
///
/// * `Acquire` - Function that acquires the resource
/// * `Release` - Function that releases the resource (receives ownership)
/// * `Use` - Function that uses the resource (receives a mutable borrow)
///
/// # Example
///
/// ```rust
/// use brago::{bracket, BracketError};
///
/// let result = bracket(
///     || Ok::<_, &str>(1),
///     |_| Err::<(), _>("E2"),
///     |_| Err::<(), _>("E1"),
/// );
///
/// assert_eq!(
///     result,
///     Err(BracketError::Both { use_error: "E1", release_error: "E2" })
/// );
/// ```
pub fn bracket<R, T, E, F, Acquire, Release, Use>(
    acquire: Acquire,
    release: Release,
    use_fn: Use,
) -> Result<T, BracketError<E, F>>
where
    Acquire: FnOnce() -> Result<R, E>,
    Release: FnOnce(R) -> Result<(), F>,
    Use: FnOnce(&mut R) -> Result<T, E>,
{
    // Acquire - nothing to release if this fails
    let mut resource = match acquire() {
        Ok(r) => r,
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("resource acquisition failed");
            return Err(BracketError::Acquire(e));
        }
    };

    // Use the resource, catching panics so release still runs
    let used = panic::catch_unwind(AssertUnwindSafe(|| use_fn(&mut resource)));

    // Release runs regardless of use result
    let released = release(resource);

    settle(used, released)
}

/// Combines the use and release outcomes, re-raising a panic caught in use
/// once release has run.
pub(crate) fn settle<T, E, F>(
    used: thread::Result<Result<T, E>>,
    released: Result<(), F>,
) -> Result<T, BracketError<E, F>> {
    match used {
        Ok(used) => {
            #[cfg(feature = "tracing")]
            match &released {
                Ok(()) => tracing::debug!(use_ok = used.is_ok(), "resource released"),
                Err(_) => tracing::warn!(use_ok = used.is_ok(), "resource release failed"),
            }
            BracketError::combine(used, released)
        }
        Err(payload) => {
            if released.is_err() {
                #[cfg(feature = "tracing")]
                tracing::error!("resource release failed after panic");
                #[cfg(not(feature = "tracing"))]
                eprintln!("resource release failed after panic");
            }
            panic::resume_unwind(payload)
        }
    }
}

/// Bracket for resources whose release cannot fail.
///
/// Thin adaptation of [`bracket`]: the release is wrapped to always report
/// success, so the outcome is either the value, the acquire error or the use
/// error - each returned unmodified.
///
/// # Example
///
/// ```rust
/// use brago::bracket_infallible;
///
/// let mut released = Vec::new();
/// let result = bracket_infallible(
///     || Ok::<_, String>(7),
///     |r| released.push(r),
///     |r| Err::<(), _>(format!("cannot use {}", r)),
/// );
///
/// assert_eq!(result, Err("cannot use 7".to_string()));
/// assert_eq!(released, vec![7]);
/// ```
pub fn bracket_infallible<R, T, E, Acquire, Release, Use>(
    acquire: Acquire,
    release: Release,
    use_fn: Use,
) -> Result<T, E>
where
    Acquire: FnOnce() -> Result<R, E>,
    Release: FnOnce(R),
    Use: FnOnce(&mut R) -> Result<T, E>,
{
    bracket(
        acquire,
        |r| {
            release(r);
            Ok::<(), Infallible>(())
        },
        use_fn,
    )
    .map_err(BracketError::into_inner)
}
