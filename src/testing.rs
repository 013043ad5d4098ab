//! Testing utilities for code built on brago.
//!
//! # Examples
//!
//! ## CallLog
//!
//! A [`CallLog`] records every call made through it, so a test can check that
//! a release ran exactly once and with which resource:
//!
//! ```rust
//! use brago::bracket;
//! use brago::testing::CallLog;
//!
//! let releases = CallLog::new();
//!
//! let _ = bracket(
//!     || Ok::<_, String>(1),
//!     |r| {
//!         releases.record(r);
//!         Ok::<_, String>(())
//!     },
//!     |_| Err::<(), _>("E1".to_string()),
//! );
//!
//! assert_eq!(releases.calls(), vec![1]);
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use brago::{assert_bracket_err, assert_bracket_ok, BracketError};
//!
//! let ok: Result<i32, BracketError<&str>> = Ok(1);
//! assert_bracket_ok!(ok);
//!
//! let both: Result<i32, BracketError<&str>> = Err(BracketError::Both {
//!     use_error: "E1",
//!     release_error: "E2",
//! });
//! assert_bracket_err!(both, Both);
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

/// Records invocations and their arguments.
///
/// Clones share the same record, so a call log can be moved into a closure and
/// inspected from the outside.
#[derive(Debug)]
pub struct CallLog<A> {
    calls: Arc<Mutex<Vec<A>>>,
}

impl<A> CallLog<A> {
    /// Create an empty call log.
    pub fn new() -> Self {
        CallLog {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Record one invocation with its argument.
    pub fn record(&self, arg: A) {
        self.lock().push(arg);
    }

    /// Number of recorded invocations.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of the recorded arguments, in call order.
    pub fn calls(&self) -> Vec<A>
    where
        A: Clone,
    {
        self.lock().clone()
    }

    // A panic inside a bracket under test must not hide what was recorded.
    fn lock(&self) -> MutexGuard<'_, Vec<A>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<A> Clone for CallLog<A> {
    fn clone(&self) -> Self {
        CallLog {
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<A> Default for CallLog<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert that a bracket outcome is `Ok`.
///
/// This macro will panic if the outcome is an `Err`.
#[macro_export]
macro_rules! assert_bracket_ok {
    ($result:expr) => {
        match $result {
            Ok(_) => {}
            Err(e) => {
                panic!("Expected Ok, got Err: {:?}", e);
            }
        }
    };
}

/// Assert that a bracket outcome failed with the given [`BracketError`](crate::BracketError)
/// variant.
///
/// # Example
///
/// ```rust
/// use brago::{assert_bracket_err, BracketError};
///
/// let released: Result<(), BracketError<&str>> = Err(BracketError::Release("E2"));
/// assert_bracket_err!(released, Release);
/// ```
#[macro_export]
macro_rules! assert_bracket_err {
    ($result:expr, $variant:ident) => {
        match $result {
            Err($crate::BracketError::$variant { .. }) => {}
            other => {
                panic!(
                    "Expected Err({}), got {:?}",
                    stringify!($variant),
                    other
                );
            }
        }
    };
}
