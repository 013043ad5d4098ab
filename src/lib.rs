//! # Brago
//!
//! > *Acquire, use, release - and never lose an error on the way out.*
//!
//! A Rust library for the bracket pattern: a resource acquired for a bounded
//! scope of use is always released exactly once, whether the use succeeds,
//! fails or panics, and a failing release is reported instead of swallowed.
//!
//! ## Philosophy
//!
//! Resources can be managed:
//! - **Manually** - acquire and release yourself: [`bracket`]
//! - **Semi-automatically** - acquire yourself, release through the resource's
//!   own close capability: [`with_resource`]
//! - **Automatically** - tailored wrappers such as [`fs::with_open`]
//!
//! ## Quick Example
//!
//! ```rust
//! use brago::{bracket, BracketError};
//!
//! let result = bracket(
//!     || Ok::<_, &str>(1),
//!     |_| Err::<(), _>("E2"),
//!     |_| Err::<(), _>("E1"),
//! );
//!
//! match result {
//!     Ok(()) => println!("done"),
//!     Err(BracketError::Both { use_error, release_error }) => {
//!         assert_eq!((use_error, release_error), ("E1", "E2"));
//!     }
//!     Err(other) => panic!("unexpected: {}", other),
//! }
//! ```
//!
//! ## Features
//!
//! - `async` - async variants in [`future`] (tokio-backed close impls)
//! - `tracing` - structured logging of acquire and release outcomes
//! - `serde` - `Serialize`/`Deserialize` for [`BracketError`]
//! - `proptest` - `Arbitrary` for [`BracketError`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod bracket;
pub mod close;
pub mod error;
pub mod fs;
#[cfg(feature = "async")]
pub mod future;
pub mod testing;

// Re-exports
pub use bracket::{bracket, bracket_infallible};
pub use close::{with_resource, with_resource_infallible, Close, InfallibleClose};
pub use error::BracketError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bracket::{bracket, bracket_infallible};
    pub use crate::close::{with_resource, with_resource_infallible, Close, InfallibleClose};
    pub use crate::error::BracketError;
    #[cfg(feature = "async")]
    pub use crate::future::{
        bracket_async, bracket_infallible_async, bracket_local_async, with_resource_async,
        AsyncClose,
    };
}
