//! Close capabilities and the derived bracket forms.
//!
//! A resource that knows how to release itself implements [`Close`] (release
//! can fail) or [`InfallibleClose`] (release cannot fail). The derived forms
//! [`with_resource`] and [`with_resource_infallible`] then only need an
//! acquire function and a use function:
//!
//! ```rust
//! use std::io::{self, Write};
//! use brago::with_resource;
//!
//! let result = with_resource(
//!     || Ok::<_, io::Error>(io::BufWriter::new(Vec::<u8>::new())),
//!     |w| w.write_all(b"hello"),
//! );
//!
//! assert!(result.is_ok());
//! ```

use std::fs::File;
use std::io::{self, BufWriter, LineWriter, Write};
use std::net::TcpStream;

use crate::bracket::{bracket, bracket_infallible};
use crate::error::BracketError;

/// A resource whose release action can fail.
///
/// `close` consumes the resource, so it cannot be used after release.
pub trait Close {
    /// Error reported when closing fails.
    type Error;

    /// Release the resource.
    fn close(self) -> Result<(), Self::Error>;
}

/// A resource whose release action cannot fail.
pub trait InfallibleClose {
    /// Release the resource.
    fn close(self);
}

/// Flushes the buffer; a flush error is the close error.
impl<W: Write> Close for BufWriter<W> {
    type Error = io::Error;

    fn close(self) -> io::Result<()> {
        self.into_inner().map(drop).map_err(|e| e.into_error())
    }
}

impl<W: Write> Close for LineWriter<W> {
    type Error = io::Error;

    fn close(self) -> io::Result<()> {
        self.into_inner().map(drop).map_err(|e| e.into_error())
    }
}

// Dropping closes the descriptor; std gives no way to observe close(2) errors.
impl InfallibleClose for File {
    fn close(self) {
        drop(self);
    }
}

impl InfallibleClose for TcpStream {
    fn close(self) {
        drop(self);
    }
}

impl<T: InfallibleClose> InfallibleClose for Box<T> {
    fn close(self) {
        InfallibleClose::close(*self);
    }
}

/// Bracket over a resource with a fallible close capability.
///
/// Equivalent to `bracket(acquire, Close::close, use_fn)`.
///
/// # Example
///
/// ```rust
/// use brago::{with_resource, BracketError, Close};
///
/// struct Conn;
///
/// impl Close for Conn {
///     type Error = String;
///
///     fn close(self) -> Result<(), String> {
///         Err("connection reset".to_string())
///     }
/// }
///
/// let result = with_resource(|| Ok::<_, String>(Conn), |_| Ok(42));
/// assert_eq!(result, Err(BracketError::Release("connection reset".to_string())));
/// ```
pub fn with_resource<R, T, E, Acquire, Use>(
    acquire: Acquire,
    use_fn: Use,
) -> Result<T, BracketError<E, R::Error>>
where
    R: Close,
    Acquire: FnOnce() -> Result<R, E>,
    Use: FnOnce(&mut R) -> Result<T, E>,
{
    bracket(acquire, R::close, use_fn)
}

/// Bracket over a resource with an infallible close capability.
///
/// Equivalent to `bracket_infallible(acquire, InfallibleClose::close, use_fn)`.
pub fn with_resource_infallible<R, T, E, Acquire, Use>(
    acquire: Acquire,
    use_fn: Use,
) -> Result<T, E>
where
    R: InfallibleClose,
    Acquire: FnOnce() -> Result<R, E>,
    Use: FnOnce(&mut R) -> Result<T, E>,
{
    bracket_infallible(acquire, R::close, use_fn)
}
