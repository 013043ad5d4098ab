//! Async bracket pattern.
//!
//! Same ordering and error-combination rules as [`crate::bracket`], for
//! resources whose acquire, use and release are asynchronous. Requires the
//! `async` feature.
//!
//! ```rust,ignore
//! use brago::future::bracket_async;
//! use futures::FutureExt;
//!
//! let result = bracket_async(
//!     open_connection(),
//!     |conn| async move { conn.close().await },
//!     |conn| async move { conn.query("SELECT 1").await }.boxed(),
//! )
//! .await;
//! ```
//!
//! # Cancellation
//!
//! If the future returned by [`bracket_async`] is dropped before it
//! completes, the async release cannot run: Rust has no async destructors.
//! The resource is dropped in place instead, so its own `Drop` still runs.

use std::convert::Infallible;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::future::{BoxFuture, LocalBoxFuture};
use futures::FutureExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::bracket::settle;
use crate::error::BracketError;

/// Async bracket with a release that can fail.
///
/// `use_fn` borrows the resource for the lifetime of the future it returns,
/// which is why it must return a [`BoxFuture`] (see [`FutureExt::boxed`]).
/// A `BoxFuture` is `Send`; for resources that are not (`Rc` handles,
/// `RefCell` state) use [`bracket_local_async`].
///
/// A panic while polling the use future is caught, the resource is
/// released, and the panic resumes.
pub async fn bracket_async<R, T, E, F, Acquire, Release, RelFut, Use>(
    acquire: Acquire,
    release: Release,
    use_fn: Use,
) -> Result<T, BracketError<E, F>>
where
    Acquire: Future<Output = Result<R, E>>,
    Release: FnOnce(R) -> RelFut,
    RelFut: Future<Output = Result<(), F>>,
    Use: for<'a> FnOnce(&'a mut R) -> BoxFuture<'a, Result<T, E>>,
{
    let mut resource = match acquire.await {
        Ok(r) => r,
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("resource acquisition failed");
            return Err(BracketError::Acquire(e));
        }
    };

    let used = AssertUnwindSafe(async { use_fn(&mut resource).await })
        .catch_unwind()
        .await;

    let released = release(resource).await;

    settle(used, released)
}

/// Async bracket for resources that are not `Send`.
///
/// Same as [`bracket_async`], but `use_fn` returns a [`LocalBoxFuture`]
/// (see [`FutureExt::boxed_local`]). The returned future is not `Send`
/// either, so run it on a single-threaded executor or a `LocalSet`.
pub async fn bracket_local_async<R, T, E, F, Acquire, Release, RelFut, Use>(
    acquire: Acquire,
    release: Release,
    use_fn: Use,
) -> Result<T, BracketError<E, F>>
where
    Acquire: Future<Output = Result<R, E>>,
    Release: FnOnce(R) -> RelFut,
    RelFut: Future<Output = Result<(), F>>,
    Use: for<'a> FnOnce(&'a mut R) -> LocalBoxFuture<'a, Result<T, E>>,
{
    let mut resource = match acquire.await {
        Ok(r) => r,
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("resource acquisition failed");
            return Err(BracketError::Acquire(e));
        }
    };

    let used = AssertUnwindSafe(async { use_fn(&mut resource).await })
        .catch_unwind()
        .await;

    let released = release(resource).await;

    settle(used, released)
}

/// Async bracket whose release cannot fail.
pub async fn bracket_infallible_async<R, T, E, Acquire, Release, RelFut, Use>(
    acquire: Acquire,
    release: Release,
    use_fn: Use,
) -> Result<T, E>
where
    Acquire: Future<Output = Result<R, E>>,
    Release: FnOnce(R) -> RelFut,
    RelFut: Future<Output = ()>,
    Use: for<'a> FnOnce(&'a mut R) -> BoxFuture<'a, Result<T, E>>,
{
    bracket_async(
        acquire,
        |r| release(r).map(Ok::<(), Infallible>),
        use_fn,
    )
    .await
    .map_err(BracketError::into_inner)
}

/// A resource whose asynchronous release can fail.
pub trait AsyncClose {
    /// Error reported when closing fails.
    type Error;

    /// Release the resource.
    fn close(self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Waits for in-flight writes to land; the handle is closed on drop.
impl AsyncClose for tokio::fs::File {
    type Error = std::io::Error;

    async fn close(mut self) -> std::io::Result<()> {
        self.flush().await
    }
}

/// Flushes the buffer and shuts the inner writer down.
impl<W> AsyncClose for tokio::io::BufWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    type Error = std::io::Error;

    async fn close(mut self) -> std::io::Result<()> {
        self.shutdown().await
    }
}

/// Async bracket over a resource with an [`AsyncClose`] capability.
///
/// Equivalent to `bracket_async(acquire, AsyncClose::close, use_fn)`.
pub async fn with_resource_async<R, T, E, Acquire, Use>(
    acquire: Acquire,
    use_fn: Use,
) -> Result<T, BracketError<E, R::Error>>
where
    R: AsyncClose,
    Acquire: Future<Output = Result<R, E>>,
    Use: for<'a> FnOnce(&'a mut R) -> BoxFuture<'a, Result<T, E>>,
{
    bracket_async(acquire, R::close, use_fn).await
}
