//! Outcome type for bracket operations.
//!
//! A bracket can fail in four distinct ways, and [`BracketError`] keeps them
//! apart so that no failure is ever dropped on the floor:
//!
//! | Variant | Acquire | Use | Release |
//! |---------|---------|-----|---------|
//! | [`Acquire`](BracketError::Acquire) | failed | not run | not run |
//! | [`Use`](BracketError::Use) | ok | failed | ok |
//! | [`Release`](BracketError::Release) | ok | ok | failed |
//! | [`Both`](BracketError::Both) | ok | failed | failed |

use std::convert::Infallible;
use std::fmt;

/// Error type for bracket operations.
///
/// `E` is the error shared by the acquire and use phases, `F` is the release
/// error. They default to the same type, which is the common case for
/// `io::Error`-based resources.
///
/// The enum design makes invalid states unrepresentable: there is no way to
/// build a value that claims a release error was observed after a failed
/// acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BracketError<E, F = E> {
    /// Resource acquisition failed - use and release never ran.
    Acquire(E),
    /// The use function failed, release succeeded.
    Use(E),
    /// The use function succeeded, release failed.
    Release(F),
    /// Both use and release failed.
    Both {
        /// The error from the use function
        use_error: E,
        /// The error from the release function
        release_error: F,
    },
}

impl<E, F> BracketError<E, F> {
    /// Combines the outcomes of the use and release phases.
    ///
    /// This is the whole error-combination policy of the crate:
    ///
    /// ```rust
    /// use brago::BracketError;
    ///
    /// let out = BracketError::combine(Err::<(), _>("E1"), Err("E2"));
    /// assert_eq!(
    ///     out,
    ///     Err(BracketError::Both { use_error: "E1", release_error: "E2" })
    /// );
    /// ```
    pub fn combine<T>(used: Result<T, E>, released: Result<(), F>) -> Result<T, Self> {
        match (used, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(release_error)) => Err(BracketError::Release(release_error)),
            (Err(use_error), Ok(())) => Err(BracketError::Use(use_error)),
            (Err(use_error), Err(release_error)) => Err(BracketError::Both {
                use_error,
                release_error,
            }),
        }
    }

    /// Returns the acquire error, if any.
    pub fn acquire_error(&self) -> Option<&E> {
        match self {
            BracketError::Acquire(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the use error, if any.
    pub fn use_error(&self) -> Option<&E> {
        match self {
            BracketError::Use(e) | BracketError::Both { use_error: e, .. } => Some(e),
            _ => None,
        }
    }

    /// Returns the release error, if any.
    pub fn release_error(&self) -> Option<&F> {
        match self {
            BracketError::Release(e)
            | BracketError::Both {
                release_error: e, ..
            } => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if the resource was never acquired.
    pub fn is_acquire(&self) -> bool {
        matches!(self, BracketError::Acquire(_))
    }

    /// Returns `true` if both use and release failed.
    pub fn is_combined(&self) -> bool {
        matches!(self, BracketError::Both { .. })
    }

    /// Splits the error into its primary error (acquire or use) and its
    /// release error.
    ///
    /// At least one side is always `Some`.
    pub fn into_parts(self) -> (Option<E>, Option<F>) {
        match self {
            BracketError::Acquire(e) | BracketError::Use(e) => (Some(e), None),
            BracketError::Release(e) => (None, Some(e)),
            BracketError::Both {
                use_error,
                release_error,
            } => (Some(use_error), Some(release_error)),
        }
    }

    /// Maps the acquire/use error type using the provided function.
    pub fn map<G, E2>(self, f: G) -> BracketError<E2, F>
    where
        G: FnOnce(E) -> E2,
    {
        match self {
            BracketError::Acquire(e) => BracketError::Acquire(f(e)),
            BracketError::Use(e) => BracketError::Use(f(e)),
            BracketError::Release(e) => BracketError::Release(e),
            BracketError::Both {
                use_error,
                release_error,
            } => BracketError::Both {
                use_error: f(use_error),
                release_error,
            },
        }
    }

    /// Maps the release error type using the provided function.
    pub fn map_release<G, F2>(self, f: G) -> BracketError<E, F2>
    where
        G: FnOnce(F) -> F2,
    {
        match self {
            BracketError::Acquire(e) => BracketError::Acquire(e),
            BracketError::Use(e) => BracketError::Use(e),
            BracketError::Release(e) => BracketError::Release(f(e)),
            BracketError::Both {
                use_error,
                release_error,
            } => BracketError::Both {
                use_error,
                release_error: f(release_error),
            },
        }
    }
}

impl<E> BracketError<E, Infallible> {
    /// Collapses a bracket error whose release can never fail.
    ///
    /// Only the acquire and use variants are inhabited, so the result is the
    /// original error, unmodified.
    pub fn into_inner(self) -> E {
        match self {
            BracketError::Acquire(e) | BracketError::Use(e) => e,
            BracketError::Release(never) => match never {},
            BracketError::Both { release_error, .. } => match release_error {},
        }
    }
}

impl<E: fmt::Display, F: fmt::Display> fmt::Display for BracketError<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketError::Acquire(e) => write!(f, "acquire failed: {}", e),
            BracketError::Use(e) => write!(f, "{}", e),
            BracketError::Release(e) => write!(f, "release failed: {}", e),
            BracketError::Both {
                use_error,
                release_error,
            } => write!(
                f,
                "use failed: {}; release also failed: {}",
                use_error, release_error
            ),
        }
    }
}

impl<E, F> std::error::Error for BracketError<E, F>
where
    E: std::error::Error + 'static,
    F: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BracketError::Acquire(e) | BracketError::Use(e) => Some(e),
            BracketError::Both { use_error, .. } => Some(use_error),
            BracketError::Release(e) => Some(e),
        }
    }
}

#[cfg(any(test, feature = "proptest"))]
use proptest::prelude::*;

#[cfg(any(test, feature = "proptest"))]
impl<E, F> Arbitrary for BracketError<E, F>
where
    E: Arbitrary + 'static,
    F: Arbitrary + 'static,
    E::Parameters: Clone,
    F::Parameters: Clone,
{
    type Parameters = (E::Parameters, F::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (e_params, f_params) = args;
        prop_oneof![
            any_with::<E>(e_params.clone()).prop_map(BracketError::Acquire),
            any_with::<E>(e_params.clone()).prop_map(BracketError::Use),
            any_with::<F>(f_params.clone()).prop_map(BracketError::Release),
            (any_with::<E>(e_params), any_with::<F>(f_params)).prop_map(
                |(use_error, release_error)| BracketError::Both {
                    use_error,
                    release_error,
                }
            ),
        ]
        .boxed()
    }
}
