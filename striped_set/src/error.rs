//! Error kinds surfaced by the public API.

use std::fmt;

/// Errors the set can report to a caller.
///
/// Both variants are structural: neither is retried internally, and neither
/// can be reached through normal bounded use of the API (see each variant's
/// docs for the precise trigger).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// [`crate::StripedSet::add`] would have to grow past the end of the
    /// fixed bucket-size progression to keep the load factor at or below
    /// 0.7. The set never shrinks, so once this is returned the set can
    /// still serve existing elements but can never admit a new distinct one.
    OutOfCapacity,
    /// A single-threaded-only operation ([`crate::StripedSet::contains`],
    /// [`crate::StripedSet::clear`], [`crate::StripedSet::iter`]) observed a
    /// resize in flight. This only fires in debug builds — it is a
    /// programming error, not a recoverable condition.
    ConcurrentAccessViolation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfCapacity => {
                write!(f, "bucket-size progression exhausted; set cannot grow further")
            }
            Error::ConcurrentAccessViolation => write!(
                f,
                "single-threaded operation invoked while a resize was in flight"
            ),
        }
    }
}

impl std::error::Error for Error {}
