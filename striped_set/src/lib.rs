//! A concurrent set of values over a contiguous arena of link nodes,
//! protected by lock striping.
//!
//! The set is a bucketed open-hashing table: a resizable slot array maps a
//! normalized hash to the head of a singly linked chain threaded through a
//! densely packed arena of link nodes. `L` [`STRIPE_COUNT`]-many mutexes
//! stripe the bucket space, so `add`/`remove` calls that land on different
//! stripes proceed fully in parallel; calls on the same stripe serialize.
//! Growth is a grow-only rehash under a global barrier that acquires every
//! stripe lock in ascending order, so no mutator ever observes a
//! half-rehashed table.
//!
//! Three cooperating pieces make up the design, from the bottom up:
//!
//! - [`arena`] — the node arena and bucket table (`Inner`), the one heap
//!   object holding element payloads and the only thing the resize barrier
//!   replaces wholesale.
//! - [`primes`] — the fixed, monotonically increasing bucket-count
//!   progression the table grows through.
//! - [`set`] — the concurrency controller: lock striping, the stripe-local
//!   freelist allocator, the resize barrier, and the public contract
//!   ([`StripedSet::add`], [`StripedSet::remove`], [`StripedSet::contains`],
//!   [`StripedSet::count`], [`StripedSet::clear`], [`StripedSet::iter`]).
//!
//! `contains`, `clear`, and `iter` are documented single-threaded
//! operations: no locks are taken, and the caller must guarantee no
//! concurrent `add`/`remove` is in flight. `add` and `remove` are safe to
//! call from any number of threads.
//!
//! The set never shrinks and imposes no ordering on its elements. Stored
//! elements are owned copies — there is no shared-reference semantics
//! between a value you insert and the copy held internally.

mod arena;
mod error;
mod primes;
mod set;

pub use error::Error;
pub use set::{Iter, StripedSet};

/// Number of lock stripes partitioning the bucket space. Chosen prime so
/// that `stripe = bucket mod STRIPE_COUNT` doesn't systematically correlate
/// with `bucket mod slots.length`, which is also always prime.
pub(crate) const STRIPE_COUNT: usize = 997;
